//! Loader facades over the catalog.
//!
//! [`Data`] exposes every catalog name; [`LocalData`] is the restricted view
//! over the bundled subset. Both accept either the catalog spelling
//! (`"la-riots"`) or the normalized method spelling (`"la_riots"`); the
//! mapping is a plain lookup table built once per facade, no reflection.

use std::collections::BTreeMap;
use std::path::PathBuf;

use vega_core::{Catalog, Dataset, DatasetError, DatasetResult};

use crate::fetch;
use crate::parse::{parse, Content, LoadOptions};

/// One dataset's accessor: descriptor plus loading operations.
#[derive(Debug, Clone)]
pub struct DatasetHandle {
    dataset: Dataset,
}

impl DatasetHandle {
    pub fn name(&self) -> &str {
        &self.dataset.name
    }

    /// The underlying descriptor.
    pub fn descriptor(&self) -> &Dataset {
        &self.dataset
    }

    /// Remote URL of the raw file.
    pub fn url(&self) -> String {
        self.dataset.url()
    }

    /// Bundled file path; fails with `NotLocal` for remote-only datasets.
    pub fn filepath(&self) -> DatasetResult<PathBuf> {
        self.dataset.filepath()
    }

    /// Human-readable documentation for the dataset.
    pub fn documentation(&self) -> String {
        self.dataset.documentation()
    }

    /// Raw bytes, bypassing the parser.
    pub fn raw(&self, use_local: bool) -> DatasetResult<Vec<u8>> {
        fetch::fetch_raw(&self.dataset, use_local)
    }

    /// Fetch and parse under the declared format and overrides.
    pub fn load(&self, options: &LoadOptions) -> DatasetResult<Content> {
        let raw = self.raw(options.use_local)?;
        parse(&raw, self.dataset.format, options, &self.dataset.name)
    }
}

/// Facade over every dataset in the catalog.
#[derive(Debug)]
pub struct Data {
    /// Normalized method name -> catalog name.
    methods: BTreeMap<String, String>,
}

impl Data {
    pub fn new() -> Data {
        let methods = Catalog::global()
            .names()
            .iter()
            .map(|name| (name.replace('-', "_"), name.to_string()))
            .collect();
        Data { methods }
    }

    /// All dataset names, sorted.
    pub fn list_datasets(&self) -> Vec<&'static str> {
        Catalog::global().names()
    }

    /// Names of the locally bundled datasets, sorted.
    pub fn list_local_datasets(&self) -> Vec<&'static str> {
        Catalog::global().local_names()
    }

    fn resolve(&self, name: &str) -> DatasetResult<&str> {
        let key = name.replace('-', "_");
        self.methods
            .get(&key)
            .map(String::as_str)
            .ok_or_else(|| DatasetError::UnknownDataset {
                name: name.to_string(),
            })
    }

    /// Accessor for one dataset, by catalog or method spelling.
    pub fn get(&self, name: &str) -> DatasetResult<DatasetHandle> {
        let actual = self.resolve(name)?;
        Ok(DatasetHandle {
            dataset: Dataset::named(actual)?,
        })
    }

    /// Fetch and parse a dataset by name.
    pub fn load(&self, name: &str, options: &LoadOptions) -> DatasetResult<Content> {
        self.get(name)?.load(options)
    }

    /// Raw dataset bytes by name.
    pub fn raw(&self, name: &str, use_local: bool) -> DatasetResult<Vec<u8>> {
        self.get(name)?.raw(use_local)
    }
}

impl Default for Data {
    fn default() -> Self {
        Self::new()
    }
}

/// Restricted facade exposing only the locally bundled datasets.
///
/// A known-but-remote name fails with `NotAvailableLocally`, distinct from
/// the `UnknownDataset` a typo produces, so callers can tell "needs
/// network" apart from "no such dataset".
#[derive(Debug, Default)]
pub struct LocalData {
    data: Data,
}

impl LocalData {
    pub fn new() -> LocalData {
        LocalData { data: Data::new() }
    }

    /// The bundled dataset names, sorted.
    pub fn list_datasets(&self) -> Vec<&'static str> {
        Catalog::global().local_names()
    }

    pub fn get(&self, name: &str) -> DatasetResult<DatasetHandle> {
        let handle = self.data.get(name)?;
        if !handle.descriptor().is_local {
            return Err(DatasetError::NotAvailableLocally {
                name: handle.name().to_string(),
            });
        }
        Ok(handle)
    }

    pub fn load(&self, name: &str, options: &LoadOptions) -> DatasetResult<Content> {
        self.get(name)?.load(options)
    }

    pub fn raw(&self, name: &str, use_local: bool) -> DatasetResult<Vec<u8>> {
        self.get(name)?.raw(use_local)
    }
}
