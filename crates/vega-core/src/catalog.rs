//! The static name-to-metadata catalog.
//!
//! Three JSON resources ship inside this crate and are embedded at compile
//! time:
//!
//! - `resources/datasets.json` — every dataset name with its filename and
//!   declared format,
//! - `resources/dataset_info.json` — descriptions and citations for a subset
//!   of names,
//! - `resources/local_datasets.json` — the names whose raw files are bundled
//!   under `data/`, mapped to their relative paths.
//!
//! The merged catalog is loaded once per process behind a [`Lazy`] guard and
//! is read-only afterwards, so unsynchronized concurrent reads are safe.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::{DatasetError, DatasetResult};

/// Upstream vega-datasets release the catalog and CDN URL are pinned to.
pub const SOURCE_TAG: &str = "v1.29.0";

/// CDN prefix for remote fetches; `<BASE_URL><filename>` is a dataset URL.
pub const BASE_URL: &str = "https://cdn.jsdelivr.net/npm/vega-datasets@v1.29.0/data/";

const DATASETS_JSON: &str = include_str!("../resources/datasets.json");
const DATASET_INFO_JSON: &str = include_str!("../resources/dataset_info.json");
const LOCAL_DATASETS_JSON: &str = include_str!("../resources/local_datasets.json");

/// Supported dataset file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Comma-delimited table
    Csv,
    /// Tab-delimited table
    Tsv,
    /// Row-oriented JSON (or a nested structure for the special cases)
    Json,
}

impl Format {
    /// All supported formats.
    pub const ALL: &'static [Format] = &[Format::Csv, Format::Tsv, Format::Json];

    /// File extension associated with this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Tsv => "tsv",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for Format {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "tsv" => Ok(Format::Tsv),
            "json" => Ok(Format::Json),
            other => Err(DatasetError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// One immutable catalog record, keyed by dataset name.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub name: String,
    /// Base name of the raw file, both remotely and in the local bundle.
    pub filename: String,
    pub format: Format,
    /// True when the raw file ships inside this crate under `data/`.
    pub is_local: bool,
    /// Relative bundled path (`data/<filename>`) when `is_local`.
    pub local_path: Option<String>,
    pub description: Option<String>,
    pub references: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct RawEntry {
    filename: String,
    format: String,
}

#[derive(Deserialize)]
struct RawInfo {
    description: Option<String>,
    references: Option<Vec<String>>,
}

static LOAD_COUNT: AtomicUsize = AtomicUsize::new(0);

static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    LOAD_COUNT.fetch_add(1, Ordering::SeqCst);
    // The resources are embedded at compile time; failing to parse them is a
    // packaging defect with no sensible recovery.
    Catalog::load().expect("bundled catalog resources are valid")
});

/// The process-wide dataset catalog.
#[derive(Debug)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    /// The memoized process-wide catalog. First use loads it exactly once;
    /// subsequent calls return the same reference.
    pub fn global() -> &'static Catalog {
        &CATALOG
    }

    /// Number of times the global catalog has been initialized (0 or 1).
    pub fn load_count() -> usize {
        LOAD_COUNT.load(Ordering::SeqCst)
    }

    /// Parse and merge the embedded catalog resources.
    pub fn load() -> DatasetResult<Catalog> {
        Self::from_resources(DATASETS_JSON, DATASET_INFO_JSON, LOCAL_DATASETS_JSON)
    }

    fn from_resources(datasets: &str, info: &str, local: &str) -> DatasetResult<Catalog> {
        let raw: BTreeMap<String, RawEntry> =
            serde_json::from_str(datasets).map_err(|err| DatasetError::Resource {
                path: "resources/datasets.json".into(),
                message: err.to_string(),
            })?;
        let info: BTreeMap<String, RawInfo> =
            serde_json::from_str(info).map_err(|err| DatasetError::Resource {
                path: "resources/dataset_info.json".into(),
                message: err.to_string(),
            })?;
        let local: BTreeMap<String, String> =
            serde_json::from_str(local).map_err(|err| DatasetError::Resource {
                path: "resources/local_datasets.json".into(),
                message: err.to_string(),
            })?;

        let mut entries = BTreeMap::new();
        for (name, entry) in raw {
            if entry.filename.is_empty() {
                return Err(DatasetError::Resource {
                    path: "resources/datasets.json".into(),
                    message: format!("dataset '{name}' has an empty filename"),
                });
            }
            let format = entry.format.parse::<Format>()?;
            let details = info.get(&name);
            let local_path = local.get(&name).cloned();
            entries.insert(
                name.clone(),
                CatalogEntry {
                    name,
                    filename: entry.filename,
                    format,
                    is_local: local_path.is_some(),
                    local_path,
                    description: details.and_then(|d| d.description.clone()),
                    references: details.and_then(|d| d.references.clone()),
                },
            );
        }

        // Every locally bundled name must exist in the main listing.
        for name in local.keys() {
            if !entries.contains_key(name) {
                return Err(DatasetError::Resource {
                    path: "resources/local_datasets.json".into(),
                    message: format!("local dataset '{name}' is not in datasets.json"),
                });
            }
        }

        Ok(Catalog { entries })
    }

    /// All dataset names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Names of the locally bundled datasets, sorted.
    pub fn local_names(&self) -> Vec<&str> {
        self.entries
            .values()
            .filter(|entry| entry.is_local)
            .map(|entry| entry.name.as_str())
            .collect()
    }

    /// Look up one entry by its catalog name.
    pub fn lookup(&self, name: &str) -> DatasetResult<&CatalogEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| DatasetError::UnknownDataset {
                name: name.to_string(),
            })
    }

    /// Iterate over all entries in name order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_pinned_to_source_tag() {
        assert!(BASE_URL.contains(SOURCE_TAG));
        assert!(BASE_URL.ends_with("/data/"));
    }

    #[test]
    fn global_catalog_loads_once() {
        let first = Catalog::global();
        let second = Catalog::global();
        assert!(std::ptr::eq(first, second));
        assert_eq!(Catalog::load_count(), 1);
    }

    #[test]
    fn names_are_sorted_and_stable() {
        let catalog = Catalog::global();
        let names: Vec<String> = catalog.names().iter().map(|s| s.to_string()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names, catalog.names());
        assert!(!names.is_empty());
    }

    #[test]
    fn local_names_are_a_subset() {
        let catalog = Catalog::global();
        let names = catalog.names();
        for name in catalog.local_names() {
            assert!(names.contains(&name));
            assert!(catalog.lookup(name).unwrap().is_local);
        }
    }

    #[test]
    fn every_entry_has_filename_and_recognized_format() {
        for entry in Catalog::global().entries() {
            assert!(!entry.filename.is_empty());
            assert!(Format::ALL.contains(&entry.format));
            assert!(entry.filename.ends_with(entry.format.extension()));
        }
    }

    #[test]
    fn lookup_unknown_name_is_actionable() {
        let err = Catalog::global().lookup("blahblahblah").unwrap_err();
        assert!(matches!(err, DatasetError::UnknownDataset { .. }));
        assert!(err.to_string().contains("blahblahblah"));
    }

    #[test]
    fn unknown_format_in_resources_is_rejected() {
        let datasets = r#"{"weird": {"filename": "weird.parquet", "format": "parquet"}}"#;
        let err = Catalog::from_resources(datasets, "{}", "{}").unwrap_err();
        assert!(matches!(err, DatasetError::UnsupportedFormat { .. }));
        assert!(err.to_string().contains("parquet"));
    }

    #[test]
    fn empty_filename_is_rejected() {
        let datasets = r#"{"empty": {"filename": "", "format": "csv"}}"#;
        let err = Catalog::from_resources(datasets, "{}", "{}").unwrap_err();
        assert!(matches!(err, DatasetError::Resource { .. }));
    }

    #[test]
    fn local_listing_must_match_main_listing() {
        let datasets = r#"{"a": {"filename": "a.csv", "format": "csv"}}"#;
        let local = r#"{"b": "data/b.csv"}"#;
        let err = Catalog::from_resources(datasets, "{}", local).unwrap_err();
        assert!(matches!(err, DatasetError::Resource { .. }));
    }

    #[test]
    fn format_round_trips_through_strings() {
        for format in Format::ALL {
            assert_eq!(
                format.extension().parse::<Format>().unwrap(),
                *format,
                "{format}"
            );
        }
        assert!(matches!(
            "xml".parse::<Format>(),
            Err(DatasetError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn descriptions_are_none_or_non_empty() {
        for entry in Catalog::global().entries() {
            if let Some(description) = &entry.description {
                assert!(!description.is_empty(), "{}", entry.name);
            }
            if let Some(references) = &entry.references {
                assert!(!references.is_empty(), "{}", entry.name);
            }
        }
    }

    #[test]
    fn bundled_names_all_have_descriptions() {
        let catalog = Catalog::global();
        for name in catalog.local_names() {
            let entry = catalog.lookup(name).unwrap();
            assert!(
                entry.description.is_some(),
                "local dataset '{name}' is missing a description"
            );
        }
    }
}
