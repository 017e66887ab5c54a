//! Error taxonomy for the vega-datasets ecosystem.
//!
//! Every failure a caller can see is a [`DatasetError`]. None of them are
//! retried internally; each variant carries the offending dataset name and,
//! where it helps, the attempted URL or path, so the failure is actionable
//! without a second lookup.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for catalog lookups, byte fetching, and parsing.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The requested name is absent from the catalog (typo-class error).
    #[error("no such dataset '{name}' exists; use list_datasets() to see available datasets")]
    UnknownDataset { name: String },

    /// The name is known but not bundled; raised only by the local-only loader.
    #[error(
        "dataset '{name}' is not bundled locally; load it through the unrestricted \
         loader to fetch it from the web"
    )]
    NotAvailableLocally { name: String },

    /// `filepath()` was requested for a dataset that does not ship in the package.
    #[error("filepath is only valid for locally bundled datasets; '{name}' is remote-only")]
    NotLocal { name: String },

    /// The catalog marks the dataset local but the bundled file is absent.
    /// This indicates a corrupt installation and is not recoverable.
    #[error("dataset '{name}' is marked local but its bundled file is missing: {path}")]
    ResourceMissing { name: String, path: PathBuf },

    /// A remote fetch failed (transport error or HTTP error status).
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// The catalog declares a format outside the supported set.
    #[error("unrecognized file format '{format}'; valid options are 'csv', 'tsv', 'json'")]
    UnsupportedFormat { format: String },

    /// Raw bytes could not be parsed under the declared format.
    #[error("failed to parse dataset '{name}': {message}")]
    Parse { name: String, message: String },

    /// A bundled catalog resource is malformed (packaging defect).
    #[error("malformed bundled resource '{path}': {message}")]
    Resource { path: String, message: String },

    /// I/O errors other than a missing bundled file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across both crates.
pub type DatasetResult<T> = Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_dataset_names_the_key() {
        let err = DatasetError::UnknownDataset {
            name: "blahblahblah".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("blahblahblah"));
        assert!(msg.contains("list_datasets"));
    }

    #[test]
    fn unsupported_format_enumerates_valid_options() {
        let err = DatasetError::UnsupportedFormat {
            format: "parquet".into(),
        };
        let msg = err.to_string();
        for valid in ["csv", "tsv", "json"] {
            assert!(msg.contains(valid), "missing '{valid}' in: {msg}");
        }
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DatasetError = io_err.into();
        assert!(matches!(err, DatasetError::Io(_)));
    }

    #[test]
    fn question_mark_operator() {
        fn inner() -> DatasetResult<()> {
            Err(DatasetError::NotLocal {
                name: "flights-2k".into(),
            })
        }

        fn outer() -> DatasetResult<()> {
            inner()?;
            Ok(())
        }

        assert!(outer().is_err());
    }
}
