//! Dual-source byte fetching.
//!
//! A dataset's raw bytes come either from the bundled file inside
//! `vega-core` or from a single blocking HTTP GET against the pinned CDN.
//! One attempt per call; retrying is the caller's decision.

use std::fs;
use std::io::Read;
use std::time::Duration;

use tracing::debug;
use vega_core::{Dataset, DatasetError, DatasetResult, BASE_URL};

/// Load the raw dataset bytes.
///
/// With `use_local` set (the default through the loader facade) and a
/// bundled dataset, the bytes are read from disk without touching the
/// network. A dataset that the catalog marks local but whose file is absent
/// fails with [`DatasetError::ResourceMissing`] rather than silently falling
/// back to the web; that mismatch means the installation is corrupt.
pub fn fetch_raw(dataset: &Dataset, use_local: bool) -> DatasetResult<Vec<u8>> {
    if use_local && dataset.is_local {
        read_bundled(dataset)
    } else {
        fetch_remote(dataset)
    }
}

fn read_bundled(dataset: &Dataset) -> DatasetResult<Vec<u8>> {
    let path = dataset.filepath()?;
    debug!(name = %dataset.name, path = %path.display(), "reading bundled dataset");
    match fs::read(&path) {
        Ok(bytes) => Ok(bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(DatasetError::ResourceMissing {
                name: dataset.name.clone(),
                path,
            })
        }
        Err(err) => Err(err.into()),
    }
}

fn fetch_remote(dataset: &Dataset) -> DatasetResult<Vec<u8>> {
    let url = dataset.url();
    debug!(name = %dataset.name, url = %url, "downloading dataset");
    let response = ureq::get(&url)
        .call()
        .map_err(|err| DatasetError::Fetch {
            url: url.clone(),
            message: err.to_string(),
        })?;

    let mut bytes = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(|err| DatasetError::Fetch {
            url,
            message: err.to_string(),
        })?;
    Ok(bytes)
}

/// Check whether the dataset CDN is reachable.
///
/// Uses a short 1 second timeout: this is a connectivity probe, not a
/// download. The base URL has no index page, so an HTTP error status (404
/// included) still proves the host is reachable; only transport failures
/// count as offline.
pub fn connection_ok() -> bool {
    let agent = ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(1))
        .build();
    match agent.get(BASE_URL).call() {
        Ok(_) => true,
        Err(ureq::Error::Status(_, _)) => true,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_read_skips_the_network() {
        let iris = Dataset::named("iris").unwrap();
        let bytes = fetch_raw(&iris, true).unwrap();
        assert!(!bytes.is_empty());
        assert!(bytes.starts_with(b"sepalLength"));
    }

    #[test]
    fn every_local_dataset_has_readable_bytes() {
        for name in vega_core::Catalog::global().local_names() {
            let dataset = Dataset::named(name).unwrap();
            let bytes = fetch_raw(&dataset, true).unwrap();
            assert!(!bytes.is_empty(), "empty bundled file for '{name}'");
        }
    }

    #[test]
    fn missing_bundled_file_is_resource_missing() {
        // Forge a descriptor whose catalog entry is local but whose file
        // does not exist on disk; the resolver must treat that as fatal.
        let mut dataset = Dataset::named("iris").unwrap();
        dataset.filename = "iris-not-actually-bundled.csv".into();
        let err = fetch_raw(&dataset, true).unwrap_err();
        match err {
            DatasetError::ResourceMissing { name, path } => {
                assert_eq!(name, "iris");
                assert!(path.ends_with("iris-not-actually-bundled.csv"));
            }
            other => panic!("expected ResourceMissing, got {other}"),
        }
    }

    #[test]
    fn remote_fetch_downloads_when_online() {
        if !connection_ok() {
            eprintln!("Skipping test: no web connection");
            return;
        }
        let dataset = Dataset::named("ohlc").unwrap();
        let bytes = fetch_raw(&dataset, false).unwrap();
        assert!(!bytes.is_empty());
    }
}
