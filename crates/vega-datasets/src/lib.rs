//! # vega-datasets: named dataset loading into polars
//!
//! A thin, catalog-driven loader for the vega example datasets: resolve a
//! short name to its metadata, fetch the raw bytes from the bundled copy or
//! the pinned CDN release, and parse them into a polars [`DataFrame`]
//! (or a nodes/links pair, or a raw JSON topology).
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use vega_datasets::{Data, LoadOptions};
//!
//! fn main() -> Result<(), vega_datasets::DatasetError> {
//!     let data = Data::new();
//!
//!     // Bundled datasets load without web access.
//!     let iris = data.load("iris", &LoadOptions::default())?;
//!     println!("{:?}", iris.as_table().map(|df| df.shape()));
//!
//!     // Raw bytes, bypassing the parser.
//!     let bytes = data.raw("iris", true)?;
//!     assert!(!bytes.is_empty());
//!
//!     // The stocks dataset supports an optional wide pivot.
//!     let pivoted = data.load(
//!         "stocks",
//!         &LoadOptions { pivoted: true, ..Default::default() },
//!     )?;
//!     println!("{:?}", pivoted.as_table().map(|df| df.get_column_names()));
//!     Ok(())
//! }
//! ```
//!
//! ## Module overview
//!
//! - [`loader`] — the [`Data`] and [`LocalData`] facades and per-dataset
//!   [`DatasetHandle`] accessors.
//! - [`fetch`] — the dual-source byte resolver (bundled file or single
//!   blocking HTTP GET) and the [`connection_ok`] probe.
//! - [`parse`] — format dispatch into [`Content`], per-dataset overrides,
//!   and the stocks pivot.
//!
//! The catalog, descriptors, and the [`DatasetError`] taxonomy live in the
//! `vega-core` crate and are re-exported here.
//!
//! ## Error handling
//!
//! Every public operation returns `Result<_, DatasetError>`; nothing is
//! retried internally. Unknown names, remote-only lookups on the local
//! facade, transport failures, and parse failures are distinct variants
//! that carry the offending name and attempted URL or path.
//!
//! [`DataFrame`]: polars::prelude::DataFrame

pub mod fetch;
pub mod loader;
mod overrides;
pub mod parse;

pub use fetch::{connection_ok, fetch_raw};
pub use loader::{Data, DatasetHandle, LocalData};
pub use parse::{Content, LoadOptions};
pub use vega_core::{Catalog, CatalogEntry, Dataset, DatasetError, DatasetResult, Format};
