//! # vega-core: catalog and descriptors for the vega-datasets loader
//!
//! This crate holds the dependency-light half of the workspace: the embedded
//! dataset catalog, the per-lookup [`Dataset`] descriptor, and the shared
//! [`DatasetError`] taxonomy. Byte fetching and tabular parsing live in the
//! `vega-datasets` crate on top.
//!
//! ## Quick start
//!
//! ```rust
//! use vega_core::{Catalog, Dataset};
//!
//! let names = Catalog::global().names();
//! assert!(names.contains(&"iris"));
//!
//! let iris = Dataset::named("iris").unwrap();
//! println!("{}", iris.url());
//! ```
//!
//! ## Design notes
//!
//! The catalog is a lazily-initialized singleton: loaded from the embedded
//! JSON resources exactly once per process (guarded for concurrent first
//! use), then treated as read-only. Descriptors are pure projections of
//! catalog entries and are rebuilt on each access.

pub mod catalog;
pub mod descriptor;
pub mod error;

pub use catalog::{Catalog, CatalogEntry, Format, BASE_URL, SOURCE_TAG};
pub use descriptor::{data_dir, Dataset};
pub use error::{DatasetError, DatasetResult};
