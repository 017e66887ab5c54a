//! Per-lookup dataset descriptors.
//!
//! A [`Dataset`] is a cheap projection of one [`CatalogEntry`]: it derives
//! the remote URL, the bundled file path, and a human-readable documentation
//! block. It carries no mutable state and is rebuilt on every lookup.

use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, CatalogEntry, Format, BASE_URL};
use crate::error::{DatasetError, DatasetResult};

/// Directory holding the bundled raw dataset files.
pub fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Descriptor for a single dataset, derived from its catalog entry.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: String,
    /// Name with hyphens normalized to underscores, for method-style access.
    pub method_name: String,
    pub filename: String,
    pub format: Format,
    pub is_local: bool,
    pub description: Option<String>,
    pub references: Option<Vec<String>>,
}

impl Dataset {
    /// Build the descriptor for `name`, failing with
    /// [`DatasetError::UnknownDataset`] when the catalog has no such entry.
    pub fn named(name: &str) -> DatasetResult<Dataset> {
        let entry = Catalog::global().lookup(name)?;
        Ok(Dataset::from_entry(entry))
    }

    pub(crate) fn from_entry(entry: &CatalogEntry) -> Dataset {
        Dataset {
            name: entry.name.clone(),
            method_name: entry.name.replace('-', "_"),
            filename: entry.filename.clone(),
            format: entry.format,
            is_local: entry.is_local,
            description: entry.description.clone(),
            references: entry.references.clone(),
        }
    }

    /// Full remote URL of the raw file on the pinned CDN release.
    pub fn url(&self) -> String {
        format!("{BASE_URL}{}", self.filename)
    }

    /// Absolute path of the bundled file. Remote-only datasets have no
    /// meaningful local path and fail with [`DatasetError::NotLocal`].
    pub fn filepath(&self) -> DatasetResult<PathBuf> {
        if !self.is_local {
            return Err(DatasetError::NotLocal {
                name: self.name.clone(),
            });
        }
        Ok(data_dir().join(&self.filename))
    }

    /// Human-readable documentation assembled from the catalog metadata:
    /// wrapped description, bundle status, source URL, numbered references.
    pub fn documentation(&self) -> String {
        let description = match &self.description {
            Some(text) => wrap(text, 70, "", "    "),
            None => String::from(
                "This dataset is described at https://github.com/vega/vega-datasets/",
            ),
        };

        let bundle_info = if self.is_local {
            "This dataset is bundled with vega-datasets; it can be loaded without web access."
        } else {
            "This dataset is not bundled with vega-datasets; it requires web access to load."
        };

        let mut doc = format!(
            "Loader for the {name} dataset.\n\n{description}\n\n{bundle_info}\nDataset source: {url}\n",
            name = self.name,
            url = self.url(),
        );

        if let Some(references) = &self.references {
            if !references.is_empty() {
                doc.push_str("\nReferences\n----------\n");
                for (i, reference) in references.iter().enumerate() {
                    let numbered = format!("[{}] {}", i + 1, reference);
                    doc.push_str(&wrap(&numbered, 70, "    ", "       "));
                    doc.push('\n');
                }
            }
        }

        doc
    }
}

/// Greedy word-wrap with distinct first-line and continuation indents.
fn wrap(text: &str, width: usize, initial_indent: &str, subsequent_indent: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::from(initial_indent);
    let mut current_empty = true;

    for word in text.split_whitespace() {
        if !current_empty && current.len() + 1 + word.len() > width {
            lines.push(current);
            current = String::from(subsequent_indent);
            current_empty = true;
        }
        if !current_empty {
            current.push(' ');
        }
        current.push_str(word);
        current_empty = false;
    }
    if !current_empty {
        lines.push(current);
    }

    lines.join("\n")
}
