//! Tabular parser dispatch.
//!
//! Raw bytes become a [`Content`] value according to the dataset's declared
//! format, with two structural special cases (graph and topology JSON) and
//! per-dataset column overrides layered on top. Caller-supplied
//! [`LoadOptions`] always win over the defaults recorded in the strategy
//! table.

use std::io::Cursor;
use std::sync::Arc;

use polars::prelude::pivot::pivot_stable;
use polars::prelude::*;
use serde_json::Value;
use tracing::debug;
use vega_core::{DatasetError, DatasetResult, Format};

use crate::overrides::{overrides_for, DateColumn, Special};

/// Parsed dataset content.
///
/// Most datasets are a single table. The graph datasets (miserables) load
/// as a nodes/links pair, and the TopoJSON topologies (us-10m, world-110m)
/// are not tabular at all and come back as a raw JSON value.
#[derive(Debug)]
pub enum Content {
    Table(DataFrame),
    Graph { nodes: DataFrame, links: DataFrame },
    Topology(Value),
}

impl Content {
    pub fn as_table(&self) -> Option<&DataFrame> {
        match self {
            Content::Table(df) => Some(df),
            _ => None,
        }
    }

    pub fn into_table(self) -> Option<DataFrame> {
        match self {
            Content::Table(df) => Some(df),
            _ => None,
        }
    }

    pub fn into_graph(self) -> Option<(DataFrame, DataFrame)> {
        match self {
            Content::Graph { nodes, links } => Some((nodes, links)),
            _ => None,
        }
    }

    pub fn into_topology(self) -> Option<Value> {
        match self {
            Content::Topology(value) => Some(value),
            _ => None,
        }
    }
}

/// Caller-side parse options, merged over the per-dataset defaults.
///
/// `None` fields fall back to the strategy table; a `Some` value replaces
/// the default entirely (so `Some(vec![])` explicitly disables date
/// parsing, for example).
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Prefer the bundled copy over a network fetch (default true).
    pub use_local: bool,
    /// Field separator; defaults to `,` for csv and `\t` for tsv.
    pub delimiter: Option<u8>,
    /// Columns to parse into the `Date` dtype (by inference; the per-dataset
    /// defaults carry explicit formats instead).
    pub date_columns: Option<Vec<String>>,
    /// Columns pinned to Utf8 at read time.
    pub utf8_columns: Option<Vec<String>>,
    /// Reshape long-format rows into a wide table (stocks only).
    pub pivoted: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            use_local: true,
            delimiter: None,
            date_columns: None,
            utf8_columns: None,
            pivoted: false,
        }
    }
}

/// Parse raw dataset bytes under the declared `format`.
pub fn parse(
    raw: &[u8],
    format: Format,
    options: &LoadOptions,
    name: &str,
) -> DatasetResult<Content> {
    let strategy = overrides_for(name);
    debug!(name, %format, bytes = raw.len(), "parsing dataset");

    match strategy.and_then(|s| s.special) {
        Some(Special::Graph) => return parse_graph(raw, name),
        Some(Special::Topology) => {
            let value: Value = serde_json::from_slice(raw).map_err(|err| parse_error(name, err))?;
            return Ok(Content::Topology(value));
        }
        _ => {}
    }

    let date_targets: Vec<DateTarget> = match &options.date_columns {
        Some(columns) => columns.iter().map(|c| DateTarget::inferred(c)).collect(),
        None => strategy
            .map(|s| s.date_columns.iter().map(DateTarget::from_column).collect())
            .unwrap_or_default(),
    };
    let utf8_columns: Vec<String> = match &options.utf8_columns {
        Some(columns) => columns.clone(),
        None => strategy
            .map(|s| s.utf8_columns.iter().map(|c| c.to_string()).collect())
            .unwrap_or_default(),
    };

    let df = match format {
        Format::Csv => read_delimited(raw, options.delimiter.unwrap_or(b','), &utf8_columns, name)?,
        Format::Tsv => {
            read_delimited(raw, options.delimiter.unwrap_or(b'\t'), &utf8_columns, name)?
        }
        Format::Json => read_json_rows(raw, name)?,
    };
    let df = apply_date_columns(df, &date_targets, name)?;

    if options.pivoted {
        if strategy.and_then(|s| s.special) != Some(Special::Pivotable) {
            return Err(DatasetError::Parse {
                name: name.to_string(),
                message: "this dataset does not support pivoted output".to_string(),
            });
        }
        return Ok(Content::Table(pivot_wide(&df, name)?));
    }

    Ok(Content::Table(df))
}

fn read_delimited(
    raw: &[u8],
    separator: u8,
    utf8_columns: &[String],
    name: &str,
) -> DatasetResult<DataFrame> {
    let mut reader = CsvReader::new(Cursor::new(raw))
        .has_header(true)
        .with_separator(separator);
    if !utf8_columns.is_empty() {
        let schema = Schema::from_iter(
            utf8_columns
                .iter()
                .map(|column| Field::new(column, DataType::Utf8)),
        );
        reader = reader.with_dtypes(Some(Arc::new(schema)));
    }
    reader.finish().map_err(|err| parse_error(name, err))
}

fn read_json_rows(raw: &[u8], name: &str) -> DatasetResult<DataFrame> {
    JsonReader::new(Cursor::new(raw))
        .with_json_format(JsonFormat::Json)
        .finish()
        .map_err(|err| parse_error(name, err))
}

/// One column to convert to a temporal dtype, resolved from either the
/// caller's options or the per-dataset table.
struct DateTarget {
    name: String,
    formats: Vec<String>,
    with_time: bool,
}

impl DateTarget {
    fn inferred(name: &str) -> DateTarget {
        DateTarget {
            name: name.to_string(),
            formats: Vec::new(),
            with_time: false,
        }
    }

    fn from_column(column: &DateColumn) -> DateTarget {
        DateTarget {
            name: column.name.to_string(),
            formats: column.formats.iter().map(|f| f.to_string()).collect(),
            with_time: column.with_time,
        }
    }

    /// Conversion expression for this column. With explicit formats, each
    /// candidate parses non-strictly and the first match per value wins, so
    /// a column mixing shapes (or a bundled file that differs from the
    /// remote one) still converts cleanly.
    fn expr(&self) -> Expr {
        if self.formats.is_empty() {
            let options = StrptimeOptions {
                format: None,
                strict: false,
                ..Default::default()
            };
            return col(&self.name).str().to_date(options);
        }
        let mut candidates: Vec<Expr> = self
            .formats
            .iter()
            .map(|format| {
                let options = StrptimeOptions {
                    format: Some(format.clone()),
                    strict: false,
                    ..Default::default()
                };
                if self.with_time {
                    col(&self.name).str().to_datetime(
                        Some(TimeUnit::Milliseconds),
                        None,
                        options,
                        lit("raise"),
                    )
                } else {
                    col(&self.name).str().to_date(options)
                }
            })
            .collect();
        if candidates.len() == 1 {
            candidates.remove(0)
        } else {
            coalesce(&candidates)
        }
    }
}

fn apply_date_columns(
    df: DataFrame,
    targets: &[DateTarget],
    name: &str,
) -> DatasetResult<DataFrame> {
    if targets.is_empty() {
        return Ok(df);
    }
    let mut lazy = df.lazy();
    for target in targets {
        lazy = lazy.with_column(target.expr());
    }
    lazy.collect().map_err(|err| parse_error(name, err))
}

/// Split a `{nodes: [...], links: [...]}` JSON object into two frames,
/// ordering the nodes table by its `index` field.
fn parse_graph(raw: &[u8], name: &str) -> DatasetResult<Content> {
    let value: Value = serde_json::from_slice(raw).map_err(|err| parse_error(name, err))?;
    let nodes = record_array(&value, "nodes", name)?;
    let links = record_array(&value, "links", name)?;
    let nodes = order_by_index(nodes, name)?;
    Ok(Content::Graph { nodes, links })
}

fn record_array(value: &Value, field: &str, name: &str) -> DatasetResult<DataFrame> {
    let records = value.get(field).ok_or_else(|| DatasetError::Parse {
        name: name.to_string(),
        message: format!("missing '{field}' array"),
    })?;
    let bytes = serde_json::to_vec(records).map_err(|err| parse_error(name, err))?;
    read_json_rows(&bytes, name)
}

fn order_by_index(nodes: DataFrame, name: &str) -> DatasetResult<DataFrame> {
    if !nodes.get_column_names().contains(&"index") {
        return Ok(nodes);
    }
    let mut ordered = vec!["index".to_string()];
    ordered.extend(
        nodes
            .get_column_names()
            .iter()
            .filter(|column| **column != "index")
            .map(|column| column.to_string()),
    );
    let sorted = nodes
        .lazy()
        .sort("index", SortOptions::default())
        .collect()
        .map_err(|err| parse_error(name, err))?;
    sorted.select(ordered).map_err(|err| parse_error(name, err))
}

/// Long-to-wide reshape for the stocks dataset: one column per symbol,
/// rows keyed by date, missing symbol/date pairs left null.
fn pivot_wide(df: &DataFrame, name: &str) -> DatasetResult<DataFrame> {
    // at most one price per symbol/date pair, so no aggregation is needed
    let wide = pivot_stable(df, ["price"], ["date"], ["symbol"], true, None, None)
        .map_err(|err| parse_error(name, err))?;
    wide.lazy()
        .sort("date", SortOptions::default())
        .collect()
        .map_err(|err| parse_error(name, err))
}

fn parse_error(name: &str, err: impl std::fmt::Display) -> DatasetError {
    DatasetError::Parse {
        name: name.to_string(),
        message: err.to_string(),
    }
}
