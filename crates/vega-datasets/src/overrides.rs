//! Per-dataset parsing strategies.
//!
//! A handful of datasets need more than the generic format dispatch: date
//! columns that should come back typed, identifier columns that must stay
//! strings, and the JSON files that are not row-oriented tables at all.
//! Each case is one record in a static table keyed by dataset name.

/// Structural special case applied on top of the format dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Special {
    /// JSON object with `nodes` and `links` record arrays; loads as two
    /// tables, the first ordered by its `index` field.
    Graph,
    /// TopoJSON topology; not tabular, loads as a raw JSON value.
    Topology,
    /// Long-format table that supports the optional wide pivot
    /// (stocks: `{symbol, date, price}` keyed by date).
    Pivotable,
}

/// One column to parse into a temporal dtype.
///
/// `formats` is an ordered list of strptime patterns tried left to right;
/// the first that matches a value wins, so a dataset whose raw shape varies
/// between releases can list every shape it has shipped with. An empty list
/// means dtype inference, which only handles plain ISO dates.
#[derive(Debug)]
pub struct DateColumn {
    pub name: &'static str,
    pub formats: &'static [&'static str],
    /// Values carry a time component; parse to `Datetime` instead of `Date`.
    pub with_time: bool,
}

impl DateColumn {
    /// Plain `YYYY-MM-DD` date column.
    pub const fn iso(name: &'static str) -> DateColumn {
        DateColumn {
            name,
            formats: &["%Y-%m-%d"],
            with_time: false,
        }
    }

    pub const fn with_formats(
        name: &'static str,
        formats: &'static [&'static str],
    ) -> DateColumn {
        DateColumn {
            name,
            formats,
            with_time: false,
        }
    }

    pub const fn timestamp(
        name: &'static str,
        formats: &'static [&'static str],
    ) -> DateColumn {
        DateColumn {
            name,
            formats,
            with_time: true,
        }
    }
}

/// Parser defaults for one dataset. Caller-supplied options take precedence
/// over everything recorded here.
#[derive(Debug)]
pub struct DatasetOverrides {
    pub name: &'static str,
    /// Columns parsed into a temporal dtype after the table is read.
    pub date_columns: &'static [DateColumn],
    /// Columns pinned to Utf8 at read time (leading zeros, zip codes).
    pub utf8_columns: &'static [&'static str],
    pub special: Option<Special>,
}

const NONE: DatasetOverrides = DatasetOverrides {
    name: "",
    date_columns: &[],
    utf8_columns: &[],
    special: None,
};

// The upstream raw files are not uniform about date spelling: the stock
// series use month-name dates ("Jan 1 2000"), the temperature series carry
// an hour component, and github logs full timestamps. Formats listed here
// match the shapes shipped in the pinned release.
const OVERRIDES: &[DatasetOverrides] = &[
    DatasetOverrides {
        name: "cars",
        date_columns: &[DateColumn::iso("Year")],
        ..NONE
    },
    DatasetOverrides {
        name: "climate",
        date_columns: &[DateColumn::with_formats("DATE", &["%Y%m%d", "%Y-%m-%d"])],
        ..NONE
    },
    DatasetOverrides {
        name: "github",
        date_columns: &[DateColumn::timestamp("time", &["%Y-%m-%d %H:%M:%S"])],
        ..NONE
    },
    DatasetOverrides {
        name: "iowa-electricity",
        date_columns: &[DateColumn::iso("year")],
        ..NONE
    },
    DatasetOverrides {
        name: "la-riots",
        date_columns: &[DateColumn::iso("death_date")],
        ..NONE
    },
    DatasetOverrides {
        name: "miserables",
        special: Some(Special::Graph),
        ..NONE
    },
    DatasetOverrides {
        name: "ohlc",
        date_columns: &[DateColumn::iso("date")],
        ..NONE
    },
    DatasetOverrides {
        name: "seattle-temps",
        date_columns: &[DateColumn::timestamp("date", &["%Y-%m-%d %H:%M"])],
        ..NONE
    },
    DatasetOverrides {
        name: "seattle-weather",
        date_columns: &[DateColumn::iso("date")],
        ..NONE
    },
    DatasetOverrides {
        name: "sf-temps",
        date_columns: &[DateColumn::timestamp("date", &["%Y-%m-%d %H:%M"])],
        ..NONE
    },
    DatasetOverrides {
        name: "sp500",
        date_columns: &[DateColumn::with_formats("date", &["%b %d %Y", "%Y-%m-%d"])],
        ..NONE
    },
    DatasetOverrides {
        name: "stocks",
        date_columns: &[DateColumn::with_formats("date", &["%b %d %Y", "%Y-%m-%d"])],
        special: Some(Special::Pivotable),
        ..NONE
    },
    DatasetOverrides {
        name: "unemployment-across-industries",
        date_columns: &[DateColumn::timestamp(
            "date",
            &["%Y-%m-%dT%H:%M:%S%.3fZ", "%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%d"],
        )],
        ..NONE
    },
    DatasetOverrides {
        name: "us-10m",
        special: Some(Special::Topology),
        ..NONE
    },
    DatasetOverrides {
        name: "world-110m",
        special: Some(Special::Topology),
        ..NONE
    },
    DatasetOverrides {
        name: "zipcodes",
        utf8_columns: &["zip_code"],
        ..NONE
    },
];

/// Strategy record for `name`, if the dataset has one.
pub fn overrides_for(name: &str) -> Option<&'static DatasetOverrides> {
    OVERRIDES.iter().find(|entry| entry.name == name)
}
