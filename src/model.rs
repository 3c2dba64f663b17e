/// Core data types for NWIS time-series extraction.
///
/// This module defines the shared domain model imported by all other
/// modules: decoded series, column keys, gap classes, warnings and the
/// crate error type. It contains no parsing or table logic.

use chrono::{DateTime, Duration, FixedOffset};
use std::fmt;

// ---------------------------------------------------------------------------
// Wire constants
// ---------------------------------------------------------------------------

/// Suffix appended to a value column name to form its qualifier column.
pub const QUALIFIER_SUFFIX: &str = "_qualifiers";

/// Qualifier tag for a position on the series' own cadence with no value.
pub const TAG_MISSING: &str = "hf.missing";

/// Qualifier tag for a position added only to match a finer series.
pub const TAG_UPSAMPLED: &str = "hf.upsampled";

/// Qualifier tag for filled cells when `mark_interpolated` is enabled.
pub const TAG_INTERPOLATED: &str = "hf.interpolated";

/// Sentinel NWIS uses for "no measurement" when the payload doesn't say.
pub const NWIS_NO_DATA_VALUE: f64 = -999999.0;

/// Statistic code for instantaneous (unaggregated) values.
pub const STAT_INSTANTANEOUS: &str = "00000";

// ---------------------------------------------------------------------------
// Series types
// ---------------------------------------------------------------------------

/// A single observation from one `values[].value[]` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub timestamp: DateTime<FixedOffset>,
    /// `None` when the source reported its no-data sentinel.
    pub value: Option<f64>,
    /// Distinct qualifier codes in first-seen order, e.g. `["P", "e"]`.
    pub qualifiers: Vec<String>,
}

impl RawRecord {
    /// Comma-joined qualifier codes, e.g. `"P,Ice"`.
    pub fn joined_qualifiers(&self) -> String {
        self.qualifiers.join(",")
    }
}

/// Identity of one series. Field order gives the table's column order:
/// site (agency + site code), then parameter, then statistic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesKey {
    pub agency: String,
    pub site_code: String,
    pub parameter_code: String,
    pub statistic_code: String,
}

impl SeriesKey {
    pub fn new(agency: &str, site_code: &str, parameter_code: &str, statistic_code: &str) -> Self {
        SeriesKey {
            agency: agency.to_string(),
            site_code: site_code.to_string(),
            parameter_code: parameter_code.to_string(),
            statistic_code: statistic_code.to_string(),
        }
    }

    /// The `AGENCY:SITECODE` part of the key, e.g. `"USGS:01541000"`.
    pub fn site(&self) -> String {
        format!("{}:{}", self.agency, self.site_code)
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.agency, self.site_code, self.parameter_code, self.statistic_code
        )
    }
}

/// Descriptive metadata carried alongside a series. Nothing in the
/// pipeline interprets these fields; they are handed back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesMeta {
    pub key: SeriesKey,
    pub site_name: String,
    pub variable_name: String,
    pub unit: String,
    pub no_data_value: f64,
}

/// One site/parameter/statistic time series, decoded and validated.
///
/// Invariant: `records` timestamps are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub meta: SeriesMeta,
    /// Sampling interval declared by the source, if any. Daily statistics
    /// declare one day; instantaneous series leave this empty.
    pub declared_interval: Option<Duration>,
    pub records: Vec<RawRecord>,
}

impl Series {
    pub fn key(&self) -> &SeriesKey {
        &self.meta.key
    }

    pub fn first_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        self.records.first().map(|r| r.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        self.records.last().map(|r| r.timestamp)
    }
}

// ---------------------------------------------------------------------------
// Table cell provenance
// ---------------------------------------------------------------------------

/// Why a cell holds what it holds. Assigned once during assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapClass {
    /// An original observation exists at this position.
    Present,
    /// The series' own cadence expects a value here but none was supplied.
    MissingAtNativeFrequency,
    /// The position exists only because a finer series forced it.
    Upsampled,
}

impl GapClass {
    /// The literal qualifier tag written for a gap, or `None` for `Present`
    /// (whose qualifier comes from the source codes).
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            GapClass::Present => None,
            GapClass::MissingAtNativeFrequency => Some(TAG_MISSING),
            GapClass::Upsampled => Some(TAG_UPSAMPLED),
        }
    }
}

/// Whether a table column carries measurements or qualifier text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Value,
    Qualifier,
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Non-fatal conditions reported alongside an extracted table.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractWarning {
    /// The merged series do not share one native sampling interval, so
    /// coarser series gain `hf.upsampled` rows.
    FrequencyMismatch {
        /// Each series with a known interval, in column order.
        intervals: Vec<(SeriesKey, Duration)>,
        finest: Duration,
    },
}

impl fmt::Display for ExtractWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractWarning::FrequencyMismatch { intervals, finest } => {
                let listed: Vec<String> = intervals
                    .iter()
                    .map(|(key, interval)| format!("{} every {}s", key, interval.num_seconds()))
                    .collect();
                write!(
                    f,
                    "series have different sampling frequencies ({}); coarser series are \
                     upsampled to {}s and the new rows are tagged '{}'",
                    listed.join(", "),
                    finest.num_seconds(),
                    TAG_UPSAMPLED
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when extracting a table from NWIS data.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum NwisError {
    /// The response body could not be decoded into typed series.
    #[error("Parse error: {0}")]
    ParseError(String),
    /// No time series with observations was found in the response.
    #[error("No data available: {0}")]
    NoDataAvailable(String),
    /// Two time series produced the same column key.
    #[error("Duplicate series key: {0}")]
    DuplicateSeries(String),
    /// The assembled row index was not unique and strictly increasing.
    #[error("Table index invariant violated: {0}")]
    AxisInvariant(String),
    /// Extraction options could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}
