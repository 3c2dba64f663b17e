/// USGS NWIS time-series response decoder.
///
/// Turns the WaterML-as-JSON envelope returned by the NWIS IV and DV
/// services into typed `Series`, one per `timeSeries` entry:
///   https://waterservices.usgs.gov/nwis/iv/
///
/// All schema navigation lives here. Downstream modules only ever see
/// `Series` and `RawRecord`. See `fixtures.rs` for annotated examples of
/// the response structure.

use std::collections::HashSet;

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::model::{
    NwisError, RawRecord, Series, SeriesKey, SeriesMeta, NWIS_NO_DATA_VALUE, STAT_INSTANTANEOUS,
};

// ---------------------------------------------------------------------------
// Serde structures for WaterML JSON deserialization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct NwisResponse {
    value: ValueWrapper,
}

#[derive(Deserialize)]
struct ValueWrapper {
    #[serde(rename = "timeSeries")]
    time_series: Vec<TimeSeries>,
}

#[derive(Deserialize)]
struct TimeSeries {
    #[serde(rename = "sourceInfo")]
    source_info: SourceInfo,
    variable: Variable,
    values: Vec<Values>,
    /// e.g. "USGS:01541000:00060:00000"
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize)]
struct SourceInfo {
    #[serde(rename = "siteName", default)]
    site_name: String,
    #[serde(rename = "siteCode")]
    site_code: Vec<SiteCode>,
    #[serde(rename = "timeZoneInfo", default)]
    time_zone_info: Option<TimeZoneInfo>,
}

#[derive(Deserialize)]
struct SiteCode {
    value: String,
    #[serde(rename = "agencyCode", default)]
    agency_code: Option<String>,
}

#[derive(Deserialize)]
struct TimeZoneInfo {
    #[serde(rename = "defaultTimeZone", default)]
    default_time_zone: Option<ZoneDescriptor>,
}

#[derive(Deserialize)]
struct ZoneDescriptor {
    #[serde(rename = "zoneOffset")]
    zone_offset: String, // "-05:00"
}

#[derive(Deserialize)]
struct Variable {
    #[serde(rename = "variableCode")]
    variable_code: Vec<VariableCode>,
    #[serde(rename = "variableName", default)]
    variable_name: String,
    #[serde(default)]
    unit: Option<Unit>,
    #[serde(rename = "noDataValue", default)]
    no_data_value: Option<f64>,
    #[serde(default)]
    options: Option<VariableOptions>,
}

#[derive(Deserialize)]
struct VariableCode {
    value: String,
}

#[derive(Deserialize)]
struct Unit {
    #[serde(rename = "unitCode")]
    unit_code: String,
}

#[derive(Deserialize)]
struct VariableOptions {
    #[serde(default)]
    option: Vec<VariableOption>,
}

#[derive(Deserialize)]
struct VariableOption {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "optionCode", default)]
    option_code: Option<String>,
}

#[derive(Deserialize)]
struct Values {
    value: Vec<ValueEntry>,
}

#[derive(Deserialize)]
struct ValueEntry {
    value: Option<RawValue>, // USGS returns as string!
    #[serde(default)]
    qualifiers: Vec<String>,
    #[serde(rename = "dateTime")]
    date_time: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Number(f64),
}

// ---------------------------------------------------------------------------
// Response decoding
// ---------------------------------------------------------------------------

/// Decodes an NWIS JSON response body into one `Series` per `timeSeries`
/// entry that holds at least one observation.
///
/// Series are returned in response order; column ordering is the
/// assembler's job.
///
/// # Errors
/// - `NwisError::ParseError` - malformed JSON, a missing required field,
///   an unparseable timestamp or value, or repeated timestamps.
/// - `NwisError::DuplicateSeries` - two entries share one column key.
/// - `NwisError::NoDataAvailable` - no `timeSeries` entries, or all of
///   them had an empty `value` array.
pub fn decode_response(json: &str) -> Result<Vec<Series>, NwisError> {
    let response: NwisResponse = serde_json::from_str(json)
        .map_err(|e| NwisError::ParseError(format!("JSON deserialization failed: {}", e)))?;
    decode_time_series(response.value.time_series)
}

/// Same as `decode_response`, for a payload that has already been parsed
/// into a `serde_json::Value`.
pub fn decode_value(json: serde_json::Value) -> Result<Vec<Series>, NwisError> {
    let response: NwisResponse = serde_json::from_value(json)
        .map_err(|e| NwisError::ParseError(format!("JSON deserialization failed: {}", e)))?;
    decode_time_series(response.value.time_series)
}

fn decode_time_series(time_series: Vec<TimeSeries>) -> Result<Vec<Series>, NwisError> {
    if time_series.is_empty() {
        return Err(NwisError::NoDataAvailable(
            "No timeSeries entries in response".to_string(),
        ));
    }

    let declared = time_series.len();
    let mut decoded = Vec::with_capacity(declared);
    let mut seen: HashSet<SeriesKey> = HashSet::new();

    for entry in time_series {
        let Some(series) = decode_series(entry)? else {
            continue;
        };
        if !seen.insert(series.key().clone()) {
            return Err(NwisError::DuplicateSeries(series.key().to_string()));
        }
        decoded.push(series);
    }

    if decoded.is_empty() {
        return Err(NwisError::NoDataAvailable(
            "All timeSeries entries had empty value arrays".to_string(),
        ));
    }

    debug!(
        "Decoded {} of {} declared time series",
        decoded.len(),
        declared
    );
    Ok(decoded)
}

/// Decodes one `timeSeries` entry. Returns `Ok(None)` when the entry has
/// no observations.
fn decode_series(series: TimeSeries) -> Result<Option<Series>, NwisError> {
    let site = series
        .source_info
        .site_code
        .first()
        .ok_or_else(|| NwisError::ParseError("Missing siteCode".to_string()))?;
    let site_code = site.value.clone();
    let agency = site.agency_code.clone().unwrap_or_else(|| "USGS".to_string());

    let parameter_code = series
        .variable
        .variable_code
        .first()
        .ok_or_else(|| NwisError::ParseError("Missing variableCode".to_string()))?
        .value
        .clone();

    let statistic_code = statistic_code(&series.variable, series.name.as_deref()).ok_or_else(|| {
        NwisError::ParseError(format!(
            "No statistic code for site {} parameter {}",
            site_code, parameter_code
        ))
    })?;

    let key = SeriesKey {
        agency,
        site_code,
        parameter_code,
        statistic_code,
    };

    let fallback_offset = match series
        .source_info
        .time_zone_info
        .as_ref()
        .and_then(|tz| tz.default_time_zone.as_ref())
    {
        Some(zone) => parse_zone_offset(&zone.zone_offset)?,
        None => FixedOffset::east_opt(0).ok_or_else(|| {
            NwisError::ParseError("UTC offset out of range".to_string())
        })?,
    };

    let no_data_value = series.variable.no_data_value.unwrap_or(NWIS_NO_DATA_VALUE);

    if series.values.len() > 1 {
        warn!(
            "{} has {} values blocks; only the first is used",
            key,
            series.values.len()
        );
    }

    let Some(values_wrapper) = series.values.into_iter().next() else {
        debug!("{} has no values blocks, skipping", key);
        return Ok(None);
    };

    if values_wrapper.value.is_empty() {
        debug!("{} has an empty value array, skipping", key);
        return Ok(None);
    }

    let mut records = Vec::with_capacity(values_wrapper.value.len());
    for entry in values_wrapper.value {
        records.push(decode_entry(entry, no_data_value, fallback_offset)?);
    }

    // NWIS delivers chronological arrays; sorting only guards the invariant.
    records.sort_by_key(|r| r.timestamp);
    if let Some(pair) = records.windows(2).find(|w| w[0].timestamp == w[1].timestamp) {
        return Err(NwisError::ParseError(format!(
            "{} has repeated dateTime {}",
            key,
            pair[1].timestamp.to_rfc3339()
        )));
    }

    let declared_interval = if key.statistic_code == STAT_INSTANTANEOUS {
        None
    } else {
        Some(Duration::days(1))
    };

    let meta = SeriesMeta {
        key,
        site_name: series.source_info.site_name,
        variable_name: series.variable.variable_name,
        unit: series
            .variable
            .unit
            .map(|u| u.unit_code)
            .unwrap_or_default(),
        no_data_value,
    };

    Ok(Some(Series {
        meta,
        declared_interval,
        records,
    }))
}

fn decode_entry(
    entry: ValueEntry,
    no_data_value: f64,
    fallback_offset: FixedOffset,
) -> Result<RawRecord, NwisError> {
    let timestamp = parse_nwis_datetime(&entry.date_time, fallback_offset)?;

    let value = match entry.value {
        None => None,
        Some(RawValue::Number(v)) => Some(v),
        Some(RawValue::Text(text)) => Some(text.trim().parse::<f64>().map_err(|e| {
            NwisError::ParseError(format!("Failed to parse value '{}': {}", text, e))
        })?),
    };

    // Sentinel check: the no-data value is a large negative integer.
    let value = value.filter(|v| (v - no_data_value).abs() >= 0.1);

    Ok(RawRecord {
        timestamp,
        value,
        qualifiers: dedup_codes(entry.qualifiers),
    })
}

/// Statistic code from the `Statistic` option, falling back to the last
/// segment of the series name.
fn statistic_code(variable: &Variable, name: Option<&str>) -> Option<String> {
    let from_options = variable.options.as_ref().and_then(|options| {
        options
            .option
            .iter()
            .find(|o| o.name.as_deref() == Some("Statistic"))
            .and_then(|o| o.option_code.clone())
    });

    from_options.or_else(|| {
        name.and_then(|n| n.rsplit(':').next())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// Removes repeated qualifier codes, keeping first-seen order.
fn dedup_codes(codes: Vec<String>) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::with_capacity(codes.len());
    for code in codes {
        if !distinct.contains(&code) {
            distinct.push(code);
        }
    }
    distinct
}

/// Parses an NWIS `dateTime`. IV payloads carry an offset
/// (`2019-01-24T10:30:00.000-05:00`); DV payloads are naive
/// (`2019-01-24T00:00:00.000`) and get the site's default zone.
pub fn parse_nwis_datetime(
    raw: &str,
    fallback: FixedOffset,
) -> Result<DateTime<FixedOffset>, NwisError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt);
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map_err(|e| {
        NwisError::ParseError(format!("Failed to parse dateTime '{}': {}", raw, e))
    })?;

    fallback
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| NwisError::ParseError(format!("Ambiguous local dateTime '{}'", raw)))
}

/// Parses a `zoneOffset` such as `"-05:00"`.
fn parse_zone_offset(raw: &str) -> Result<FixedOffset, NwisError> {
    let invalid = || NwisError::ParseError(format!("Invalid zoneOffset '{}'", raw));

    let (sign, rest) = match raw.as_bytes().first() {
        Some(b'+') => (1, &raw[1..]),
        Some(b'-') => (-1, &raw[1..]),
        _ => return Err(invalid()),
    };
    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

// ---------------------------------------------------------------------------
// Metadata probe
// ---------------------------------------------------------------------------

/// Returns the raw `key` field of every `timeSeries` entry, in response
/// order. Entries without the field yield `Value::Null`.
///
/// # Example
/// ```
/// use hydroframe::ingest::usgs::series_property;
///
/// let json = r#"{ "value": { "timeSeries": [ { "name": "USGS:03213700:00060:00000" } ] } }"#;
/// let names = series_property(json, "name").unwrap();
/// assert_eq!(names[0], "USGS:03213700:00060:00000");
/// ```
pub fn series_property(json: &str, key: &str) -> Result<Vec<serde_json::Value>, NwisError> {
    let response: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| NwisError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    let entries = response
        .get("value")
        .and_then(|v| v.get("timeSeries"))
        .and_then(|ts| ts.as_array())
        .ok_or_else(|| NwisError::ParseError("Missing value.timeSeries array".to_string()))?;

    Ok(entries
        .iter()
        .map(|entry| entry.get(key).cloned().unwrap_or(serde_json::Value::Null))
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
