/// Column naming and classification for assembled tables.
///
/// Every series contributes two adjacent columns:
///
/// ```text
/// USGS:01541000:00060:00000              value column
/// USGS:01541000:00060:00000_qualifiers   qualifier column
/// ```
///
/// The `_qualifiers` suffix is part of the external contract. Internally
/// each column also carries an explicit `ColumnKind`, so classification
/// never depends on string matching alone.

use crate::model::{ColumnKind, NwisError, QUALIFIER_SUFFIX, Series, SeriesKey};
use crate::table::Table;

// ---------------------------------------------------------------------------
// Key building
// ---------------------------------------------------------------------------

/// Name of the value column for a series, e.g. `"USGS:01541000:00060:00000"`.
pub fn value_column_name(key: &SeriesKey) -> String {
    key.to_string()
}

/// Name of the qualifier column paired with a series' value column.
pub fn qualifier_column_name(key: &SeriesKey) -> String {
    format!("{}{}", key, QUALIFIER_SUFFIX)
}

/// Both column names for a series: `(value, qualifier)`.
pub fn column_names(key: &SeriesKey) -> (String, String) {
    (value_column_name(key), qualifier_column_name(key))
}

/// Positions of `series` in column order: by site, then parameter, then
/// statistic.
///
/// # Errors
/// `NwisError::DuplicateSeries` if two series share a key. The decoder
/// rejects these, so reaching this is a decoding defect.
pub fn column_order(series: &[Series]) -> Result<Vec<usize>, NwisError> {
    let mut order: Vec<usize> = (0..series.len()).collect();
    order.sort_by(|&a, &b| series[a].key().cmp(series[b].key()));

    if let Some(pair) = order
        .windows(2)
        .find(|w| series[w[0]].key() == series[w[1]].key())
    {
        return Err(NwisError::DuplicateSeries(series[pair[0]].key().to_string()));
    }

    Ok(order)
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// True when `name` follows the value-column convention, i.e. it does not
/// end with the qualifier suffix.
pub fn is_value_column(name: &str) -> bool {
    !name.ends_with(QUALIFIER_SUFFIX)
}

/// One flag per table column, in column order: `true` for value columns,
/// `false` for qualifier columns.
pub fn select_data(table: &Table) -> Vec<bool> {
    table
        .columns()
        .iter()
        .map(|column| column.kind == ColumnKind::Value)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
