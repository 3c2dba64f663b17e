/// Wide-format table assembly.
///
/// `assemble` reindexes every decoded series onto the shared axis from
/// `frequency::reconcile` and classifies each cell:
///
/// | situation                                   | value      | qualifier        |
/// |---------------------------------------------|------------|------------------|
/// | reading at this instant                     | reading    | `"P,e"` etc.     |
/// | sentinel reading with no codes              | null       | `hf.missing`     |
/// | no reading, on the series' own cadence      | null       | `hf.missing`     |
/// | no reading, position forced by finer series | null       | `hf.upsampled`   |
///
/// Columns come out in key order, each value column followed by its
/// qualifier column.

use std::io::{self, Write};

use chrono::{DateTime, Duration, FixedOffset};
use tracing::debug;

use crate::columns::{column_names, column_order, qualifier_column_name, value_column_name};
use crate::frequency::Reconciliation;
use crate::model::{ColumnKind, GapClass, NwisError, QUALIFIER_SUFFIX, Series, SeriesKey, TAG_MISSING};

// ---------------------------------------------------------------------------
// Table types
// ---------------------------------------------------------------------------

/// The value and qualifier columns of one series, aligned with the index.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesColumns {
    pub key: SeriesKey,
    pub values: Vec<Option<f64>>,
    pub qualifiers: Vec<String>,
    /// Provenance of each cell, assigned once during assembly.
    pub gaps: Vec<GapClass>,
}

/// A column header: its wire name and what it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// Time-indexed table with one value and one qualifier column per series.
///
/// Invariant: `index` is strictly increasing and every column has exactly
/// `index.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    index: Vec<DateTime<FixedOffset>>,
    series: Vec<SeriesColumns>,
}

impl Table {
    pub fn index(&self) -> &[DateTime<FixedOffset>] {
        &self.index
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of columns (two per series).
    pub fn width(&self) -> usize {
        self.series.len() * 2
    }

    pub fn series(&self) -> &[SeriesColumns] {
        &self.series
    }

    /// Column headers in table order.
    pub fn columns(&self) -> Vec<Column> {
        let mut columns = Vec::with_capacity(self.width());
        for s in &self.series {
            let (value, qualifier) = column_names(&s.key);
            columns.push(Column {
                name: value,
                kind: ColumnKind::Value,
            });
            columns.push(Column {
                name: qualifier,
                kind: ColumnKind::Qualifier,
            });
        }
        columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns().into_iter().map(|c| c.name).collect()
    }

    /// Row position of an instant, compared by instant rather than offset.
    pub fn row(&self, at: DateTime<FixedOffset>) -> Option<usize> {
        self.index.binary_search(&at).ok()
    }

    fn find_series(&self, value_name: &str) -> Option<&SeriesColumns> {
        self.series
            .iter()
            .find(|s| value_column_name(&s.key) == value_name)
    }

    /// Cells of a value column, by name.
    pub fn values(&self, column: &str) -> Option<&[Option<f64>]> {
        self.find_series(column).map(|s| s.values.as_slice())
    }

    /// Cells of a qualifier column, by its full `_qualifiers` name.
    pub fn qualifiers(&self, column: &str) -> Option<&[String]> {
        let value_name = column.strip_suffix(QUALIFIER_SUFFIX)?;
        self.find_series(value_name).map(|s| s.qualifiers.as_slice())
    }

    /// One value cell. The outer `Option` is `None` when the column or row
    /// does not exist; the inner one is the cell itself.
    pub fn value_at(&self, column: &str, at: DateTime<FixedOffset>) -> Option<Option<f64>> {
        let row = self.row(at)?;
        self.values(column).map(|cells| cells[row])
    }

    /// One qualifier cell, addressed by the qualifier column name.
    pub fn qualifier_at(&self, column: &str, at: DateTime<FixedOffset>) -> Option<&str> {
        let row = self.row(at)?;
        self.qualifiers(column).map(|cells| cells[row].as_str())
    }

    /// Gap class of one cell, addressed by the value column name.
    pub fn gap_at(&self, column: &str, at: DateTime<FixedOffset>) -> Option<GapClass> {
        let row = self.row(at)?;
        self.find_series(column).map(|s| s.gaps[row])
    }

    /// Split borrow used by the gap filler.
    pub(crate) fn parts_mut(&mut self) -> (&[DateTime<FixedOffset>], &mut [SeriesColumns]) {
        (&self.index, &mut self.series)
    }

    /// Writes the table as CSV: a `datetime` column followed by the table
    /// columns. Null values are empty cells.
    pub fn write_csv<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut header = vec!["datetime".to_string()];
        header.extend(self.column_names().iter().map(|name| csv_field(name)));
        writeln!(out, "{}", header.join(","))?;

        for (row, at) in self.index.iter().enumerate() {
            write!(out, "{}", at.to_rfc3339())?;
            for s in &self.series {
                let value = s.values[row].map(|v| v.to_string()).unwrap_or_default();
                write!(out, ",{},{}", value, csv_field(&s.qualifiers[row]))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

/// Quotes a CSV field when it contains a separator or quote.
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Builds the wide table for `series` on the reconciled axis.
///
/// # Errors
/// - `NwisError::DuplicateSeries` - two series share a key.
/// - `NwisError::AxisInvariant` - the index is not strictly increasing, or
///   a column does not match the index length.
pub fn assemble(series: &[Series], reconciliation: &Reconciliation) -> Result<Table, NwisError> {
    let order = column_order(series)?;
    let axis = &reconciliation.axis;

    let mut columns = Vec::with_capacity(order.len());
    for i in order {
        let interval = reconciliation.intervals.get(i).copied().flatten();
        columns.push(reindex(&series[i], interval, axis));
    }

    let table = Table {
        index: axis.clone(),
        series: columns,
    };
    check_invariants(&table)?;

    debug!(
        "Assembled table: {} rows x {} columns",
        table.len(),
        table.width()
    );
    Ok(table)
}

/// Lays one series out along `axis`.
fn reindex(
    series: &Series,
    interval: Option<Duration>,
    axis: &[DateTime<FixedOffset>],
) -> SeriesColumns {
    let mut values = Vec::with_capacity(axis.len());
    let mut qualifiers = Vec::with_capacity(axis.len());
    let mut gaps = Vec::with_capacity(axis.len());

    let span = series.first_timestamp().zip(series.last_timestamp());
    let mut records = series.records.iter().peekable();

    for &at in axis {
        while records.next_if(|r| r.timestamp < at).is_some() {}

        match records.next_if(|r| r.timestamp == at) {
            Some(record) => {
                values.push(record.value);
                if record.value.is_none() && record.qualifiers.is_empty() {
                    qualifiers.push(TAG_MISSING.to_string());
                    gaps.push(GapClass::MissingAtNativeFrequency);
                } else {
                    qualifiers.push(record.joined_qualifiers());
                    gaps.push(GapClass::Present);
                }
            }
            None => {
                let gap = classify_gap(at, span, interval);
                values.push(None);
                qualifiers.push(gap.tag().unwrap_or(TAG_MISSING).to_string());
                gaps.push(gap);
            }
        }
    }

    SeriesColumns {
        key: series.key().clone(),
        values,
        qualifiers,
        gaps,
    }
}

/// Classifies an axis position that has no reading. It is a native gap
/// when it falls strictly inside the series' span on a whole number of
/// native steps from the first reading; anything else was forced in by
/// another series.
fn classify_gap(
    at: DateTime<FixedOffset>,
    span: Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)>,
    interval: Option<Duration>,
) -> GapClass {
    let (Some((first, last)), Some(step)) = (span, interval) else {
        return GapClass::Upsampled;
    };
    let step_ms = step.num_milliseconds();
    if step_ms <= 0 || at <= first || at >= last {
        return GapClass::Upsampled;
    }

    if (at - first).num_milliseconds() % step_ms == 0 {
        GapClass::MissingAtNativeFrequency
    } else {
        GapClass::Upsampled
    }
}

fn check_invariants(table: &Table) -> Result<(), NwisError> {
    if let Some(pair) = table.index.windows(2).find(|w| w[0] >= w[1]) {
        return Err(NwisError::AxisInvariant(format!(
            "index is not strictly increasing at {} -> {}",
            pair[0].to_rfc3339(),
            pair[1].to_rfc3339()
        )));
    }

    for s in &table.series {
        let rows = table.index.len();
        if s.values.len() != rows || s.qualifiers.len() != rows || s.gaps.len() != rows {
            return Err(NwisError::AxisInvariant(format!(
                "{} has {} cells for {} rows",
                qualifier_column_name(&s.key),
                s.qualifiers.len(),
                rows
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
