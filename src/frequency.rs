/// Frequency reconciliation across decoded series.
///
/// Each series has a native sampling interval: the one the source
/// declares, or else the most common gap between consecutive readings.
/// The shared axis is the sorted union of every series' positions, where
/// a series' positions are its own readings plus each step of its native
/// cadence between its first and last reading. On top of that union sits a
/// regular grid at the finest interval present, running from the earliest
/// reading of any series to the latest.
///
/// When the merged series disagree on interval, coarser series will have
/// rows that exist only because of the finer grid. That is reported as
/// an `ExtractWarning::FrequencyMismatch`; it never stops the pipeline.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, FixedOffset};
use tracing::{debug, warn};

use crate::columns::column_order;
use crate::model::{ExtractWarning, RawRecord, Series};

/// Shared axis plus the per-series intervals it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Strictly increasing, duplicate-free table index.
    pub axis: Vec<DateTime<FixedOffset>>,
    /// Native interval of each input series, aligned with the input slice.
    /// `None` for a series with a single reading and no declared interval.
    pub intervals: Vec<Option<Duration>>,
    /// Smallest known interval, if any series has one.
    pub finest: Option<Duration>,
    pub warnings: Vec<ExtractWarning>,
}

/// Native interval of a series: declared if present, otherwise modal.
pub fn native_interval(series: &Series) -> Option<Duration> {
    series
        .declared_interval
        .filter(|d| *d > Duration::zero())
        .or_else(|| modal_gap(&series.records))
}

/// Most common gap between consecutive readings. Ties go to the smaller
/// gap. `None` when fewer than two readings exist.
pub fn modal_gap(records: &[RawRecord]) -> Option<Duration> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for pair in records.windows(2) {
        let gap = (pair[1].timestamp - pair[0].timestamp).num_milliseconds();
        if gap > 0 {
            *counts.entry(gap).or_insert(0) += 1;
        }
    }

    let mut best: Option<(i64, usize)> = None;
    for (gap, count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((gap, count));
        }
    }
    best.map(|(gap, _)| Duration::milliseconds(gap))
}

/// Every axis position a series occupies on its own: its readings plus
/// each native step from its first to its last reading.
pub fn native_positions(series: &Series, interval: Option<Duration>) -> Vec<DateTime<FixedOffset>> {
    let mut positions: Vec<DateTime<FixedOffset>> =
        series.records.iter().map(|r| r.timestamp).collect();

    if let (Some(step), Some(first), Some(last)) =
        (interval, series.first_timestamp(), series.last_timestamp())
    {
        let mut at = first + step;
        while at < last {
            positions.push(at);
            at = at + step;
        }
    }

    positions.sort();
    positions.dedup();
    positions
}

/// Regular grid at `step` from the earliest first reading across all
/// series to the latest last reading, anchored on the earliest.
pub fn finest_grid(series: &[Series], step: Duration) -> Vec<DateTime<FixedOffset>> {
    let start = series.iter().filter_map(Series::first_timestamp).min();
    let end = series.iter().filter_map(Series::last_timestamp).max();

    let mut grid = Vec::new();
    if let (Some(start), Some(end)) = (start, end) {
        if step <= Duration::zero() {
            return grid;
        }
        let mut at = start;
        while at <= end {
            grid.push(at);
            at = at + step;
        }
    }
    grid
}

/// Builds the shared axis and checks the series for divergent frequencies.
///
/// Series are visited in column order, so the result does not depend on
/// the order they were decoded in.
pub fn reconcile(series: &[Series]) -> Reconciliation {
    let intervals: Vec<Option<Duration>> = series.iter().map(native_interval).collect();

    let order = column_order(series).unwrap_or_else(|_| (0..series.len()).collect());

    let mut axis: BTreeSet<DateTime<FixedOffset>> = BTreeSet::new();
    for &i in &order {
        axis.extend(native_positions(&series[i], intervals[i]));
    }

    let known: Vec<(usize, Duration)> = order
        .iter()
        .filter_map(|&i| intervals[i].map(|d| (i, d)))
        .collect();
    let distinct: BTreeSet<Duration> = known.iter().map(|(_, d)| *d).collect();
    let finest = distinct.iter().next().copied();

    if let Some(step) = finest {
        axis.extend(finest_grid(series, step));
    }

    let mut warnings = Vec::new();
    match finest {
        Some(finest) if distinct.len() > 1 => {
            let warning = ExtractWarning::FrequencyMismatch {
                intervals: known
                    .iter()
                    .map(|&(i, d)| (series[i].key().clone(), d))
                    .collect(),
                finest,
            };
            warn!("{}", warning);
            warnings.push(warning);
        }
        _ => {}
    }

    debug!(
        "Reconciled {} series onto {} axis positions",
        series.len(),
        axis.len()
    );

    Reconciliation {
        axis: axis.into_iter().collect(),
        intervals,
        finest,
        warnings,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
