/// Linear gap filling for assembled tables.
///
/// Null value cells bounded on both sides by readings in the same column
/// are replaced by straight-line interpolation, weighted by elapsed time
/// rather than row count so unevenly spaced rows (a 30-minute series on a
/// 15-minute axis with a missing hour, say) land where they should.
///
/// Leading and trailing nulls stay null. Qualifier cells keep the tag
/// assembly gave them unless `mark_interpolated` is set.

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::model::TAG_INTERPOLATED;
use crate::table::Table;

/// Fills interior null value cells in every value column of `table`.
///
/// Returns the number of cells filled.
pub fn interpolate_gaps(table: &mut Table, mark_interpolated: bool) -> usize {
    let (index, series) = table.parts_mut();
    let mut filled_total = 0;

    for columns in series.iter_mut() {
        let filled = interpolate_column(index, &mut columns.values);
        if mark_interpolated {
            for &row in &filled {
                columns.qualifiers[row] = TAG_INTERPOLATED.to_string();
            }
        }
        if !filled.is_empty() {
            debug!("Interpolated {} cells in {}", filled.len(), columns.key);
        }
        filled_total += filled.len();
    }

    filled_total
}

/// Interpolates one value column against `index`. Returns the rows that
/// were filled.
pub fn interpolate_column(
    index: &[DateTime<FixedOffset>],
    values: &mut [Option<f64>],
) -> Vec<usize> {
    let mut filled = Vec::new();
    let mut previous: Option<usize> = None;

    for row in 0..values.len() {
        let Some(right) = values[row] else {
            continue;
        };

        if let Some(prev) = previous {
            if row - prev > 1 {
                // Both endpoints are readings; the loop only stops on Some.
                let left = values[prev].unwrap_or(right);
                let t0 = index[prev].timestamp_millis() as f64;
                let t1 = index[row].timestamp_millis() as f64;
                let span = t1 - t0;

                for gap_row in (prev + 1)..row {
                    let t = index[gap_row].timestamp_millis() as f64;
                    let fraction = if span > 0.0 { (t - t0) / span } else { 0.0 };
                    values[gap_row] = Some(left + (right - left) * fraction);
                    filled.push(gap_row);
                }
            }
        }
        previous = Some(row);
    }

    filled
}
