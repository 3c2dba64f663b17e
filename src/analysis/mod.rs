/// Post-assembly operations on extracted tables.
///
/// Submodules:
/// - `gap_fill` - time-weighted linear interpolation of null value cells.

pub mod gap_fill;
