/// End-to-end extraction: NWIS JSON in, wide table out.
///
/// ```text
/// decode_response ─► reconcile ─► assemble ─► (interpolate_gaps)
/// ```
///
/// Each call is self-contained: no caches, no shared state. Non-fatal
/// conditions come back in `Extraction::warnings` (and are logged through
/// `tracing`); the only fatal data condition is `NwisError::NoDataAvailable`.

use tracing::info;

use crate::analysis::gap_fill::interpolate_gaps;
use crate::config::ExtractOptions;
use crate::frequency::reconcile;
use crate::ingest::usgs::{decode_response, decode_value};
use crate::model::{ExtractWarning, NwisError, Series, SeriesMeta};
use crate::table::{Table, assemble};

/// Result of one extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub table: Table,
    pub warnings: Vec<ExtractWarning>,
    /// Metadata for each series, in column order.
    pub series: Vec<SeriesMeta>,
}

/// Extracts a wide table from an NWIS JSON response body.
///
/// # Example
/// ```no_run
/// use hydroframe::config::ExtractOptions;
/// use hydroframe::extract::extract_nwis_table;
///
/// let body = std::fs::read_to_string("response.json").unwrap();
/// let options = ExtractOptions { interpolate: true, ..Default::default() };
/// let extraction = extract_nwis_table(&body, &options).unwrap();
/// println!("{} rows", extraction.table.len());
/// ```
pub fn extract_nwis_table(json: &str, options: &ExtractOptions) -> Result<Extraction, NwisError> {
    let series = decode_response(json)?;
    extract_from_series(series, options)
}

/// Same as `extract_nwis_table`, for an already-parsed payload.
pub fn extract_nwis_value(
    json: serde_json::Value,
    options: &ExtractOptions,
) -> Result<Extraction, NwisError> {
    let series = decode_value(json)?;
    extract_from_series(series, options)
}

/// Runs reconcile, assemble and (optionally) gap filling over decoded
/// series.
pub fn extract_from_series(
    series: Vec<Series>,
    options: &ExtractOptions,
) -> Result<Extraction, NwisError> {
    if series.is_empty() {
        return Err(NwisError::NoDataAvailable("No series to assemble".to_string()));
    }

    let reconciliation = reconcile(&series);
    let mut table = assemble(&series, &reconciliation)?;

    if options.interpolate {
        let filled = interpolate_gaps(&mut table, options.mark_interpolated);
        info!("Interpolated {} null value cells", filled);
    }

    let mut meta: Vec<SeriesMeta> = series.into_iter().map(|s| s.meta).collect();
    meta.sort_by(|a, b| a.key.cmp(&b.key));

    info!(
        "Extracted {} series into {} rows x {} columns",
        meta.len(),
        table.len(),
        table.width()
    );

    Ok(Extraction {
        table,
        warnings: reconciliation.warnings,
        series: meta,
    })
}
