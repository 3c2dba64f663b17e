/// hydroframe: NWIS time-series JSON to aligned wide tables.
///
/// # Module structure
///
/// ```text
/// hydroframe
/// ├── model       - shared data types (Series, SeriesKey, GapClass, NwisError, …)
/// ├── config      - extraction options loader (hydroframe.toml)
/// ├── ingest
/// │   ├── usgs    - NWIS IV/DV JSON decoding into typed series
/// │   └── fixtures (test only) - representative API response payloads
/// ├── columns     - column key building, ordering and value/qualifier classification
/// ├── frequency   - native interval detection and shared axis construction
/// ├── table       - wide table type and assembly with gap tagging
/// ├── analysis
/// │   └── gap_fill - time-weighted linear interpolation of null cells
/// └── extract     - decode → reconcile → assemble → (fill) pipeline
/// ```

/// Public modules
pub mod analysis;
pub mod columns;
pub mod config;
pub mod extract;
pub mod frequency;
pub mod ingest;
pub mod model;
pub mod table;

pub use config::ExtractOptions;
pub use extract::{Extraction, extract_nwis_table};
pub use model::NwisError;
pub use table::Table;
