/// Decoders for upstream response formats.
///
/// - `usgs` - NWIS IV/DV WaterML-as-JSON into typed `Series`.
/// - `fixtures` (test only) - representative response payloads.

pub mod usgs;

#[cfg(test)]
pub(crate) mod fixtures;
