//! Dataset interface consumed by requirement checks and draw operations.

/// The `Dataset` trait and its implementations for JSON values and maps.
pub mod dataset;
/// Columnar numeric table.
pub mod table;
