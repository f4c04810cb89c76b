//! Plot registry and capability wrapper.
//!
//! Plot definitions register themselves through an explicit call during startup, either into the
//! process-wide registry ([`catalog::global`]) or into a caller-owned [`catalog::PlotRegistry`].

/// Capability wrapper with the pre-flight data-requirement check.
pub mod capability;
/// Registry storage and the process-wide instance.
pub mod catalog;
