//! Plot configurations and the external configuration store they resolve against.

/// `PlotConfig` and its resolution rules.
pub mod plot_config;
/// External configuration sources and the merged store.
pub mod store;
