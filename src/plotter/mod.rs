//! Render plans and the dispatcher that draws them.

/// `Plotter`, the per-figure dispatch loop.
pub mod dispatch;
/// JSON plan files.
pub mod file;
/// Target to configuration mapping.
pub mod plan;
