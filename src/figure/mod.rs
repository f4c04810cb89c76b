//! Figure and render-target interfaces consumed by the dispatcher and by draw operations.
//!
//! Real charting libraries sit behind [`backend::Figure`] and [`backend::Axes`]. The crate ships a
//! [`recording::RecordingFigure`] that keeps drawing calls in memory and saves them as JSON.

/// `Figure`/`Axes` traits and figure-level properties.
pub mod backend;
/// In-memory recording figure.
pub mod recording;
/// Render-target addresses.
pub mod target;
