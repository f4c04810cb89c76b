//! trackplot resolves declarative plot configurations and dispatches them onto a figure.
//!
//! Plots are registered by name with the data keys they need. A [`RenderPlan`] maps figure
//! targets to one or more [`PlotConfig`]s; each configuration may name its plot directly or defer
//! to an external configuration store built from inline maps and JSON/YAML files. A [`Plotter`]
//! resolves every layer, checks data requirements, draws, and finally saves or shows the figure.
//!
//! - Register plots with [`register`] or [`register_builtin_plots`]
//! - Describe the figure with a [`RenderPlan`] (or a [`PlanFile`])
//! - Draw it with [`Plotter::plot`], which returns a [`RenderReport`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Plot configurations and the external configuration store.
pub mod config;
/// Dataset interface and the columnar table.
pub mod data;
/// Figure and axes interfaces, and the recording figure.
pub mod figure;
/// Render plans, plan files, and the dispatcher.
pub mod plotter;
/// Built-in plot definitions.
pub mod plots;
/// Plot capabilities and the registry.
pub mod registry;

pub use crate::foundation::error::{PlotError, PlotResult};
pub use crate::foundation::kwargs::{Kwargs, merge_kwargs};

pub use crate::config::plot_config::{ConfigRef, PlotConfig, PlotReference, ResolvedInvocation};
pub use crate::config::store::{ConfigSource, ConfigStore};
pub use crate::data::dataset::{DataHandle, Dataset};
pub use crate::data::table::Table;
pub use crate::figure::backend::{Axes, Axis, Figure, FigureProps, Scale};
pub use crate::figure::recording::{DrawCommand, FigureRecord, RecordedAxes, RecordingFigure};
pub use crate::figure::target::TargetId;
pub use crate::plots::{BUILTIN_PLOTS, BuiltinPlot, register_builtin_plots};
pub use crate::plotter::dispatch::{DrawnLayer, Plotter, PlotterOpts, RenderReport, SkippedLayer};
pub use crate::plotter::file::PlanFile;
pub use crate::plotter::plan::{PlotEntry, RenderPlan};
pub use crate::registry::capability::{CapabilityHandle, DrawFn, PlotCapability};
pub use crate::registry::catalog::{PlotRegistry, global, register};
