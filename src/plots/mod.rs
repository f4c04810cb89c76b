//! Built-in plot definitions.
//!
//! Plots are listed in [`BUILTIN_PLOTS`] and installed into a registry by
//! [`register_builtin_plots`]. Nothing is registered implicitly. The short names have
//! `exatrkx.`-prefixed aliases so configurations written for the ExaTrkX plot names keep working.

/// `hits.2d`.
pub mod hits;
/// `train_log`.
pub mod history;
/// `exatrkx.hit_pairs.2d`, `exatrkx.hit_pairs.hist`.
pub mod pairs;
/// `exatrkx.performance.score_distribution`.
pub mod performance;
/// `xy.line`, `xy.scatter`, `hist`.
pub mod xy;

mod values;

use crate::data::dataset::Dataset;
use crate::figure::backend::Axes;
use crate::foundation::kwargs::Kwargs;
use crate::registry::catalog::PlotRegistry;

/// Draw operation of a built-in plot.
pub type BuiltinDraw = fn(&mut dyn Axes, &dyn Dataset, &Kwargs) -> anyhow::Result<()>;

/// One entry of the built-in registration table.
#[derive(Clone, Copy)]
pub struct BuiltinPlot {
    /// Registry identifier.
    pub name: &'static str,
    /// Dataset keys the plot reads.
    pub requirements: &'static [&'static str],
    /// One-line description shown by `trackplot list`.
    pub summary: &'static str,
    /// Draw operation.
    pub draw: BuiltinDraw,
}

impl std::fmt::Debug for BuiltinPlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinPlot")
            .field("name", &self.name)
            .field("requirements", &self.requirements)
            .finish_non_exhaustive()
    }
}

/// Every built-in plot, in listing order.
pub static BUILTIN_PLOTS: &[BuiltinPlot] = &[
    BuiltinPlot {
        name: "xy.line",
        requirements: &["x", "y"],
        summary: "polyline through paired x/y columns",
        draw: xy::line,
    },
    BuiltinPlot {
        name: "xy.scatter",
        requirements: &["x", "y"],
        summary: "markers at paired x/y columns",
        draw: xy::scatter,
    },
    BuiltinPlot {
        name: "hist",
        requirements: &["values"],
        summary: "step histogram of a value column",
        draw: xy::hist,
    },
    BuiltinPlot {
        name: "train_log",
        requirements: &["history"],
        summary: "training history against epochs",
        draw: history::train_log,
    },
    BuiltinPlot {
        name: "hits.2d",
        requirements: &["hits"],
        summary: "transverse hit positions from x/y or r/phi columns",
        draw: hits::hits_2d,
    },
    BuiltinPlot {
        name: "exatrkx.train_log",
        requirements: &["history"],
        summary: "alias of train_log",
        draw: history::train_log,
    },
    BuiltinPlot {
        name: "exatrkx.hits.2d",
        requirements: &["hits"],
        summary: "alias of hits.2d",
        draw: hits::hits_2d,
    },
    BuiltinPlot {
        name: "exatrkx.hit_pairs.2d",
        requirements: &["hits", "pairs"],
        summary: "segments between paired hits",
        draw: pairs::hit_pairs_2d,
    },
    BuiltinPlot {
        name: "exatrkx.hit_pairs.hist",
        requirements: &["edges"],
        summary: "step histogram of one edge feature",
        draw: pairs::hit_pairs_hist,
    },
    BuiltinPlot {
        name: "exatrkx.performance.score_distribution",
        requirements: &["truth", "score"],
        summary: "score histograms of true and fake candidates",
        draw: performance::score_distribution,
    },
];

/// Register every entry of [`BUILTIN_PLOTS`] into `registry`, replacing same-named plots.
pub fn register_builtin_plots(registry: &PlotRegistry) {
    for plot in BUILTIN_PLOTS {
        let requirements = plot.requirements.iter().map(|k| k.to_string()).collect();
        registry.register_plot(plot.name, Some(requirements), plot.draw);
    }
    tracing::debug!(count = BUILTIN_PLOTS.len(), "built-in plots registered");
}

#[cfg(test)]
#[path = "../../tests/unit/plots/builtin.rs"]
mod tests;
