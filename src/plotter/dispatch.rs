use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::config::plot_config::{PlotConfig, PlotReference};
use crate::config::store::{ConfigSource, ConfigStore};
use crate::data::dataset::{DataHandle, Dataset};
use crate::figure::backend::{Figure, FigureProps};
use crate::figure::target::TargetId;
use crate::foundation::error::{PlotError, PlotResult};
use crate::foundation::kwargs::Kwargs;
use crate::plotter::plan::{PlotEntry, RenderPlan};
use crate::registry::catalog::{PlotRegistry, global};

/// Options controlling a [`Plotter`] render pass.
#[derive(Clone, Debug)]
pub struct PlotterOpts {
    /// Release figure resources after saving or showing. Disable to draw the same figure over
    /// several passes.
    pub close_after: bool,
}

impl Default for PlotterOpts {
    fn default() -> Self {
        Self { close_after: true }
    }
}

/// A layer that was drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawnLayer {
    /// Target drawn into.
    pub target: TargetId,
    /// Layer index within the target's entry.
    pub layer: usize,
    /// Name of the capability that drew it.
    pub plot: String,
}

/// A layer skipped because of a recoverable error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedLayer {
    /// Target of the layer.
    pub target: TargetId,
    /// Layer index within the target's entry.
    pub layer: usize,
    /// Rendered error message.
    pub reason: String,
}

/// Outcome of one render pass.
#[derive(Clone, Debug, Default)]
pub struct RenderReport {
    /// Drawn layers in drawing order.
    pub drawn: Vec<DrawnLayer>,
    /// Skipped layers in encounter order.
    pub skipped: Vec<SkippedLayer>,
    /// Wall time of the pass.
    pub elapsed: Duration,
    /// Save destination, when the figure was saved instead of shown.
    pub output: Option<PathBuf>,
}

/// Draws a [`RenderPlan`] into a figure.
///
/// Each call to [`Plotter::plot`] rebuilds the external configuration store, resolves every
/// layer, and invokes the resolved capability. Malformed layers (unresolvable configuration,
/// unknown plot, unmet data requirement, unknown target) are reported and skipped; errors raised
/// while drawing abort the pass.
pub struct Plotter<'r, F: Figure> {
    figure: F,
    plan: RenderPlan,
    data: Option<DataHandle>,
    config: ConfigSource,
    props: FigureProps,
    registry: &'r PlotRegistry,
    opts: PlotterOpts,
}

impl<F: Figure> Plotter<'static, F> {
    /// Create a plotter dispatching through the process-wide registry.
    pub fn new(figure: F, plan: RenderPlan) -> Self {
        Self::with_registry(figure, plan, global())
    }
}

impl<'r, F: Figure> Plotter<'r, F> {
    /// Create a plotter dispatching through `registry`.
    pub fn with_registry(figure: F, plan: RenderPlan, registry: &'r PlotRegistry) -> Self {
        Self {
            figure,
            plan,
            data: None,
            config: ConfigSource::None,
            props: FigureProps::default(),
            registry,
            opts: PlotterOpts::default(),
        }
    }

    /// Default dataset for layers that get no data elsewhere.
    pub fn data(self, data: impl Dataset + 'static) -> Self {
        self.data_handle(Arc::new(data))
    }

    /// Default dataset from a shared handle.
    pub fn data_handle(mut self, data: DataHandle) -> Self {
        self.data = Some(data);
        self
    }

    /// External configuration source(s).
    pub fn config(mut self, config: impl Into<ConfigSource>) -> Self {
        self.config = config.into();
        self
    }

    /// Figure-level properties.
    pub fn props(mut self, props: FigureProps) -> Self {
        self.props = props;
        self
    }

    /// Font settings applied to the figure.
    pub fn font(mut self, font: Kwargs) -> Self {
        self.props.font = Some(font);
        self
    }

    /// Font size applied to the figure.
    pub fn font_size(mut self, size: f64) -> Self {
        self.props.font_size = Some(size);
        self
    }

    /// Render options.
    pub fn opts(mut self, opts: PlotterOpts) -> Self {
        self.opts = opts;
        self
    }

    /// Replace the default dataset.
    pub fn set_data(&mut self, data: Option<DataHandle>) {
        self.data = data;
    }

    /// Entry for `target`.
    pub fn get(&self, target: impl Into<TargetId>) -> Option<&PlotEntry> {
        self.plan.get(target.into())
    }

    /// Set the entry for `target`, returning the previous one.
    pub fn set(
        &mut self,
        target: impl Into<TargetId>,
        entry: impl Into<PlotEntry>,
    ) -> Option<PlotEntry> {
        self.plan.insert(target, entry)
    }

    /// Borrow the render plan.
    pub fn plan(&self) -> &RenderPlan {
        &self.plan
    }

    /// Mutably borrow the render plan.
    pub fn plan_mut(&mut self) -> &mut RenderPlan {
        &mut self.plan
    }

    /// Borrow the figure.
    pub fn figure(&self) -> &F {
        &self.figure
    }

    /// Mutably borrow the figure.
    pub fn figure_mut(&mut self) -> &mut F {
        &mut self.figure
    }

    /// Take the figure back.
    pub fn into_figure(self) -> F {
        self.figure
    }

    /// Draw every target, then save the figure to `save` or show it when `save` is `None`.
    #[tracing::instrument(skip(self))]
    pub fn plot(&mut self, save: Option<&Path>) -> PlotResult<RenderReport> {
        let t_start = Instant::now();

        if !self.props.is_empty() {
            self.figure.set_properties(&self.props)?;
        }

        let store = ConfigStore::build(&self.config)?;
        let mut report = RenderReport::default();

        for (target, entry) in self.plan.iter() {
            for (layer, cfg) in entry.layers().iter().enumerate() {
                match draw_layer(
                    &mut self.figure,
                    self.registry,
                    target,
                    cfg,
                    &store,
                    self.data.as_ref(),
                ) {
                    Ok(plot) => report.drawn.push(DrawnLayer {
                        target,
                        layer,
                        plot,
                    }),
                    Err(e) if e.is_recoverable() => {
                        tracing::warn!(%target, layer, error = %e, "skipping plot layer");
                        report.skipped.push(SkippedLayer {
                            target,
                            layer,
                            reason: e.to_string(),
                        });
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        match save {
            Some(dest) => {
                self.figure.save(dest)?;
                tracing::info!(
                    elapsed_sec = t_start.elapsed().as_secs_f64(),
                    output = %dest.display(),
                    "plot complete"
                );
                report.output = Some(dest.to_path_buf());
            }
            None => self.figure.show()?,
        }

        if self.opts.close_after {
            self.figure.close();
        }

        report.elapsed = t_start.elapsed();
        Ok(report)
    }
}

fn draw_layer<F: Figure>(
    figure: &mut F,
    registry: &PlotRegistry,
    target: TargetId,
    cfg: &PlotConfig,
    store: &ConfigStore,
    fallback: Option<&DataHandle>,
) -> PlotResult<String> {
    let resolved = cfg.resolve(store, fallback)?;

    let axes = figure
        .target_mut(target)
        .ok_or_else(|| PlotError::target_not_found(target.to_string()))?;

    let capability = match &resolved.plot {
        PlotReference::ByName(name) => registry
            .lookup(name)
            .ok_or_else(|| PlotError::plot_not_found(name.as_str()))?,
        PlotReference::Direct(cap) => Arc::clone(cap),
    };

    tracing::info!(plot = capability.name(), %target, "plotting");

    let empty = Value::Null;
    let data: &dyn Dataset = match resolved.data.as_deref() {
        Some(d) => d,
        None => &empty,
    };
    capability.invoke(axes, data, &resolved.kwargs)?;
    Ok(capability.name().to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/plotter/dispatch.rs"]
mod tests;
