use std::path::Path;

use crate::figure::target::TargetId;
use crate::foundation::error::PlotResult;
use crate::foundation::kwargs::Kwargs;

/// Axis selector for labels and scales.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

/// Axis scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    /// Linear scale.
    #[default]
    Linear,
    /// Base-10 logarithmic scale.
    Log,
}

/// One drawing region of a figure, as seen by draw operations.
///
/// Styling arguments are passed through untouched; interpreting them is up to the charting
/// implementation behind this trait.
pub trait Axes {
    /// Draw a polyline through `(x[i], y[i])`.
    fn line(&mut self, x: &[f64], y: &[f64], style: &Kwargs);
    /// Draw markers at `(x[i], y[i])`.
    fn scatter(&mut self, x: &[f64], y: &[f64], style: &Kwargs);
    /// Draw a histogram of `values` with `bins` bins.
    fn hist(&mut self, values: &[f64], bins: usize, style: &Kwargs);
    /// Place a text annotation in data coordinates.
    fn text(&mut self, x: f64, y: f64, text: &str);
    /// Set the axes title.
    fn set_title(&mut self, title: &str);
    /// Set an axis label.
    fn set_label(&mut self, axis: Axis, label: &str);
    /// Set an axis scale.
    fn set_scale(&mut self, axis: Axis, scale: Scale);
    /// Show a legend for labelled artists.
    fn legend(&mut self);
}

/// Figure-level settings applied before any target is drawn.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FigureProps {
    /// Font settings (family, weight, ...), passed through to the figure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Kwargs>,
    /// Font size. Overrides any size given in `font`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

impl FigureProps {
    /// Whether no property is set.
    pub fn is_empty(&self) -> bool {
        self.font.is_none() && self.font_size.is_none()
    }
}

/// A figure owning addressable drawing regions.
pub trait Figure {
    /// Addresses of all drawing regions, in a stable order.
    fn targets(&self) -> Vec<TargetId>;

    /// Borrow one drawing region for drawing.
    fn target_mut(&mut self, id: TargetId) -> Option<&mut dyn Axes>;

    /// Apply figure-level settings.
    fn set_properties(&mut self, props: &FigureProps) -> PlotResult<()>;

    /// Persist the figure to `dest`.
    fn save(&mut self, dest: &Path) -> PlotResult<()>;

    /// Display the figure.
    fn show(&mut self) -> PlotResult<()>;

    /// Release resources held by the figure. Drawing after `close` starts from a blank figure.
    fn close(&mut self);
}
