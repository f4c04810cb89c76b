use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::figure::backend::{Axes, Axis, Figure, FigureProps, Scale};
use crate::figure::target::TargetId;
use crate::foundation::error::{PlotError, PlotResult};
use crate::foundation::kwargs::{Kwargs, merge_kwargs};

/// Missing points are kept as NaN in memory and written as JSON `null`; these read them back.
mod nullable {
    use serde::{Deserialize, Deserializer};

    pub(super) fn values<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<f64>, D::Error> {
        let raw: Vec<Option<f64>> = Vec::deserialize(d)?;
        Ok(raw.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }

    pub(super) fn value<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::NAN))
    }
}

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// [`Axes::line`].
    Line {
        /// X coordinates.
        #[serde(deserialize_with = "nullable::values")]
        x: Vec<f64>,
        /// Y coordinates.
        #[serde(deserialize_with = "nullable::values")]
        y: Vec<f64>,
        /// Style arguments.
        style: Kwargs,
    },
    /// [`Axes::scatter`].
    Scatter {
        /// X coordinates.
        #[serde(deserialize_with = "nullable::values")]
        x: Vec<f64>,
        /// Y coordinates.
        #[serde(deserialize_with = "nullable::values")]
        y: Vec<f64>,
        /// Style arguments.
        style: Kwargs,
    },
    /// [`Axes::hist`].
    Hist {
        /// Sample values.
        #[serde(deserialize_with = "nullable::values")]
        values: Vec<f64>,
        /// Bin count.
        bins: usize,
        /// Style arguments.
        style: Kwargs,
    },
    /// [`Axes::text`].
    Text {
        /// X position.
        #[serde(deserialize_with = "nullable::value")]
        x: f64,
        /// Y position.
        #[serde(deserialize_with = "nullable::value")]
        y: f64,
        /// Annotation text.
        text: String,
    },
    /// [`Axes::set_title`].
    Title {
        /// Title text.
        title: String,
    },
    /// [`Axes::set_label`].
    Label {
        /// Labelled axis.
        axis: Axis,
        /// Label text.
        label: String,
    },
    /// [`Axes::set_scale`].
    Scale {
        /// Scaled axis.
        axis: Axis,
        /// New scale.
        scale: Scale,
    },
    /// [`Axes::legend`].
    Legend,
}

/// Axes that record every drawing call in order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecordedAxes {
    /// Address of these axes in the figure.
    pub target: TargetId,
    /// Drawing calls in the order they were made.
    pub commands: Vec<DrawCommand>,
}

impl Axes for RecordedAxes {
    fn line(&mut self, x: &[f64], y: &[f64], style: &Kwargs) {
        self.commands.push(DrawCommand::Line {
            x: x.to_vec(),
            y: y.to_vec(),
            style: style.clone(),
        });
    }

    fn scatter(&mut self, x: &[f64], y: &[f64], style: &Kwargs) {
        self.commands.push(DrawCommand::Scatter {
            x: x.to_vec(),
            y: y.to_vec(),
            style: style.clone(),
        });
    }

    fn hist(&mut self, values: &[f64], bins: usize, style: &Kwargs) {
        self.commands.push(DrawCommand::Hist {
            values: values.to_vec(),
            bins,
            style: style.clone(),
        });
    }

    fn text(&mut self, x: f64, y: f64, text: &str) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
        });
    }

    fn set_title(&mut self, title: &str) {
        self.commands.push(DrawCommand::Title {
            title: title.to_string(),
        });
    }

    fn set_label(&mut self, axis: Axis, label: &str) {
        self.commands.push(DrawCommand::Label {
            axis,
            label: label.to_string(),
        });
    }

    fn set_scale(&mut self, axis: Axis, scale: Scale) {
        self.commands.push(DrawCommand::Scale { axis, scale });
    }

    fn legend(&mut self) {
        self.commands.push(DrawCommand::Legend);
    }
}

/// Serialized form written by [`RecordingFigure::save`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FigureRecord {
    /// Grid rows.
    pub rows: usize,
    /// Grid columns.
    pub cols: usize,
    /// Figure-level properties in effect.
    #[serde(default)]
    pub props: FigureProps,
    /// Axes in row-major order.
    pub axes: Vec<RecordedAxes>,
}

impl FigureRecord {
    /// Read a record previously written by [`RecordingFigure::save`].
    pub fn from_path(path: impl AsRef<Path>) -> PlotResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PlotError::figure(format!("open figure record '{}': {e}", path.display()))
        })?;
        serde_json::from_reader(std::io::BufReader::new(f)).map_err(|e| {
            PlotError::figure(format!("parse figure record '{}': {e}", path.display()))
        })
    }
}

/// In-memory figure with a `rows x cols` grid of recording axes.
///
/// Stands in for a charting library: it keeps every drawing call and saves them as JSON.
#[derive(Debug)]
pub struct RecordingFigure {
    rows: usize,
    cols: usize,
    axes: Vec<RecordedAxes>,
    props: FigureProps,
    saved: Vec<PathBuf>,
    shown: usize,
    closed: usize,
}

impl RecordingFigure {
    /// Create a figure with a `rows x cols` grid of empty axes.
    pub fn subplots(rows: usize, cols: usize) -> Self {
        let axes = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| TargetId::new(row, col)))
            .map(|target| RecordedAxes {
                target,
                commands: Vec::new(),
            })
            .collect();
        Self {
            rows,
            cols,
            axes,
            props: FigureProps::default(),
            saved: Vec::new(),
            shown: 0,
            closed: 0,
        }
    }

    /// Borrow recorded axes by address.
    pub fn axes(&self, id: TargetId) -> Option<&RecordedAxes> {
        self.axes.iter().find(|a| a.target == id)
    }

    /// Properties applied through [`Figure::set_properties`].
    pub fn props(&self) -> &FigureProps {
        &self.props
    }

    /// Destinations passed to [`Figure::save`], in call order.
    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }

    /// Number of [`Figure::show`] calls.
    pub fn shown(&self) -> usize {
        self.shown
    }

    /// Number of [`Figure::close`] calls.
    pub fn closed(&self) -> usize {
        self.closed
    }

    /// Snapshot of the current figure state.
    pub fn record(&self) -> FigureRecord {
        FigureRecord {
            rows: self.rows,
            cols: self.cols,
            props: self.props.clone(),
            axes: self.axes.clone(),
        }
    }
}

impl Figure for RecordingFigure {
    fn targets(&self) -> Vec<TargetId> {
        self.axes.iter().map(|a| a.target).collect()
    }

    fn target_mut(&mut self, id: TargetId) -> Option<&mut dyn Axes> {
        self.axes
            .iter_mut()
            .find(|a| a.target == id)
            .map(|a| a as &mut dyn Axes)
    }

    fn set_properties(&mut self, props: &FigureProps) -> PlotResult<()> {
        if let Some(size) = props.font_size {
            if !size.is_finite() || size <= 0.0 {
                return Err(PlotError::figure("font_size must be finite and > 0"));
            }
        }
        if let Some(font) = &props.font {
            let base = self.props.font.take().unwrap_or_default();
            self.props.font = Some(merge_kwargs(&base, font));
        }
        if props.font_size.is_some() {
            self.props.font_size = props.font_size;
        }
        Ok(())
    }

    fn save(&mut self, dest: &Path) -> PlotResult<()> {
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlotError::figure(format!("create output dir '{}': {e}", parent.display()))
            })?;
        }
        let f = File::create(dest)
            .map_err(|e| PlotError::figure(format!("create '{}': {e}", dest.display())))?;
        let mut w = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut w, &self.record())
            .map_err(|e| PlotError::figure(format!("write '{}': {e}", dest.display())))?;
        w.flush()
            .map_err(|e| PlotError::figure(format!("flush '{}': {e}", dest.display())))?;
        self.saved.push(dest.to_path_buf());
        Ok(())
    }

    fn show(&mut self) -> PlotResult<()> {
        let commands: usize = self.axes.iter().map(|a| a.commands.len()).sum();
        tracing::info!(
            rows = self.rows,
            cols = self.cols,
            commands,
            "figure shown"
        );
        self.shown += 1;
        Ok(())
    }

    fn close(&mut self) {
        for a in &mut self.axes {
            a.commands.clear();
        }
        self.props = FigureProps::default();
        self.closed += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/figure/recording.rs"]
mod tests;
