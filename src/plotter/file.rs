use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::plot_config::PlotConfig;
use crate::figure::backend::FigureProps;
use crate::figure::recording::RecordingFigure;
use crate::figure::target::TargetId;
use crate::foundation::error::{PlotError, PlotResult};
use crate::foundation::kwargs::Kwargs;
use crate::plotter::plan::{PlotEntry, RenderPlan};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanDef {
    rows: usize,
    cols: usize,
    #[serde(default)]
    props: FigureProps,
    #[serde(default)]
    targets: BTreeMap<String, EntryDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum EntryDef {
    Layers(Vec<PlotConfigDef>),
    Single(PlotConfigDef),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlotConfigDef {
    #[serde(default)]
    plot: Option<String>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    config: Option<ConfigRefDef>,
    #[serde(default)]
    args: Kwargs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ConfigRefDef {
    Key(String),
    Inline(Map<String, Value>),
}

impl PlotConfigDef {
    fn to_config(&self) -> PlotConfig {
        let mut cfg = PlotConfig::new().args(self.args.clone());
        if let Some(plot) = &self.plot {
            cfg = cfg.plot(plot.as_str());
        }
        if let Some(data) = self.data.clone().filter(|v| !v.is_null()) {
            cfg = cfg.data(data);
        }
        match &self.config {
            Some(ConfigRefDef::Key(key)) => cfg.config(key.as_str()),
            Some(ConfigRefDef::Inline(map)) => cfg.config(map.clone()),
            None => cfg,
        }
    }
}

/// JSON description of a figure grid and the plots drawn on it.
///
/// ```json
/// {
///   "rows": 1, "cols": 2,
///   "props": { "font_size": 10 },
///   "targets": {
///     "0,0": { "plot": "xy.line", "args": { "label": "fit" } },
///     "0,1": [ { "config": "hits" }, { "plot": "hits.2d", "data": { "hits": { "x": [], "y": [] } } } ]
///   }
/// }
/// ```
///
/// Plot names are looked up when the plan is drawn, not when it is loaded, so a plan may name
/// plots that are registered later.
#[derive(Debug, Clone)]
pub struct PlanFile {
    def: PlanDef,
}

impl PlanFile {
    /// Parse a plan from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PlotResult<Self> {
        let def: PlanDef = serde_json::from_reader(r)
            .map_err(|e| PlotError::configuration(format!("parse plan JSON: {e}")))?;
        let plan = Self { def };
        plan.validate()?;
        Ok(plan)
    }

    /// Parse a plan from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PlotResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PlotError::configuration(format!("open plan JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    fn validate(&self) -> PlotResult<()> {
        if self.def.rows == 0 || self.def.cols == 0 {
            return Err(PlotError::configuration(format!(
                "plan grid must be at least 1x1, got {}x{}",
                self.def.rows, self.def.cols
            )));
        }
        for key in self.def.targets.keys() {
            key.parse::<TargetId>()?;
        }
        Ok(())
    }

    /// Grid rows.
    pub fn rows(&self) -> usize {
        self.def.rows
    }

    /// Grid columns.
    pub fn cols(&self) -> usize {
        self.def.cols
    }

    /// Figure-level properties declared by the plan.
    pub fn props(&self) -> &FigureProps {
        &self.def.props
    }

    /// A recording figure sized to the plan's grid.
    pub fn figure(&self) -> RecordingFigure {
        RecordingFigure::subplots(self.def.rows, self.def.cols)
    }

    /// Build the render plan. Inline data becomes each layer's explicit dataset.
    pub fn render_plan(&self) -> PlotResult<RenderPlan> {
        let mut plan = RenderPlan::new();
        for (key, entry) in &self.def.targets {
            let target: TargetId = key.parse()?;
            let entry = match entry {
                EntryDef::Single(def) => PlotEntry::Single(def.to_config()),
                EntryDef::Layers(defs) => {
                    PlotEntry::Layers(defs.iter().map(PlotConfigDef::to_config).collect())
                }
            };
            plan.insert(target, entry);
        }
        Ok(plan)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plotter/file.rs"]
mod tests;
