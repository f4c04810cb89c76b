use std::collections::BTreeMap;

use crate::config::plot_config::PlotConfig;
use crate::figure::target::TargetId;

/// Configuration(s) for one render target.
#[derive(Clone, Debug)]
pub enum PlotEntry {
    /// One plot on the target.
    Single(PlotConfig),
    /// Several plots drawn on the same target in list order, later ones on top.
    Layers(Vec<PlotConfig>),
}

impl PlotEntry {
    /// The configurations as layers, in drawing order.
    pub fn layers(&self) -> &[PlotConfig] {
        match self {
            Self::Single(cfg) => std::slice::from_ref(cfg),
            Self::Layers(cfgs) => cfgs,
        }
    }
}

impl From<PlotConfig> for PlotEntry {
    fn from(v: PlotConfig) -> Self {
        Self::Single(v)
    }
}

impl From<Vec<PlotConfig>> for PlotEntry {
    fn from(v: Vec<PlotConfig>) -> Self {
        Self::Layers(v)
    }
}

/// Mapping from render target to the plot(s) drawn on it, iterated in target order.
#[derive(Clone, Debug, Default)]
pub struct RenderPlan {
    entries: BTreeMap<TargetId, PlotEntry>,
}

impl RenderPlan {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`RenderPlan::insert`].
    pub fn with(mut self, target: impl Into<TargetId>, entry: impl Into<PlotEntry>) -> Self {
        self.insert(target, entry);
        self
    }

    /// Set the entry for `target`, returning the previous one.
    pub fn insert(
        &mut self,
        target: impl Into<TargetId>,
        entry: impl Into<PlotEntry>,
    ) -> Option<PlotEntry> {
        self.entries.insert(target.into(), entry.into())
    }

    /// Entry for `target`.
    pub fn get(&self, target: TargetId) -> Option<&PlotEntry> {
        self.entries.get(&target)
    }

    /// Mutable entry for `target`.
    pub fn get_mut(&mut self, target: TargetId) -> Option<&mut PlotEntry> {
        self.entries.get_mut(&target)
    }

    /// Remove the entry for `target`.
    pub fn remove(&mut self, target: TargetId) -> Option<PlotEntry> {
        self.entries.remove(&target)
    }

    /// Entries in target order.
    pub fn iter(&self) -> impl Iterator<Item = (TargetId, &PlotEntry)> {
        self.entries.iter().map(|(t, e)| (*t, e))
    }

    /// Number of targets with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no target has an entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plotter/plan.rs"]
mod tests;
