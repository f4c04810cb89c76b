use std::collections::{BTreeMap, BTreeSet};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::data::dataset::Dataset;
use crate::figure::backend::Axes;
use crate::foundation::kwargs::Kwargs;
use crate::registry::capability::{CapabilityHandle, PlotCapability};

/// Mapping from plot identifier to capability.
///
/// Registration overwrites any earlier capability with the same name; re-registering a plot
/// definition silently redefines it. There is no removal.
#[derive(Debug, Default)]
pub struct PlotRegistry {
    plots: RwLock<BTreeMap<String, CapabilityHandle>>,
}

impl PlotRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `capability` under its name, replacing any previous registration.
    pub fn register(&self, capability: PlotCapability) -> CapabilityHandle {
        let handle = CapabilityHandle::new(capability);
        let name = handle.name().to_string();
        let mut plots = self.plots.write().unwrap_or_else(PoisonError::into_inner);
        if plots.insert(name.clone(), handle.clone()).is_some() {
            tracing::debug!(plot = %name, "plot definition replaced");
        }
        handle
    }

    /// Wrap `draw` in a capability and register it.
    pub fn register_plot<F>(
        &self,
        name: impl Into<String>,
        data_requirements: Option<Vec<String>>,
        draw: F,
    ) -> CapabilityHandle
    where
        F: Fn(&mut dyn Axes, &dyn Dataset, &Kwargs) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(PlotCapability::new(name, data_requirements, draw))
    }

    /// Look up a capability by name.
    pub fn lookup(&self, name: &str) -> Option<CapabilityHandle> {
        let plots = self.plots.read().unwrap_or_else(PoisonError::into_inner);
        plots.get(name).cloned()
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        let plots = self.plots.read().unwrap_or_else(PoisonError::into_inner);
        plots.contains_key(name)
    }

    /// Names of all registered plots.
    pub fn names(&self) -> BTreeSet<String> {
        let plots = self.plots.read().unwrap_or_else(PoisonError::into_inner);
        plots.keys().cloned().collect()
    }

    /// Number of registered plots.
    pub fn len(&self) -> usize {
        let plots = self.plots.read().unwrap_or_else(PoisonError::into_inner);
        plots.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

static GLOBAL: OnceLock<PlotRegistry> = OnceLock::new();

/// The process-wide registry. Starts empty; populate it during startup.
pub fn global() -> &'static PlotRegistry {
    GLOBAL.get_or_init(PlotRegistry::new)
}

/// Register a plot in the process-wide registry.
pub fn register<F>(
    name: impl Into<String>,
    data_requirements: Option<Vec<String>>,
    draw: F,
) -> CapabilityHandle
where
    F: Fn(&mut dyn Axes, &dyn Dataset, &Kwargs) -> anyhow::Result<()> + Send + Sync + 'static,
{
    global().register_plot(name, data_requirements, draw)
}

#[cfg(test)]
#[path = "../../tests/unit/registry/catalog.rs"]
mod tests;
