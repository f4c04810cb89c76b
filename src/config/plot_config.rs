use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::store::ConfigStore;
use crate::data::dataset::{DataHandle, Dataset};
use crate::foundation::error::{PlotError, PlotResult};
use crate::foundation::kwargs::{Kwargs, merge_kwargs};
use crate::registry::capability::{CapabilityHandle, PlotCapability};

/// Which plot a configuration draws.
#[derive(Clone)]
pub enum PlotReference {
    /// Identifier looked up in the registry at dispatch time.
    ByName(String),
    /// Capability invoked directly, bypassing the registry.
    Direct(CapabilityHandle),
}

impl PlotReference {
    /// Plot name for logging: the identifier, or the direct capability's name.
    pub fn name(&self) -> &str {
        match self {
            Self::ByName(name) => name,
            Self::Direct(cap) => cap.name(),
        }
    }
}

impl PartialEq for PlotReference {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ByName(a), Self::ByName(b)) => a == b,
            (Self::Direct(a), Self::Direct(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for PlotReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByName(name) => f.debug_tuple("ByName").field(name).finish(),
            Self::Direct(cap) => f.debug_tuple("Direct").field(&cap.name()).finish(),
        }
    }
}

impl From<&str> for PlotReference {
    fn from(v: &str) -> Self {
        Self::ByName(v.to_string())
    }
}

impl From<String> for PlotReference {
    fn from(v: String) -> Self {
        Self::ByName(v)
    }
}

impl From<CapabilityHandle> for PlotReference {
    fn from(v: CapabilityHandle) -> Self {
        Self::Direct(v)
    }
}

impl From<PlotCapability> for PlotReference {
    fn from(v: PlotCapability) -> Self {
        Self::Direct(Arc::new(v))
    }
}

/// Reference to external configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigRef {
    /// Key into the [`ConfigStore`].
    Key(String),
    /// Inline configuration fragment.
    Inline(Map<String, Value>),
}

impl From<&str> for ConfigRef {
    fn from(v: &str) -> Self {
        Self::Key(v.to_string())
    }
}

impl From<String> for ConfigRef {
    fn from(v: String) -> Self {
        Self::Key(v)
    }
}

impl From<Map<String, Value>> for ConfigRef {
    fn from(v: Map<String, Value>) -> Self {
        Self::Inline(v)
    }
}

/// A concrete invocation produced by [`PlotConfig::resolve`].
#[derive(Clone, Debug)]
pub struct ResolvedInvocation {
    /// Plot to draw.
    pub plot: PlotReference,
    /// Dataset, if any source supplied one.
    pub data: Option<DataHandle>,
    /// Keyword arguments for the draw operation.
    pub kwargs: Kwargs,
}

/// Declarative description of one plot layer.
///
/// A configuration combines an explicit plot reference, an explicit dataset, a reference to
/// external configuration, and keyword arguments. None of the fields is required up front;
/// [`PlotConfig::resolve`] decides the final values each time a figure is drawn, so one
/// configuration can be reused across render passes.
#[derive(Clone, Debug, Default)]
pub struct PlotConfig {
    plot: Option<PlotReference>,
    data: Option<DataHandle>,
    config: Option<ConfigRef>,
    kwargs: Kwargs,
}

impl PlotConfig {
    /// An empty configuration. It only resolves once a plot is supplied somewhere.
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration drawing `plot`.
    pub fn named(plot: impl Into<PlotReference>) -> Self {
        Self::new().plot(plot)
    }

    /// A configuration driven by external configuration.
    pub fn from_config(config: impl Into<ConfigRef>) -> Self {
        Self::new().config(config)
    }

    /// Set the plot reference.
    pub fn plot(mut self, plot: impl Into<PlotReference>) -> Self {
        self.plot = Some(plot.into());
        self
    }

    /// Set the dataset.
    pub fn data(self, data: impl Dataset + 'static) -> Self {
        self.data_handle(Arc::new(data))
    }

    /// Set the dataset from a shared handle.
    pub fn data_handle(mut self, data: DataHandle) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the external configuration reference.
    pub fn config(mut self, config: impl Into<ConfigRef>) -> Self {
        self.config = Some(config.into());
        self
    }

    /// Set one keyword argument.
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }

    /// Replace all keyword arguments.
    pub fn args(mut self, kwargs: Kwargs) -> Self {
        self.kwargs = kwargs;
        self
    }

    /// Explicit plot reference, if set.
    pub fn plot_reference(&self) -> Option<&PlotReference> {
        self.plot.as_ref()
    }

    /// Explicit dataset, if set.
    pub fn dataset(&self) -> Option<&DataHandle> {
        self.data.as_ref()
    }

    /// External configuration reference, if set.
    pub fn config_ref(&self) -> Option<&ConfigRef> {
        self.config.as_ref()
    }

    /// Explicit keyword arguments.
    pub fn kwargs(&self) -> &Kwargs {
        &self.kwargs
    }

    /// Resolve against the external store and the fallback dataset.
    ///
    /// Precedence for `plot` and `data`: explicit value, then configuration fragment, then (for
    /// data) `fallback`. For arguments the fragment's `args` are merged over the explicit
    /// keyword arguments, so configuration values win there. A key that is missing from the
    /// store is ignored; only a missing plot is an error.
    pub fn resolve(
        &self,
        store: &ConfigStore,
        fallback: Option<&DataHandle>,
    ) -> PlotResult<ResolvedInvocation> {
        let mut plot = self.plot.clone();
        let mut data = self.data.clone();
        let mut kwargs = self.kwargs.clone();

        if let Some(fragment) = self.fragment(store) {
            if plot.is_none() {
                plot = match fragment.get("plot") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(s)) => Some(PlotReference::ByName(s.clone())),
                    Some(other) => {
                        return Err(PlotError::configuration(format!(
                            "config 'plot' must be a string, got {other}"
                        )));
                    }
                };
            }
            if data.is_none() {
                data = fragment
                    .get("data")
                    .filter(|v| !v.is_null())
                    .map(|v| Arc::new(v.clone()) as DataHandle);
            }
            if let Some(Value::Object(args)) = fragment.get("args") {
                kwargs = merge_kwargs(&kwargs, args);
            }
        }

        if data.is_none() {
            data = fallback.cloned();
        }

        let plot =
            plot.ok_or_else(|| PlotError::configuration("unresolved plot configuration"))?;
        Ok(ResolvedInvocation { plot, data, kwargs })
    }

    fn fragment<'a>(&'a self, store: &'a ConfigStore) -> Option<&'a Map<String, Value>> {
        match self.config.as_ref()? {
            ConfigRef::Inline(map) => Some(map),
            ConfigRef::Key(key) => match store.get(key) {
                Some(Value::Object(map)) => Some(map),
                Some(_) => {
                    tracing::debug!(config = %key, "config entry is not a mapping, ignored");
                    None
                }
                None => {
                    tracing::debug!(config = %key, "config key not in store, ignored");
                    None
                }
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/plot_config.rs"]
mod tests;
