use std::fmt;
use std::sync::Arc;

use crate::data::dataset::Dataset;
use crate::figure::backend::Axes;
use crate::foundation::error::{PlotError, PlotResult};
use crate::foundation::kwargs::Kwargs;

/// Signature of a draw operation.
pub type DrawFn = dyn Fn(&mut dyn Axes, &dyn Dataset, &Kwargs) -> anyhow::Result<()> + Send + Sync;

/// A named drawing routine plus its data preconditions.
///
/// Invoking a capability first checks every declared data key against the dataset; the draw
/// operation only runs when all of them are present.
#[derive(Clone)]
pub struct PlotCapability {
    name: String,
    data_requirements: Option<Vec<String>>,
    draw: Arc<DrawFn>,
}

/// Shared handle to a capability.
pub type CapabilityHandle = Arc<PlotCapability>;

impl PlotCapability {
    /// Wrap a draw operation.
    ///
    /// `data_requirements` of `None` disables the requirement check entirely.
    pub fn new<F>(name: impl Into<String>, data_requirements: Option<Vec<String>>, draw: F) -> Self
    where
        F: Fn(&mut dyn Axes, &dyn Dataset, &Kwargs) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            data_requirements,
            draw: Arc::new(draw),
        }
    }

    /// Capability name, also its registry key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared data keys, if checking is enabled.
    pub fn data_requirements(&self) -> Option<&[String]> {
        self.data_requirements.as_deref()
    }

    /// Verify that every declared data key is present in `data`.
    pub fn check_requirements(&self, data: &dyn Dataset) -> PlotResult<()> {
        let Some(requirements) = &self.data_requirements else {
            return Ok(());
        };
        match requirements.iter().find(|key| !data.contains_key(key.as_str())) {
            Some(missing) => Err(PlotError::data_requirement(&self.name, missing.as_str())),
            None => Ok(()),
        }
    }

    /// Check requirements, then draw into `target`.
    ///
    /// A failing draw is returned as [`PlotError::Draw`] naming this plot, with the draw
    /// callable's own error kept as its `source`.
    pub fn invoke(&self, target: &mut dyn Axes, data: &dyn Dataset, kwargs: &Kwargs) -> PlotResult<()> {
        self.check_requirements(data)?;
        (self.draw)(target, data, kwargs).map_err(|e| PlotError::draw(&self.name, e))
    }
}

impl fmt::Debug for PlotCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotCapability")
            .field("name", &self.name)
            .field("data_requirements", &self.data_requirements)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/capability.rs"]
mod tests;
