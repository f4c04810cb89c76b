/// Convenience result type used across trackplot.
pub type PlotResult<T> = Result<T, PlotError>;

/// Top-level error taxonomy used by registry, resolution, and dispatch APIs.
///
/// Variants split into two groups. Recoverable errors describe one malformed layer and are skipped
/// by [`crate::Plotter::plot`]; every other variant aborts the render pass.
#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    /// A capability's declared data key is absent from the supplied dataset.
    #[error("data requirement for '{plot}' not satisfied: {key}")]
    DataRequirement {
        /// Capability name.
        plot: String,
        /// First missing key.
        key: String,
    },

    /// A plot configuration could not be turned into a usable invocation.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A plot identifier is not present in the registry.
    #[error("plot definition not found: {0}")]
    PlotNotFound(String),

    /// A render plan addresses a target the figure does not have.
    #[error("render target not found: {0}")]
    TargetNotFound(String),

    /// The draw operation of a capability failed.
    #[error("draw error in '{plot}': {source}")]
    Draw {
        /// Capability name.
        plot: String,
        /// Error raised by the draw operation.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// An external configuration source could not be loaded.
    #[error("config source error: {0}")]
    ConfigSource(String),

    /// The figure failed to apply properties, persist, or display.
    #[error("figure error: {0}")]
    Figure(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlotError {
    /// Build a [`PlotError::DataRequirement`] value.
    pub fn data_requirement(plot: impl Into<String>, key: impl Into<String>) -> Self {
        Self::DataRequirement {
            plot: plot.into(),
            key: key.into(),
        }
    }

    /// Build a [`PlotError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`PlotError::PlotNotFound`] value.
    pub fn plot_not_found(name: impl Into<String>) -> Self {
        Self::PlotNotFound(name.into())
    }

    /// Build a [`PlotError::TargetNotFound`] value.
    pub fn target_not_found(target: impl Into<String>) -> Self {
        Self::TargetNotFound(target.into())
    }

    /// Build a [`PlotError::Draw`] value from the draw operation's error.
    pub fn draw(plot: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Draw {
            plot: plot.into(),
            source: source.into(),
        }
    }

    /// Build a [`PlotError::ConfigSource`] value.
    pub fn config_source(msg: impl Into<String>) -> Self {
        Self::ConfigSource(msg.into())
    }

    /// Build a [`PlotError::Figure`] value.
    pub fn figure(msg: impl Into<String>) -> Self {
        Self::Figure(msg.into())
    }

    /// Whether the dispatcher may skip the offending layer and keep rendering.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DataRequirement { .. }
                | Self::Configuration(_)
                | Self::PlotNotFound(_)
                | Self::TargetNotFound(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
