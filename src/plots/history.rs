use anyhow::{Context, bail};
use serde_json::Value;

use crate::data::dataset::Dataset;
use crate::figure::backend::{Axes, Axis};
use crate::foundation::kwargs::Kwargs;
use crate::plots::values::{numbers, opt_f64, opt_str, require, style};

/// `train_log`: training history against epochs.
///
/// `history` is either an array with one value per step, or a mapping of series selected with
/// the `tag` argument. `steps_per_epoch` (default 1) rescales the step index into epochs and
/// `plot_opts` is passed to the line as style.
pub fn train_log(ax: &mut dyn Axes, data: &dyn Dataset, kwargs: &Kwargs) -> anyhow::Result<()> {
    let history = require(data, "history")?;
    let tag = opt_str(kwargs, "tag")?;

    let values = match (tag, &*history) {
        (None, Value::Object(_)) => bail!("'history' is a mapping; select a series with 'tag'"),
        (None, series) => numbers(series, "history")?,
        (Some(tag), Value::Object(map)) => {
            let series = map
                .get(tag)
                .with_context(|| format!("'history' has no series '{tag}'"))?;
            numbers(series, tag)?
        }
        (Some(_), _) => bail!("'tag' requires 'history' to be a mapping"),
    };

    let steps_per_epoch = opt_f64(kwargs, "steps_per_epoch")?.unwrap_or(1.0);
    if steps_per_epoch <= 0.0 {
        bail!("argument 'steps_per_epoch' must be > 0");
    }
    let epochs: Vec<f64> = (0..values.len())
        .map(|step| step as f64 / steps_per_epoch)
        .collect();

    let mut opts = style(kwargs, "plot_opts")?;
    if !opts.contains_key("label") {
        opts.insert("label".to_string(), Value::from(tag.unwrap_or("History")));
    }
    ax.line(&epochs, &values, &opts);
    ax.set_label(Axis::X, "Epochs");
    ax.set_label(Axis::Y, tag.unwrap_or("History"));
    ax.legend();
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/plots/history.rs"]
mod tests;
