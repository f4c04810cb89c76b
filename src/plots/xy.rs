use anyhow::bail;
use serde_json::Value;

use crate::data::dataset::Dataset;
use crate::figure::backend::{Axes, Axis, Scale};
use crate::foundation::kwargs::{Kwargs, merge_kwargs};
use crate::plots::values::{Decorations, bin_count, column, opt_bool, opt_str, style};

const DEFAULT_BINS: usize = 50;

fn xy_columns(data: &dyn Dataset) -> anyhow::Result<(Vec<f64>, Vec<f64>)> {
    let x = column(data, "x")?;
    let y = column(data, "y")?;
    if x.len() != y.len() {
        bail!("'x' has {} values but 'y' has {}", x.len(), y.len());
    }
    Ok((x, y))
}

/// `style` argument with `label` folded in, and whether a legend is wanted.
fn labelled_style(kwargs: &Kwargs) -> anyhow::Result<(Kwargs, bool)> {
    let mut opts = style(kwargs, "style")?;
    let label = opt_str(kwargs, "label")?;
    if let Some(label) = label {
        opts.insert("label".to_string(), Value::from(label));
    }
    Ok((opts, label.is_some()))
}

/// `xy.line`: polyline through the `x`/`y` columns.
pub fn line(ax: &mut dyn Axes, data: &dyn Dataset, kwargs: &Kwargs) -> anyhow::Result<()> {
    let (x, y) = xy_columns(data)?;
    let (opts, legend) = labelled_style(kwargs)?;
    let decorations = Decorations::parse(kwargs)?;
    ax.line(&x, &y, &opts);
    decorations.apply(ax);
    if legend {
        ax.legend();
    }
    Ok(())
}

/// `xy.scatter`: markers at the `x`/`y` columns.
pub fn scatter(ax: &mut dyn Axes, data: &dyn Dataset, kwargs: &Kwargs) -> anyhow::Result<()> {
    let (x, y) = xy_columns(data)?;
    let (opts, legend) = labelled_style(kwargs)?;
    let decorations = Decorations::parse(kwargs)?;
    ax.scatter(&x, &y, &opts);
    decorations.apply(ax);
    if legend {
        ax.legend();
    }
    Ok(())
}

/// `hist`: step histogram of the `values` column.
///
/// Arguments: `bins` (default 50), `log` for a logarithmic count axis, `hist_opts` merged over
/// the default `{"histtype": "step"}`, plus the shared decoration arguments.
pub fn hist(ax: &mut dyn Axes, data: &dyn Dataset, kwargs: &Kwargs) -> anyhow::Result<()> {
    let values = column(data, "values")?;

    let bins = bin_count(kwargs.get("bins"), DEFAULT_BINS)?;

    let mut defaults = Kwargs::new();
    defaults.insert("histtype".to_string(), Value::from("step"));
    let opts = merge_kwargs(&defaults, &style(kwargs, "hist_opts")?);
    let log = opt_bool(kwargs, "log")?;
    let decorations = Decorations::parse(kwargs)?;

    ax.hist(&values, bins, &opts);
    if log {
        ax.set_scale(Axis::Y, Scale::Log);
    }
    decorations.apply(ax);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/plots/xy.rs"]
mod tests;
