use anyhow::bail;
use serde_json::{Map, Value};

use crate::data::dataset::Dataset;
use crate::figure::backend::{Axes, Axis};
use crate::foundation::kwargs::Kwargs;
use crate::plots::values::{mapping, numbers, opt_str, require};

const MARKER_SIZE: f64 = 1.0;

/// `hits.2d`: transverse hit positions.
///
/// `hits` is a mapping of columns holding either cartesian `x`/`y` or cylindrical `r`/`phi`
/// coordinates. `hit_filter` is an optional boolean mask over the hits; `label` and `color` style
/// the markers.
pub fn hits_2d(ax: &mut dyn Axes, data: &dyn Dataset, kwargs: &Kwargs) -> anyhow::Result<()> {
    let hits = require(data, "hits")?;
    let columns = mapping(&hits, "hits")?;

    let (mut x, mut y) = coordinates(columns)?;
    if x.len() != y.len() {
        bail!("hit coordinate columns differ in length: {} vs {}", x.len(), y.len());
    }

    if let Some(mask) = kwargs.get("hit_filter").filter(|v| !v.is_null()) {
        let mask = boolean_mask(mask, x.len(), "hit_filter", "hits")?;
        x = apply_mask(&x, &mask);
        y = apply_mask(&y, &mask);
    }

    let mut opts = Kwargs::new();
    opts.insert("s".to_string(), Value::from(MARKER_SIZE));
    let label = opt_str(kwargs, "label")?;
    if let Some(label) = label {
        opts.insert("label".to_string(), Value::from(label));
    }
    if let Some(color) = opt_str(kwargs, "color")? {
        opts.insert("color".to_string(), Value::from(color));
    }

    ax.scatter(&x, &y, &opts);
    ax.set_label(Axis::X, "x [mm]");
    ax.set_label(Axis::Y, "y [mm]");
    if label.is_some() {
        ax.legend();
    }
    Ok(())
}

/// Cartesian `x`/`y` columns of a hit table, converted from `r`/`phi` when needed.
pub(super) fn coordinates(columns: &Map<String, Value>) -> anyhow::Result<(Vec<f64>, Vec<f64>)> {
    if let (Some(x), Some(y)) = (columns.get("x"), columns.get("y")) {
        return Ok((numbers(x, "x")?, numbers(y, "y")?));
    }
    if let (Some(r), Some(phi)) = (columns.get("r"), columns.get("phi")) {
        let r = numbers(r, "r")?;
        let phi = numbers(phi, "phi")?;
        if r.len() != phi.len() {
            bail!("hit coordinate columns differ in length: {} vs {}", r.len(), phi.len());
        }
        let x = r.iter().zip(&phi).map(|(r, p)| r * p.cos()).collect();
        let y = r.iter().zip(&phi).map(|(r, p)| r * p.sin()).collect();
        return Ok((x, y));
    }
    bail!("no valid coordinate data found: expected 'x'/'y' or 'r'/'phi'")
}

/// Boolean mask argument `what` over `len` rows named `rows`.
pub(super) fn boolean_mask(
    value: &Value,
    len: usize,
    what: &str,
    rows: &str,
) -> anyhow::Result<Vec<bool>> {
    let Some(items) = value.as_array() else {
        bail!("argument '{what}' must be an array of booleans");
    };
    if items.len() != len {
        bail!("argument '{what}' has {} entries for {len} {rows}", items.len());
    }
    items
        .iter()
        .map(|v| match v {
            Value::Bool(b) => Ok(*b),
            other => bail!("argument '{what}' must hold booleans, got {other}"),
        })
        .collect()
}

pub(super) fn apply_mask(values: &[f64], mask: &[bool]) -> Vec<f64> {
    values
        .iter()
        .zip(mask)
        .filter(|(_, keep)| **keep)
        .map(|(v, _)| *v)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/plots/hits.rs"]
mod tests;
