use std::collections::HashMap;

use anyhow::{Context, bail};
use serde_json::Value;

use crate::data::dataset::Dataset;
use crate::figure::backend::{Axes, Axis, Scale};
use crate::foundation::kwargs::{Kwargs, merge_kwargs};
use crate::plots::hits::{apply_mask, boolean_mask, coordinates};
use crate::plots::values::{HistSettings, field, ids, mapping, numbers, opt_str, require, style};

const SEGMENT_WIDTH: f64 = 0.1;
const EDGE_BINS: usize = 10;

/// `exatrkx.hit_pairs.2d`: segments between the two hits of every pair.
///
/// `hits` holds `hit_id` with either `x`/`y` or `r`/`phi` columns and `pairs` holds
/// `hit_id_1`/`hit_id_2`. Pairs naming an unknown hit are dropped. All segments go into one
/// line broken by NaN gaps, styled by `line_opts` merged over `{"linewidth": 0.1}`.
pub fn hit_pairs_2d(
    ax: &mut dyn Axes,
    data: &dyn Dataset,
    kwargs: &Kwargs,
) -> anyhow::Result<()> {
    let hits = require(data, "hits")?;
    let hits = mapping(&hits, "hits")?;
    let pairs = require(data, "pairs")?;
    let pairs = mapping(&pairs, "pairs")?;

    let (x, y) = coordinates(hits)?;
    let hit_ids = ids(field(hits, "hits", "hit_id")?, "hit_id")?;
    if hit_ids.len() != x.len() || x.len() != y.len() {
        bail!(
            "hit columns differ in length: {} ids, {} x, {} y",
            hit_ids.len(),
            x.len(),
            y.len()
        );
    }
    let positions: HashMap<i64, (f64, f64)> = hit_ids
        .into_iter()
        .zip(x.into_iter().zip(y))
        .collect();

    let first = ids(field(pairs, "pairs", "hit_id_1")?, "hit_id_1")?;
    let second = ids(field(pairs, "pairs", "hit_id_2")?, "hit_id_2")?;
    if first.len() != second.len() {
        bail!(
            "pair columns differ in length: {} vs {}",
            first.len(),
            second.len()
        );
    }

    let mut defaults = Kwargs::new();
    defaults.insert("linewidth".to_string(), Value::from(SEGMENT_WIDTH));
    let opts = merge_kwargs(&defaults, &style(kwargs, "line_opts")?);

    let mut xs = Vec::with_capacity(first.len() * 3);
    let mut ys = Vec::with_capacity(first.len() * 3);
    for (a, b) in first.iter().zip(&second) {
        let (Some(p), Some(q)) = (positions.get(a), positions.get(b)) else {
            continue;
        };
        if !xs.is_empty() {
            xs.push(f64::NAN);
            ys.push(f64::NAN);
        }
        xs.extend([p.0, q.0]);
        ys.extend([p.1, q.1]);
    }

    ax.line(&xs, &ys, &opts);
    ax.set_label(Axis::X, "x [mm]");
    ax.set_label(Axis::Y, "y [mm]");
    if opts.contains_key("label") {
        ax.legend();
    }
    Ok(())
}

/// `exatrkx.hit_pairs.hist`: step histogram of one edge feature.
///
/// `feature` names a column of the `edges` mapping and `edge_filter` is an optional boolean
/// mask over the edges. `hist_opts` is merged over `{"lw": 2, "density": false}`; its `bins`
/// (default 10) and `log` entries pick the bin count and a logarithmic count axis.
pub fn hit_pairs_hist(
    ax: &mut dyn Axes,
    data: &dyn Dataset,
    kwargs: &Kwargs,
) -> anyhow::Result<()> {
    let edges = require(data, "edges")?;
    let edges = mapping(&edges, "edges")?;
    let feature = opt_str(kwargs, "feature")?.context("argument 'feature' is required")?;

    let mut values = numbers(field(edges, "edges", feature)?, feature)?;
    if let Some(mask) = kwargs.get("edge_filter").filter(|v| !v.is_null()) {
        let mask = boolean_mask(mask, values.len(), "edge_filter", "edges")?;
        values = apply_mask(&values, &mask);
    }

    let mut defaults = Kwargs::new();
    defaults.insert("histtype".to_string(), Value::from("step"));
    defaults.insert("lw".to_string(), Value::from(2));
    defaults.insert("density".to_string(), Value::from(false));
    let hist = HistSettings::parse(&defaults, &style(kwargs, "hist_opts")?, EDGE_BINS)?;

    ax.set_label(Axis::X, feature);
    ax.hist(&values, hist.bins, &hist.style);
    if hist.log {
        ax.set_scale(Axis::Y, Scale::Log);
    }
    if hist.style.contains_key("label") {
        ax.legend();
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/plots/pairs.rs"]
mod tests;
