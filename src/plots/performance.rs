use anyhow::bail;
use serde_json::Value;

use crate::data::dataset::Dataset;
use crate::figure::backend::{Axes, Axis, Scale};
use crate::foundation::kwargs::Kwargs;
use crate::plots::values::{HistSettings, column, require, style};

const SCORE_BINS: usize = 50;
const TRUTH_THRESHOLD: f64 = 0.5;

/// `exatrkx.performance.score_distribution`: model scores of true and fake candidates.
///
/// `truth` holds booleans or numbers (true above 0.5), one per `score`. Both populations are
/// drawn as step histograms labelled `true` and `fake`. `hist_opts` is merged over
/// `{"bins": 50, "log": true, "lw": 2}`.
pub fn score_distribution(
    ax: &mut dyn Axes,
    data: &dyn Dataset,
    kwargs: &Kwargs,
) -> anyhow::Result<()> {
    let score = column(data, "score")?;
    let truth = require(data, "truth")?;
    let truth = truth_mask(&truth)?;
    if truth.len() != score.len() {
        bail!(
            "'truth' has {} entries but 'score' has {}",
            truth.len(),
            score.len()
        );
    }

    let mut defaults = Kwargs::new();
    defaults.insert("histtype".to_string(), Value::from("step"));
    defaults.insert("log".to_string(), Value::from(true));
    defaults.insert("lw".to_string(), Value::from(2));
    let hist = HistSettings::parse(&defaults, &style(kwargs, "hist_opts")?, SCORE_BINS)?;

    let (true_scores, fake_scores): (Vec<(f64, bool)>, Vec<(f64, bool)>) = score
        .into_iter()
        .zip(truth)
        .partition(|(_, is_true)| *is_true);

    for (label, population) in [("true", true_scores), ("fake", fake_scores)] {
        let values: Vec<f64> = population.into_iter().map(|(s, _)| s).collect();
        let mut opts = hist.style.clone();
        opts.insert("label".to_string(), Value::from(label));
        ax.hist(&values, hist.bins, &opts);
    }
    if hist.log {
        ax.set_scale(Axis::Y, Scale::Log);
    }
    ax.set_label(Axis::X, "Model Output");
    ax.set_label(Axis::Y, "Arbitrary Scale");
    ax.legend();
    Ok(())
}

fn truth_mask(value: &Value) -> anyhow::Result<Vec<bool>> {
    let Some(items) = value.as_array() else {
        bail!("'truth' must be an array of booleans or numbers");
    };
    items
        .iter()
        .enumerate()
        .map(|(i, v)| match v {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => match n.as_f64() {
                Some(f) => Ok(f > TRUTH_THRESHOLD),
                None => bail!("'truth'[{i}] is not representable as f64"),
            },
            other => bail!("'truth'[{i}] must be a boolean or number, got {other}"),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/plots/performance.rs"]
mod tests;
