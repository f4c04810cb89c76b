use std::borrow::Cow;

use anyhow::{Context, bail};
use serde_json::{Map, Value};

use crate::data::dataset::Dataset;
use crate::figure::backend::{Axes, Axis, Scale};
use crate::foundation::kwargs::{Kwargs, merge_kwargs};

pub(crate) fn require<'a>(data: &'a dyn Dataset, key: &str) -> anyhow::Result<Cow<'a, Value>> {
    data.get(key)
        .with_context(|| format!("dataset has no value for '{key}'"))
}

/// Numeric array. `null` elements become NaN so gaps survive into the drawing.
pub(crate) fn numbers(value: &Value, what: &str) -> anyhow::Result<Vec<f64>> {
    let Some(items) = value.as_array() else {
        bail!("'{what}' must be an array of numbers");
    };
    items
        .iter()
        .enumerate()
        .map(|(i, v)| match v {
            Value::Number(n) => n
                .as_f64()
                .with_context(|| format!("'{what}'[{i}] is not representable as f64")),
            Value::Null => Ok(f64::NAN),
            other => bail!("'{what}'[{i}] must be a number, got {other}"),
        })
        .collect()
}

pub(crate) fn column(data: &dyn Dataset, key: &str) -> anyhow::Result<Vec<f64>> {
    let value = require(data, key)?;
    numbers(&value, key)
}

/// `value` as a mapping of columns named `what`.
pub(crate) fn mapping<'v>(value: &'v Value, what: &str) -> anyhow::Result<&'v Map<String, Value>> {
    value
        .as_object()
        .with_context(|| format!("'{what}' must be a mapping of columns"))
}

/// Column `key` of the `table` mapping.
pub(crate) fn field<'v>(
    columns: &'v Map<String, Value>,
    table: &str,
    key: &str,
) -> anyhow::Result<&'v Value> {
    columns
        .get(key)
        .with_context(|| format!("'{table}' has no column '{key}'"))
}

/// Integer identifiers, as used for hit ids.
pub(crate) fn ids(value: &Value, what: &str) -> anyhow::Result<Vec<i64>> {
    let Some(items) = value.as_array() else {
        bail!("'{what}' must be an array of integers");
    };
    items
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_i64()
                .with_context(|| format!("'{what}'[{i}] must be an integer, got {v}"))
        })
        .collect()
}

/// Positive bin count, `default` when unset.
pub(crate) fn bin_count(value: Option<&Value>, default: usize) -> anyhow::Result<usize> {
    match value {
        None | Some(Value::Null) => Ok(default),
        Some(v) => {
            let n = v
                .as_u64()
                .with_context(|| format!("argument 'bins' must be a positive integer, got {v}"))?;
            if n == 0 {
                bail!("argument 'bins' must be > 0");
            }
            usize::try_from(n).context("argument 'bins' is too large")
        }
    }
}

/// Histogram options merged over plot defaults, with `bins` and `log` split out of the style.
#[derive(Debug)]
pub(crate) struct HistSettings {
    pub(crate) bins: usize,
    pub(crate) log: bool,
    pub(crate) style: Kwargs,
}

impl HistSettings {
    pub(crate) fn parse(
        defaults: &Kwargs,
        overrides: &Kwargs,
        default_bins: usize,
    ) -> anyhow::Result<Self> {
        let mut style = merge_kwargs(defaults, overrides);
        let bins = bin_count(style.remove("bins").as_ref(), default_bins)?;
        let log = match style.remove("log") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => b,
            Some(other) => bail!("histogram option 'log' must be a boolean, got {other}"),
        };
        Ok(Self { bins, log, style })
    }
}

pub(crate) fn opt_str<'a>(kwargs: &'a Kwargs, key: &str) -> anyhow::Result<Option<&'a str>> {
    match kwargs.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => bail!("argument '{key}' must be a string, got {other}"),
    }
}

pub(crate) fn opt_f64(kwargs: &Kwargs, key: &str) -> anyhow::Result<Option<f64>> {
    match kwargs.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => match v.as_f64() {
            Some(f) if f.is_finite() => Ok(Some(f)),
            _ => bail!("argument '{key}' must be a finite number, got {v}"),
        },
    }
}

pub(crate) fn opt_bool(kwargs: &Kwargs, key: &str) -> anyhow::Result<bool> {
    match kwargs.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => bail!("argument '{key}' must be a boolean, got {other}"),
    }
}

/// Style mapping under `key`, empty when unset.
pub(crate) fn style(kwargs: &Kwargs, key: &str) -> anyhow::Result<Kwargs> {
    match kwargs.get(key) {
        None | Some(Value::Null) => Ok(Kwargs::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(other) => bail!("argument '{key}' must be a mapping, got {other}"),
    }
}

/// Shared decoration arguments: `title`, `xlabel`, `ylabel`, `logx`, `logy`.
///
/// Parsed up front so a malformed argument fails before anything is drawn.
#[derive(Debug, Default)]
pub(crate) struct Decorations<'a> {
    title: Option<&'a str>,
    xlabel: Option<&'a str>,
    ylabel: Option<&'a str>,
    logx: bool,
    logy: bool,
}

impl<'a> Decorations<'a> {
    pub(crate) fn parse(kwargs: &'a Kwargs) -> anyhow::Result<Self> {
        Ok(Self {
            title: opt_str(kwargs, "title")?,
            xlabel: opt_str(kwargs, "xlabel")?,
            ylabel: opt_str(kwargs, "ylabel")?,
            logx: opt_bool(kwargs, "logx")?,
            logy: opt_bool(kwargs, "logy")?,
        })
    }

    pub(crate) fn apply(&self, ax: &mut dyn Axes) {
        if let Some(title) = self.title {
            ax.set_title(title);
        }
        if let Some(label) = self.xlabel {
            ax.set_label(Axis::X, label);
        }
        if let Some(label) = self.ylabel {
            ax.set_label(Axis::Y, label);
        }
        if self.logx {
            ax.set_scale(Axis::X, Scale::Log);
        }
        if self.logy {
            ax.set_scale(Axis::Y, Scale::Log);
        }
    }
}
