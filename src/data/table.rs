use std::borrow::Cow;
use std::collections::BTreeMap;

use serde_json::Value;

use crate::data::dataset::Dataset;
use crate::foundation::error::{PlotError, PlotResult};

/// Columnar numeric table, e.g. per-hit coordinates of one event.
///
/// All columns share the same row count.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Table {
    columns: BTreeMap<String, Vec<f64>>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a column. Fails if its length differs from the existing row count.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: impl Into<Vec<f64>>,
    ) -> PlotResult<Self> {
        let name = name.into();
        let values = values.into();
        match self.row_count_excluding(&name) {
            Some(rows) if rows != values.len() => {
                return Err(PlotError::configuration(format!(
                    "column '{name}' has {} rows, table has {rows}",
                    values.len()
                )));
            }
            _ => {}
        }
        self.columns.insert(name, values);
        Ok(self)
    }

    /// Borrow a column by name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Column names in sorted order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of rows (0 for a table without columns).
    pub fn len(&self) -> usize {
        self.columns.values().next().map_or(0, Vec::len)
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn row_count_excluding(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .find(|(k, _)| k.as_str() != name)
            .map(|(_, v)| v.len())
    }
}

impl Dataset for Table {
    fn contains_key(&self, key: &str) -> bool {
        self.columns.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<Cow<'_, Value>> {
        let col = self.columns.get(key)?;
        Some(Cow::Owned(Value::Array(
            col.iter().copied().map(Value::from).collect(),
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/table.rs"]
mod tests;
