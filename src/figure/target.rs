use std::fmt;
use std::str::FromStr;

use crate::foundation::error::PlotError;

/// Address of one drawing region (axes) in a figure grid.
///
/// The text form is `"row,col"`, used as the key in plan files.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TargetId {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
}

impl TargetId {
    /// Construct a target address.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for TargetId {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || PlotError::configuration(format!("invalid target '{s}', expected 'row,col'"));
        let (row, col) = s.split_once(',').ok_or_else(bad)?;
        let row = row.trim().parse::<usize>().map_err(|_| bad())?;
        let col = col.trim().parse::<usize>().map_err(|_| bad())?;
        Ok(Self { row, col })
    }
}

impl From<(usize, usize)> for TargetId {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}
