use serde_json::{Map, Value};

/// Keyword arguments passed to a draw operation.
pub type Kwargs = Map<String, Value>;

/// Merge `overrides` over `base`, returning a new map.
///
/// Keys present in both take the value from `overrides`. Neither input is modified.
pub fn merge_kwargs(base: &Kwargs, overrides: &Kwargs) -> Kwargs {
    let mut out = base.clone();
    for (k, v) in overrides {
        out.insert(k.clone(), v.clone());
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/kwargs.rs"]
mod tests;
