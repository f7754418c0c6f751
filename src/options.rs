use serde::{Deserialize, Serialize};

use crate::charset::CharUniverse;

/// Knobs for one enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumerateOptions {
    /// Stop after this many results. `None` pulls until the source is spent,
    /// which never happens for unbounded quantifiers.
    pub limit: Option<usize>,
    /// Characters available to `.` and negated classes.
    pub universe: CharUniverse,
}

impl EnumerateOptions {
    pub fn with_limit(limit: usize) -> Self {
        EnumerateOptions {
            limit: Some(limit),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_partial_json() {
        let options: EnumerateOptions = serde_json::from_str(r#"{"limit": 3}"#).unwrap();
        assert_eq!(options, EnumerateOptions::with_limit(3));

        let options: EnumerateOptions =
            serde_json::from_str(r#"{"universe": {"from": 97, "to": 99}}"#).unwrap();
        assert_eq!(options.limit, None);
        assert_eq!(options.universe.chars(), ["a", "b", "c"]);
    }
}
