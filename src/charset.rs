//! Code-point ranges as sequences of one-character strings.

use serde::{Deserialize, Serialize};

/// The set `.` and negated classes draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharUniverse {
    pub from: u32,
    pub to: u32,
}

impl CharUniverse {
    /// Printable ASCII, space through `~`.
    pub const PRINTABLE: CharUniverse = CharUniverse { from: 32, to: 126 };

    pub fn chars(self) -> Vec<String> {
        char_range(self.from, self.to)
    }
}

impl Default for CharUniverse {
    fn default() -> Self {
        CharUniverse::PRINTABLE
    }
}

/// Every character in the inclusive code-point range, in ascending order.
/// Code points that are not valid `char`s are skipped.
pub fn char_range(from: u32, to: u32) -> Vec<String> {
    (from..=to)
        .filter_map(char::from_u32)
        .map(String::from)
        .collect()
}

/// Members of `universe` outside every one of `excluded`, ascending.
pub fn negated_char_range(excluded: &[(u32, u32)], universe: CharUniverse) -> Vec<String> {
    (universe.from..=universe.to)
        .filter(|cp| !excluded.iter().any(|&(from, to)| (from..=to).contains(cp)))
        .filter_map(char::from_u32)
        .map(String::from)
        .collect()
}
