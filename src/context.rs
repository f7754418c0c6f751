//! Capture and backreference state for one enumeration.
//!
//! Capturing groups record their latest value as they are pulled. A
//! backreference emits a placeholder token and, if its group has already
//! captured something at that moment, marks itself live. Once a whole
//! string has been assembled, [`MatchContext::substitute_live`] swaps live
//! placeholders for the captured text and
//! [`MatchContext::strip_unresolved`] deletes whatever is left.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// Context shared by every source built for one enumeration.
pub type SharedContext = Rc<RefCell<MatchContext>>;

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

/// Placeholder text standing in for a backreference to `group`.
///
/// Private-use delimiters keep it from colliding with anything a pattern can
/// generate from printable characters.
pub fn placeholder(group: usize) -> String {
    format!("{OPEN}{group}{CLOSE}")
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MatchContext {
    groups: BTreeMap<usize, String>,
    backreferences: BTreeMap<usize, String>,
    referenced: BTreeSet<usize>,
}

impl MatchContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedContext {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Record the latest value of a capturing group.
    pub fn capture(&mut self, group: usize, value: &str) {
        self.groups.insert(group, value.to_string());
    }

    pub fn group(&self, group: usize) -> Option<&str> {
        self.groups.get(&group).map(String::as_str)
    }

    /// Note that the pattern contains a backreference to `group`.
    pub fn declare_reference(&mut self, group: usize) {
        self.referenced.insert(group);
    }

    /// Evaluate a backreference: it goes live only if `group` has already
    /// captured a value.
    pub fn resolve_reference(&mut self, group: usize, token: &str) {
        if self.groups.contains_key(&group) {
            self.backreferences.insert(group, token.to_string());
        }
    }

    pub fn is_live(&self, group: usize) -> bool {
        self.backreferences.contains_key(&group)
    }

    /// Replace each live placeholder with its group's captured value.
    ///
    /// Groups are visited in ascending number, in a single pass. A captured
    /// value that itself contains a lower-numbered placeholder is inserted
    /// after that group was already handled, so the placeholder survives and
    /// is later stripped: `(a)(\1b)\2` yields `aabb`.
    pub fn substitute_live(&self, value: String) -> String {
        self.groups
            .iter()
            .filter(|(group, _)| self.is_live(**group))
            .fold(value, |acc, (group, captured)| {
                acc.replace(&placeholder(*group), captured)
            })
    }

    /// Remove placeholders that were never resolved.
    pub fn strip_unresolved(&self, value: String) -> String {
        if !value.contains(OPEN) {
            return value;
        }
        self.referenced
            .iter()
            .chain(self.groups.keys())
            .fold(value, |acc, group| acc.replace(&placeholder(*group), ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backreference_is_live_only_after_capture() {
        let mut context = MatchContext::new();
        let token = placeholder(1);
        context.resolve_reference(1, &token);
        assert!(!context.is_live(1));

        context.capture(1, "ab");
        context.resolve_reference(1, &token);
        assert!(context.is_live(1));
        assert_eq!(context.group(1), Some("ab"));
    }

    #[test]
    fn substitution_uses_latest_capture() {
        let mut context = MatchContext::new();
        let token = placeholder(1);
        context.capture(1, "a");
        context.resolve_reference(1, &token);
        context.capture(1, "b");
        assert_eq!(context.substitute_live(format!("b{token}")), "bb");
    }

    #[test]
    fn unresolved_placeholders_are_stripped() {
        let mut context = MatchContext::new();
        context.declare_reference(2);
        context.capture(1, "x");
        let value = format!("{}a{}", placeholder(2), placeholder(1));
        let substituted = context.substitute_live(value);
        assert_eq!(context.strip_unresolved(substituted), "a");
    }

    #[test]
    fn nested_placeholders_are_not_revisited() {
        let mut context = MatchContext::new();
        let one = placeholder(1);
        let two = placeholder(2);
        context.capture(1, "a");
        context.resolve_reference(1, &one);
        context.capture(2, &format!("{one}b"));
        context.resolve_reference(2, &two);
        let substituted = context.substitute_live(format!("a{one}b{two}"));
        assert_eq!(context.strip_unresolved(substituted), "aabb");
    }

    #[test]
    fn placeholders_do_not_collide() {
        let mut context = MatchContext::new();
        let one = placeholder(1);
        context.capture(1, "a");
        context.resolve_reference(1, &one);
        let value = format!("{one}{}", placeholder(12));
        context.declare_reference(12);
        let substituted = context.substitute_live(value);
        assert_eq!(context.strip_unresolved(substituted), "a");
    }
}
