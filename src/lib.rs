//! Lazily enumerate the strings a regular expression can match.
//!
//! ```
//! use regex_enumerate::enumerate_matches;
//!
//! let matches = enumerate_matches("(a|b)c?", None).unwrap();
//! assert_eq!(matches, ["a", "b", "ac", "bc"]);
//! ```
//!
//! Patterns with unbounded quantifiers (`*`, `+`, `{n,}`) produce infinitely
//! many strings; pass a limit or pull from [`generate_matches`] yourself.

pub mod ast;
pub mod charset;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod odometer;
pub mod options;
pub mod output;
pub mod parser;
pub mod repetition;
pub mod source;
pub mod treeviz;

use std::rc::Rc;

use log::debug;

pub use ast::{AstNode, ClassItem, Pattern, QuantifierKind};
pub use charset::CharUniverse;
pub use context::{MatchContext, SharedContext};
pub use dispatch::Dispatcher;
pub use error::ParseError;
pub use odometer::Odometer;
pub use options::EnumerateOptions;
pub use output::{Origin, Output, Provenance};
pub use parser::{Parser, parse};
pub use repetition::Repetition;
pub use source::{Source, take_results};
pub use treeviz::{ProvenanceSnapshot, snapshot_from_provenance, to_treeviz_str};

/// Lazy source of every string `pattern` can match, in enumeration order.
pub fn generate_matches(pattern: &Pattern) -> Source<'_, String> {
    generate_matches_with(pattern, &EnumerateOptions::default())
}

/// Like [`generate_matches`], honouring `options` (including its limit).
pub fn generate_matches_with<'a>(
    pattern: &'a Pattern,
    options: &EnumerateOptions,
) -> Source<'a, String> {
    let matches: Source<'a, String> = build(pattern, options);
    match options.limit {
        Some(limit) => source::boxed(matches.take(limit)),
        None => matches,
    }
}

/// Lazy source of provenance trees, one per produced string.
pub fn enumerate_with_provenance(pattern: &Pattern) -> Source<'_, Rc<Provenance<'_>>> {
    build(pattern, &EnumerateOptions::default())
}

/// Collect up to `limit` matches of an already-parsed pattern.
pub fn enumerate(pattern: &Pattern, limit: Option<usize>) -> Vec<String> {
    take_results(generate_matches(pattern), limit)
}

/// Parse `pattern` and collect up to `limit` of its matches.
pub fn enumerate_matches(pattern: &str, limit: Option<usize>) -> Result<Vec<String>, ParseError> {
    let pattern = parse(pattern)?;
    Ok(enumerate(&pattern, limit))
}

/// Every call gets its own context, so captures never leak between two
/// enumerations of the same tree.
fn build<'a, O: Output<'a>>(pattern: &'a Pattern, options: &EnumerateOptions) -> Source<'a, O> {
    debug!("enumerating pattern, limit {:?}", options.limit);
    Dispatcher::new(MatchContext::shared(), options.universe).pattern(pattern)
}
