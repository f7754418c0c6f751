//! What the dispatcher produces per value.
//!
//! The same traversal can emit bare strings (the enumeration hot path) or
//! provenance nodes recording which syntax node produced each value and
//! from which child results.

use std::fmt::Debug;
use std::rc::Rc;

use crate::ast::{AstNode, ClassItem, Pattern, QuantifierKind};

/// The syntax element a value came from.
#[derive(Debug, Clone, Copy)]
pub enum Origin<'a> {
    Pattern(&'a Pattern),
    Node(&'a AstNode),
    ClassItem(&'a ClassItem),
}

impl Origin<'_> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Origin::Pattern(_) => "Pattern",
            Origin::Node(node) => node.kind_name(),
            Origin::ClassItem(item) => item.kind_name(),
        }
    }

    /// Extra identifying detail, e.g. a group number or repetition bounds.
    pub fn detail(&self) -> Option<String> {
        match self {
            Origin::Node(AstNode::Group { index, .. }) => Some(format!("#{index}")),
            Origin::Node(AstNode::Backreference(group)) => Some(format!("\\{group}")),
            Origin::Node(AstNode::Repetition { kind, .. }) => Some(bounds_label(*kind)),
            Origin::Node(AstNode::CharClass { negated: true, .. }) => Some("^".to_string()),
            Origin::ClassItem(ClassItem::Range(from, to)) => Some(format!("{from}-{to}")),
            _ => None,
        }
    }

    /// Kind name followed by the detail, if any.
    pub fn label(&self) -> String {
        match self.detail() {
            Some(detail) => format!("{} {detail}", self.kind_name()),
            None => self.kind_name().to_string(),
        }
    }
}

fn bounds_label(kind: QuantifierKind) -> String {
    match kind.bounds() {
        (min, Some(max)) => format!("{{{min},{max}}}"),
        (min, None) => format!("{{{min},}}"),
    }
}

/// A produced value together with where it came from.
#[derive(Debug)]
pub struct Provenance<'a> {
    pub origin: Origin<'a>,
    pub value: String,
    pub children: Vec<Rc<Provenance<'a>>>,
}

/// Per-value output of the dispatcher.
pub trait Output<'a>: Clone + Debug + 'a {
    /// A value produced directly by `origin`.
    fn leaf(origin: Origin<'a>, value: String) -> Self;

    /// `origin` passing a single child result through.
    fn wrap(origin: Origin<'a>, child: Self) -> Self;

    /// Concatenation of `parts`, in order.
    fn joined(origin: Origin<'a>, parts: Vec<Self>) -> Self;

    /// Concatenation of repeated draws. The same part may appear more than
    /// once; provenance keeps it once.
    fn repeated(origin: Origin<'a>, parts: Vec<Self>) -> Self;

    fn value(&self) -> &str;

    /// Same output with its value replaced.
    fn with_value(self, value: String) -> Self;
}

impl<'a> Output<'a> for String {
    fn leaf(_: Origin<'a>, value: String) -> Self {
        value
    }

    fn wrap(_: Origin<'a>, child: Self) -> Self {
        child
    }

    fn joined(_: Origin<'a>, parts: Vec<Self>) -> Self {
        parts.concat()
    }

    fn repeated(_: Origin<'a>, parts: Vec<Self>) -> Self {
        parts.concat()
    }

    fn value(&self) -> &str {
        self
    }

    fn with_value(self, value: String) -> Self {
        value
    }
}

impl<'a> Output<'a> for Rc<Provenance<'a>> {
    fn leaf(origin: Origin<'a>, value: String) -> Self {
        Rc::new(Provenance {
            origin,
            value,
            children: Vec::new(),
        })
    }

    fn wrap(origin: Origin<'a>, child: Self) -> Self {
        Rc::new(Provenance {
            origin,
            value: child.value.clone(),
            children: vec![child],
        })
    }

    fn joined(origin: Origin<'a>, parts: Vec<Self>) -> Self {
        Rc::new(Provenance {
            origin,
            value: parts.iter().map(|part| part.value.as_str()).collect(),
            children: parts,
        })
    }

    fn repeated(origin: Origin<'a>, parts: Vec<Self>) -> Self {
        let value = parts.iter().map(|part| part.value.as_str()).collect();
        let mut children: Vec<Self> = Vec::with_capacity(parts.len());
        for part in parts {
            if !children.iter().any(|seen| Rc::ptr_eq(seen, &part)) {
                children.push(part);
            }
        }
        Rc::new(Provenance {
            origin,
            value,
            children,
        })
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn with_value(self, value: String) -> Self {
        Rc::new(Provenance {
            origin: self.origin,
            value,
            children: self.children.clone(),
        })
    }
}
