//! Syntax tree consumed by the enumerator.
//!
//! The tree is produced by [`crate::parser`] (or built by hand) and is never
//! mutated once handed to the dispatcher.

/// Root of a parsed pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    /// Pattern body; `None` for the empty pattern.
    pub body: Option<AstNode>,
    /// Number of capturing groups, numbered from 1.
    pub group_count: usize,
}

impl Pattern {
    pub fn new(body: Option<AstNode>, group_count: usize) -> Self {
        Pattern { body, group_count }
    }

    /// Whether some repetition in the pattern has no upper bound.
    pub fn is_unbounded(&self) -> bool {
        self.body.as_ref().is_some_and(AstNode::is_unbounded)
    }
}

/// A single node in the syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// A single literal character.
    Literal(char),
    /// `.`, any printable character.
    Dot,
    /// Ordered sequence of nodes (implicit in `ab`).
    Concat(Vec<AstNode>),
    /// `left|right`. An empty alternative is `None`.
    Disjunction {
        left: Option<Box<AstNode>>,
        right: Option<Box<AstNode>>,
    },
    /// Quantifier applied to a sub-expression.
    Repetition {
        node: Box<AstNode>,
        kind: QuantifierKind,
        greedy: bool,
    },
    /// Character class like `[abc]`, `[a-z]`, `[^abc]`.
    CharClass {
        items: Vec<ClassItem>,
        negated: bool,
    },
    /// Shorthand class: `\d`, `\w`, `\s` and their negations.
    ShorthandClass(ShorthandKind),
    /// Anchor: `^`, `$`, `\b`, `\B`.
    Anchor(AnchorKind),
    /// Capturing group `(...)` with its group number.
    Group {
        index: usize,
        node: Option<Box<AstNode>>,
    },
    /// Non-capturing group `(?:...)`.
    NonCapturingGroup { node: Option<Box<AstNode>> },
    /// Backreference `\1`, `\2`, etc.
    Backreference(usize),
    /// Lookahead `(?=...)` / `(?!...)` or lookbehind `(?<=...)` / `(?<!...)`.
    Lookaround {
        node: Option<Box<AstNode>>,
        kind: LookaroundKind,
    },
}

impl AstNode {
    /// Short name of the node kind, used in diagnostics and provenance output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            AstNode::Literal(_) => "Literal",
            AstNode::Dot => "Dot",
            AstNode::Concat(_) => "Concat",
            AstNode::Disjunction { .. } => "Disjunction",
            AstNode::Repetition { .. } => "Repetition",
            AstNode::CharClass { .. } => "CharClass",
            AstNode::ShorthandClass(_) => "ShorthandClass",
            AstNode::Anchor(_) => "Anchor",
            AstNode::Group { .. } => "Group",
            AstNode::NonCapturingGroup { .. } => "NonCapturingGroup",
            AstNode::Backreference(_) => "Backreference",
            AstNode::Lookaround { .. } => "Lookaround",
        }
    }

    /// Whether this node or one of its descendants repeats without bound.
    pub fn is_unbounded(&self) -> bool {
        match self {
            AstNode::Repetition { node, kind, .. } => {
                kind.bounds().1.is_none() || node.is_unbounded()
            }
            AstNode::Concat(nodes) => nodes.iter().any(AstNode::is_unbounded),
            AstNode::Disjunction { left, right } => {
                [left, right].into_iter().flatten().any(|n| n.is_unbounded())
            }
            AstNode::Group { node, .. }
            | AstNode::NonCapturingGroup { node }
            | AstNode::Lookaround { node, .. } => node.as_ref().is_some_and(|n| n.is_unbounded()),
            _ => false,
        }
    }
}

/// Kind of quantifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantifierKind {
    /// `*`: zero or more.
    Star,
    /// `+`: one or more.
    Plus,
    /// `?`: zero or one.
    Question,
    /// `{n}`: exactly n.
    Exact(usize),
    /// `{n,}`: at least n.
    AtLeast(usize),
    /// `{n,m}`: between n and m inclusive.
    Range(usize, usize),
}

impl QuantifierKind {
    /// Repetition bounds as `(min, max)`; `max` is `None` when unbounded.
    pub fn bounds(self) -> (usize, Option<usize>) {
        match self {
            QuantifierKind::Star => (0, None),
            QuantifierKind::Plus => (1, None),
            QuantifierKind::Question => (0, Some(1)),
            QuantifierKind::Exact(n) => (n, Some(n)),
            QuantifierKind::AtLeast(n) => (n, None),
            QuantifierKind::Range(n, m) => (n, Some(m)),
        }
    }
}

/// Item within a character class.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassItem {
    /// Single character.
    Literal(char),
    /// Character range `a-z`.
    Range(char, char),
    /// Shorthand within a class, e.g. `[\d]`.
    Shorthand(ShorthandKind),
}

impl ClassItem {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ClassItem::Literal(_) => "ClassLiteral",
            ClassItem::Range(..) => "ClassRange",
            ClassItem::Shorthand(_) => "ClassShorthand",
        }
    }

    /// Inclusive code-point bounds, or `None` for shorthands.
    pub fn code_points(&self) -> Option<(u32, u32)> {
        match self {
            ClassItem::Literal(ch) => Some((*ch as u32, *ch as u32)),
            ClassItem::Range(from, to) => Some((*from as u32, *to as u32)),
            ClassItem::Shorthand(_) => None,
        }
    }
}

/// Shorthand character class kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShorthandKind {
    /// `\d`: digits.
    Digit,
    /// `\D`: non-digits.
    NonDigit,
    /// `\w`: word characters.
    Word,
    /// `\W`: non-word characters.
    NonWord,
    /// `\s`: whitespace.
    Space,
    /// `\S`: non-whitespace.
    NonSpace,
}

/// Anchor kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    /// `^`: start of string.
    Start,
    /// `$`: end of string.
    End,
    /// `\b`: word boundary.
    WordBoundary,
    /// `\B`: non-word boundary.
    NonWordBoundary,
}

/// Direction and polarity of a lookaround.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookaroundKind {
    Ahead { positive: bool },
    Behind { positive: bool },
}
