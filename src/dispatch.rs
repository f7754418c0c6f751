//! Node interpreter: turns each syntax node into a lazy source of outputs.
//!
//! Sources for the whole tree are built up front and share one
//! [`MatchContext`]; nothing is pulled until the caller asks for a value.

use log::{debug, warn};

use crate::ast::{AnchorKind, AstNode, ClassItem, Pattern};
use crate::charset::{self, CharUniverse};
use crate::context::{self, SharedContext};
use crate::odometer::Odometer;
use crate::output::{Origin, Output};
use crate::repetition::Repetition;
use crate::source::{self, Source, Stage};

pub struct Dispatcher {
    context: SharedContext,
    universe: CharUniverse,
}

impl Dispatcher {
    pub fn new(context: SharedContext, universe: CharUniverse) -> Self {
        Dispatcher { context, universe }
    }

    pub fn context(&self) -> &SharedContext {
        &self.context
    }

    /// Source for a whole pattern: the body, with backreference placeholders
    /// resolved once per assembled string.
    pub fn pattern<'a, O: Output<'a>>(&self, pattern: &'a Pattern) -> Source<'a, O> {
        debug!("building sources for pattern with {} groups", pattern.group_count);
        let body = self.optional(pattern.body.as_ref());

        let substitute = self.context.clone();
        let strip = self.context.clone();
        let stages: Vec<Stage<'a, O>> = vec![
            Box::new(move |output: O| {
                let value = substitute.borrow().substitute_live(output.value().to_string());
                output.with_value(value)
            }),
            Box::new(move |output: O| {
                let value = strip.borrow().strip_unresolved(output.value().to_string());
                output.with_value(value)
            }),
        ];
        let resolved = source::log("match", source::pipeline(stages, body));
        source::map(move |output| O::wrap(Origin::Pattern(pattern), output), resolved)
    }

    /// Source for one node.
    pub fn node<'a, O: Output<'a>>(&self, node: &'a AstNode) -> Source<'a, O> {
        let origin = Origin::Node(node);
        match node {
            AstNode::Literal(ch) => source::once(O::leaf(origin, ch.to_string())),
            AstNode::Dot => leaves(origin, self.universe.chars()),
            AstNode::CharClass { items, negated } => self.char_class(node, items, *negated),
            AstNode::Disjunction { left, right } => {
                let branches = vec![
                    self.optional(left.as_deref()),
                    self.optional(right.as_deref()),
                ];
                wrapped(origin, source::concat(branches))
            }
            AstNode::Concat(children) => {
                let sources: Vec<Source<'a, O>> =
                    children.iter().map(|child| self.node(child)).collect();
                source::map(
                    move |parts| O::joined(origin, parts),
                    source::boxed(Odometer::new(sources)),
                )
            }
            AstNode::NonCapturingGroup { node: inner } => {
                wrapped(origin, self.optional(inner.as_deref()))
            }
            AstNode::Group { index, node: inner } => {
                let group = *index;
                let shared = self.context.clone();
                let captured = source::tap(
                    move |output: &O| shared.borrow_mut().capture(group, output.value()),
                    self.optional(inner.as_deref()),
                );
                wrapped(origin, captured)
            }
            AstNode::Backreference(group) => {
                let group = *group;
                self.context.borrow_mut().declare_reference(group);
                let shared = self.context.clone();
                source::tap(
                    move |output: &O| shared.borrow_mut().resolve_reference(group, output.value()),
                    source::once(O::leaf(origin, context::placeholder(group))),
                )
            }
            AstNode::Repetition { node: inner, kind, .. } => {
                let (min, max) = kind.bounds();
                let repeated: Repetition<'a, O> = Repetition::new(self.node(inner), min, max);
                source::map(
                    move |parts| O::repeated(origin, parts),
                    source::boxed(repeated),
                )
            }
            AstNode::Anchor(_) | AstNode::Lookaround { .. } => {
                debug!("treating {} as a no-op", describe_assertion(node));
                source::once(O::leaf(origin, String::new()))
            }
            AstNode::ShorthandClass(kind) => {
                warn!("no generator for shorthand class {kind:?}");
                source::empty()
            }
        }
    }

    /// Absent nodes (an empty alternative or group body) produce nothing.
    fn optional<'a, O: Output<'a>>(&self, node: Option<&'a AstNode>) -> Source<'a, O> {
        match node {
            Some(node) => self.node(node),
            None => source::empty(),
        }
    }

    fn char_class<'a, O: Output<'a>>(
        &self,
        node: &'a AstNode,
        items: &'a [ClassItem],
        negated: bool,
    ) -> Source<'a, O> {
        // Negation applies to each member on its own; members are then
        // drained in order, so a negated class may repeat characters.
        let members: Vec<Source<'a, O>> = items
            .iter()
            .map(|item| match item.code_points() {
                Some((from, to)) if negated => leaves(
                    Origin::ClassItem(item),
                    charset::negated_char_range(&[(from, to)], self.universe),
                ),
                Some((from, to)) => leaves(Origin::ClassItem(item), charset::char_range(from, to)),
                None => {
                    warn!("no generator for {item:?} in character class");
                    source::empty()
                }
            })
            .collect();
        wrapped(Origin::Node(node), source::concat(members))
    }
}

fn leaves<'a, O: Output<'a>>(origin: Origin<'a>, values: Vec<String>) -> Source<'a, O> {
    source::from_collection(values.into_iter().map(move |value| O::leaf(origin, value)))
}

fn wrapped<'a, O: Output<'a>>(origin: Origin<'a>, inner: Source<'a, O>) -> Source<'a, O> {
    source::map(move |child| O::wrap(origin, child), inner)
}

fn describe_assertion(node: &AstNode) -> &'static str {
    match node {
        AstNode::Anchor(AnchorKind::Start) => "start anchor",
        AstNode::Anchor(AnchorKind::End) => "end anchor",
        AstNode::Anchor(_) => "word boundary",
        _ => "lookaround",
    }
}
