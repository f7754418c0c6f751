//! Regex parser: converts a pattern string into a [`Pattern`] tree.
//!
//! Accepts bare patterns (`a|b`) as well as the slash-delimited literal form
//! (`/a|b/gi`). Flags after the closing slash are accepted and ignored, since
//! none of them change the set of strings a pattern can produce here.

use crate::ast::*;
use crate::error::{ParseError, Result};

/// Largest repetition bound accepted in `{n}`, `{n,}` and `{n,m}`.
///
/// A single result of a `{n}` repetition holds `n` draws, so the bound caps
/// the memory one pulled value can need.
pub const MAX_REPEAT: usize = 1000;

/// Parse pattern text into a syntax tree.
pub fn parse(pattern: &str) -> Result<Pattern> {
    Parser::new(pattern).parse()
}

pub struct Parser {
    chars: Vec<char>,
    pos: usize,
    group_count: usize,
}

impl Parser {
    pub fn new(pattern: &str) -> Self {
        Parser {
            chars: strip_delimiters(pattern).chars().collect(),
            pos: 0,
            group_count: 0,
        }
    }

    /// Parse the full pattern.
    pub fn parse(&mut self) -> Result<Pattern> {
        let body = self.parse_disjunction()?;
        if let Some(ch) = self.peek() {
            return Err(ParseError::UnexpectedChar { ch, pos: self.pos });
        }
        Ok(Pattern::new(body, self.group_count))
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.advance() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(ParseError::UnexpectedChar {
                ch: c,
                pos: self.pos - 1,
            }),
            None => Err(ParseError::UnexpectedEnd {
                expected,
                pos: self.pos,
            }),
        }
    }

    /// Parse disjunction `a|b|c` into left-nested binary nodes.
    fn parse_disjunction(&mut self) -> Result<Option<AstNode>> {
        let mut node = self.parse_concat()?;
        while self.peek() == Some('|') {
            self.advance();
            let right = self.parse_concat()?;
            node = Some(AstNode::Disjunction {
                left: node.map(Box::new),
                right: right.map(Box::new),
            });
        }
        Ok(node)
    }

    /// Parse concatenation `abc`. An empty sequence yields `None`.
    fn parse_concat(&mut self) -> Result<Option<AstNode>> {
        let mut nodes = Vec::new();
        while let Some(ch) = self.peek() {
            if ch == ')' || ch == '|' {
                break;
            }
            nodes.push(self.parse_quantified()?);
        }
        Ok(match nodes.len() {
            0 => None,
            1 => nodes.pop(),
            _ => Some(AstNode::Concat(nodes)),
        })
    }

    /// Parse an atom possibly followed by a quantifier.
    fn parse_quantified(&mut self) -> Result<AstNode> {
        let node = self.parse_atom()?;
        let kind = match self.peek() {
            Some('*') => QuantifierKind::Star,
            Some('+') => QuantifierKind::Plus,
            Some('?') => QuantifierKind::Question,
            Some('{') => return self.parse_brace_quantifier(node),
            _ => return Ok(node),
        };
        self.advance();
        let greedy = self.parse_greediness();
        Ok(AstNode::Repetition {
            node: Box::new(node),
            kind,
            greedy,
        })
    }

    fn parse_greediness(&mut self) -> bool {
        if self.peek() == Some('?') {
            self.advance();
            false
        } else {
            true
        }
    }

    /// Parse `{n}`, `{n,}`, `{n,m}`; anything else leaves `{` as a literal.
    fn parse_brace_quantifier(&mut self, node: AstNode) -> Result<AstNode> {
        let save_pos = self.pos;
        self.advance(); // consume '{'

        match self.try_parse_brace_contents() {
            Some(kind) => {
                let (min, max) = kind.bounds();
                let largest = max.unwrap_or(min).max(min);
                if largest > MAX_REPEAT {
                    return Err(ParseError::BoundTooLarge {
                        bound: largest,
                        pos: save_pos,
                    });
                }
                if let Some(max) = max.filter(|&max| min > max) {
                    return Err(ParseError::ReversedBounds { min, max });
                }
                let greedy = self.parse_greediness();
                Ok(AstNode::Repetition {
                    node: Box::new(node),
                    kind,
                    greedy,
                })
            }
            None => {
                self.pos = save_pos;
                Ok(node)
            }
        }
    }

    fn try_parse_brace_contents(&mut self) -> Option<QuantifierKind> {
        let n = self.parse_number()?;
        let kind = if self.peek() == Some(',') {
            self.advance();
            if self.peek() == Some('}') {
                QuantifierKind::AtLeast(n)
            } else {
                QuantifierKind::Range(n, self.parse_number()?)
            }
        } else {
            QuantifierKind::Exact(n)
        };
        (self.advance() == Some('}')).then_some(kind)
    }

    fn parse_number(&mut self) -> Option<usize> {
        let start = self.pos;
        while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
            self.advance();
        }
        if start == self.pos {
            return None;
        }
        let digits: String = self.chars[start..self.pos].iter().collect();
        // Too many digits for usize is still a number, just an oversized one.
        Some(digits.parse::<usize>().unwrap_or(usize::MAX))
    }

    /// Parse a single atom (literal, class, group, anchor, etc.)
    fn parse_atom(&mut self) -> Result<AstNode> {
        match self.peek() {
            None => Err(ParseError::UnexpectedEnd {
                expected: ')',
                pos: self.pos,
            }),
            Some('(') => self.parse_group(),
            Some('[') => self.parse_char_class(),
            Some('*' | '+' | '?') => Err(ParseError::NothingToRepeat { pos: self.pos }),
            Some('.') => {
                self.advance();
                Ok(AstNode::Dot)
            }
            Some('^') => {
                self.advance();
                Ok(AstNode::Anchor(AnchorKind::Start))
            }
            Some('$') => {
                self.advance();
                Ok(AstNode::Anchor(AnchorKind::End))
            }
            Some('\\') => self.parse_escape(),
            Some(ch) => {
                self.advance();
                Ok(AstNode::Literal(ch))
            }
        }
    }

    /// Parse an escape sequence.
    fn parse_escape(&mut self) -> Result<AstNode> {
        self.advance(); // consume '\\'
        match self.advance() {
            None => Err(ParseError::DanglingEscape),
            Some('d') => Ok(AstNode::ShorthandClass(ShorthandKind::Digit)),
            Some('D') => Ok(AstNode::ShorthandClass(ShorthandKind::NonDigit)),
            Some('w') => Ok(AstNode::ShorthandClass(ShorthandKind::Word)),
            Some('W') => Ok(AstNode::ShorthandClass(ShorthandKind::NonWord)),
            Some('s') => Ok(AstNode::ShorthandClass(ShorthandKind::Space)),
            Some('S') => Ok(AstNode::ShorthandClass(ShorthandKind::NonSpace)),
            Some('b') => Ok(AstNode::Anchor(AnchorKind::WordBoundary)),
            Some('B') => Ok(AstNode::Anchor(AnchorKind::NonWordBoundary)),
            Some(ch @ '1'..='9') => Ok(AstNode::Backreference(ch as usize - '0' as usize)),
            Some(ch) => Ok(AstNode::Literal(escaped_literal(ch))),
        }
    }

    /// Parse a group: `(...)`, `(?:...)`, `(?=...)`, `(?!...)`, `(?<=...)`, `(?<!...)`.
    fn parse_group(&mut self) -> Result<AstNode> {
        self.advance(); // consume '('

        if self.peek() != Some('?') {
            self.group_count += 1;
            let index = self.group_count;
            let node = self.parse_disjunction()?.map(Box::new);
            self.expect(')')?;
            return Ok(AstNode::Group { index, node });
        }

        self.advance(); // consume '?'
        let lookaround = match (self.advance(), self.peek()) {
            (Some(':'), _) => None,
            (Some('='), _) => Some(LookaroundKind::Ahead { positive: true }),
            (Some('!'), _) => Some(LookaroundKind::Ahead { positive: false }),
            (Some('<'), Some('=')) => {
                self.advance();
                Some(LookaroundKind::Behind { positive: true })
            }
            (Some('<'), Some('!')) => {
                self.advance();
                Some(LookaroundKind::Behind { positive: false })
            }
            _ => return Err(ParseError::InvalidGroup { pos: self.pos }),
        };
        let node = self.parse_disjunction()?.map(Box::new);
        self.expect(')')?;
        Ok(match lookaround {
            None => AstNode::NonCapturingGroup { node },
            Some(kind) => AstNode::Lookaround { node, kind },
        })
    }

    /// Parse a character class: `[abc]`, `[a-z]`, `[^abc]`.
    fn parse_char_class(&mut self) -> Result<AstNode> {
        let start = self.pos;
        self.advance(); // consume '['
        let negated = if self.peek() == Some('^') {
            self.advance();
            true
        } else {
            false
        };

        let mut items = Vec::new();
        // Allow ']' as first character in class
        if self.peek() == Some(']') {
            self.advance();
            items.push(ClassItem::Literal(']'));
        }

        while self.peek() != Some(']') {
            let item = match self.class_atom(start)? {
                ClassItem::Literal(from) if self.at_range_dash() => {
                    self.advance(); // consume '-'
                    match self.class_atom(start)? {
                        ClassItem::Literal(to) if to < from => {
                            return Err(ParseError::ReversedRange { from, to });
                        }
                        ClassItem::Literal(to) => ClassItem::Range(from, to),
                        // `[a-\d]` keeps the dash literal
                        shorthand => {
                            items.push(ClassItem::Literal(from));
                            items.push(ClassItem::Literal('-'));
                            shorthand
                        }
                    }
                }
                item => item,
            };
            items.push(item);
        }
        self.advance(); // consume ']'
        Ok(AstNode::CharClass { items, negated })
    }

    fn at_range_dash(&self) -> bool {
        self.peek() == Some('-') && self.chars.get(self.pos + 1).is_some_and(|&c| c != ']')
    }

    fn class_atom(&mut self, class_start: usize) -> Result<ClassItem> {
        match self.advance() {
            None => Err(ParseError::UnterminatedClass { pos: class_start }),
            Some('\\') => match self.advance() {
                None => Err(ParseError::UnterminatedClass { pos: class_start }),
                Some('d') => Ok(ClassItem::Shorthand(ShorthandKind::Digit)),
                Some('D') => Ok(ClassItem::Shorthand(ShorthandKind::NonDigit)),
                Some('w') => Ok(ClassItem::Shorthand(ShorthandKind::Word)),
                Some('W') => Ok(ClassItem::Shorthand(ShorthandKind::NonWord)),
                Some('s') => Ok(ClassItem::Shorthand(ShorthandKind::Space)),
                Some('S') => Ok(ClassItem::Shorthand(ShorthandKind::NonSpace)),
                Some('b') => Ok(ClassItem::Literal('\u{8}')),
                Some(ch) => Ok(ClassItem::Literal(escaped_literal(ch))),
            },
            Some(ch) => Ok(ClassItem::Literal(ch)),
        }
    }
}

fn escaped_literal(ch: char) -> char {
    match ch {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'f' => '\u{c}',
        'v' => '\u{b}',
        '0' => '\0',
        other => other,
    }
}

/// Strip the `/body/flags` literal form down to `body`.
fn strip_delimiters(pattern: &str) -> &str {
    let Some(rest) = pattern.strip_prefix('/') else {
        return pattern;
    };
    match rest.rfind('/') {
        Some(end) if rest[end + 1..].chars().all(|c| c.is_ascii_alphabetic()) => &rest[..end],
        _ => pattern,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(ch: char) -> AstNode {
        AstNode::Literal(ch)
    }

    #[test]
    fn parses_literal_form_and_bare_form_alike() {
        assert_eq!(parse("/ab/").unwrap(), parse("ab").unwrap());
        assert_eq!(parse("/ab/gi").unwrap(), parse("ab").unwrap());
        assert_eq!(
            parse("/ab").unwrap().body,
            Some(AstNode::Concat(vec![lit('/'), lit('a'), lit('b')]))
        );
    }

    #[test]
    fn disjunction_nests_to_the_left() {
        let pattern = parse("a|b|c").unwrap();
        let expected = AstNode::Disjunction {
            left: Some(Box::new(AstNode::Disjunction {
                left: Some(Box::new(lit('a'))),
                right: Some(Box::new(lit('b'))),
            })),
            right: Some(Box::new(lit('c'))),
        };
        assert_eq!(pattern.body, Some(expected));
    }

    #[test]
    fn empty_alternative_is_absent() {
        let pattern = parse("a|").unwrap();
        assert_eq!(
            pattern.body,
            Some(AstNode::Disjunction {
                left: Some(Box::new(lit('a'))),
                right: None,
            })
        );
        assert_eq!(parse("").unwrap().body, None);
    }

    #[test]
    fn groups_are_numbered_by_opening_paren() {
        let pattern = parse("((a)(b))").unwrap();
        assert_eq!(pattern.group_count, 3);
        let Some(AstNode::Group { index, node }) = pattern.body else {
            panic!("expected group");
        };
        assert_eq!(index, 1);
        let Some(AstNode::Concat(children)) = node.map(|n| *n) else {
            panic!("expected concat");
        };
        assert!(matches!(children[0], AstNode::Group { index: 2, .. }));
        assert!(matches!(children[1], AstNode::Group { index: 3, .. }));
    }

    #[test]
    fn quantifiers() {
        let pattern = parse("a{2,3}?").unwrap();
        assert_eq!(
            pattern.body,
            Some(AstNode::Repetition {
                node: Box::new(lit('a')),
                kind: QuantifierKind::Range(2, 3),
                greedy: false,
            })
        );
        assert_eq!(QuantifierKind::Plus.bounds(), (1, None));
        assert!(parse("a*").unwrap().is_unbounded());
        assert!(!parse("a{1,4}").unwrap().is_unbounded());
    }

    #[test]
    fn bounds_up_to_the_cap_are_accepted() {
        let pattern = parse("a{1000}").unwrap();
        assert!(matches!(
            pattern.body,
            Some(AstNode::Repetition {
                kind: QuantifierKind::Exact(MAX_REPEAT),
                ..
            })
        ));
    }

    #[test]
    fn brace_that_is_not_a_quantifier_is_literal() {
        let pattern = parse("a{x}").unwrap();
        assert_eq!(
            pattern.body,
            Some(AstNode::Concat(vec![lit('a'), lit('{'), lit('x'), lit('}')]))
        );
    }

    #[test]
    fn character_classes() {
        let pattern = parse("[^a-c\\]x-]").unwrap();
        assert_eq!(
            pattern.body,
            Some(AstNode::CharClass {
                items: vec![
                    ClassItem::Range('a', 'c'),
                    ClassItem::Literal(']'),
                    ClassItem::Literal('x'),
                    ClassItem::Literal('-'),
                ],
                negated: true,
            })
        );
    }

    #[test]
    fn lookarounds_and_backreferences() {
        let pattern = parse("(?<=a)\\1(?:b)").unwrap();
        let Some(AstNode::Concat(children)) = pattern.body else {
            panic!("expected concat");
        };
        assert!(matches!(
            children[0],
            AstNode::Lookaround {
                kind: LookaroundKind::Behind { positive: true },
                ..
            }
        ));
        assert_eq!(children[1], AstNode::Backreference(1));
        assert!(matches!(children[2], AstNode::NonCapturingGroup { .. }));
    }

    #[test]
    fn errors() {
        assert_eq!(
            parse("(ab"),
            Err(ParseError::UnexpectedEnd { expected: ')', pos: 3 })
        );
        assert_eq!(parse("ab)"), Err(ParseError::UnexpectedChar { ch: ')', pos: 2 }));
        assert_eq!(parse("*a"), Err(ParseError::NothingToRepeat { pos: 0 }));
        assert_eq!(parse("[ab"), Err(ParseError::UnterminatedClass { pos: 0 }));
        assert_eq!(parse("[z-a]"), Err(ParseError::ReversedRange { from: 'z', to: 'a' }));
        assert_eq!(parse("a{3,1}"), Err(ParseError::ReversedBounds { min: 3, max: 1 }));
        assert_eq!(
            parse("a{100000000000}"),
            Err(ParseError::BoundTooLarge { bound: 100_000_000_000, pos: 1 })
        );
        assert_eq!(
            parse("ab{2,1001}"),
            Err(ParseError::BoundTooLarge { bound: 1001, pos: 2 })
        );
        assert_eq!(
            parse("a{99999999999999999999999,}"),
            Err(ParseError::BoundTooLarge { bound: usize::MAX, pos: 1 })
        );
        assert_eq!(parse("a\\"), Err(ParseError::DanglingEscape));
        assert_eq!(parse("(?x)"), Err(ParseError::InvalidGroup { pos: 3 }));
    }
}
