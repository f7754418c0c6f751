use thiserror::Error;

/// Errors raised while turning pattern text into a syntax tree.
///
/// Positions are character offsets into the pattern body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("expected '{expected}' at position {pos}, got end of pattern")]
    UnexpectedEnd { expected: char, pos: usize },
    #[error("nothing to repeat at position {pos}")]
    NothingToRepeat { pos: usize },
    #[error("pattern ends with a dangling '\\'")]
    DanglingEscape,
    #[error("invalid group syntax after '(?' at position {pos}")]
    InvalidGroup { pos: usize },
    #[error("unterminated character class starting at position {pos}")]
    UnterminatedClass { pos: usize },
    #[error("character class range {from}-{to} is out of order")]
    ReversedRange { from: char, to: char },
    #[error("repetition bounds {{{min},{max}}} are out of order")]
    ReversedBounds { min: usize, max: usize },
    #[error("repetition bound {bound} at position {pos} exceeds the limit of {}", crate::parser::MAX_REPEAT)]
    BoundTooLarge { bound: usize, pos: usize },
}

pub type Result<T> = std::result::Result<T, ParseError>;
