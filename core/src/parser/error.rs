use core::fmt;

use crate::String;
use crate::lexer::{Span, TokenKind};

/// Parser error with the location it was detected at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

/// Specific kinds of parse errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The next token did not have the required kind.
    UnexpectedToken { expected: TokenKind, found: TokenKind },
    /// No expression can start with this token.
    NoPrefixRule { found: TokenKind },
    /// End of input reached inside a `{ ... }` block.
    UnclosedBlock,
    /// Integer literal does not fit in 64 bits.
    InvalidInteger { text: String },
    /// For-loop initializer not followed by `;`.
    MissingLoopSemicolon { found: TokenKind },
    /// Hash literal pair followed by something other than `,` or `}`.
    MissingPairSeparator { found: TokenKind },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnexpectedToken { expected, found } => write!(
                f,
                "expected next token to be {}, got {} instead",
                expected, found
            ),
            ParseErrorKind::NoPrefixRule { found } => {
                write!(f, "no prefix parse function for {} found", found)
            }
            ParseErrorKind::UnclosedBlock => {
                write!(f, "block statement not closed by {}", TokenKind::RBrace)
            }
            ParseErrorKind::InvalidInteger { text } => {
                write!(f, "could not parse {:?} as integer", text)
            }
            ParseErrorKind::MissingLoopSemicolon { found } => write!(
                f,
                "no semicolon after for loop initialization, found {}",
                found
            ),
            ParseErrorKind::MissingPairSeparator { found } => write!(
                f,
                "expected next token to be {} or {}, got {} instead",
                TokenKind::RBrace,
                TokenKind::Comma,
                found
            ),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for ParseError {}
