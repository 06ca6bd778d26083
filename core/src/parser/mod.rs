pub mod error;
#[allow(clippy::module_inception)]
pub mod parser;

pub use error::{ParseError, ParseErrorKind};
pub use parser::Parser;

use crate::{String, Vec, ast::Program, lexer::Lexer};
use alloc::string::ToString;
use bumpalo::Bump;

/// Result of parsing a source text.
///
/// The tree is always produced; when `errors` is non-empty it may be missing
/// the statements that failed to parse and must not be trusted.
#[derive(Debug)]
pub struct ParsedProgram<'a> {
    pub program: &'a Program<'a>,
    pub errors: Vec<ParseError>,
}

impl<'a> ParsedProgram<'a> {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Human-readable parse error messages, in detection order.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }
}

/// Parse source text into a program tree allocated in `arena`.
pub fn parse<'a>(arena: &'a Bump, source: &str) -> ParsedProgram<'a> {
    let mut parser = Parser::new(arena, Lexer::new(source));
    let program = parser.parse_program();
    ParsedProgram {
        program,
        errors: parser.into_errors(),
    }
}
