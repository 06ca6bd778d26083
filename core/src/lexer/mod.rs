//! Lexical analysis.
//!
//! [`Lexer`] turns source text into a lazy, forward-only stream of
//! [`Token`]s. Matching is done by a [`logos`]-derived automaton over
//! [`TokenKind`]; this wrapper adds string unescaping, the `ILLEGAL` token for
//! unmatched input, and a sticky end-of-input token.

mod token;


pub use token::{Span, Token, TokenKind};

use crate::String;
use alloc::borrow::Cow;
use logos::Logos;

pub struct Lexer<'s> {
    source: &'s str,
    inner: logos::Lexer<'s, TokenKind>,
    finished: bool,
}

impl<'s> Lexer<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            inner: TokenKind::lexer(source),
            finished: false,
        }
    }

    /// Consume and return exactly one token.
    ///
    /// Once the input is exhausted every further call returns an `EOF` token.
    pub fn next_token(&mut self) -> Token<'s> {
        if self.finished {
            return Token::eof(self.source.len());
        }

        let Some(result) = self.inner.next() else {
            self.finished = true;
            return Token::eof(self.source.len());
        };

        let span = Span::from(self.inner.span());
        let slice = self.inner.slice();

        match result {
            Ok(TokenKind::String) => {
                let contents = &slice[1..slice.len() - 1];
                Token::new(TokenKind::String, unescape(contents), span)
            }
            Ok(kind) => Token::new(kind, slice, span),
            Err(()) if slice.starts_with('"') => {
                // Unterminated string literal: nothing after the opening quote
                // can be lexed meaningfully.
                self.finished = true;
                let rest = &self.source[span.0.start..];
                Token::new(
                    TokenKind::Illegal,
                    rest,
                    Span::new(span.0.start, self.source.len()),
                )
            }
            Err(()) => Token::new(TokenKind::Illegal, slice, span),
        }
    }
}

impl<'s> Iterator for Lexer<'s> {
    type Item = Token<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.is(TokenKind::Eof) {
            None
        } else {
            Some(token)
        }
    }
}

/// Resolve backslash escapes in the body of a string literal.
///
/// Recognized escapes are `\t`, `\n`, `\r`, `\"` and `\\`; any other escape
/// is kept verbatim.
fn unescape(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}
