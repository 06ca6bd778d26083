//! Lexer, parser and tree-walking evaluator for the Monkey language.
//!
//! The pipeline is `source -> lexer -> parser -> ast -> evaluator -> object`.
//! Syntax trees live in a `bumpalo` arena; runtime values are reference
//! counted and may outlive the evaluation that produced them as long as the
//! arena does.

extern crate alloc;

// Re-export for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use alloc::{boxed::Box, format, string::String, string::ToString, vec, vec::Vec};

pub mod api;
pub mod ast;
pub mod builtins;
pub mod evaluator;
pub mod lexer;
pub mod object;
pub mod parser;
