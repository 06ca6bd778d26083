//! Precedence-climbing (Pratt) parser.
//!
//! Every token kind may have a prefix rule (how to start an expression with
//! it) and an infix rule (how to extend an already-parsed left expression when
//! it follows). Infix parsing continues while the next operator binds tighter
//! than the precedence the current call was entered with.

use bumpalo::Bump;
use core::mem;
use tracing::{debug, trace};

use crate::{
    Vec,
    ast::{Block, Expr, ForLoop, IfClause, InfixOp, Parameter, PrefixOp, Program, Statement},
    lexer::{Lexer, Span, Token, TokenKind},
    parser::error::{ParseError, ParseErrorKind},
};

/// Binding precedence of operators, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    Lowest,
    Assign,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

impl Precedence {
    pub(crate) fn of(kind: TokenKind) -> Precedence {
        match kind {
            TokenKind::Assign => Precedence::Assign,
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
            TokenKind::LParen => Precedence::Call,
            TokenKind::LBracket => Precedence::Index,
            _ => Precedence::Lowest,
        }
    }
}

type PrefixParseFn<'s, 'a> = fn(&mut Parser<'s, 'a>) -> Option<&'a Expr<'a>>;

/// How a token extends an already-parsed left expression.
#[derive(Debug, Clone, Copy)]
enum InfixRule {
    Binary(InfixOp),
    Call,
    Index,
}

pub struct Parser<'s, 'a> {
    arena: &'a Bump,
    lexer: Lexer<'s>,
    cur: Token<'s>,
    peek: Token<'s>,
    errors: Vec<ParseError>,
}

impl<'s, 'a> Parser<'s, 'a> {
    pub fn new(arena: &'a Bump, mut lexer: Lexer<'s>) -> Self {
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            arena,
            lexer,
            cur,
            peek,
            errors: Vec::new(),
        }
    }

    /// Errors collected so far, in the order they were detected.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Parse statements until end of input.
    ///
    /// Never fails: statements that could not be parsed are dropped and an
    /// error is recorded for each detected mismatch.
    pub fn parse_program(&mut self) -> &'a Program<'a> {
        let mut statements = Vec::new();
        while !self.cur_is(TokenKind::Eof) {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.next_token();
        }
        debug!(
            statements = statements.len(),
            errors = self.errors.len(),
            "Parsed program"
        );
        let statements = self.arena.alloc_slice_fill_iter(statements);
        self.arena.alloc(Program { statements })
    }

    // ------------------------------------------------------------------
    // Token cursor
    // ------------------------------------------------------------------

    fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.cur = mem::replace(&mut self.peek, next);
    }

    fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur.is(kind)
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// Advance if the next token has the given kind, else record an error.
    fn expect_peek(&mut self, kind: TokenKind) -> Option<()> {
        if self.peek_is(kind) {
            self.next_token();
            Some(())
        } else {
            self.error(
                ParseErrorKind::UnexpectedToken {
                    expected: kind,
                    found: self.peek.kind,
                },
                self.peek.span.clone(),
            );
            None
        }
    }

    fn error(&mut self, kind: ParseErrorKind, span: Span) {
        trace!(error = %kind, "Parse error");
        self.errors.push(ParseError::new(kind, span));
    }

    fn alloc(&self, expr: Expr<'a>) -> &'a Expr<'a> {
        self.arena.alloc(expr)
    }

    fn alloc_name(&self) -> &'a str {
        self.arena.alloc_str(&self.cur.literal)
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn parse_statement(&mut self) -> Option<Statement<'a>> {
        match self.cur.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::LBrace if self.starts_block() => {
                Some(Statement::Block(self.parse_block()))
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// Whether a `{` in statement position opens a block rather than a hash.
    ///
    /// Only `let`, `return`, `for` or `}` after the brace mark a block, so a
    /// block that starts with an expression statement, like `{ x = 2; }`, is
    /// read as a hash literal and fails to parse.
    fn starts_block(&self) -> bool {
        matches!(
            self.peek.kind,
            TokenKind::Let | TokenKind::Return | TokenKind::For | TokenKind::RBrace
        )
    }

    fn parse_let_statement(&mut self) -> Option<Statement<'a>> {
        self.expect_peek(TokenKind::Ident)?;
        let name = self.alloc_name();
        self.expect_peek(TokenKind::Assign)?;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
        Some(Statement::Let { name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Statement<'a>> {
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
        Some(Statement::Return(value))
    }

    fn parse_for_statement(&mut self) -> Option<Statement<'a>> {
        self.expect_peek(TokenKind::LParen)?;
        self.next_token();

        let mut init = None;
        if !self.cur_is(TokenKind::Semicolon) {
            let statement = self.parse_statement()?;
            if !self.cur_is(TokenKind::Semicolon) {
                self.error(
                    ParseErrorKind::MissingLoopSemicolon {
                        found: self.cur.kind,
                    },
                    self.cur.span.clone(),
                );
                return None;
            }
            init = Some(&*self.arena.alloc(statement));
        }
        self.next_token();

        let mut condition = None;
        if !self.cur_is(TokenKind::Semicolon) {
            condition = Some(self.parse_expression(Precedence::Lowest)?);
            self.expect_peek(TokenKind::Semicolon)?;
        }
        self.next_token();

        let mut step = None;
        if !self.cur_is(TokenKind::RParen) {
            step = Some(self.parse_expression(Precedence::Lowest)?);
            self.expect_peek(TokenKind::RParen)?;
        }
        self.next_token();

        let body = self.parse_body();
        Some(Statement::For(ForLoop {
            init,
            condition,
            step,
            body,
        }))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement<'a>> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
        Some(Statement::Expression(expr))
    }

    /// Parse `{ statements }`; the current token must be `{`.
    fn parse_block(&mut self) -> &'a Block<'a> {
        let mut statements = Vec::new();
        self.next_token();

        while !self.cur_is(TokenKind::RBrace) && !self.cur_is(TokenKind::Eof) {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.next_token();
        }

        if self.cur_is(TokenKind::Eof) {
            self.error(ParseErrorKind::UnclosedBlock, self.cur.span.clone());
        }

        let statements = self.arena.alloc_slice_fill_iter(statements);
        self.arena.alloc(Block { statements })
    }

    /// Body of an `if` clause, `else` branch or loop: a braced block or a
    /// single statement.
    fn parse_body(&mut self) -> &'a Block<'a> {
        if self.cur_is(TokenKind::LBrace) {
            return self.parse_block();
        }
        let statements: &'a [Statement<'a>] = match self.parse_statement() {
            Some(statement) => core::slice::from_ref(self.arena.alloc(statement)),
            None => &[],
        };
        self.arena.alloc(Block { statements })
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    fn prefix_rule(kind: TokenKind) -> Option<PrefixParseFn<'s, 'a>> {
        let rule: PrefixParseFn<'s, 'a> = match kind {
            TokenKind::Ident => Self::parse_identifier,
            TokenKind::Int => Self::parse_integer_literal,
            TokenKind::String => Self::parse_string_literal,
            TokenKind::True | TokenKind::False => Self::parse_boolean,
            TokenKind::Bang | TokenKind::Minus => Self::parse_prefix_expression,
            TokenKind::LParen => Self::parse_grouped_expression,
            TokenKind::LBracket => Self::parse_array_literal,
            TokenKind::LBrace => Self::parse_hash_literal,
            TokenKind::If => Self::parse_if_expression,
            TokenKind::Function => Self::parse_function_literal,
            _ => return None,
        };
        Some(rule)
    }

    fn infix_rule(kind: TokenKind) -> Option<InfixRule> {
        let op = match kind {
            TokenKind::Assign => InfixOp::Assign,
            TokenKind::Plus => InfixOp::Add,
            TokenKind::Minus => InfixOp::Sub,
            TokenKind::Asterisk => InfixOp::Mul,
            TokenKind::Slash => InfixOp::Div,
            TokenKind::Lt => InfixOp::Lt,
            TokenKind::Gt => InfixOp::Gt,
            TokenKind::Eq => InfixOp::Eq,
            TokenKind::NotEq => InfixOp::NotEq,
            TokenKind::LParen => return Some(InfixRule::Call),
            TokenKind::LBracket => return Some(InfixRule::Index),
            _ => return None,
        };
        Some(InfixRule::Binary(op))
    }

    pub(crate) fn parse_expression(&mut self, precedence: Precedence) -> Option<&'a Expr<'a>> {
        let Some(prefix) = Self::prefix_rule(self.cur.kind) else {
            self.error(
                ParseErrorKind::NoPrefixRule {
                    found: self.cur.kind,
                },
                self.cur.span.clone(),
            );
            return None;
        };
        let mut left = prefix(self)?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < Precedence::of(self.peek.kind) {
            let Some(rule) = Self::infix_rule(self.peek.kind) else {
                return Some(left);
            };
            self.next_token();
            left = match rule {
                InfixRule::Binary(op) => self.parse_infix_expression(op, left)?,
                InfixRule::Call => self.parse_call_expression(left)?,
                InfixRule::Index => self.parse_index_expression(left)?,
            };
        }

        Some(left)
    }

    fn parse_identifier(&mut self) -> Option<&'a Expr<'a>> {
        let name = self.alloc_name();
        Some(self.alloc(Expr::Ident(name)))
    }

    fn parse_integer_literal(&mut self) -> Option<&'a Expr<'a>> {
        match self.cur.literal.parse::<i64>() {
            Ok(value) => Some(self.alloc(Expr::Integer(value))),
            Err(_) => {
                let text = self.cur.literal.clone().into_owned();
                self.error(ParseErrorKind::InvalidInteger { text }, self.cur.span.clone());
                None
            }
        }
    }

    fn parse_string_literal(&mut self) -> Option<&'a Expr<'a>> {
        let value = self.arena.alloc_str(&self.cur.literal);
        Some(self.alloc(Expr::Str(value)))
    }

    fn parse_boolean(&mut self) -> Option<&'a Expr<'a>> {
        Some(self.alloc(Expr::Boolean(self.cur_is(TokenKind::True))))
    }

    fn parse_prefix_expression(&mut self) -> Option<&'a Expr<'a>> {
        let op = if self.cur_is(TokenKind::Bang) {
            PrefixOp::Not
        } else {
            PrefixOp::Neg
        };
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(self.alloc(Expr::Prefix { op, right }))
    }

    /// The current token is the operator `op`.
    fn parse_infix_expression(&mut self, op: InfixOp, left: &'a Expr<'a>) -> Option<&'a Expr<'a>> {
        // Assignment is right-associative: `a = b = 1` is `a = (b = 1)`.
        let precedence = match op {
            InfixOp::Assign => Precedence::Lowest,
            _ => Precedence::of(self.cur.kind),
        };
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Some(self.alloc(Expr::Infix { op, left, right }))
    }

    fn parse_grouped_expression(&mut self) -> Option<&'a Expr<'a>> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Some(expr)
    }

    fn parse_array_literal(&mut self) -> Option<&'a Expr<'a>> {
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Some(self.alloc(Expr::Array(elements)))
    }

    fn parse_hash_literal(&mut self) -> Option<&'a Expr<'a>> {
        let mut pairs = Vec::new();

        while !self.peek_is(TokenKind::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;
            self.expect_peek(TokenKind::Colon)?;
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            if self.peek_is(TokenKind::Comma) {
                self.next_token();
            } else if !self.peek_is(TokenKind::RBrace) {
                self.error(
                    ParseErrorKind::MissingPairSeparator {
                        found: self.peek.kind,
                    },
                    self.peek.span.clone(),
                );
                return None;
            }
        }
        self.expect_peek(TokenKind::RBrace)?;

        let pairs = self.arena.alloc_slice_copy(&pairs);
        Some(self.alloc(Expr::Hash(pairs)))
    }

    fn parse_if_expression(&mut self) -> Option<&'a Expr<'a>> {
        let mut clauses = Vec::new();
        clauses.push(self.parse_if_clause()?);

        let mut alternative = None;
        while self.peek_is(TokenKind::Else) {
            self.next_token();
            if self.peek_is(TokenKind::If) {
                self.next_token();
                clauses.push(self.parse_if_clause()?);
            } else {
                self.next_token();
                alternative = Some(self.parse_body());
                break;
            }
        }

        let clauses = self.arena.alloc_slice_fill_iter(clauses);
        Some(self.alloc(Expr::If {
            clauses,
            alternative,
        }))
    }

    /// `(condition) body`; the current token must be `if`.
    fn parse_if_clause(&mut self) -> Option<IfClause<'a>> {
        self.expect_peek(TokenKind::LParen)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        self.next_token();
        let consequence = self.parse_body();
        Some(IfClause {
            condition,
            consequence,
        })
    }

    fn parse_function_literal(&mut self) -> Option<&'a Expr<'a>> {
        self.expect_peek(TokenKind::LParen)?;
        let params = self.parse_function_parameters()?;
        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block();
        Some(self.alloc(Expr::Function { params, body }))
    }

    fn parse_function_parameters(&mut self) -> Option<&'a [Parameter<'a>]> {
        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(&[]);
        }

        // Placement of a variadic parameter is checked when the function
        // value is created, not here.
        let mut params = Vec::new();
        loop {
            self.next_token();
            params.push(self.parse_function_parameter()?);
            if !self.peek_is(TokenKind::Comma) {
                break;
            }
            self.next_token();
        }
        self.expect_peek(TokenKind::RParen)?;

        Some(self.arena.alloc_slice_copy(&params))
    }

    fn parse_function_parameter(&mut self) -> Option<Parameter<'a>> {
        let variadic = self.cur_is(TokenKind::Ellipsis);
        if variadic {
            self.next_token();
        }
        if !self.cur_is(TokenKind::Ident) {
            self.error(
                ParseErrorKind::UnexpectedToken {
                    expected: TokenKind::Ident,
                    found: self.cur.kind,
                },
                self.cur.span.clone(),
            );
            return None;
        }
        Some(Parameter {
            name: self.alloc_name(),
            variadic,
        })
    }

    fn parse_call_expression(&mut self, function: &'a Expr<'a>) -> Option<&'a Expr<'a>> {
        let args = self.parse_expression_list(TokenKind::RParen)?;
        Some(self.alloc(Expr::Call { function, args }))
    }

    fn parse_index_expression(&mut self, left: &'a Expr<'a>) -> Option<&'a Expr<'a>> {
        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RBracket)?;
        Some(self.alloc(Expr::Index { left, index }))
    }

    /// Comma-separated expressions up to `end`; the current token is the
    /// opening delimiter.
    fn parse_expression_list(&mut self, end: TokenKind) -> Option<&'a [&'a Expr<'a>]> {
        if self.peek_is(end) {
            self.next_token();
            return Some(&[]);
        }

        let mut items = Vec::new();
        self.next_token();
        items.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            items.push(self.parse_expression(Precedence::Lowest)?);
        }
        self.expect_peek(end)?;

        Some(self.arena.alloc_slice_copy(&items))
    }
}
