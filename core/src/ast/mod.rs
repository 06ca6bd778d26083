//! Syntax tree produced by the parser.
//!
//! All nodes are allocated in a [`bumpalo::Bump`] arena and refer to each
//! other through `&'a` references, so a whole tree is freed at once with its
//! arena. Every node implements `Display`, rendering the canonical
//! fully-parenthesized form used in tests and diagnostics.

use core::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Program<'a> {
    pub statements: &'a [Statement<'a>],
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block<'a> {
    pub statements: &'a [Statement<'a>],
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
    Let {
        name: &'a str,
        value: &'a Expr<'a>,
    },
    Return(&'a Expr<'a>),
    For(ForLoop<'a>),
    Expression(&'a Expr<'a>),
    Block(&'a Block<'a>),
}

/// `for (init; condition; step) body`; every header clause is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop<'a> {
    pub init: Option<&'a Statement<'a>>,
    pub condition: Option<&'a Expr<'a>>,
    pub step: Option<&'a Expr<'a>>,
    pub body: &'a Block<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    Ident(&'a str),
    Integer(i64),
    Str(&'a str),
    Boolean(bool),
    Prefix {
        op: PrefixOp,
        right: &'a Expr<'a>,
    },
    Infix {
        op: InfixOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Call {
        function: &'a Expr<'a>,
        args: &'a [&'a Expr<'a>],
    },
    Index {
        left: &'a Expr<'a>,
        index: &'a Expr<'a>,
    },
    Array(&'a [&'a Expr<'a>]),
    // Pairs are kept in source order.
    Hash(&'a [(&'a Expr<'a>, &'a Expr<'a>)]),
    Function {
        params: &'a [Parameter<'a>],
        body: &'a Block<'a>,
    },
    If {
        clauses: &'a [IfClause<'a>],
        alternative: Option<&'a Block<'a>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter<'a> {
    pub name: &'a str,
    pub variadic: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfClause<'a> {
    pub condition: &'a Expr<'a>,
    pub consequence: &'a Block<'a>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrefixOp {
    Neg,
    Not,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InfixOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
    Eq,
    NotEq,
}

impl PrefixOp {
    pub fn symbol(self) -> &'static str {
        match self {
            PrefixOp::Neg => "-",
            PrefixOp::Not => "!",
        }
    }
}

impl InfixOp {
    pub fn symbol(self) -> &'static str {
        match self {
            InfixOp::Assign => "=",
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Lt => "<",
            InfixOp::Gt => ">",
            InfixOp::Eq => "==",
            InfixOp::NotEq => "!=",
        }
    }
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ============================================================================
// Display
// ============================================================================

fn write_separated<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
    separator: &str,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Program<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

impl fmt::Display for Block<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{ }");
        }
        f.write_str("{ ")?;
        write_separated(f, self.statements, " ")?;
        f.write_str(" }")
    }
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {} = {};", name, value),
            Statement::Return(value) => write!(f, "return {};", value),
            Statement::For(for_loop) => write!(f, "{}", for_loop),
            Statement::Expression(expr) => write!(f, "{}", expr),
            Statement::Block(block) => write!(f, "{}", block),
        }
    }
}

impl fmt::Display for ForLoop<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("for (")?;
        if let Some(init) = self.init {
            // Let statements already end with `;`.
            match init {
                Statement::Let { .. } => write!(f, "{} ", init)?,
                _ => write!(f, "{}; ", init)?,
            }
        } else {
            f.write_str("; ")?;
        }
        if let Some(condition) = self.condition {
            write!(f, "{}", condition)?;
        }
        f.write_str("; ")?;
        if let Some(step) = self.step {
            write!(f, "{}", step)?;
        }
        write!(f, ") {}", self.body)
    }
}

impl fmt::Display for Parameter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.variadic {
            f.write_str("...")?;
        }
        f.write_str(self.name)
    }
}

impl fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(name) => f.write_str(name),
            Expr::Integer(value) => write!(f, "{}", value),
            Expr::Str(value) => write!(f, "{:?}", value),
            Expr::Boolean(value) => write!(f, "{}", value),
            Expr::Prefix { op, right } => write!(f, "({}{})", op, right),
            Expr::Infix { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Expr::Call { function, args } => {
                write!(f, "{}(", function)?;
                write_separated(f, args.iter(), ", ")?;
                f.write_str(")")
            }
            Expr::Index { left, index } => write!(f, "({}[{}])", left, index),
            Expr::Array(elements) => {
                f.write_str("[")?;
                write_separated(f, elements.iter(), ", ")?;
                f.write_str("]")
            }
            Expr::Hash(pairs) => {
                f.write_str("{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
            Expr::Function { params, body } => {
                f.write_str("fn(")?;
                write_separated(f, params.iter(), ", ")?;
                write!(f, ") {}", body)
            }
            Expr::If {
                clauses,
                alternative,
            } => {
                for (i, clause) in clauses.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" else ")?;
                    }
                    write!(f, "if ({}) {}", clause.condition, clause.consequence)?;
                }
                if let Some(alternative) = alternative {
                    write!(f, " else {}", alternative)?;
                }
                Ok(())
            }
        }
    }
}
