//! Core evaluation logic.

use alloc::rc::Rc;

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    ToString,
    api::ExecutionOptions,
    ast::{Block, Expr, ForLoop, IfClause, InfixOp, Parameter, Program, Statement},
    builtins,
    evaluator::{
        ResourceExceededError::*,
        RuntimeError::{self, *},
        Unwind,
        operators::{eval_infix, eval_prefix},
    },
    object::{Environment, Function, HashPair, Object},
};

/// Outcome of evaluating one node.
///
/// `Ok(None)` is the empty value produced by `let`, `for`, empty blocks and
/// calls or `if`s whose taken branch produced nothing.
type Eval<'a> = Result<Option<Object<'a>>, Unwind<'a>>;

type Args<'a> = SmallVec<[Object<'a>; 4]>;

/// Remaining stack below which evaluation switches to a fresh segment.
const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each extra stack segment.
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// Tree-walking evaluator.
///
/// Holds no program state besides the current call depth; all bindings live
/// in the [`Environment`] chain passed in.
pub struct Evaluator {
    options: ExecutionOptions,
    depth: usize,
}

impl Evaluator {
    pub fn new(options: ExecutionOptions) -> Self {
        Self { options, depth: 0 }
    }

    /// Evaluate every statement of `program` in `env`.
    ///
    /// Returns the value of the last statement (`null` when it produced no
    /// value), the operand of a top-level `return`, or an [`Object::Error`].
    pub fn eval_program<'a>(&mut self, program: &'a Program<'a>, env: &Environment<'a>) -> Object<'a> {
        match self.eval_statements(program.statements, env) {
            Ok(value) => value.unwrap_or(Object::Null),
            Err(Unwind::Return(value)) => value,
            Err(Unwind::Error(error)) => {
                debug!(%error, "Evaluation failed");
                Object::Error(error.to_string().into())
            }
        }
    }

    fn eval_statements<'a>(&mut self, statements: &'a [Statement<'a>], env: &Environment<'a>) -> Eval<'a> {
        let mut result = None;
        for statement in statements {
            result = self.eval_statement(statement, env)?;
        }
        Ok(result)
    }

    /// Evaluate a block in a new scope enclosing `env`.
    fn eval_block<'a>(&mut self, block: &'a Block<'a>, env: &Environment<'a>) -> Eval<'a> {
        let scope = Environment::enclosed(env);
        self.eval_statements(block.statements, &scope)
    }

    fn eval_statement<'a>(&mut self, statement: &'a Statement<'a>, env: &Environment<'a>) -> Eval<'a> {
        match statement {
            Statement::Let { name, value } => {
                let value = self.eval_expr(value, env)?.ok_or(EmptyAssignment)?;
                env.define(*name, value)?;
                Ok(None)
            }
            Statement::Return(value) => Err(Unwind::Return(self.eval_operand(value, env)?)),
            Statement::For(for_loop) => {
                self.eval_for(for_loop, env)?;
                Ok(None)
            }
            Statement::Expression(expr) => self.eval_expr(expr, env),
            Statement::Block(block) => self.eval_block(block, env),
        }
    }

    /// Run a `for` loop.
    ///
    /// The header runs in the surrounding scope, so the loop variable is
    /// still bound after the loop; each run of the body gets a fresh scope.
    fn eval_for<'a>(&mut self, for_loop: &'a ForLoop<'a>, env: &Environment<'a>) -> Result<(), Unwind<'a>> {
        if let Some(init) = for_loop.init {
            self.eval_statement(init, env)?;
        }

        let mut iterations = 0usize;
        loop {
            if let Some(condition) = for_loop.condition {
                if !self.eval_operand(condition, env)?.is_truthy() {
                    break;
                }
            }

            if let Some(max_iterations) = self.options.max_iterations {
                if iterations >= max_iterations {
                    debug!(max_iterations, "Loop iteration limit hit");
                    return Err(IterationLimit { max_iterations }.into());
                }
            }
            iterations += 1;

            self.eval_block(for_loop.body, env)?;

            if let Some(step) = for_loop.step {
                self.eval_expr(step, env)?;
            }
        }
        trace!(iterations, "Loop finished");
        Ok(())
    }

    /// Evaluate an expression whose result is used as a value; an empty
    /// result becomes `null`.
    fn eval_operand<'a>(&mut self, expr: &'a Expr<'a>, env: &Environment<'a>) -> Result<Object<'a>, Unwind<'a>> {
        Ok(self.eval_expr(expr, env)?.unwrap_or(Object::Null))
    }

    /// Evaluate an expression, growing the host stack when deep recursion
    /// runs low on it.
    fn eval_expr<'a>(&mut self, expr: &'a Expr<'a>, env: &Environment<'a>) -> Eval<'a> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.eval_expr_inner(expr, env))
    }

    fn eval_expr_inner<'a>(&mut self, expr: &'a Expr<'a>, env: &Environment<'a>) -> Eval<'a> {
        let value = match expr {
            Expr::Integer(value) => Object::Integer(*value),
            Expr::Boolean(value) => Object::Boolean(*value),
            Expr::Str(value) => Object::string(*value),
            Expr::Ident(name) => self.eval_identifier(name, env)?,

            Expr::Prefix { op, right } => {
                let right = self.eval_operand(right, env)?;
                eval_prefix(*op, right)?
            }

            // The left side of `=` names a binding; it is never evaluated.
            Expr::Infix {
                op: InfixOp::Assign,
                left,
                right,
            } => {
                let Expr::Ident(name) = left else {
                    return Err(InvalidAssignTarget.into());
                };
                let value = self.eval_expr(right, env)?.ok_or(EmptyAssignment)?;
                env.assign(name, value.clone())?;
                value
            }

            Expr::Infix { op, left, right } => {
                let left = self.eval_operand(left, env)?;
                let right = self.eval_operand(right, env)?;
                eval_infix(*op, left, right)?
            }

            Expr::If {
                clauses,
                alternative,
            } => return self.eval_if(clauses, *alternative, env),

            Expr::Function { params, body } => {
                check_params(params)?;
                Object::Function(Rc::new(Function {
                    params: *params,
                    body: *body,
                    env: env.clone(),
                }))
            }

            Expr::Call { function, args } => {
                let function = self.eval_operand(function, env)?;
                let args = self.eval_args(args, env)?;
                return self.apply(function, args);
            }

            Expr::Array(elements) => {
                let elements = self.eval_args(elements, env)?;
                Object::array(elements)
            }

            Expr::Hash(pairs) => self.eval_hash(pairs, env)?,

            Expr::Index { left, index } => {
                let left = self.eval_operand(left, env)?;
                let index = self.eval_operand(index, env)?;
                eval_index(left, index)?
            }
        };
        Ok(Some(value))
    }

    /// Resolve a name: the scope chain first, then built-ins.
    fn eval_identifier<'a>(&self, name: &str, env: &Environment<'a>) -> Result<Object<'a>, RuntimeError> {
        if let Some(value) = env.get(name) {
            return Ok(value);
        }
        match builtins::lookup(name) {
            Some(builtin) => Ok(Object::Builtin(builtin)),
            None => Err(UnknownIdentifier { name: name.into() }),
        }
    }

    fn eval_if<'a>(
        &mut self,
        clauses: &'a [IfClause<'a>],
        alternative: Option<&'a Block<'a>>,
        env: &Environment<'a>,
    ) -> Eval<'a> {
        for clause in clauses {
            if self.eval_operand(clause.condition, env)?.is_truthy() {
                return self.eval_block(clause.consequence, env);
            }
        }
        match alternative {
            Some(block) => self.eval_block(block, env),
            None => Ok(Some(Object::Null)),
        }
    }

    /// Evaluate expressions left to right, stopping at the first failure.
    fn eval_args<'a>(&mut self, exprs: &'a [&'a Expr<'a>], env: &Environment<'a>) -> Result<Args<'a>, Unwind<'a>> {
        let mut values = Args::with_capacity(exprs.len());
        for expr in exprs {
            values.push(self.eval_operand(expr, env)?);
        }
        Ok(values)
    }

    fn eval_hash<'a>(
        &mut self,
        pairs: &'a [(&'a Expr<'a>, &'a Expr<'a>)],
        env: &Environment<'a>,
    ) -> Result<Object<'a>, Unwind<'a>> {
        let mut entries = HashMap::with_capacity(pairs.len());
        for (key_expr, value_expr) in pairs {
            let key = self.eval_operand(key_expr, env)?;
            let hash_key = key.hash_key().ok_or(UnusableHashKey {
                type_name: key.type_name(),
            })?;
            let value = self.eval_operand(value_expr, env)?;
            entries.insert(hash_key, HashPair { key, value });
        }
        Ok(Object::Hash(Rc::new(entries)))
    }

    /// Call a function value with already evaluated arguments.
    fn apply<'a>(&mut self, function: Object<'a>, args: Args<'a>) -> Eval<'a> {
        match function {
            Object::Function(function) => self.apply_function(&function, args),
            Object::Builtin(builtin) => Ok(Some(builtin.call(&args)?)),
            other => Err(NotAFunction {
                type_name: other.type_name(),
            }
            .into()),
        }
    }

    fn apply_function<'a>(&mut self, function: &Function<'a>, args: Args<'a>) -> Eval<'a> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.apply_function_inner(function, args)
        })
    }

    fn apply_function_inner<'a>(&mut self, function: &Function<'a>, args: Args<'a>) -> Eval<'a> {
        if self.depth >= self.options.max_depth {
            return Err(StackOverflow {
                max_depth: self.options.max_depth,
            }
            .into());
        }

        let scope = bind_arguments(function, args)?;
        trace!(depth = self.depth, params = function.params.len(), "Applying function");

        self.depth += 1;
        let result = self.eval_statements(function.body.statements, &scope);
        self.depth -= 1;

        match result {
            Err(Unwind::Return(value)) => Ok(Some(value)),
            other => other,
        }
    }
}

/// Reject a variadic parameter anywhere but last.
fn check_params(params: &[Parameter<'_>]) -> Result<(), RuntimeError> {
    let last = params.len().saturating_sub(1);
    if params.iter().enumerate().any(|(i, p)| p.variadic && i != last) {
        return Err(MisplacedVariadic);
    }
    Ok(())
}

/// Build the call scope: one new scope enclosing the function's captured
/// environment, holding the parameters.
fn bind_arguments<'a>(function: &Function<'a>, args: Args<'a>) -> Result<Environment<'a>, RuntimeError> {
    let params = function.params;
    let variadic = params.last().is_some_and(|p| p.variadic);
    let required = if variadic { params.len() - 1 } else { params.len() };

    if args.len() < required || (!variadic && args.len() > required) {
        return Err(WrongArgumentCount {
            expected: params.len(),
            got: args.len(),
        });
    }

    let scope = Environment::enclosed(&function.env);
    let mut args = args.into_iter();
    for param in &params[..required] {
        // Counts were checked above.
        let arg = args.next().unwrap_or(Object::Null);
        scope.define(param.name, arg)?;
    }
    if variadic {
        scope.define(params[required].name, Object::array(args))?;
    }
    Ok(scope)
}

fn eval_index<'a>(left: Object<'a>, index: Object<'a>) -> Result<Object<'a>, RuntimeError> {
    match (&left, &index) {
        (Object::Array(elements), Object::Integer(i)) => {
            let i = *i;
            if i < 0 {
                return Err(NegativeIndex { index: i });
            }
            usize::try_from(i)
                .ok()
                .and_then(|i| elements.get(i))
                .cloned()
                .ok_or(IndexOutOfBounds { index: i })
        }
        (Object::Hash(_), _) => {
            let key = index.hash_key().ok_or(UnusableHashKey {
                type_name: index.type_name(),
            })?;
            Ok(left.hash_get(&key).cloned().unwrap_or(Object::Null))
        }
        _ => Err(IndexNotSupported {
            type_name: left.type_name(),
        }),
    }
}
