//! Configuration options for evaluation.

/// Configuration options for program execution.
///
/// These options control resource limits during evaluation. Hitting a limit
/// ends the evaluation with an error object instead of hanging or crashing
/// the host.
///
/// # Example
///
/// ```
/// use monkey_core::api::ExecutionOptions;
///
/// let options = ExecutionOptions {
///     max_depth: 500,
///     max_iterations: Some(10_000),
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Maximum number of nested user-function calls (for recursion protection).
    ///
    /// Default: 256
    pub max_depth: usize,

    /// Maximum number of body executions of any single `for` loop (if Some).
    ///
    /// Set to `None` for unlimited iterations (be careful with untrusted code!).
    ///
    /// Default: None
    pub max_iterations: Option<usize>,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            max_depth: 256,
            max_iterations: None,
        }
    }
}
