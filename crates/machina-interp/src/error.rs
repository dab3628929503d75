//! Fatal-for-step error types.
//!
//! These abort evaluation of the current agent's step and travel back to
//! the scheduler as values; nothing here panics the engine. Ordinary
//! domain-constraint failures in function evaluation are *not* errors —
//! they resolve to `undef` at the function-element level.

use thiserror::Error;

/// Errors that abort the current agent's step.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    /// A quantifier domain evaluated to a non-enumerable value.
    #[error("the '{quantifier}' predicate does not apply to {denotation}: the domain must be an enumerable element")]
    DomainNotEnumerable {
        quantifier: &'static str,
        denotation: String,
    },

    /// A quantifier condition evaluated to a non-boolean value.
    #[error("value of '{quantifier}' condition is not boolean: {denotation}")]
    NonBooleanCondition {
        quantifier: &'static str,
        denotation: String,
    },

    /// A defined, wrongly-typed operand reached a logical operator.
    #[error("operator '{op}' is not applicable to {denotation}")]
    OperatorTypeMismatch { op: &'static str, denotation: String },

    /// A node's shape does not match its construct (wrong child count).
    #[error("malformed {construct} node")]
    MalformedNode { construct: &'static str },

    /// A function application named a function the step's namespace
    /// does not contain.
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
}

/// Result alias for driver and construct operations.
pub type EvalResult<T> = Result<T, EvalError>;
