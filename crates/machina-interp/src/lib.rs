//! Machina stepwise expression interpreter.
//!
//! # Architecture
//!
//! Evaluation is a flat loop over an explicit tree, never a recursive
//! walk. Each node of the [`ast::Ast`] carries its own
//! [`ast::EvalState`]; the per-agent [`interpreter::Interpreter`] holds
//! a single *current position* and repeatedly asks the focused node's
//! [`constructs::Construct`] what to do next. A construct either names
//! a child to descend into or finalizes the node with an
//! [`machina_storage::Element`].
//!
//! Consequences of this shape:
//!
//! - stack depth is O(1) in the tree depth, so deeply nested
//!   expressions cannot overflow the host stack;
//! - evaluation can pause between micro-steps and resume later, and
//!   several agents' drivers interleave freely over shared, stateless
//!   construct singletons;
//! - an abandoned evaluation is discarded by resetting the subtree,
//!   which also evicts any scope-cache entries keyed inside it.
//!
//! The quantifier constructs (`forall` / `exists`) are the reason for
//! the scope cache: a quantifier re-runs its condition subtree once per
//! domain element, remembering the not-yet-tried elements under the
//! domain *node's identity* between visits.

pub mod ast;
pub mod constructs;
pub mod diagnostics;
pub mod error;
pub mod interpreter;

pub use ast::{Ast, BinaryOp, NodeId, NodeKind, QuantifierKind, UnaryOp};
pub use constructs::{Construct, ConstructRegistry};
pub use diagnostics::{Diagnostic, Severity};
pub use error::{EvalError, EvalResult};
pub use interpreter::{Interpreter, StepOutcome};
