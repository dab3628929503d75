//! Construct singletons: the per-node-kind evaluation logic.
//!
//! A construct answers one question for the node the driver is focused
//! on: what is the next position, or what final value ends this node's
//! evaluation. Constructs are stateless and shared across every agent's
//! driver; all mutable evaluation state lives on the [`Interpreter`]
//! passed in.

mod kernel;
mod predicate;
mod quantifier;

pub use kernel::KernelConstruct;
pub use predicate::PredicateConstruct;
pub use quantifier::QuantifierConstruct;

use crate::ast::{Ast, NodeId, NodeKind};
use crate::error::EvalResult;
use crate::interpreter::Interpreter;
use std::sync::Arc;

/// Evaluation logic for one family of node kinds.
///
/// `interpret` is called with `pos` focused and unevaluated. It either
/// returns a child id for the driver to descend into, or finalizes
/// `pos` with a value and returns `pos` itself.
pub trait Construct: Send + Sync {
    /// Construct name, used in traces and warning sources.
    fn name(&self) -> &'static str;

    fn interpret(&self, interp: &mut Interpreter, ast: &mut Ast, pos: NodeId)
        -> EvalResult<NodeId>;
}

/// The closed dispatch table from node kind to construct singleton.
///
/// One registry is built per engine and shared by every agent via
/// `Arc`; because [`NodeKind`] is a closed union, dispatch is total.
pub struct ConstructRegistry {
    kernel: Arc<dyn Construct>,
    predicate: Arc<dyn Construct>,
    quantifier: Arc<dyn Construct>,
}

impl ConstructRegistry {
    /// The standard construct set.
    pub fn standard() -> Arc<Self> {
        Arc::new(Self {
            kernel: Arc::new(KernelConstruct),
            predicate: Arc::new(PredicateConstruct),
            quantifier: Arc::new(QuantifierConstruct),
        })
    }

    /// The construct singleton responsible for a node kind.
    pub fn construct_for(&self, kind: &NodeKind) -> Arc<dyn Construct> {
        let c = match kind {
            NodeKind::Literal(_) | NodeKind::Id | NodeKind::Apply => &self.kernel,
            NodeKind::Unary(_) | NodeKind::Binary(_) => &self.predicate,
            NodeKind::Quantifier(_) => &self.quantifier,
        };
        Arc::clone(c)
    }
}
