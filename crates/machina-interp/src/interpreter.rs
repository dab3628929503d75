//! The per-agent interpreter driver.
//!
//! One [`Interpreter`] exists per executing agent. It holds the agent's
//! *current position* in the tree and every piece of mutable evaluation
//! state: the variable-binding stack, the scope cache of not-yet-tried
//! domain elements, and the warning sink. Construct singletons are
//! shared across agents and carry no state of their own, so agents
//! never observe each other's evaluations.
//!
//! A step is a flat loop: [`advance`](Interpreter::advance) performs one
//! micro-step — ask the focused node's construct "what next", move the
//! position — with O(1) stack depth regardless of tree depth. Because
//! all state is explicit, evaluation can pause indefinitely between
//! `advance` calls, and a half-finished step is discarded whole by an
//! idempotent [`abandon`](Interpreter::abandon).

use crate::ast::{Ast, NodeId};
use crate::constructs::ConstructRegistry;
use crate::diagnostics::Diagnostic;
use crate::error::EvalResult;
use machina_storage::{Element, FunctionTable};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Outcome of one micro-step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The position moved; call again.
    Progress,
    /// The root finished with this value.
    Complete(Element),
}

/// The driver for one agent's evaluation of one tree.
pub struct Interpreter {
    registry: Arc<ConstructRegistry>,
    functions: Arc<FunctionTable>,
    position: NodeId,
    /// LIFO binding stack; the most recent binding for a name wins.
    env: Vec<(String, Element)>,
    /// Scope cache: per domain-node identity, the ordered elements not
    /// yet tried by the owning quantifier.
    remained: HashMap<NodeId, Vec<Element>>,
    warnings: Vec<Diagnostic>,
}

impl Interpreter {
    /// A driver focused on `root`, sharing the given construct
    /// singletons and step function namespace.
    pub fn new(registry: Arc<ConstructRegistry>, functions: Arc<FunctionTable>, root: NodeId) -> Self {
        Self {
            registry,
            functions,
            position: root,
            env: Vec::new(),
            remained: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    pub fn position(&self) -> NodeId {
        self.position
    }

    /// Refocus the driver (e.g. to re-run a subtree after a reset).
    pub fn set_position(&mut self, pos: NodeId) {
        self.position = pos;
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    // ══════════════════════════════════════════════════════════════════════
    // Variable-binding scope
    // ══════════════════════════════════════════════════════════════════════

    /// Bind `name`, shadowing any earlier binding of the same name.
    pub fn add_env(&mut self, name: impl Into<String>, value: Element) {
        self.env.push((name.into(), value));
    }

    /// Drop the most recent binding of `name`. Removing an unbound name
    /// is a no-op, not an error.
    pub fn remove_env(&mut self, name: &str) {
        if let Some(i) = self.env.iter().rposition(|(n, _)| n == name) {
            self.env.remove(i);
        }
    }

    /// The innermost binding of `name`, if any.
    pub fn lookup_env(&self, name: &str) -> Option<&Element> {
        self.env
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    // ══════════════════════════════════════════════════════════════════════
    // Scope cache
    // ══════════════════════════════════════════════════════════════════════

    /// The remaining-candidates entry for a domain node, created with
    /// `init` on first need.
    pub fn remaining_or_init(
        &mut self,
        domain: NodeId,
        init: impl FnOnce() -> Vec<Element>,
    ) -> &mut Vec<Element> {
        self.remained.entry(domain).or_insert_with(|| {
            trace!(%domain, "scope cache entry created");
            init()
        })
    }

    /// Drop the remaining-candidates entry for a domain node.
    /// Idempotent: dropping an absent entry is a no-op.
    pub fn drop_remaining(&mut self, domain: NodeId) {
        if self.remained.remove(&domain).is_some() {
            trace!(%domain, "scope cache entry dropped");
        }
    }

    /// Whether a domain node currently has a scope-cache entry.
    pub fn has_remaining(&self, domain: NodeId) -> bool {
        self.remained.contains_key(&domain)
    }

    // ══════════════════════════════════════════════════════════════════════
    // Diagnostics
    // ══════════════════════════════════════════════════════════════════════

    /// Record an advisory warning.
    pub fn warn(&mut self, source: &str, message: impl Into<String>, node: Option<NodeId>) {
        let d = Diagnostic::warning(source, message, node);
        debug!(%d, "warning");
        self.warnings.push(d);
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Drain accumulated warnings (called by the scheduler after a step).
    pub fn take_warnings(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.warnings)
    }

    // ══════════════════════════════════════════════════════════════════════
    // Tree stepping
    // ══════════════════════════════════════════════════════════════════════

    /// Recursively reset a subtree to "not yet evaluated", discarding
    /// cached values and any scope-cache entries keyed by nodes in it.
    ///
    /// Idempotent; safe to call on a half-finished evaluation at any
    /// point between micro-steps.
    pub fn clear_tree(&mut self, ast: &mut Ast, node: NodeId) {
        for id in ast.subtree(node) {
            ast.reset(id);
            self.remained.remove(&id);
        }
        debug!(%node, "subtree cleared");
    }

    /// Discard an in-flight evaluation entirely: reset the subtree,
    /// drop its scope-cache entries, unwind the binding stack, and
    /// refocus on `root`.
    ///
    /// This is the step-abort path: safe and idempotent at any point
    /// between micro-steps, so a half-finished evaluation never leaks
    /// a candidate binding into a later run.
    pub fn abandon(&mut self, ast: &mut Ast, root: NodeId) {
        self.clear_tree(ast, root);
        self.env.clear();
        self.position = root;
        debug!(%root, "evaluation abandoned");
    }

    /// One micro-step: if the focused node is evaluated, pop to its
    /// parent (or finish at the root); otherwise ask its construct for
    /// the next position.
    pub fn advance(&mut self, ast: &mut Ast) -> EvalResult<StepOutcome> {
        let pos = self.position;
        if let Some(value) = ast.value(pos) {
            return match ast.parent(pos) {
                Some(parent) => {
                    trace!(%pos, %parent, "pop to parent");
                    self.position = parent;
                    Ok(StepOutcome::Progress)
                }
                None => {
                    let value = value.clone();
                    debug!(%pos, value = %value, "root evaluated");
                    Ok(StepOutcome::Complete(value))
                }
            };
        }

        let construct = self.registry.construct_for(&ast.node(pos).kind);
        let next = construct.interpret(self, ast, pos)?;
        if next != pos {
            ast.set_awaiting(pos, next);
            trace!(%pos, %next, construct = construct.name(), "descend");
        }
        self.position = next;
        Ok(StepOutcome::Progress)
    }

    /// Drive the tree to a terminal value: the single entry point the
    /// step scheduler loops on.
    pub fn execute_tree(&mut self, ast: &mut Ast) -> EvalResult<Element> {
        loop {
            if let StepOutcome::Complete(value) = self.advance(ast)? {
                return Ok(value);
            }
        }
    }
}
