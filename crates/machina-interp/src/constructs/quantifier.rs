//! The quantifier evaluation state machine (`forall` / `exists`).
//!
//! Both quantifiers share one skeleton driven externally by the driver,
//! never by recursive self-evaluation. Observable states, read off the
//! children's evaluation states:
//!
//! 1. domain unresolved — drop any stale scope-cache entry for the
//!    domain node, descend into the domain;
//! 2. domain resolved, condition unresolved — consume the next
//!    not-yet-tried element (indexed view preferred), bind the
//!    variable, descend into the condition; an exhausted candidate
//!    list finalizes the node;
//! 3. condition resolved — read the boolean, clear the condition
//!    subtree so it can re-run for the next candidate, unbind the
//!    variable, then either finalize or loop back through the domain.
//!
//! The two differ only in the short-circuit rule: `exists` finishes
//! `true` on the first true condition and `false` on exhaustion;
//! `forall` finishes `false` on the first false condition and `true`
//! on exhaustion. `forall` additionally finalizes `true` for an empty
//! total enumeration before the scope cache is ever consulted.

use crate::ast::{Ast, NodeId, QuantifierKind};
use crate::constructs::Construct;
use crate::error::{EvalError, EvalResult};
use crate::interpreter::Interpreter;
use machina_storage::Element;
use tracing::trace;

const SOURCE: &str = "Quantifier";

/// Evaluates `forall` and `exists` nodes.
pub struct QuantifierConstruct;

impl Construct for QuantifierConstruct {
    fn name(&self) -> &'static str {
        SOURCE
    }

    fn interpret(
        &self,
        interp: &mut Interpreter,
        ast: &mut Ast,
        pos: NodeId,
    ) -> EvalResult<NodeId> {
        let Some(q) = ast.quantifier_parts(pos) else {
            return Err(EvalError::MalformedNode { construct: SOURCE });
        };

        if !ast.is_evaluated(q.domain) {
            // a new domain value is coming: any entry keyed by this
            // domain node is stale
            interp.drop_remaining(q.domain);
            return Ok(q.domain);
        }

        if !ast.is_evaluated(q.condition) {
            self.next_candidate(interp, ast, pos, &q)
        } else {
            self.combine_condition(interp, ast, pos, &q)
        }
    }
}

impl QuantifierConstruct {
    /// State 2: the domain carries a value, the condition does not.
    fn next_candidate(
        &self,
        interp: &mut Interpreter,
        ast: &mut Ast,
        pos: NodeId,
        q: &crate::ast::QuantifierParts,
    ) -> EvalResult<NodeId> {
        let domain_value = ast.value(q.domain).cloned().unwrap_or_default();
        let Some(domain) = domain_value.as_enumerable() else {
            return Err(EvalError::DomainNotEnumerable {
                quantifier: q.kind.token(),
                denotation: domain_value.denotation(),
            });
        };

        // forall over an empty domain is vacuously true; decided from
        // the total enumeration, before the scope cache is touched
        if q.kind == QuantifierKind::Forall && domain.size() == 0 {
            interp.drop_remaining(q.domain);
            ast.finalize(pos, Element::boolean(true));
            return Ok(pos);
        }

        let remaining = interp.remaining_or_init(q.domain, || {
            if domain.supports_indexed_view() {
                domain.indexed_view()
            } else {
                domain.enumerate()
            }
        });

        if remaining.is_empty() {
            // every candidate was tried without short-circuiting
            interp.drop_remaining(q.domain);
            let exhausted = q.kind == QuantifierKind::Forall;
            ast.finalize(pos, Element::boolean(exhausted));
            Ok(pos)
        } else {
            let chosen = remaining.remove(0);
            let variable = ast.node(q.variable).token.clone();
            trace!(quantifier = q.kind.token(), %variable, candidate = %chosen, "bind candidate");
            interp.add_env(variable, chosen);
            Ok(q.condition)
        }
    }

    /// State 3: the condition carries a value.
    fn combine_condition(
        &self,
        interp: &mut Interpreter,
        ast: &mut Ast,
        pos: NodeId,
        q: &crate::ast::QuantifierParts,
    ) -> EvalResult<NodeId> {
        let condition_value = ast.value(q.condition).cloned().unwrap_or_default();
        let Some(holds) = condition_value.as_boolean() else {
            return Err(EvalError::NonBooleanCondition {
                quantifier: q.kind.token(),
                denotation: condition_value.denotation(),
            });
        };

        // the condition re-runs once per candidate
        interp.clear_tree(ast, q.condition);
        interp.remove_env(&ast.node(q.variable).token);

        let short_circuit = match q.kind {
            QuantifierKind::Exists => holds,
            QuantifierKind::Forall => !holds,
        };
        if short_circuit {
            interp.drop_remaining(q.domain);
            ast.finalize(pos, Element::boolean(holds));
            Ok(pos)
        } else {
            // the domain node still carries its value, so this re-enters
            // state 2 and consumes the next queued element
            Ok(q.domain)
        }
    }
}
