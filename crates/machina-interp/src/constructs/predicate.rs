//! Predicate-logic operators.
//!
//! Undefined operands are advisory: the operator yields `undef` and
//! emits one warning, and evaluation continues. Defined operands of the
//! wrong type are fatal for the step.

use crate::ast::{Ast, BinaryOp, NodeId, NodeKind, UnaryOp};
use crate::constructs::Construct;
use crate::error::{EvalError, EvalResult};
use crate::interpreter::Interpreter;
use machina_storage::Element;

const SOURCE: &str = "PredicateLogic";

/// Evaluates the unary and binary predicate-logic operator nodes.
pub struct PredicateConstruct;

impl Construct for PredicateConstruct {
    fn name(&self) -> &'static str {
        SOURCE
    }

    fn interpret(
        &self,
        interp: &mut Interpreter,
        ast: &mut Ast,
        pos: NodeId,
    ) -> EvalResult<NodeId> {
        // operands first, left to right
        if let Some(&child) = ast.children(pos).iter().find(|&&c| !ast.is_evaluated(c)) {
            return Ok(child);
        }

        let result = match ast.node(pos).kind {
            NodeKind::Binary(op) => {
                let &[l, r] = ast.children(pos) else {
                    return Err(EvalError::MalformedNode { construct: SOURCE });
                };
                let lv = ast.value(l).cloned().unwrap_or_default();
                let rv = ast.value(r).cloned().unwrap_or_default();
                self.apply_binary(interp, pos, op, &lv, &rv)?
            }
            NodeKind::Unary(op) => {
                let &[operand] = ast.children(pos) else {
                    return Err(EvalError::MalformedNode { construct: SOURCE });
                };
                let ov = ast.value(operand).cloned().unwrap_or_default();
                self.apply_unary(interp, pos, op, &ov)?
            }
            _ => return Err(EvalError::MalformedNode { construct: SOURCE }),
        };

        ast.finalize(pos, result);
        Ok(pos)
    }
}

impl PredicateConstruct {
    fn apply_binary(
        &self,
        interp: &mut Interpreter,
        pos: NodeId,
        op: BinaryOp,
        lv: &Element,
        rv: &Element,
    ) -> EvalResult<Element> {
        match op {
            BinaryOp::NotEq => Ok(Element::boolean(lv != rv)),

            BinaryOp::MemberOf | BinaryOp::NotMemberOf => {
                if rv.is_undef() {
                    interp.warn(
                        SOURCE,
                        format!("the right operand of the '{}' operator was undef", op.token()),
                        Some(pos),
                    );
                    return Ok(Element::Undef);
                }
                // a defined right operand must be a domain
                match rv.as_enumerable() {
                    Some(domain) => {
                        let contained = domain.contains(lv);
                        Ok(Element::boolean(match op {
                            BinaryOp::MemberOf => contained,
                            _ => !contained,
                        }))
                    }
                    None => Err(EvalError::OperatorTypeMismatch {
                        op: op.token(),
                        denotation: rv.denotation(),
                    }),
                }
            }

            BinaryOp::And | BinaryOp::Or | BinaryOp::Xor | BinaryOp::Implies => {
                // defined non-boolean operands are fatal
                for v in [lv, rv] {
                    if !v.is_undef() && v.as_boolean().is_none() {
                        return Err(EvalError::OperatorTypeMismatch {
                            op: op.token(),
                            denotation: v.denotation(),
                        });
                    }
                }
                match (lv.as_boolean(), rv.as_boolean()) {
                    (Some(a), Some(b)) => Ok(Element::boolean(match op {
                        BinaryOp::And => a & b,
                        BinaryOp::Or => a | b,
                        BinaryOp::Xor => a ^ b,
                        BinaryOp::Implies => !a | b,
                        _ => unreachable!(),
                    })),
                    _ => {
                        let side = match (lv.is_undef(), rv.is_undef()) {
                            (true, true) => "both operands",
                            (true, false) => "the left operand",
                            _ => "the right operand",
                        };
                        interp.warn(
                            SOURCE,
                            format!("{side} of the '{}' operator {} undef",
                                op.token(),
                                if lv.is_undef() && rv.is_undef() { "were" } else { "was" }
                            ),
                            Some(pos),
                        );
                        Ok(Element::Undef)
                    }
                }
            }
        }
    }

    fn apply_unary(
        &self,
        interp: &mut Interpreter,
        pos: NodeId,
        op: UnaryOp,
        ov: &Element,
    ) -> EvalResult<Element> {
        if ov.is_undef() {
            interp.warn(
                SOURCE,
                format!("the operand of the unary operator '{}' was undef", op.token()),
                Some(pos),
            );
            return Ok(Element::Undef);
        }
        match (op, ov.as_boolean()) {
            (UnaryOp::Not, Some(b)) => Ok(Element::boolean(!b)),
            (UnaryOp::Not, None) => Err(EvalError::OperatorTypeMismatch {
                op: op.token(),
                denotation: ov.denotation(),
            }),
        }
    }
}
