//! Kernel constructs: literals, identifiers, function application.

use crate::ast::{Ast, NodeId, NodeKind};
use crate::constructs::Construct;
use crate::error::{EvalError, EvalResult};
use crate::interpreter::Interpreter;
use machina_storage::Element;

const SOURCE: &str = "Kernel";

/// Evaluates the leaf and application node kinds.
pub struct KernelConstruct;

impl Construct for KernelConstruct {
    fn name(&self) -> &'static str {
        SOURCE
    }

    fn interpret(
        &self,
        interp: &mut Interpreter,
        ast: &mut Ast,
        pos: NodeId,
    ) -> EvalResult<NodeId> {
        match &ast.node(pos).kind {
            NodeKind::Literal(value) => {
                let value = value.clone();
                ast.finalize(pos, value);
                Ok(pos)
            }

            NodeKind::Id => {
                let name = ast.node(pos).token.clone();
                let value = match interp.lookup_env(&name) {
                    Some(v) => v.clone(),
                    None => {
                        interp.warn(
                            SOURCE,
                            format!("identifier '{name}' is not bound; treating it as undef"),
                            Some(pos),
                        );
                        Element::Undef
                    }
                };
                ast.finalize(pos, value);
                Ok(pos)
            }

            NodeKind::Apply => {
                // arguments first, left to right
                if let Some(&child) = ast.children(pos).iter().find(|&&c| !ast.is_evaluated(c)) {
                    return Ok(child);
                }
                let args: Vec<Element> = ast
                    .children(pos)
                    .iter()
                    .map(|&c| ast.value(c).cloned().unwrap_or_default())
                    .collect();
                let fname = &ast.node(pos).token;
                let Some(f) = interp.functions().get(fname) else {
                    return Err(EvalError::UnknownFunction(fname.clone()));
                };
                let result = f.value(&args);
                ast.finalize(pos, result);
                Ok(pos)
            }

            _ => Err(EvalError::MalformedNode { construct: SOURCE }),
        }
    }
}
