//! The AST node model: an arena of nodes carrying explicit evaluation
//! state.
//!
//! Nodes are created once by parsing and evaluated many times across
//! steps; between reuses the driver resets subtrees back to
//! `Unevaluated`. Node identity — the [`NodeId`] — is what the scope
//! cache keys on, never variable names, since names may shadow.
//!
//! Evaluation state is a tagged variant, not nullable fields: a node is
//! [`Unevaluated`](EvalState::Unevaluated), waiting on a designated
//! child, or [`Done`](EvalState::Done) with a result element. All
//! transitions are explicit, so a half-finished evaluation can always
//! be discarded by resetting the subtree.

use machina_storage::Element;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Identity of a node within one [`Ast`]. Copyable, hashable, and the
/// key for every per-node cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Which quantifier a quantifier node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantifierKind {
    Forall,
    Exists,
}

impl QuantifierKind {
    /// Surface keyword, used in tokens and diagnostics.
    pub fn token(self) -> &'static str {
        match self {
            QuantifierKind::Forall => "forall",
            QuantifierKind::Exists => "exists",
        }
    }
}

/// Binary operators of the predicate-logic construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    And,
    Or,
    Xor,
    Implies,
    NotEq,
    MemberOf,
    NotMemberOf,
}

impl BinaryOp {
    pub fn token(self) -> &'static str {
        match self {
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Xor => "xor",
            BinaryOp::Implies => "implies",
            BinaryOp::NotEq => "!=",
            BinaryOp::MemberOf => "memberof",
            BinaryOp::NotMemberOf => "notmemberof",
        }
    }
}

/// Unary operators of the predicate-logic construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
}

impl UnaryOp {
    pub fn token(self) -> &'static str {
        match self {
            UnaryOp::Not => "not",
        }
    }
}

/// What a node is. A closed union: the registry dispatches on this,
/// never on token strings.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A self-evaluating constant.
    Literal(Element),
    /// An identifier; the token is the name, resolved against the
    /// driver's binding stack.
    Id,
    Unary(UnaryOp),
    Binary(BinaryOp),
    /// A quantified expression; children are `[variable, domain, condition]`.
    Quantifier(QuantifierKind),
    /// A function application; the token names a function in the step's
    /// namespace, children are the arguments.
    Apply,
}

/// Generic grammar class of a node, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarClass {
    Literal,
    Identifier,
    UnaryOperator,
    BinaryOperator,
    Expression,
}

impl NodeKind {
    pub fn grammar_class(&self) -> GrammarClass {
        match self {
            NodeKind::Literal(_) => GrammarClass::Literal,
            NodeKind::Id => GrammarClass::Identifier,
            NodeKind::Unary(_) => GrammarClass::UnaryOperator,
            NodeKind::Binary(_) => GrammarClass::BinaryOperator,
            NodeKind::Quantifier(_) | NodeKind::Apply => GrammarClass::Expression,
        }
    }
}

/// Evaluation state of one node.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EvalState {
    /// Not yet evaluated (the reset state).
    #[default]
    Unevaluated,
    /// The driver descended into the designated child.
    Awaiting(NodeId),
    /// Evaluated, carrying the result.
    Done(Element),
}

/// One tree node.
#[derive(Debug, Clone)]
pub struct AstNode {
    pub kind: NodeKind,
    /// Token text: identifier name, operator symbol, function name, or
    /// quantifier keyword.
    pub token: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub state: EvalState,
}

impl AstNode {
    pub fn is_evaluated(&self) -> bool {
        matches!(self.state, EvalState::Done(_))
    }

    /// The result element, only while evaluated.
    pub fn value(&self) -> Option<&Element> {
        match &self.state {
            EvalState::Done(v) => Some(v),
            _ => None,
        }
    }
}

/// Named view over a quantifier node's three logical children.
#[derive(Debug, Clone, Copy)]
pub struct QuantifierParts {
    pub kind: QuantifierKind,
    /// The bound-variable leaf (an `Id` node; its token is the name).
    pub variable: NodeId,
    pub domain: NodeId,
    pub condition: NodeId,
}

/// An arena of nodes forming one tree (or several; roots are nodes
/// without parents).
#[derive(Debug, Default)]
pub struct Ast {
    nodes: Vec<AstNode>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node, wiring child parent links. Children must not already
    /// have a parent.
    pub fn add(&mut self, kind: NodeKind, token: impl Into<String>, children: Vec<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        for &child in &children {
            debug_assert!(self.nodes[child.0 as usize].parent.is_none());
            self.nodes[child.0 as usize].parent = Some(id);
        }
        self.nodes.push(AstNode {
            kind,
            token: token.into(),
            parent: None,
            children,
            state: EvalState::Unevaluated,
        });
        id
    }

    // ── Builders ─────────────────────────────────────────────────────────

    pub fn literal(&mut self, value: Element) -> NodeId {
        let token = value.denotation();
        self.add(NodeKind::Literal(value), token, vec![])
    }

    pub fn id(&mut self, name: impl Into<String>) -> NodeId {
        self.add(NodeKind::Id, name, vec![])
    }

    pub fn unary(&mut self, op: UnaryOp, operand: NodeId) -> NodeId {
        self.add(NodeKind::Unary(op), op.token(), vec![operand])
    }

    pub fn binary(&mut self, op: BinaryOp, left: NodeId, right: NodeId) -> NodeId {
        self.add(NodeKind::Binary(op), op.token(), vec![left, right])
    }

    /// Build a quantifier node over a fresh bound-variable leaf.
    pub fn quantifier(
        &mut self,
        kind: QuantifierKind,
        variable: impl Into<String>,
        domain: NodeId,
        condition: NodeId,
    ) -> NodeId {
        let var = self.add(NodeKind::Id, variable, vec![]);
        self.add(
            NodeKind::Quantifier(kind),
            kind.token(),
            vec![var, domain, condition],
        )
    }

    pub fn apply(&mut self, function: impl Into<String>, args: Vec<NodeId>) -> NodeId {
        self.add(NodeKind::Apply, function, args)
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn node(&self, id: NodeId) -> &AstNode {
        &self.nodes[id.0 as usize]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn is_evaluated(&self, id: NodeId) -> bool {
        self.node(id).is_evaluated()
    }

    pub fn value(&self, id: NodeId) -> Option<&Element> {
        self.node(id).value()
    }

    /// The quantifier view of a node, if it is a well-formed quantifier.
    pub fn quantifier_parts(&self, id: NodeId) -> Option<QuantifierParts> {
        let node = self.node(id);
        match (&node.kind, node.children.as_slice()) {
            (NodeKind::Quantifier(kind), &[variable, domain, condition]) => Some(QuantifierParts {
                kind: *kind,
                variable,
                domain,
                condition,
            }),
            _ => None,
        }
    }

    // ── State transitions ────────────────────────────────────────────────

    /// Record that the driver descended from `id` into `child`.
    pub fn set_awaiting(&mut self, id: NodeId, child: NodeId) {
        self.nodes[id.0 as usize].state = EvalState::Awaiting(child);
    }

    /// Attach a final value, ending this node's evaluation.
    pub fn finalize(&mut self, id: NodeId, value: Element) {
        self.nodes[id.0 as usize].state = EvalState::Done(value);
    }

    /// Reset a single node to `Unevaluated`.
    pub fn reset(&mut self, id: NodeId) {
        self.nodes[id.0 as usize].state = EvalState::Unevaluated;
    }

    /// Preorder walk of the subtree rooted at `id`.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }
}

impl Index<NodeId> for Ast {
    type Output = AstNode;

    fn index(&self, id: NodeId) -> &AstNode {
        self.node(id)
    }
}
