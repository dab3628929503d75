//! Quantifier state-machine tests.
//!
//! Covers:
//! 1. Empty-domain truth values (forall true, exists false)
//! 2. Enumeration counts (exhaustive runs and short-circuits)
//! 3. Candidate order over indexed domains
//! 4. Set domains (deduplicated enumeration)
//! 5. Re-evaluation after a subtree reset
//! 6. Nested quantifiers sharing a variable name
//! 7. Fatal domain / condition type errors
//! 8. Two drivers interleaving over shared constructs

use machina_interp::{
    Ast, ConstructRegistry, EvalError, Interpreter, QuantifierKind, StepOutcome,
};
use machina_storage::{Element, FunctionClass, FunctionElement, FunctionTable};
use std::sync::{Arc, Mutex};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

/// A derived predicate that records every argument it is applied to.
struct Probe {
    name: &'static str,
    seen: Mutex<Vec<Element>>,
    verdict: fn(&Element) -> bool,
}

impl Probe {
    fn new(name: &'static str, verdict: fn(&Element) -> bool) -> Arc<Self> {
        Arc::new(Self {
            name,
            seen: Mutex::new(Vec::new()),
            verdict,
        })
    }

    fn seen(&self) -> Vec<Element> {
        self.seen.lock().unwrap().clone()
    }

    fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

impl FunctionElement for Probe {
    fn name(&self) -> &str {
        self.name
    }

    fn fclass(&self) -> FunctionClass {
        FunctionClass::Derived
    }

    fn value(&self, args: &[Element]) -> Element {
        let [arg] = args else { return Element::Undef };
        self.seen.lock().unwrap().push(arg.clone());
        Element::boolean((self.verdict)(arg))
    }
}

fn table_with(probes: &[Arc<Probe>]) -> Arc<FunctionTable> {
    let mut table = FunctionTable::new();
    for p in probes {
        table.register(p.clone());
    }
    Arc::new(table)
}

fn strings(names: &[&str]) -> Element {
    Element::list(names.iter().map(|n| Element::string(*n)).collect::<Vec<_>>())
}

/// Build `<kind> x in <domain> holds probe(x)` and evaluate it.
fn run_quantified(
    kind: QuantifierKind,
    domain: Element,
    probe: &Arc<Probe>,
) -> Result<Element, EvalError> {
    let table = table_with(std::slice::from_ref(probe));
    let mut ast = Ast::new();
    let dom = ast.literal(domain);
    let x = ast.id("x");
    let cond = ast.apply(probe.name, vec![x]);
    let root = ast.quantifier(kind, "x", dom, cond);
    let mut interp = Interpreter::new(ConstructRegistry::standard(), table, root);
    interp.execute_tree(&mut ast)
}

// ─────────────────────────────────────────────────────────────────────
// Empty domains
// ─────────────────────────────────────────────────────────────────────

#[test]
fn forall_over_empty_domain_is_vacuously_true() {
    let probe = Probe::new("probe", |_| false);
    let result = run_quantified(QuantifierKind::Forall, Element::list(vec![]), &probe);
    assert_eq!(result, Ok(Element::boolean(true)));
    assert_eq!(probe.calls(), 0);
}

#[test]
fn exists_over_empty_domain_is_false() {
    let probe = Probe::new("probe", |_| true);
    let result = run_quantified(QuantifierKind::Exists, Element::list(vec![]), &probe);
    assert_eq!(result, Ok(Element::boolean(false)));
    assert_eq!(probe.calls(), 0);
}

// ─────────────────────────────────────────────────────────────────────
// Enumeration counts and candidate order
// ─────────────────────────────────────────────────────────────────────

#[test]
fn forall_true_condition_visits_every_element_in_order() {
    let probe = Probe::new("probe", |_| true);
    let result = run_quantified(QuantifierKind::Forall, strings(&["a", "b", "c"]), &probe);
    assert_eq!(result, Ok(Element::boolean(true)));
    assert_eq!(
        probe.seen(),
        vec![
            Element::string("a"),
            Element::string("b"),
            Element::string("c")
        ]
    );
}

#[test]
fn forall_short_circuits_on_first_false() {
    let probe = Probe::new("probe", |_| false);
    let result = run_quantified(QuantifierKind::Forall, strings(&["a", "b", "c"]), &probe);
    assert_eq!(result, Ok(Element::boolean(false)));
    assert_eq!(probe.seen(), vec![Element::string("a")]);
}

#[test]
fn exists_false_condition_exhausts_the_domain() {
    let probe = Probe::new("probe", |_| false);
    let result = run_quantified(QuantifierKind::Exists, strings(&["a", "b", "c"]), &probe);
    assert_eq!(result, Ok(Element::boolean(false)));
    assert_eq!(probe.calls(), 3);
}

#[test]
fn exists_stops_at_the_first_witness() {
    let probe = Probe::new("probe", |e| *e == Element::string("b"));
    let result = run_quantified(QuantifierKind::Exists, strings(&["a", "b", "c"]), &probe);
    assert_eq!(result, Ok(Element::boolean(true)));
    // binds "a" then "b"; "c" is never tried
    assert_eq!(probe.seen(), vec![Element::string("a"), Element::string("b")]);
}

#[test]
fn set_domain_enumerates_without_duplicates() {
    let probe = Probe::new("probe", |_| true);
    let domain = Element::set(vec![
        Element::number(1.0),
        Element::number(2.0),
        Element::number(1.0),
    ]);
    let result = run_quantified(QuantifierKind::Forall, domain, &probe);
    assert_eq!(result, Ok(Element::boolean(true)));
    assert_eq!(probe.calls(), 2);
}

// ─────────────────────────────────────────────────────────────────────
// Re-evaluation
// ─────────────────────────────────────────────────────────────────────

#[test]
fn cleared_tree_re_enumerates_from_scratch() {
    let probe = Probe::new("probe", |_| true);
    let table = table_with(std::slice::from_ref(&probe));
    let mut ast = Ast::new();
    let dom = ast.literal(strings(&["a", "b", "c"]));
    let x = ast.id("x");
    let cond = ast.apply("probe", vec![x]);
    let root = ast.quantifier(QuantifierKind::Forall, "x", dom, cond);
    let mut interp = Interpreter::new(ConstructRegistry::standard(), table, root);

    assert_eq!(
        interp.execute_tree(&mut ast),
        Ok(Element::boolean(true))
    );
    assert_eq!(probe.calls(), 3);
    assert_eq!(interp.lookup_env("x"), None);

    interp.clear_tree(&mut ast, root);
    interp.set_position(root);
    assert_eq!(
        interp.execute_tree(&mut ast),
        Ok(Element::boolean(true))
    );
    assert_eq!(probe.calls(), 6);
}

#[test]
fn abandoning_a_half_finished_evaluation_unwinds_all_state() {
    let probe = Probe::new("probe", |_| true);
    let table = table_with(std::slice::from_ref(&probe));
    let mut ast = Ast::new();
    let dom = ast.literal(strings(&["a", "b", "c"]));
    let x = ast.id("x");
    let cond = ast.apply("probe", vec![x]);
    let root = ast.quantifier(QuantifierKind::Forall, "x", dom, cond);
    let mut interp = Interpreter::new(ConstructRegistry::standard(), table, root);

    // stop right after the first candidate was bound
    for _ in 0..4 {
        assert_eq!(interp.advance(&mut ast), Ok(StepOutcome::Progress));
    }
    assert_eq!(interp.lookup_env("x"), Some(&Element::string("a")));

    interp.abandon(&mut ast, root);
    interp.abandon(&mut ast, root); // idempotent
    // no stale candidate binding survives the abort
    assert_eq!(interp.lookup_env("x"), None);
    assert!(!ast.is_evaluated(root));
    assert_eq!(interp.position(), root);
    let before = probe.calls();

    assert_eq!(
        interp.execute_tree(&mut ast),
        Ok(Element::boolean(true))
    );
    // enumeration restarted from the full domain
    assert_eq!(probe.calls(), before + 3);
    assert_eq!(interp.lookup_env("x"), None);
}

// ─────────────────────────────────────────────────────────────────────
// Nesting
// ─────────────────────────────────────────────────────────────────────

#[test]
fn nested_quantifiers_with_the_same_variable_name_stay_isolated() {
    // forall x in [1, 2] holds (exists x in [10, 20] holds isTen(x))
    let probe = Probe::new("isTen", |e| *e == Element::number(10.0));
    let table = table_with(std::slice::from_ref(&probe));
    let mut ast = Ast::new();
    let inner_dom = ast.literal(Element::list(vec![
        Element::number(10.0),
        Element::number(20.0),
    ]));
    let x = ast.id("x");
    let inner_cond = ast.apply("isTen", vec![x]);
    let inner = ast.quantifier(QuantifierKind::Exists, "x", inner_dom, inner_cond);
    let outer_dom = ast.literal(Element::list(vec![
        Element::number(1.0),
        Element::number(2.0),
    ]));
    let root = ast.quantifier(QuantifierKind::Forall, "x", outer_dom, inner);

    let mut interp = Interpreter::new(ConstructRegistry::standard(), table, root);
    assert_eq!(
        interp.execute_tree(&mut ast),
        Ok(Element::boolean(true))
    );
    // the inner condition only ever sees the inner binding, once per
    // outer candidate (10 is a witness, so 20 is never tried)
    assert_eq!(
        probe.seen(),
        vec![Element::number(10.0), Element::number(10.0)]
    );
    assert_eq!(interp.lookup_env("x"), None);
}

// ─────────────────────────────────────────────────────────────────────
// Fatal type errors
// ─────────────────────────────────────────────────────────────────────

#[test]
fn non_enumerable_domain_aborts_the_step() {
    let probe = Probe::new("probe", |_| true);
    let result = run_quantified(QuantifierKind::Forall, Element::number(5.0), &probe);
    assert!(matches!(
        result,
        Err(EvalError::DomainNotEnumerable { quantifier: "forall", .. })
    ));
    assert_eq!(probe.calls(), 0);
}

#[test]
fn undef_domain_aborts_the_step() {
    let probe = Probe::new("probe", |_| true);
    let result = run_quantified(QuantifierKind::Exists, Element::Undef, &probe);
    assert!(matches!(
        result,
        Err(EvalError::DomainNotEnumerable { quantifier: "exists", .. })
    ));
}

#[test]
fn non_boolean_condition_aborts_the_step() {
    let table = Arc::new(FunctionTable::new());
    let mut ast = Ast::new();
    let dom = ast.literal(strings(&["a"]));
    let cond = ast.literal(Element::number(1.0));
    let root = ast.quantifier(QuantifierKind::Forall, "x", dom, cond);
    let mut interp = Interpreter::new(ConstructRegistry::standard(), table, root);
    assert!(matches!(
        interp.execute_tree(&mut ast),
        Err(EvalError::NonBooleanCondition { quantifier: "forall", .. })
    ));
}

// ─────────────────────────────────────────────────────────────────────
// Interleaved drivers
// ─────────────────────────────────────────────────────────────────────

#[test]
fn two_drivers_interleave_without_sharing_state() {
    let pa = Probe::new("pa", |_| true);
    let pb = Probe::new("pb", |e| *e == Element::number(5.0));
    let table = table_with(&[pa.clone(), pb.clone()]);
    let registry = ConstructRegistry::standard();

    let mut ast_a = Ast::new();
    let dom_a = ast_a.literal(Element::list(vec![
        Element::number(1.0),
        Element::number(2.0),
        Element::number(3.0),
    ]));
    let xa = ast_a.id("x");
    let cond_a = ast_a.apply("pa", vec![xa]);
    let root_a = ast_a.quantifier(QuantifierKind::Forall, "x", dom_a, cond_a);

    let mut ast_b = Ast::new();
    let dom_b = ast_b.literal(Element::list(vec![
        Element::number(4.0),
        Element::number(5.0),
        Element::number(6.0),
    ]));
    let xb = ast_b.id("x");
    let cond_b = ast_b.apply("pb", vec![xb]);
    let root_b = ast_b.quantifier(QuantifierKind::Exists, "x", dom_b, cond_b);

    let mut ia = Interpreter::new(registry.clone(), table.clone(), root_a);
    let mut ib = Interpreter::new(registry, table, root_b);

    // one micro-step each, round-robin, until both roots finish
    let mut done_a = None;
    let mut done_b = None;
    while done_a.is_none() || done_b.is_none() {
        if done_a.is_none() {
            if let StepOutcome::Complete(v) = ia.advance(&mut ast_a).unwrap() {
                done_a = Some(v);
            }
        }
        if done_b.is_none() {
            if let StepOutcome::Complete(v) = ib.advance(&mut ast_b).unwrap() {
                done_b = Some(v);
            }
        }
    }

    assert_eq!(done_a, Some(Element::boolean(true)));
    assert_eq!(done_b, Some(Element::boolean(true)));
    assert_eq!(pa.calls(), 3);
    assert_eq!(
        pb.seen(),
        vec![Element::number(4.0), Element::number(5.0)]
    );
}
