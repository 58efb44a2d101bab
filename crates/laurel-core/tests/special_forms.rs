mod common;

use common::{boolean, list, num, session, string, sym};
use laurel_core::ast::ExprKind;
use laurel_core::error::LaurelError;
use laurel_core::eval::eval;

#[test]
fn def_installs_a_global_and_returns_the_symbol() {
    let (rt, scope) = session();
    let result = eval(&rt, &scope, &list(vec![sym("def"), sym("x"), num(5)])).unwrap();
    assert!(matches!(&result.kind, ExprKind::Symbol(s) if s.name() == "x"));
    assert_eq!(eval(&rt, &scope, &sym("x")).unwrap(), num(5));
}

#[test]
fn redefinition_is_last_writer_wins() {
    let (rt, scope) = session();
    eval(&rt, &scope, &list(vec![sym("def"), sym("x"), num(5)])).unwrap();
    eval(&rt, &scope, &list(vec![sym("def"), sym("x"), num(6)])).unwrap();
    assert_eq!(eval(&rt, &scope, &sym("x")).unwrap(), num(6));
}

#[test]
fn def_value_is_evaluated_in_the_current_scope() {
    let (rt, scope) = session();
    scope.write().unwrap().define("seed", num(9));
    eval(&rt, &scope, &list(vec![sym("def"), sym("x"), sym("seed")])).unwrap();
    assert_eq!(rt.lookup_global("x"), Some(num(9)));
}

#[test]
fn def_with_a_non_symbol_name_is_a_type_error_and_mutates_nothing() {
    let (rt, scope) = session();
    eval(&rt, &scope, &list(vec![sym("def"), sym("x"), num(1)])).unwrap();
    let err = eval(&rt, &scope, &list(vec![sym("def"), num(5), num(5)])).unwrap_err();
    assert!(matches!(err, LaurelError::TypeMismatch { .. }));
    assert_eq!(rt.lookup_global("x"), Some(num(1)));
}

#[test]
fn def_rejects_qualified_names() {
    let (rt, scope) = session();
    let err = eval(&rt, &scope, &list(vec![sym("def"), sym("lib/x"), num(1)])).unwrap_err();
    assert!(matches!(err, LaurelError::TypeMismatch { .. }));
}

#[test]
fn def_arity_errors() {
    let (rt, scope) = session();
    for form in [
        list(vec![sym("def")]),
        list(vec![sym("def"), sym("x")]),
        list(vec![sym("def"), sym("x"), num(1), num(2)]),
    ] {
        let err = eval(&rt, &scope, &form).unwrap_err();
        assert!(matches!(err, LaurelError::Arity(_)), "form: {}", form);
    }
}

#[test]
fn def_failure_does_not_poison_later_forms() {
    let (rt, scope) = session();
    let bad = list(vec![sym("def"), sym("x"), sym("no-such-value")]);
    assert!(eval(&rt, &scope, &bad).is_err());
    assert!(!rt.has_global("x"));
    eval(&rt, &scope, &list(vec![sym("def"), sym("x"), num(3)])).unwrap();
    assert!(rt.has_global("x"));
    assert_eq!(eval(&rt, &scope, &sym("x")).unwrap(), num(3));
}

#[test]
fn if_false_takes_the_else_branch() {
    let (rt, scope) = session();
    let form = list(vec![sym("if"), boolean(false), num(1), num(2)]);
    assert_eq!(eval(&rt, &scope, &form).unwrap(), num(2));
}

#[test]
fn the_untaken_branch_is_never_evaluated() {
    let (rt, scope) = session();
    let exploding = list(vec![sym("no-such-fn")]);
    let form = list(vec![sym("if"), boolean(false), exploding.clone(), num(2)]);
    assert_eq!(eval(&rt, &scope, &form).unwrap(), num(2));
    let form = list(vec![sym("if"), boolean(true), num(1), exploding]);
    assert_eq!(eval(&rt, &scope, &form).unwrap(), num(1));
}

#[test]
fn zero_and_empty_values_are_truthy() {
    let (rt, scope) = session();
    let form = list(vec![sym("if"), num(0), string("yes"), string("no")]);
    assert_eq!(eval(&rt, &scope, &form).unwrap(), string("yes"));
    let form = list(vec![sym("if"), list(vec![]), num(1), num(2)]);
    assert_eq!(eval(&rt, &scope, &form).unwrap(), num(1));
}

#[test]
fn nil_predicate_is_falsy() {
    let (rt, scope) = session();
    let form = list(vec![
        sym("if"),
        laurel_core::Expr::nil(),
        num(1),
        num(2),
    ]);
    assert_eq!(eval(&rt, &scope, &form).unwrap(), num(2));
}

#[test]
fn if_arity_errors() {
    let (rt, scope) = session();
    for form in [
        list(vec![sym("if")]),
        list(vec![sym("if"), boolean(true), num(1)]),
        list(vec![sym("if"), boolean(true), num(1), num(2), num(3)]),
    ] {
        let err = eval(&rt, &scope, &form).unwrap_err();
        assert!(matches!(err, LaurelError::Arity(_)), "form: {}", form);
    }
}

#[test]
fn a_failing_predicate_propagates() {
    let (rt, scope) = session();
    let form = list(vec![sym("if"), sym("ghost"), num(1), num(2)]);
    let err = eval(&rt, &scope, &form).unwrap_err();
    assert!(matches!(err, LaurelError::UnboundSymbol(_)));
}
