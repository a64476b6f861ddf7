mod common;

use common::{analyze, analyze_reporting_defer, count, messages, mismatch};
use namedreturns::ast::Stmt;
use namedreturns::builder::UnitBuilder;
use namedreturns::diagnostics::DiagnosticKind;
use namedreturns::span::Spanned;

/// `func f() (n int, err error)` whose body is built by `body`.
fn with_error_result(body: impl FnOnce(&UnitBuilder) -> Vec<Spanned<Stmt>>) -> UnitBuilder {
    let b = UnitBuilder::new("defer.go");
    let results = vec![b.result("n", "int"), b.result("err", "error")];
    let stmts = body(&b);
    b.func("f", vec![], Some(results), stmts);
    b
}

fn recover_into_err(b: &UnitBuilder) -> Spanned<Stmt> {
    b.defer_closure(vec![b.if_init(
        Some(b.define(&["r"], vec![b.call("recover", vec![])])),
        b.binary("!=", b.name("r"), b.nil()),
        vec![b.assign(&["err"], vec![b.call("errorf", vec![b.string_lit("panic: %v"), b.name("r")])])],
        None,
    )])
}

#[test]
fn error_assigned_in_deferred_closure_is_exempt() {
    let b = with_error_result(|b| {
        vec![
            recover_into_err(b),
            b.assign(&["n"], vec![b.int(1)]),
            b.ret_exprs(vec![b.name("n"), b.nil()]),
        ]
    });
    assert!(analyze(b).is_empty());
}

#[test]
fn flag_disables_the_exemption() {
    let b = with_error_result(|b| {
        vec![
            recover_into_err(b),
            b.ret_exprs(vec![b.name("n"), b.nil()]),
        ]
    });
    assert_eq!(messages(&analyze_reporting_defer(b)), vec![mismatch("err")]);
}

#[test]
fn exempt_error_is_not_checked_for_shadowing() {
    let build = || {
        let b = UnitBuilder::new("defer.go");
        let results = vec![b.result("n", "int"), b.result("err", "error")];
        let stmts = vec![
            b.defer_closure(vec![b.assign(&["err"], vec![b.call("wrap", vec![b.name("err")])])]),
            b.define(&["err"], vec![b.call("open", vec![])]),
            b.ret(&["n", "err"]),
        ];
        b.func("f", vec![], Some(results), stmts);
        b
    };

    assert!(analyze(build()).is_empty());
    assert_eq!(count(&analyze_reporting_defer(build()), DiagnosticKind::ShadowedReturn), 1);
}

#[test]
fn defer_of_named_function_does_not_exempt() {
    let b = with_error_result(|b| {
        vec![
            b.defer(b.call("cleanup", vec![b.name("err")])),
            b.ret_exprs(vec![b.name("n"), b.nil()]),
        ]
    });
    assert_eq!(messages(&analyze(b)), vec![mismatch("err")]);
}

#[test]
fn deferred_closure_that_only_reads_error_does_not_exempt() {
    let b = with_error_result(|b| {
        vec![
            b.defer_closure(vec![b.expr_stmt(b.call("log", vec![b.name("err")]))]),
            b.ret_exprs(vec![b.name("n"), b.nil()]),
        ]
    });
    assert_eq!(messages(&analyze(b)), vec![mismatch("err")]);
}

#[test]
fn closure_assigning_its_own_err_does_not_exempt() {
    let b = with_error_result(|b| {
        vec![
            b.defer_closure(vec![
                b.define(&["err"], vec![b.call("flush", vec![])]),
                b.assign(&["err"], vec![b.nil()]),
            ]),
            b.ret_exprs(vec![b.name("n"), b.nil()]),
        ]
    });
    let diags = analyze(b);
    assert_eq!(count(&diags, DiagnosticKind::ReturnMismatch), 1);
    // The closure's `err :=` is also seen by the shadow check.
    assert_eq!(count(&diags, DiagnosticKind::ShadowedReturn), 1);
}

#[test]
fn user_type_named_error_is_not_exempt() {
    let b = UnitBuilder::new("defer.go");
    let results = vec![b.result("n", "int"), b.field(&["err"], b.local_ty("error"))];
    let stmts = vec![
        b.defer_closure(vec![b.assign(&["err"], vec![b.nil()])]),
        b.ret_exprs(vec![b.name("n"), b.nil()]),
    ];
    b.func("f", vec![], Some(results), stmts);
    assert_eq!(messages(&analyze(b)), vec![mismatch("err")]);
}

#[test]
fn non_error_result_assigned_in_defer_is_still_tracked() {
    let b = UnitBuilder::new("defer.go");
    let results = vec![b.result("n", "int")];
    let stmts = vec![
        b.defer_closure(vec![b.assign(&["n"], vec![b.int(2)])]),
        b.ret_exprs(vec![b.int(1)]),
    ];
    b.func("f", vec![], Some(results), stmts);
    assert_eq!(messages(&analyze(b)), vec![mismatch("n")]);
}

#[test]
fn defer_nested_in_control_flow_counts() {
    let b = with_error_result(|b| {
        vec![
            b.if_stmt(
                b.name("verbose"),
                vec![b.defer_closure(vec![b.assign(&["err"], vec![b.nil()])])],
                None,
            ),
            b.ret_exprs(vec![b.name("n"), b.nil()]),
        ]
    });
    assert!(analyze(b).is_empty());
}

#[test]
fn assignment_deep_inside_deferred_closure_counts() {
    let b = with_error_result(|b| {
        let inner = b.func_lit(vec![], None, vec![b.assign(&["err"], vec![b.nil()])]);
        vec![
            b.defer_closure(vec![b.for_stmt(None, None, None, vec![b.expr_stmt(b.call_expr(inner, vec![]))])]),
            b.ret_exprs(vec![b.name("n"), b.nil()]),
        ]
    });
    assert!(analyze(b).is_empty());
}

#[test]
fn defer_inside_nested_literal_belongs_to_the_literal() {
    let b = with_error_result(|b| {
        let worker = b.func_lit(vec![], None, vec![b.defer_closure(vec![b.assign(&["err"], vec![b.nil()])])]);
        vec![
            b.go_stmt(b.call_expr(worker, vec![])),
            b.ret_exprs(vec![b.name("n"), b.nil()]),
        ]
    });
    assert_eq!(messages(&analyze(b)), vec![mismatch("err")]);
}

#[test]
fn multiple_assignment_targets_in_defer() {
    let b = with_error_result(|b| {
        vec![
            b.defer_closure(vec![b.assign(&["_", "err"], vec![b.call("close", vec![])])]),
            b.ret_exprs(vec![b.name("n"), b.nil()]),
        ]
    });
    assert!(analyze(b).is_empty());
}
