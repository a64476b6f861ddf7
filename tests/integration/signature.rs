mod common;

use common::{analyze, count, kinds, messages};
use namedreturns::ast::{ChanDir, Field, TypeKind};
use namedreturns::builder::UnitBuilder;
use namedreturns::diagnostics::DiagnosticKind;

#[test]
fn named_results_used_in_every_return_are_clean() {
    let b = UnitBuilder::new("div.go");
    b.func(
        "div",
        vec![b.param("a", "int"), b.param("d", "int")],
        Some(vec![b.result("q", "int"), b.result("err", "error")]),
        vec![
            b.if_stmt(
                b.binary("==", b.name("d"), b.int(0)),
                vec![
                    b.assign(&["err"], vec![b.call("errorf", vec![b.string_lit("zero")])]),
                    b.ret(&["q", "err"]),
                ],
                None,
            ),
            b.assign(&["q"], vec![b.binary("/", b.name("a"), b.name("d"))]),
            b.ret(&["q", "err"]),
        ],
    );
    assert!(analyze(b).is_empty());
}

#[test]
fn unnamed_results_are_reported_at_function() {
    let b = UnitBuilder::new("f.go");
    let span = b.func(
        "f",
        vec![],
        Some(vec![b.unnamed("int"), b.unnamed("error")]),
        vec![b.ret_exprs(vec![b.int(1), b.nil()])],
    );
    let diags = analyze(b);
    assert_eq!(
        messages(&diags),
        vec![
            "unnamed return with type \"int\" found - named returns are required",
            "unnamed return with type \"error\" found - named returns are required",
        ]
    );
    assert!(diags.iter().all(|d| d.span == span));
}

#[test]
fn single_unnamed_composite_result() {
    let b = UnitBuilder::new("f.go");
    let key = b.ty("string").node;
    let value = b.ty("string").node;
    let map = b.composite_ty(TypeKind::Map { key: Box::new(key), value: Box::new(value) });
    b.func(
        "index",
        vec![],
        Some(vec![Field { names: vec![], ty: map }]),
        vec![b.ret_exprs(vec![b.nil()])],
    );
    assert_eq!(
        messages(&analyze(b)),
        vec!["unnamed return with type \"map[string]string\" found - named returns are required"]
    );
}

#[test]
fn channel_and_pointer_types_render_like_go() {
    let b = UnitBuilder::new("f.go");
    let chan = b.composite_ty(TypeKind::Chan { dir: ChanDir::Recv, elem: Box::new(b.ty("int").node) });
    let ptr = b.composite_ty(TypeKind::Pointer(Box::new(b.qualified_ty("bytes", "Buffer").node)));
    b.func(
        "f",
        vec![],
        Some(vec![
            Field { names: vec![], ty: chan },
            Field { names: vec![], ty: ptr },
        ]),
        vec![],
    );
    assert_eq!(
        messages(&analyze(b)),
        vec![
            "unnamed return with type \"<-chan int\" found - named returns are required",
            "unnamed return with type \"*bytes.Buffer\" found - named returns are required",
        ]
    );
}

#[test]
fn underscore_result_is_reported_at_name() {
    let b = UnitBuilder::new("f.go");
    let results = vec![b.result("_", "int"), b.result("err", "error")];
    let underscore = results[0].names[0].span;
    b.func("f", vec![], Some(results), vec![b.ret(&["_", "err"])]);
    let diags = analyze(b);
    assert_eq!(kinds(&diags), vec![DiagnosticKind::PlaceholderReturnName]);
    assert_eq!(diags[0].span, underscore);
    assert_eq!(
        diags[0].msg,
        "underscore as a return variable name is unacceptable for type \"int\""
    );
}

#[test]
fn underscore_is_not_tracked_for_usage() {
    let b = UnitBuilder::new("f.go");
    b.func(
        "f",
        vec![],
        Some(vec![b.result("_", "int"), b.result("n", "int")]),
        vec![b.ret_exprs(vec![b.int(0), b.name("n")])],
    );
    let diags = analyze(b);
    assert_eq!(count(&diags, DiagnosticKind::PlaceholderReturnName), 1);
    assert_eq!(count(&diags, DiagnosticKind::ReturnMismatch), 0);
}

#[test]
fn grouped_names_sharing_a_type() {
    let b = UnitBuilder::new("f.go");
    b.func(
        "pair",
        vec![],
        Some(vec![b.field(&["x", "_", "y"], b.ty("float64"))]),
        vec![b.ret_exprs(vec![b.name("x"), b.int(0), b.name("y")])],
    );
    let diags = analyze(b);
    assert_eq!(kinds(&diags), vec![DiagnosticKind::PlaceholderReturnName]);
    assert!(diags[0].msg.ends_with("for type \"float64\""));
}

#[test]
fn methods_are_checked_like_functions() {
    let b = UnitBuilder::new("m.go");
    let server = b.local_ty("Server").node;
    let recv = b.field(&["s"], b.composite_ty(TypeKind::Pointer(Box::new(server))));
    b.method(recv, "Addr", vec![], Some(vec![b.unnamed("string")]), vec![b.ret_exprs(vec![b.string_lit("")])]);
    assert_eq!(kinds(&analyze(b)), vec![DiagnosticKind::UnnamedReturn]);
}

#[test]
fn function_literal_results_are_classified() {
    let b = UnitBuilder::new("f.go");
    let lit = b.func_lit(
        vec![],
        Some(vec![b.unnamed("bool")]),
        vec![b.ret_exprs(vec![b.name("true")])],
    );
    b.func("main", vec![], None, vec![b.define(&["ok"], vec![lit])]);
    assert_eq!(
        messages(&analyze(b)),
        vec!["unnamed return with type \"bool\" found - named returns are required"]
    );
}

#[test]
fn generic_instantiated_result() {
    let b = UnitBuilder::new("f.go");
    let generic = b.composite_ty(TypeKind::Generic {
        base: Box::new(b.local_ty("List").node),
        args: vec![b.ty("int").node],
    });
    b.func(
        "f",
        vec![],
        Some(vec![Field { names: vec![], ty: generic }]),
        vec![],
    );
    assert_eq!(
        messages(&analyze(b)),
        vec!["unnamed return with type \"List[int]\" found - named returns are required"]
    );
}
