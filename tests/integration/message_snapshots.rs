//! Snapshot tests for diagnostic message text.
//!
//! Message prefixes are matched by downstream suppression rules, so any change
//! here is a breaking change. Run `cargo insta review` to review changes.

mod common;

use common::analyze;
use insta::assert_snapshot;
use namedreturns::ast::{Field, FieldList, FuncType, TypeKind};
use namedreturns::builder::UnitBuilder;
use namedreturns::diagnostics::Diagnostic;

/// One diagnostic per line, without positions.
fn report(diags: &[Diagnostic]) -> String {
    diags.iter().map(|d| d.to_string()).collect::<Vec<_>>().join("\n")
}

#[test]
fn unnamed_return_message() {
    let b = UnitBuilder::new("m.go");
    b.func("f", vec![], Some(vec![b.unnamed("int")]), vec![b.ret_exprs(vec![b.int(1)])]);
    assert_snapshot!(
        report(&analyze(b)),
        @r#"unnamed return with type "int" found - named returns are required [unnamed-return]"#
    );
}

#[test]
fn placeholder_name_message() {
    let b = UnitBuilder::new("m.go");
    b.func("f", vec![], Some(vec![b.field(&["_"], b.qualified_ty("io", "Reader"))]), vec![b.bare_ret()]);
    assert_snapshot!(
        report(&analyze(b)),
        @r#"underscore as a return variable name is unacceptable for type "io.Reader" [placeholder-return-name]"#
    );
}

#[test]
fn mismatch_message() {
    let b = UnitBuilder::new("m.go");
    b.func(
        "f",
        vec![],
        Some(vec![b.result("count", "int")]),
        vec![b.ret_exprs(vec![b.int(0)])],
    );
    assert_snapshot!(
        report(&analyze(b)),
        @r#"named return variable "count" is declared but not used in return statement [return-mismatch]"#
    );
}

#[test]
fn shadow_messages() {
    let b = UnitBuilder::new("m.go");
    b.func(
        "f",
        vec![],
        Some(vec![b.result("k", "string"), b.result("err", "error")]),
        vec![
            b.var_decl(&["err"], Some("error"), vec![]),
            b.range_define(Some("k"), None, b.name("keys"), vec![]),
            b.for_stmt(Some(b.define(&["k"], vec![b.string_lit("")])), None, None, vec![]),
            b.bare_ret(),
        ],
    );
    assert_snapshot!(report(&analyze(b)), @r#"
    named return variable "err" is shadowed by local variable declaration [shadowed-return]
    named return variable "k" is shadowed by range loop variable [shadowed-return]
    named return variable "k" is shadowed by for loop variable [shadowed-return]
    named return variable "k" is shadowed by local variable declaration [shadowed-return]
    "#);
}

#[test]
fn function_typed_result_is_rendered_in_full() {
    let b = UnitBuilder::new("m.go");
    let sig = FuncType {
        params: FieldList { fields: vec![Field { names: vec![], ty: b.ty("string") }] },
        results: Some(FieldList {
            fields: vec![Field { names: vec![], ty: b.ty("int") }, Field { names: vec![], ty: b.ty("error") }],
        }),
    };
    let func_ty = b.composite_ty(TypeKind::Func(Box::new(sig)));
    b.func("parser", vec![], Some(vec![Field { names: vec![], ty: func_ty }]), vec![]);
    assert_snapshot!(
        report(&analyze(b)),
        @r#"unnamed return with type "func(string) (int, error)" found - named returns are required [unnamed-return]"#
    );
}

#[test]
fn interface_result_is_rendered_in_full() {
    let b = UnitBuilder::new("m.go");
    let close = FuncType {
        params: FieldList::default(),
        results: Some(FieldList { fields: vec![Field { names: vec![], ty: b.ty("error") }] }),
    };
    let method_ty = b.composite_ty(TypeKind::Func(Box::new(close)));
    let iface = TypeKind::Interface(FieldList {
        fields: vec![Field { names: vec![b.ident("Close")], ty: method_ty }],
    });
    let iface_ty = b.composite_ty(iface);
    b.func("closer", vec![], Some(vec![Field { names: vec![], ty: iface_ty }]), vec![]);
    assert_snapshot!(
        report(&analyze(b)),
        @r#"unnamed return with type "interface{Close() error}" found - named returns are required [unnamed-return]"#
    );
}

#[test]
fn mixed_function_report() {
    let b = UnitBuilder::new("m.go");
    b.func(
        "load",
        vec![b.param("path", "string")],
        Some(vec![b.unnamed("int"), b.result("_", "bool"), b.result("err", "error")]),
        vec![
            b.define(&["err"], vec![b.call("open", vec![b.name("path")])]),
            b.ret_exprs(vec![b.int(0), b.name("false"), b.nil()]),
        ],
    );
    assert_snapshot!(report(&analyze(b)), @r#"
    unnamed return with type "int" found - named returns are required [unnamed-return]
    named return variable "err" is declared but not used in return statement [return-mismatch]
    underscore as a return variable name is unacceptable for type "bool" [placeholder-return-name]
    named return variable "err" is shadowed by local variable declaration [shadowed-return]
    "#);
}
