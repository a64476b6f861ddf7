use crate::ast::FieldList;
use crate::diagnostics::Diagnostic;
use crate::pretty::type_expr_string;
use crate::span::Span;

use super::NamedReturn;

/// Result list split into trackable names and naming violations.
#[derive(Debug)]
pub struct Classified<'a> {
    /// Valid names, in declaration order.
    pub named: Vec<NamedReturn<'a>>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Classify each declared result as named, unnamed, or bound to `_`.
///
/// Unnamed results are reported at `func_span`, one diagnostic per result
/// entry. `_` names are reported at the name itself. Neither is tracked.
pub fn classify(results: &FieldList, func_span: Span) -> Classified<'_> {
    let mut named = Vec::new();
    let mut diagnostics = Vec::new();

    for field in &results.fields {
        if field.names.is_empty() {
            diagnostics.push(Diagnostic::unnamed_return(&type_expr_string(&field.ty.node), func_span));
            continue;
        }

        for ident in &field.names {
            if ident.node.is_blank() {
                diagnostics.push(Diagnostic::placeholder_return_name(
                    &type_expr_string(&field.ty.node),
                    ident.span,
                ));
                continue;
            }
            named.push(NamedReturn { ident, ty: &field.ty, exempt: false });
        }
    }

    Classified { named, diagnostics }
}
