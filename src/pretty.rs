use crate::ast::*;

/// Render a type expression the way Go's `types.ExprString` does.
pub fn type_expr_string(ty: &TypeExpr) -> String {
    let mut pp = TypePrinter::new();
    pp.emit_type_expr(ty);
    pp.buf
}

struct TypePrinter {
    buf: String,
}

impl TypePrinter {
    fn new() -> Self {
        Self { buf: String::new() }
    }

    fn write(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    fn emit_type_expr(&mut self, ty: &TypeExpr) {
        match &ty.kind {
            TypeKind::Name(name) => self.write(name),
            TypeKind::Qualified { package, name } => {
                self.write(package);
                self.write(".");
                self.write(name);
            }
            TypeKind::Pointer(elem) => {
                self.write("*");
                self.emit_type_expr(elem);
            }
            TypeKind::Slice(elem) => {
                self.write("[]");
                self.emit_type_expr(elem);
            }
            TypeKind::Array { len, elem } => {
                self.write("[");
                self.write(len);
                self.write("]");
                self.emit_type_expr(elem);
            }
            TypeKind::Map { key, value } => {
                self.write("map[");
                self.emit_type_expr(key);
                self.write("]");
                self.emit_type_expr(value);
            }
            TypeKind::Chan { dir, elem } => {
                self.write(match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                });
                self.emit_type_expr(elem);
            }
            TypeKind::Func(func) => {
                self.write("func");
                self.emit_signature(func);
            }
            TypeKind::Ellipsis(elem) => {
                self.write("...");
                self.emit_type_expr(elem);
            }
            TypeKind::Interface(methods) => {
                self.write("interface{");
                self.emit_field_list(methods, "; ", true);
                self.write("}");
            }
            TypeKind::Struct(fields) => {
                self.write("struct{");
                self.emit_field_list(fields, "; ", false);
                self.write("}");
            }
            TypeKind::Generic { base, args } => {
                self.emit_type_expr(base);
                self.write("[");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_type_expr(arg);
                }
                self.write("]");
            }
        }
    }

    fn emit_signature(&mut self, func: &FuncType) {
        self.write("(");
        self.emit_field_list(&func.params, ", ", false);
        self.write(")");

        let Some(results) = &func.results else {
            return;
        };
        match results.fields.as_slice() {
            [] => {}
            // A single unnamed result needs no parentheses.
            [only] if only.names.is_empty() => {
                self.write(" ");
                self.emit_type_expr(&only.ty.node);
            }
            _ => {
                self.write(" (");
                self.emit_field_list(results, ", ", false);
                self.write(")");
            }
        }
    }

    fn emit_field_list(&mut self, list: &FieldList, sep: &str, iface: bool) {
        for (i, field) in list.fields.iter().enumerate() {
            if i > 0 {
                self.write(sep);
            }
            for (j, name) in field.names.iter().enumerate() {
                if j > 0 {
                    self.write(", ");
                }
                self.write(&name.node.name);
            }
            // Interface methods print their signature directly after the name.
            if iface && !field.names.is_empty() {
                if let TypeKind::Func(func) = &field.ty.node.kind {
                    self.emit_signature(func);
                    continue;
                }
            }
            if !field.names.is_empty() {
                self.write(" ");
            }
            self.emit_type_expr(&field.ty.node);
        }
    }
}
