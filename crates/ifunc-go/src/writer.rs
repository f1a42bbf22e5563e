//! Go code emitter.

use ifunc_ir::*;
use std::fmt::Write;

/// Emits declarations as Go source, laid out the way gofmt would.
pub struct GoWriter {
    output: String,
    indent: usize,
}

impl GoWriter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    /// Emit declarations separated by a blank line, ending with a newline.
    pub fn emit(decls: &[Decl]) -> String {
        let mut writer = Self::new();
        for (i, decl) in decls.iter().enumerate() {
            if i > 0 {
                writer.output.push_str("\n\n");
            }
            writer.write_decl(decl);
        }
        writer.output.push('\n');
        writer.output
    }

    /// Emit a single declaration without a trailing newline.
    pub fn emit_decl(decl: &Decl) -> String {
        let mut writer = Self::new();
        writer.write_decl(decl);
        writer.output
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push('\t');
        }
    }

    fn write_decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Type(spec) => self.write_type_spec(spec),
            Decl::Func(func) => self.write_func_decl(func),
        }
    }

    fn write_type_spec(&mut self, spec: &TypeSpec) {
        write!(self.output, "type {}", spec.name).unwrap();
        if !spec.type_params.is_empty() {
            self.output.push('[');
            self.write_fields(&spec.type_params);
            self.output.push(']');
        }
        self.output.push_str(if spec.alias { " = " } else { " " });
        self.write_type(&spec.ty);
    }

    fn write_func_decl(&mut self, func: &FuncDecl) {
        self.output.push_str("func ");
        if let Some(recv) = &func.recv {
            self.output.push('(');
            self.write_field(recv);
            self.output.push_str(") ");
        }
        self.output.push_str(&func.name);
        self.write_signature(&func.ty);

        if let Some(body) = &func.body {
            self.output.push_str(" {\n");
            self.indent += 1;
            for stmt in body {
                self.write_stmt(stmt);
                self.output.push('\n');
            }
            self.indent -= 1;
            self.write_indent();
            self.output.push('}');
        }
    }

    fn write_stmt(&mut self, stmt: &Stmt) {
        self.write_indent();
        match stmt {
            Stmt::Expr(expr) => self.write_expr(expr),

            Stmt::Return(values) => {
                self.output.push_str("return");
                for (i, value) in values.iter().enumerate() {
                    self.output.push_str(if i == 0 { " " } else { ", " });
                    self.write_expr(value);
                }
            }
        }
    }

    fn write_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(name) => self.output.push_str(name),

            Expr::Call {
                func,
                args,
                ellipsis,
            } => {
                self.write_expr(func);
                self.output.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.write_expr(arg);
                }
                if *ellipsis {
                    self.output.push_str("...");
                }
                self.output.push(')');
            }
        }
    }

    /// `(params) results`, without the `func` keyword.
    fn write_signature(&mut self, sig: &FuncType) {
        self.output.push('(');
        self.write_fields(&sig.params);
        self.output.push(')');

        match sig.results.as_deref() {
            None | Some([]) => {}
            Some([single]) if single.names.is_empty() => {
                self.output.push(' ');
                self.write_type(&single.ty);
            }
            Some(results) => {
                self.output.push_str(" (");
                self.write_fields(results);
                self.output.push(')');
            }
        }
    }

    fn write_fields(&mut self, fields: &[Field]) {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.write_field(field);
        }
    }

    fn write_field(&mut self, field: &Field) {
        if !field.names.is_empty() {
            self.output.push_str(&field.names.join(", "));
            self.output.push(' ');
        }
        self.write_type(&field.ty);
    }

    fn write_type(&mut self, ty: &TypeExpr) {
        match ty {
            TypeExpr::Ident(name) => self.output.push_str(name),

            TypeExpr::Qualified { package, name } => {
                write!(self.output, "{}.{}", package, name).unwrap();
            }

            TypeExpr::Pointer(inner) => {
                self.output.push('*');
                self.write_type(inner);
            }

            TypeExpr::Slice(elem) => {
                self.output.push_str("[]");
                self.write_type(elem);
            }

            TypeExpr::Array { len, elem } => {
                write!(self.output, "[{}]", len).unwrap();
                self.write_type(elem);
            }

            TypeExpr::Map { key, value } => {
                self.output.push_str("map[");
                self.write_type(key);
                self.output.push(']');
                self.write_type(value);
            }

            TypeExpr::Chan { dir, elem } => {
                self.output.push_str(match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                });
                self.write_type(elem);
            }

            TypeExpr::Func(sig) => {
                self.output.push_str("func");
                self.write_signature(sig);
            }

            TypeExpr::Interface(iface) => self.write_interface(iface),

            TypeExpr::Variadic(elem) => {
                self.output.push_str("...");
                self.write_type(elem);
            }

            TypeExpr::Generic { base, args } => {
                self.write_type(base);
                self.output.push('[');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.write_type(arg);
                }
                self.output.push(']');
            }

            TypeExpr::Paren(inner) => {
                self.output.push('(');
                self.write_type(inner);
                self.output.push(')');
            }

            TypeExpr::Raw(text) => self.output.push_str(text),
        }
    }

    fn write_interface(&mut self, iface: &InterfaceType) {
        if iface.methods.is_empty() {
            self.output.push_str("interface{}");
            return;
        }
        self.output.push_str("interface {\n");
        self.indent += 1;
        for method in &iface.methods {
            self.write_indent();
            match (method.names.as_slice(), &method.ty) {
                ([name], TypeExpr::Func(sig)) => {
                    self.output.push_str(name);
                    self.write_signature(sig);
                }
                // Embedded interface
                _ => self.write_type(&method.ty),
            }
            self.output.push('\n');
        }
        self.indent -= 1;
        self.write_indent();
        self.output.push('}');
    }
}

impl Default for GoWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> TypeExpr {
        TypeExpr::qualified("context", "Context")
    }

    #[test]
    fn test_func_type_decl() {
        let decl = Decl::Type(TypeSpec::new(
            "ContexterFunc",
            TypeExpr::func(vec![Field::unnamed(ctx())], Some(vec![Field::unnamed(ctx())])),
        ));
        assert_eq!(
            GoWriter::emit_decl(&decl),
            "type ContexterFunc func(context.Context) context.Context"
        );
    }

    #[test]
    fn test_method_decl() {
        let decl = Decl::Func(FuncDecl::method(
            Field::named("fn", TypeExpr::ident("ContexterFunc")),
            "Context",
            FuncType::new(vec![Field::named("ctx", ctx())], Some(vec![Field::unnamed(ctx())])),
            vec![Stmt::return_stmt(vec![Expr::call(
                Expr::ident("fn"),
                vec![Expr::ident("ctx")],
            )])],
        ));
        assert_eq!(
            GoWriter::emit_decl(&decl),
            "func (fn ContexterFunc) Context(ctx context.Context) context.Context {\n\treturn fn(ctx)\n}"
        );
    }

    #[test]
    fn test_multiple_and_named_results() {
        let sig = FuncType::new(
            vec![Field::new(vec!["a".into(), "b".into()], TypeExpr::ident("int"))],
            Some(vec![
                Field::unnamed(TypeExpr::ident("int")),
                Field::unnamed(TypeExpr::ident("error")),
            ]),
        );
        let decl = Decl::Type(TypeSpec::new("F", TypeExpr::Func(sig)));
        assert_eq!(GoWriter::emit_decl(&decl), "type F func(a, b int) (int, error)");

        let named = FuncType::new(vec![], Some(vec![Field::named("n", TypeExpr::ident("int"))]));
        let decl = Decl::Type(TypeSpec::new("G", TypeExpr::Func(named)));
        assert_eq!(GoWriter::emit_decl(&decl), "type G func() (n int)");
    }

    #[test]
    fn test_composite_types() {
        let ty = TypeExpr::func(
            vec![
                Field::unnamed(TypeExpr::slice(TypeExpr::ident("byte"))),
                Field::unnamed(TypeExpr::map(
                    TypeExpr::ident("string"),
                    TypeExpr::pointer(TypeExpr::ident("Widget")),
                )),
                Field::unnamed(TypeExpr::chan(ChanDir::Recv, TypeExpr::ident("int"))),
                Field::unnamed(TypeExpr::chan(ChanDir::Send, TypeExpr::ident("int"))),
                Field::unnamed(TypeExpr::array("4", TypeExpr::ident("T"))),
                Field::unnamed(TypeExpr::generic(
                    TypeExpr::ident("List"),
                    vec![TypeExpr::ident("int")],
                )),
                Field::unnamed(TypeExpr::interface(vec![])),
                Field::unnamed(TypeExpr::variadic(TypeExpr::ident("any"))),
            ],
            None,
        );
        let decl = Decl::Type(TypeSpec::new("F", ty));
        assert_eq!(
            GoWriter::emit_decl(&decl),
            "type F func([]byte, map[string]*Widget, <-chan int, chan<- int, [4]T, List[int], interface{}, ...any)"
        );
    }

    #[test]
    fn test_spread_call_without_results() {
        let decl = Decl::Func(FuncDecl::method(
            Field::named("fn", TypeExpr::ident("LoggerFunc")),
            "Log",
            FuncType::new(
                vec![Field::named("args", TypeExpr::variadic(TypeExpr::ident("any")))],
                None,
            ),
            vec![Stmt::expr(Expr::call_spread(
                Expr::ident("fn"),
                vec![Expr::ident("args")],
            ))],
        ));
        assert_eq!(
            GoWriter::emit_decl(&decl),
            "func (fn LoggerFunc) Log(args ...any) {\n\tfn(args...)\n}"
        );
    }

    #[test]
    fn test_interface_type() {
        let decl = Decl::Type(TypeSpec::new(
            "ReadCloser",
            TypeExpr::interface(vec![
                Field::unnamed(TypeExpr::qualified("io", "Reader")),
                Field::method("Close", FuncType::new(vec![], Some(vec![Field::unnamed(TypeExpr::ident("error"))]))),
            ]),
        ));
        assert_eq!(
            GoWriter::emit_decl(&decl),
            "type ReadCloser interface {\n\tio.Reader\n\tClose() error\n}"
        );
    }

    #[test]
    fn test_emit_separates_decls() {
        let decls = vec![
            Decl::Type(TypeSpec::new("A", TypeExpr::ident("int"))),
            Decl::Type(TypeSpec::new("B", TypeExpr::ident("int"))),
        ];
        assert_eq!(GoWriter::emit(&decls), "type A int\n\ntype B int\n");
    }
}
