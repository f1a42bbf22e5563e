//! Functional adapter generation for single-method interfaces.
//!
//! Given a program and the name of an interface with exactly one method,
//! [`generate`] produces two declarations:
//!
//! - a function type `<Interface>Func` with the method's signature, and
//! - a method on that function type that satisfies the interface by calling
//!   the function value itself.
//!
//! ```text
//! type ContexterFunc func(context.Context) context.Context
//!
//! func (fn ContexterFunc) Context(ctx context.Context) context.Context {
//!         return fn(ctx)
//! }
//! ```

mod error;
pub mod lookup;
pub mod names;
pub mod synth;

pub use error::{GenerateError, Shape};
pub use lookup::{find_interface, Target};

use ifunc_ir::{Decl, FuncDecl, Program, TypeSpec};

/// The two declarations produced for one interface.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    /// `type <Interface>Func func(...) ...`
    pub func_type: TypeSpec,
    /// `func (fn <Interface>Func) Method(...) ... { ... }`
    pub adapter: FuncDecl,
}

impl Generated {
    /// The declarations in print order.
    pub fn into_decls(self) -> Vec<Decl> {
        vec![Decl::Type(self.func_type), Decl::Func(self.adapter)]
    }
}

/// Generate a function type implementing the interface `interface_name`.
///
/// `location` only labels error messages (usually the scanned directory).
pub fn generate(
    location: &str,
    interface_name: &str,
    program: &Program,
) -> Result<Generated, GenerateError> {
    let target = find_interface(location, interface_name, program)?;
    Ok(Generated {
        func_type: synth::func_type(&target),
        adapter: synth::adapter(&target),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifunc_ir::*;

    fn contexter_program() -> Program {
        let ctx = || TypeExpr::qualified("context", "Context");
        let iface = TypeSpec::new(
            "Contexter",
            TypeExpr::interface(vec![Field::method(
                "Context",
                FuncType::new(vec![Field::unnamed(ctx())], Some(vec![Field::unnamed(ctx())])),
            )]),
        );
        let mut program = Program::new();
        program.add_file(
            "contexter.go",
            File::new("onepackage").with("Contexter", Binding::Type(iface)),
        );
        program
    }

    #[test]
    fn test_generate_contexter() {
        let generated = generate("testdata", "Contexter", &contexter_program()).unwrap();
        let ctx = TypeExpr::qualified("context", "Context");

        assert_eq!(generated.func_type.name, "ContexterFunc");
        assert_eq!(
            generated.func_type.ty,
            TypeExpr::func(
                vec![Field::unnamed(ctx.clone())],
                Some(vec![Field::unnamed(ctx.clone())])
            )
        );

        let adapter = &generated.adapter;
        assert_eq!(adapter.name, "Context");
        assert_eq!(
            adapter.recv,
            Some(Field::named("fn", TypeExpr::ident("ContexterFunc")))
        );
        assert_eq!(adapter.ty.params, vec![Field::named("ctx", ctx)]);
        assert_eq!(
            adapter.body,
            Some(vec![Stmt::return_stmt(vec![Expr::call(
                Expr::ident("fn"),
                vec![Expr::ident("ctx")]
            )])])
        );
    }

    #[test]
    fn test_generate_is_deterministic() {
        let program = contexter_program();
        let first = generate("testdata", "Contexter", &program).unwrap();
        let second = generate("testdata", "Contexter", &program).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_into_decls_order() {
        let decls = generate("testdata", "Contexter", &contexter_program())
            .unwrap()
            .into_decls();
        assert_eq!(decls.len(), 2);
        assert!(matches!(&decls[0], Decl::Type(spec) if spec.name == "ContexterFunc"));
        assert!(matches!(&decls[1], Decl::Func(f) if f.name == "Context"));
    }

    #[test]
    fn test_generate_missing() {
        let err = generate("pkg", "Missing", &Program::new()).unwrap_err();
        assert_eq!(err.to_string(), "did not find pkg.Missing");
    }
}
