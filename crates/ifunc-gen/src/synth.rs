//! Building the function type and its adapter method.

use crate::lookup::Target;
use crate::names::{deduplicate_names, infer_param_name};
use ifunc_ir::{Expr, Field, FuncDecl, FuncType, Stmt, TypeExpr, TypeSpec};
use tracing::debug;

/// Receiver name of the generated method.
pub const RECEIVER: &str = "fn";

/// Name of the generated function type.
pub fn func_type_name(interface: &str) -> String {
    format!("{interface}Func")
}

/// `type <Interface>Func func(...) ...`, with the method's parameter and
/// result lists copied as they are.
pub fn func_type(target: &Target<'_>) -> TypeSpec {
    TypeSpec::new(
        func_type_name(&target.spec.name),
        TypeExpr::Func(target.signature.clone()),
    )
}

/// The method that makes `<Interface>Func` satisfy the interface.
pub fn adapter(target: &Target<'_>) -> FuncDecl {
    let params = adapter_params(target.signature);
    let body = forward_call(&params, target.signature.has_results());
    let recv = Field::named(RECEIVER, TypeExpr::ident(func_type_name(&target.spec.name)));
    let ty = FuncType::new(params, target.signature.results.clone());
    FuncDecl::method(recv, target.method, ty, vec![body])
}

/// Method parameters with every unnamed parameter given a name, and all
/// names made unique.
pub fn adapter_params(signature: &FuncType) -> Vec<Field> {
    let mut params: Vec<Field> = signature
        .params
        .iter()
        .map(|field| {
            if field.names.is_empty() {
                Field::named(infer_param_name(&field.ty), field.ty.clone())
            } else {
                field.clone()
            }
        })
        .collect();
    let passes = deduplicate_names(&mut params);
    debug!(passes, "named adapter parameters");
    params
}

/// `return fn(a, b)` or `fn(a, b)`, forwarding `params` in order.
fn forward_call(params: &[Field], has_results: bool) -> Stmt {
    let args: Vec<Expr> = params
        .iter()
        .flat_map(|field| field.names.iter().map(Expr::ident))
        .collect();
    let func = Expr::ident(RECEIVER);
    let call = match params.last() {
        Some(last) if last.ty.is_variadic() => Expr::call_spread(func, args),
        _ => Expr::call(func, args),
    };

    if has_results {
        Stmt::return_stmt(vec![call])
    } else {
        Stmt::expr(call)
    }
}
