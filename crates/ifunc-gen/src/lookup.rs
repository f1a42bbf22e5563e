//! Finding and validating the target interface.

use crate::{GenerateError, Shape};
use ifunc_ir::{Binding, FuncType, Program, TypeExpr, TypeSpec};
use std::path::Path;
use tracing::debug;

/// A validated single-method interface.
#[derive(Debug, Clone, Copy)]
pub struct Target<'a> {
    /// File the interface was found in.
    pub file: &'a Path,
    pub spec: &'a TypeSpec,
    /// Name of the sole method.
    pub method: &'a str,
    /// Signature of the sole method.
    pub signature: &'a FuncType,
}

/// Find `name` in any file of any package and check that it names an
/// interface with exactly one method.
///
/// The first file whose scope binds `name` decides the outcome; the search
/// does not continue past a binding that fails validation.
pub fn find_interface<'a>(
    location: &str,
    name: &str,
    program: &'a Program,
) -> Result<Target<'a>, GenerateError> {
    for package in program.packages.values() {
        for (path, file) in &package.files {
            let Some(binding) = file.scope.lookup(name) else {
                continue;
            };
            debug!(package = %package.name, file = %path.display(), name, "resolved");
            return classify(location, name, path, binding);
        }
    }
    Err(GenerateError::NotFound {
        location: location.to_string(),
        name: name.to_string(),
    })
}

fn classify<'a>(
    location: &str,
    name: &str,
    file: &'a Path,
    binding: &'a Binding,
) -> Result<Target<'a>, GenerateError> {
    let Binding::Type(spec) = binding else {
        return Err(GenerateError::NotAType {
            location: location.to_string(),
            name: name.to_string(),
        });
    };
    let TypeExpr::Interface(iface) = &spec.ty else {
        return Err(GenerateError::NotAnInterface {
            location: location.to_string(),
            name: name.to_string(),
        });
    };

    let unsupported = |shape| GenerateError::UnsupportedShape {
        location: location.to_string(),
        name: name.to_string(),
        shape,
    };

    if spec.is_generic() {
        return Err(unsupported(Shape::TypeParameters));
    }
    let [method] = iface.methods.as_slice() else {
        return Err(unsupported(Shape::MethodCount(iface.methods.len())));
    };
    let [method_name] = method.names.as_slice() else {
        return Err(unsupported(Shape::NameCount(method.names.len())));
    };
    let TypeExpr::Func(signature) = &method.ty else {
        return Err(unsupported(Shape::NotAMethod));
    };

    Ok(Target {
        file,
        spec,
        method: method_name,
        signature,
    })
}
