use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("did not find {location}.{name}")]
    NotFound { location: String, name: String },

    #[error("{location}.{name} is not a type")]
    NotAType { location: String, name: String },

    #[error("{location}.{name} is not an interface")]
    NotAnInterface { location: String, name: String },

    #[error("{location}.{name} is not supported: {shape}")]
    UnsupportedShape {
        location: String,
        name: String,
        shape: Shape,
    },
}

/// Why an interface cannot be turned into a function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Shape {
    #[error("has {0} methods, expected exactly 1")]
    MethodCount(usize),

    #[error("method entry binds {0} names, expected exactly 1")]
    NameCount(usize),

    #[error("method entry is not a function signature")]
    NotAMethod,

    #[error("generic interfaces are not supported")]
    TypeParameters,
}

impl GenerateError {
    pub fn shape(&self) -> Option<Shape> {
        match self {
            GenerateError::UnsupportedShape { shape, .. } => Some(*shape),
            _ => None,
        }
    }
}
