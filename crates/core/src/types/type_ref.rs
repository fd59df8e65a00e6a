use std::fmt;

/// Result type of a field: a string scalar or a reference to a named object type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    String,
    Object(String),
}

impl TypeRef {
    pub fn string() -> Self {
        TypeRef::String
    }

    pub fn object(name: impl Into<String>) -> Self {
        TypeRef::Object(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            TypeRef::String => "String",
            TypeRef::Object(name) => name,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, TypeRef::String)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
