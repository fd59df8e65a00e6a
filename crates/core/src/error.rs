use std::io;

/// Errors that can occur while projecting SEO metadata onto a schema
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Schema host unavailable: {0}")]
    MissingHostCapability(String),

    #[error("Already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Duplicate field '{0}' in field table")]
    DuplicateField(String),

    #[error("Invalid field name '{0}'")]
    InvalidFieldName(String),

    #[error("Failed to resolve field '{field}': {message}")]
    FieldResolution { field: String, message: String },

    #[error("Unknown subject kind: {0}")]
    UnknownSubjectKind(String),

    #[error("Selection parse error at offset {offset}: {message}")]
    SelectionParse { offset: usize, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for accessor failures
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::FieldResolution {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for seo-projector operations
pub type Result<T> = std::result::Result<T, Error>;
