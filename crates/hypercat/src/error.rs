use thiserror::Error;

pub type Result<T> = std::result::Result<T, HypercatError>;

/// Broad classification of a [`HypercatError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The document is not shaped like a catalogue: bad JSON, a missing
    /// field or relation, or the wrong content type.
    SchemaViolation,
    /// A field is present but holds the wrong JSON type.
    TypeViolation,
}

#[derive(Debug, Error)]
pub enum HypercatError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalogue document must be a JSON object")]
    NotAnObject,

    #[error("Missing field `{location}`")]
    MissingField { location: String },

    #[error("Missing mandatory relation {rel} in `{location}`")]
    MissingRelation { rel: &'static str, location: String },

    #[error("Relation {rel} must appear exactly once in `{location}`")]
    DuplicateRelation { rel: &'static str, location: String },

    #[error("`{location}` does not declare the catalogue content type")]
    NotACatalog { location: String },

    #[error("Expected {expected} at `{location}`")]
    WrongType {
        location: String,
        expected: &'static str,
    },
}

impl HypercatError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HypercatError::WrongType { .. } => ErrorKind::TypeViolation,
            HypercatError::Json(_)
            | HypercatError::NotAnObject
            | HypercatError::MissingField { .. }
            | HypercatError::MissingRelation { .. }
            | HypercatError::DuplicateRelation { .. }
            | HypercatError::NotACatalog { .. } => ErrorKind::SchemaViolation,
        }
    }
}
