use thiserror::Error;

/// Raised while turning a raw `key.path=value` string into a [`crate::Param`].
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("param `{raw}` requires a value (expected `path=value`)")]
    MissingValue { raw: String },

    #[error("param `{raw}` parses to a non-finite number, which JSON cannot represent")]
    NonFiniteNumber { raw: String },
}

#[derive(Debug, Error)]
pub enum ReplaceError {
    #[error("failed to parse document {source_id}: {source}")]
    MalformedDocument {
        source_id: String,
        #[source]
        source: serde_json::Error,
    },

    /// The exact-path setter only navigates mappings; anything else at the
    /// root is a caller bug.
    #[error("set requires a JSON object root, found {found}")]
    NonMappingRoot { found: &'static str },

    #[error("set requires a non-empty path")]
    EmptySetPath,

    #[error("failed to serialize document {source_id}: {source}")]
    Serialize {
        source_id: String,
        #[source]
        source: serde_json::Error,
    },
}
