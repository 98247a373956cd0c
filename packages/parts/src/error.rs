use thiserror::Error;

/// Lookup failures against the part schema registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Unknown part type: {0}")]
    UnknownPartType(String),

    #[error("Part type '{part_type}' has no list field '{field}'")]
    UnknownList { part_type: String, field: String },
}

/// Failures while parsing or resolving a dotted field path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Field path is empty")]
    Empty,

    #[error("Field path '{0}' has more than three segments")]
    TooManySegments(String),

    #[error("Field path '{path}': segment '{segment}' is not a list index")]
    InvalidIndex { path: String, segment: String },

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Field '{0}' is not a list")]
    NotAList(String),

    #[error("Index {index} out of range for '{list}' (len {len})")]
    IndexOutOfRange {
        list: String,
        index: usize,
        len: usize,
    },

    #[error("Field '{path}' holds {found}, cannot assign {expected}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Failures decoding an embedded asset string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetRefError {
    #[error("Not a data URI")]
    NotADataUri,

    #[error("Data URI is not base64 encoded")]
    NotBase64,

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Syntactic failures of a serialized page or part list
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array of parts")]
    NotAList,

    #[error("Expected a JSON object with 'theme' and 'parts'")]
    NotAPage,
}
