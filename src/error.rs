//! Error types for parsing, translating and fetching Avro schemas.

use thiserror::Error;

/// Result type for crate-level operations
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure surfaced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] SchemaParseError),

    #[error(transparent)]
    Unsupported(#[from] UnsupportedSchemaError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// The schema text is not a structurally valid Avro schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid Avro schema at {path}: {message}")]
pub struct SchemaParseError {
    /// JSON-path-like location of the offending node (`$` is the root)
    pub path: String,
    pub message: String,
}

impl SchemaParseError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// The schema is valid Avro but cannot be expressed as an Athena table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnsupportedSchemaError {
    /// Only `["null", T]` / `[T, "null"]` unions have a column type
    #[error("Unsupported union at field '{path}': expected exactly two alternatives, one of them null, got [{}]", .alternatives.join(", "))]
    Union {
        path: String,
        alternatives: Vec<String>,
    },

    /// `null` outside of a union
    #[error("Unsupported standalone null type at field '{path}'")]
    StandaloneNull { path: String },

    /// A type name that is neither primitive nor a defined named type
    #[error("Unknown Avro type '{tag}' at field '{path}'")]
    UnknownType { path: String, tag: String },

    /// A named type referenced from inside its own definition
    #[error("Recursive Avro type '{name}' at field '{path}' cannot be expressed as a column type")]
    RecursiveType { path: String, name: String },

    /// The table root must be a record
    #[error("Top-level Avro schema must be a record, got {kind}")]
    NonRecordRoot { kind: String },

    #[error("Partition column '{name}' is not a field of the record")]
    MissingPartition { name: String },

    #[error("Partition column '{name}' is listed more than once")]
    DuplicatePartition { name: String },
}

/// Failure retrieving a schema from a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Invalid registry URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Unsupported registry URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Schema registry request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Schema registry request to {url} failed: {status} {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to decode schema registry response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Subject '{subject}' holds a {schema_type} schema, expected AVRO")]
    NotAvro {
        subject: String,
        schema_type: String,
    },

    /// Subject names of a `file://` registry must stay inside its directory
    #[error("Invalid subject name '{0}' for a file registry")]
    InvalidSubject(String),

    #[error("Failed to read schema file {path}: {source}")]
    File {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}
