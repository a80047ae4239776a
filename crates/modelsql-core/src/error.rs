//! Error types for modelsql operations.

use std::fmt;

/// The primary error type for all modelsql operations.
#[derive(Debug)]
pub enum Error {
    /// Invalid entity/column configuration, detected at schema derivation
    Config(ConfigError),
    /// A generator precondition failed before any SQL was built
    Precondition(PreconditionError),
    /// A result row could not be mapped back into an entity
    Mapping(MappingError),
    /// Opaque passthrough of a connection collaborator failure
    Submission(SubmissionError),
}

/// Configuration error raised while deriving a table schema.
///
/// These are cloneable so a failed derivation can be cached and replayed
/// by [`crate::schema::SchemaCell`].
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub kind: ConfigErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// Index name/type/ops supplied on a column without `index = true`
    IndexOptions,
    /// Two indexes on the same entity resolve to the same name
    DuplicateIndexName,
    /// Two columns share the same name
    DuplicateColumn,
}

impl ConfigError {
    pub fn new(kind: ConfigErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Precondition failure raised by a statement builder.
#[derive(Debug)]
pub struct PreconditionError {
    pub kind: PreconditionErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionErrorKind {
    /// DELETE (or guarded UPDATE) invoked without a usable condition
    MissingCondition,
    /// Operation requires a primary key the entity does not declare
    NoPrimaryKey,
    /// Increment/decrement/SET column sets overlap
    OverlappingColumns,
    /// UPDATE resolved to an empty SET clause
    EmptyAssignment,
    /// A named column does not exist in the entity schema
    UnknownColumn,
    /// Raw condition fragment placeholder count does not match its inputs
    RawParamMismatch,
}

impl PreconditionError {
    pub fn new(kind: PreconditionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Failure converting a result row back into an entity instance.
#[derive(Debug)]
pub struct MappingError {
    /// Column being mapped
    pub column: String,
    /// Expected Rust/SQL type
    pub expected: &'static str,
    /// What was actually found (value type name, or "missing column")
    pub actual: String,
}

/// Opaque error reported by the connection collaborator.
///
/// The engine does not retry and does not interpret the underlying failure;
/// it is passed through unchanged.
#[derive(Debug)]
pub struct SubmissionError {
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SubmissionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e.message),
            Error::Precondition(e) => write!(f, "Precondition error: {}", e.message),
            Error::Mapping(e) => write!(
                f,
                "Mapping error in column '{}': expected {}, found {}",
                e.column, e.expected, e.actual
            ),
            Error::Submission(e) => write!(f, "Submission error: {}", e.message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Submission(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected {} for column '{}', found {}",
            self.expected, self.column, self.actual
        )
    }
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<PreconditionError> for Error {
    fn from(err: PreconditionError) -> Self {
        Error::Precondition(err)
    }
}

impl From<MappingError> for Error {
    fn from(err: MappingError) -> Self {
        Error::Mapping(err)
    }
}

impl From<SubmissionError> for Error {
    fn from(err: SubmissionError) -> Self {
        Error::Submission(err)
    }
}

/// Result type alias for modelsql operations.
pub type Result<T> = std::result::Result<T, Error>;
