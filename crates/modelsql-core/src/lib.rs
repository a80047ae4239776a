//! Core types and traits for modelsql.
//!
//! `modelsql-core` is the foundation layer for the workspace. It defines
//! the contracts the schema and query crates build on:
//!
//! - `Model` trait for table-mapped entity types
//! - `FieldInfo` column metadata and `TableSchema` derivation
//! - `Row`, `Value`, and `Statement` for statement inputs/outputs
//! - `Connection` boundary for submitting finished statements
//! - identifier policy (table and index name derivation)
//!
//! Most applications should use the `modelsql` facade; reach for
//! `modelsql-core` directly when implementing a `Connection` driver.

pub mod config;
pub mod connection;
pub mod error;
pub mod field;
pub mod identifiers;
pub mod model;
pub mod row;
pub mod schema;
pub mod statement;
pub mod types;
pub mod value;

pub use config::DbConfig;
pub use connection::{Connection, Submission};
pub use error::{
    ConfigError, ConfigErrorKind, Error, MappingError, PreconditionError, PreconditionErrorKind,
    Result, SubmissionError,
};
pub use field::{FieldInfo, ForeignKey, OnDelete};
pub use model::Model;
pub use row::{ColumnInfo, FromValue, Row};
pub use schema::{ForeignKeyRef, IndexSpec, SchemaCell, TableSchema};
pub use statement::Statement;
pub use types::{SqlType, TypeInfo};
pub use value::Value;
