//! Declarative table models with PostgreSQL DDL and parameterized DML
//! generation.
//!
//! Entity types implement [`Model`] by declaring their columns as a
//! static [`FieldInfo`] table. From that single declaration the engine
//! derives a cached [`TableSchema`] and generates:
//!
//! - `CREATE TABLE` / `CREATE INDEX` DDL ([`CreateTable`],
//!   [`index_statements`], [`SchemaBuilder`])
//! - parameterized `SELECT` / `INSERT` (with upsert) / `UPDATE` (with
//!   arithmetic deltas) / `DELETE` statements ([`Select`], [`Insert`],
//!   [`Update`], [`Delete`])
//!
//! Statement building is pure: every builder returns a
//! [`Statement`] (`sql` + ordered `params`), and submission goes
//! through the [`Connection`] collaborator the application provides.
//!
//! # Example
//!
//! ```
//! use modelsql::{
//!     Condition, CreateTable, FieldInfo, Model, Result, Row, SchemaCell, Select, SqlType,
//!     TableSchema, Value,
//! };
//!
//! struct User {
//!     user_id: String,
//!     email: String,
//! }
//!
//! impl Model for User {
//!     const MODEL_NAME: &'static str = "User";
//!
//!     fn fields() -> &'static [FieldInfo] {
//!         static FIELDS: &[FieldInfo] = &[
//!             FieldInfo::new("user_id", SqlType::Text).primary_key(true),
//!             FieldInfo::new("email", SqlType::Text).unique(true).nullable(false),
//!         ];
//!         FIELDS
//!     }
//!
//!     fn schema() -> Result<&'static TableSchema> {
//!         static SCHEMA: SchemaCell = SchemaCell::new();
//!         SCHEMA.get_or_derive::<Self>()
//!     }
//!
//!     fn to_row(&self) -> Vec<(&'static str, Value)> {
//!         vec![
//!             ("user_id", Value::from(self.user_id.clone())),
//!             ("email", Value::from(self.email.clone())),
//!         ]
//!     }
//!
//!     fn from_row(row: &Row) -> Result<Self> {
//!         Ok(Self {
//!             user_id: row.get_named("user_id")?,
//!             email: row.get_named("email")?,
//!         })
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let ddl = CreateTable::<User>::new().build()?;
//!     assert!(ddl.sql.starts_with("CREATE TABLE IF NOT EXISTS user"));
//!
//!     let stmt = Select::<User>::new()
//!         .filter(Condition::new().and_eq("email", "a@b.com"))
//!         .build_one()?;
//!     assert_eq!(stmt.sql, "SELECT * FROM user WHERE (email = $1) LIMIT 1");
//!     assert_eq!(stmt.params, vec![Value::Text("a@b.com".into())]);
//!     Ok(())
//! }
//! ```

pub use modelsql_core::{
    ColumnInfo, ConfigError, ConfigErrorKind, Connection, DbConfig, Error, FieldInfo, ForeignKey,
    ForeignKeyRef, FromValue, IndexSpec, MappingError, Model, OnDelete, PreconditionError,
    PreconditionErrorKind, Result, Row, SchemaCell, SqlType, Statement, Submission,
    SubmissionError, TableSchema, TypeInfo, Value, identifiers,
};
pub use modelsql_query::{Condition, Delete, Insert, OrderDirection, Select, Update};
pub use modelsql_schema::{CreateTable, SchemaBuilder, index_statements, index_statements_for};
