//! DDL generation for modelsql table models.
//!
//! This crate turns a derived [`modelsql_core::TableSchema`] into
//! PostgreSQL `CREATE TABLE` / `CREATE INDEX` statements:
//!
//! - [`CreateTable`] renders one entity's full table DDL, optionally
//!   preceded by a destructive `DROP TABLE IF EXISTS` (recreate mode).
//! - [`index_statements`] renders the index DDL on its own, so index
//!   management does not require re-running table creation.
//! - [`SchemaBuilder`] assembles DDL for several entities, ordered so
//!   foreign-key dependencies are created first.
//!
//! DDL carries no bound parameters, and determinism is part of the
//! contract: the same schema always renders byte-identical statements.

pub mod create;
pub mod index;

pub use create::{CreateTable, SchemaBuilder};
pub use index::{index_statements, index_statements_for};
