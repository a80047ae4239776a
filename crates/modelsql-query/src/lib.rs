//! DML/DQL statement builders for modelsql table models.
//!
//! Four independent builders ([`Select`], [`Insert`], [`Update`],
//! [`Delete`]) combine a model's derived schema, its instance values,
//! and a [`Condition`] into a finished `Statement` (SQL + ordered
//! parameters). Building is a pure function; the `fetch_*`/`execute`
//! conveniences are `build()` followed by a submit through a
//! [`modelsql_core::Connection`] collaborator, so the builders work
//! identically with or without a live connection.

pub mod condition;
pub mod delete;
pub mod insert;
pub mod select;
pub mod update;

pub use condition::Condition;
pub use delete::Delete;
pub use insert::Insert;
pub use select::{OrderDirection, Select};
pub use update::Update;
