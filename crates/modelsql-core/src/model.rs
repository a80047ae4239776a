//! Model trait for table-mapped entity types.
//!
//! The `Model` trait is the contract between an entity type and the
//! schema/query generators: a static field table, a derived (cached)
//! table schema, and conversions to and from rows.

use crate::Result;
use crate::field::FieldInfo;
use crate::row::Row;
use crate::schema::TableSchema;
use crate::value::Value;

/// Trait for types that map to a database table.
///
/// Implementations declare their columns as a `static` [`FieldInfo`]
/// slice and own a [`crate::schema::SchemaCell`] for the derived schema:
///
/// ```
/// use modelsql_core::{FieldInfo, Model, Result, Row, SchemaCell, SqlType, TableSchema, Value};
///
/// struct User {
///     user_id: String,
///     name: Option<String>,
/// }
///
/// impl Model for User {
///     const MODEL_NAME: &'static str = "User";
///
///     fn fields() -> &'static [FieldInfo] {
///         static FIELDS: &[FieldInfo] = &[
///             FieldInfo::new("user_id", SqlType::Text).primary_key(true),
///             FieldInfo::new("name", SqlType::Text),
///         ];
///         FIELDS
///     }
///
///     fn schema() -> Result<&'static TableSchema> {
///         static SCHEMA: SchemaCell = SchemaCell::new();
///         SCHEMA.get_or_derive::<Self>()
///     }
///
///     fn to_row(&self) -> Vec<(&'static str, Value)> {
///         vec![
///             ("user_id", Value::from(self.user_id.clone())),
///             ("name", Value::from(self.name.clone())),
///         ]
///     }
///
///     fn from_row(row: &Row) -> Result<Self> {
///         Ok(Self {
///             user_id: row.get_named("user_id")?,
///             name: row.get_named("name")?,
///         })
///     }
/// }
/// ```
pub trait Model: Sized + Send + Sync {
    /// The entity type name the table name is derived from.
    const MODEL_NAME: &'static str;

    /// Get field metadata for all columns, in declaration order.
    fn fields() -> &'static [FieldInfo];

    /// Get the derived table schema, cached for the process lifetime.
    ///
    /// Fails with a configuration error when the field declarations are
    /// invalid; the failure is stable across calls.
    fn schema() -> Result<&'static TableSchema>;

    /// Convert this instance to an ordered field-name/value mapping.
    ///
    /// This is also the structured-serialization surface: the pairs come
    /// back in declaration order and cover every declared column.
    fn to_row(&self) -> Vec<(&'static str, Value)>;

    /// Construct an instance from a database row.
    ///
    /// Unknown result columns are ignored; a missing non-nullable column
    /// with no in-process default is a mapping error.
    fn from_row(row: &Row) -> Result<Self>;

    /// Current values of the primary key fields, in declaration order.
    fn primary_key_values(&self) -> Vec<Value> {
        let row = self.to_row();
        Self::fields()
            .iter()
            .filter(|f| f.primary_key)
            .filter_map(|f| {
                row.iter()
                    .find(|(name, _)| *name == f.name)
                    .map(|(_, value)| value.clone())
            })
            .collect()
    }
}
