//! Derived entity schemas.
//!
//! A [`TableSchema`] is computed once per entity type from its static
//! field declarations, validated, and cached for the lifetime of the
//! process via [`SchemaCell`]. All generators consume the derived schema
//! rather than the raw field table.

use std::collections::HashSet;
use std::sync::OnceLock;

use crate::error::{ConfigError, ConfigErrorKind, Error, Result};
use crate::field::{FieldInfo, OnDelete};
use crate::identifiers;
use crate::model::Model;

/// A resolved single-column index definition.
#[derive(Debug, Clone)]
pub struct IndexSpec {
    /// Index name (explicit override or `idx_{table}_{column}`)
    pub name: String,
    /// Indexed column
    pub column: &'static str,
    /// Access method (`btree` unless overridden)
    pub index_type: &'static str,
    /// Operator class, if any
    pub ops: Option<&'static str>,
}

/// A resolved foreign key constraint.
#[derive(Debug, Clone)]
pub struct ForeignKeyRef {
    /// Referencing column in this table
    pub column: &'static str,
    /// Referenced table
    pub table: &'static str,
    /// Referenced column
    pub references: &'static str,
    /// ON DELETE action, if any
    pub on_delete: Option<OnDelete>,
}

/// The derived, validated description of one entity type.
///
/// Immutable once derived; safe to share across threads.
#[derive(Debug, Clone)]
pub struct TableSchema {
    entity: &'static str,
    table: String,
    columns: &'static [FieldInfo],
    primary_keys: Vec<&'static str>,
    foreign_keys: Vec<ForeignKeyRef>,
    indexes: Vec<IndexSpec>,
}

impl TableSchema {
    /// Derive and validate the schema for a model type.
    ///
    /// Fails with a [`ConfigError`] on duplicate column names, index
    /// options on a column that is not indexed, or two indexes resolving
    /// to the same name. Primary keys are forced NOT NULL rather than
    /// rejected.
    pub fn derive<M: Model>() -> std::result::Result<Self, ConfigError> {
        let entity = M::MODEL_NAME;
        let table = identifiers::table_name(entity);
        let columns = M::fields();

        let mut seen_columns = HashSet::new();
        let mut primary_keys = Vec::new();
        let mut foreign_keys = Vec::new();
        let mut indexes: Vec<IndexSpec> = Vec::new();
        let mut seen_index_names = HashSet::new();

        for field in columns {
            if !seen_columns.insert(field.name) {
                return Err(ConfigError::new(
                    ConfigErrorKind::DuplicateColumn,
                    format!("entity '{}' declares column '{}' twice", entity, field.name),
                ));
            }

            if field.has_orphan_index_options() {
                return Err(ConfigError::new(
                    ConfigErrorKind::IndexOptions,
                    format!(
                        "column '{}.{}' sets index options without index = true",
                        entity, field.name
                    ),
                ));
            }

            if field.primary_key {
                primary_keys.push(field.name);
            }

            if let Some(fk) = field.foreign_key {
                foreign_keys.push(ForeignKeyRef {
                    column: field.name,
                    table: fk.table,
                    references: fk.column,
                    on_delete: fk.on_delete,
                });
            }

            if field.index {
                let name = field
                    .index_name
                    .map_or_else(|| identifiers::index_name(&table, field.name), String::from);
                if !seen_index_names.insert(name.clone()) {
                    return Err(ConfigError::new(
                        ConfigErrorKind::DuplicateIndexName,
                        format!(
                            "entity '{}' resolves two indexes to the name '{}'; \
                             supply an explicit index_name to disambiguate",
                            entity, name
                        ),
                    ));
                }
                indexes.push(IndexSpec {
                    name,
                    column: field.name,
                    index_type: field.index_type.unwrap_or("btree"),
                    ops: field.index_ops,
                });
            }
        }

        tracing::debug!(
            entity,
            table = %table,
            columns = columns.len(),
            "Derived table schema"
        );

        Ok(Self {
            entity,
            table,
            columns,
            primary_keys,
            foreign_keys,
            indexes,
        })
    }

    /// Entity type name this schema was derived from.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Derived table name.
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &'static [FieldInfo] {
        self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&'static FieldInfo> {
        self.columns.iter().find(|f| f.name == name)
    }

    /// Whether the entity declares a column with this name.
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Primary key columns in declaration order.
    pub fn primary_keys(&self) -> &[&'static str] {
        &self.primary_keys
    }

    /// Foreign key constraints in declaration order.
    pub fn foreign_keys(&self) -> &[ForeignKeyRef] {
        &self.foreign_keys
    }

    /// Resolved index definitions in declaration order.
    pub fn indexes(&self) -> &[IndexSpec] {
        &self.indexes
    }

    /// Tables referenced via foreign keys, self-references excluded,
    /// deduplicated in first-reference order.
    ///
    /// Used to order multi-table DDL execution.
    pub fn dependencies(&self) -> Vec<&'static str> {
        let mut seen = HashSet::new();
        self.foreign_keys
            .iter()
            .filter(|fk| fk.table != self.table)
            .filter(|fk| seen.insert(fk.table))
            .map(|fk| fk.table)
            .collect()
    }
}

/// Per-model cache holding the schema derived on first use.
///
/// Each model impl owns one in a `static`:
///
/// ```ignore
/// fn schema() -> Result<&'static TableSchema> {
///     static SCHEMA: SchemaCell = SchemaCell::new();
///     SCHEMA.get_or_derive::<Self>()
/// }
/// ```
///
/// Derivation failures are cached too, so a misconfigured entity fails
/// the same way on every call.
#[derive(Debug)]
pub struct SchemaCell {
    cell: OnceLock<std::result::Result<TableSchema, ConfigError>>,
}

impl SchemaCell {
    /// Create an empty cell.
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Get the cached schema, deriving it on first call.
    pub fn get_or_derive<M: Model>(&self) -> Result<&TableSchema> {
        match self.cell.get_or_init(TableSchema::derive::<M>) {
            Ok(schema) => Ok(schema),
            Err(err) => Err(Error::Config(err.clone())),
        }
    }
}

impl Default for SchemaCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigErrorKind;
    use crate::field::ForeignKey;
    use crate::row::Row;
    use crate::types::SqlType;
    use crate::value::Value;

    struct Post;

    impl Model for Post {
        const MODEL_NAME: &'static str = "Post";

        fn fields() -> &'static [FieldInfo] {
            static FIELDS: &[FieldInfo] = &[
                FieldInfo::new("post_id", SqlType::Text).primary_key(true),
                FieldInfo::new("author_id", SqlType::Text)
                    .foreign_key(
                        ForeignKey::new("user", "user_id").on_delete(OnDelete::Cascade),
                    )
                    .index(true),
                FieldInfo::new("title", SqlType::Text).nullable(false),
            ];
            FIELDS
        }

        fn schema() -> Result<&'static TableSchema> {
            static SCHEMA: SchemaCell = SchemaCell::new();
            SCHEMA.get_or_derive::<Self>()
        }

        fn to_row(&self) -> Vec<(&'static str, Value)> {
            vec![]
        }

        fn from_row(_row: &Row) -> Result<Self> {
            Ok(Self)
        }
    }

    #[test]
    fn derives_table_and_key_sets() {
        let schema = Post::schema().unwrap();
        assert_eq!(schema.table_name(), "post");
        assert_eq!(schema.primary_keys(), &["post_id"]);
        assert_eq!(schema.foreign_keys().len(), 1);
        assert_eq!(schema.foreign_keys()[0].table, "user");
        assert_eq!(schema.foreign_keys()[0].references, "user_id");
        assert_eq!(schema.dependencies(), vec!["user"]);
    }

    #[test]
    fn derives_default_index_names() {
        let schema = Post::schema().unwrap();
        assert_eq!(schema.indexes().len(), 1);
        assert_eq!(schema.indexes()[0].name, "idx_post_author_id");
        assert_eq!(schema.indexes()[0].index_type, "btree");
    }

    #[test]
    fn cached_schema_is_shared() {
        let a = Post::schema().unwrap() as *const TableSchema;
        let b = Post::schema().unwrap() as *const TableSchema;
        assert_eq!(a, b);
    }

    struct Orphan;

    impl Model for Orphan {
        const MODEL_NAME: &'static str = "Orphan";

        fn fields() -> &'static [FieldInfo] {
            static FIELDS: &[FieldInfo] =
                &[FieldInfo::new("data", SqlType::Jsonb).index_type("gin")];
            FIELDS
        }

        fn schema() -> Result<&'static TableSchema> {
            static SCHEMA: SchemaCell = SchemaCell::new();
            SCHEMA.get_or_derive::<Self>()
        }

        fn to_row(&self) -> Vec<(&'static str, Value)> {
            vec![]
        }

        fn from_row(_row: &Row) -> Result<Self> {
            Ok(Self)
        }
    }

    #[test]
    fn index_options_without_index_are_rejected() {
        let err = TableSchema::derive::<Orphan>().unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::IndexOptions);

        // The cached path replays the same failure.
        assert!(Orphan::schema().is_err());
        assert!(Orphan::schema().is_err());
    }

    struct Clash;

    impl Model for Clash {
        const MODEL_NAME: &'static str = "Clash";

        fn fields() -> &'static [FieldInfo] {
            static FIELDS: &[FieldInfo] = &[
                FieldInfo::new("a", SqlType::Text).index(true).index_name("idx_shared"),
                FieldInfo::new("b", SqlType::Text).index(true).index_name("idx_shared"),
            ];
            FIELDS
        }

        fn schema() -> Result<&'static TableSchema> {
            static SCHEMA: SchemaCell = SchemaCell::new();
            SCHEMA.get_or_derive::<Self>()
        }

        fn to_row(&self) -> Vec<(&'static str, Value)> {
            vec![]
        }

        fn from_row(_row: &Row) -> Result<Self> {
            Ok(Self)
        }
    }

    #[test]
    fn duplicate_index_names_are_rejected() {
        let err = TableSchema::derive::<Clash>().unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::DuplicateIndexName);
        assert!(err.message.contains("idx_shared"));
    }

    struct Dup;

    impl Model for Dup {
        const MODEL_NAME: &'static str = "Dup";

        fn fields() -> &'static [FieldInfo] {
            static FIELDS: &[FieldInfo] = &[
                FieldInfo::new("x", SqlType::Text),
                FieldInfo::new("x", SqlType::Integer),
            ];
            FIELDS
        }

        fn schema() -> Result<&'static TableSchema> {
            static SCHEMA: SchemaCell = SchemaCell::new();
            SCHEMA.get_or_derive::<Self>()
        }

        fn to_row(&self) -> Vec<(&'static str, Value)> {
            vec![]
        }

        fn from_row(_row: &Row) -> Result<Self> {
            Ok(Self)
        }
    }

    #[test]
    fn duplicate_columns_are_rejected() {
        let err = TableSchema::derive::<Dup>().unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::DuplicateColumn);
    }
}
