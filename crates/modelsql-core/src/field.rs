//! Field and column definitions.

use crate::types::SqlType;
use crate::value::Value;

/// Referential action applied when a referenced row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnDelete {
    /// No action - raise an error if any references exist.
    #[default]
    NoAction,
    /// Restrict - same as NO ACTION for this engine's purposes.
    Restrict,
    /// Cascade - automatically delete referencing rows.
    Cascade,
    /// Set null - set referencing columns to NULL.
    SetNull,
}

impl OnDelete {
    /// Get the SQL representation of this action.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            OnDelete::NoAction => "NO ACTION",
            OnDelete::Restrict => "RESTRICT",
            OnDelete::Cascade => "CASCADE",
            OnDelete::SetNull => "SET NULL",
        }
    }
}

/// A foreign key reference.
///
/// Both the referenced table and column are mandatory; a partially
/// specified reference is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    /// Referenced table name
    pub table: &'static str,
    /// Referenced column name
    pub column: &'static str,
    /// ON DELETE action, if any
    pub on_delete: Option<OnDelete>,
}

impl ForeignKey {
    /// Create a foreign key reference to `table(column)`.
    pub const fn new(table: &'static str, column: &'static str) -> Self {
        Self {
            table,
            column,
            on_delete: None,
        }
    }

    /// Set the ON DELETE action.
    pub const fn on_delete(mut self, action: OnDelete) -> Self {
        self.on_delete = Some(action);
        self
    }
}

/// Metadata about a model field/column.
///
/// Declared as const builder chains so a model's field table can live in a
/// `static` slice:
///
/// ```
/// use modelsql_core::{FieldInfo, SqlType};
///
/// static FIELDS: &[FieldInfo] = &[
///     FieldInfo::new("user_id", SqlType::Text).primary_key(true),
///     FieldInfo::new("email", SqlType::Text).unique(true).index(true),
/// ];
/// ```
#[derive(Debug, Clone)]
pub struct FieldInfo {
    /// Column name
    pub name: &'static str,
    /// SQL type for this field
    pub sql_type: SqlType,
    /// Resolve TIMESTAMP to TIMESTAMPTZ for this column
    pub timezone_aware: bool,
    /// Whether this field is nullable (primary keys are never nullable)
    pub nullable: bool,
    /// Whether this is a primary key
    pub primary_key: bool,
    /// Whether this field has a unique constraint
    pub unique: bool,
    /// Whether this column gets a single-column index
    pub index: bool,
    /// Index name override (derived from table+column when absent)
    pub index_name: Option<&'static str>,
    /// Index access method (btree when absent)
    pub index_type: Option<&'static str>,
    /// Index operator class
    pub index_ops: Option<&'static str>,
    /// Foreign key reference
    pub foreign_key: Option<ForeignKey>,
    /// In-process default, applied when mapping rows that omit the column
    pub default: Option<fn() -> Value>,
    /// Raw SQL default expression, applied database-side (e.g. `NOW()`)
    pub db_default: Option<&'static str>,
}

impl FieldInfo {
    /// Create a new field info with minimal required data.
    pub const fn new(name: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            sql_type,
            timezone_aware: false,
            nullable: true,
            primary_key: false,
            unique: false,
            index: false,
            index_name: None,
            index_type: None,
            index_ops: None,
            foreign_key: None,
            default: None,
            db_default: None,
        }
    }

    /// Mark a TIMESTAMP column as timezone-aware.
    pub const fn timezone_aware(mut self, value: bool) -> Self {
        self.timezone_aware = value;
        self
    }

    /// Set nullable flag. Ignored for primary keys, which are always NOT NULL.
    pub const fn nullable(mut self, value: bool) -> Self {
        self.nullable = value;
        self
    }

    /// Set primary key flag.
    pub const fn primary_key(mut self, value: bool) -> Self {
        self.primary_key = value;
        self
    }

    /// Set unique flag.
    pub const fn unique(mut self, value: bool) -> Self {
        self.unique = value;
        self
    }

    /// Request a single-column index on this field.
    pub const fn index(mut self, value: bool) -> Self {
        self.index = value;
        self
    }

    /// Override the derived index name.
    pub const fn index_name(mut self, name: &'static str) -> Self {
        self.index_name = Some(name);
        self
    }

    /// Set the index access method (e.g. `gin`, `gist`).
    pub const fn index_type(mut self, method: &'static str) -> Self {
        self.index_type = Some(method);
        self
    }

    /// Set the index operator class (e.g. `jsonb_path_ops`).
    pub const fn index_ops(mut self, ops: &'static str) -> Self {
        self.index_ops = Some(ops);
        self
    }

    /// Set a foreign key reference.
    pub const fn foreign_key(mut self, fk: ForeignKey) -> Self {
        self.foreign_key = Some(fk);
        self
    }

    /// Set an in-process default used when a result row omits this column.
    pub const fn default(mut self, f: fn() -> Value) -> Self {
        self.default = Some(f);
        self
    }

    /// Set a raw SQL default expression.
    pub const fn db_default(mut self, expr: &'static str) -> Self {
        self.db_default = Some(expr);
        self
    }

    /// Effective nullability: primary keys are NOT NULL regardless of the
    /// declared `nullable` flag.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable && !self.primary_key
    }

    /// Effective SQL type name for DDL generation.
    ///
    /// TIMESTAMP columns resolve to TIMESTAMPTZ when `timezone_aware`.
    #[must_use]
    pub fn effective_sql_type(&self) -> String {
        if self.timezone_aware && self.sql_type == SqlType::Timestamp {
            return SqlType::TimestampTz.sql_name();
        }
        self.sql_type.sql_name()
    }

    /// Whether any index option is set without `index = true`.
    ///
    /// Schema derivation rejects this combination.
    #[must_use]
    pub const fn has_orphan_index_options(&self) -> bool {
        !self.index
            && (self.index_name.is_some() || self.index_type.is_some() || self.index_ops.is_some())
    }
}
