//! CREATE TABLE statement generation.

use crate::index::index_statements_for;
use modelsql_core::{FieldInfo, Model, Result, Statement, TableSchema};
use std::collections::HashSet;
use std::marker::PhantomData;

/// Builder for the full DDL of one entity: CREATE TABLE followed by its
/// CREATE INDEX statements.
///
/// Output is byte-identical across repeated calls with the same schema.
#[derive(Debug)]
pub struct CreateTable<M: Model> {
    recreate: bool,
    _marker: PhantomData<M>,
}

impl<M: Model> CreateTable<M> {
    /// Create a new CREATE TABLE builder.
    pub fn new() -> Self {
        Self {
            recreate: false,
            _marker: PhantomData,
        }
    }

    /// Precede the create with `DROP TABLE IF EXISTS`.
    ///
    /// This is a destructive mode; callers own the risk.
    pub fn recreate(mut self) -> Self {
        self.recreate = true;
        self
    }

    /// Build the DDL statement(s), `;`-terminated and newline-joined.
    pub fn build(&self) -> Result<Statement> {
        let schema = M::schema()?;

        let mut sql = String::new();
        if self.recreate {
            sql.push_str("DROP TABLE IF EXISTS ");
            sql.push_str(schema.table_name());
            sql.push_str(";\n");
        }

        sql.push_str("CREATE TABLE IF NOT EXISTS ");
        sql.push_str(schema.table_name());
        sql.push_str(" (\n");

        let mut parts: Vec<String> = schema.columns().iter().map(column_definition).collect();

        let pk = schema.primary_keys();
        if !pk.is_empty() {
            parts.push(format!("PRIMARY KEY ({})", pk.join(", ")));
        }

        for fk in schema.foreign_keys() {
            let mut clause = format!(
                "FOREIGN KEY ({}) REFERENCES {}({})",
                fk.column, fk.table, fk.references
            );
            if let Some(action) = fk.on_delete {
                clause.push_str(" ON DELETE ");
                clause.push_str(action.as_sql());
            }
            parts.push(clause);
        }

        let joined: Vec<String> = parts.into_iter().map(|p| format!("  {p}")).collect();
        sql.push_str(&joined.join(",\n"));
        sql.push_str("\n);");

        for index in index_statements_for(schema) {
            sql.push('\n');
            sql.push_str(&index.sql);
        }

        tracing::debug!(table = schema.table_name(), sql = %sql, "Generated table DDL");
        Ok(Statement::ddl(sql))
    }
}

impl<M: Model> Default for CreateTable<M> {
    fn default() -> Self {
        Self::new()
    }
}

fn column_definition(field: &FieldInfo) -> String {
    let mut def = format!("{} {}", field.name, field.effective_sql_type());

    if !field.is_nullable() {
        def.push_str(" NOT NULL");
    }

    if field.unique {
        def.push_str(" UNIQUE");
    }

    if let Some(default) = field.db_default {
        def.push_str(" DEFAULT ");
        def.push_str(default);
    }

    def
}

/// Builder for multi-entity DDL scripts.
///
/// Tables are emitted with foreign-key dependencies first (stable with
/// respect to insertion order; a dependency cycle falls back to insertion
/// order). Raw statements are appended after the tables, in the order
/// they were added.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    tables: Vec<TableEntry>,
    raw: Vec<String>,
}

#[derive(Debug)]
struct TableEntry {
    name: String,
    dependencies: Vec<&'static str>,
    sql: String,
}

impl SchemaBuilder {
    /// Create a new schema builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the DDL for a model's table.
    pub fn create_table<M: Model>(mut self) -> Result<Self> {
        let schema = M::schema()?;
        let statement = CreateTable::<M>::new().build()?;
        self.tables.push(TableEntry {
            name: schema.table_name().to_string(),
            dependencies: schema.dependencies(),
            sql: statement.sql,
        });
        Ok(self)
    }

    /// Add a raw SQL statement.
    pub fn raw(mut self, sql: impl Into<String>) -> Self {
        self.raw.push(sql.into());
        self
    }

    /// Get all SQL statements, dependency-ordered.
    pub fn build(self) -> Vec<String> {
        let mut remaining = self.tables;
        let mut out = Vec::with_capacity(remaining.len() + self.raw.len());

        while !remaining.is_empty() {
            let pending: HashSet<&str> = remaining.iter().map(|e| e.name.as_str()).collect();
            let ready = remaining.iter().position(|entry| {
                entry
                    .dependencies
                    .iter()
                    .all(|dep| *dep == entry.name || !pending.contains(dep))
            });
            match ready {
                Some(pos) => out.push(remaining.remove(pos).sql),
                // Cycle between the remaining tables: keep insertion order.
                None => out.extend(remaining.drain(..).map(|e| e.sql)),
            }
        }

        out.extend(self.raw);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelsql_core::{ForeignKey, OnDelete, Row, SchemaCell, SqlType, Value};

    struct User;

    impl Model for User {
        const MODEL_NAME: &'static str = "User";

        fn fields() -> &'static [FieldInfo] {
            static FIELDS: &[FieldInfo] = &[
                FieldInfo::new("user_id", SqlType::Text).primary_key(true),
                FieldInfo::new("name", SqlType::Text),
                FieldInfo::new("email", SqlType::Text).unique(true),
                FieldInfo::new("created_at", SqlType::Timestamp)
                    .timezone_aware(true)
                    .db_default("NOW()"),
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

    struct Post;

    impl Model for Post {
        const MODEL_NAME: &'static str = "Post";

        fn fields() -> &'static [FieldInfo] {
            static FIELDS: &[FieldInfo] = &[
                FieldInfo::new("post_id", SqlType::Text).primary_key(true),
                FieldInfo::new("author_id", SqlType::Text)
                    .foreign_key(ForeignKey::new("user", "user_id").on_delete(OnDelete::Cascade))
                    .index(true),
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
    fn user_table_ddl() {
        let stmt = CreateTable::<User>::new().build().unwrap();
        assert_eq!(
            stmt.sql,
            "CREATE TABLE IF NOT EXISTS user (\n  \
             user_id TEXT NOT NULL,\n  \
             name TEXT,\n  \
             email TEXT UNIQUE,\n  \
             created_at TIMESTAMPTZ DEFAULT NOW(),\n  \
             PRIMARY KEY (user_id)\n);"
        );
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn post_table_ddl_has_fk_and_index() {
        let stmt = CreateTable::<Post>::new().build().unwrap();
        assert!(stmt.sql.contains(
            "FOREIGN KEY (author_id) REFERENCES user(user_id) ON DELETE CASCADE"
        ));
        assert!(stmt.sql.ends_with(
            "CREATE INDEX IF NOT EXISTS idx_post_author_id ON post USING btree (author_id);"
        ));
    }

    #[test]
    fn recreate_prepends_drop() {
        let stmt = CreateTable::<User>::new().recreate().build().unwrap();
        assert!(stmt.sql.starts_with("DROP TABLE IF EXISTS user;\nCREATE TABLE IF NOT EXISTS user"));
    }

    #[test]
    fn output_is_deterministic() {
        let a = CreateTable::<Post>::new().build().unwrap();
        let b = CreateTable::<Post>::new().build().unwrap();
        assert_eq!(a.sql, b.sql);
    }

    #[test]
    fn schema_builder_orders_dependencies_first() {
        // Post references user but is added first; build() reorders.
        let statements = SchemaBuilder::new()
            .create_table::<Post>()
            .unwrap()
            .create_table::<User>()
            .unwrap()
            .build();

        assert_eq!(statements.len(), 2);
        assert!(statements[0].contains("CREATE TABLE IF NOT EXISTS user"));
        assert!(statements[1].contains("CREATE TABLE IF NOT EXISTS post"));
    }

    #[test]
    fn schema_builder_raw_statements_follow_tables() {
        let statements = SchemaBuilder::new()
            .raw("ALTER TABLE user ADD COLUMN bio TEXT")
            .create_table::<User>()
            .unwrap()
            .build();

        assert_eq!(statements.len(), 2);
        assert!(statements[0].starts_with("CREATE TABLE"));
        assert_eq!(statements[1], "ALTER TABLE user ADD COLUMN bio TEXT");
    }
}
