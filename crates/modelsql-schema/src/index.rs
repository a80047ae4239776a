//! CREATE INDEX statement generation.

use modelsql_core::{Model, Result, Statement, TableSchema};

/// Generate the index DDL for a model type, one statement per column
/// flagged `index = true`.
///
/// This is independent of CREATE TABLE generation: all index DDL for an
/// entity is derivable from this call alone. Entities with no indexed
/// columns produce an empty list.
pub fn index_statements<M: Model>() -> Result<Vec<Statement>> {
    Ok(index_statements_for(M::schema()?))
}

/// Generate index DDL from an already-derived schema.
pub fn index_statements_for(schema: &TableSchema) -> Vec<Statement> {
    schema
        .indexes()
        .iter()
        .map(|idx| {
            let mut sql = format!(
                "CREATE INDEX IF NOT EXISTS {} ON {} USING {} ({}",
                idx.name,
                schema.table_name(),
                idx.index_type,
                idx.column
            );
            if let Some(ops) = idx.ops {
                sql.push(' ');
                sql.push_str(ops);
            }
            sql.push_str(");");
            tracing::debug!(sql = %sql, "Generated index DDL");
            Statement::ddl(sql)
        })
        .collect()
}
