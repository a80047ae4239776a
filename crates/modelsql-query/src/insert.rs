//! INSERT statement builder with optional upsert.

use modelsql_core::{
    Connection, Error, Model, PreconditionError, PreconditionErrorKind, Result, Statement,
};

/// An INSERT statement builder for one model instance.
///
/// Columns whose value is NULL and that carry a database-side default are
/// omitted from the column list so the database applies the default.
#[derive(Debug)]
pub struct Insert<'a, M: Model> {
    model: &'a M,
    upsert: bool,
    conflict_columns: Option<Vec<&'static str>>,
}

impl<'a, M: Model> Insert<'a, M> {
    /// Create a new INSERT for the given instance.
    pub fn new(model: &'a M) -> Self {
        Self {
            model,
            upsert: false,
            conflict_columns: None,
        }
    }

    /// On primary-key conflict, update every inserted non-key column to
    /// the new row's value.
    pub fn on_conflict_update(mut self) -> Self {
        self.upsert = true;
        self
    }

    /// On primary-key conflict, update only the named columns.
    pub fn on_conflict_update_columns(mut self, columns: &[&'static str]) -> Self {
        self.upsert = true;
        self.conflict_columns = Some(columns.to_vec());
        self
    }

    /// Build the statement. Never submits anything itself.
    pub fn build(&self) -> Result<Statement> {
        let schema = M::schema()?;

        if let Some(explicit) = &self.conflict_columns {
            for name in explicit {
                if !schema.has_column(name) {
                    return Err(Error::Precondition(PreconditionError::new(
                        PreconditionErrorKind::UnknownColumn,
                        format!(
                            "conflict update column '{}' is not declared on '{}'",
                            name,
                            schema.entity()
                        ),
                    )));
                }
            }
        }

        let row = self.model.to_row();
        let entries: Vec<_> = row
            .iter()
            .filter(|(name, value)| {
                // Leave defaulted columns to the database when unset.
                !(value.is_null()
                    && schema.column(name).is_some_and(|f| f.db_default.is_some()))
            })
            .collect();

        let columns: Vec<&'static str> = entries.iter().map(|(name, _)| *name).collect();
        let placeholders: Vec<String> = (1..=entries.len()).map(|i| format!("${i}")).collect();

        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            schema.table_name(),
            columns.join(", "),
            placeholders.join(", ")
        );

        if self.upsert {
            let pk = schema.primary_keys();
            if pk.is_empty() {
                return Err(Error::Precondition(PreconditionError::new(
                    PreconditionErrorKind::NoPrimaryKey,
                    format!(
                        "upsert on '{}' requires a primary key to key the conflict on",
                        schema.entity()
                    ),
                )));
            }

            let targets: Vec<&'static str> = columns
                .iter()
                .copied()
                .filter(|c| !pk.contains(c))
                .filter(|c| {
                    self.conflict_columns
                        .as_ref()
                        .is_none_or(|explicit| explicit.contains(c))
                })
                .collect();

            sql.push_str(" ON CONFLICT (");
            sql.push_str(&pk.join(", "));
            if targets.is_empty() {
                sql.push_str(") DO NOTHING");
            } else {
                sql.push_str(") DO UPDATE SET ");
                let updates: Vec<String> =
                    targets.iter().map(|c| format!("{c} = EXCLUDED.{c}")).collect();
                sql.push_str(&updates.join(", "));
            }
        }

        let params = entries.into_iter().map(|(_, value)| value.clone()).collect();
        tracing::trace!(sql = %sql, "Generated INSERT");
        Ok(Statement::new(sql, params))
    }

    /// Build and submit, returning the affected-row count.
    pub fn execute<C: Connection>(&self, conn: &mut C) -> Result<u64> {
        let statement = self.build()?;
        conn.execute(&statement.sql, &statement.params)
    }
}
