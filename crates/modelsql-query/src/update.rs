//! UPDATE statement builder with arithmetic deltas.

use crate::condition::Condition;
use modelsql_core::{
    Connection, Error, Model, PreconditionError, PreconditionErrorKind, Result, Statement, Value,
};
use std::collections::HashSet;

/// An UPDATE statement builder for one model instance.
///
/// Plain SET assignments come from the instance's non-key fields (or an
/// explicit `set_only` list). Increment/decrement deltas render as
/// `col = col + $n` / `col = col - $n` and may be combined with plain
/// assignments in the same statement; the three column sets must be
/// disjoint. When no condition is supplied the WHERE clause is equality
/// on every primary-key field, using the instance's current key values,
/// so an unfiltered UPDATE is unrepresentable.
#[derive(Debug)]
pub struct Update<'a, M: Model> {
    model: &'a M,
    condition: Option<Condition>,
    set_only: Option<Vec<&'static str>>,
    increments: Vec<(&'static str, Value)>,
    decrements: Vec<(&'static str, Value)>,
}

impl<'a, M: Model> Update<'a, M> {
    /// Create a new UPDATE for the given instance.
    pub fn new(model: &'a M) -> Self {
        Self {
            model,
            condition: None,
            set_only: None,
            increments: Vec::new(),
            decrements: Vec::new(),
        }
    }

    /// Replace the default primary-key condition with an explicit one.
    ///
    /// An empty condition is treated as absent; the primary-key default
    /// still applies.
    pub fn filter(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Restrict plain SET assignments to the named columns.
    pub fn set_only(mut self, columns: &[&'static str]) -> Self {
        self.set_only = Some(columns.to_vec());
        self
    }

    /// Add `column = column + value` to the SET clause.
    pub fn increment(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.increments.push((column, value.into()));
        self
    }

    /// Add `column = column - value` to the SET clause.
    pub fn decrement(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.decrements.push((column, value.into()));
        self
    }

    /// Build the statement. All precondition failures happen here,
    /// before any SQL exists.
    pub fn build(&self) -> Result<Statement> {
        let schema = M::schema()?;

        for name in self
            .set_only
            .iter()
            .flatten()
            .chain(self.increments.iter().map(|(n, _)| n))
            .chain(self.decrements.iter().map(|(n, _)| n))
        {
            if !schema.has_column(name) {
                return Err(precondition(
                    PreconditionErrorKind::UnknownColumn,
                    format!("column '{}' is not declared on '{}'", name, schema.entity()),
                ));
            }
        }

        let inc_names: HashSet<&str> = self.increments.iter().map(|(n, _)| *n).collect();
        let dec_names: HashSet<&str> = self.decrements.iter().map(|(n, _)| *n).collect();

        if let Some(shared) = inc_names.intersection(&dec_names).next() {
            return Err(precondition(
                PreconditionErrorKind::OverlappingColumns,
                format!("column '{shared}' is both incremented and decremented"),
            ));
        }

        if let Some(explicit) = &self.set_only {
            if let Some(shared) = explicit
                .iter()
                .find(|n| inc_names.contains(**n) || dec_names.contains(**n))
            {
                return Err(precondition(
                    PreconditionErrorKind::OverlappingColumns,
                    format!("column '{shared}' appears in both SET and a delta"),
                ));
            }
        }

        let pk = schema.primary_keys();
        let row = self.model.to_row();

        let plain: Vec<_> = row
            .iter()
            .filter(|(name, _)| !pk.contains(name))
            .filter(|(name, _)| match &self.set_only {
                Some(explicit) => explicit.contains(name),
                // Delta columns are carved out of the implicit SET list.
                None => !inc_names.contains(name) && !dec_names.contains(name),
            })
            .collect();

        let mut assignments: Vec<String> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        for (name, value) in &plain {
            params.push(value.clone());
            assignments.push(format!("{} = ${}", name, params.len()));
        }
        for (name, value) in &self.increments {
            params.push(value.clone());
            assignments.push(format!("{} = {} + ${}", name, name, params.len()));
        }
        for (name, value) in &self.decrements {
            params.push(value.clone());
            assignments.push(format!("{} = {} - ${}", name, name, params.len()));
        }

        if assignments.is_empty() {
            return Err(precondition(
                PreconditionErrorKind::EmptyAssignment,
                format!("update on '{}' has no column to set", schema.entity()),
            ));
        }

        let explicit_condition = self.condition.as_ref().filter(|c| !c.is_empty());
        let where_clause = match explicit_condition {
            Some(condition) => {
                let (clause, condition_params) = condition.build(params.len())?;
                params.extend(condition_params);
                clause
            }
            None => {
                if pk.is_empty() {
                    return Err(precondition(
                        PreconditionErrorKind::NoPrimaryKey,
                        format!(
                            "update on '{}' needs an explicit condition: the entity has no primary key",
                            schema.entity()
                        ),
                    ));
                }
                let key_values = self.model.primary_key_values();
                let preds: Vec<String> = pk
                    .iter()
                    .zip(key_values)
                    .map(|(name, value)| {
                        params.push(value);
                        format!("{} = ${}", name, params.len())
                    })
                    .collect();
                preds.join(" AND ")
            }
        };

        let sql = format!(
            "UPDATE {} SET {} WHERE {}",
            schema.table_name(),
            assignments.join(", "),
            where_clause
        );
        tracing::trace!(sql = %sql, "Generated UPDATE");
        Ok(Statement::new(sql, params))
    }

    /// Build and submit, returning the affected-row count.
    pub fn execute<C: Connection>(&self, conn: &mut C) -> Result<u64> {
        let statement = self.build()?;
        conn.execute(&statement.sql, &statement.params)
    }
}

fn precondition(kind: PreconditionErrorKind, message: String) -> Error {
    Error::Precondition(PreconditionError::new(kind, message))
}
