//! DELETE statement builder.

use crate::condition::Condition;
use modelsql_core::{
    Connection, Error, Model, PreconditionError, PreconditionErrorKind, Result, Statement,
};
use std::marker::PhantomData;

/// A DELETE statement builder for one entity type.
///
/// A non-empty condition is mandatory. There is no fallback to a default
/// condition, so an accidental full-table delete cannot be expressed.
#[derive(Debug)]
pub struct Delete<M: Model> {
    condition: Option<Condition>,
    _marker: PhantomData<M>,
}

impl<M: Model> Default for Delete<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> Delete<M> {
    /// Create a new DELETE for the model's table.
    pub fn new() -> Self {
        Self {
            condition: None,
            _marker: PhantomData,
        }
    }

    /// Set the WHERE condition.
    pub fn filter(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Build the statement; fails before producing any SQL when the
    /// condition is missing or empty.
    pub fn build(&self) -> Result<Statement> {
        let schema = M::schema()?;

        let condition = match self.condition.as_ref().filter(|c| !c.is_empty()) {
            Some(condition) => condition,
            None => {
                return Err(Error::Precondition(PreconditionError::new(
                    PreconditionErrorKind::MissingCondition,
                    format!(
                        "delete from '{}' requires a non-empty condition",
                        schema.entity()
                    ),
                )));
            }
        };

        let (clause, params) = condition.build(0)?;
        let sql = format!("DELETE FROM {} WHERE {}", schema.table_name(), clause);
        tracing::trace!(sql = %sql, "Generated DELETE");
        Ok(Statement::new(sql, params))
    }

    /// Build and submit, returning the affected-row count.
    pub fn execute<C: Connection>(&self, conn: &mut C) -> Result<u64> {
        let statement = self.build()?;
        conn.execute(&statement.sql, &statement.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelsql_core::{FieldInfo, Row, SchemaCell, SqlType, TableSchema, Value};

    struct Session;

    impl Model for Session {
        const MODEL_NAME: &'static str = "Session";

        fn fields() -> &'static [FieldInfo] {
            static FIELDS: &[FieldInfo] = &[
                FieldInfo::new("session_id", SqlType::Text).primary_key(true),
                FieldInfo::new("user_id", SqlType::Text).nullable(false),
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
    fn delete_with_condition() {
        let stmt = Delete::<Session>::new()
            .filter(Condition::new().and_eq("user_id", "u1"))
            .build()
            .unwrap();
        assert_eq!(stmt.sql, "DELETE FROM session WHERE (user_id = $1)");
        assert_eq!(stmt.params, vec![Value::Text("u1".to_string())]);
    }

    #[test]
    fn missing_condition_fails_without_sql() {
        let err = Delete::<Session>::new().build().unwrap_err();
        match err {
            Error::Precondition(pe) => {
                assert_eq!(pe.kind, PreconditionErrorKind::MissingCondition);
            }
            other => panic!("expected precondition error, got {other}"),
        }
    }

    #[test]
    fn empty_condition_is_rejected_too() {
        let err = Delete::<Session>::new()
            .filter(Condition::new())
            .build()
            .unwrap_err();
        match err {
            Error::Precondition(pe) => {
                assert_eq!(pe.kind, PreconditionErrorKind::MissingCondition);
            }
            other => panic!("expected precondition error, got {other}"),
        }
    }
}
