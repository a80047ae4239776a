//! Finished SQL statements.

use crate::value::Value;
use std::fmt;

/// A fully rendered SQL statement with its ordered bound parameters.
///
/// Every generator returns one of these; a statement is never partially
/// built: generation either produces a valid statement or fails before
/// returning.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// SQL text with `$n` placeholders
    pub sql: String,
    /// Bound values, ordered to match the placeholders
    pub params: Vec<Value>,
}

impl Statement {
    /// Create a statement with bound parameters.
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Create a parameterless statement (DDL is not parameterized).
    pub fn ddl(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql)
    }
}
