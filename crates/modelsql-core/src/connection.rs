//! Connection collaborator boundary.
//!
//! The engine never opens sockets or manages transactions. Statement
//! builders hand a finished SQL string plus ordered parameters to an
//! implementation of [`Connection`]. Everything else (connect/disconnect,
//! commit/rollback, timeouts, cancellation) belongs to that
//! implementation. Failures it reports come back as opaque
//! [`crate::error::SubmissionError`]s, never retried or interpreted.

use crate::Result;
use crate::row::Row;
use crate::value::Value;

/// The result of submitting one statement.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    /// Result rows (empty for DML/DDL)
    pub rows: Vec<Row>,
    /// Rows affected (0 for queries on most drivers)
    pub rows_affected: u64,
}

impl Submission {
    /// A submission carrying result rows.
    pub fn rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            rows_affected: 0,
        }
    }

    /// A submission carrying only an affected-row count.
    pub fn affected(rows_affected: u64) -> Self {
        Self {
            rows: Vec::new(),
            rows_affected,
        }
    }
}

/// A collaborator capable of executing finished statements.
///
/// Builders work identically whether a connection is supplied or not:
/// `build()` is always side-effect free, and the `fetch_*`/`execute`
/// conveniences are `build()` followed by [`Connection::submit`].
pub trait Connection {
    /// Submit a statement and return rows plus the affected-row count.
    fn submit(&mut self, sql: &str, params: &[Value]) -> Result<Submission>;

    /// Submit a statement and return only its rows.
    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        Ok(self.submit(sql, params)?.rows)
    }

    /// Submit a statement and return only the affected-row count.
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64> {
        Ok(self.submit(sql, params)?.rows_affected)
    }
}
