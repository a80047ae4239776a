//! SELECT statement builder.

use crate::condition::Condition;
use modelsql_core::{Connection, Model, Result, Statement};
use std::marker::PhantomData;

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    const fn as_sql(self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

/// A SELECT statement builder for one entity type.
///
/// `build()` renders the statement without touching a connection;
/// `fetch_one`/`fetch_all` render and submit through a collaborator.
#[derive(Debug, Clone)]
pub struct Select<M: Model> {
    condition: Condition,
    order_by: Vec<String>,
    order_direction: OrderDirection,
    group_by: Vec<String>,
    limit: Option<u64>,
    offset: Option<u64>,
    _marker: PhantomData<M>,
}

impl<M: Model> Select<M> {
    /// Create a new SELECT over the model's table.
    pub fn new() -> Self {
        Self {
            condition: Condition::new(),
            order_by: Vec::new(),
            order_direction: OrderDirection::Asc,
            group_by: Vec::new(),
            limit: None,
            offset: None,
            _marker: PhantomData,
        }
    }

    /// Set the WHERE condition. An empty condition selects everything.
    pub fn filter(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    /// Set ORDER BY columns and direction.
    pub fn order_by(mut self, columns: &[&str], direction: OrderDirection) -> Self {
        self.order_by = columns.iter().map(|&c| c.to_string()).collect();
        self.order_direction = direction;
        self
    }

    /// Set GROUP BY columns.
    pub fn group_by(mut self, columns: &[&str]) -> Self {
        self.group_by = columns.iter().map(|&c| c.to_string()).collect();
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET.
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    fn render(&self, limit: Option<u64>) -> Result<Statement> {
        let schema = M::schema()?;
        let mut sql = format!("SELECT * FROM {}", schema.table_name());
        let (clause, params) = self.condition.build(0)?;

        if !clause.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clause);
        }

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
            sql.push(' ');
            sql.push_str(self.order_direction.as_sql());
        }

        if let Some(n) = limit {
            sql.push_str(" LIMIT ");
            sql.push_str(&n.to_string());
        }

        if let Some(n) = self.offset {
            sql.push_str(" OFFSET ");
            sql.push_str(&n.to_string());
        }

        tracing::trace!(sql = %sql, "Generated SELECT");
        Ok(Statement::new(sql, params))
    }

    /// Build the many-row form of the statement.
    pub fn build(&self) -> Result<Statement> {
        self.render(self.limit)
    }

    /// Build the single-row form: `LIMIT 1` regardless of any
    /// caller-specified limit.
    pub fn build_one(&self) -> Result<Statement> {
        self.render(Some(1))
    }

    /// Submit the single-row form and map the first row.
    ///
    /// Zero matching rows is not an error; it returns `Ok(None)`.
    pub fn fetch_one<C: Connection>(&self, conn: &mut C) -> Result<Option<M>> {
        let statement = self.build_one()?;
        let rows = conn.query(&statement.sql, &statement.params)?;
        rows.first().map(M::from_row).transpose()
    }

    /// Submit the many-row form and map every row; empty when no match.
    pub fn fetch_all<C: Connection>(&self, conn: &mut C) -> Result<Vec<M>> {
        let statement = self.build()?;
        let rows = conn.query(&statement.sql, &statement.params)?;
        rows.iter().map(M::from_row).collect()
    }
}

impl<M: Model> Default for Select<M> {
    fn default() -> Self {
        Self::new()
    }
}
