#![allow(dead_code)]

//! Shared fixtures: example models and a mock connection.

use modelsql::{
    Connection, Error, FieldInfo, ForeignKey, Model, OnDelete, Result, Row, SchemaCell, SqlType,
    Submission, SubmissionError, TableSchema, Value,
};

#[derive(Debug)]
pub struct User {
    pub user_id: String,
    pub name: Option<String>,
    pub email: String,
    pub created_at: Option<i64>,
}

impl Model for User {
    const MODEL_NAME: &'static str = "User";

    fn fields() -> &'static [FieldInfo] {
        static FIELDS: &[FieldInfo] = &[
            FieldInfo::new("user_id", SqlType::Text).primary_key(true),
            FieldInfo::new("name", SqlType::Text),
            FieldInfo::new("email", SqlType::Text).unique(true).nullable(false),
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
        vec![
            ("user_id", Value::from(self.user_id.clone())),
            ("name", Value::from(self.name.clone())),
            ("email", Value::from(self.email.clone())),
            ("created_at", Value::from(self.created_at)),
        ]
    }

    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            user_id: row.get_named("user_id")?,
            name: row.get_named_or("name", None)?,
            email: row.get_named("email")?,
            created_at: row.get_named_or("created_at", None)?,
        })
    }
}

pub struct Post {
    pub post_id: String,
    pub author_id: String,
    pub title: String,
    pub views: i64,
    pub metadata: Option<serde_json::Value>,
}

fn zero_views() -> Value {
    Value::BigInt(0)
}

impl Model for Post {
    const MODEL_NAME: &'static str = "Post";

    fn fields() -> &'static [FieldInfo] {
        static FIELDS: &[FieldInfo] = &[
            FieldInfo::new("post_id", SqlType::Text).primary_key(true),
            FieldInfo::new("author_id", SqlType::Text)
                .nullable(false)
                .foreign_key(ForeignKey::new("user", "user_id").on_delete(OnDelete::Cascade))
                .index(true),
            FieldInfo::new("title", SqlType::Text).nullable(false),
            FieldInfo::new("views", SqlType::Integer)
                .nullable(false)
                .default(zero_views),
            FieldInfo::new("metadata", SqlType::Jsonb),
        ];
        FIELDS
    }

    fn schema() -> Result<&'static TableSchema> {
        static SCHEMA: SchemaCell = SchemaCell::new();
        SCHEMA.get_or_derive::<Self>()
    }

    fn to_row(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("post_id", Value::from(self.post_id.clone())),
            ("author_id", Value::from(self.author_id.clone())),
            ("title", Value::from(self.title.clone())),
            ("views", Value::from(self.views)),
            ("metadata", Value::from(self.metadata.clone())),
        ]
    }

    fn from_row(row: &Row) -> Result<Self> {
        let schema = Self::schema()?;
        Ok(Self {
            post_id: row.get_named("post_id")?,
            author_id: row.get_named("author_id")?,
            title: row.get_named("title")?,
            views: row.get_field(schema.column("views").expect("views is declared"))?,
            metadata: row.get_named_or("metadata", None)?,
        })
    }
}

pub fn sample_post() -> Post {
    Post {
        post_id: "p1".to_string(),
        author_id: "u1".to_string(),
        title: "Hello".to_string(),
        views: 3,
        metadata: Some(serde_json::json!({"tags": ["intro"]})),
    }
}

/// Records every submission and replays canned results.
#[derive(Default)]
pub struct MockConnection {
    pub canned_rows: Vec<Row>,
    pub rows_affected: u64,
    pub submitted: Vec<(String, Vec<Value>)>,
    pub fail_with: Option<String>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            canned_rows: rows,
            ..Self::default()
        }
    }

    pub fn affecting(rows_affected: u64) -> Self {
        Self {
            rows_affected,
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }
}

impl Connection for MockConnection {
    fn submit(&mut self, sql: &str, params: &[Value]) -> Result<Submission> {
        self.submitted.push((sql.to_string(), params.to_vec()));
        if let Some(message) = &self.fail_with {
            return Err(Error::Submission(SubmissionError::new(message.clone())));
        }
        Ok(Submission {
            rows: self.canned_rows.clone(),
            rows_affected: self.rows_affected,
        })
    }
}
