//! Database row representation and row-to-entity mapping.

use crate::Result;
use crate::error::{Error, MappingError};
use crate::field::FieldInfo;
use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Column metadata shared across all rows in a result set.
///
/// Wrapped in `Arc` so every row from the same query shares one copy.
#[derive(Debug, Clone)]
pub struct ColumnInfo {
    /// Column names in order
    names: Vec<String>,
    /// Name -> index mapping for O(1) lookup
    name_to_index: HashMap<String, usize>,
}

impl ColumnInfo {
    /// Create new column info from a list of column names.
    pub fn new(names: Vec<String>) -> Self {
        let name_to_index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self {
            names,
            name_to_index,
        }
    }

    /// Get the number of columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Get the index of a column by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Check if a column exists.
    pub fn contains(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    /// Get all column names.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// A single row returned from a statement submission.
///
/// Rows provide both index-based and name-based access to column values.
#[derive(Debug, Clone)]
pub struct Row {
    /// Column values in order
    values: Vec<Value>,
    /// Shared column metadata
    columns: Arc<ColumnInfo>,
}

impl Row {
    /// Create a new row with the given columns and values.
    ///
    /// For multiple rows from the same result set, prefer `with_columns`
    /// to share the column metadata.
    pub fn new(column_names: Vec<String>, values: Vec<Value>) -> Self {
        let columns = Arc::new(ColumnInfo::new(column_names));
        Self { values, columns }
    }

    /// Create a new row with shared column metadata.
    pub fn with_columns(columns: Arc<ColumnInfo>, values: Vec<Value>) -> Self {
        Self { values, columns }
    }

    /// Get the shared column metadata.
    pub fn column_info(&self) -> Arc<ColumnInfo> {
        Arc::clone(&self.columns)
    }

    /// Get the number of columns in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if this row is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a value by column index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Get a value by column name.
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.columns.index_of(name).and_then(|i| self.values.get(i))
    }

    /// Check if a column exists by name.
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    /// Get a typed value by column index.
    pub fn get_as<T: FromValue>(&self, index: usize) -> Result<T> {
        let value = self.get(index).ok_or_else(|| {
            Error::Mapping(MappingError {
                column: format!("#{index}"),
                expected: std::any::type_name::<T>(),
                actual: format!("index out of bounds (row has {} columns)", self.len()),
            })
        })?;
        T::from_value(value)
    }

    /// Get a typed value by column name.
    ///
    /// A missing column is a mapping error; use [`Row::get_named_or`] for
    /// columns with an in-process default.
    pub fn get_named<T: FromValue>(&self, name: &str) -> Result<T> {
        let value = self.get_by_name(name).ok_or_else(|| {
            Error::Mapping(MappingError {
                column: name.to_string(),
                expected: std::any::type_name::<T>(),
                actual: "missing column".to_string(),
            })
        })?;
        T::from_value(value).map_err(|e| match e {
            Error::Mapping(mut me) => {
                me.column = name.to_string();
                Error::Mapping(me)
            }
            e => e,
        })
    }

    /// Get a typed value by column name, falling back when the column is
    /// absent from the result.
    ///
    /// A present-but-unconvertible value is still a mapping error.
    pub fn get_named_or<T: FromValue>(&self, name: &str, fallback: T) -> Result<T> {
        if self.contains_column(name) {
            self.get_named(name)
        } else {
            Ok(fallback)
        }
    }

    /// Get a typed value for a declared column, applying the column's
    /// in-process default when the result row omits it.
    ///
    /// Resolution order for an absent column: the field's `default`
    /// function, then NULL for nullable fields (an error unless the
    /// target type is an `Option`), then a mapping error naming the
    /// column.
    pub fn get_field<T: FromValue>(&self, field: &FieldInfo) -> Result<T> {
        if self.contains_column(field.name) {
            return self.get_named(field.name);
        }
        let fallback = if let Some(default) = field.default {
            default()
        } else if field.is_nullable() {
            Value::Null
        } else {
            return Err(Error::Mapping(MappingError {
                column: field.name.to_string(),
                expected: std::any::type_name::<T>(),
                actual: "missing column".to_string(),
            }));
        };
        T::from_value(&fallback).map_err(|e| match e {
            Error::Mapping(mut me) => {
                me.column = field.name.to_string();
                Error::Mapping(me)
            }
            e => e,
        })
    }

    /// Get all column names.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.names().iter().map(String::as_str)
    }

    /// Iterate over (column_name, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

/// Trait for converting from a [`Value`] to a typed value.
pub trait FromValue: Sized {
    /// Convert from a Value, returning a mapping error on mismatch.
    fn from_value(value: &Value) -> Result<Self>;
}

fn mismatch<T>(value: &Value) -> Error {
    Error::Mapping(MappingError {
        column: String::new(),
        expected: std::any::type_name::<T>(),
        actual: value.type_name().to_string(),
    })
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        value.as_bool().ok_or_else(|| mismatch::<bool>(value))
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Int(v) => Ok(*v),
            Value::BigInt(v) => i32::try_from(*v).map_err(|_| mismatch::<i32>(value)),
            _ => Err(mismatch::<i32>(value)),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Int(v) => Ok(i64::from(*v)),
            Value::BigInt(v) => Ok(*v),
            // Temporal values carry microsecond counts.
            Value::Time(v) | Value::Timestamp(v) | Value::TimestampTz(v) => Ok(*v),
            Value::Bool(v) => Ok(if *v { 1 } else { 0 }),
            _ => Err(mismatch::<i64>(value)),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        value.as_f64().ok_or_else(|| mismatch::<f64>(value))
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Text(s) | Value::Numeric(s) | Value::Interval(s) => Ok(s.clone()),
            _ => Err(mismatch::<String>(value)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl FromValue for serde_json::Value {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Json(v) => Ok(v.clone()),
            Value::Text(s) => serde_json::from_str(s).map_err(|_| mismatch::<serde_json::Value>(value)),
            _ => Err(mismatch::<serde_json::Value>(value)),
        }
    }
}
