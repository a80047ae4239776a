//! WHERE-clause condition building.

use modelsql_core::{Error, PreconditionError, PreconditionErrorKind, Result, Value};

/// A structured WHERE-clause specification.
///
/// Holds AND-joined equality predicates, OR-joined equality predicates,
/// and an optional raw fragment with its own bound inputs. Column/value
/// pairing is enforced by construction: every predicate is added as a
/// pair.
///
/// ```
/// use modelsql_query::Condition;
///
/// let cond = Condition::new()
///     .and_eq("email", "a@b.com")
///     .and_eq("active", true);
/// let (clause, params) = cond.build(0).unwrap();
/// assert_eq!(clause, "(email = $1 AND active = $2)");
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Condition {
    and: Vec<(String, Value)>,
    or: Vec<(String, Value)>,
    raw: Option<RawFragment>,
}

#[derive(Debug, Clone)]
struct RawFragment {
    fragment: String,
    params: Vec<Value>,
}

impl Condition {
    /// Create an empty condition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an AND-joined equality predicate.
    pub fn and_eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.and.push((column.into(), value.into()));
        self
    }

    /// Add an OR-joined equality predicate.
    pub fn or_eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.or.push((column.into(), value.into()));
        self
    }

    /// Attach a raw SQL fragment with its bound inputs.
    ///
    /// Write placeholders as `?`; they are rewritten to positional `$n`
    /// markers when the clause is rendered, and the marker count must
    /// match the number of inputs. The fragment's SQL correctness is the
    /// caller's responsibility; `?` characters inside string literals
    /// are not distinguished from markers.
    pub fn raw(mut self, fragment: impl Into<String>, params: Vec<Value>) -> Self {
        self.raw = Some(RawFragment {
            fragment: fragment.into(),
            params,
        });
        self
    }

    /// Whether no predicate and no fragment has been added.
    pub fn is_empty(&self) -> bool {
        self.and.is_empty() && self.or.is_empty() && self.raw.is_none()
    }

    /// Render the WHERE-clause body (without the `WHERE` keyword) and the
    /// ordered parameter list.
    ///
    /// `offset` is the number of parameters already bound by the
    /// surrounding statement; placeholders continue from `$offset+1`.
    /// An empty condition renders an empty clause. Present blocks combine
    /// as `(<and>) AND (<or>) AND <fragment>`.
    pub fn build(&self, offset: usize) -> Result<(String, Vec<Value>)> {
        let mut groups: Vec<String> = Vec::new();
        let mut params: Vec<Value> = Vec::new();
        let mut next = offset;

        if !self.and.is_empty() {
            let preds: Vec<String> = self
                .and
                .iter()
                .map(|(col, value)| {
                    next += 1;
                    params.push(value.clone());
                    format!("{col} = ${next}")
                })
                .collect();
            groups.push(format!("({})", preds.join(" AND ")));
        }

        if !self.or.is_empty() {
            let preds: Vec<String> = self
                .or
                .iter()
                .map(|(col, value)| {
                    next += 1;
                    params.push(value.clone());
                    format!("{col} = ${next}")
                })
                .collect();
            groups.push(format!("({})", preds.join(" OR ")));
        }

        if let Some(raw) = &self.raw {
            let marker_count = raw.fragment.matches('?').count();
            if marker_count != raw.params.len() {
                return Err(Error::Precondition(PreconditionError::new(
                    PreconditionErrorKind::RawParamMismatch,
                    format!(
                        "raw condition has {} placeholder(s) but {} input(s)",
                        marker_count,
                        raw.params.len()
                    ),
                )));
            }
            let mut rewritten = String::with_capacity(raw.fragment.len() + 4);
            for ch in raw.fragment.chars() {
                if ch == '?' {
                    next += 1;
                    rewritten.push('$');
                    rewritten.push_str(&next.to_string());
                } else {
                    rewritten.push(ch);
                }
            }
            params.extend(raw.params.iter().cloned());
            groups.push(rewritten);
        }

        Ok((groups.join(" AND "), params))
    }
}
