//! Identifier derivation policy.
//!
//! Table names are derived from entity type names (PascalCase ->
//! snake_case) and index names from table+column. Both derivations are
//! deterministic; table naming is idempotent so an already-snake_case
//! name passes through unchanged.

/// Derive a table name from an entity type name.
///
/// Splits on uppercase boundaries, lower-cases, and joins with
/// underscores: `UserProfile` -> `user_profile`.
///
/// # Examples
///
/// ```
/// use modelsql_core::identifiers::table_name;
///
/// assert_eq!(table_name("User"), "user");
/// assert_eq!(table_name("UserProfile"), "user_profile");
/// assert_eq!(table_name("user_profile"), "user_profile"); // idempotent
/// ```
#[must_use]
pub fn table_name(entity_name: &str) -> String {
    let mut out = String::with_capacity(entity_name.len() + 4);
    for (i, ch) in entity_name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Derive the default index name for a single-column index.
///
/// ```
/// use modelsql_core::identifiers::index_name;
///
/// assert_eq!(index_name("post", "author_id"), "idx_post_author_id");
/// ```
#[must_use]
pub fn index_name(table: &str, column: &str) -> String {
    format!("idx_{}_{}", table, column)
}
