//! Application-defined SQL functions.
//!
//! SQLite's built-in `LIKE`/`lower()` only fold ASCII case, so the attribute
//! search uses `contains_ci(haystack, needle)` which folds full Unicode.

use super::{DbError, DbResult};
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

/// Name of the case-insensitive substring function.
pub const CONTAINS_CI: &str = "contains_ci";

/// Registers every application function on `conn`.
///
/// # Errors
/// - [`DbError::FunctionRegistration`] naming the function SQLite rejected.
pub fn register_functions(conn: &Connection) -> DbResult<()> {
    conn.create_scalar_function(
        CONTAINS_CI,
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let haystack = ctx.get::<String>(0)?;
            let needle = ctx.get::<String>(1)?;
            Ok(contains_ignore_case(&haystack, &needle))
        },
    )
    .map_err(|source| DbError::FunctionRegistration {
        name: CONTAINS_CI,
        source,
    })
}

/// Unicode-aware case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
