//! # Search-Term and Field-Name Sanitization
//!
//! Strip-based sanitization for values that end up inside SQL clauses.
//!
//! ## Functions Quick Reference
//!
//! | Function                   | Input          | Output       | Use Case                      |
//! |----------------------------|----------------|--------------|-------------------------------|
//! | `strip_search_term(value)` | `"abc;?123"`   | `"abc123"`   | Free-text search input        |
//! | `like_pattern(value)`      | `"abc;?123"`   | `"%abc123%"` | `LIKE` clause operand         |
//! | `strip_field_name(value)`  | `"na?.;me"`    | `"name"`     | `ORDER BY` column name        |
//!
//! ## Why Stripping, Not Escaping?
//!
//! These values come straight from an untrusted query string. Escaping would
//! preserve attacker-controlled metacharacters in a form the downstream query
//! builder must then handle correctly; stripping removes them outright, so the
//! survivor set is safe to interpolate regardless of the SQL dialect.
//!
//! - **Search terms** keep letters, digits, and `. _ - @` — enough for emails
//!   and dotted identifiers, while `%`, `'`, `;`, `?`, and whitespace are gone.
//! - **Field names** keep only letters and underscores, the character set of
//!   conventional column names.

use regex::Regex;
use std::sync::LazyLock;

static SEARCH_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9._\-@]").expect("search character class is valid"));

static FIELD_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z_]").expect("field character class is valid"));

/// Strip a free-text search term down to `[a-zA-Z0-9._\-@]`.
///
/// # Examples
///
/// ```
/// use pagekit::sanitize::strip_search_term;
///
/// // Plain terms pass through unchanged
/// assert_eq!(strip_search_term("paginator"), "paginator");
///
/// // Emails and dotted identifiers survive intact
/// assert_eq!(strip_search_term("jane.doe@example.com"), "jane.doe@example.com");
///
/// // SQL metacharacters and whitespace are removed
/// assert_eq!(strip_search_term("abc;?123"), "abc123");
/// assert_eq!(strip_search_term("a' OR '1'='1"), "aOR11");
/// assert_eq!(strip_search_term("%"), "");
/// ```
pub fn strip_search_term(value: &str) -> String {
    SEARCH_DISALLOWED.replace_all(value, "").into_owned()
}

/// Strip a search term and wrap it in `%` wildcards for a `LIKE` clause.
///
/// The wrapping is unconditional: an empty or fully-stripped term yields
/// `"%%"`, i.e. match-everything, which is the wanted behavior for a list
/// endpoint with an empty search box.
///
/// # Examples
///
/// ```
/// use pagekit::sanitize::like_pattern;
///
/// assert_eq!(like_pattern("paginator"), "%paginator%");
/// assert_eq!(like_pattern("abc;?123"), "%abc123%");
/// assert_eq!(like_pattern(""), "%%");
/// assert_eq!(like_pattern("%"), "%%");
/// ```
pub fn like_pattern(value: &str) -> String {
    format!("%{}%", strip_search_term(value))
}

/// Strip an order-by field name down to `[A-Za-z_]`.
///
/// # Examples
///
/// ```
/// use pagekit::sanitize::strip_field_name;
///
/// assert_eq!(strip_field_name("first_name"), "first_name");
/// assert_eq!(strip_field_name("na?.;me"), "name");
///
/// // Digits are not conventional in column names and are dropped too
/// assert_eq!(strip_field_name("col1"), "col");
/// assert_eq!(strip_field_name("1; DROP TABLE users"), "DROPTABLEusers");
/// ```
pub fn strip_field_name(value: &str) -> String {
    FIELD_DISALLOWED.replace_all(value, "").into_owned()
}
