use thiserror::Error;

/// Error returned when a string does not name a sort direction.
///
/// Only `asc` and `desc` (case-insensitive) parse into
/// [`Ordering`](crate::Ordering). The lenient setters on
/// [`Pagination`](crate::Pagination) swallow this error and keep the prior
/// direction; it only surfaces to callers invoking `str::parse` directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized ordering {0:?} (expected \"asc\" or \"desc\")")]
pub struct ParseOrderingError(pub String);
