//! Framework glue for [`AppError`]
//!
//! Feature-gated so crates that only need the error vocabulary do not pull
//! in `axum` or `sqlx`.

#[cfg(any(feature = "axum", test))]
use super::app_error::AppError;

// ============================================================================
// SQLx helpers (feature-gated)
// ============================================================================

/// PostgreSQL `unique_violation`
#[cfg(feature = "sqlx")]
const PG_UNIQUE_VIOLATION: &str = "23505";

/// True when the database rejected a write because of a unique constraint.
///
/// Repositories use this to turn an insert race into a domain conflict
/// instead of a 500.
#[cfg(feature = "sqlx")]
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code.as_ref() == PG_UNIQUE_VIOLATION),
        _ => false,
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(problem_body(&self))).into_response()
    }
}

/// RFC 7807 style body. Only kind, message and action are exposed.
#[cfg(any(feature = "axum", test))]
fn problem_body(err: &AppError) -> serde_json::Value {
    serde_json::json!({
        "type": format!("https://httpstatuses.io/{}", err.status_code()),
        "title": err.kind().as_str(),
        "status": err.status_code(),
        "detail": err.message(),
        "action": err.action(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_body_hides_source() {
        let io_err = std::io::Error::other("SELECT * FROM users");
        let err = AppError::internal("Internal error").with_source(io_err);
        let body = problem_body(&err);

        assert_eq!(body["status"], 500);
        assert_eq!(body["title"], "Internal Server Error");
        assert_eq!(body["detail"], "Internal error");
        assert!(!body.to_string().contains("SELECT"));
    }

    #[test]
    fn test_problem_body_action_is_null_when_absent() {
        let body = problem_body(&AppError::unauthorized("Missing refresh token"));
        assert_eq!(body["detail"], "Missing refresh token");
        assert!(body["action"].is_null());
    }
}

#[cfg(all(test, feature = "sqlx"))]
mod sqlx_tests {
    use super::*;
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct PgError(&'static str);

    impl fmt::Display for PgError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "database error {}", self.0)
        }
    }

    impl StdError for PgError {}

    impl sqlx::error::DatabaseError for PgError {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::Other
        }
    }

    #[test]
    fn test_unique_violation_by_sqlstate() {
        let err = sqlx::Error::Database(Box::new(PgError("23505")));
        assert!(is_unique_violation(&err));
    }

    #[test]
    fn test_other_errors_are_not_unique_violations() {
        let foreign_key = sqlx::Error::Database(Box::new(PgError("23503")));
        assert!(!is_unique_violation(&foreign_key));
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation(&sqlx::Error::PoolTimedOut));
    }
}
