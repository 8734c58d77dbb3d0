/// Storage-level error shared by connectors, health probes and migrations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Errors raised by SeaORM / sqlx
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    /// Connection could not be established after retries
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Health probe failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Migration run failed
    #[error("Migration error: {0}")]
    MigrationError(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// True when the error was raised by a unique index.
///
/// Domain repositories use this to turn a lost insert race into a
/// conflict instead of an internal error.
#[cfg(feature = "postgres")]
pub fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}

/// True when the store itself could not be reached (pool exhausted,
/// connection refused or dropped). Callers may retry these.
#[cfg(feature = "postgres")]
pub fn is_unavailable(err: &sea_orm::DbErr) -> bool {
    matches!(
        err,
        sea_orm::DbErr::Conn(_) | sea_orm::DbErr::ConnectionAcquire(_)
    )
}

#[cfg(all(test, feature = "postgres"))]
mod tests {
    use super::*;
    use sea_orm::{DbErr, RuntimeErr};

    #[test]
    fn test_connection_errors_are_unavailable() {
        let err = DbErr::Conn(RuntimeErr::Internal("refused".to_string()));
        assert!(is_unavailable(&err));
        assert!(!is_unique_violation(&err));
    }

    #[test]
    fn test_record_not_found_is_neither() {
        let err = DbErr::RecordNotFound("events".to_string());
        assert!(!is_unavailable(&err));
        assert!(!is_unique_violation(&err));
    }

    #[test]
    fn test_database_error_display() {
        let err = DatabaseError::HealthCheckFailed("timeout".to_string());
        assert_eq!(err.to_string(), "Health check failed: timeout");
    }
}
