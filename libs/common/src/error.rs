//! Custom error types for the common library
//!
//! This module defines the storage error type shared by the Wefaves
//! services and the helpers used to classify PostgreSQL failures.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// SQLSTATE raised when a value does not fit its column (`string_data_right_truncation`)
const VALUE_TOO_LONG: &str = "22001";

/// SQLSTATE raised on a unique constraint violation
const UNIQUE_VIOLATION: &str = "23505";

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl DatabaseError {
    /// The SQLSTATE code reported by PostgreSQL, if any
    pub fn sqlstate(&self) -> Option<String> {
        match self {
            DatabaseError::Query(SqlxError::Database(db)) => db.code().map(|c| c.into_owned()),
            _ => None,
        }
    }

    /// True when a value was rejected for exceeding its column length
    pub fn is_value_too_long(&self) -> bool {
        self.sqlstate().as_deref() == Some(VALUE_TOO_LONG)
    }

    /// True when a unique constraint rejected the statement
    pub fn is_unique_violation(&self) -> bool {
        self.sqlstate().as_deref() == Some(UNIQUE_VIOLATION)
    }
}

impl From<SqlxError> for DatabaseError {
    fn from(err: SqlxError) -> Self {
        DatabaseError::Query(err)
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_have_no_sqlstate() {
        let err = DatabaseError::from(SqlxError::RowNotFound);
        assert_eq!(err.sqlstate(), None);
        assert!(!err.is_value_too_long());
        assert!(!err.is_unique_violation());

        let err = DatabaseError::Configuration("missing url".to_string());
        assert_eq!(err.sqlstate(), None);
        assert_eq!(
            err.to_string(),
            "Database configuration error: missing url"
        );
    }
}
