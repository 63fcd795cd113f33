//! Error types for the account model
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected before it reached the database.
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A write violated a uniqueness, not-null or foreign-key constraint.
    #[error("Integrity constraint violated: {message}")]
    Integrity { message: String },

    #[error("Password hashing failed: {reason}")]
    Hashing { reason: String },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn hashing(err: anyhow::Error) -> Self {
        Error::Hashing {
            reason: err.to_string(),
        }
    }

    /// Classify a failed insert/update.
    ///
    /// Constraint violations become [`Error::Integrity`]; everything else stays a
    /// database error.
    pub(crate) fn from_write(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message))
            | Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
                Error::Integrity { message }
            }
            _ => {
                let message = err.to_string();
                if is_constraint_violation(&message) {
                    Error::Integrity { message }
                } else {
                    Error::Database(err)
                }
            }
        }
    }

    pub fn is_integrity(&self) -> bool {
        matches!(self, Error::Integrity { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}

// sea-orm only classifies unique and foreign-key failures, and only by error
// code. Composite primary keys and NOT NULL columns need the message.
const CONSTRAINT_MARKERS: &[&str] = &[
    // SQLite
    "NOT NULL constraint failed",
    "UNIQUE constraint failed",
    "FOREIGN KEY constraint failed",
    // PostgreSQL
    "violates not-null constraint",
    "violates unique constraint",
    "violates foreign key constraint",
];

fn is_constraint_violation(message: &str) -> bool {
    CONSTRAINT_MARKERS.iter().any(|marker| message.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_messages() {
        assert!(is_constraint_violation(
            "Execution Error: error returned from database: (code: 1299) NOT NULL constraint failed: users.username"
        ));
        assert!(is_constraint_violation(
            "null value in column \"email\" of relation \"users\" violates not-null constraint"
        ));
        assert!(is_constraint_violation(
            "UNIQUE constraint failed: follows.follower_id, follows.followed_id"
        ));
        assert!(!is_constraint_violation("no such table: users"));
    }

    #[test]
    fn test_constraint_message_in_custom_error() {
        let err = Error::from_write(DbErr::Custom(
            "NOT NULL constraint failed: users.email".to_string(),
        ));
        assert!(err.is_integrity());
    }

    #[test]
    fn test_unclassified_error_stays_database() {
        let err = Error::from_write(DbErr::Custom("connection reset".to_string()));
        assert!(matches!(err, Error::Database(_)));
        assert!(!err.is_integrity());
    }

    #[test]
    fn test_validation_display() {
        let err = Error::validation("password", "must not be empty");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Invalid password: must not be empty");
    }
}
