use sea_orm::{DbErr, SqlErr};

/// Write failures as the storage engine reports them. Constraint violations
/// get their own variant; anything else passes through as `Db`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("uniqueness violation: {0}")]
    UniquenessViolation(String),

    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("not-null violation: {0}")]
    NotNullViolation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error(transparent)]
    Db(DbErr),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Self::UniquenessViolation(detail),
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => Self::ForeignKeyViolation(detail),
            _ => {
                let message = err.to_string();
                match classify_message(&message) {
                    Some(kind) => kind(message),
                    None => Self::Db(err),
                }
            }
        }
    }
}

/// Fallback on the engine's wording, for drivers whose error codes sea-orm
/// does not map.
fn classify_message(message: &str) -> Option<fn(String) -> StoreError> {
    let lower = message.to_ascii_lowercase();
    if lower.contains("unique constraint failed") || lower.contains("duplicate key value") {
        Some(StoreError::UniquenessViolation)
    } else if lower.contains("foreign key constraint") {
        Some(StoreError::ForeignKeyViolation)
    } else if lower.contains("not null constraint failed")
        || lower.contains("violates not-null constraint")
    {
        Some(StoreError::NotNullViolation)
    } else {
        None
    }
}

impl StoreError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::UniquenessViolation(_) | Self::ForeignKeyViolation(_) | Self::NotNullViolation(_)
        )
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(message: &str) -> StoreError {
        StoreError::from(DbErr::Custom(message.to_string()))
    }

    #[test]
    fn sqlite_messages_map_to_variants() {
        assert!(matches!(
            classify("(code: 2067) UNIQUE constraint failed: users.email"),
            StoreError::UniquenessViolation(_)
        ));
        assert!(matches!(
            classify("(code: 787) FOREIGN KEY constraint failed"),
            StoreError::ForeignKeyViolation(_)
        ));
        assert!(matches!(
            classify("(code: 1299) NOT NULL constraint failed: ratings.rating"),
            StoreError::NotNullViolation(_)
        ));
    }

    #[test]
    fn postgres_messages_map_to_variants() {
        assert!(matches!(
            classify("duplicate key value violates unique constraint \"genres_name_key\""),
            StoreError::UniquenessViolation(_)
        ));
        assert!(matches!(
            classify("null value in column \"content\" violates not-null constraint"),
            StoreError::NotNullViolation(_)
        ));
    }

    #[test]
    fn other_errors_pass_through() {
        let err = classify("connection reset");
        assert!(matches!(err, StoreError::Db(_)));
        assert!(!err.is_constraint_violation());
    }

    #[test]
    fn message_is_kept() {
        let err = classify("UNIQUE constraint failed: genres.name");
        assert!(err.to_string().contains("genres.name"));
        assert!(err.is_constraint_violation());
    }
}
