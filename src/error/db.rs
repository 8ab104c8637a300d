use sea_orm::{DbErr, RuntimeErr};
use sqlx::{
    error::{DatabaseError as SqlxDatabaseError, ErrorKind},
    Error as SqlxError,
};

/// Classifies constraint violations the same way on every supported backend.
pub trait DatabaseError {
    fn unique_violation(&self) -> bool;
}

impl DatabaseError for DbErr {
    fn unique_violation(&self) -> bool {
        get_database_error(self)
            .is_some_and(|db_err| matches!(db_err.kind(), ErrorKind::UniqueViolation))
    }
}

#[allow(clippy::borrowed_box)]
fn get_database_error(err: &DbErr) -> Option<&Box<dyn SqlxDatabaseError + 'static>> {
    match err {
        DbErr::Query(RuntimeErr::SqlxError(SqlxError::Database(db_err))) => Some(db_err),
        DbErr::Exec(RuntimeErr::SqlxError(SqlxError::Database(db_err))) => Some(db_err),
        _ => None,
    }
}
