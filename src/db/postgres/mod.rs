pub mod sqlstate;

use std::error::Error as StdError;

use crate::db::backend::DriverBackend;

/// Recognizes `sqlx` errors and reports their SQLSTATE code
pub struct PostgresBackend;

impl DriverBackend for PostgresBackend {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn error_code(&self, err: &(dyn StdError + Send + Sync + 'static)) -> Option<String> {
        let db_err = err.downcast_ref::<sqlx::Error>()?.as_database_error()?;
        db_err.code().map(|code| code.into_owned())
    }
}
