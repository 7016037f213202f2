use std::error::Error as StdError;

use crate::db::backend::DriverBackend;

/// Recognizes `rusqlite` failures and reports their extended result code
pub struct SqliteBackend;

impl DriverBackend for SqliteBackend {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn error_code(&self, err: &(dyn StdError + Send + Sync + 'static)) -> Option<String> {
        match err.downcast_ref::<rusqlite::Error>()? {
            rusqlite::Error::SqliteFailure(ffi_err, _) => Some(ffi_err.extended_code.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_failure_code() {
        // SQLITE_CONSTRAINT_UNIQUE
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(2067),
            Some("UNIQUE constraint failed: users.email".to_string()),
        );
        assert_eq!(SqliteBackend.error_code(&err).as_deref(), Some("2067"));
    }

    #[test]
    fn test_other_rusqlite_error() {
        let err = rusqlite::Error::QueryReturnedNoRows;
        assert!(SqliteBackend.error_code(&err).is_none());
    }
}
