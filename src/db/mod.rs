//! Conversion of SQL driver errors into [`DataError`]s

pub mod backend;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "sqlite")]
pub mod sqlite;

use tracing::debug;

use crate::errors::{BoxError, DataError, UNKNOWN_CODE};

#[cfg(feature = "postgres")]
pub use postgres::PostgresBackend;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteBackend;

pub use backend::DriverBackend;

/// Driver backends compiled into this build
pub fn drivers() -> Vec<&'static dyn DriverBackend> {
    #[allow(unused_mut)]
    let mut drivers: Vec<&'static dyn DriverBackend> = Vec::new();

    #[cfg(feature = "postgres")]
    drivers.push(&PostgresBackend);

    #[cfg(feature = "sqlite")]
    drivers.push(&SqliteBackend);

    drivers
}

/// Convert an error returned by a SQL driver into a [`DataError`].
///
/// `None` means there was no error and yields `None`. An error recognized by
/// one of the [`drivers`] keeps the driver's code; anything else gets
/// [`UNKNOWN_CODE`]. The original error is always kept as the inner error.
pub fn from_sql_driver(inner: Option<BoxError>, message: impl Into<String>) -> Option<DataError> {
    let inner = inner?;

    let code = drivers().into_iter().find_map(|driver| {
        let code = driver.error_code(&*inner)?;
        debug!(driver = driver.name(), code = %code, "Recognized SQL driver error");
        Some(code)
    });

    Some(DataError::new(
        Some(inner),
        code.unwrap_or_else(|| UNKNOWN_CODE.to_string()),
        message,
    ))
}
