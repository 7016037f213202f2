use std::error::Error as StdError;

/// Recognizes errors produced by one SQL driver.
pub trait DriverBackend: Send + Sync {
    /// Driver name, used in logs
    fn name(&self) -> &'static str;

    /// Return the driver's code for `err` if it is an error this driver produces.
    fn error_code(&self, err: &(dyn StdError + Send + Sync + 'static)) -> Option<String>;
}
