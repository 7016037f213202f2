//! Frequently handled PostgreSQL SQLSTATE codes.
//!
//! See <https://www.postgresql.org/docs/current/errcodes-appendix.html>.

pub const NOT_NULL_VIOLATION: &str = "23502";
pub const FOREIGN_KEY_VIOLATION: &str = "23503";
pub const UNIQUE_VIOLATION: &str = "23505";
pub const CHECK_VIOLATION: &str = "23514";
pub const SERIALIZATION_FAILURE: &str = "40001";
pub const DEADLOCK_DETECTED: &str = "40P01";

/// The two character class of a SQLSTATE code, e.g. `"23"` for integrity
/// constraint violations. Returns `None` for strings that are not SQLSTATE
/// shaped.
pub fn sqlstate_class(code: &str) -> Option<&str> {
    if code.len() != 5 || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    Some(&code[..2])
}
