/// Code used when a real code could not be determined.
///
/// Consumers should treat it as generic and non-actionable.
pub const UNKNOWN_CODE: &str = "UNKNOWN";

/// Whether `code` carries no usable classification.
pub fn is_unknown(code: &str) -> bool {
    code.is_empty() || code == UNKNOWN_CODE
}
