//! Numeric field parsing shared by all sentence decoders.

/// Parses an integer field. Returns 0 for blank, malformed
/// or out of range content, this never fails.
pub fn parse_int(field: &str) -> i32 {
    field.trim().parse::<i32>().unwrap_or(0)
}
