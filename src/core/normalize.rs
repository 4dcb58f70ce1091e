/// Reduces any human representation of a phone number to its decimal digits,
/// in original order. This canonical form is the identity key for storage
/// filenames and dedup. Total and idempotent; input with no digits yields an
/// empty string.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}
