//! Digit extraction and the repeated-digit rule
//!
//! [`is_repeated_run`] is the only definition of "all digits identical" in
//! the crate. The orchestrator's pre-check and the CPF checksum both call it.

/// Numeric values of the ASCII digits in `document`, in order.
pub fn extract_digits(document: &str) -> Vec<u8> {
    document
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect()
}

/// True when `digits` is non-empty and every element equals the first.
pub fn is_repeated_run(digits: &[u8]) -> bool {
    match digits.split_first() {
        Some((first, rest)) => rest.iter().all(|d| d == first),
        None => false,
    }
}

/// Repeated-digit pre-check over a raw document string.
pub fn has_repeated_digits(document: &str) -> bool {
    is_repeated_run(&extract_digits(document))
}
