//! Unique vehicle code validation and formatting.
//!
//! External contract shared with the backend and the printed documents:
//! `AAA-99-AA999999` — three uppercase letters, two digits, two uppercase
//! letters followed by six digits, dash-separated. Case-sensitive.

#[cfg(test)]
#[path = "code_unique_test.rs"]
mod code_unique_test;

fn all_ascii_uppercase(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_uppercase())
}

fn all_ascii_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Validate a unique vehicle code against the `AAA-99-AA999999` format.
#[must_use]
pub fn is_valid_code_unique(code: &str) -> bool {
    let mut parts = code.split('-');
    let (Some(prefix), Some(year), Some(serial), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    // Length checks are in bytes; reject non-ASCII before slicing.
    if !code.is_ascii() {
        return false;
    }

    prefix.len() == 3
        && all_ascii_uppercase(prefix)
        && year.len() == 2
        && all_ascii_digits(year)
        && serial.len() == 8
        && all_ascii_uppercase(&serial[..2])
        && all_ascii_digits(&serial[2..])
}

/// Normalize free-form input toward the code format: uppercase and strip
/// whitespace. Validation still decides whether the result is acceptable.
#[must_use]
pub fn normalize_code_input(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
