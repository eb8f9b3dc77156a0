//! Phone number normalization.
//!
//! Storage keeps phones as bare digits; the UI shows `(XXX) XXX-XXXX`.
//! None of these functions fail: [`super::validation`] decides whether the
//! result is acceptable.

/// Number of digits in a US phone number.
pub const PHONE_DIGITS: usize = 10;

/// Length of a fully formatted number, `(123) 456-7890`.
pub const DISPLAY_PHONE_LEN: usize = 14;

fn digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Strip every non-digit. No padding or truncation is applied.
pub fn to_canonical_phone(raw: &str) -> String {
    digits(raw)
}

/// Render a stored phone for display.
///
/// Anything that is not exactly ten digits comes back as its bare digits.
pub fn to_display_phone(raw: &str) -> String {
    let digits = digits(raw);
    if digits.len() != PHONE_DIGITS {
        return digits;
    }
    format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
}

/// Incremental formatter applied on every keystroke.
///
/// Keeps at most ten digits and renders whatever prefix of the
/// `(DDD) DDD-DDDD` mask they fill.
pub fn live_format_phone(current_input: &str) -> String {
    let mut digits = digits(current_input);
    digits.truncate(PHONE_DIGITS);

    match digits.len() {
        6.. => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        3.. => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => digits,
    }
}
