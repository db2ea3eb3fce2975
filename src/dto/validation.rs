//! Validation helpers for score submissions.

use validator::ValidationError;

/// Maximum number of characters accepted for initials.
pub const MAX_INITIALS_LEN: usize = 3;
/// Largest value representable as 24-bit RGB.
pub const MAX_COLOR: u32 = 0xFF_FF_FF;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Validates that initials hold at most [`MAX_INITIALS_LEN`] characters.
///
/// Any character is accepted; only the count matters.
pub fn validate_initials(initials: &str) -> Result<(), ValidationError> {
    if initials.chars().count() > MAX_INITIALS_LEN {
        return Err(invalid_initials("initials_length"));
    }
    Ok(())
}

/// Error returned for initials that are too long or not text at all.
pub fn invalid_initials(code: &'static str) -> ValidationError {
    error(code, "Initials must be 3 characters or less")
}

/// Parses a textual score into a finite number.
pub fn parse_score(text: &str) -> Result<f64, ValidationError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|score| score.is_finite())
        .ok_or_else(invalid_score)
}

/// Error returned for scores that are not finite numbers.
pub fn invalid_score() -> ValidationError {
    error("score_format", "Score must be a valid number")
}

/// Validates that a score is not negative, folding `-0.0` into `0.0`.
pub fn validate_score(score: f64) -> Result<f64, ValidationError> {
    if score < 0.0 {
        return Err(error("score_negative", "Score must be a positive number"));
    }
    Ok(if score == 0.0 { 0.0 } else { score })
}

/// Parses a hexadecimal RGB color, with an optional `#` or `0x` prefix.
///
/// # Examples
///
/// ```ignore
/// parse_color("FF0000")   // Ok(16711680)
/// parse_color("#808080")  // Ok(8421504)
/// parse_color("1000000")  // Err - wider than 24 bits
/// ```
pub fn parse_color(text: &str) -> Result<u32, ValidationError> {
    let text = text.trim();
    let digits = text
        .strip_prefix('#')
        .or_else(|| text.strip_prefix("0x"))
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid_color());
    }

    u32::from_str_radix(digits, 16)
        .ok()
        .filter(|color| *color <= MAX_COLOR)
        .ok_or_else(invalid_color)
}

/// Error returned for colors that are not 24-bit hexadecimal values.
pub fn invalid_color() -> ValidationError {
    error("color_format", "Color must be a hexadecimal RGB value")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_initials() {
        assert!(validate_initials("AAA").is_ok());
        assert!(validate_initials("A").is_ok());
        assert!(validate_initials("").is_ok());
        assert!(validate_initials("1!?").is_ok()); // no charset restriction
        assert!(validate_initials("ÉÀÜ").is_ok()); // counted in characters, not bytes
        assert!(validate_initials("ABCD").is_err());
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("100").unwrap(), 100.0);
        assert_eq!(parse_score(" 12.5 ").unwrap(), 12.5);
        assert_eq!(parse_score("-3").unwrap(), -3.0);
        assert!(parse_score("abc").is_err());
        assert!(parse_score("").is_err());
        assert!(parse_score("NaN").is_err());
        assert!(parse_score("inf").is_err());
    }

    #[test]
    fn test_validate_score() {
        assert_eq!(validate_score(0.0).unwrap(), 0.0);
        assert!(validate_score(-0.0).unwrap().is_sign_positive());
        assert_eq!(validate_score(1e300).unwrap(), 1e300);
        let err = validate_score(-0.5).unwrap_err();
        assert_eq!(err.code, "score_negative");
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("FF0000").unwrap(), 16_711_680);
        assert_eq!(parse_color("#808080").unwrap(), 8_421_504);
        assert_eq!(parse_color("0x00ff00").unwrap(), 0x00FF00);
        assert_eq!(parse_color("0").unwrap(), 0);
        assert!(parse_color("1000000").is_err()); // too wide
        assert!(parse_color("GG0000").is_err());
        assert!(parse_color("").is_err());
        assert!(parse_color("+FF").is_err());
    }
}
