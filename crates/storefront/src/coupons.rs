//! Hard-coded coupon codes.
//!
//! Coupon validation belongs to the checkout view, not the cart container:
//! the container stores whatever percentage it is handed, and this table is
//! the only place a code is checked against a known-good list. An unknown
//! code surfaces as a user-visible message and leaves the discount untouched.

/// Known coupon codes and their discount percentages.
const COUPONS: &[(&str, u32)] = &[("WELCOME10", 10), ("SOUQ20", 20), ("EID25", 25)];

/// Look up the discount percentage for a coupon code.
///
/// Codes are matched case-insensitively, ignoring surrounding whitespace.
#[must_use]
pub fn discount_for(code: &str) -> Option<u32> {
    let code = code.trim();
    COUPONS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, percentage)| *percentage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_code() {
        assert_eq!(discount_for("SOUQ20"), Some(20));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(discount_for("  souq20 "), Some(20));
        assert_eq!(discount_for("Welcome10"), Some(10));
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(discount_for("HALFOFF"), None);
        assert_eq!(discount_for(""), None);
    }
}
