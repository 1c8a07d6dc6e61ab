//! Best-effort parsing of display-formatted price strings.
//!
//! The catalog serves prices as display strings (locale-formatted digits with
//! a currency suffix, e.g. `"1,500 ل.س"`). Totals are computed by extracting
//! the numeric magnitude from those strings rather than from a structured
//! amount field.

/// Extract the numeric magnitude from a display-formatted price string.
///
/// Strips every character that is not an ASCII digit or a decimal point,
/// then parses the longest valid numeric prefix of the remainder as a
/// base-10 float. Prefix parsing matters because the currency marker
/// `"ل.س"` contributes a stray dot of its own: `"19.99 ل.س"` reduces to
/// `"19.99."` and must still read as `19.99`.
///
/// Returns `None` when the string contains no digits at all.
///
/// This is a display-to-number pass-through, not a locale-aware parser.
/// Known limitation: a string using `.` as a thousands separator and `,` as
/// the decimal mark (`"1.500,25"`) is mis-parsed. Accepted for the formats
/// the catalog actually emits.
#[must_use]
pub fn parse_display_price(display: &str) -> Option<f64> {
    let cleaned: String = display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if !cleaned.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    // Longest prefix with at most one decimal point.
    let mut seen_dot = false;
    let numeric_len = cleaned
        .bytes()
        .take_while(|&b| {
            if b == b'.' {
                if seen_dot {
                    return false;
                }
                seen_dot = true;
            }
            true
        })
        .count();

    cleaned.get(..numeric_len)?.parse::<f64>().ok()
}

/// [`parse_display_price`], with parse failures coalesced to zero.
///
/// Summation policy: an unparseable price contributes nothing to a total
/// instead of poisoning it.
#[must_use]
pub fn price_or_zero(display: &str) -> f64 {
    parse_display_price(display).unwrap_or(0.0)
}
