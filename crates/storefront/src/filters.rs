//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Formats a numeric amount as a display price, e.g. `"50,800 ل.س"`.
///
/// Usage in templates: `{{ cart.subtotal|money }}`
#[askama::filter_fn]
pub fn money(amount: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let value = amount.to_string().parse::<f64>().unwrap_or(0.0);
    Ok(format_amount(value))
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Display amounts are far below the precision cliff.
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let fraction = cents % 100;

    let magnitude = if fraction == 0 {
        whole
    } else {
        format!("{whole}.{fraction:02}")
    };
    if negative {
        format!("-{magnitude} ل.س")
    } else {
        format!("{magnitude} ل.س")
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
