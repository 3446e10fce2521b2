//! Display formatting. Applied to computed values at output time only.

use crate::config::DisplaySettings;

/// Format an amount with grouped thousands and the configured currency
/// symbol, e.g. `1 250 000.00 ₽`.
pub fn format_money(value: f64, display: &DisplaySettings) -> String {
    let amount = format_amount(value, display.decimals, &display.thousands_separator);
    if display.symbol_suffix {
        format!("{amount} {}", display.currency_symbol)
    } else {
        format!("{}{amount}", display.currency_symbol)
    }
}

/// Round to `decimals` places and group the integer part.
pub fn format_amount(value: f64, decimals: usize, separator: &str) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (whole, frac) = match fixed.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = group_digits(whole, separator);
    if let Some(frac) = frac {
        grouped.push('.');
        grouped.push_str(frac);
    }

    // Avoid "-0.00" for tiny negatives that round to zero
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    if value.is_sign_negative() && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}

fn group_digits(digits: &str, separator: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }

    out
}

/// Percent label without trailing zeros: 20 -> "20%", 7.5 -> "7.5%".
pub fn format_percent(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text}%")
}
