use rust_decimal::Decimal;

/// Formats a count with thousands separators, e.g. `12,345`.
pub fn format_integer(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Formats a monetary value as dollars with two decimals, e.g. `$1,234.50`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{sign}${}.{fraction}", group_thousands(integer))
}

/// Formats a ratio in `[0, 1]` as a percentage with two decimals, e.g. `33.33%`.
pub fn format_percentage(ratio: f64) -> String {
    let ratio = if ratio.is_finite() { ratio } else { 0.0 };

    format!("{:.2}%", ratio * 100.0)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}
