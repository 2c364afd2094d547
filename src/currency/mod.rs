//! Display conversion for integer minor-unit amounts.

use serde::{Deserialize, Serialize};

/// Digit grouping and decimal separator pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NumberFormat {
    /// `1,234.56`
    #[default]
    CommaDot,
    /// `1.234,56`
    DotComma,
    /// `1 234,56`
    SpaceComma,
    /// `1'234.56`
    ApostropheDot,
}

impl NumberFormat {
    pub fn grouping_separator(self) -> char {
        match self {
            NumberFormat::CommaDot => ',',
            NumberFormat::DotComma => '.',
            NumberFormat::SpaceComma => ' ',
            NumberFormat::ApostropheDot => '\'',
        }
    }

    pub fn decimal_separator(self) -> char {
        match self {
            NumberFormat::CommaDot | NumberFormat::ApostropheDot => '.',
            NumberFormat::DotComma | NumberFormat::SpaceComma => ',',
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FormatOptions {
    #[serde(default)]
    pub number_format: NumberFormat,
    #[serde(default)]
    pub hide_fraction: bool,
}

/// Renders minor units (cents) as a display string, e.g. `-2777` as `-27.77`.
pub fn integer_to_currency(amount: i64, options: &FormatOptions) -> String {
    let format = options.number_format;
    let magnitude = amount.unsigned_abs();
    let (body, is_zero) = if options.hide_fraction {
        let whole = (magnitude + 50) / 100;
        (
            group_digits(&whole.to_string(), format.grouping_separator()),
            whole == 0,
        )
    } else {
        let whole = magnitude / 100;
        let cents = magnitude % 100;
        (
            format!(
                "{}{}{:02}",
                group_digits(&whole.to_string(), format.grouping_separator()),
                format.decimal_separator(),
                cents
            ),
            magnitude == 0,
        )
    };
    if amount < 0 && !is_zero {
        format!("-{}", body)
    } else {
        body
    }
}

/// Parses user input such as `10.00`, `-1,234.5` or `17` into minor units.
///
/// Digits beyond the second decimal place are rounded half away from zero.
pub fn currency_to_integer(input: &str, format: NumberFormat) -> Option<i64> {
    let trimmed = input.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let grouping = format.grouping_separator();
    let cleaned: String = rest
        .chars()
        .filter(|ch| *ch != grouping && !ch.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let (whole_part, fraction_part) = match cleaned.split_once(format.decimal_separator()) {
        Some((whole, fraction)) => (whole, fraction),
        None => (cleaned.as_str(), ""),
    };
    let all_digits = |part: &str| part.chars().all(|ch| ch.is_ascii_digit());
    if !all_digits(whole_part) || !all_digits(fraction_part) {
        return None;
    }
    if whole_part.is_empty() && fraction_part.is_empty() {
        return None;
    }

    let whole: i64 = if whole_part.is_empty() {
        0
    } else {
        whole_part.parse().ok()?
    };
    let digits: Vec<i64> = fraction_part
        .chars()
        .filter_map(|ch| ch.to_digit(10).map(i64::from))
        .collect();
    let mut cents = digits.first().copied().unwrap_or(0) * 10 + digits.get(1).copied().unwrap_or(0);
    if digits.get(2).copied().unwrap_or(0) >= 5 {
        cents += 1;
    }

    let value = whole.checked_mul(100)?.checked_add(cents)?;
    Some(if negative { -value } else { value })
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}
