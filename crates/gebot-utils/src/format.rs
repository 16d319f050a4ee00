//! Number formatting for chat replies
//!
//! Mirrors the en-US grouping style: comma thousands separators and at most
//! three fraction digits with trailing zeros dropped.

/// Format an integer with thousands separators, e.g. `1234567` -> `1,234,567`.
pub fn format_count(value: i64) -> String {
    let grouped = group_digits(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Format a decimal amount with thousands separators and up to three
/// fraction digits, e.g. `12345.5` -> `12,345.5`.
///
/// Non-finite values render as `N/A`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }

    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = group_digits(int_part);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }

    // -0.0001 rounds to "0", which must not keep its sign
    if value < 0.0 && out != "0" {
        format!("-{out}")
    } else {
        out
    }
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(13_000_000), "13,000,000");
        assert_eq!(format_count(-45_210), "-45,210");
        assert_eq!(format_count(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(7_000.0), "7,000");
        assert_eq!(format_amount(1_234.5), "1,234.5");
        assert_eq!(format_amount(1_234.56789), "1,234.568");
        assert_eq!(format_amount(-10.25), "-10.25");
        assert_eq!(format_amount(-0.0001), "0");
        assert_eq!(format_amount(f64::NAN), "N/A");
    }
}
