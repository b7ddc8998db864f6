//! Number and date formatting for conversion results.

use chrono::NaiveDate;

const SIGNIFICANT_DIGITS: i32 = 6;

/// General numeric formatting: six significant digits, trailing zeros removed,
/// scientific notation for exponents below -4 or at least 6.
pub fn format_general(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Rounding can bump the exponent (999999.5 -> 1e6), so read it after formatting
    let scientific = format!("{:.*e}", (SIGNIFICANT_DIGITS - 1) as usize, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.abs()
        )
    } else {
        let decimals = (SIGNIFICANT_DIGITS - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Fixed-point formatting with comma thousands separators
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let digits = integer.len();
    let mut grouped = String::with_capacity(digits + digits / 3 + decimals + 2);
    if value.is_sign_negative() {
        grouped.push('-');
    }
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    grouped
}

/// `2024-01-15` -> `January 15, 2024`
pub fn format_long_date(date: &str) -> Result<String, chrono::ParseError> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")?;
    Ok(parsed.format("%B %d, %Y").to_string())
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_general() {
        assert_eq!(format_general(100.0), "100");
        assert_eq!(format_general(2.5), "2.5");
        assert_eq!(format_general(0.1), "0.1");
        assert_eq!(format_general(0.0001), "0.0001");
        assert_eq!(format_general(123456.0), "123456");
        assert_eq!(format_general(1234567.0), "1.23457e+06");
        assert_eq!(format_general(0.00001234), "1.234e-05");
        assert_eq!(format_general(-42.125), "-42.125");
        assert_eq!(format_general(0.0), "0");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(3500.0, 2), "3,500.00");
        assert_eq!(format_grouped(12.0, 2), "12.00");
        assert_eq!(format_grouped(999.999, 2), "1,000.00");
        assert_eq!(format_grouped(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_grouped(-1234.5, 2), "-1,234.50");
        assert_eq!(format_grouped(35.0, 4), "35.0000");
        assert_eq!(format_grouped(1000000.0, 0), "1,000,000");
    }

    #[test]
    fn test_format_long_date() {
        assert_eq!(format_long_date("2024-01-15").unwrap(), "January 15, 2024");
        assert_eq!(format_long_date("2023-11-05").unwrap(), "November 05, 2023");
        assert!(format_long_date("15/01/2024").is_err());
    }
}
