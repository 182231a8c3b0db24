//! Human-facing number formatting shared by the report and the CLI.

/// Groups the integer part of `value` with commas: `34000` → `34,000`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-dollar amount with separators: `120000.4` → `$120,000`.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", format_thousands(rounded.abs() as u64))
}

/// One decimal place: `41.25` → `41.2`.
pub fn format_decimal(value: f64) -> String {
    format!("{value:.1}")
}

/// Average age scorecard text: `41.2 years`.
pub fn format_age(value: f64) -> String {
    format!("{} years", format_decimal(value))
}

/// Percentage with one decimal place from a ratio: `0.7` → `70.0%`.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(34_000), "34,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(120_000.0), "$120,000");
        assert_eq!(format_currency(85_000.4), "$85,000");
        assert_eq!(format_currency(999.5), "$1,000");
        assert_eq!(format_currency(-1500.0), "-$1,500");
    }

    #[test]
    fn test_age_and_percent() {
        assert_eq!(format_age(41.2), "41.2 years");
        assert_eq!(format_decimal(36.0), "36.0");
        assert_eq!(format_percent(0.7), "70.0%");
        assert_eq!(format_percent(0.0), "0.0%");
    }
}
