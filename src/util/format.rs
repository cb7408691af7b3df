//! Czech-style number, currency and date formatting.

use time::{macros::format_description, OffsetDateTime};

const CURRENCY_SUFFIX: &str = "Kč";

/// Whole crowns with space-grouped thousands, e.g. `4 725 000 Kč`.
pub fn format_currency(amount: f64) -> String {
    format!("{} {CURRENCY_SUFFIX}", group_thousands(amount.round()))
}

/// Number with at most two decimals and a decimal comma, e.g. `1 234,5`.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let whole = rounded.trunc();
    let fraction = ((rounded - whole).abs() * 100.0).round() as u64;
    let mut out = group_thousands(whole);
    if rounded < 0.0 && whole == 0.0 {
        out.insert(0, '-');
    }
    if fraction > 0 {
        let digits = format!("{fraction:02}");
        out.push(',');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

pub fn format_area(value: f64) -> String {
    format!("{} m²", format_number(value))
}

/// Confidence in `0..=1` as a whole percentage.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.0}%", (fraction * 100.0).round())
}

pub fn format_date(timestamp: OffsetDateTime) -> String {
    timestamp
        .format(format_description!("[day].[month].[year]"))
        .unwrap_or_default()
}

pub fn format_iso_date(timestamp: OffsetDateTime) -> String {
    timestamp
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let negative = value < 0.0;
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if negative && grouped != "0" {
        grouped.insert(0, '-');
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(4_725_000.0), "4 725 000 Kč");
        assert_eq!(format_currency(999.6), "1 000 Kč");
        assert_eq!(format_currency(0.0), "0 Kč");
        assert_eq!(format_currency(-12_345.0), "-12 345 Kč");
        assert_eq!(format_currency(f64::NAN), "0 Kč");
    }

    #[test]
    fn numbers_use_decimal_comma() {
        assert_eq!(format_number(1_234.5), "1 234,5");
        assert_eq!(format_number(85.25), "85,25");
        assert_eq!(format_number(120.0), "120");
        assert_eq!(format_area(64.5), "64,5 m²");
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(format_percent(0.85), "85%");
        assert_eq!(format_percent(0.766_666), "77%");
    }

    #[test]
    fn dates() {
        let timestamp = datetime!(2024-03-07 23:59 UTC);
        assert_eq!(format_date(timestamp), "07.03.2024");
        assert_eq!(format_iso_date(timestamp), "2024-03-07");
    }
}
