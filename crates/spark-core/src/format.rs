// File: crates/spark-core/src/format.rs
// Summary: Locale-aware number formatting (grouping + fixed rounding) for
// tooltips and the last-value label.

/// Grouping and decimal separators for a locale tag.
/// Only the language prefix matters here; unknown tags read as en-US.
fn separators(locale: &str) -> (char, char) {
    let lang = locale
        .split(['-', '_'])
        .next()
        .unwrap_or("en")
        .to_ascii_lowercase();
    match lang.as_str() {
        "de" | "es" | "it" | "pt" | "nl" | "tr" | "id" | "da" => ('.', ','),
        "fr" | "ru" | "sv" | "nb" | "no" | "fi" | "cs" | "pl" | "uk" => ('\u{a0}', ','),
        "ch" => ('\'', '.'),
        _ => (',', '.'),
    }
}

/// Format `value` with thousands grouping and exactly `rounding` fraction
/// digits, per the locale's separators.
pub fn format_number(value: f64, locale: &str, rounding: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let (group_sep, decimal_sep) = separators(locale);
    let fixed = format!("{:.*}", rounding, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    let digits = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(group_sep);
        }
        grouped.push(c);
    }
    if let Some(frac) = frac_part {
        grouped.push(decimal_sep);
        grouped.push_str(frac);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_and_rounds_en() {
        assert_eq!(format_number(1234.5, "en-US", 1), "1,234.5");
        assert_eq!(format_number(1234.56, "en-US", 0), "1,235");
        assert_eq!(format_number(999.0, "en-US", 0), "999");
        assert_eq!(format_number(1_000_000.0, "en-US", 0), "1,000,000");
    }

    #[test]
    fn locale_separators() {
        assert_eq!(format_number(1234.5, "de-DE", 1), "1.234,5");
        assert_eq!(format_number(1234.5, "fr-FR", 1), "1\u{a0}234,5");
    }

    #[test]
    fn negative_values_keep_sign_outside_grouping() {
        assert_eq!(format_number(-1234.5, "en-US", 2), "-1,234.50");
    }

    #[test]
    fn unknown_locale_reads_as_en() {
        assert_eq!(format_number(1234.0, "xx-XX", 0), "1,234");
    }
}
