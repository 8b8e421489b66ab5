use once_cell::sync::Lazy;
use regex::Regex;

// Currency symbol either side of the digits; "123.45 $" and "$123.45" both count
static PRICE_SNIPPET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([£$€¥₹₽])\s*(\d(?:[\d.,]*\d)?)|(\d(?:[\d.,]*\d)?)\s*([£$€¥₹₽])")
        .expect("Invalid price snippet regex")
});

/// Find the first currency-tagged amount in a text blob and return it in
/// symbol-first form with internal whitespace dropped ("123.45 $" -> "$123.45").
pub fn find_price_snippet(text: &str) -> Option<String> {
    let caps = PRICE_SNIPPET_RE.captures(text)?;

    if let (Some(symbol), Some(digits)) = (caps.get(1), caps.get(2)) {
        return Some(format!("{}{}", symbol.as_str(), digits.as_str()));
    }
    if let (Some(digits), Some(symbol)) = (caps.get(3), caps.get(4)) {
        return Some(format!("{}{}", symbol.as_str(), digits.as_str()));
    }
    None
}

/// Normalize a raw price string to a numeric amount.
///
/// Everything that is not a digit, comma, or period is stripped; commas are
/// then dropped as US/UK thousands separators and the remainder is parsed as
/// a decimal. European-style "1.234,56" is knowingly mis-parsed by this rule.
pub fn normalize_price(raw: &str) -> Option<f64> {
    let filtered: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let cleaned = filtered.replace(',', "");
    if cleaned.is_empty() || !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
