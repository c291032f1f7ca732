//! Best-effort numeric parsing for season and episode numbers.

/// Parse a string that consists only of ASCII digits.
///
/// Signs, whitespace, decimals and overflowing values all yield `None`.
pub fn parse_integer(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Parse a season number. Zero is treated as unresolved.
pub fn parse_season(value: &str) -> Option<u16> {
    parse_integer(value)
        .and_then(|n| u16::try_from(n).ok())
        .filter(|&n| n > 0)
}

/// Strip leading zeros from a (possibly fractional) number, e.g. `"02.5"` -> `"2.5"`.
///
/// Values that are not plain numbers are returned unchanged.
pub fn normalize_number(value: &str) -> String {
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (value, None),
    };

    if parse_integer(whole).is_none() || fraction.is_some_and(|f| parse_integer(f).is_none()) {
        return value.to_string();
    }

    let trimmed = whole.trim_start_matches('0');
    let whole = if trimmed.is_empty() { "0" } else { trimmed };

    match fraction {
        Some(fraction) => format!("{}.{}", whole, fraction),
        None => whole.to_string(),
    }
}
