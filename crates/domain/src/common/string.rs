//! String conversion utilities.

/// Sentinel shown when a directory entry carries no capital or currency.
pub const UNKNOWN: &str = "Unknown";

/// Converts a blank string to `None`, otherwise returns the trimmed value.
///
/// # Examples
///
/// ```
/// use countrylist_domain::common::non_blank;
///
/// assert_eq!(non_blank(" Paris "), Some("Paris"));
/// assert_eq!(non_blank("   "), None);
/// ```
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Returns the first non-blank value, or [`UNKNOWN`].
///
/// # Examples
///
/// ```
/// use countrylist_domain::common::first_or_unknown;
///
/// assert_eq!(first_or_unknown(["Tokyo"]), "Tokyo");
/// assert_eq!(first_or_unknown(Vec::<String>::new()), "Unknown");
/// ```
pub fn first_or_unknown<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .next()
        .as_ref()
        .and_then(|v| non_blank(v.as_ref()).map(str::to_string))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_first_entry_is_considered() {
        assert_eq!(first_or_unknown(["", "Berlin"]), UNKNOWN);
        assert_eq!(first_or_unknown(["Pretoria", "Cape Town"]), "Pretoria");
    }
}
