pub mod orders;
pub mod products;

/// Trim a textual field and drop it entirely when blank, so an empty string
/// in a patch never overwrites a stored value.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
