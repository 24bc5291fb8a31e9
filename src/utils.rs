/// Make a trimmed copy of the provided string, or `None` if it is blank.
pub(crate) fn take_if_not_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
