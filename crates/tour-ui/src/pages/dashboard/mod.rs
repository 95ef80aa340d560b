pub mod articles;
pub mod banners;
pub mod overview;
pub mod tours;

/// Trimmed text, or `None` when the field was left blank.
#[cfg_attr(not(feature = "ssr"), allow(dead_code))]
pub(crate) fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_become_none() {
        assert_eq!(non_empty("   ".into()), None);
        assert_eq!(non_empty(String::new()), None);
        assert_eq!(non_empty(" /img/a.jpg ".into()).as_deref(), Some("/img/a.jpg"));
    }
}
