//! Splitting the combined `"<main>/<sub>"` category path.

use crate::error::PipelineError;

/// Splits a combined category path into its `(main, sub)` pair at the first
/// occurrence of the separator.
///
/// # Errors
///
/// Returns [`PipelineError::MalformedCategoryPath`] when the separator is
/// missing, or when either side of the split is empty.
pub fn split_category_path(
    value: &str,
    separator: char,
) -> Result<(String, String), PipelineError> {
    let malformed = || PipelineError::MalformedCategoryPath {
        value: value.to_owned(),
        separator,
    };

    let (main, sub) = value.split_once(separator).ok_or_else(malformed)?;
    if main.is_empty() || sub.is_empty() {
        return Err(malformed());
    }

    Ok((main.to_owned(), sub.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_main_and_sub() {
        let (main, sub) = split_category_path("electronics/accessories", '/').unwrap();
        assert_eq!(main, "electronics");
        assert_eq!(sub, "accessories");
    }

    #[test]
    fn splits_at_the_first_separator_only() {
        let (main, sub) = split_category_path("home/kitchen/utensils", '/').unwrap();
        assert_eq!(main, "home");
        assert_eq!(sub, "kitchen/utensils");
    }

    #[test]
    fn respects_custom_separator() {
        let (main, sub) = split_category_path("electronics>phones", '>').unwrap();
        assert_eq!(main, "electronics");
        assert_eq!(sub, "phones");
    }

    #[test]
    fn missing_separator_is_malformed() {
        let err = split_category_path("electronics", '/').unwrap_err();
        assert!(
            matches!(
                err,
                PipelineError::MalformedCategoryPath { ref value, separator: '/' }
                    if value == "electronics"
            ),
            "expected MalformedCategoryPath, got: {err:?}"
        );
    }

    #[test]
    fn empty_main_is_malformed() {
        assert!(split_category_path("/accessories", '/').is_err());
    }

    #[test]
    fn empty_sub_is_malformed() {
        assert!(split_category_path("electronics/", '/').is_err());
    }

    #[test]
    fn error_message_names_value_and_separator() {
        let err = split_category_path("electronics", '/').unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("malformed category path"), "got: {msg}");
        assert!(msg.contains("electronics"), "got: {msg}");
    }
}
