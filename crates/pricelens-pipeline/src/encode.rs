//! URL encoding and resolution against a site's base origin.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything outside `[A-Za-z0-9_.~-]` is percent-encoded.
const QUOTE_PLUS: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

/// Like [`QUOTE_PLUS`] but structural `/` survives, so an already-relative
/// path keeps its segment boundaries instead of being double-encoded.
const PATH: &AsciiSet = &QUOTE_PLUS.remove(b'/');

/// Percent-encodes a string for use as a single URL path segment, with
/// spaces as `+`. A literal `+` in the input becomes `%2B`, so the mapping
/// stays unambiguous.
#[must_use]
pub fn quote_plus(s: &str) -> String {
    utf8_percent_encode(s, QUOTE_PLUS)
        .to_string()
        .replace("%20", "+")
}

/// Percent-encodes a relative URL path, preserving `/` as structural.
#[must_use]
pub fn encode_path(s: &str) -> String {
    utf8_percent_encode(s, PATH).to_string().replace("%20", "+")
}

/// Resolves a relative path against a site base origin, tolerating a
/// trailing slash on the base and a missing leading slash on the path.
#[must_use]
pub fn resolve(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_plus_leaves_safe_characters_alone() {
        assert_eq!(quote_plus("samsung"), "samsung");
        assert_eq!(quote_plus("a-b_c.d~e"), "a-b_c.d~e");
    }

    #[test]
    fn quote_plus_spaces_become_plus() {
        assert_eq!(quote_plus("galaxy a14"), "galaxy+a14");
    }

    #[test]
    fn quote_plus_encodes_reserved_characters() {
        assert_eq!(quote_plus("a/b"), "a%2Fb");
        assert_eq!(quote_plus("50% off!"), "50%25+off%21");
    }

    #[test]
    fn quote_plus_literal_plus_is_unambiguous() {
        assert_eq!(quote_plus("a+b c"), "a%2Bb+c");
    }

    #[test]
    fn encode_path_preserves_structural_slashes() {
        assert_eq!(encode_path("/p/12345.html"), "/p/12345.html");
    }

    #[test]
    fn encode_path_encodes_spaces_and_reserved() {
        assert_eq!(encode_path("/p/red mouse?x=1"), "/p/red+mouse%3Fx%3D1");
    }

    #[test]
    fn encode_path_does_not_double_encode_safe_input() {
        let once = encode_path("/p/12345.html");
        assert_eq!(encode_path(&once), once);
    }

    #[test]
    fn resolve_joins_with_exactly_one_slash() {
        assert_eq!(
            resolve("https://www.example.com", "/p/1.html"),
            "https://www.example.com/p/1.html"
        );
        assert_eq!(
            resolve("https://www.example.com/", "/p/1.html"),
            "https://www.example.com/p/1.html"
        );
        assert_eq!(
            resolve("https://www.example.com", "p/1.html"),
            "https://www.example.com/p/1.html"
        );
    }
}
