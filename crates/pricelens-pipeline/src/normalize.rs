//! Reduction of raw multi-valued fields to canonical values.
//!
//! Every rule maps an ordered sequence of raw fragments to either one scalar,
//! the unchanged sequence (multi-valued fields), or absence. Empty strings
//! normalize to absent, never to an empty scalar field.

use pricelens_core::FieldValue;

use crate::rules::FieldRule;

/// Applies a field's rule to its raw extracted values.
///
/// Returns `None` when the field is absent after reduction: no values were
/// collected, the winning value was empty, or an identity field gathered
/// nothing.
#[must_use]
pub fn normalize_field(rule: FieldRule, values: &[String]) -> Option<FieldValue> {
    match rule {
        FieldRule::TakeFirst => take_first(values).map(|v| FieldValue::Scalar(v.to_owned())),
        FieldRule::TakeFirstTitleCase => {
            take_first(values).map(|v| FieldValue::Scalar(title_case(v)))
        }
        FieldRule::Identity => {
            if values.is_empty() {
                None
            } else {
                Some(FieldValue::Many(values.to_vec()))
            }
        }
    }
}

// First non-empty value wins; empty fragments are skipped, not reduced to.
fn take_first(values: &[String]) -> Option<&str> {
    values.iter().map(String::as_str).find(|v| !v.is_empty())
}

/// Title-cases a string: the first letter of each whitespace-delimited word
/// uppercased, the remainder lowercased. Tolerates mixed-case and all-caps
/// input uniformly, and is idempotent.
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            // Uppercase only when the mapping stays a single char; expanding
            // mappings (e.g. ß → SS) would break idempotence.
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => out.push(u),
                _ => out.push(c),
            }
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}
