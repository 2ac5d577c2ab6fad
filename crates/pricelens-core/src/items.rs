//! Item types flowing through the pipeline.
//!
//! A [`RawRecord`] is the unreduced, multi-valued output of page extraction;
//! a [`FinalizedItem`] is the normalized, derived-field-complete record handed
//! to the ingestion catalog. Both are plain value types with no identity
//! beyond the fields they carry.

use std::collections::{BTreeMap, HashMap};

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A required field was never populated on an item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required field: {0}")]
pub struct MissingField(pub String);

/// Unreduced field data collected during page extraction.
///
/// A field may be pushed zero, one, or many times; extraction order is
/// preserved both within a field's values and across fields (first-seen field
/// order), since "take first" reductions and the assembler's processing order
/// depend on it. The order is carried explicitly rather than borrowed from
/// the backing container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    order: Vec<String>,
    values: HashMap<String, Vec<String>>,
}

impl RawRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one extracted value to a field, registering the field in the
    /// collection order on first sight.
    pub fn push(&mut self, field: &str, value: impl Into<String>) {
        if !self.values.contains_key(field) {
            self.order.push(field.to_owned());
        }
        self.values
            .entry(field.to_owned())
            .or_default()
            .push(value.into());
    }

    /// Appends several extracted values to a field at once.
    pub fn extend<I, S>(&mut self, field: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.push(field, value);
        }
    }

    /// Field names in the order they were first collected.
    #[must_use]
    pub fn field_order(&self) -> &[String] {
        &self.order
    }

    /// Raw values collected for a field, empty if the field was never pushed.
    #[must_use]
    pub fn values(&self, field: &str) -> &[String] {
        self.values.get(field).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Raw JSON shape for a single field: either one fragment or a list.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for RawRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RawRecordVisitor;

        impl<'de> Visitor<'de> for RawRecordVisitor {
            type Value = RawRecord;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of field name to string or list of strings")
            }

            // Visits entries in document order so the collection order of the
            // record matches the order fields appear in the JSON.
            fn visit_map<A>(self, mut map: A) -> Result<RawRecord, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut record = RawRecord::new();
                while let Some((field, value)) = map.next_entry::<String, OneOrMany>()? {
                    match value {
                        OneOrMany::One(v) => record.push(&field, v),
                        OneOrMany::Many(vs) => record.extend(&field, vs),
                    }
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RawRecordVisitor)
    }
}

impl Serialize for RawRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for field in &self.order {
            map.serialize_entry(field, &self.values[field])?;
        }
        map.end()
    }
}

/// A normalized field value: a single canonical string, or the full ordered
/// sequence for fields kept multi-valued (e.g. collected reviews).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    Many(Vec<String>),
}

impl FieldValue {
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            FieldValue::Many(_) => None,
        }
    }

    #[must_use]
    pub fn as_many(&self) -> Option<&[String]> {
        match self {
            FieldValue::Scalar(_) => None,
            FieldValue::Many(vs) => Some(vs),
        }
    }
}

/// Fully normalized, derived-field-complete record ready for ingestion.
///
/// A pure function of the raw record and the rule table; created per scraped
/// entity and handed by value to the catalog with no further mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinalizedItem {
    fields: BTreeMap<String, FieldValue>,
}

impl FinalizedItem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, value: FieldValue) {
        self.fields.insert(field.to_owned(), value);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// The scalar value of a field, if present and scalar.
    #[must_use]
    pub fn scalar(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(FieldValue::as_scalar)
    }

    /// The scalar value of a required field.
    ///
    /// # Errors
    ///
    /// Returns [`MissingField`] naming the field if it is absent or not
    /// scalar.
    pub fn require_scalar(&self, field: &str) -> Result<&str, MissingField> {
        self.scalar(field)
            .ok_or_else(|| MissingField(field.to_owned()))
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_first_seen_field_order() {
        let mut record = RawRecord::new();
        record.push("name", "wireless mouse");
        record.push("brand", "logitech");
        record.push("name", "wireless mouse v2");
        assert_eq!(record.field_order(), &["name", "brand"]);
    }

    #[test]
    fn push_preserves_value_order_within_a_field() {
        let mut record = RawRecord::new();
        record.push("reviews", "great");
        record.push("reviews", "terrible");
        assert_eq!(record.values("reviews"), &["great", "terrible"]);
    }

    #[test]
    fn values_of_unknown_field_is_empty() {
        let record = RawRecord::new();
        assert!(record.values("brand").is_empty());
    }

    #[test]
    fn extend_registers_field_once() {
        let mut record = RawRecord::new();
        record.extend("reviews", ["a", "b", "c"]);
        assert_eq!(record.field_order(), &["reviews"]);
        assert_eq!(record.values("reviews").len(), 3);
    }

    #[test]
    fn deserialize_keeps_document_order() {
        let json = r#"{"brand": ["logitech"], "name": ["wireless mouse"], "price": "99.99"}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.field_order(), &["brand", "name", "price"]);
        assert_eq!(record.values("price"), &["99.99"]);
    }

    #[test]
    fn deserialize_accepts_bare_string_as_single_value() {
        let record: RawRecord = serde_json::from_str(r#"{"store": "jumia"}"#).unwrap();
        assert_eq!(record.values("store"), &["jumia"]);
    }

    #[test]
    fn serde_roundtrip_record() {
        let mut record = RawRecord::new();
        record.push("name", "mouse");
        record.extend("reviews", ["ok", "bad"]);
        let json = serde_json::to_string(&record).expect("serialization failed");
        let decoded: RawRecord = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(decoded, record);
    }

    #[test]
    fn require_scalar_present() {
        let mut item = FinalizedItem::new();
        item.insert("brand", FieldValue::Scalar("Logitech".to_owned()));
        assert_eq!(item.require_scalar("brand").unwrap(), "Logitech");
    }

    #[test]
    fn require_scalar_absent_names_the_field() {
        let item = FinalizedItem::new();
        let err = item.require_scalar("brand").unwrap_err();
        assert_eq!(err, MissingField("brand".to_owned()));
        assert_eq!(err.to_string(), "missing required field: brand");
    }

    #[test]
    fn require_scalar_rejects_multi_valued_field() {
        let mut item = FinalizedItem::new();
        item.insert("reviews", FieldValue::Many(vec!["great".to_owned()]));
        assert!(item.require_scalar("reviews").is_err());
    }

    #[test]
    fn field_value_accessors() {
        let scalar = FieldValue::Scalar("x".to_owned());
        let many = FieldValue::Many(vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(scalar.as_scalar(), Some("x"));
        assert!(scalar.as_many().is_none());
        assert_eq!(many.as_many().map(<[String]>::len), Some(2));
        assert!(many.as_scalar().is_none());
    }

    #[test]
    fn finalized_item_serializes_as_plain_map() {
        let mut item = FinalizedItem::new();
        item.insert("name", FieldValue::Scalar("Wireless Mouse".to_owned()));
        item.insert(
            "reviews",
            FieldValue::Many(vec!["great".to_owned(), "ok".to_owned()]),
        );
        let json = serde_json::to_value(&item).expect("serialization failed");
        assert_eq!(json["name"], "Wireless Mouse");
        assert_eq!(json["reviews"][1], "ok");
    }
}
