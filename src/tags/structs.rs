use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static TEXT_RATIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*/\s*(-?\d+(?:\.\d+)?)\s*$").expect("valid regex")
});

/// A single tag value as handed over by a metadata library.
///
/// Libraries disagree on how they type things: the same `FNumber` may arrive as a
/// rational, a float or a string like `"18/10"`. Every accessor here is lenient and
/// returns `None` instead of failing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum RawValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    /// Numerator and denominator.
    Rational(i64, i64),
    List(Vec<RawValue>),
}

impl RawValue {
    /// Collapses a decoded value list: nothing for an empty list, the element itself
    /// for a single one, a `List` otherwise.
    pub fn from_items(mut items: Vec<RawValue>) -> Option<Self> {
        match items.len() {
            0 => None,
            1 => items.pop(),
            _ => Some(Self::List(items)),
        }
    }

    /// The first element of a multi-valued tag, or the value itself.
    pub fn first(&self) -> &RawValue {
        match self {
            Self::List(items) => items.first().unwrap_or(self),
            other => other,
        }
    }

    pub fn items(&self) -> &[RawValue] {
        match self {
            Self::List(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// Numeric view of the value. Zero denominators, non-finite numbers, byte
    /// strings and multi-element lists all yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Integer(i) => *i as f64,
            Self::Float(f) => *f,
            Self::Rational(num, den) => {
                if *den == 0 {
                    return None;
                }
                *num as f64 / *den as f64
            }
            Self::Text(s) => parse_numeric_text(s)?,
            Self::List(items) if items.len() == 1 => items[0].as_f64()?,
            Self::List(_) | Self::Bytes(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Text view of the value. Byte strings go through [`decode_text`], so this
    /// never fails on bad encodings. Trailing NULs and surrounding whitespace are
    /// trimmed, and blank text counts as absent.
    pub fn as_text(&self) -> Option<String> {
        let text = match self {
            Self::Text(s) => s.clone(),
            Self::Bytes(bytes) => decode_text(bytes),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Rational(num, den) => format!("{num}/{den}"),
            Self::List(items) => return items.first().and_then(RawValue::as_text),
        };
        let trimmed = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }

    /// Converts one value of exiftool's JSON output.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::Object(_) => None,
            Value::Bool(b) => Some(Self::Integer(i64::from(*b))),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Float)),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(items) => {
                Self::from_items(items.iter().filter_map(Self::from_json).collect())
            }
        }
    }
}

/// Decodes a byte string that is supposed to hold text.
///
/// Strict UTF-8 first; anything else is decoded lossily with replacement
/// characters.
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_owned(),
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn parse_numeric_text(s: &str) -> Option<f64> {
    if let Some(caps) = TEXT_RATIONAL.captures(s) {
        let num: f64 = caps.get(1)?.as_str().parse().ok()?;
        let den: f64 = caps.get(2)?.as_str().parse().ok()?;
        return (den != 0.0).then(|| num / den);
    }
    s.trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .parse()
        .ok()
}

/// The raw tag mapping of one file, keyed by tag name (`"FNumber"`, `"GPSLatitude"`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawTags(BTreeMap<String, RawValue>);

impl RawTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: RawValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Builds the mapping from one file's object in exiftool's JSON output.
    pub fn from_json(json: &Value) -> Self {
        let Some(object) = json.as_object() else {
            return Self::default();
        };
        object
            .iter()
            .filter_map(|(name, value)| RawValue::from_json(value).map(|v| (name.clone(), v)))
            .collect()
    }
}

impl FromIterator<(String, RawValue)> for RawTags {
    fn from_iter<T: IntoIterator<Item = (String, RawValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[(&str, RawValue); N]> for RawTags {
    fn from(entries: [(&str, RawValue); N]) -> Self {
        entries
            .into_iter()
            .map(|(name, value)| (name.to_owned(), value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rational_with_zero_denominator_is_absent() {
        assert_eq!(RawValue::Rational(28, 10).as_f64(), Some(2.8));
        assert_eq!(RawValue::Rational(5, 0).as_f64(), None);
    }

    #[test]
    fn test_numeric_text_forms() {
        assert_eq!(RawValue::Text("1/250".into()).as_f64(), Some(0.004));
        assert_eq!(RawValue::Text(" 35.5 ".into()).as_f64(), Some(35.5));
        assert_eq!(RawValue::Text("1/0".into()).as_f64(), None);
        assert_eq!(RawValue::Text("fast".into()).as_f64(), None);
        assert_eq!(RawValue::Bytes(b"50".to_vec()).as_f64(), None);
    }

    #[test]
    fn test_multi_valued_lists() {
        let list = RawValue::List(vec![RawValue::Integer(200), RawValue::Integer(400)]);
        assert_eq!(list.as_f64(), None, "ambiguous without picking an element");
        assert_eq!(list.first().as_f64(), Some(200.0));
        assert_eq!(list.items().len(), 2);
        assert_eq!(RawValue::Integer(7).items(), &[RawValue::Integer(7)]);
    }

    #[test]
    fn test_invalid_utf8_decodes_with_replacement() {
        let value = RawValue::Bytes(vec![b'N', b'i', 0xFF, b'k', b'o', b'n', 0, 0]);
        let text = value.as_text().unwrap();
        assert_eq!(text, "Ni\u{FFFD}kon");
    }

    #[test]
    fn test_blank_text_is_absent() {
        assert_eq!(RawValue::Bytes(vec![0, 0, 0]).as_text(), None);
        assert_eq!(RawValue::Text("   ".into()).as_text(), None);
        assert_eq!(
            RawValue::Text(" Canon \0".into()).as_text(),
            Some("Canon".to_string())
        );
    }

    #[test]
    fn test_from_items_collapses_single_values() {
        assert_eq!(RawValue::from_items(vec![]), None);
        assert_eq!(
            RawValue::from_items(vec![RawValue::Integer(3)]),
            Some(RawValue::Integer(3))
        );
    }

    #[test]
    fn test_raw_tags_from_exiftool_json() {
        let json = json!({
            "SourceFile": "a.jpg",
            "ISO": 200,
            "FNumber": 2.8,
            "Make": "FUJIFILM",
            "GPSLatitudeRef": "N",
            "ISOSpeedRatings": [100, 200],
            "Missing": null,
            "Nested": {"a": 1},
        });
        let tags = RawTags::from_json(&json);

        assert_eq!(tags.get("ISO"), Some(&RawValue::Integer(200)));
        assert_eq!(tags.get("FNumber"), Some(&RawValue::Float(2.8)));
        assert_eq!(tags.get("Make").and_then(RawValue::as_text).as_deref(), Some("FUJIFILM"));
        assert_eq!(
            tags.get("ISOSpeedRatings"),
            Some(&RawValue::List(vec![RawValue::Integer(100), RawValue::Integer(200)]))
        );
        assert!(tags.get("Missing").is_none());
        assert!(tags.get("Nested").is_none());
    }

    #[test]
    fn test_non_object_json_yields_empty_tags() {
        assert!(RawTags::from_json(&json!([1, 2, 3])).is_empty());
    }
}
