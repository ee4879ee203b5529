//! Tolerant decoding for backend rows
//!
//! PostgREST serializes `numeric` columns either as JSON numbers or as
//! strings depending on precision settings. A single malformed value must
//! not reject the whole payload, so these helpers coerce anything they
//! cannot parse to zero, and unknown enum labels to `None`.

use serde::de::{self, DeserializeOwned, Deserializer, IgnoredAny, IntoDeserializer, Visitor};
use std::fmt;

/// Deserialize an `f64` from a number, a numeric string, or `null`.
///
/// Unparseable strings and `null` become `0.0`.
pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientF64)
}

/// Deserialize a `u32` quantity from a number, a numeric string, or `null`.
///
/// Negative, fractional-overflow and unparseable values become `0`.
pub fn u32_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = deserializer.deserialize_any(LenientF64)?;
    if value.is_finite() && value >= 0.0 && value <= u32::MAX as f64 {
        Ok(value.trunc() as u32)
    } else {
        Ok(0)
    }
}

/// Deserialize an optional enum from its wire label.
///
/// `null`, missing, non-string and unrecognised labels all become `None`.
pub fn known_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let label = deserializer.deserialize_any(LenientLabel)?;
    Ok(label.and_then(|label| {
        let de: de::value::StrDeserializer<'_, de::value::Error> =
            label.as_str().into_deserializer();
        T::deserialize(de).ok()
    }))
}

/// Parse a numeric string the way the dashboard expects (trimmed, `0` on failure)
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

struct LenientF64;

impl<'de> Visitor<'de> for LenientF64 {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, a numeric string, or null")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        Ok(parse_amount(v))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_none<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

struct LenientLabel;

impl<'de> Visitor<'de> for LenientLabel {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string label or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "f64_or_zero", default)]
        amount: f64,
        #[serde(deserialize_with = "u32_or_zero", default)]
        qty: u32,
    }

    fn row(json: &str) -> Row {
        serde_json::from_str(json).unwrap()
    }

    #[derive(Debug, PartialEq, Deserialize)]
    enum Shade {
        Light,
        #[serde(rename = "Dark Mode")]
        Dark,
    }

    #[derive(Deserialize)]
    struct Labelled {
        #[serde(default, deserialize_with = "known_or_none")]
        shade: Option<Shade>,
    }

    fn shade(json: &str) -> Option<Shade> {
        serde_json::from_str::<Labelled>(json).unwrap().shade
    }

    #[test]
    fn test_known_labels_decode() {
        assert_eq!(shade(r#"{"shade": "Light"}"#), Some(Shade::Light));
        assert_eq!(shade(r#"{"shade": "Dark Mode"}"#), Some(Shade::Dark));
    }

    #[test]
    fn test_unusable_labels_become_none() {
        assert_eq!(shade(r#"{"shade": null}"#), None);
        assert_eq!(shade(r#"{"shade": "Purple"}"#), None);
        assert_eq!(shade(r#"{"shade": 3}"#), None);
        assert_eq!(shade(r#"{"shade": {"nested": [1, 2]}}"#), None);
        assert_eq!(shade("{}"), None);
    }

    #[test]
    fn test_numbers_and_numeric_strings() {
        let r = row(r#"{"amount": 12.5, "qty": 3}"#);
        assert_eq!(r.amount, 12.5);
        assert_eq!(r.qty, 3);

        let r = row(r#"{"amount": " 1898.10 ", "qty": "2"}"#);
        assert_eq!(r.amount, 1898.1);
        assert_eq!(r.qty, 2);
    }

    #[test]
    fn test_garbage_becomes_zero() {
        let r = row(r#"{"amount": "n/a", "qty": -4}"#);
        assert_eq!(r.amount, 0.0);
        assert_eq!(r.qty, 0);

        let r = row(r#"{"amount": null, "qty": null}"#);
        assert_eq!(r.amount, 0.0);
        assert_eq!(r.qty, 0);
    }

    #[test]
    fn test_missing_fields_default() {
        let r = row("{}");
        assert_eq!(r.amount, 0.0);
        assert_eq!(r.qty, 0);
    }
}
