//! Composition of decoded rule output into typed value objects.
//!
//! Every value object declares its field table through serde attributes: the
//! source key, whether the key is required or tolerated with a default, and the
//! nested type that composes it. [`FromRuleResult`] is the single entry point the
//! client pipeline uses, so scalar and sentinel shapes can sit next to the
//! derived ones.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ShapeError;

/// Builds a typed value from the decoded JSON output of a rule.
pub trait FromRuleResult: Sized {
    fn from_rule_result(value: Value) -> Result<Self, ShapeError>;
}

/// Compose `value` into `T`.
pub fn compose<T: FromRuleResult>(value: Value) -> Result<T, ShapeError> {
    T::from_rule_result(value)
}

pub(crate) fn decode_shape<T: DeserializeOwned>(
    shape: &'static str,
    value: Value,
) -> Result<T, ShapeError> {
    serde_json::from_value(value).map_err(|source| ShapeError::new(shape, source))
}

/// An empty mapping, an empty list or `null`: the server's way of saying the
/// caller holds no role of the requested kind.
pub fn is_empty_result(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Implements [`FromRuleResult`] for serde-described shapes.
macro_rules! rule_result_shapes {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::compose::FromRuleResult for $ty {
                fn from_rule_result(
                    value: serde_json::Value,
                ) -> Result<Self, $crate::error::ShapeError> {
                    $crate::compose::decode_shape(stringify!($ty), value)
                }
            }
        )*
    };
}

/// Shapes that compose to `None` when the server returns an empty structure.
macro_rules! sentinel_shapes {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::compose::FromRuleResult for Option<$ty> {
                fn from_rule_result(
                    value: serde_json::Value,
                ) -> Result<Self, $crate::error::ShapeError> {
                    if $crate::compose::is_empty_result(&value) {
                        return Ok(None);
                    }
                    <$ty as $crate::compose::FromRuleResult>::from_rule_result(value).map(Some)
                }
            }
        )*
    };
}

/// Declares an ordered, typed list shape that serializes as a plain JSON array.
macro_rules! list_shape {
    ($(#[$meta:meta])* $name:ident, $field:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name {
            pub $field: Vec<$item>,
        }

        impl $name {
            pub fn len(&self) -> usize {
                self.$field.len()
            }

            pub fn is_empty(&self) -> bool {
                self.$field.is_empty()
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.$field.iter()
            }
        }

        impl From<Vec<$item>> for $name {
            fn from($field: Vec<$item>) -> Self {
                Self { $field }
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<$item>;

            fn into_iter(self) -> Self::IntoIter {
                self.$field.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.$field.iter()
            }
        }
    };
}

pub(crate) use {list_shape, rule_result_shapes, sentinel_shapes};

rule_result_shapes!(String, i64, u64, f64, Vec<String>);

impl FromRuleResult for Value {
    fn from_rule_result(value: Value) -> Result<Self, ShapeError> {
        Ok(value)
    }
}

impl FromRuleResult for bool {
    fn from_rule_result(value: Value) -> Result<Self, ShapeError> {
        bool_text(value).map_err(|source| ShapeError::new("bool", source))
    }
}

/// Parses the rule language's textual booleans.
pub fn parse_bool_text(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// A boolean sent either natively or as `"true"`/`"false"` text. Empty text
/// reads as `false`, the same as a missing key.
pub fn bool_text<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(flag) => Ok(flag),
        Value::String(text) if text.trim().is_empty() => Ok(false),
        Value::String(text) => parse_bool_text(&text).ok_or_else(|| {
            D::Error::custom(format!("expected \"true\" or \"false\", got {text:?}"))
        }),
        other => Err(D::Error::custom(format!("expected boolean, got {other}"))),
    }
}

/// Like [`bool_text`], but `null` and the empty string stay unset.
pub fn opt_bool_text<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(text) if text.trim().is_empty() => Ok(None),
        other => bool_text(other).map(Some).map_err(D::Error::custom),
    }
}

/// A count or byte size sent either as a JSON number or as numeric text.
///
/// Both forms follow one rule: whole non-negative values are accepted (`12`,
/// `12.0`, `"12"`, `"12.0"`), fractional or negative ones are rejected.
pub fn u64_text<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(number) => whole_count(&number.to_string(), number.as_u64(), number.as_f64())
            .map_err(D::Error::custom),
        Value::String(text) if text.trim().is_empty() => Ok(0),
        Value::String(text) => {
            let trimmed = text.trim();
            whole_count(
                trimmed,
                trimmed.parse::<u64>().ok(),
                trimmed.parse::<f64>().ok(),
            )
            .map_err(D::Error::custom)
        }
        other => Err(D::Error::custom(format!("expected number, got {other}"))),
    }
}

fn whole_count(raw: &str, exact: Option<u64>, float: Option<f64>) -> Result<u64, String> {
    if let Some(count) = exact {
        return Ok(count);
    }
    match float {
        Some(n) if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64 => {
            Ok(n as u64)
        }
        Some(_) => Err(format!("expected a whole non-negative number, got {raw}")),
        None => Err(format!("invalid number {raw:?}")),
    }
}

/// A fractional size (GiB, cost) sent either as a JSON number or as text.
pub fn f64_text<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("expected number, got {number}"))),
        Value::String(text) if text.trim().is_empty() => Ok(0.0),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|err| D::Error::custom(format!("invalid number {text:?}: {err}"))),
        other => Err(D::Error::custom(format!("expected number, got {other}"))),
    }
}

/// Text the server emits as either a string or a bare number.
pub fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(D::Error::custom(format!("expected identifier, got {other}"))),
    }
}
