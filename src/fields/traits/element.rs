//! The element kinds an array field can hold

use std::cmp::Ordering;
use std::fmt;

use sqlfield_db::Error;
use sqlfield_declaration::ArraySyntax;

use crate::internal::number_codec::{decode_number_array, encode_number_array, Number};
use crate::internal::string_codec::{decode_string_array, encode_string_array};
use crate::sealed;

/// An element of an [array field](crate::fields::types::NullableArray).
///
/// Implemented for every [`Number`] and for [`String`].
/// Each kind brings its own codec for the database literal and for json.
pub trait ArrayElement: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    sealed!();

    /// The postgres array column type holding this kind
    const POSTGRES_ARRAY: &'static str;

    /// The clickhouse array column type holding this kind
    const CLICKHOUSE_ARRAY: &'static str;

    /// The natural order used by the ordered arrays
    fn order(&self, other: &Self) -> Ordering;

    /// Decode a database array literal, `None` if it represents null
    fn decode_db(text: &str) -> Result<Option<Vec<Self>>, Error>;

    /// Encode a database array literal
    fn encode_db(values: &[Self]) -> String;

    /// Decode a json array, `None` if it is `null`
    fn decode_json(text: &str) -> Result<Option<Vec<Self>>, Error>;

    /// Encode a json array
    fn encode_json(values: &[Self]) -> Result<String, Error>;

    /// Decode loosely formatted text passed to [`DecodeValue`](crate::fields::traits::DecodeValue)
    fn decode_text(text: &str) -> Result<Option<Vec<Self>>, Error> {
        Self::decode_json(text)
    }
}

impl<T: Number + fmt::Debug> ArrayElement for T {
    const POSTGRES_ARRAY: &'static str = <T as Number>::POSTGRES_ARRAY;
    const CLICKHOUSE_ARRAY: &'static str = <T as Number>::CLICKHOUSE_ARRAY;

    fn order(&self, other: &Self) -> Ordering {
        self.total_order(other)
    }

    fn decode_db(text: &str) -> Result<Option<Vec<Self>>, Error> {
        decode_number_array(text, '{', '}')
    }

    fn encode_db(values: &[Self]) -> String {
        encode_number_array('{', '}', values)
    }

    fn decode_json(text: &str) -> Result<Option<Vec<Self>>, Error> {
        decode_number_array(text, '[', ']')
    }

    /// Infinity and NaN have no json representation
    fn encode_json(values: &[Self]) -> Result<String, Error> {
        if let Some(value) = values.iter().find(|value| !value.is_finite()) {
            return Err(Error::DecodeError(format!(
                "non-finite float {value:?} can't be written as json"
            )));
        }
        Ok(encode_number_array('[', ']', values))
    }

    fn decode_text(text: &str) -> Result<Option<Vec<Self>>, Error> {
        if text.trim_start().starts_with('{') {
            Self::decode_db(text)
        } else {
            Self::decode_json(text)
        }
    }
}

impl ArrayElement for String {
    const POSTGRES_ARRAY: &'static str = "text[]";
    const CLICKHOUSE_ARRAY: &'static str = "Array(String)";

    fn order(&self, other: &Self) -> Ordering {
        Ord::cmp(self, other)
    }

    fn decode_db(text: &str) -> Result<Option<Vec<Self>>, Error> {
        Ok(decode_string_array(text, &ArraySyntax::DATABASE))
    }

    fn encode_db(values: &[Self]) -> String {
        encode_string_array(values, &ArraySyntax::DATABASE)
    }

    fn decode_json(text: &str) -> Result<Option<Vec<Self>>, Error> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Some(Vec::new()));
        }
        if text.eq_ignore_ascii_case("null") {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(text)?))
    }

    fn encode_json(values: &[Self]) -> Result<String, Error> {
        Ok(serde_json::to_string(values)?)
    }

    /// Json arrays are decoded as such, anything else is split on commas
    fn decode_text(text: &str) -> Result<Option<Vec<Self>>, Error> {
        if text.trim_start().starts_with('[') {
            return Self::decode_json(text);
        }
        if text.is_empty() {
            return Ok(Some(Vec::new()));
        }
        Ok(Some(text.split(',').map(str::to_string).collect()))
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use sqlfield_db::Error;

    use super::ArrayElement;

    #[test]
    fn float_order_is_total() {
        assert_eq!(f64::NAN.order(&1.0), Ordering::Greater);
        assert_eq!((-0.0f64).order(&0.0), Ordering::Less);
        assert_eq!(1.0f32.order(&1.0), Ordering::Equal);
    }

    #[test]
    fn string_json_is_strict() {
        assert_eq!(
            String::decode_json(r#"["a", "b\"c"]"#).unwrap(),
            Some(vec!["a".to_string(), "b\"c".to_string()])
        );
        assert_eq!(String::decode_json("Null").unwrap(), None);
        assert_eq!(String::decode_json("  ").unwrap(), Some(vec![]));
        assert!(matches!(
            String::decode_json("[\"a\", b]"),
            Err(Error::Json(_))
        ));
        assert!(matches!(String::decode_json("{a,b}"), Err(Error::Json(_))));
    }

    #[test]
    fn non_finite_floats_are_not_json() {
        assert!(matches!(
            f64::encode_json(&[1.0, f64::INFINITY]),
            Err(Error::DecodeError(_))
        ));
        assert!(matches!(
            f32::encode_json(&[f32::NAN]),
            Err(Error::DecodeError(_))
        ));
        assert_eq!(f64::encode_db(&[1.0, f64::NAN]), "{1,NaN}");

        let json = f64::encode_json(&[1.5, -1e300]).unwrap();
        assert_eq!(f64::decode_json(&json).unwrap(), Some(vec![1.5, -1e300]));
        assert!(serde_json::from_str::<Vec<f64>>(&json).is_ok());
    }

    #[test]
    fn decode_text_accepts_both_forms() {
        assert_eq!(
            i32::decode_text("{1,2}").unwrap(),
            Some(vec![1, 2])
        );
        assert_eq!(
            i32::decode_text("[1,2]").unwrap(),
            Some(vec![1, 2])
        );
        assert_eq!(
            String::decode_text("a,b").unwrap(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            String::decode_text(r#"["a,b"]"#).unwrap(),
            Some(vec!["a,b".to_string()])
        );
    }
}
