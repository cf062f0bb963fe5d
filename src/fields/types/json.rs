//! The [`Json<T>`] and [`NullableJson<T>`] wrappers to store json data in a text column

use std::borrow::Cow;
use std::fmt;
use std::ops::{Deref, DerefMut};

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlfield_db::{Error, Value};
use sqlfield_declaration::Dialect;

use crate::fields::traits::{ColumnType, DecodeValue, FieldValue, JsonField};

/// A source to assign a json wrapper from
#[derive(Clone, Debug, PartialEq)]
pub enum JsonSource<'a, T> {
    /// The absent value
    Null,
    /// Already typed data, assigned as is
    Data(T),
    /// Json text
    Text(Cow<'a, str>),
    /// Json text as bytes
    Bytes(Cow<'a, [u8]>),
    /// Loosely typed data, coerced into the target type
    Structured(serde_json::Value),
}

impl<'a, T> From<Value<'a>> for JsonSource<'a, T> {
    fn from(value: Value<'a>) -> Self {
        match value {
            Value::Null => JsonSource::Null,
            Value::String(text) => JsonSource::Text(text),
            Value::Binary(bytes) => JsonSource::Bytes(bytes),
            Value::Bool(value) => JsonSource::Structured(value.into()),
            Value::I16(value) => JsonSource::Structured(value.into()),
            Value::I32(value) => JsonSource::Structured(value.into()),
            Value::I64(value) => JsonSource::Structured(value.into()),
            Value::F32(value) => JsonSource::Structured(value.into()),
            Value::F64(value) => JsonSource::Structured(value.into()),
        }
    }
}

impl<T> From<serde_json::Value> for JsonSource<'static, T> {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => JsonSource::Null,
            value => JsonSource::Structured(value),
        }
    }
}

/// Is the input empty or only whitespace?
pub(crate) fn is_blank(json: &[u8]) -> bool {
    json.iter().all(u8::is_ascii_whitespace)
}

/// Serialize `source` and deserialize the result as `T`
fn coerce_into<T: DeserializeOwned>(source: &impl Serialize) -> Result<T, Error> {
    let data = serde_json::to_vec(source)?;
    debug!(
        "Coercing {} into {}",
        String::from_utf8_lossy(&data),
        std::any::type_name::<T>()
    );
    Ok(serde_json::from_slice(&data)?)
}

/// Stores data by serializing it to json.
///
/// This is just a convenience wrapper around [serde_json].
///
/// The database column can't be `NULL` and the payload may not serialize to `null`.
/// Empty or blank json resets the payload to its default.
///
/// ```
/// use std::collections::HashMap;
/// use sqlfield::fields::types::Json;
///
/// let json = Json::<HashMap<String, String>>::from_any(&serde_json::json!({
///     "name": "Yoda",
///     "number": "1",
/// }))
/// .unwrap();
/// assert_eq!(json["name"], "Yoda");
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Json<T: Serialize + DeserializeOwned>(pub T);

impl<T: Serialize + DeserializeOwned> Json<T> {
    /// Unwrap into inner T value.
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Construct from loosely typed data by passing it through json
    pub fn from_any(source: &impl Serialize) -> Result<Self, Error> {
        coerce_into(source).map(Self)
    }

    /// Replace the payload with loosely typed data by passing it through json
    pub fn coerce(&mut self, source: &impl Serialize) -> Result<(), Error> {
        self.0 = coerce_into(source)?;
        Ok(())
    }
}

impl<T: Serialize + DeserializeOwned + Default> Json<T> {
    /// Assign from any supported source
    pub fn set_value(&mut self, source: JsonSource<'_, T>) -> Result<(), Error> {
        match source {
            JsonSource::Null => Err(Error::NullValueNotAllowed),
            JsonSource::Data(data) => {
                self.0 = data;
                Ok(())
            }
            JsonSource::Text(text) => self.unmarshal_json(text.as_bytes()),
            JsonSource::Bytes(bytes) => self.unmarshal_json(&bytes),
            JsonSource::Structured(value) => self.coerce(&value),
        }
    }
}

impl<T: Serialize + DeserializeOwned + Default> FieldValue for Json<T> {
    fn scan(&mut self, value: Value<'_>) -> Result<(), Error> {
        match value {
            Value::Null => Err(Error::NullValueNotAllowed),
            Value::String(text) => self.unmarshal_json(text.as_bytes()),
            Value::Binary(bytes) => self.unmarshal_json(&bytes),
            _ => Err(Error::InvalidScan),
        }
    }

    fn as_value(&self) -> Result<Value<'_>, Error> {
        let json = serde_json::to_string(&self.0)?;
        if json == "null" {
            return Err(Error::NullValueNotAllowed);
        }
        Ok(Value::String(Cow::Owned(json)))
    }
}

impl<T: Serialize + DeserializeOwned + Default> JsonField for Json<T> {
    fn marshal_json(&self) -> Result<Vec<u8>, Error> {
        Ok(serde_json::to_vec(&self.0)?)
    }

    fn unmarshal_json(&mut self, json: &[u8]) -> Result<(), Error> {
        self.0 = if is_blank(json) {
            T::default()
        } else {
            serde_json::from_slice(json)?
        };
        Ok(())
    }
}

impl<T: Serialize + DeserializeOwned + Default> DecodeValue<JsonSource<'_, T>> for Json<T> {
    fn decode_value(&mut self, source: JsonSource<'_, T>) -> Result<(), Error> {
        self.set_value(source)
    }
}

impl<T: Serialize + DeserializeOwned + Default> DecodeValue<Value<'_>> for Json<T> {
    fn decode_value(&mut self, source: Value<'_>) -> Result<(), Error> {
        self.set_value(source.into())
    }
}

impl<T: Serialize + DeserializeOwned + Default> DecodeValue<&str> for Json<T> {
    fn decode_value(&mut self, source: &str) -> Result<(), Error> {
        self.unmarshal_json(source.as_bytes())
    }
}

impl<T: Serialize + DeserializeOwned> ColumnType for Json<T> {
    const DATA_TYPE: &'static str = "json";

    fn column_type(dialect: Dialect) -> Option<&'static str> {
        Some(match dialect {
            Dialect::MySQL | Dialect::MariaDB => "json",
            Dialect::Postgres => "jsonb",
            Dialect::SQLite => "text",
            Dialect::SQLServer => "nvarchar(max)",
            Dialect::YDB => "JSONDocument",
            Dialect::ClickHouse => "JSON",
        })
    }
}

impl<T: Serialize + DeserializeOwned> fmt::Display for Json<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl<T: Serialize + DeserializeOwned> Serialize for Json<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
impl<'de, T: Serialize + DeserializeOwned> Deserialize<'de> for Json<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self)
    }
}

// From
impl<T: Serialize + DeserializeOwned> From<T> for Json<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

// Deref
impl<T: Serialize + DeserializeOwned> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl<T: Serialize + DeserializeOwned> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// AsRef
impl<T: Serialize + DeserializeOwned> AsRef<T> for Json<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}
impl<T: Serialize + DeserializeOwned> AsMut<T> for Json<T> {
    fn as_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

/// Stores data by serializing it to json or `NULL` if there is none.
///
/// The absent payload is `NULL` in the database and `null` in json.
/// Empty or blank json resets the payload to absent.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NullableJson<T: Serialize + DeserializeOwned>(pub Option<T>);

impl<T: Serialize + DeserializeOwned> NullableJson<T> {
    /// The absent payload
    pub fn null() -> Self {
        Self(None)
    }

    /// Is the payload absent?
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Unwrap into inner value
    pub fn into_inner(self) -> Option<T> {
        self.0
    }

    /// Construct from loosely typed data by passing it through json
    pub fn from_any(source: &impl Serialize) -> Result<Self, Error> {
        coerce_into(source).map(Self)
    }

    /// Replace the payload with loosely typed data by passing it through json
    pub fn coerce(&mut self, source: &impl Serialize) -> Result<(), Error> {
        self.0 = coerce_into(source)?;
        Ok(())
    }

    /// Assign from any supported source
    pub fn set_value(&mut self, source: JsonSource<'_, T>) -> Result<(), Error> {
        match source {
            JsonSource::Null => {
                self.0 = None;
                Ok(())
            }
            JsonSource::Data(data) => {
                self.0 = Some(data);
                Ok(())
            }
            JsonSource::Text(text) => self.unmarshal_json(text.as_bytes()),
            JsonSource::Bytes(bytes) => self.unmarshal_json(&bytes),
            JsonSource::Structured(value) => self.coerce(&value),
        }
    }
}

impl<T: Serialize + DeserializeOwned> Default for NullableJson<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T: Serialize + DeserializeOwned> FieldValue for NullableJson<T> {
    fn scan(&mut self, value: Value<'_>) -> Result<(), Error> {
        match value {
            Value::Null => {
                self.0 = None;
                Ok(())
            }
            Value::String(text) => self.unmarshal_json(text.as_bytes()),
            Value::Binary(bytes) => self.unmarshal_json(&bytes),
            _ => Err(Error::InvalidScan),
        }
    }

    fn as_value(&self) -> Result<Value<'_>, Error> {
        Ok(match &self.0 {
            None => Value::Null,
            Some(data) => Value::String(Cow::Owned(serde_json::to_string(data)?)),
        })
    }
}

impl<T: Serialize + DeserializeOwned> JsonField for NullableJson<T> {
    fn marshal_json(&self) -> Result<Vec<u8>, Error> {
        Ok(serde_json::to_vec(&self.0)?)
    }

    fn unmarshal_json(&mut self, json: &[u8]) -> Result<(), Error> {
        self.0 = if is_blank(json) {
            None
        } else {
            serde_json::from_slice(json)?
        };
        Ok(())
    }
}

impl<T: Serialize + DeserializeOwned> DecodeValue<JsonSource<'_, T>> for NullableJson<T> {
    fn decode_value(&mut self, source: JsonSource<'_, T>) -> Result<(), Error> {
        self.set_value(source)
    }
}

impl<T: Serialize + DeserializeOwned> DecodeValue<Value<'_>> for NullableJson<T> {
    fn decode_value(&mut self, source: Value<'_>) -> Result<(), Error> {
        self.set_value(source.into())
    }
}

impl<T: Serialize + DeserializeOwned> DecodeValue<&str> for NullableJson<T> {
    fn decode_value(&mut self, source: &str) -> Result<(), Error> {
        self.unmarshal_json(source.as_bytes())
    }
}

impl<T: Serialize + DeserializeOwned> ColumnType for NullableJson<T> {
    const DATA_TYPE: &'static str = "json";

    fn column_type(dialect: Dialect) -> Option<&'static str> {
        Some(match dialect {
            Dialect::YDB => "Optional<JSONDocument>",
            Dialect::ClickHouse => "Nullable(JSON)",
            dialect => return Json::<()>::column_type(dialect),
        })
    }
}

impl<T: Serialize + DeserializeOwned> fmt::Display for NullableJson<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl<T: Serialize + DeserializeOwned> Serialize for NullableJson<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
impl<'de, T: Serialize + DeserializeOwned> Deserialize<'de> for NullableJson<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self)
    }
}

impl<T: Serialize + DeserializeOwned> From<Option<T>> for NullableJson<T> {
    fn from(value: Option<T>) -> Self {
        Self(value)
    }
}

impl<T: Serialize + DeserializeOwned> Deref for NullableJson<T> {
    type Target = Option<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl<T: Serialize + DeserializeOwned> DerefMut for NullableJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::collections::HashMap;

    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use sqlfield_db::{Error, Value};
    use sqlfield_declaration::Dialect;

    use crate::fields::traits::{ColumnType, DecodeValue, FieldValue, JsonField};
    use crate::fields::types::{Json, JsonSource, NullableJson};

    #[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    struct Settings {
        theme: String,
        volume: u8,
    }

    #[test]
    fn coerce_loose_data() {
        let mut json = Json::<HashMap<String, String>>::from_any(&json!({
            "name": "Yoda",
            "number": "1",
        }))
        .unwrap();
        assert_eq!(json["name"], "Yoda");
        assert_eq!(json["number"], "1");

        assert!(matches!(
            json.coerce(&json!({"invalid": 1})),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            json.set_value(JsonSource::Structured(json!({"invalid": 1}))),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn blank_input_resets() {
        let mut json = Json(Settings {
            theme: "dark".to_string(),
            volume: 3,
        });
        json.unmarshal_json(b"").unwrap();
        assert_eq!(json.0, Settings::default());

        json.unmarshal_json(br#"{"theme":"light","volume":7}"#).unwrap();
        json.unmarshal_json(b" \n\t").unwrap();
        assert_eq!(json.0, Settings::default());

        assert!(matches!(
            json.unmarshal_json(b"{\"theme\":"),
            Err(Error::Json(_))
        ));

        let mut nullable = NullableJson(Some(Settings::default()));
        nullable.unmarshal_json(b"  ").unwrap();
        assert!(nullable.is_null());
    }

    #[test]
    fn unmarshal_replaces_everything() {
        let mut json = Json(HashMap::from([("a".to_string(), 1)]));
        json.unmarshal_json(br#"{"b":2}"#).unwrap();
        assert_eq!(json.0, HashMap::from([("b".to_string(), 2)]));
    }

    #[test]
    fn scan_and_value() {
        let mut json = Json::<Settings>::default();
        json.scan(Value::from(r#"{"theme":"dark","volume":9}"#)).unwrap();
        assert_eq!(json.volume, 9);
        assert_eq!(
            json.as_value().unwrap(),
            Value::String(Cow::Borrowed(r#"{"theme":"dark","volume":9}"#))
        );
        assert!(json.scan(Value::Null).unwrap_err().is_null_value());
        assert!(matches!(json.scan(Value::I64(1)), Err(Error::InvalidScan)));

        let mut nullable = NullableJson::<Settings>::default();
        nullable
            .scan(Value::from(br#"{"theme":"x","volume":1}"#.to_vec()))
            .unwrap();
        assert_eq!(nullable.as_ref().map(|settings| settings.volume), Some(1));
        nullable.scan(Value::Null).unwrap();
        assert_eq!(nullable.as_value().unwrap(), Value::Null);
        assert_eq!(nullable.marshal_json().unwrap(), b"null");
        assert_eq!(nullable.to_string(), "null");
    }

    #[test]
    fn required_payload_must_not_be_null() {
        let json = Json::<Option<u8>>(None);
        assert!(json.as_value().unwrap_err().is_null_value());
        assert_eq!(Json(Some(3u8)).as_value().unwrap(), Value::from("3"));
    }

    #[test]
    fn set_value_sources() {
        let mut nullable = NullableJson::<Vec<i32>>::default();
        nullable.set_value(JsonSource::Data(vec![1])).unwrap();
        assert_eq!(nullable.0, Some(vec![1]));
        nullable.set_value(JsonSource::Text("[2,3]".into())).unwrap();
        assert_eq!(nullable.0, Some(vec![2, 3]));
        nullable.set_value(JsonSource::Null).unwrap();
        assert!(nullable.is_null());
        nullable.decode_value(Value::from(b"[4]".as_slice())).unwrap();
        assert_eq!(nullable.0, Some(vec![4]));
        nullable.decode_value(JsonSource::from(json!([5, 6]))).unwrap();
        assert_eq!(nullable.0, Some(vec![5, 6]));

        let mut json = Json::<Vec<i32>>::default();
        assert!(json
            .set_value(JsonSource::Null)
            .unwrap_err()
            .is_null_value());
        json.decode_value("[7]").unwrap();
        assert_eq!(json.0, vec![7]);
    }

    #[test]
    fn serde_is_transparent() {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct Profile {
            settings: Json<Settings>,
            extra: NullableJson<HashMap<String, i32>>,
        }

        let text = r#"{"settings":{"theme":"dark","volume":2},"extra":null}"#;
        let profile: Profile = serde_json::from_str(text).unwrap();
        assert_eq!(profile.settings.theme, "dark");
        assert!(profile.extra.is_null());
        assert_eq!(serde_json::to_string(&profile).unwrap(), text);
    }

    #[test]
    fn column_types() {
        assert_eq!(Json::<Settings>::column_type(Dialect::Postgres), Some("jsonb"));
        assert_eq!(
            Json::<Settings>::column_type(Dialect::YDB),
            Some("JSONDocument")
        );
        assert_eq!(
            NullableJson::<Settings>::column_type(Dialect::YDB),
            Some("Optional<JSONDocument>")
        );
        assert_eq!(
            NullableJson::<Settings>::column_type(Dialect::ClickHouse),
            Some("Nullable(JSON)")
        );
        assert_eq!(
            NullableJson::<Settings>::column_type(Dialect::SQLServer),
            Some("nvarchar(max)")
        );
    }
}
