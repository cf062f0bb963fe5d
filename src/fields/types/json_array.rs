//! The [`JsonArray<T>`] and [`NullableJsonArray<T>`] fields storing a list as json text

use std::borrow::Cow;
use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlfield_db::{Error, Value};
use sqlfield_declaration::Dialect;

use crate::fields::traits::{ColumnType, DecodeValue, FieldValue, JsonField};
use crate::fields::types::json::is_blank;
use crate::fields::types::{Json, JsonSource, NullableJson};

/// Decode a json array, `null` is `None`
fn decode_items<T: DeserializeOwned>(json: &[u8]) -> Result<Option<Vec<T>>, Error> {
    Ok(serde_json::from_slice(json)?)
}

fn encode_items<T: Serialize>(items: &[T]) -> Result<Vec<u8>, Error> {
    if items.is_empty() {
        return Ok(b"[]".to_vec());
    }
    Ok(serde_json::to_vec(items)?)
}

fn text_of<'v>(value: &'v Value<'_>) -> Option<&'v [u8]> {
    match value {
        Value::String(_) | Value::Binary(_) => value.as_bytes(),
        _ => None,
    }
}

/// A list of arbitrary items stored as a json array.
///
/// The column can't be `NULL`, json `null` and blank column content decode as the empty list.
///
/// ```
/// use sqlfield::fields::traits::JsonField;
/// use sqlfield::fields::types::JsonArray;
///
/// let array = JsonArray::new(vec![1, 2, 3]);
/// assert_eq!(array.marshal_json().unwrap(), b"[1,2,3]");
/// assert_eq!(JsonArray::<i32>::default().to_string(), "[]");
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct JsonArray<T: Serialize + DeserializeOwned>(pub Vec<T>);

impl<T: Serialize + DeserializeOwned> JsonArray<T> {
    /// Wrap a list of items
    pub fn new(items: Vec<T>) -> Self {
        Self(items)
    }

    /// Unwrap into inner value
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }

    /// Assign from a supported source.
    ///
    /// Typed data replaces the content, text is decoded as json.
    /// Loosely typed data is rejected with [`Error::InvalidSetValue`].
    pub fn set_value(&mut self, source: JsonSource<'_, Vec<T>>) -> Result<(), Error> {
        match source {
            JsonSource::Null => Err(Error::NullValueNotAllowed),
            JsonSource::Data(items) => {
                self.0 = items;
                Ok(())
            }
            JsonSource::Text(text) => self.unmarshal_json(text.as_bytes()),
            JsonSource::Bytes(bytes) => self.unmarshal_json(&bytes),
            JsonSource::Structured(_) => Err(Error::InvalidSetValue),
        }
    }
}

impl<T: Serialize + DeserializeOwned> Default for JsonArray<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T: Serialize + DeserializeOwned> FieldValue for JsonArray<T> {
    fn scan(&mut self, value: Value<'_>) -> Result<(), Error> {
        if value.is_null() {
            return Err(Error::NullValueNotAllowed);
        }
        let json = text_of(&value).ok_or(Error::InvalidScan)?;
        if is_blank(json) {
            self.0.clear();
            return Ok(());
        }
        self.unmarshal_json(json)
    }

    fn as_value(&self) -> Result<Value<'_>, Error> {
        let json = if self.0.is_empty() {
            "[]".to_string()
        } else {
            serde_json::to_string(&self.0)?
        };
        Ok(Value::String(Cow::Owned(json)))
    }
}

impl<T: Serialize + DeserializeOwned> JsonField for JsonArray<T> {
    fn marshal_json(&self) -> Result<Vec<u8>, Error> {
        encode_items(&self.0)
    }

    fn unmarshal_json(&mut self, json: &[u8]) -> Result<(), Error> {
        self.0 = decode_items(json)?.unwrap_or_default();
        Ok(())
    }
}

impl<T: Serialize + DeserializeOwned> DecodeValue<JsonSource<'_, Vec<T>>> for JsonArray<T> {
    fn decode_value(&mut self, source: JsonSource<'_, Vec<T>>) -> Result<(), Error> {
        self.set_value(source)
    }
}

impl<T: Serialize + DeserializeOwned> DecodeValue<Value<'_>> for JsonArray<T> {
    fn decode_value(&mut self, source: Value<'_>) -> Result<(), Error> {
        self.set_value(source.into())
    }
}

impl<T: Serialize + DeserializeOwned> DecodeValue<&str> for JsonArray<T> {
    fn decode_value(&mut self, source: &str) -> Result<(), Error> {
        self.unmarshal_json(source.as_bytes())
    }
}

impl<T: Serialize + DeserializeOwned> DecodeValue<Vec<T>> for JsonArray<T> {
    fn decode_value(&mut self, source: Vec<T>) -> Result<(), Error> {
        self.0 = source;
        Ok(())
    }
}

impl<T: Serialize + DeserializeOwned> ColumnType for JsonArray<T> {
    const DATA_TYPE: &'static str = "json";

    fn column_type(dialect: Dialect) -> Option<&'static str> {
        Json::<()>::column_type(dialect)
    }
}

impl<T: Serialize + DeserializeOwned> fmt::Display for JsonArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.marshal_json().map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&json))
    }
}

impl<T: Serialize + DeserializeOwned> Serialize for JsonArray<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
impl<'de, T: Serialize + DeserializeOwned> Deserialize<'de> for JsonArray<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<Vec<T>>::deserialize(deserializer).map(|items| Self(items.unwrap_or_default()))
    }
}

impl<T: Serialize + DeserializeOwned> From<Vec<T>> for JsonArray<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<T: Serialize + DeserializeOwned> Deref for JsonArray<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl<T: Serialize + DeserializeOwned> DerefMut for JsonArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// A list of arbitrary items stored as a json array or `NULL`.
///
/// Both the absent and the empty list are written to the database as `NULL`.
/// In json the absent list is `null` and the empty one `[]`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NullableJsonArray<T: Serialize + DeserializeOwned>(pub Option<Vec<T>>);

impl<T: Serialize + DeserializeOwned> NullableJsonArray<T> {
    /// Wrap a list of items
    pub fn new(items: Vec<T>) -> Self {
        Self(Some(items))
    }

    /// The absent list
    pub fn null() -> Self {
        Self(None)
    }

    /// Is the list absent?
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Unwrap into inner value
    pub fn into_inner(self) -> Option<Vec<T>> {
        self.0
    }

    /// Assign from a supported source, [`JsonSource::Null`] clears the list.
    ///
    /// See [`JsonArray::set_value`].
    pub fn set_value(&mut self, source: JsonSource<'_, Vec<T>>) -> Result<(), Error> {
        match source {
            JsonSource::Null => {
                self.0 = None;
                Ok(())
            }
            JsonSource::Data(items) => {
                self.0 = Some(items);
                Ok(())
            }
            JsonSource::Text(text) => self.unmarshal_json(text.as_bytes()),
            JsonSource::Bytes(bytes) => self.unmarshal_json(&bytes),
            JsonSource::Structured(_) => Err(Error::InvalidSetValue),
        }
    }
}

impl<T: Serialize + DeserializeOwned> Default for NullableJsonArray<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T: Serialize + DeserializeOwned> FieldValue for NullableJsonArray<T> {
    fn scan(&mut self, value: Value<'_>) -> Result<(), Error> {
        if value.is_null() {
            self.0 = None;
            return Ok(());
        }
        let json = text_of(&value).ok_or(Error::InvalidScan)?;
        self.unmarshal_json(json)
    }

    fn as_value(&self) -> Result<Value<'_>, Error> {
        match &self.0 {
            Some(items) if !items.is_empty() => Ok(Value::String(Cow::Owned(
                serde_json::to_string(items)?,
            ))),
            _ => Ok(Value::Null),
        }
    }
}

impl<T: Serialize + DeserializeOwned> JsonField for NullableJsonArray<T> {
    fn marshal_json(&self) -> Result<Vec<u8>, Error> {
        match &self.0 {
            None => Ok(b"null".to_vec()),
            Some(items) => encode_items(items),
        }
    }

    fn unmarshal_json(&mut self, json: &[u8]) -> Result<(), Error> {
        self.0 = if is_blank(json) {
            None
        } else {
            decode_items(json)?
        };
        Ok(())
    }
}

impl<T: Serialize + DeserializeOwned> DecodeValue<JsonSource<'_, Vec<T>>>
    for NullableJsonArray<T>
{
    fn decode_value(&mut self, source: JsonSource<'_, Vec<T>>) -> Result<(), Error> {
        self.set_value(source)
    }
}

impl<T: Serialize + DeserializeOwned> DecodeValue<Value<'_>> for NullableJsonArray<T> {
    fn decode_value(&mut self, source: Value<'_>) -> Result<(), Error> {
        self.set_value(source.into())
    }
}

impl<T: Serialize + DeserializeOwned> DecodeValue<&str> for NullableJsonArray<T> {
    fn decode_value(&mut self, source: &str) -> Result<(), Error> {
        self.unmarshal_json(source.as_bytes())
    }
}

impl<T: Serialize + DeserializeOwned> DecodeValue<Option<Vec<T>>> for NullableJsonArray<T> {
    fn decode_value(&mut self, source: Option<Vec<T>>) -> Result<(), Error> {
        self.0 = source;
        Ok(())
    }
}

impl<T: Serialize + DeserializeOwned> ColumnType for NullableJsonArray<T> {
    const DATA_TYPE: &'static str = "json";

    fn column_type(dialect: Dialect) -> Option<&'static str> {
        NullableJson::<()>::column_type(dialect)
    }
}

impl<T: Serialize + DeserializeOwned> fmt::Display for NullableJsonArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.marshal_json().map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&json))
    }
}

impl<T: Serialize + DeserializeOwned> Serialize for NullableJsonArray<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
impl<'de, T: Serialize + DeserializeOwned> Deserialize<'de> for NullableJsonArray<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<Vec<T>>::deserialize(deserializer).map(Self)
    }
}

impl<T: Serialize + DeserializeOwned> From<Vec<T>> for NullableJsonArray<T> {
    fn from(items: Vec<T>) -> Self {
        Self(Some(items))
    }
}
impl<T: Serialize + DeserializeOwned> From<JsonArray<T>> for NullableJsonArray<T> {
    fn from(array: JsonArray<T>) -> Self {
        Self(Some(array.0))
    }
}

impl<T: Serialize + DeserializeOwned> Deref for NullableJsonArray<T> {
    type Target = Option<Vec<T>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl<T: Serialize + DeserializeOwned> DerefMut for NullableJsonArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
