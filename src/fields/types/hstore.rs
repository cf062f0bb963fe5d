//! The [`Hstore`] field storing a postgres key value map

use std::borrow::Cow;
use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::Deserialize;
use sqlfield_db::{Error, Value};
use sqlfield_declaration::Dialect;

use crate::fields::traits::{ColumnType, DecodeValue, FieldValue, JsonField};
use crate::fields::types::json::is_blank;
use crate::internal::hstore_codec::{decode_hstore, encode_hstore, HstoreMap};
use crate::internal::serde_json_field::impl_serde_via_json;

/// A map of string keys to optional string values stored in postgres' hstore format.
///
/// The absent map is `NULL` in the database and `null` in json.
/// The json form of a present map is an object, decoding also accepts a json string containing hstore text.
///
/// ```
/// use sqlfield::fields::types::Hstore;
///
/// let mut hstore = Hstore::default();
/// hstore.set("color", "red");
/// assert_eq!(hstore.get("color"), Some(Some("red")));
/// assert_eq!(hstore.to_string(), r#""color"=>"red""#);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Hstore(pub Option<HstoreMap>);

impl Hstore {
    /// Wrap a map
    pub fn new(map: HstoreMap) -> Self {
        Self(Some(map))
    }

    /// Is the map absent?
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Borrow the map, the absent map has no entries
    pub fn data(&self) -> Option<&HstoreMap> {
        self.0.as_ref()
    }

    /// Lookup a key
    ///
    /// The outer option tells whether the key is present,
    /// the inner one whether its value is not `NULL`.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.0.as_ref()?.get(key).map(Option::as_deref)
    }

    /// Set a key's value, creating the map if absent
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0
            .get_or_insert_with(HstoreMap::new)
            .insert(key.into(), Some(value.into()));
    }

    /// Set a key's value to `NULL`, creating the map if absent
    pub fn set_null(&mut self, key: impl Into<String>) {
        self.0
            .get_or_insert_with(HstoreMap::new)
            .insert(key.into(), None);
    }

    /// Remove a key
    pub fn unset(&mut self, key: &str) {
        if let Some(map) = &mut self.0 {
            map.remove(key);
        }
    }

    /// Unwrap into inner value
    pub fn into_inner(self) -> Option<HstoreMap> {
        self.0
    }
}

impl FieldValue for Hstore {
    fn scan(&mut self, value: Value<'_>) -> Result<(), Error> {
        if value.is_null() {
            self.0 = None;
            return Ok(());
        }
        let text = value.as_text()?.ok_or(Error::InvalidScan)?;
        self.0 = Some(decode_hstore(text)?);
        Ok(())
    }

    fn as_value(&self) -> Result<Value<'_>, Error> {
        Ok(match &self.0 {
            None => Value::Null,
            Some(map) => Value::String(Cow::Owned(encode_hstore(map))),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonHstore {
    Map(HstoreMap),
    Text(String),
}

impl JsonField for Hstore {
    fn marshal_json(&self) -> Result<Vec<u8>, Error> {
        Ok(serde_json::to_vec(&self.0)?)
    }

    fn unmarshal_json(&mut self, json: &[u8]) -> Result<(), Error> {
        if is_blank(json) {
            self.0 = None;
            return Ok(());
        }
        self.0 = match serde_json::from_slice::<Option<JsonHstore>>(json)? {
            None => None,
            Some(JsonHstore::Map(map)) => Some(map),
            Some(JsonHstore::Text(text)) => Some(decode_hstore(&text)?),
        };
        Ok(())
    }
}

impl DecodeValue<Value<'_>> for Hstore {
    fn decode_value(&mut self, source: Value<'_>) -> Result<(), Error> {
        self.scan(source)
    }
}

impl DecodeValue<&str> for Hstore {
    fn decode_value(&mut self, source: &str) -> Result<(), Error> {
        self.0 = Some(decode_hstore(source)?);
        Ok(())
    }
}

impl DecodeValue<HstoreMap> for Hstore {
    fn decode_value(&mut self, source: HstoreMap) -> Result<(), Error> {
        self.0 = Some(source);
        Ok(())
    }
}

impl DecodeValue<Option<HstoreMap>> for Hstore {
    fn decode_value(&mut self, source: Option<HstoreMap>) -> Result<(), Error> {
        self.0 = source;
        Ok(())
    }
}

impl ColumnType for Hstore {
    const DATA_TYPE: &'static str = "hstore";

    fn column_type(dialect: Dialect) -> Option<&'static str> {
        Some(match dialect {
            Dialect::Postgres => "hstore",
            Dialect::ClickHouse => "Map(String, Nullable(String))",
            Dialect::MySQL | Dialect::MariaDB | Dialect::SQLite => "text",
            Dialect::SQLServer => "nvarchar(max)",
            Dialect::YDB => "Utf8",
        })
    }
}

/// The hstore text, empty for the absent map
impl fmt::Display for Hstore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => Ok(()),
            Some(map) => f.write_str(&encode_hstore(map)),
        }
    }
}

impl_serde_via_json!([] Hstore);

impl From<HstoreMap> for Hstore {
    fn from(map: HstoreMap) -> Self {
        Self(Some(map))
    }
}

impl Deref for Hstore {
    type Target = Option<HstoreMap>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for Hstore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
