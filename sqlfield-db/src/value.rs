use std::borrow::Cow;
use std::str;

use crate::Error;

/**
This enum represents a value as it is passed to and received from a database driver
 */
#[derive(Clone, Debug, PartialEq)]
pub enum Value<'a> {
    /// null representation
    Null,
    /// Bool representation
    Bool(bool),
    /// i16 representation
    I16(i16),
    /// i32 representation
    I32(i32),
    /// i64 representation
    I64(i64),
    /// f32 representation
    F32(f32),
    /// f64 representation
    F64(f64),
    /// String representation
    String(Cow<'a, str>),
    /// Binary representation
    Binary(Cow<'a, [u8]>),
}

impl<'a> Value<'a> {
    /// Is this the database NULL?
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the textual content of a [`Value::String`] or [`Value::Binary`].
    ///
    /// Returns `Ok(None)` for every other variant.
    pub fn as_text(&self) -> Result<Option<&str>, Error> {
        match self {
            Value::String(string) => Ok(Some(&**string)),
            Value::Binary(bytes) => Ok(Some(str::from_utf8(bytes)?)),
            _ => Ok(None),
        }
    }

    /// Borrow the raw bytes of a [`Value::String`] or [`Value::Binary`].
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(string) => Some(string.as_bytes()),
            Value::Binary(bytes) => Some(&**bytes),
            _ => None,
        }
    }

    /// Detach the value from any borrowed data
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Null => Value::Null,
            Value::Bool(value) => Value::Bool(value),
            Value::I16(value) => Value::I16(value),
            Value::I32(value) => Value::I32(value),
            Value::I64(value) => Value::I64(value),
            Value::F32(value) => Value::F32(value),
            Value::F64(value) => Value::F64(value),
            Value::String(value) => Value::String(Cow::Owned(value.into_owned())),
            Value::Binary(value) => Value::Binary(Cow::Owned(value.into_owned())),
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Value::String(Cow::Borrowed(value))
    }
}

impl From<String> for Value<'static> {
    fn from(value: String) -> Self {
        Value::String(Cow::Owned(value))
    }
}

impl<'a> From<&'a [u8]> for Value<'a> {
    fn from(value: &'a [u8]) -> Self {
        Value::Binary(Cow::Borrowed(value))
    }
}

impl From<Vec<u8>> for Value<'static> {
    fn from(value: Vec<u8>) -> Self {
        Value::Binary(Cow::Owned(value))
    }
}

impl<'a, T> From<Option<T>> for Value<'a>
where
    T: Into<Value<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

macro_rules! impl_from {
    ($variant:ident, $T:path) => {
        impl From<$T> for Value<'static> {
            fn from(value: $T) -> Self {
                Value::$variant(value)
            }
        }
    };
}
impl_from!(Bool, bool);
impl_from!(I16, i16);
impl_from!(I32, i32);
impl_from!(I64, i64);
impl_from!(F32, f32);
impl_from!(F64, f64);
