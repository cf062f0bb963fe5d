//! The [`Char`] field storing a single character

use std::borrow::Cow;
use std::fmt;

use sqlfield_db::{Error, Value};
use sqlfield_declaration::Dialect;

use crate::fields::traits::{ColumnType, DecodeValue, FieldValue, JsonField};
use crate::internal::serde_json_field::impl_serde_via_json;

/// A single character column.
///
/// The zero character `'\0'` is the placeholder for "no character" and is written as a single space.
///
/// Decoding always takes the first unit of its source:
/// the first character of text, the first byte of binary data
/// or the code point of an integer.
///
/// # Json
///
/// The json form is the character in quotes but only its lowest byte is written.
/// Decoding json applies the first unit rule to the raw json text
/// which yields the opening quote `'"'` for every well-formed json string.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Char(pub char);

impl Char {
    /// The placeholder for "no character"
    pub const ZERO: Char = Char('\0');

    /// Unwrap into inner value
    pub fn as_char(self) -> char {
        self.0
    }

    /// Is this the placeholder for "no character"?
    pub fn is_zero(self) -> bool {
        self.0 == '\0'
    }

    /// The character written to the database, the zero character is replaced by a space
    fn visible(self) -> char {
        if self.is_zero() {
            ' '
        } else {
            self.0
        }
    }

    /// Produce the value to pass to a driver of `dialect`.
    ///
    /// YDB and ClickHouse store the character as its integer code point.
    pub fn value_for(self, dialect: Dialect) -> Value<'static> {
        match dialect {
            Dialect::YDB | Dialect::ClickHouse => Value::I32(self.0 as i32),
            _ => Value::String(Cow::Owned(self.visible().to_string())),
        }
    }

    fn decode(value: &Value<'_>) -> Result<Self, Error> {
        let char = match value {
            Value::Null => return Err(Error::NullValueNotAllowed),
            Value::String(string) => string.chars().next(),
            Value::Binary(bytes) => bytes.first().map(|byte| char::from(*byte)),
            Value::I16(code) => u32::try_from(*code).ok().and_then(char::from_u32),
            Value::I32(code) => u32::try_from(*code).ok().and_then(char::from_u32),
            Value::I64(code) => u32::try_from(*code).ok().and_then(char::from_u32),
            _ => None,
        };
        char.map(Char).ok_or(Error::InvalidScan)
    }
}

impl FieldValue for Char {
    fn scan(&mut self, value: Value<'_>) -> Result<(), Error> {
        *self = Self::decode(&value)?;
        Ok(())
    }

    fn as_value(&self) -> Result<Value<'_>, Error> {
        Ok(Value::String(Cow::Owned(self.visible().to_string())))
    }
}

impl JsonField for Char {
    fn marshal_json(&self) -> Result<Vec<u8>, Error> {
        // Truncated to the lowest byte
        Ok(vec![b'"', self.visible() as u32 as u8, b'"'])
    }

    fn unmarshal_json(&mut self, json: &[u8]) -> Result<(), Error> {
        *self = Self::decode(&Value::Binary(Cow::Borrowed(json)))?;
        Ok(())
    }
}

impl DecodeValue<Value<'_>> for Char {
    fn decode_value(&mut self, source: Value<'_>) -> Result<(), Error> {
        self.scan(source)
    }
}

impl DecodeValue<char> for Char {
    fn decode_value(&mut self, source: char) -> Result<(), Error> {
        self.0 = source;
        Ok(())
    }
}

impl ColumnType for Char {
    const DATA_TYPE: &'static str = "char";

    fn column_type(dialect: Dialect) -> Option<&'static str> {
        Some(match dialect {
            Dialect::MySQL | Dialect::MariaDB | Dialect::Postgres | Dialect::SQLServer => "char",
            Dialect::SQLite => "text",
            Dialect::YDB | Dialect::ClickHouse => "Int32",
        })
    }
}

impl fmt::Display for Char {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.visible(), f)
    }
}

impl_serde_via_json!([] Char);

impl From<char> for Char {
    fn from(value: char) -> Self {
        Self(value)
    }
}
impl From<Char> for char {
    fn from(value: Char) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use sqlfield_db::{Error, Value};
    use sqlfield_declaration::Dialect;

    use crate::fields::traits::{ColumnType, FieldValue, JsonField};
    use crate::fields::types::Char;

    #[test]
    fn scan_takes_first_unit() {
        let cases = [
            (Value::from("A"), 'A'),
            (Value::from("ABC"), 'A'),
            (Value::from("ñx"), 'ñ'),
            (Value::from(b"B".to_vec()), 'B'),
            (Value::from(b"BCD".to_vec()), 'B'),
            (Value::I64(65), 'A'),
            (Value::I16(66), 'B'),
            (Value::I32('C' as i32), 'C'),
        ];
        for (value, expected) in cases {
            assert_eq!(Char::from_value(value).unwrap(), Char(expected));
        }
    }

    #[test]
    fn scan_errors() {
        let mut char = Char::default();
        assert!(matches!(
            char.scan(Value::Null),
            Err(Error::NullValueNotAllowed)
        ));
        assert!(matches!(char.scan(Value::from("")), Err(Error::InvalidScan)));
        assert!(matches!(
            char.scan(Value::Binary(Cow::Borrowed(&[]))),
            Err(Error::InvalidScan)
        ));
        assert!(matches!(char.scan(Value::F64(123.45)), Err(Error::InvalidScan)));
        assert!(matches!(char.scan(Value::I64(-1)), Err(Error::InvalidScan)));
        assert!(matches!(
            char.scan(Value::I64(0xD800)),
            Err(Error::InvalidScan)
        ));
    }

    #[test]
    fn zero_is_a_space() {
        assert_eq!(Char::ZERO.as_value().unwrap(), Value::from(" "));
        assert_eq!(Char::ZERO.marshal_json().unwrap(), b"\" \"");
        assert_eq!(Char::ZERO.to_string(), " ");
        assert_eq!(Char('ñ').as_value().unwrap(), Value::from("ñ"));
        assert_eq!(Char('5').as_value().unwrap(), Value::from("5"));
    }

    #[test]
    fn json_quirks() {
        assert_eq!(Char('A').marshal_json().unwrap(), b"\"A\"");
        // 'ā' is U+0101, only the low byte survives
        assert_eq!(Char('\u{0101}').marshal_json().unwrap(), b"\"\x01\"");

        let mut char = Char::default();
        char.unmarshal_json(b"\"A\"").unwrap();
        assert_eq!(char, Char('"'));
        assert!(matches!(char.unmarshal_json(b""), Err(Error::InvalidScan)));
    }

    #[test]
    fn dialects() {
        assert_eq!(Char::column_type(Dialect::Postgres), Some("char"));
        assert_eq!(Char::column_type(Dialect::SQLite), Some("text"));
        assert_eq!(Char::column_type(Dialect::ClickHouse), Some("Int32"));
        assert_eq!(Char('A').value_for(Dialect::YDB), Value::I32(65));
        assert_eq!(Char('A').value_for(Dialect::MySQL), Value::from("A"));
    }
}
