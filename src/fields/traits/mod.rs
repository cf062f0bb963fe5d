//! Traits defining how field types convert between the database, json and plain rust values.

use sqlfield_db::{Error, Value};
use sqlfield_declaration::Dialect;

pub mod element;

pub use element::ArrayElement;
pub use crate::internal::number_codec::Number;

/// Conversion between a field and the value a database driver exchanges
pub trait FieldValue {
    /// Populate `self` from a value received from the driver.
    ///
    /// On error `self` might be left in its previous state or reset,
    /// the field type documents which.
    fn scan(&mut self, value: Value<'_>) -> Result<(), Error>;

    /// Produce the value to pass to the driver
    fn as_value(&self) -> Result<Value<'_>, Error>;

    /// Construct a field from a value received from the driver
    fn from_value(value: Value<'_>) -> Result<Self, Error>
    where
        Self: Default + Sized,
    {
        let mut field = Self::default();
        field.scan(value)?;
        Ok(field)
    }
}

/// Conversion between a field and its json text
pub trait JsonField {
    /// Write the field as json
    fn marshal_json(&self) -> Result<Vec<u8>, Error>;

    /// Replace the field's content with the decoded json
    fn unmarshal_json(&mut self, json: &[u8]) -> Result<(), Error>;
}

/// Assignment from an already typed value `S`
///
/// This is implemented for every source type a field accepts.
/// Generic helpers use it to fill fields without going through the database or json.
pub trait DecodeValue<S> {
    /// Replace the field's content with `source`
    fn decode_value(&mut self, source: S) -> Result<(), Error>;
}

/// The column type metadata of a field
pub trait ColumnType {
    /// Generic name of the column type, independent of a dialect
    const DATA_TYPE: &'static str;

    /// The column type to use in `dialect`
    ///
    /// `None` means the dialect has no special type and
    /// the ORM should derive one from [`ColumnType::DATA_TYPE`].
    fn column_type(dialect: Dialect) -> Option<&'static str>;
}
