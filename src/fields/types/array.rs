//! Array fields stored as a database array literal like `{1,2,3}` and as a json array.
//!
//! There are four variants:
//!
//! |                         | unordered            | ordered                     |
//! |-------------------------|----------------------|-----------------------------|
//! | accepts `NULL`          | [`NullableArray<E>`] | [`NullableOrderedArray<E>`] |
//! | rejects `NULL`          | [`Array<E>`]         | [`OrderedArray<E>`]         |
//!
//! The ordered variants keep their elements sorted ascending after every decode
//! and look up values using binary search.
//!
//! All variants are generic over their [`ArrayElement`] which is any [`Number`](crate::fields::traits::Number)
//! or [`String`].

use std::borrow::Cow;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str;

use sqlfield_db::{Error, Value};
use sqlfield_declaration::Dialect;

use crate::fields::traits::{ArrayElement, ColumnType, DecodeValue, FieldValue, JsonField};
use crate::internal::serde_json_field::impl_serde_via_json;

/// Array of numbers
pub type NumberArray<T> = Array<T>;
/// Array of numbers which might be `NULL`
pub type NullableNumberArray<T> = NullableArray<T>;
/// Sorted array of numbers
pub type OrderedNumberArray<T> = OrderedArray<T>;
/// Sorted array of numbers which might be `NULL`
pub type NullableOrderedNumberArray<T> = NullableOrderedArray<T>;

/// Array of strings
pub type StringArray = Array<String>;
/// Array of strings which might be `NULL`
pub type NullableStringArray = NullableArray<String>;
/// Sorted array of strings
pub type OrderedStringArray = OrderedArray<String>;
/// Sorted array of strings which might be `NULL`
pub type NullableOrderedStringArray = NullableOrderedArray<String>;

/// Array of machine sized integers
pub type IntArray = Array<isize>;
/// Array of machine sized integers which might be `NULL`
pub type NullableIntArray = NullableArray<isize>;
/// Array of machine sized unsigned integers
pub type UintArray = Array<usize>;
/// Array of machine sized unsigned integers which might be `NULL`
pub type NullableUintArray = NullableArray<usize>;

/// Operations on plain slices shared by all variants
mod ops {
    use std::cmp::Ordering;

    use crate::fields::traits::ArrayElement;

    pub fn index_of<E: ArrayElement>(values: &[E], value: &E) -> Option<usize> {
        values.iter().position(|element| element == value)
    }

    /// Binary search for the leftmost element equal to `value`.
    ///
    /// `values` has to be sorted by [`ArrayElement::order`].
    pub fn sorted_index_of<E: ArrayElement>(values: &[E], value: &E) -> Option<usize> {
        // Elements which compare equal but are ordered apart (-0.0 and 0.0) count as not less
        let index = values.partition_point(|element| {
            element.order(value) == Ordering::Less && element != value
        });
        values
            .get(index)
            .filter(|element| *element == value)
            .map(|_| index)
    }

    pub fn one_of<E: ArrayElement>(
        values: &[E],
        candidates: &[E],
        index_of: impl Fn(&[E], &E) -> Option<usize>,
    ) -> bool {
        !values.is_empty()
            && candidates
                .iter()
                .any(|candidate| index_of(values, candidate).is_some())
    }

    pub fn filter<E: ArrayElement>(values: &[E], mut predicate: impl FnMut(&E) -> bool) -> Vec<E> {
        values
            .iter()
            .filter(|element| predicate(*element))
            .cloned()
            .collect()
    }

    pub fn map<E: ArrayElement>(values: &[E], transform: impl FnMut(&E) -> Option<E>) -> Vec<E> {
        values.iter().filter_map(transform).collect()
    }

    pub fn sort<E: ArrayElement>(values: &mut [E]) {
        values.sort_by(E::order);
    }
}

fn text_of<'v>(value: &'v Value<'_>) -> Result<&'v str, Error> {
    match value {
        Value::String(string) => Ok(&**string),
        Value::Binary(bytes) => Ok(str::from_utf8(bytes)?),
        _ => Err(Error::InvalidScan),
    }
}

fn column_type<E: ArrayElement>(dialect: Dialect) -> Option<&'static str> {
    Some(match dialect {
        Dialect::Postgres => E::POSTGRES_ARRAY,
        Dialect::ClickHouse => E::CLICKHOUSE_ARRAY,
        Dialect::MySQL | Dialect::MariaDB | Dialect::SQLite => "text",
        Dialect::SQLServer => "nvarchar(max)",
        Dialect::YDB => "Utf8",
    })
}

/// An array which might be absent i.e. `NULL` in the database and `null` in json.
///
/// The absent array is distinct from the empty one:
///
/// | rust          | database | json   |
/// |---------------|----------|--------|
/// | `None`        | `NULL`   | `null` |
/// | `Some([])`    | `{}`     | `[]`   |
/// | `Some([1,2])` | `{1,2}`  | `[1,2]`|
///
/// A failed decode leaves the array unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct NullableArray<E: ArrayElement>(pub Option<Vec<E>>);

impl<E: ArrayElement> NullableArray<E> {
    /// Create a present array
    pub fn new(values: Vec<E>) -> Self {
        Self(Some(values))
    }

    /// Create the absent array
    pub fn null() -> Self {
        Self(None)
    }

    /// Is the array absent?
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Unwrap into inner value
    pub fn into_inner(self) -> Option<Vec<E>> {
        self.0
    }

    /// The elements, the absent array has none
    pub fn as_slice(&self) -> &[E] {
        self.0.as_deref().unwrap_or(&[])
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Is the array absent or empty?
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Iterate over the elements
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.as_slice().iter()
    }

    /// Position of the first element equal to `value`
    pub fn index_of(&self, value: &E) -> Option<usize> {
        ops::index_of(self.as_slice(), value)
    }

    /// Does the array contain any of `candidates`?
    pub fn one_of(&self, candidates: &[E]) -> bool {
        ops::one_of(self.as_slice(), candidates, ops::index_of)
    }

    /// Copy the elements matching `predicate` into a new present array
    pub fn filter(&self, predicate: impl FnMut(&E) -> bool) -> Self {
        Self::new(ops::filter(self.as_slice(), predicate))
    }

    /// Transform every element into a new present array,
    /// dropping those `transform` returns `None` for
    pub fn map(&self, transform: impl FnMut(&E) -> Option<E>) -> Self {
        Self::new(ops::map(self.as_slice(), transform))
    }

    /// Sort the elements ascending
    pub fn sort(mut self) -> Self {
        if let Some(values) = &mut self.0 {
            ops::sort(values);
        }
        self
    }

    /// Convert into the sorted variant
    pub fn ordered(self) -> NullableOrderedArray<E> {
        NullableOrderedArray::from(self)
    }

    /// Convert into the variant rejecting `NULL`, an absent array becomes empty
    pub fn required(self) -> Array<E> {
        Array(self.0.unwrap_or_default())
    }

    fn decode_with(
        &mut self,
        text: &str,
        decode: fn(&str) -> Result<Option<Vec<E>>, Error>,
    ) -> Result<(), Error> {
        self.0 = decode(text)?;
        Ok(())
    }
}

impl NullableArray<String> {
    /// Concatenate the elements placing `separator` between them
    pub fn join(&self, separator: &str) -> String {
        self.as_slice().join(separator)
    }
}

impl<E: ArrayElement> Default for NullableArray<E> {
    fn default() -> Self {
        Self(None)
    }
}

impl<E: ArrayElement> FieldValue for NullableArray<E> {
    fn scan(&mut self, value: Value<'_>) -> Result<(), Error> {
        if value.is_null() {
            self.0 = None;
            return Ok(());
        }
        self.decode_with(text_of(&value)?, E::decode_db)
    }

    fn as_value(&self) -> Result<Value<'_>, Error> {
        Ok(match &self.0 {
            None => Value::Null,
            Some(values) => Value::String(Cow::Owned(E::encode_db(values))),
        })
    }
}

impl<E: ArrayElement> JsonField for NullableArray<E> {
    fn marshal_json(&self) -> Result<Vec<u8>, Error> {
        match &self.0 {
            None => Ok(b"null".to_vec()),
            Some(values) => Ok(E::encode_json(values)?.into_bytes()),
        }
    }

    fn unmarshal_json(&mut self, json: &[u8]) -> Result<(), Error> {
        self.decode_with(str::from_utf8(json)?, E::decode_json)
    }
}

impl<E: ArrayElement> DecodeValue<Value<'_>> for NullableArray<E> {
    fn decode_value(&mut self, source: Value<'_>) -> Result<(), Error> {
        match &source {
            Value::Null => {
                self.0 = None;
                Ok(())
            }
            Value::String(_) | Value::Binary(_) => {
                self.decode_with(text_of(&source)?, E::decode_text)
            }
            _ => Err(Error::InvalidDecodeValue),
        }
    }
}

impl<E: ArrayElement> DecodeValue<&str> for NullableArray<E> {
    fn decode_value(&mut self, source: &str) -> Result<(), Error> {
        self.decode_with(source, E::decode_text)
    }
}

impl<E: ArrayElement> DecodeValue<Option<Vec<E>>> for NullableArray<E> {
    fn decode_value(&mut self, source: Option<Vec<E>>) -> Result<(), Error> {
        self.0 = source;
        Ok(())
    }
}

impl<E: ArrayElement> DecodeValue<Vec<E>> for NullableArray<E> {
    fn decode_value(&mut self, source: Vec<E>) -> Result<(), Error> {
        self.0 = Some(source);
        Ok(())
    }
}

impl<E: ArrayElement> DecodeValue<NullableArray<E>> for NullableArray<E> {
    fn decode_value(&mut self, source: NullableArray<E>) -> Result<(), Error> {
        *self = source;
        Ok(())
    }
}

impl<E: ArrayElement> DecodeValue<Array<E>> for NullableArray<E> {
    fn decode_value(&mut self, source: Array<E>) -> Result<(), Error> {
        self.0 = Some(source.0);
        Ok(())
    }
}

impl<E: ArrayElement> DecodeValue<NullableOrderedArray<E>> for NullableArray<E> {
    fn decode_value(&mut self, source: NullableOrderedArray<E>) -> Result<(), Error> {
        *self = source.0;
        Ok(())
    }
}

impl<E: ArrayElement> DecodeValue<OrderedArray<E>> for NullableArray<E> {
    fn decode_value(&mut self, source: OrderedArray<E>) -> Result<(), Error> {
        self.0 = Some(source.0 .0);
        Ok(())
    }
}

impl<E: ArrayElement> ColumnType for NullableArray<E> {
    const DATA_TYPE: &'static str = "array";

    fn column_type(dialect: Dialect) -> Option<&'static str> {
        column_type::<E>(dialect)
    }
}

impl<E: ArrayElement> fmt::Display for NullableArray<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => f.write_str("null"),
            Some(values) => f.write_str(&E::encode_db(values)),
        }
    }
}

impl_serde_via_json!([E: ArrayElement] NullableArray<E>);

impl<E: ArrayElement> From<Vec<E>> for NullableArray<E> {
    fn from(values: Vec<E>) -> Self {
        Self(Some(values))
    }
}
impl<E: ArrayElement> From<Option<Vec<E>>> for NullableArray<E> {
    fn from(values: Option<Vec<E>>) -> Self {
        Self(values)
    }
}

impl<E: ArrayElement> Deref for NullableArray<E> {
    type Target = Option<Vec<E>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl<E: ArrayElement> DerefMut for NullableArray<E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// An array which can't be absent.
///
/// Scanning `NULL` or decoding json `null` fails with [`Error::NullValueNotAllowed`].
/// An empty array is written as `{}` and `[]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Array<E: ArrayElement>(pub Vec<E>);

impl<E: ArrayElement> Array<E> {
    /// Wrap a list of elements
    pub fn new(values: Vec<E>) -> Self {
        Self(values)
    }

    /// Unwrap into inner value
    pub fn into_inner(self) -> Vec<E> {
        self.0
    }

    /// Position of the first element equal to `value`
    pub fn index_of(&self, value: &E) -> Option<usize> {
        ops::index_of(&self.0, value)
    }

    /// Does the array contain any of `candidates`?
    pub fn one_of(&self, candidates: &[E]) -> bool {
        ops::one_of(&self.0, candidates, ops::index_of)
    }

    /// Copy the elements matching `predicate` into a new array
    pub fn filter(&self, predicate: impl FnMut(&E) -> bool) -> Self {
        Self(ops::filter(&self.0, predicate))
    }

    /// Transform every element into a new array, dropping those `transform` returns `None` for
    pub fn map(&self, transform: impl FnMut(&E) -> Option<E>) -> Self {
        Self(ops::map(&self.0, transform))
    }

    /// Sort the elements ascending
    pub fn sort(mut self) -> Self {
        ops::sort(&mut self.0);
        self
    }

    /// Convert into the sorted variant
    pub fn ordered(self) -> OrderedArray<E> {
        OrderedArray::from(self)
    }

    /// Convert into the variant accepting `NULL`
    pub fn nullable(self) -> NullableArray<E> {
        NullableArray(Some(self.0))
    }

    /// Run a decode of the nullable variant and reject its absent result
    fn decode_required(
        &mut self,
        decode: impl FnOnce(&mut NullableArray<E>) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let mut nullable = NullableArray::null();
        decode(&mut nullable)?;
        self.0 = nullable.0.ok_or(Error::NullValueNotAllowed)?;
        Ok(())
    }
}

impl Array<String> {
    /// Concatenate the elements placing `separator` between them
    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

impl<E: ArrayElement> Default for Array<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<E: ArrayElement> FieldValue for Array<E> {
    fn scan(&mut self, value: Value<'_>) -> Result<(), Error> {
        if value.is_null() {
            return Err(Error::NullValueNotAllowed);
        }
        self.decode_required(|nullable| nullable.scan(value))
    }

    fn as_value(&self) -> Result<Value<'_>, Error> {
        Ok(Value::String(Cow::Owned(E::encode_db(&self.0))))
    }
}

impl<E: ArrayElement> JsonField for Array<E> {
    fn marshal_json(&self) -> Result<Vec<u8>, Error> {
        Ok(E::encode_json(&self.0)?.into_bytes())
    }

    fn unmarshal_json(&mut self, json: &[u8]) -> Result<(), Error> {
        self.decode_required(|nullable| nullable.unmarshal_json(json))
    }
}

impl<E: ArrayElement> DecodeValue<Value<'_>> for Array<E> {
    fn decode_value(&mut self, source: Value<'_>) -> Result<(), Error> {
        if source.is_null() {
            return Err(Error::NullValueNotAllowed);
        }
        self.decode_required(|nullable| nullable.decode_value(source))
    }
}

impl<E: ArrayElement> DecodeValue<&str> for Array<E> {
    fn decode_value(&mut self, source: &str) -> Result<(), Error> {
        self.decode_required(|nullable| nullable.decode_value(source))
    }
}

impl<E: ArrayElement> DecodeValue<Option<Vec<E>>> for Array<E> {
    fn decode_value(&mut self, source: Option<Vec<E>>) -> Result<(), Error> {
        self.0 = source.ok_or(Error::NullValueNotAllowed)?;
        Ok(())
    }
}

impl<E: ArrayElement> DecodeValue<Vec<E>> for Array<E> {
    fn decode_value(&mut self, source: Vec<E>) -> Result<(), Error> {
        self.0 = source;
        Ok(())
    }
}

impl<E: ArrayElement> DecodeValue<NullableArray<E>> for Array<E> {
    fn decode_value(&mut self, source: NullableArray<E>) -> Result<(), Error> {
        self.decode_value(source.0)
    }
}

impl<E: ArrayElement> DecodeValue<Array<E>> for Array<E> {
    fn decode_value(&mut self, source: Array<E>) -> Result<(), Error> {
        *self = source;
        Ok(())
    }
}

impl<E: ArrayElement> DecodeValue<NullableOrderedArray<E>> for Array<E> {
    fn decode_value(&mut self, source: NullableOrderedArray<E>) -> Result<(), Error> {
        self.decode_value(source.0 .0)
    }
}

impl<E: ArrayElement> DecodeValue<OrderedArray<E>> for Array<E> {
    fn decode_value(&mut self, source: OrderedArray<E>) -> Result<(), Error> {
        *self = source.0;
        Ok(())
    }
}

impl<E: ArrayElement> ColumnType for Array<E> {
    const DATA_TYPE: &'static str = "array";

    fn column_type(dialect: Dialect) -> Option<&'static str> {
        column_type::<E>(dialect)
    }
}

impl<E: ArrayElement> fmt::Display for Array<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&E::encode_db(&self.0))
    }
}

impl_serde_via_json!([E: ArrayElement] Array<E>);

impl<E: ArrayElement> From<Vec<E>> for Array<E> {
    fn from(values: Vec<E>) -> Self {
        Self(values)
    }
}

impl<E: ArrayElement> Deref for Array<E> {
    type Target = Vec<E>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl<E: ArrayElement> DerefMut for Array<E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// A [`NullableArray`] which keeps its elements sorted ascending.
///
/// The elements are only exposed immutably to uphold the order.
#[derive(Clone, Debug, PartialEq)]
pub struct NullableOrderedArray<E: ArrayElement>(NullableArray<E>);

impl<E: ArrayElement> NullableOrderedArray<E> {
    /// Create a present array, sorting `values`
    pub fn new(values: Vec<E>) -> Self {
        Self::from(NullableArray::new(values))
    }

    /// Create the absent array
    pub fn null() -> Self {
        Self(NullableArray::null())
    }

    /// Is the array absent?
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// Unwrap into inner value
    pub fn into_inner(self) -> Option<Vec<E>> {
        self.0 .0
    }

    /// Position of the first element equal to `value` using binary search
    pub fn index_of(&self, value: &E) -> Option<usize> {
        ops::sorted_index_of(self, value)
    }

    /// Does the array contain any of `candidates`?
    pub fn one_of(&self, candidates: &[E]) -> bool {
        ops::one_of(self, candidates, ops::sorted_index_of)
    }

    /// Copy the elements matching `predicate` into a new present array
    pub fn filter(&self, predicate: impl FnMut(&E) -> bool) -> Self {
        Self(self.0.filter(predicate))
    }

    /// Transform every element into a new present array,
    /// dropping those `transform` returns `None` for
    pub fn map(&self, transform: impl FnMut(&E) -> Option<E>) -> Self {
        Self::from(self.0.map(transform))
    }

    /// Convert into the unsorted variant
    pub fn unordered(self) -> NullableArray<E> {
        self.0
    }

    /// Convert into the sorted variant rejecting `NULL`, an absent array becomes empty
    pub fn required(self) -> OrderedArray<E> {
        OrderedArray(self.0.required())
    }

    fn sorted(
        &mut self,
        decode: impl FnOnce(&mut NullableArray<E>) -> Result<(), Error>,
    ) -> Result<(), Error> {
        decode(&mut self.0)?;
        if let Some(values) = &mut self.0 .0 {
            ops::sort(values);
        }
        Ok(())
    }
}

impl NullableOrderedArray<String> {
    /// Concatenate the elements placing `separator` between them
    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

impl<E: ArrayElement> Default for NullableOrderedArray<E> {
    fn default() -> Self {
        Self::null()
    }
}

impl<E: ArrayElement> FieldValue for NullableOrderedArray<E> {
    fn scan(&mut self, value: Value<'_>) -> Result<(), Error> {
        self.sorted(|array| array.scan(value))
    }

    fn as_value(&self) -> Result<Value<'_>, Error> {
        self.0.as_value()
    }
}

impl<E: ArrayElement> JsonField for NullableOrderedArray<E> {
    fn marshal_json(&self) -> Result<Vec<u8>, Error> {
        self.0.marshal_json()
    }

    fn unmarshal_json(&mut self, json: &[u8]) -> Result<(), Error> {
        self.sorted(|array| array.unmarshal_json(json))
    }
}

impl<E, S> DecodeValue<S> for NullableOrderedArray<E>
where
    E: ArrayElement,
    NullableArray<E>: DecodeValue<S>,
{
    fn decode_value(&mut self, source: S) -> Result<(), Error> {
        self.sorted(|array| array.decode_value(source))
    }
}

impl<E: ArrayElement> ColumnType for NullableOrderedArray<E> {
    const DATA_TYPE: &'static str = "array";

    fn column_type(dialect: Dialect) -> Option<&'static str> {
        column_type::<E>(dialect)
    }
}

impl<E: ArrayElement> fmt::Display for NullableOrderedArray<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl_serde_via_json!([E: ArrayElement] NullableOrderedArray<E>);

impl<E: ArrayElement> From<NullableArray<E>> for NullableOrderedArray<E> {
    fn from(array: NullableArray<E>) -> Self {
        Self(array.sort())
    }
}
impl<E: ArrayElement> From<Vec<E>> for NullableOrderedArray<E> {
    fn from(values: Vec<E>) -> Self {
        Self::new(values)
    }
}

impl<E: ArrayElement> Deref for NullableOrderedArray<E> {
    type Target = [E];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

/// An [`Array`] which keeps its elements sorted ascending.
///
/// The elements are only exposed immutably to uphold the order.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderedArray<E: ArrayElement>(Array<E>);

impl<E: ArrayElement> OrderedArray<E> {
    /// Wrap a list of elements, sorting them
    pub fn new(values: Vec<E>) -> Self {
        Self::from(Array(values))
    }

    /// Unwrap into inner value
    pub fn into_inner(self) -> Vec<E> {
        self.0 .0
    }

    /// Position of the first element equal to `value` using binary search
    pub fn index_of(&self, value: &E) -> Option<usize> {
        ops::sorted_index_of(self, value)
    }

    /// Does the array contain any of `candidates`?
    pub fn one_of(&self, candidates: &[E]) -> bool {
        ops::one_of(self, candidates, ops::sorted_index_of)
    }

    /// Copy the elements matching `predicate` into a new array
    pub fn filter(&self, predicate: impl FnMut(&E) -> bool) -> Self {
        Self(self.0.filter(predicate))
    }

    /// Transform every element into a new array, dropping those `transform` returns `None` for
    pub fn map(&self, transform: impl FnMut(&E) -> Option<E>) -> Self {
        Self::from(self.0.map(transform))
    }

    /// Convert into the unsorted variant
    pub fn unordered(self) -> Array<E> {
        self.0
    }

    /// Convert into the sorted variant accepting `NULL`
    pub fn nullable(self) -> NullableOrderedArray<E> {
        NullableOrderedArray(self.0.nullable())
    }

    fn sorted(
        &mut self,
        decode: impl FnOnce(&mut Array<E>) -> Result<(), Error>,
    ) -> Result<(), Error> {
        decode(&mut self.0)?;
        ops::sort(&mut self.0);
        Ok(())
    }
}

impl OrderedArray<String> {
    /// Concatenate the elements placing `separator` between them
    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

impl<E: ArrayElement> Default for OrderedArray<E> {
    fn default() -> Self {
        Self(Array::default())
    }
}

impl<E: ArrayElement> FieldValue for OrderedArray<E> {
    fn scan(&mut self, value: Value<'_>) -> Result<(), Error> {
        self.sorted(|array| array.scan(value))
    }

    fn as_value(&self) -> Result<Value<'_>, Error> {
        self.0.as_value()
    }
}

impl<E: ArrayElement> JsonField for OrderedArray<E> {
    fn marshal_json(&self) -> Result<Vec<u8>, Error> {
        self.0.marshal_json()
    }

    fn unmarshal_json(&mut self, json: &[u8]) -> Result<(), Error> {
        self.sorted(|array| array.unmarshal_json(json))
    }
}

impl<E, S> DecodeValue<S> for OrderedArray<E>
where
    E: ArrayElement,
    Array<E>: DecodeValue<S>,
{
    fn decode_value(&mut self, source: S) -> Result<(), Error> {
        self.sorted(|array| array.decode_value(source))
    }
}

impl<E: ArrayElement> ColumnType for OrderedArray<E> {
    const DATA_TYPE: &'static str = "array";

    fn column_type(dialect: Dialect) -> Option<&'static str> {
        column_type::<E>(dialect)
    }
}

impl<E: ArrayElement> fmt::Display for OrderedArray<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl_serde_via_json!([E: ArrayElement] OrderedArray<E>);

impl<E: ArrayElement> From<Array<E>> for OrderedArray<E> {
    fn from(array: Array<E>) -> Self {
        Self(array.sort())
    }
}
impl<E: ArrayElement> From<Vec<E>> for OrderedArray<E> {
    fn from(values: Vec<E>) -> Self {
        Self::new(values)
    }
}

impl<E: ArrayElement> Deref for OrderedArray<E> {
    type Target = [E];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
