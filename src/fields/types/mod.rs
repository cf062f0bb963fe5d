//! Field types which are provided by `sqlfield`
//!
//! See [`sqlfield::fields`](crate::fields) for full list of supported field types

mod array;
mod char;
mod duration;
mod hstore;
mod json;
mod json_array;

pub use array::{
    Array, IntArray, NullableArray, NullableIntArray, NullableNumberArray,
    NullableOrderedArray, NullableOrderedNumberArray, NullableOrderedStringArray,
    NullableStringArray, NullableUintArray, NumberArray, OrderedArray, OrderedNumberArray,
    OrderedStringArray, StringArray, UintArray,
};
pub use char::Char;
pub use duration::Duration;
pub use hstore::Hstore;
pub use json::{Json, JsonSource, NullableJson};
pub use json_array::{JsonArray, NullableJsonArray};

pub use crate::internal::hstore_codec::HstoreMap;
