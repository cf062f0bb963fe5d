//! serde implementations which route through [`JsonField`]
//!
//! The field's json text is passed through [`RawValue`] unchanged,
//! so a struct serialized by `serde_json` contains exactly what [`JsonField::marshal_json`] produces.

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::fields::traits::JsonField;

/// Serialize a field as its raw json text
pub fn serialize<T, S>(field: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: JsonField + ?Sized,
    S: Serializer,
{
    let bytes = field.marshal_json().map_err(S::Error::custom)?;
    let text = String::from_utf8(bytes).map_err(S::Error::custom)?;
    let raw = RawValue::from_string(text).map_err(S::Error::custom)?;
    raw.serialize(serializer)
}

/// Deserialize a field from its raw json text
///
/// This only works with deserializers which support [`RawValue`] i.e. `serde_json`'s.
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: JsonField + Default,
    D: Deserializer<'de>,
{
    let raw = <Box<RawValue>>::deserialize(deserializer)?;
    let mut field = T::default();
    field
        .unmarshal_json(raw.get().as_bytes())
        .map_err(D::Error::custom)?;
    Ok(field)
}

/// Implement [`Serialize`] and [`Deserialize`] for a field type using its [`JsonField`] implementation
///
/// ```ignore
/// impl_serde_via_json!([E: ArrayElement] NullableArray<E>);
/// ```
macro_rules! impl_serde_via_json {
    ([$($generics:tt)*] $type:ty) => {
        impl<$($generics)*> serde::Serialize for $type {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                $crate::internal::serde_json_field::serialize(self, serializer)
            }
        }

        impl<'de, $($generics)*> serde::Deserialize<'de> for $type {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                $crate::internal::serde_json_field::deserialize(deserializer)
            }
        }
    };
}
pub(crate) use impl_serde_via_json;
