//! Strongly typed struct fields which convert between sql column values and json.
//!
//! Every field type implements the same set of traits:
//! - [`FieldValue`](fields::traits::FieldValue) to scan a driver's [`Value`] and produce one
//! - [`JsonField`](fields::traits::JsonField) to marshal and unmarshal its json text
//! - [`DecodeValue`](fields::traits::DecodeValue) to be assigned from already typed values
//! - [`ColumnType`](fields::traits::ColumnType) to report its column type per [`Dialect`]
//!
//! The serde implementations of all field types produce the same json as [`JsonField`](fields::traits::JsonField),
//! most of them pass it through `serde_json`'s raw values and are only meaningful together with `serde_json`.
#![warn(missing_docs)]

pub use sqlfield_db::{Error, Value};
pub use sqlfield_declaration::{ArraySyntax, Dialect};

// Reexported for users which want to configure their own array syntax
pub use sqlfield_declaration::config;

pub mod fields;
pub mod internal;

#[doc(hidden)]
pub(crate) mod private {
    pub trait Private {}
}
/// Put this macro inside a trait to seal it i.e. prevent extern implementations.
#[macro_export]
macro_rules! sealed {
    () => {
        /// This method prohibits implementation of this trait out side of its defining crate.
        fn _not_implementable<P: $crate::private::Private>() {}
    };
}
