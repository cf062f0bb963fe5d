//! Encode and decode lists of numbers between their textual array forms and a [`Vec`]

use std::cmp::Ordering;

use log::trace;
use sqlfield_db::Error;

use crate::internal::strip_delimiters;
use crate::sealed;

/// Characters an element may be wrapped in
const ELEMENT_QUOTES: &[char] = &['\'', '"'];

/// The closed set of numeric kinds an array may hold
pub trait Number: Copy + PartialEq + PartialOrd + Send + Sync + 'static {
    sealed!();

    /// The postgres array column type holding this kind
    const POSTGRES_ARRAY: &'static str;

    /// The clickhouse array column type holding this kind
    const CLICKHOUSE_ARRAY: &'static str;

    /// Parse a single, already trimmed element
    fn parse(text: &str) -> Result<Self, Error>;

    /// Append the element's textual form to `buffer`
    fn format(self, buffer: &mut String);

    /// Total order used to sort arrays of this kind
    fn total_order(&self, other: &Self) -> Ordering;

    /// Is the value neither infinite nor NaN?
    fn is_finite(self) -> bool;
}

macro_rules! impl_number {
    (integer: $($type:ty => $postgres:literal, $clickhouse:literal;)*) => {$(
        impl Number for $type {
            const POSTGRES_ARRAY: &'static str = $postgres;
            const CLICKHOUSE_ARRAY: &'static str = $clickhouse;

            fn parse(text: &str) -> Result<Self, Error> {
                Ok(text.parse::<$type>()?)
            }

            fn format(self, buffer: &mut String) {
                buffer.push_str(&self.to_string());
            }

            fn total_order(&self, other: &Self) -> Ordering {
                Ord::cmp(self, other)
            }

            fn is_finite(self) -> bool {
                true
            }
        }
    )*};
    (float: $($type:ty => $postgres:literal, $clickhouse:literal;)*) => {$(
        impl Number for $type {
            const POSTGRES_ARRAY: &'static str = $postgres;
            const CLICKHOUSE_ARRAY: &'static str = $clickhouse;

            fn parse(text: &str) -> Result<Self, Error> {
                Ok(text.parse::<$type>()?)
            }

            fn format(self, buffer: &mut String) {
                if self.is_nan() {
                    buffer.push_str("NaN");
                } else if self.is_infinite() {
                    buffer.push_str(if self > 0.0 { "Infinity" } else { "-Infinity" });
                } else {
                    buffer.push_str(&self.to_string());
                }
            }

            fn total_order(&self, other: &Self) -> Ordering {
                self.total_cmp(other)
            }

            fn is_finite(self) -> bool {
                <$type>::is_finite(self)
            }
        }
    )*};
}
impl_number!(integer:
    i8 => "smallint[]", "Array(Int8)";
    i16 => "smallint[]", "Array(Int16)";
    i32 => "integer[]", "Array(Int32)";
    i64 => "bigint[]", "Array(Int64)";
    isize => "bigint[]", "Array(Int64)";
    u8 => "smallint[]", "Array(UInt8)";
    u16 => "integer[]", "Array(UInt16)";
    u32 => "bigint[]", "Array(UInt32)";
    u64 => "numeric[]", "Array(UInt64)";
    usize => "numeric[]", "Array(UInt64)";
);
impl_number!(float:
    f32 => "real[]", "Array(Float32)";
    f64 => "double precision[]", "Array(Float64)";
);

/// Decode a list of numbers delimited by `open` and `close`.
///
/// - `null` (any case) is the absent list
/// - an empty string or just the delimiters is the empty list
/// - elements may be surrounded by whitespace and wrapped in `'` or `"`
///
/// The first element which fails to parse discards the whole list.
pub fn decode_number_array<T: Number>(
    text: &str,
    open: char,
    close: char,
) -> Result<Option<Vec<T>>, Error> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("null") {
        return Ok(None);
    }

    let inner = strip_delimiters(text, open, close);
    if inner.trim().is_empty() {
        return Ok(Some(Vec::new()));
    }

    trace!("Decoding number array {text}");
    inner
        .split(',')
        .map(|element| T::parse(element.trim().trim_matches(ELEMENT_QUOTES)))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Encode a list of numbers delimited by `open` and `close`.
///
/// An empty list still produces the delimiters.
pub fn encode_number_array<T: Number>(open: char, close: char, values: &[T]) -> String {
    let mut buffer = String::with_capacity(2 + values.len() * 4);
    buffer.push(open);
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            buffer.push(',');
        }
        value.format(&mut buffer);
    }
    buffer.push(close);
    buffer
}
