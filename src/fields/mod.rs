//! All field types and the traits they implement.
//!
//! # Arrays
//! - [`Array<E>`](types::Array) and [`NullableArray<E>`](types::NullableArray)
//!   where `E` is a number type or [`String`]
//! - [`OrderedArray<E>`](types::OrderedArray) and [`NullableOrderedArray<E>`](types::NullableOrderedArray)
//!   which keep their elements sorted
//! - aliases like [`StringArray`](types::StringArray), [`NumberArray<T>`](types::NumberArray) or [`IntArray`](types::IntArray)
//!
//! # Json
//! - [`Json<T>`](types::Json) and [`NullableJson<T>`](types::NullableJson)
//! - [`JsonArray<T>`](types::JsonArray) and [`NullableJsonArray<T>`](types::NullableJsonArray)
//!
//! # Scalars
//! - [`Char`](types::Char)
//! - [`Duration`](types::Duration)
//! - [`Hstore`](types::Hstore)
//!
//! ---
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use sqlfield::fields::traits::FieldValue;
//! use sqlfield::fields::types::*;
//! use sqlfield::Value;
//!
//! #[derive(Serialize, Deserialize)]
//! pub struct Account {
//!     tags: NullableStringArray,
//!     scores: OrderedNumberArray<i32>,
//!     timeout: Duration,
//!     settings: Json<Settings>,
//! }
//!
//! #[derive(Serialize, Deserialize, Default, PartialEq, Debug)]
//! pub struct Settings {
//!     theme: String,
//! }
//!
//! let account = Account {
//!     tags: NullableStringArray::from_value(Value::from("{admin,staff}")).unwrap(),
//!     scores: OrderedNumberArray::new(vec![3, 1, 2]),
//!     timeout: "1m30s".parse().unwrap(),
//!     settings: Json::from_value(Value::from(r#"{"theme":"dark"}"#)).unwrap(),
//! };
//! assert_eq!(
//!     serde_json::to_string(&account).unwrap(),
//!     r#"{"tags":["admin","staff"],"scores":[1,2,3],"timeout":"1m30s","settings":{"theme":"dark"}}"#
//! );
//! ```

pub mod traits;
pub mod types;

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use sqlfield_db::Value;

    use crate::fields::traits::FieldValue;
    use crate::fields::types::{
        Char, Duration, Hstore, Json, NullableJsonArray, NullableStringArray, OrderedNumberArray,
    };

    #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
    struct Settings {
        theme: String,
        #[serde(default)]
        compact: bool,
    }

    #[derive(Serialize, Deserialize, Default)]
    struct Account {
        grade: Char,
        tags: NullableStringArray,
        scores: OrderedNumberArray<f64>,
        timeout: Duration,
        settings: Json<Settings>,
        history: NullableJsonArray<u32>,
        attributes: Hstore,
    }

    impl Account {
        fn scan_row(&mut self, row: Vec<Value<'_>>) -> Result<(), sqlfield_db::Error> {
            let mut row = row.into_iter();
            let mut next = || row.next().unwrap_or(Value::Null);
            self.grade.scan(next())?;
            self.tags.scan(next())?;
            self.scores.scan(next())?;
            self.timeout.scan(next())?;
            self.settings.scan(next())?;
            self.history.scan(next())?;
            self.attributes.scan(next())?;
            Ok(())
        }

        fn row(&self) -> Result<Vec<Value<'_>>, sqlfield_db::Error> {
            Ok(vec![
                self.grade.as_value()?,
                self.tags.as_value()?,
                self.scores.as_value()?,
                self.timeout.as_value()?,
                self.settings.as_value()?,
                self.history.as_value()?,
                self.attributes.as_value()?,
            ])
        }
    }

    #[test]
    fn row_to_json_and_back() {
        let mut account = Account::default();
        account
            .scan_row(vec![
                Value::from("A"),
                Value::from("{admin,staff}"),
                Value::from("{2.5,-1,10}"),
                Value::I64(90_000_000_000),
                Value::from(r#"{"theme":"dark"}"#),
                Value::Null,
                Value::from(r#""tier"=>"gold""#),
            ])
            .unwrap();

        assert_eq!(&account.scores[..], &[-1.0, 2.5, 10.0]);
        assert_eq!(account.timeout.to_string(), "1m30s");
        assert!(account.history.is_null());

        let json = serde_json::to_string(&account).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"grade":"A","tags":["admin","staff"],"scores":[-1,2.5,10],"timeout":"1m30s","#,
                r#""settings":{"theme":"dark","compact":false},"history":null,"attributes":{"tier":"gold"}}"#,
            )
        );

        let decoded: Account = serde_json::from_str(&json).unwrap();
        // Decoding json takes the first byte of the raw text, the opening quote
        assert_eq!(decoded.grade, Char('"'));
        assert_eq!(decoded.row().unwrap()[1..], account.row().unwrap()[1..]);
    }

    #[test]
    fn null_row() {
        let mut account = Account::default();
        assert!(account.scan_row(vec![Value::Null]).unwrap_err().is_null_value());

        account.grade.0 = 'B';
        account.timeout = Duration::SECOND;
        let result = account.scan_row(vec![
            Value::from("B"),
            Value::Null,
            Value::from("{}"),
            Value::from("1s"),
            Value::Null,
        ]);
        assert!(result.unwrap_err().is_null_value());
        assert!(account.tags.is_null());
        assert!(account.scores.is_empty());
    }
}
