//! The [`Duration`] field storing a signed span of time as text like `"1h30m"`

use std::borrow::Cow;
use std::fmt;
use std::str::{self, FromStr};
use std::time;

use sqlfield_db::{Error, Value};
use sqlfield_declaration::Dialect;

use crate::fields::traits::{ColumnType, DecodeValue, FieldValue, JsonField};
use crate::internal::duration_text::{format_duration_text, parse_duration_text};
use crate::internal::serde_json_field::impl_serde_via_json;

/// A signed number of nanoseconds.
///
/// # Text
///
/// Parsing accepts leading week and day components on top of the
/// sub-day grammar i.e. `"1w"`, `"2d12h"` or `"1w1d1h30m"`.
/// The sub-day grammar is a sequence of decimal numbers with optional fraction and a unit
/// (`ns`, `us`, `µs`, `ms`, `s`, `m` and `h`).
///
/// Formatting never uses weeks or days: a week is written as `"168h0m0s"`.
///
/// ```
/// use sqlfield::fields::types::Duration;
///
/// let duration: Duration = "1d2h".parse().unwrap();
/// assert_eq!(duration, Duration::DAY + Duration::HOUR * 2);
/// assert_eq!(duration.to_string(), "26h0m0s");
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Duration(pub i64);

impl Duration {
    /// One nanosecond
    pub const NANOSECOND: Duration = Duration(1);
    /// One microsecond
    pub const MICROSECOND: Duration = Duration(1_000);
    /// One millisecond
    pub const MILLISECOND: Duration = Duration(1_000_000);
    /// One second
    pub const SECOND: Duration = Duration(1_000_000_000);
    /// One minute
    pub const MINUTE: Duration = Duration(60 * Self::SECOND.0);
    /// One hour
    pub const HOUR: Duration = Duration(60 * Self::MINUTE.0);
    /// One day i.e. 24 hours
    pub const DAY: Duration = Duration(24 * Self::HOUR.0);
    /// One week i.e. 7 days
    pub const WEEK: Duration = Duration(7 * Self::DAY.0);

    /// The shortest representable duration
    pub const MIN: Duration = Duration(i64::MIN);
    /// The longest representable duration
    pub const MAX: Duration = Duration(i64::MAX);

    /// Parse a duration with optional leading week and day components
    pub fn parse(text: &str) -> Result<Self, Error> {
        let out_of_range = || Error::DecodeError(format!("duration {text:?} is out of range"));

        let mut rest = text;
        let mut total: i64 = 0;
        for (unit, scale) in [('w', Self::WEEK), ('d', Self::DAY)] {
            if let Some((count, tail)) = rest.split_once(unit) {
                let count: i64 = count.parse()?;
                let component = count.checked_mul(scale.0).ok_or_else(out_of_range)?;
                total = total.checked_add(component).ok_or_else(out_of_range)?;
                rest = tail;
            }
        }
        if !rest.is_empty() {
            total = total
                .checked_add(parse_duration_text(rest)?)
                .ok_or_else(out_of_range)?;
        }
        Ok(Self(total))
    }

    /// The duration as an integer nanosecond count
    pub fn nanoseconds(self) -> i64 {
        self.0
    }

    /// The duration as an integer microsecond count
    pub fn microseconds(self) -> i64 {
        self.0 / Self::MICROSECOND.0
    }

    /// The duration as an integer millisecond count
    pub fn milliseconds(self) -> i64 {
        self.0 / Self::MILLISECOND.0
    }

    /// The duration as a floating point number of seconds
    pub fn seconds(self) -> f64 {
        self.fractional(Self::SECOND)
    }

    /// The duration as a floating point number of minutes
    pub fn minutes(self) -> f64 {
        self.fractional(Self::MINUTE)
    }

    /// The duration as a floating point number of hours
    pub fn hours(self) -> f64 {
        self.fractional(Self::HOUR)
    }

    fn fractional(self, unit: Duration) -> f64 {
        let whole = self.0 / unit.0;
        let remainder = self.0 % unit.0;
        whole as f64 + remainder as f64 / unit.0 as f64
    }

    /// Round toward zero to a multiple of `multiple`.
    ///
    /// A non-positive `multiple` leaves the duration unchanged.
    pub fn truncate(self, multiple: Duration) -> Duration {
        if multiple.0 <= 0 {
            return self;
        }
        Self(self.0 - self.0 % multiple.0)
    }

    /// Round to the nearest multiple of `multiple`, halfway values away from zero.
    ///
    /// The result saturates at [`Duration::MIN`] and [`Duration::MAX`].
    /// A non-positive `multiple` leaves the duration unchanged.
    pub fn round(self, multiple: Duration) -> Duration {
        let (d, m) = (self.0, multiple.0);
        if m <= 0 {
            return self;
        }
        let less_than_half = |remainder: i64| (remainder as u64) * 2 < m as u64;

        let mut remainder = d % m;
        if d < 0 {
            remainder = -remainder;
            if less_than_half(remainder) {
                return Self(d + remainder);
            }
            return match (d + remainder).checked_sub(m) {
                Some(rounded) if rounded < d => Self(rounded),
                _ => Self::MIN,
            };
        }
        if less_than_half(remainder) {
            return Self(d - remainder);
        }
        match (d - remainder).checked_add(m) {
            Some(rounded) if rounded > d => Self(rounded),
            _ => Self::MAX,
        }
    }

    /// The absolute value, [`Duration::MIN`] saturates to [`Duration::MAX`]
    pub fn abs(self) -> Duration {
        Self(self.0.checked_abs().unwrap_or(i64::MAX))
    }
}

impl FromStr for Duration {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_duration_text(self.0))
    }
}

impl FieldValue for Duration {
    fn scan(&mut self, value: Value<'_>) -> Result<(), Error> {
        *self = match value {
            Value::I16(nanos) => Self(nanos.into()),
            Value::I32(nanos) => Self(nanos.into()),
            Value::I64(nanos) => Self(nanos),
            Value::String(text) => Self::parse(&text)?,
            Value::Binary(bytes) => Self::parse(str::from_utf8(&bytes)?)?,
            _ => return Err(Error::InvalidScanValue),
        };
        Ok(())
    }

    fn as_value(&self) -> Result<Value<'_>, Error> {
        Ok(Value::String(Cow::Owned(self.to_string())))
    }
}

impl JsonField for Duration {
    fn marshal_json(&self) -> Result<Vec<u8>, Error> {
        Ok(format!("\"{self}\"").into_bytes())
    }

    fn unmarshal_json(&mut self, json: &[u8]) -> Result<(), Error> {
        let inner = json
            .strip_prefix(b"\"")
            .and_then(|json| json.strip_suffix(b"\""))
            .ok_or(Error::InvalidDecodeValue)?;
        self.scan(Value::Binary(Cow::Borrowed(inner)))
    }
}

impl DecodeValue<Value<'_>> for Duration {
    fn decode_value(&mut self, source: Value<'_>) -> Result<(), Error> {
        self.scan(source)
    }
}

impl DecodeValue<&str> for Duration {
    fn decode_value(&mut self, source: &str) -> Result<(), Error> {
        *self = Self::parse(source)?;
        Ok(())
    }
}

impl DecodeValue<i64> for Duration {
    fn decode_value(&mut self, source: i64) -> Result<(), Error> {
        self.0 = source;
        Ok(())
    }
}

impl DecodeValue<time::Duration> for Duration {
    fn decode_value(&mut self, source: time::Duration) -> Result<(), Error> {
        *self = Self::try_from(source)?;
        Ok(())
    }
}

impl ColumnType for Duration {
    const DATA_TYPE: &'static str = "duration";

    fn column_type(dialect: Dialect) -> Option<&'static str> {
        Some(match dialect {
            Dialect::Postgres | Dialect::SQLite => "text",
            Dialect::MySQL | Dialect::MariaDB => "varchar(64)",
            Dialect::SQLServer => "nvarchar(64)",
            Dialect::YDB => "Utf8",
            Dialect::ClickHouse => "String",
        })
    }
}

impl_serde_via_json!([] Duration);

impl std::ops::Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}
impl std::ops::Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}
impl std::ops::Mul<i64> for Duration {
    type Output = Duration;

    fn mul(self, rhs: i64) -> Self::Output {
        Self(self.0 * rhs)
    }
}
impl std::ops::Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<i64> for Duration {
    fn from(nanos: i64) -> Self {
        Self(nanos)
    }
}

impl TryFrom<time::Duration> for Duration {
    type Error = Error;

    fn try_from(value: time::Duration) -> Result<Self, Self::Error> {
        i64::try_from(value.as_nanos())
            .map(Self)
            .map_err(|_| Error::DecodeError(format!("{value:?} is out of range")))
    }
}

impl TryFrom<Duration> for time::Duration {
    type Error = Error;

    /// Fails for negative durations
    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        u64::try_from(value.0)
            .map(time::Duration::from_nanos)
            .map_err(|_| Error::DecodeError(format!("{value} is negative")))
    }
}

#[cfg(feature = "chrono")]
impl From<Duration> for chrono::Duration {
    fn from(value: Duration) -> Self {
        chrono::Duration::nanoseconds(value.0)
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<chrono::Duration> for Duration {
    type Error = Error;

    fn try_from(value: chrono::Duration) -> Result<Self, Self::Error> {
        value
            .num_nanoseconds()
            .map(Self)
            .ok_or_else(|| Error::DecodeError(format!("{value} is out of range")))
    }
}

#[cfg(feature = "time")]
impl From<Duration> for ::time::Duration {
    fn from(value: Duration) -> Self {
        ::time::Duration::nanoseconds(value.0)
    }
}

#[cfg(feature = "time")]
impl TryFrom<::time::Duration> for Duration {
    type Error = Error;

    fn try_from(value: ::time::Duration) -> Result<Self, Self::Error> {
        i64::try_from(value.whole_nanoseconds())
            .map(Self)
            .map_err(|_| Error::DecodeError(format!("{value} is out of range")))
    }
}
