use std::num::{ParseFloatError, ParseIntError};
use std::str::Utf8Error;

/**
Error type to simplify propagating different error types.
 */
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required field received an absent value
    #[error("nil value not allowed")]
    NullValueNotAllowed,

    /// A column value was of an unsupported kind or empty where content was required
    #[error("invalid field scan")]
    InvalidScan,

    /// A scan received a value kind without a defined conversion
    #[error("invalid scan value")]
    InvalidScanValue,

    /// A value assignment received a source without a defined coercion
    #[error("invalid set value")]
    InvalidSetValue,

    /// A generic decode received an unsupported source or malformed quoting
    #[error("invalid decode value")]
    InvalidDecodeValue,

    /// An array element or a duration component is not a valid integer
    #[error("invalid integer: {0}")]
    ParseInt(#[from] ParseIntError),

    /// An array element is not a valid float
    #[error("invalid float: {0}")]
    ParseFloat(#[from] ParseFloatError),

    /// Error returned from serde_json
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary column data which should have been text
    #[error("invalid utf-8: {0}")]
    Utf8(#[from] Utf8Error),

    /// Text which doesn't follow the expected grammar
    #[error("decode error: {0}")]
    DecodeError(String),
}

impl Error {
    /// Is this error the rejection of an absent value?
    pub fn is_null_value(&self) -> bool {
        matches!(self, Error::NullValueNotAllowed)
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn parse_errors_convert() {
        let error: Error = "x".parse::<i32>().unwrap_err().into();
        assert!(matches!(error, Error::ParseInt(_)));

        let error: Error = "x".parse::<f64>().unwrap_err().into();
        assert!(matches!(error, Error::ParseFloat(_)));
    }

    #[test]
    fn display() {
        assert_eq!(Error::NullValueNotAllowed.to_string(), "nil value not allowed");
        assert_eq!(Error::InvalidScan.to_string(), "invalid field scan");
        assert!(Error::NullValueNotAllowed.is_null_value());
        assert!(!Error::InvalidScan.is_null_value());
    }
}
