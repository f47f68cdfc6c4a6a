use crate::value::{Value, ValueKind};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error as ThisError;

///
/// DecodeError
///
/// Failure converting one column value into a typed field.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum DecodeError {
    #[error("unexpected null for non-optional {expected}")]
    UnexpectedNull { expected: &'static str },

    #[error("cannot decode {found} into {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: ValueKind,
    },

    #[error("value {value} out of range for {expected}")]
    OutOfRange {
        expected: &'static str,
        value: String,
    },
}

impl DecodeError {
    // Null gets its own variant so callers can tell nullability bugs apart.
    fn mismatch(expected: &'static str, found: &Value) -> Self {
        if found.is_null() {
            Self::UnexpectedNull { expected }
        } else {
            Self::TypeMismatch {
                expected,
                found: found.kind(),
            }
        }
    }

    fn out_of_range(expected: &'static str, value: impl ToString) -> Self {
        Self::OutOfRange {
            expected,
            value: value.to_string(),
        }
    }
}

///
/// FromValue
///
/// Conversion from a cursor-supplied [`Value`] into a typed field.
/// `Option<T>` is the only nullable shape; every other impl rejects `Null`.
///

pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, DecodeError>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        Ok(value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Bool(v) => Ok(v),
            other => Err(DecodeError::mismatch("bool", &other)),
        }
    }
}

// Integers accept either signed or unsigned payloads, range-checked.
macro_rules! impl_from_value_int {
    ( $( $ty:ty ),* $(,)? ) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self, DecodeError> {
                    let expected = stringify!($ty);
                    match value {
                        Value::Int(v) => {
                            Self::try_from(v).map_err(|_| DecodeError::out_of_range(expected, v))
                        }
                        Value::Uint(v) => {
                            Self::try_from(v).map_err(|_| DecodeError::out_of_range(expected, v))
                        }
                        other => Err(DecodeError::mismatch(expected, &other)),
                    }
                }
            }
        )*
    };
}

impl_from_value_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Float(v) => Ok(v),
            other => Err(DecodeError::mismatch("f64", &other)),
        }
    }
}

impl FromValue for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Float(v) if v.is_finite() && v.abs() > Self::MAX.into() => {
                Err(DecodeError::out_of_range("f32", v))
            }
            Value::Float(v) => Ok(v as Self),
            other => Err(DecodeError::mismatch("f32", &other)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Text(v) => Ok(v),
            other => Err(DecodeError::mismatch("String", &other)),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Blob(v) => Ok(v),
            other => Err(DecodeError::mismatch("Vec<u8>", &other)),
        }
    }
}

impl FromValue for NaiveDate {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Date(v) => Ok(v),
            other => Err(DecodeError::mismatch("NaiveDate", &other)),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::DateTime(v) => Ok(v),
            Value::Timestamp(v) => Ok(v.naive_utc()),
            other => Err(DecodeError::mismatch("NaiveDateTime", &other)),
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Timestamp(v) => Ok(v),
            Value::DateTime(v) => Ok(v.and_utc()),
            other => Err(DecodeError::mismatch("DateTime<Utc>", &other)),
        }
    }
}
