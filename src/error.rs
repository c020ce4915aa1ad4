use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid chronology configuration: {0}")]
    Configuration(String),

    #[error("unknown time zone {0:?}")]
    UnknownZone(String),

    /// The calendar date falls in the days skipped at the Gregorian cutover.
    #[error("date {year:04}-{month:02}-{day:02} does not exist")]
    NonexistentDateTime { year: i32, month: i32, day: i32 },

    #[error("local time {local_millis} does not exist in time zone {zone}")]
    NonexistentLocalTime { local_millis: i64, zone: String },

    #[error("value {value} for {field} must be in the range [{lower},{upper}]")]
    FieldValueOutOfBounds {
        field: &'static str,
        value: i64,
        lower: i64,
        upper: i64,
    },

    /// The value is in range but cannot be represented at the requested instant,
    /// typically because it would land in the cutover gap.
    #[error("value {value} for {field} is not supported")]
    IllegalFieldValue { field: &'static str, value: i64 },

    #[error("value {text:?} for {field} is not supported")]
    IllegalFieldText { field: &'static str, text: String },

    #[error("{field} does not support {operation}")]
    UnsupportedField {
        field: &'static str,
        operation: &'static str,
    },

    #[error("arithmetic overflow while {0}")]
    Overflow(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn out_of_bounds(field: &'static str, value: i64, lower: i64, upper: i64) -> Error {
    Error::FieldValueOutOfBounds {
        field,
        value,
        lower,
        upper,
    }
}

pub(crate) fn verify_bounds(field: &'static str, value: i64, lower: i64, upper: i64) -> Result<()> {
    if value < lower || value > upper {
        return Err(out_of_bounds(field, value, lower, upper));
    }
    Ok(())
}

pub(crate) fn to_int(value: i64, what: &'static str) -> Result<i32> {
    i32::try_from(value).map_err(|_| Error::Overflow(what))
}
