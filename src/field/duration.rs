use num_integer::Integer;

use crate::div_rem::{checked_add, checked_mul, checked_sub};
use crate::error::{Error, Result};
use crate::field::{DurationField, DurationFieldType, DurationRef};

/// A unit with a fixed length in milliseconds, like the hour.
#[derive(Debug, Clone)]
pub struct PreciseDurationField {
    field_type: DurationFieldType,
    unit_millis: i64,
}

impl PreciseDurationField {
    pub fn new(field_type: DurationFieldType, unit_millis: i64) -> Self {
        assert!(unit_millis > 0, "unit length must be positive");
        PreciseDurationField {
            field_type,
            unit_millis,
        }
    }
}

impl DurationField for PreciseDurationField {
    fn field_type(&self) -> DurationFieldType {
        self.field_type
    }

    fn is_precise(&self) -> bool {
        true
    }

    fn unit_millis(&self) -> i64 {
        self.unit_millis
    }

    fn add_long(&self, instant: i64, value: i64) -> Result<i64> {
        let millis = checked_mul(value, self.unit_millis, "scaling a duration")?;
        checked_add(instant, millis, "adding a duration")
    }

    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        let millis = checked_sub(minuend, subtrahend, "subtracting instants")?;
        // Truncated, not floored: -1.5 hours is a difference of -1 hour.
        Ok(millis / self.unit_millis)
    }
}

/// A whole multiple of another unit, like centuries out of years.
#[derive(Debug, Clone)]
pub struct ScaledDurationField {
    field_type: DurationFieldType,
    inner: DurationRef,
    scalar: i64,
}

impl ScaledDurationField {
    pub fn new(inner: DurationRef, field_type: DurationFieldType, scalar: i64) -> Self {
        assert!(scalar > 1, "a scaled unit must span more than one inner unit");
        ScaledDurationField {
            field_type,
            inner,
            scalar,
        }
    }
}

impl DurationField for ScaledDurationField {
    fn field_type(&self) -> DurationFieldType {
        self.field_type
    }

    fn is_precise(&self) -> bool {
        self.inner.is_precise()
    }

    fn unit_millis(&self) -> i64 {
        self.inner.unit_millis().saturating_mul(self.scalar)
    }

    fn add_long(&self, instant: i64, value: i64) -> Result<i64> {
        let value = checked_mul(value, self.scalar, "scaling a duration")?;
        self.inner.add_long(instant, value)
    }

    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        let (quotient, _) = self
            .inner
            .difference_as_long(minuend, subtrahend)?
            .div_rem(&self.scalar);
        Ok(quotient)
    }
}

/// A unit that cannot be added, like eras.
#[derive(Debug, Clone)]
pub struct UnsupportedDurationField {
    field_type: DurationFieldType,
}

impl UnsupportedDurationField {
    pub fn new(field_type: DurationFieldType) -> Self {
        UnsupportedDurationField { field_type }
    }

    fn unsupported(&self, operation: &'static str) -> Error {
        Error::UnsupportedField {
            field: self.field_type.name(),
            operation,
        }
    }
}

impl DurationField for UnsupportedDurationField {
    fn field_type(&self) -> DurationFieldType {
        self.field_type
    }

    fn is_precise(&self) -> bool {
        true
    }

    fn is_supported(&self) -> bool {
        false
    }

    fn unit_millis(&self) -> i64 {
        0
    }

    fn add_long(&self, _instant: i64, _value: i64) -> Result<i64> {
        Err(self.unsupported("add"))
    }

    fn difference_as_long(&self, _minuend: i64, _subtrahend: i64) -> Result<i64> {
        Err(self.unsupported("difference"))
    }
}
