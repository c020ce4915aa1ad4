use crate::error::{verify_bounds, Error, Result};
use crate::field::{DateTimeField, DateTimeFieldType, DurationRef, FieldRef};
use crate::partial::Partial;

// Forwards the arithmetic, rounding, leap and duration methods, which none of the decorators
// here change.
macro_rules! forward_arithmetic {
    () => {
        fn add(&self, instant: i64, value: i32) -> Result<i64> {
            self.inner.add(instant, value)
        }

        fn add_long(&self, instant: i64, value: i64) -> Result<i64> {
            self.inner.add_long(instant, value)
        }

        fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
            self.inner.difference_as_long(minuend, subtrahend)
        }

        fn is_leap(&self, instant: i64) -> bool {
            self.inner.is_leap(instant)
        }

        fn leap_amount(&self, instant: i64) -> i32 {
            self.inner.leap_amount(instant)
        }

        fn leap_duration_field(&self) -> Option<DurationRef> {
            self.inner.leap_duration_field()
        }

        fn duration_field(&self) -> DurationRef {
            self.inner.duration_field()
        }

        fn range_duration_field(&self) -> Option<DurationRef> {
            self.inner.range_duration_field()
        }

        fn round_floor(&self, instant: i64) -> Result<i64> {
            self.inner.round_floor(instant)
        }

        fn round_ceiling(&self, instant: i64) -> Result<i64> {
            self.inner.round_ceiling(instant)
        }
    };
}

/// Shows a zero-based field one-based, with zero displayed as the maximum. The clock hours
/// are built this way: hour 0 is shown as 24 (or 12).
#[derive(Debug)]
pub(crate) struct ZeroIsMaxField {
    field_type: DateTimeFieldType,
    inner: FieldRef,
}

impl ZeroIsMaxField {
    pub(crate) fn new(inner: FieldRef, field_type: DateTimeFieldType) -> Self {
        assert_eq!(inner.minimum_value(), 0, "wrapped field must be zero-based");
        ZeroIsMaxField { field_type, inner }
    }
}

impl DateTimeField for ZeroIsMaxField {
    fn field_type(&self) -> DateTimeFieldType {
        self.field_type
    }

    fn get(&self, instant: i64) -> i32 {
        match self.inner.get(instant) {
            0 => self.maximum_value(),
            value => value,
        }
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        let max = self.maximum_value();
        verify_bounds(self.name(), i64::from(value), 1, i64::from(max))?;
        let value = if value == max { 0 } else { value };
        self.inner.set(instant, value)
    }

    fn minimum_value(&self) -> i32 {
        1
    }

    fn maximum_value(&self) -> i32 {
        self.inner.maximum_value() + 1
    }

    fn maximum_value_at(&self, instant: i64) -> i32 {
        self.inner.maximum_value_at(instant) + 1
    }

    fn maximum_value_for_partial(&self, partial: &Partial) -> i32 {
        self.inner.maximum_value_for_partial(partial) + 1
    }

    fn maximum_value_for_partial_values(&self, partial: &Partial, values: &[i32]) -> i32 {
        self.inner.maximum_value_for_partial_values(partial, values) + 1
    }

    forward_arithmetic!();
}

/// Skips zero in a field that would otherwise pass through it: -1 is followed by 1. The
/// Julian year has no year zero; 1 BC is year -1.
#[derive(Debug)]
pub(crate) struct SkipZeroField {
    inner: FieldRef,
    min: i32,
}

impl SkipZeroField {
    pub(crate) fn new(inner: FieldRef) -> Self {
        let min = match inner.minimum_value() {
            min if min < 0 => min - 1,
            0 => 1,
            min => min,
        };
        SkipZeroField { inner, min }
    }
}

impl DateTimeField for SkipZeroField {
    fn field_type(&self) -> DateTimeFieldType {
        self.inner.field_type()
    }

    fn get(&self, instant: i64) -> i32 {
        match self.inner.get(instant) {
            value if value <= 0 => value - 1,
            value => value,
        }
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        verify_bounds(
            self.name(),
            i64::from(value),
            i64::from(self.min),
            i64::from(self.maximum_value()),
        )?;
        let value = match value {
            0 => {
                return Err(Error::IllegalFieldValue {
                    field: self.name(),
                    value: 0,
                })
            }
            value if value < 0 => value + 1,
            value => value,
        };
        self.inner.set(instant, value)
    }

    fn minimum_value(&self) -> i32 {
        self.min
    }

    fn maximum_value(&self) -> i32 {
        self.inner.maximum_value()
    }

    forward_arithmetic!();
}
