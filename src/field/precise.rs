use num_integer::Integer;

use crate::div_rem::{checked_add, checked_mul};
use crate::error::{verify_bounds, Error, Result};
use crate::field::{DateTimeField, DateTimeFieldType, DurationRef};
use crate::locale::{Locale, Names};

/// A field whose unit and range both have a fixed length, like the minute of hour.
///
/// The value is the number of whole units since the epoch, shifted by `phase`, wrapped into
/// the range and offset by `min`. Hours, minutes and the like have no phase. The day of week
/// has a phase of 3 and a minimum of 1, because 1970-01-01 was a Thursday.
#[derive(Debug)]
pub(crate) struct PreciseField {
    field_type: DateTimeFieldType,
    unit: DurationRef,
    range: DurationRef,
    unit_millis: i64,
    units_per_range: i64,
    min: i32,
    phase: i64,
    names: Option<Names>,
}

impl PreciseField {
    pub(crate) fn new(field_type: DateTimeFieldType, unit: DurationRef, range: DurationRef) -> Self {
        assert!(unit.is_precise() && range.is_precise());
        let unit_millis = unit.unit_millis();
        let units_per_range = range.unit_millis() / unit_millis;
        assert!(units_per_range >= 2, "range must span at least two units");
        PreciseField {
            field_type,
            unit,
            range,
            unit_millis,
            units_per_range,
            min: 0,
            phase: 0,
            names: None,
        }
    }

    pub(crate) fn with_offset(mut self, min: i32, phase: i64) -> Self {
        self.min = min;
        self.phase = phase;
        self
    }

    pub(crate) fn with_names(mut self, names: Names) -> Self {
        self.names = Some(names);
        self
    }
}

impl DateTimeField for PreciseField {
    fn field_type(&self) -> DateTimeFieldType {
        self.field_type
    }

    fn get(&self, instant: i64) -> i32 {
        let units = instant.div_floor(&self.unit_millis) + self.phase;
        (units.mod_floor(&self.units_per_range) + i64::from(self.min)) as i32
    }

    fn value_as_text(&self, value: i32, locale: &Locale) -> String {
        match self.names {
            Some(names) => names.text(value, locale),
            None => value.to_string(),
        }
    }

    fn value_as_short_text(&self, value: i32, locale: &Locale) -> String {
        match self.names {
            Some(names) => names.short_text(value, locale),
            None => value.to_string(),
        }
    }

    fn maximum_text_length(&self, locale: &Locale) -> usize {
        match self.names {
            Some(names) => names.max_text_length(locale),
            None => self.maximum_value().to_string().len(),
        }
    }

    fn maximum_short_text_length(&self, locale: &Locale) -> usize {
        match self.names {
            Some(names) => names.max_short_text_length(locale),
            None => self.maximum_value().to_string().len(),
        }
    }

    fn value_from_text(&self, text: &str, locale: &Locale) -> Result<i32> {
        let value = match self.names {
            Some(names) => names.value(text, locale),
            None => text.trim().parse().ok(),
        };
        value.ok_or_else(|| Error::IllegalFieldText {
            field: self.name(),
            text: text.to_string(),
        })
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        verify_bounds(
            self.name(),
            i64::from(value),
            i64::from(self.minimum_value()),
            i64::from(self.maximum_value()),
        )?;
        let delta = i64::from(value) - i64::from(self.get(instant));
        checked_add(instant, delta * self.unit_millis, "setting a field")
    }

    fn duration_field(&self) -> DurationRef {
        self.unit.clone()
    }

    fn range_duration_field(&self) -> Option<DurationRef> {
        Some(self.range.clone())
    }

    fn minimum_value(&self) -> i32 {
        self.min
    }

    fn maximum_value(&self) -> i32 {
        self.min + (self.units_per_range - 1) as i32
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        checked_mul(
            instant.div_floor(&self.unit_millis),
            self.unit_millis,
            "rounding",
        )
    }

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        let floor = self.round_floor(instant)?;
        if floor == instant {
            Ok(instant)
        } else {
            checked_add(floor, self.unit_millis, "rounding")
        }
    }
}
