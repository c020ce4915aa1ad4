use std::sync::Arc;

use crate::error::{Error, Result};
use crate::field::{
    DateTimeField, DateTimeFieldType, DurationField, DurationFieldType, DurationRef, FieldRef,
    FieldTable, MILLIS_PER_HALFDAY,
};
use crate::locale::Locale;
use crate::partial::Partial;
use crate::zone::TimeZone;

// Units shorter than half a day are added on the UTC time line, so that adding an hour
// always moves an hour even across an offset change.
fn is_time_unit(duration: &DurationRef) -> bool {
    duration.is_supported() && duration.is_precise() && duration.unit_millis() < MILLIS_PER_HALFDAY
}

/// See a UTC field table through a time zone.
pub(crate) fn zone_table(table: &FieldTable, zone: &TimeZone) -> FieldTable {
    let durations: Vec<DurationRef> = DurationFieldType::ALL
        .iter()
        .map(|&t| zone_duration(table.duration(t), zone))
        .collect();

    // A field's duration is usually one of the table's, and then shares its wrapper.
    let convert = |duration: DurationRef| -> DurationRef {
        let t = duration.field_type();
        if Arc::ptr_eq(&duration, table.duration(t)) {
            durations[t.index()].clone()
        } else {
            zone_duration(&duration, zone)
        }
    };

    FieldTable::new(
        |t| {
            let field = table.field(t).clone();
            let unit = convert(field.duration_field());
            let range = field.range_duration_field().map(&convert);
            let leap = field.leap_duration_field().map(&convert);
            Arc::new(ZonedField {
                time_field: is_time_unit(&unit),
                field,
                zone: zone.clone(),
                unit,
                range,
                leap,
            })
        },
        |t| durations[t.index()].clone(),
    )
}

fn zone_duration(duration: &DurationRef, zone: &TimeZone) -> DurationRef {
    if !duration.is_supported() {
        return duration.clone();
    }
    Arc::new(ZonedDurationField {
        time_field: is_time_unit(duration),
        inner: duration.clone(),
        zone: zone.clone(),
    })
}

#[derive(Debug)]
struct ZonedDurationField {
    inner: DurationRef,
    zone: TimeZone,
    time_field: bool,
}

impl DurationField for ZonedDurationField {
    fn field_type(&self) -> DurationFieldType {
        self.inner.field_type()
    }

    fn is_precise(&self) -> bool {
        if self.time_field {
            self.inner.is_precise()
        } else {
            self.inner.is_precise() && self.zone.is_fixed()
        }
    }

    fn unit_millis(&self) -> i64 {
        self.inner.unit_millis()
    }

    fn add_long(&self, instant: i64, value: i64) -> Result<i64> {
        let offset = self.zone.offset(instant);
        let local = self.inner.add_long(instant.saturating_add(offset), value)?;
        if self.time_field {
            Ok(local - offset)
        } else {
            self.zone.local_to_utc(local, false)
        }
    }

    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        let offset = self.zone.offset(subtrahend);
        let minuend_offset = if self.time_field {
            offset
        } else {
            self.zone.offset(minuend)
        };
        self.inner.difference_as_long(
            minuend.saturating_add(minuend_offset),
            subtrahend.saturating_add(offset),
        )
    }
}

/// A field that reads and writes local values. Instants stay in UTC.
#[derive(Debug)]
struct ZonedField {
    field: FieldRef,
    zone: TimeZone,
    unit: DurationRef,
    range: Option<DurationRef>,
    leap: Option<DurationRef>,
    time_field: bool,
}

impl ZonedField {
    fn local(&self, instant: i64) -> i64 {
        // Only the extreme ends of the time line overflow; clamp them.
        instant.saturating_add(self.zone.offset(instant))
    }

    fn to_utc(&self, local: i64) -> Result<i64> {
        self.zone.local_to_utc(local, false)
    }
}

impl DateTimeField for ZonedField {
    fn field_type(&self) -> DateTimeFieldType {
        self.field.field_type()
    }

    fn is_lenient(&self) -> bool {
        self.field.is_lenient()
    }

    fn get(&self, instant: i64) -> i32 {
        self.field.get(self.local(instant))
    }

    fn as_text(&self, instant: i64, locale: &Locale) -> String {
        self.field.as_text(self.local(instant), locale)
    }

    fn as_short_text(&self, instant: i64, locale: &Locale) -> String {
        self.field.as_short_text(self.local(instant), locale)
    }

    fn value_as_text(&self, value: i32, locale: &Locale) -> String {
        self.field.value_as_text(value, locale)
    }

    fn value_as_short_text(&self, value: i32, locale: &Locale) -> String {
        self.field.value_as_short_text(value, locale)
    }

    fn maximum_text_length(&self, locale: &Locale) -> usize {
        self.field.maximum_text_length(locale)
    }

    fn maximum_short_text_length(&self, locale: &Locale) -> usize {
        self.field.maximum_short_text_length(locale)
    }

    fn add(&self, instant: i64, value: i32) -> Result<i64> {
        self.add_long(instant, i64::from(value))
    }

    fn add_long(&self, instant: i64, value: i64) -> Result<i64> {
        if self.time_field {
            let offset = self.zone.offset(instant);
            let local = self.field.add_long(self.local(instant), value)?;
            return Ok(local - offset);
        }
        let local = self.field.add_long(self.local(instant), value)?;
        self.to_utc(local)
    }

    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        let offset = self.zone.offset(subtrahend);
        let minuend_offset = if self.time_field {
            offset
        } else {
            self.zone.offset(minuend)
        };
        self.field.difference_as_long(
            minuend.saturating_add(minuend_offset),
            subtrahend.saturating_add(offset),
        )
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        let local = self.field.set(self.local(instant), value)?;
        let result = self.to_utc(local)?;
        if self.get(result) != value {
            // The local time was skipped by an offset change.
            return Err(Error::IllegalFieldValue {
                field: self.name(),
                value: i64::from(value),
            });
        }
        Ok(result)
    }

    fn set_text(&self, instant: i64, text: &str, locale: &Locale) -> Result<i64> {
        let local = self.field.set_text(self.local(instant), text, locale)?;
        self.to_utc(local)
    }

    fn value_from_text(&self, text: &str, locale: &Locale) -> Result<i32> {
        self.field.value_from_text(text, locale)
    }

    fn is_leap(&self, instant: i64) -> bool {
        self.field.is_leap(self.local(instant))
    }

    fn leap_amount(&self, instant: i64) -> i32 {
        self.field.leap_amount(self.local(instant))
    }

    fn leap_duration_field(&self) -> Option<DurationRef> {
        self.leap.clone()
    }

    fn duration_field(&self) -> DurationRef {
        self.unit.clone()
    }

    fn range_duration_field(&self) -> Option<DurationRef> {
        self.range.clone()
    }

    fn minimum_value(&self) -> i32 {
        self.field.minimum_value()
    }

    fn minimum_value_at(&self, instant: i64) -> i32 {
        self.field.minimum_value_at(self.local(instant))
    }

    fn minimum_value_for_partial(&self, partial: &Partial) -> i32 {
        self.field.minimum_value_for_partial(partial)
    }

    fn minimum_value_for_partial_values(&self, partial: &Partial, values: &[i32]) -> i32 {
        self.field.minimum_value_for_partial_values(partial, values)
    }

    fn maximum_value(&self) -> i32 {
        self.field.maximum_value()
    }

    fn maximum_value_at(&self, instant: i64) -> i32 {
        self.field.maximum_value_at(self.local(instant))
    }

    fn maximum_value_for_partial(&self, partial: &Partial) -> i32 {
        self.field.maximum_value_for_partial(partial)
    }

    fn maximum_value_for_partial_values(&self, partial: &Partial, values: &[i32]) -> i32 {
        self.field.maximum_value_for_partial_values(partial, values)
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        if self.time_field {
            let offset = self.zone.offset(instant);
            let local = self.field.round_floor(self.local(instant))?;
            return Ok(local - offset);
        }
        let local = self.field.round_floor(self.local(instant))?;
        self.to_utc(local)
    }

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        if self.time_field {
            let offset = self.zone.offset(instant);
            let local = self.field.round_ceiling(self.local(instant))?;
            return Ok(local - offset);
        }
        let local = self.field.round_ceiling(self.local(instant))?;
        self.to_utc(local)
    }

    fn remainder(&self, instant: i64) -> Result<i64> {
        self.field.remainder(self.local(instant))
    }
}
