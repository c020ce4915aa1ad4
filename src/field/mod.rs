//! Fields project an instant onto one calendar component and do arithmetic in its units.
//!
//! A [`DateTimeField`] reads and writes a value such as the month of year. A [`DurationField`]
//! adds whole units such as months to an instant. Chronologies hand out both through a
//! [`FieldTable`], which is indexed by field type.

pub use duration::{PreciseDurationField, ScaledDurationField, UnsupportedDurationField};
pub use types::{DateTimeFieldType, DurationFieldType};

pub(crate) use decorated::{SkipZeroField, ZeroIsMaxField};
pub(crate) use precise::PreciseField;

mod decorated;
mod duration;
mod precise;
mod types;

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::{to_int, Error, Result};
use crate::locale::Locale;
use crate::partial::Partial;

pub type FieldRef = Arc<dyn DateTimeField>;
pub type DurationRef = Arc<dyn DurationField>;

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_HALFDAY: i64 = 12 * MILLIS_PER_HOUR;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;
pub const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;

/// Adds whole units of time to instants.
pub trait DurationField: Debug + Send + Sync {
    fn field_type(&self) -> DurationFieldType;

    /// Precise fields have a fixed length in milliseconds, given by `unit_millis`.
    fn is_precise(&self) -> bool;

    fn is_supported(&self) -> bool {
        true
    }

    /// Exact unit length for precise fields, an average for imprecise ones.
    fn unit_millis(&self) -> i64;

    fn add(&self, instant: i64, value: i32) -> Result<i64> {
        self.add_long(instant, i64::from(value))
    }

    fn add_long(&self, instant: i64, value: i64) -> Result<i64>;

    /// Number of whole units between the two instants, truncated towards zero.
    fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i32> {
        to_int(
            self.difference_as_long(minuend, subtrahend)?,
            "computing a difference",
        )
    }

    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64>;
}

/// One component of a date or time, such as the year or the minute of hour.
///
/// Projections (`get`, text, extremes) never fail. Everything that produces an instant or a
/// difference returns a `Result`, since values can be out of range, land in a gap, or
/// overflow.
pub trait DateTimeField: Debug + Send + Sync {
    fn field_type(&self) -> DateTimeFieldType;

    fn name(&self) -> &'static str {
        self.field_type().name()
    }

    fn is_lenient(&self) -> bool {
        false
    }

    fn get(&self, instant: i64) -> i32;

    fn as_text(&self, instant: i64, locale: &Locale) -> String {
        self.value_as_text(self.get(instant), locale)
    }

    fn as_short_text(&self, instant: i64, locale: &Locale) -> String {
        self.value_as_short_text(self.get(instant), locale)
    }

    fn value_as_text(&self, value: i32, _locale: &Locale) -> String {
        value.to_string()
    }

    fn value_as_short_text(&self, value: i32, locale: &Locale) -> String {
        self.value_as_text(value, locale)
    }

    fn maximum_text_length(&self, _locale: &Locale) -> usize {
        self.maximum_value().to_string().len()
    }

    fn maximum_short_text_length(&self, locale: &Locale) -> usize {
        self.maximum_text_length(locale)
    }

    fn add(&self, instant: i64, value: i32) -> Result<i64> {
        self.duration_field().add(instant, value)
    }

    fn add_long(&self, instant: i64, value: i64) -> Result<i64> {
        self.duration_field().add_long(instant, value)
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i32> {
        to_int(
            self.difference_as_long(minuend, subtrahend)?,
            "computing a difference",
        )
    }

    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        self.duration_field()
            .difference_as_long(minuend, subtrahend)
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64>;

    fn set_text(&self, instant: i64, text: &str, locale: &Locale) -> Result<i64> {
        let value = self.value_from_text(text, locale)?;
        self.set(instant, value)
    }

    fn value_from_text(&self, text: &str, _locale: &Locale) -> Result<i32> {
        text.trim().parse().map_err(|_| Error::IllegalFieldText {
            field: self.name(),
            text: text.to_string(),
        })
    }

    fn is_leap(&self, _instant: i64) -> bool {
        false
    }

    fn leap_amount(&self, _instant: i64) -> i32 {
        0
    }

    fn leap_duration_field(&self) -> Option<DurationRef> {
        None
    }

    fn duration_field(&self) -> DurationRef;

    fn range_duration_field(&self) -> Option<DurationRef>;

    fn minimum_value(&self) -> i32;

    fn minimum_value_at(&self, _instant: i64) -> i32 {
        self.minimum_value()
    }

    fn minimum_value_for_partial(&self, _partial: &Partial) -> i32 {
        self.minimum_value()
    }

    fn minimum_value_for_partial_values(&self, partial: &Partial, _values: &[i32]) -> i32 {
        self.minimum_value_for_partial(partial)
    }

    fn maximum_value(&self) -> i32;

    fn maximum_value_at(&self, _instant: i64) -> i32 {
        self.maximum_value()
    }

    fn maximum_value_for_partial(&self, _partial: &Partial) -> i32 {
        self.maximum_value()
    }

    fn maximum_value_for_partial_values(&self, partial: &Partial, _values: &[i32]) -> i32 {
        self.maximum_value_for_partial(partial)
    }

    fn round_floor(&self, instant: i64) -> Result<i64>;

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        let floor = self.round_floor(instant)?;
        if floor == instant {
            Ok(instant)
        } else {
            self.add(floor, 1)
        }
    }

    /// Milliseconds past the floor of the instant.
    fn remainder(&self, instant: i64) -> Result<i64> {
        Ok(instant - self.round_floor(instant)?)
    }
}

/// The dispatch table behind a chronology: one field per field type, one duration field per
/// duration type.
#[derive(Debug, Clone)]
pub struct FieldTable {
    fields: [FieldRef; DateTimeFieldType::COUNT],
    durations: [DurationRef; DurationFieldType::COUNT],
}

impl FieldTable {
    pub fn new(
        mut field: impl FnMut(DateTimeFieldType) -> FieldRef,
        mut duration: impl FnMut(DurationFieldType) -> DurationRef,
    ) -> Self {
        FieldTable {
            durations: std::array::from_fn(|i| duration(DurationFieldType::ALL[i])),
            fields: std::array::from_fn(|i| field(DateTimeFieldType::ALL[i])),
        }
    }

    pub fn field(&self, field_type: DateTimeFieldType) -> &FieldRef {
        &self.fields[field_type.index()]
    }

    pub fn duration(&self, duration_type: DurationFieldType) -> &DurationRef {
        &self.durations[duration_type.index()]
    }

    pub fn set_field(&mut self, field: FieldRef) {
        let index = field.field_type().index();
        self.fields[index] = field;
    }

    pub fn set_duration(&mut self, duration: DurationRef) {
        let index = duration.field_type().index();
        self.durations[index] = duration;
    }
}
