use std::fmt;
use std::sync::Arc;

use crate::calendar::BasicChronology;
use crate::chronology::Chronology;
use crate::cutover::CutoverChronology;
use crate::error::{Error, Result};
use crate::field::{
    DateTimeField, DateTimeFieldType, DurationField, DurationFieldType, DurationRef, FieldRef,
};
use crate::locale::Locale;
use crate::partial::Partial;

/// The two calendars on either side of the cutover, and the conversions between them.
pub(crate) struct CutoverSplit {
    pub(crate) julian: BasicChronology,
    pub(crate) gregorian: BasicChronology,
    pub(crate) cutover: i64,
    /// Milliseconds skipped at the cutover: the Julian date of the cutover read as a Gregorian
    /// date lies this far before it.
    pub(crate) gap: i64,
}

impl fmt::Debug for CutoverSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CutoverSplit")
            .field("cutover", &self.cutover)
            .field("gap", &self.gap)
            .finish_non_exhaustive()
    }
}

impl CutoverSplit {
    pub(crate) fn new(
        julian: BasicChronology,
        gregorian: BasicChronology,
        cutover: i64,
    ) -> Result<CutoverSplit> {
        if julian.minimum_days_in_first_week() != gregorian.minimum_days_in_first_week() {
            return Err(Error::Configuration(format!(
                "julian and gregorian disagree on minimum days in first week ({} and {})",
                julian.minimum_days_in_first_week(),
                gregorian.minimum_days_in_first_week()
            )));
        }
        let shifted = convert_by_year(&julian, &gregorian, cutover)?;
        Ok(CutoverSplit {
            gap: cutover - shifted,
            julian,
            gregorian,
            cutover,
        })
    }

    pub(crate) fn julian_to_gregorian_by_year(&self, instant: i64) -> Result<i64> {
        convert_by_year(&self.julian, &self.gregorian, instant)
    }

    pub(crate) fn gregorian_to_julian_by_year(&self, instant: i64) -> Result<i64> {
        convert_by_year(&self.gregorian, &self.julian, instant)
    }

    pub(crate) fn julian_to_gregorian_by_weekyear(&self, instant: i64) -> Result<i64> {
        convert_by_weekyear(&self.julian, &self.gregorian, instant)
    }

    pub(crate) fn gregorian_to_julian_by_weekyear(&self, instant: i64) -> Result<i64> {
        convert_by_weekyear(&self.gregorian, &self.julian, instant)
    }
}

// Same year, month, day and time of day, on the other calendar.
fn convert_by_year(from: &BasicChronology, to: &BasicChronology, instant: i64) -> Result<i64> {
    to.date_time_millis(
        from.year().get(instant),
        from.month_of_year().get(instant),
        from.day_of_month().get(instant),
        from.millis_of_day().get(instant),
    )
}

// Same weekyear, week, weekday and time of day, on the other calendar.
fn convert_by_weekyear(from: &BasicChronology, to: &BasicChronology, instant: i64) -> Result<i64> {
    let converted = to.weekyear().set(0, from.weekyear().get(instant))?;
    let converted = to
        .week_of_weekyear()
        .set(converted, from.week_of_weekyear().get(instant))?;
    let converted = to
        .day_of_week()
        .set(converted, from.day_of_week().get(instant))?;
    to.millis_of_day()
        .set(converted, from.millis_of_day().get(instant))
}

/// A Julian and a Gregorian field with the instant where one hands over to the other.
#[derive(Debug, Clone)]
struct Sides {
    split: Arc<CutoverSplit>,
    julian: FieldRef,
    gregorian: FieldRef,
    cutover: i64,
    by_weekyear: bool,
}

impl Sides {
    fn at(&self, instant: i64) -> &FieldRef {
        if instant >= self.cutover {
            &self.gregorian
        } else {
            &self.julian
        }
    }

    fn gregorian_to_julian(&self, instant: i64) -> Result<i64> {
        if self.by_weekyear {
            self.split.gregorian_to_julian_by_weekyear(instant)
        } else {
            self.split.gregorian_to_julian_by_year(instant)
        }
    }

    fn julian_to_gregorian(&self, instant: i64) -> Result<i64> {
        if self.by_weekyear {
            self.split.julian_to_gregorian_by_weekyear(instant)
        } else {
            self.split.julian_to_gregorian_by_year(instant)
        }
    }

    // A Gregorian result that fell before the cutover, by more than the gap, is moved onto
    // the Julian calendar.
    fn settle_gregorian(&self, instant: i64) -> Result<i64> {
        if instant < self.cutover && instant.saturating_add(self.split.gap) < self.cutover {
            self.gregorian_to_julian(instant)
        } else {
            Ok(instant)
        }
    }

    fn settle_julian(&self, instant: i64) -> Result<i64> {
        if instant >= self.cutover && instant.saturating_sub(self.split.gap) >= self.cutover {
            self.julian_to_gregorian(instant)
        } else {
            Ok(instant)
        }
    }

    /// Adds on the side of the starting instant and carries the result across the cutover.
    fn add_across(&self, instant: i64, value: i64) -> Result<i64> {
        if instant < self.cutover {
            let moved = self.julian.add_long(instant, value)?;
            return self.settle_julian(moved);
        }
        let mut moved = self.gregorian.add_long(instant, value)?;
        if moved < self.cutover && moved.saturating_add(self.split.gap) < self.cutover {
            // Julian has no year zero, so a Gregorian result at or before it is one further back.
            let gregorian = &self.split.gregorian;
            let year = if self.by_weekyear {
                gregorian.weekyear()
            } else {
                gregorian.year()
            };
            if year.get(moved) <= 0 {
                moved = year.add(moved, -1)?;
            }
            moved = self.gregorian_to_julian(moved)?;
        }
        Ok(moved)
    }

    /// Measures on the side of the subtrahend, after moving the minuend onto that calendar.
    fn difference_across(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        match (minuend >= self.cutover, subtrahend >= self.cutover) {
            (true, true) => self.gregorian.difference_as_long(minuend, subtrahend),
            (false, false) => self.julian.difference_as_long(minuend, subtrahend),
            (true, false) => {
                let minuend = self.gregorian_to_julian(minuend)?;
                self.julian.difference_as_long(minuend, subtrahend)
            }
            (false, true) => {
                let minuend = self.julian_to_gregorian(minuend)?;
                self.gregorian.difference_as_long(minuend, subtrahend)
            }
        }
    }
}

/// A field that reads the Julian calendar before the cutover and the Gregorian one from it on.
///
/// Imprecise fields (years, months, weekyears) also add and measure across the cutover: a
/// result landing on the other side is reprojected onto that side's calendar. Other fields add
/// on the Gregorian time line, which is continuous.
#[derive(Debug)]
pub(crate) struct CutoverField {
    sides: Sides,
    unit: DurationRef,
    range: Option<DurationRef>,
    leap: Option<DurationRef>,
    imprecise: bool,
}

impl CutoverField {
    pub(crate) fn new(split: &Arc<CutoverSplit>, julian: FieldRef, gregorian: FieldRef) -> Self {
        let range = gregorian
            .range_duration_field()
            .or_else(|| julian.range_duration_field());
        CutoverField {
            unit: gregorian.duration_field(),
            leap: gregorian.leap_duration_field(),
            range,
            sides: Sides {
                split: split.clone(),
                cutover: split.cutover,
                julian,
                gregorian,
                by_weekyear: false,
            },
            imprecise: false,
        }
    }

    /// An imprecise field. Without a unit of its own it gets a linked duration field that
    /// adds the way the field does.
    pub(crate) fn imprecise(
        split: &Arc<CutoverSplit>,
        julian: FieldRef,
        gregorian: FieldRef,
        unit: Option<&DurationRef>,
        by_weekyear: bool,
    ) -> Self {
        let mut field = CutoverField::new(split, julian, gregorian);
        field.imprecise = true;
        field.sides.by_weekyear = by_weekyear;
        field.unit = match unit {
            Some(unit) => unit.clone(),
            None => {
                let linked: DurationRef = Arc::new(LinkedDurationField {
                    inner: field.unit.clone(),
                    sides: field.sides.clone(),
                });
                linked
            }
        };
        field
    }

    /// Hand over at a different instant than the chronology's cutover.
    pub(crate) fn with_cutover(mut self, cutover: i64) -> Self {
        self.sides.cutover = cutover;
        self
    }

    pub(crate) fn by_weekyear(mut self) -> Self {
        self.sides.by_weekyear = true;
        self
    }

    pub(crate) fn with_range(mut self, range: &DurationRef) -> Self {
        self.range = Some(range.clone());
        self
    }

    fn cutover(&self) -> i64 {
        self.sides.cutover
    }

    fn julian(&self) -> &FieldRef {
        &self.sides.julian
    }

    fn gregorian(&self) -> &FieldRef {
        &self.sides.gregorian
    }
}

impl DateTimeField for CutoverField {
    fn field_type(&self) -> DateTimeFieldType {
        self.gregorian().field_type()
    }

    fn get(&self, instant: i64) -> i32 {
        self.sides.at(instant).get(instant)
    }

    fn as_text(&self, instant: i64, locale: &Locale) -> String {
        self.sides.at(instant).as_text(instant, locale)
    }

    fn as_short_text(&self, instant: i64, locale: &Locale) -> String {
        self.sides.at(instant).as_short_text(instant, locale)
    }

    fn value_as_text(&self, value: i32, locale: &Locale) -> String {
        self.gregorian().value_as_text(value, locale)
    }

    fn value_as_short_text(&self, value: i32, locale: &Locale) -> String {
        self.gregorian().value_as_short_text(value, locale)
    }

    fn maximum_text_length(&self, locale: &Locale) -> usize {
        self.julian()
            .maximum_text_length(locale)
            .max(self.gregorian().maximum_text_length(locale))
    }

    fn maximum_short_text_length(&self, locale: &Locale) -> usize {
        self.julian()
            .maximum_short_text_length(locale)
            .max(self.gregorian().maximum_short_text_length(locale))
    }

    fn add(&self, instant: i64, value: i32) -> Result<i64> {
        self.add_long(instant, i64::from(value))
    }

    fn add_long(&self, instant: i64, value: i64) -> Result<i64> {
        if self.imprecise {
            self.sides.add_across(instant, value)
        } else {
            self.gregorian().add_long(instant, value)
        }
    }

    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        if self.imprecise {
            self.sides.difference_across(minuend, subtrahend)
        } else {
            self.gregorian().difference_as_long(minuend, subtrahend)
        }
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        let (result, field) = if instant >= self.cutover() {
            let result = self.gregorian().set(instant, value)?;
            if result >= self.cutover() {
                return Ok(result);
            }
            (self.sides.settle_gregorian(result)?, self.gregorian())
        } else {
            let result = self.julian().set(instant, value)?;
            if result < self.cutover() {
                return Ok(result);
            }
            (self.sides.settle_julian(result)?, self.julian())
        };
        // Crossing the cutover must not change what the field shows.
        if self.get(result) != value {
            return Err(Error::IllegalFieldValue {
                field: field.name(),
                value: i64::from(value),
            });
        }
        Ok(result)
    }

    fn set_text(&self, instant: i64, text: &str, locale: &Locale) -> Result<i64> {
        if instant >= self.cutover() {
            let result = self.gregorian().set_text(instant, text, locale)?;
            self.sides.settle_gregorian(result)
        } else {
            let result = self.julian().set_text(instant, text, locale)?;
            self.sides.settle_julian(result)
        }
    }

    fn value_from_text(&self, text: &str, locale: &Locale) -> Result<i32> {
        self.gregorian().value_from_text(text, locale)
    }

    fn is_leap(&self, instant: i64) -> bool {
        self.sides.at(instant).is_leap(instant)
    }

    fn leap_amount(&self, instant: i64) -> i32 {
        self.sides.at(instant).leap_amount(instant)
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
        self.julian().minimum_value()
    }

    fn minimum_value_at(&self, instant: i64) -> i32 {
        if instant < self.cutover() {
            return self.julian().minimum_value_at(instant);
        }
        let gregorian = self.gregorian();
        let min = gregorian.minimum_value_at(instant);
        if self.imprecise {
            return min;
        }
        // The smallest Gregorian value may only exist before the cutover.
        match gregorian.set(instant, min) {
            Ok(lowest) if lowest < self.cutover() => gregorian.get(self.cutover()),
            _ => min,
        }
    }

    fn minimum_value_for_partial(&self, partial: &Partial) -> i32 {
        self.julian().minimum_value_for_partial(partial)
    }

    fn minimum_value_for_partial_values(&self, partial: &Partial, values: &[i32]) -> i32 {
        self.julian().minimum_value_for_partial_values(partial, values)
    }

    fn maximum_value(&self) -> i32 {
        self.gregorian().maximum_value()
    }

    fn maximum_value_at(&self, instant: i64) -> i32 {
        if instant >= self.cutover() {
            return self.gregorian().maximum_value_at(instant);
        }
        let julian = self.julian();
        let max = julian.maximum_value_at(instant);
        if self.imprecise {
            return max;
        }
        // The largest Julian value may only exist after the cutover.
        match julian.set(instant, max) {
            Ok(highest) if highest >= self.cutover() => julian
                .add(self.cutover(), -1)
                .map_or(max, |last| julian.get(last)),
            _ => max,
        }
    }

    fn maximum_value_for_partial(&self, partial: &Partial) -> i32 {
        match CutoverChronology::instance_utc().and_then(|chrono| chrono.set_partial(partial, 0)) {
            Ok(instant) => self.maximum_value_at(instant),
            Err(_) => self.gregorian().maximum_value_for_partial(partial),
        }
    }

    fn maximum_value_for_partial_values(&self, partial: &Partial, values: &[i32]) -> i32 {
        let chrono = match CutoverChronology::instance_utc() {
            Ok(chrono) => chrono,
            Err(_) => return self.gregorian().maximum_value_for_partial_values(partial, values),
        };
        // Values that do not fit where the earlier fields put the instant are left unset.
        let instant = partial
            .field_types()
            .zip(values)
            .fold(0, |instant, (field_type, &value)| {
                let field = chrono.field(field_type);
                if value <= field.maximum_value_at(instant) {
                    field.set(instant, value).unwrap_or(instant)
                } else {
                    instant
                }
            });
        self.maximum_value_at(instant)
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        if instant >= self.cutover() {
            let floor = self.gregorian().round_floor(instant)?;
            self.sides.settle_gregorian(floor)
        } else {
            self.julian().round_floor(instant)
        }
    }

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        if instant >= self.cutover() {
            self.gregorian().round_ceiling(instant)
        } else {
            let ceiling = self.julian().round_ceiling(instant)?;
            self.sides.settle_julian(ceiling)
        }
    }
}

/// The unit of an imprecise cutover field, adding and measuring the way the field does.
#[derive(Debug)]
struct LinkedDurationField {
    inner: DurationRef,
    sides: Sides,
}

impl DurationField for LinkedDurationField {
    fn field_type(&self) -> DurationFieldType {
        self.inner.field_type()
    }

    fn is_precise(&self) -> bool {
        self.inner.is_precise()
    }

    fn unit_millis(&self) -> i64 {
        self.inner.unit_millis()
    }

    fn add_long(&self, instant: i64, value: i64) -> Result<i64> {
        self.sides.add_across(instant, value)
    }

    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        self.sides.difference_across(minuend, subtrahend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cutover::DEFAULT_CUTOVER_MILLIS;
    use crate::field::MILLIS_PER_DAY;

    fn split() -> Arc<CutoverSplit> {
        Arc::new(
            CutoverSplit::new(
                BasicChronology::julian(4).unwrap(),
                BasicChronology::gregorian(4).unwrap(),
                DEFAULT_CUTOVER_MILLIS,
            )
            .unwrap(),
        )
    }

    #[test]
    fn gap_is_ten_days_in_1582() {
        assert_eq!(split().gap, 10 * MILLIS_PER_DAY);
    }

    #[test]
    fn min_days_must_agree() {
        let err = CutoverSplit::new(
            BasicChronology::julian(1).unwrap(),
            BasicChronology::gregorian(4).unwrap(),
            DEFAULT_CUTOVER_MILLIS,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn reprojection_keeps_the_date() {
        let split = split();
        let julian = split.julian.date_time_millis(1500, 2, 29, 3_600_000).unwrap();
        let gregorian = split.julian_to_gregorian_by_year(julian);
        assert!(gregorian.is_err(), "1500 is not a Gregorian leap year");

        let julian = split.julian.date_time_millis(1500, 3, 1, 3_600_000).unwrap();
        let gregorian = split.julian_to_gregorian_by_year(julian).unwrap();
        assert_eq!(gregorian, split.gregorian.date_time_millis(1500, 3, 1, 3_600_000).unwrap());
        assert_eq!(split.gregorian_to_julian_by_year(gregorian), Ok(julian));

        let julian = split.julian.date_time_millis(1582, 10, 4, 0).unwrap();
        let gregorian = split.julian_to_gregorian_by_weekyear(julian).unwrap();
        assert_eq!(split.gregorian.weekyear().get(gregorian), 1582);
        assert_eq!(split.gregorian.week_of_weekyear().get(gregorian), 40);
        assert_eq!(split.gregorian.day_of_week().get(gregorian), 4);
        assert_eq!(split.gregorian_to_julian_by_weekyear(gregorian), Ok(julian));
    }

    #[test]
    fn cutover_field_dispatches_on_the_instant() {
        let split = split();
        let field = CutoverField::new(
            &split,
            split.julian.day_of_month().clone(),
            split.gregorian.day_of_month().clone(),
        );
        let before = split.cutover - MILLIS_PER_DAY;
        assert_eq!(field.get(before), 4);
        assert_eq!(field.get(split.cutover), 15);
        assert_eq!(field.add(before, 1), Ok(split.cutover));
        assert_eq!(field.maximum_value_at(before), 4);
        assert_eq!(field.minimum_value_at(split.cutover), 15);
        assert_eq!(field.minimum_value_at(before), 1);
        assert_eq!(
            field.set(split.cutover, 10),
            Err(Error::IllegalFieldValue {
                field: "dayOfMonth",
                value: 10
            })
        );
        assert_eq!(field.set(split.cutover, 20), Ok(split.cutover + 5 * MILLIS_PER_DAY));
        assert_eq!(field.set(before, 1), Ok(before - 3 * MILLIS_PER_DAY));
    }

    #[test]
    fn linked_duration_adds_like_the_field() {
        let split = split();
        let year = CutoverField::imprecise(
            &split,
            split.julian.year().clone(),
            split.gregorian.year().clone(),
            None,
            false,
        );
        let years = year.duration_field();
        assert_eq!(years.field_type(), DurationFieldType::Years);
        assert!(!years.is_precise());

        let before = split.julian.date_time_millis(1582, 10, 4, 0).unwrap();
        let after = split.gregorian.date_time_millis(1583, 10, 4, 0).unwrap();
        assert_eq!(year.add(before, 1), Ok(after));
        assert_eq!(years.add(before, 1), Ok(after));
        assert_eq!(years.add(after, -1), Ok(before));
        assert_eq!(years.difference(after, before), Ok(1));
        assert_eq!(year.difference(before, after), Ok(-1));
    }
}
