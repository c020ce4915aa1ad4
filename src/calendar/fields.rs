use num_integer::Integer;

use crate::calendar::Calendar;
use crate::div_rem::checked_add;
use crate::error::{verify_bounds, Error, Result};
use crate::field::{
    DateTimeField, DateTimeFieldType, DurationField, DurationFieldType, DurationRef,
    MILLIS_PER_DAY, MILLIS_PER_WEEK,
};
use crate::locale::{Locale, Names};
use crate::partial::Partial;

/// The fields whose values depend on the calendar rules rather than on fixed lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    Era,
    YearOfEra,
    CenturyOfEra,
    YearOfCentury,
    Year,
    DayOfYear,
    MonthOfYear,
    DayOfMonth,
    WeekyearOfCentury,
    Weekyear,
    WeekOfWeekyear,
}

impl Kind {
    fn field_type(self) -> DateTimeFieldType {
        match self {
            Kind::Era => DateTimeFieldType::Era,
            Kind::YearOfEra => DateTimeFieldType::YearOfEra,
            Kind::CenturyOfEra => DateTimeFieldType::CenturyOfEra,
            Kind::YearOfCentury => DateTimeFieldType::YearOfCentury,
            Kind::Year => DateTimeFieldType::Year,
            Kind::DayOfYear => DateTimeFieldType::DayOfYear,
            Kind::MonthOfYear => DateTimeFieldType::MonthOfYear,
            Kind::DayOfMonth => DateTimeFieldType::DayOfMonth,
            Kind::WeekyearOfCentury => DateTimeFieldType::WeekyearOfCentury,
            Kind::Weekyear => DateTimeFieldType::Weekyear,
            Kind::WeekOfWeekyear => DateTimeFieldType::WeekOfWeekyear,
        }
    }
}

fn year_of_era(year: i32) -> i32 {
    if year <= 0 {
        1 - year
    } else {
        year
    }
}

// Value of a field in a partial, taking overridden values into account.
fn partial_value(
    partial: &Partial,
    values: Option<&[i32]>,
    field_type: DateTimeFieldType,
) -> Option<i32> {
    match values {
        None => partial.get(field_type),
        Some(values) => partial
            .field_types()
            .position(|t| t == field_type)
            .and_then(|i| values.get(i).copied()),
    }
}

/// A date field of a [`Calendar`].
#[derive(Debug)]
pub(crate) struct CalendarField {
    kind: Kind,
    calendar: Calendar,
    unit: DurationRef,
    range: Option<DurationRef>,
    leap: Option<DurationRef>,
}

impl CalendarField {
    pub(crate) fn new(
        kind: Kind,
        calendar: Calendar,
        unit: DurationRef,
        range: Option<DurationRef>,
    ) -> Self {
        CalendarField {
            kind,
            calendar,
            unit,
            range,
            leap: None,
        }
    }

    pub(crate) fn with_leap(mut self, leap: DurationRef) -> Self {
        self.leap = Some(leap);
        self
    }

    fn names(&self) -> Option<Names> {
        match self.kind {
            Kind::Era => Some(Names::Era),
            Kind::MonthOfYear => Some(Names::Month),
            _ => None,
        }
    }

    fn set_year_of_era(&self, instant: i64, year_of_era: i64) -> Result<i64> {
        let year = if self.calendar.year(instant) <= 0 {
            1 - year_of_era
        } else {
            year_of_era
        };
        let year = self.calendar.verify_year(self.name(), year)?;
        self.calendar.set_year(instant, year)
    }

    fn shift(&self, instant: i64, from: i32, to: i32, unit_millis: i64) -> Result<i64> {
        checked_add(
            instant,
            i64::from(to - from) * unit_millis,
            "setting a field",
        )
    }

    fn max_for(&self, partial: &Partial, values: Option<&[i32]>) -> i32 {
        let year = partial_value(partial, values, DateTimeFieldType::Year);
        match self.kind {
            Kind::DayOfYear => year.map_or(366, |y| self.calendar.days_in_year(y)),
            Kind::DayOfMonth => {
                let month = partial_value(partial, values, DateTimeFieldType::MonthOfYear)
                    .filter(|m| (1..=12).contains(m));
                match (year, month) {
                    (Some(y), Some(m)) => self.calendar.days_in_year_month(y, m),
                    (None, Some(m)) => self.calendar.days_in_month_max(m),
                    _ => 31,
                }
            }
            Kind::WeekOfWeekyear => {
                partial_value(partial, values, DateTimeFieldType::Weekyear)
                    .map_or(53, |y| self.calendar.weeks_in_year(y))
            }
            _ => self.maximum_value(),
        }
    }
}

impl DateTimeField for CalendarField {
    fn field_type(&self) -> DateTimeFieldType {
        self.kind.field_type()
    }

    fn get(&self, instant: i64) -> i32 {
        let c = &self.calendar;
        match self.kind {
            Kind::Era => i32::from(c.year(instant) > 0),
            Kind::YearOfEra => year_of_era(c.year(instant)),
            Kind::CenturyOfEra => (year_of_era(c.year(instant)) + 99) / 100,
            Kind::YearOfCentury => (year_of_era(c.year(instant)) + 99) % 100 + 1,
            Kind::Year => c.year(instant),
            Kind::DayOfYear => c.day_of_year(instant),
            Kind::MonthOfYear => c.month_of_year(instant),
            Kind::DayOfMonth => c.day_of_month(instant),
            Kind::WeekyearOfCentury => c.weekyear(instant).mod_floor(&100) + 1,
            Kind::Weekyear => c.weekyear(instant),
            Kind::WeekOfWeekyear => c.week_of_weekyear(instant),
        }
    }

    fn value_as_text(&self, value: i32, locale: &Locale) -> String {
        match self.names() {
            Some(names) => names.text(value, locale),
            None => value.to_string(),
        }
    }

    fn value_as_short_text(&self, value: i32, locale: &Locale) -> String {
        match self.names() {
            Some(names) => names.short_text(value, locale),
            None => value.to_string(),
        }
    }

    fn maximum_text_length(&self, locale: &Locale) -> usize {
        match self.names() {
            Some(names) => names.max_text_length(locale),
            None => {
                // Negative years need room for the sign.
                let min = self.minimum_value().to_string().len();
                min.max(self.maximum_value().to_string().len())
            }
        }
    }

    fn maximum_short_text_length(&self, locale: &Locale) -> usize {
        match self.names() {
            Some(names) => names.max_short_text_length(locale),
            None => self.maximum_text_length(locale),
        }
    }

    fn value_from_text(&self, text: &str, locale: &Locale) -> Result<i32> {
        let value = match self.names() {
            Some(names) => names.value(text, locale),
            None => text.trim().parse().ok(),
        };
        value.ok_or_else(|| Error::IllegalFieldText {
            field: self.name(),
            text: text.to_string(),
        })
    }

    fn set(&self, instant: i64, value: i32) -> Result<i64> {
        let c = &self.calendar;
        let v = i64::from(value);
        let current = self.get(instant);
        match self.kind {
            Kind::Era => {
                verify_bounds(self.name(), v, 0, 1)?;
                if current == value {
                    return Ok(instant);
                }
                // Keep the year of era: 5 AD becomes 5 BC.
                let year = c.verify_year(self.name(), 1 - i64::from(c.year(instant)))?;
                c.set_year(instant, year)
            }
            Kind::YearOfEra => {
                verify_bounds(self.name(), v, 1, i64::from(self.maximum_value()))?;
                self.set_year_of_era(instant, v)
            }
            Kind::CenturyOfEra => {
                verify_bounds(self.name(), v, 1, i64::from(self.maximum_value()))?;
                let shifted = i64::from(year_of_era(c.year(instant))) + 99;
                self.set_year_of_era(instant, v * 100 + shifted % 100 - 99)
            }
            Kind::YearOfCentury => {
                verify_bounds(self.name(), v, 1, 100)?;
                let shifted = i64::from(year_of_era(c.year(instant))) + 99;
                self.set_year_of_era(instant, shifted / 100 * 100 + v - 100)
            }
            Kind::Year => c.set_year(instant, value),
            Kind::DayOfYear => {
                let max = c.days_in_year(c.year(instant));
                verify_bounds(self.name(), v, 1, i64::from(max))?;
                self.shift(instant, current, value, MILLIS_PER_DAY)
            }
            Kind::MonthOfYear => c.set_month(instant, value),
            Kind::DayOfMonth => {
                let (year, month, _) = c.ymd(instant);
                let max = c.days_in_year_month(year, month);
                verify_bounds(self.name(), v, 1, i64::from(max))?;
                self.shift(instant, current, value, MILLIS_PER_DAY)
            }
            Kind::WeekyearOfCentury => {
                verify_bounds(self.name(), v, 1, 100)?;
                let century = i64::from(c.weekyear(instant)).div_floor(&100);
                let weekyear = c.verify_year(self.name(), century * 100 + v - 1)?;
                c.set_weekyear(instant, weekyear)
            }
            Kind::Weekyear => c.set_weekyear(instant, value),
            Kind::WeekOfWeekyear => {
                let max = c.weeks_in_year(c.weekyear(instant));
                verify_bounds(self.name(), v, 1, i64::from(max))?;
                self.shift(instant, current, value, MILLIS_PER_WEEK)
            }
        }
    }

    fn is_leap(&self, instant: i64) -> bool {
        let c = &self.calendar;
        match self.kind {
            Kind::Year => c.is_leap_year(c.year(instant)),
            Kind::MonthOfYear => {
                let (year, month, _) = c.ymd(instant);
                month == 2 && c.is_leap_year(year)
            }
            Kind::DayOfMonth => {
                let (_, month, day) = c.ymd(instant);
                month == 2 && day == 29
            }
            Kind::Weekyear => c.weeks_in_year(c.weekyear(instant)) > 52,
            _ => false,
        }
    }

    fn leap_amount(&self, instant: i64) -> i32 {
        i32::from(self.is_leap(instant))
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
        match self.kind {
            Kind::Era => 0,
            Kind::Year | Kind::Weekyear => self.calendar.min_year(),
            _ => 1,
        }
    }

    fn maximum_value(&self) -> i32 {
        let max_year = self.calendar.max_year();
        match self.kind {
            Kind::Era => 1,
            Kind::YearOfEra | Kind::Year | Kind::Weekyear => max_year,
            Kind::CenturyOfEra => (max_year + 99) / 100,
            Kind::YearOfCentury | Kind::WeekyearOfCentury => 100,
            Kind::DayOfYear => 366,
            Kind::MonthOfYear => 12,
            Kind::DayOfMonth => 31,
            Kind::WeekOfWeekyear => 53,
        }
    }

    fn maximum_value_at(&self, instant: i64) -> i32 {
        let c = &self.calendar;
        match self.kind {
            Kind::DayOfYear => c.days_in_year(c.year(instant)),
            Kind::DayOfMonth => {
                let (year, month, _) = c.ymd(instant);
                c.days_in_year_month(year, month)
            }
            Kind::WeekOfWeekyear => c.weeks_in_year(c.weekyear(instant)),
            _ => self.maximum_value(),
        }
    }

    fn maximum_value_for_partial(&self, partial: &Partial) -> i32 {
        self.max_for(partial, None)
    }

    fn maximum_value_for_partial_values(&self, partial: &Partial, values: &[i32]) -> i32 {
        self.max_for(partial, Some(values))
    }

    fn round_floor(&self, instant: i64) -> Result<i64> {
        let c = &self.calendar;
        match self.kind {
            Kind::Era => {
                if self.get(instant) == 1 {
                    Ok(c.year_start(1))
                } else {
                    Ok(i64::MIN)
                }
            }
            Kind::Year | Kind::YearOfEra | Kind::YearOfCentury => {
                Ok(c.year_start(c.year(instant)))
            }
            Kind::CenturyOfEra => {
                // Centuries start on year 1, 101, 201 and so on.
                let century = i64::from(self.get(instant));
                let start = self.set_year_of_era(instant, century * 100 - 99)?;
                Ok(c.year_start(c.year(start)))
            }
            Kind::MonthOfYear => {
                let (year, month, _) = c.ymd(instant);
                Ok(c.year_month_start(year, month))
            }
            Kind::DayOfMonth | Kind::DayOfYear => {
                Ok(instant.saturating_sub(instant.mod_floor(&MILLIS_PER_DAY)))
            }
            Kind::Weekyear | Kind::WeekyearOfCentury => Ok(c.weekyear_floor(instant)),
            Kind::WeekOfWeekyear => Ok(c.week_floor(instant)),
        }
    }

    fn round_ceiling(&self, instant: i64) -> Result<i64> {
        if self.kind == Kind::Era {
            return if self.get(instant) == 0 {
                Ok(self.calendar.year_start(1))
            } else {
                Ok(i64::MAX)
            };
        }
        let floor = self.round_floor(instant)?;
        if floor == instant {
            Ok(instant)
        } else {
            self.add(floor, 1)
        }
    }
}

/// Years, months and week-years: units whose length depends on where they are added.
#[derive(Debug)]
pub(crate) struct CalendarDurationField {
    field_type: DurationFieldType,
    calendar: Calendar,
}

impl CalendarDurationField {
    pub(crate) fn new(field_type: DurationFieldType, calendar: Calendar) -> Self {
        assert!(matches!(
            field_type,
            DurationFieldType::Years | DurationFieldType::Months | DurationFieldType::Weekyears
        ));
        CalendarDurationField {
            field_type,
            calendar,
        }
    }
}

impl DurationField for CalendarDurationField {
    fn field_type(&self) -> DurationFieldType {
        self.field_type
    }

    fn is_precise(&self) -> bool {
        false
    }

    fn unit_millis(&self) -> i64 {
        match self.field_type {
            DurationFieldType::Months => self.calendar.average_millis_per_year() / 12,
            _ => self.calendar.average_millis_per_year(),
        }
    }

    fn add_long(&self, instant: i64, value: i64) -> Result<i64> {
        match self.field_type {
            DurationFieldType::Months => self.calendar.add_months(instant, value),
            DurationFieldType::Weekyears => self.calendar.add_weekyears(instant, value),
            _ => self.calendar.add_years(instant, value),
        }
    }

    fn difference_as_long(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        Ok(match self.field_type {
            DurationFieldType::Months => self.calendar.month_difference(minuend, subtrahend),
            DurationFieldType::Weekyears => {
                self.calendar.weekyear_difference(minuend, subtrahend)
            }
            _ => self.calendar.year_difference(minuend, subtrahend),
        })
    }
}
