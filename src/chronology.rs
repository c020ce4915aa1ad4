use std::fmt::Debug;

use crate::error::Result;
use crate::field::{DateTimeFieldType, DurationFieldType, DurationRef, FieldRef, FieldTable};
use crate::partial::Partial;
use crate::zone::TimeZone;

macro_rules! field_accessors {
    ($($name:ident => $field_type:ident),* $(,)?) => {
        $(
            fn $name(&self) -> &FieldRef {
                self.fields().field(DateTimeFieldType::$field_type)
            }
        )*
    };
}

macro_rules! duration_accessors {
    ($($name:ident => $duration_type:ident),* $(,)?) => {
        $(
            fn $name(&self) -> &DurationRef {
                self.fields().duration(DurationFieldType::$duration_type)
            }
        )*
    };
}

/// A calendar system: the rules that turn instants into field values and back.
pub trait Chronology: Debug + Send + Sync {
    fn zone(&self) -> TimeZone;

    fn fields(&self) -> &FieldTable;

    fn minimum_days_in_first_week(&self) -> i32;

    /// The instant of a date and a time of day given in milliseconds.
    fn date_time_millis(&self, year: i32, month: i32, day: i32, millis_of_day: i32)
        -> Result<i64>;

    #[allow(clippy::too_many_arguments)]
    fn date_time_millis_hms(
        &self,
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millis: i32,
    ) -> Result<i64>;

    fn field(&self, field_type: DateTimeFieldType) -> &FieldRef {
        self.fields().field(field_type)
    }

    fn duration_field(&self, duration_type: DurationFieldType) -> &DurationRef {
        self.fields().duration(duration_type)
    }

    field_accessors! {
        era => Era,
        year_of_era => YearOfEra,
        century_of_era => CenturyOfEra,
        year_of_century => YearOfCentury,
        year => Year,
        day_of_year => DayOfYear,
        month_of_year => MonthOfYear,
        day_of_month => DayOfMonth,
        weekyear_of_century => WeekyearOfCentury,
        weekyear => Weekyear,
        week_of_weekyear => WeekOfWeekyear,
        day_of_week => DayOfWeek,
        halfday_of_day => HalfdayOfDay,
        hour_of_halfday => HourOfHalfday,
        clockhour_of_halfday => ClockhourOfHalfday,
        clockhour_of_day => ClockhourOfDay,
        hour_of_day => HourOfDay,
        minute_of_day => MinuteOfDay,
        minute_of_hour => MinuteOfHour,
        second_of_day => SecondOfDay,
        second_of_minute => SecondOfMinute,
        millis_of_day => MillisOfDay,
        millis_of_second => MillisOfSecond,
    }

    duration_accessors! {
        eras => Eras,
        centuries => Centuries,
        weekyears => Weekyears,
        years => Years,
        months => Months,
        weeks => Weeks,
        days => Days,
        halfdays => Halfdays,
        hours => Hours,
        minutes => Minutes,
        seconds => Seconds,
        millis => Millis,
    }

    /// Set each field of the partial on the instant, in the partial's order.
    fn set_partial(&self, partial: &Partial, instant: i64) -> Result<i64> {
        partial
            .field_types()
            .zip(partial.values())
            .try_fold(instant, |instant, (field_type, value)| {
                self.field(field_type).set(instant, value)
            })
    }

    /// Read the partial's fields from the instant.
    fn get_partial(&self, partial: &Partial, instant: i64) -> Vec<i32> {
        partial
            .field_types()
            .map(|field_type| self.field(field_type).get(instant))
            .collect()
    }
}
