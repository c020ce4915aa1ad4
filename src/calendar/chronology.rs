use std::sync::Arc;

use crate::calendar::fields::{CalendarDurationField, CalendarField, Kind};
use crate::calendar::{Calendar, CalendarSystem};
use crate::chronology::Chronology;
use crate::div_rem::checked_add;
use crate::error::{verify_bounds, Error, Result};
use crate::field::{
    DateTimeFieldType, DurationFieldType, DurationRef, FieldRef, FieldTable,
    PreciseDurationField, PreciseField, ScaledDurationField, SkipZeroField,
    UnsupportedDurationField, ZeroIsMaxField, MILLIS_PER_DAY, MILLIS_PER_HALFDAY,
    MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND, MILLIS_PER_WEEK,
};
use crate::locale::Names;
use crate::zone::TimeZone;

/// A proleptic Julian or Gregorian chronology in UTC.
#[derive(Debug, Clone)]
pub struct BasicChronology {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    calendar: Calendar,
    fields: FieldTable,
}

impl BasicChronology {
    pub fn gregorian(min_days_in_first_week: i32) -> Result<BasicChronology> {
        Self::new(Calendar::new(
            CalendarSystem::Gregorian,
            min_days_in_first_week,
        )?)
    }

    /// The Julian calendar, which numbers 1 BC as year -1 in its year fields.
    pub fn julian(min_days_in_first_week: i32) -> Result<BasicChronology> {
        Self::new(Calendar::new(CalendarSystem::Julian, min_days_in_first_week)?)
    }

    fn new(calendar: Calendar) -> Result<BasicChronology> {
        Ok(BasicChronology {
            shared: Arc::new(Shared {
                fields: assemble(calendar),
                calendar,
            }),
        })
    }

    pub fn calendar(&self) -> &Calendar {
        &self.shared.calendar
    }

    pub fn system(&self) -> CalendarSystem {
        self.shared.calendar.system()
    }

    // The Julian year fields skip zero; the calendar underneath counts 1 BC as 0.
    fn calendar_year(&self, year: i32) -> Result<i32> {
        if self.system() == CalendarSystem::Gregorian {
            return Ok(year);
        }
        match year {
            0 => Err(Error::IllegalFieldValue {
                field: DateTimeFieldType::Year.name(),
                value: 0,
            }),
            year if year < 0 => Ok(year + 1),
            year => Ok(year),
        }
    }
}

impl Chronology for BasicChronology {
    fn zone(&self) -> TimeZone {
        TimeZone::utc()
    }

    fn fields(&self) -> &FieldTable {
        &self.shared.fields
    }

    fn minimum_days_in_first_week(&self) -> i32 {
        self.shared.calendar.min_days_in_first_week()
    }

    fn date_time_millis(
        &self,
        year: i32,
        month: i32,
        day: i32,
        millis_of_day: i32,
    ) -> Result<i64> {
        verify_bounds(
            DateTimeFieldType::MillisOfDay.name(),
            i64::from(millis_of_day),
            0,
            MILLIS_PER_DAY - 1,
        )?;
        let year = self.calendar_year(year)?;
        let date = self.shared.calendar.date_millis(year, month, day)?;
        checked_add(date, i64::from(millis_of_day), "building an instant")
    }

    fn date_time_millis_hms(
        &self,
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millis: i32,
    ) -> Result<i64> {
        verify_bounds(DateTimeFieldType::HourOfDay.name(), i64::from(hour), 0, 23)?;
        verify_bounds(DateTimeFieldType::MinuteOfHour.name(), i64::from(minute), 0, 59)?;
        verify_bounds(DateTimeFieldType::SecondOfMinute.name(), i64::from(second), 0, 59)?;
        verify_bounds(DateTimeFieldType::MillisOfSecond.name(), i64::from(millis), 0, 999)?;
        let millis_of_day = i64::from(hour) * MILLIS_PER_HOUR
            + i64::from(minute) * MILLIS_PER_MINUTE
            + i64::from(second) * MILLIS_PER_SECOND
            + i64::from(millis);
        self.date_time_millis(year, month, day, millis_of_day as i32)
    }
}

fn precise(duration_type: DurationFieldType, unit_millis: i64) -> DurationRef {
    Arc::new(PreciseDurationField::new(duration_type, unit_millis))
}

fn assemble(calendar: Calendar) -> FieldTable {
    let millis = precise(DurationFieldType::Millis, 1);
    let seconds = precise(DurationFieldType::Seconds, MILLIS_PER_SECOND);
    let minutes = precise(DurationFieldType::Minutes, MILLIS_PER_MINUTE);
    let hours = precise(DurationFieldType::Hours, MILLIS_PER_HOUR);
    let halfdays = precise(DurationFieldType::Halfdays, MILLIS_PER_HALFDAY);
    let days = precise(DurationFieldType::Days, MILLIS_PER_DAY);
    let weeks = precise(DurationFieldType::Weeks, MILLIS_PER_WEEK);
    let months: DurationRef = Arc::new(CalendarDurationField::new(
        DurationFieldType::Months,
        calendar,
    ));
    let years: DurationRef = Arc::new(CalendarDurationField::new(
        DurationFieldType::Years,
        calendar,
    ));
    let weekyears: DurationRef = Arc::new(CalendarDurationField::new(
        DurationFieldType::Weekyears,
        calendar,
    ));
    let centuries: DurationRef = Arc::new(ScaledDurationField::new(
        years.clone(),
        DurationFieldType::Centuries,
        100,
    ));
    let weekyear_centuries: DurationRef = Arc::new(ScaledDurationField::new(
        weekyears.clone(),
        DurationFieldType::Centuries,
        100,
    ));
    let eras: DurationRef = Arc::new(UnsupportedDurationField::new(DurationFieldType::Eras));

    let time = |t: DateTimeFieldType, unit: &DurationRef, range: &DurationRef| -> PreciseField {
        PreciseField::new(t, unit.clone(), range.clone())
    };
    let hour_of_day: FieldRef = Arc::new(time(DateTimeFieldType::HourOfDay, &hours, &days));
    let hour_of_halfday: FieldRef =
        Arc::new(time(DateTimeFieldType::HourOfHalfday, &hours, &halfdays));
    let date = |kind: Kind, unit: &DurationRef, range: Option<&DurationRef>| {
        CalendarField::new(kind, calendar, unit.clone(), range.cloned())
    };

    let mut year: FieldRef = Arc::new(date(Kind::Year, &years, None).with_leap(days.clone()));
    let mut weekyear: FieldRef =
        Arc::new(date(Kind::Weekyear, &weekyears, None).with_leap(weeks.clone()));
    if calendar.system() == CalendarSystem::Julian {
        year = Arc::new(SkipZeroField::new(year));
        weekyear = Arc::new(SkipZeroField::new(weekyear));
    }

    FieldTable::new(
        |t| -> FieldRef {
            use DateTimeFieldType::*;
            match t {
                MillisOfSecond => Arc::new(time(t, &millis, &seconds)),
                MillisOfDay => Arc::new(time(t, &millis, &days)),
                SecondOfMinute => Arc::new(time(t, &seconds, &minutes)),
                SecondOfDay => Arc::new(time(t, &seconds, &days)),
                MinuteOfHour => Arc::new(time(t, &minutes, &hours)),
                MinuteOfDay => Arc::new(time(t, &minutes, &days)),
                HourOfDay => hour_of_day.clone(),
                HourOfHalfday => hour_of_halfday.clone(),
                ClockhourOfDay => Arc::new(ZeroIsMaxField::new(hour_of_day.clone(), t)),
                ClockhourOfHalfday => Arc::new(ZeroIsMaxField::new(hour_of_halfday.clone(), t)),
                HalfdayOfDay => Arc::new(time(t, &halfdays, &days).with_names(Names::Halfday)),
                DayOfWeek => Arc::new(
                    time(t, &days, &weeks)
                        .with_offset(1, 3)
                        .with_names(Names::Weekday),
                ),
                Era => Arc::new(date(Kind::Era, &eras, None)),
                YearOfEra => Arc::new(date(Kind::YearOfEra, &years, Some(&eras))),
                CenturyOfEra => Arc::new(date(Kind::CenturyOfEra, &centuries, Some(&eras))),
                YearOfCentury => Arc::new(date(Kind::YearOfCentury, &years, Some(&centuries))),
                Year => year.clone(),
                DayOfYear => Arc::new(
                    date(Kind::DayOfYear, &days, Some(&years)).with_leap(days.clone()),
                ),
                MonthOfYear => Arc::new(
                    date(Kind::MonthOfYear, &months, Some(&years)).with_leap(days.clone()),
                ),
                DayOfMonth => Arc::new(
                    date(Kind::DayOfMonth, &days, Some(&months)).with_leap(days.clone()),
                ),
                WeekyearOfCentury => Arc::new(date(
                    Kind::WeekyearOfCentury,
                    &weekyears,
                    Some(&weekyear_centuries),
                )),
                Weekyear => weekyear.clone(),
                WeekOfWeekyear => Arc::new(date(Kind::WeekOfWeekyear, &weeks, Some(&weekyears))),
            }
        },
        |t| {
            use DurationFieldType::*;
            match t {
                Eras => eras.clone(),
                Centuries => centuries.clone(),
                Weekyears => weekyears.clone(),
                Years => years.clone(),
                Months => months.clone(),
                Weeks => weeks.clone(),
                Days => days.clone(),
                Halfdays => halfdays.clone(),
                Hours => hours.clone(),
                Minutes => minutes.clone(),
                Seconds => seconds.clone(),
                Millis => millis.clone(),
            }
        },
    )
}
