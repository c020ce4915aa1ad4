//! The Julian and Gregorian calendars, as proleptic back-ends.
//!
//! [`Calendar`] does the date arithmetic on UTC milliseconds. Years are numbered
//! astronomically here: year 0 is 1 BC in both calendars. The Julian back-end hides year 0
//! in its exposed year fields, see [`BasicChronology`].

pub use chronology::BasicChronology;

mod chronology;
mod fields;
mod normalized_date;

use num_integer::Integer;

use crate::div_rem::checked_add;
use crate::error::{verify_bounds, Error, Result};
use crate::field::{MILLIS_PER_DAY, MILLIS_PER_WEEK};
use normalized_date::{CycleRules, NormalizedDate, GREGORIAN_RULES, JULIAN_RULES};

const DAYS_IN_MONTH: [i32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

// Up to and including February 28.
const MILLIS_TO_MARCH: i64 = (31 + 28) * MILLIS_PER_DAY;
const MILLIS_IN_52_WEEKS: i64 = 52 * MILLIS_PER_WEEK;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarSystem {
    Julian,
    Gregorian,
}

impl CalendarSystem {
    fn rules(self) -> &'static CycleRules {
        match self {
            CalendarSystem::Julian => &JULIAN_RULES,
            CalendarSystem::Gregorian => &GREGORIAN_RULES,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CalendarSystem::Julian => "Julian",
            CalendarSystem::Gregorian => "Gregorian",
        }
    }

    /// Earliest year whose every instant fits in a signed 64-bit millisecond count.
    pub fn min_year(self) -> i32 {
        match self {
            CalendarSystem::Julian => -292_269_054,
            CalendarSystem::Gregorian => -292_275_054,
        }
    }

    /// Latest year whose every instant fits in a signed 64-bit millisecond count.
    pub fn max_year(self) -> i32 {
        match self {
            CalendarSystem::Julian => 292_272_992,
            CalendarSystem::Gregorian => 292_278_993,
        }
    }

    pub fn is_leap_year(self, year: i32) -> bool {
        match self {
            CalendarSystem::Julian => year & 3 == 0,
            CalendarSystem::Gregorian => {
                year & 3 == 0 && (year % 100 != 0 || year % 400 == 0)
            }
        }
    }

    fn average_millis_per_year(self) -> i64 {
        let days_per_cycle = self.rules().cycle_days * MILLIS_PER_DAY;
        days_per_cycle / self.rules().cycle_years
    }
}

/// One calendar system with its week rules.
///
/// Week 1 of a week-year is the first week (Monday to Sunday) that has at least
/// `min_days_in_first_week` days in the new year. With the ISO value of 4 that is the week
/// holding the first Thursday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Calendar {
    system: CalendarSystem,
    min_days_in_first_week: i32,
}

impl Calendar {
    pub fn new(system: CalendarSystem, min_days_in_first_week: i32) -> Result<Calendar> {
        if !(1..=7).contains(&min_days_in_first_week) {
            return Err(Error::Configuration(format!(
                "invalid minimum days in first week: {}",
                min_days_in_first_week
            )));
        }
        Ok(Calendar {
            system,
            min_days_in_first_week,
        })
    }

    pub fn system(&self) -> CalendarSystem {
        self.system
    }

    pub fn min_days_in_first_week(&self) -> i32 {
        self.min_days_in_first_week
    }

    pub fn min_year(&self) -> i32 {
        self.system.min_year()
    }

    pub fn max_year(&self) -> i32 {
        self.system.max_year()
    }

    pub fn is_leap_year(&self, year: i32) -> bool {
        self.system.is_leap_year(year)
    }

    pub fn average_millis_per_year(&self) -> i64 {
        self.system.average_millis_per_year()
    }

    pub(crate) fn verify_year(&self, field: &'static str, year: i64) -> Result<i32> {
        verify_bounds(
            field,
            year,
            i64::from(self.min_year()),
            i64::from(self.max_year()),
        )?;
        Ok(year as i32)
    }

    // Days since 1970-01-01 of a valid date.
    fn day_number(&self, year: i32, month: i32, day: i32) -> i64 {
        NormalizedDate::from_date(self.system.rules(), i64::from(year), month as u8, day as u8)
            .to_day(self.system.rules())
    }

    fn day_millis(days: i64) -> i64 {
        days.saturating_mul(MILLIS_PER_DAY)
    }

    /// Year, month of year and day of month.
    pub fn ymd(&self, instant: i64) -> (i32, i32, i32) {
        let days = instant.div_floor(&MILLIS_PER_DAY);
        let (year, month, day) =
            NormalizedDate::from_day(self.system.rules(), days).to_date(self.system.rules());
        (year as i32, i32::from(month), i32::from(day))
    }

    pub fn year(&self, instant: i64) -> i32 {
        self.ymd(instant).0
    }

    pub fn month_of_year(&self, instant: i64) -> i32 {
        self.ymd(instant).1
    }

    pub fn day_of_month(&self, instant: i64) -> i32 {
        self.ymd(instant).2
    }

    pub fn day_of_year(&self, instant: i64) -> i32 {
        let year = self.year(instant);
        ((instant - self.year_start(year)) / MILLIS_PER_DAY) as i32 + 1
    }

    /// Monday is 1, Sunday is 7.
    pub fn day_of_week(&self, instant: i64) -> i32 {
        // 1970-01-01 was a Thursday.
        ((instant.div_floor(&MILLIS_PER_DAY) + 3).mod_floor(&7) + 1) as i32
    }

    pub fn millis_of_day(&self, instant: i64) -> i64 {
        instant.mod_floor(&MILLIS_PER_DAY)
    }

    pub fn days_in_year(&self, year: i32) -> i32 {
        if self.is_leap_year(year) {
            366
        } else {
            365
        }
    }

    pub fn days_in_year_month(&self, year: i32, month: i32) -> i32 {
        if month == 2 && self.is_leap_year(year) {
            29
        } else {
            DAYS_IN_MONTH[(month - 1) as usize]
        }
    }

    /// The most days the month can have in any year.
    pub fn days_in_month_max(&self, month: i32) -> i32 {
        if month == 2 {
            29
        } else {
            DAYS_IN_MONTH[(month - 1) as usize]
        }
    }

    /// Midnight on January 1.
    pub fn year_start(&self, year: i32) -> i64 {
        Self::day_millis(self.day_number(year, 1, 1))
    }

    pub(crate) fn year_month_start(&self, year: i32, month: i32) -> i64 {
        Self::day_millis(self.day_number(year, month, 1))
    }

    /// Midnight at the start of the date, after checking each component.
    pub fn date_millis(&self, year: i32, month: i32, day: i32) -> Result<i64> {
        self.verify_year("year", i64::from(year))?;
        verify_bounds("monthOfYear", i64::from(month), 1, 12)?;
        verify_bounds(
            "dayOfMonth",
            i64::from(day),
            1,
            i64::from(self.days_in_year_month(year, month)),
        )?;
        Ok(Self::day_millis(self.day_number(year, month, day)))
    }

    /// Move to another year, keeping the day of year and the time of day. Days after
    /// February 28 shift by one when only one of the two years is a leap year, so that
    /// March 1 stays March 1.
    pub fn set_year(&self, instant: i64, year: i32) -> Result<i64> {
        self.verify_year("year", i64::from(year))?;
        let this_year = self.year(instant);
        let mut day_of_year = self.day_of_year(instant);
        let millis_of_day = self.millis_of_day(instant);
        if day_of_year > 31 + 28 {
            match (self.is_leap_year(this_year), self.is_leap_year(year)) {
                (true, false) => day_of_year -= 1,
                (false, true) => day_of_year += 1,
                _ => {}
            }
        }
        let date = self.year_start(year) + i64::from(day_of_year - 1) * MILLIS_PER_DAY;
        checked_add(date, millis_of_day, "setting the year")
    }

    pub fn add_years(&self, instant: i64, years: i64) -> Result<i64> {
        if years == 0 {
            return Ok(instant);
        }
        let year = self.verify_year("year", i64::from(self.year(instant)).saturating_add(years))?;
        self.set_year(instant, year)
    }

    /// Add months, clamping the day of month to the length of the target month.
    pub fn add_months(&self, instant: i64, months: i64) -> Result<i64> {
        if months == 0 {
            return Ok(instant);
        }
        let (year, month, day) = self.ymd(instant);
        let total = (i64::from(year) * 12 + i64::from(month - 1))
            .checked_add(months)
            .ok_or(Error::Overflow("adding months"))?;
        let (year, month) = total.div_mod_floor(&12);
        let year = self.verify_year("year", year)?;
        self.with_year_month(instant, year, month as i32 + 1, day)
    }

    pub fn set_month(&self, instant: i64, month: i32) -> Result<i64> {
        verify_bounds("monthOfYear", i64::from(month), 1, 12)?;
        let (year, _, day) = self.ymd(instant);
        self.with_year_month(instant, year, month, day)
    }

    fn with_year_month(&self, instant: i64, year: i32, month: i32, day: i32) -> Result<i64> {
        let day = day.min(self.days_in_year_month(year, month));
        let date = Self::day_millis(self.day_number(year, month, day));
        checked_add(date, self.millis_of_day(instant), "setting the month")
    }

    /// Whole years from `subtrahend` to `minuend`. A leap day in only one of the two years
    /// does not count against the remainder.
    pub fn year_difference(&self, minuend: i64, subtrahend: i64) -> i64 {
        if minuend < subtrahend {
            return -self.year_difference(subtrahend, minuend);
        }
        let minuend_year = self.year(minuend);
        let subtrahend_year = self.year(subtrahend);
        let mut minuend_rem = minuend - self.year_start(minuend_year);
        let mut subtrahend_rem = subtrahend - self.year_start(subtrahend_year);

        if subtrahend_rem >= MILLIS_TO_MARCH {
            if self.is_leap_year(subtrahend_year) {
                if !self.is_leap_year(minuend_year) {
                    subtrahend_rem -= MILLIS_PER_DAY;
                }
            } else if minuend_rem >= MILLIS_TO_MARCH && self.is_leap_year(minuend_year) {
                minuend_rem -= MILLIS_PER_DAY;
            }
        }

        let mut difference = i64::from(minuend_year) - i64::from(subtrahend_year);
        if minuend_rem < subtrahend_rem {
            difference -= 1;
        }
        difference
    }

    /// Whole months from `subtrahend` to `minuend`. The last day of a short month counts as a
    /// full month against a later day of a longer one.
    pub fn month_difference(&self, minuend: i64, subtrahend: i64) -> i64 {
        if minuend < subtrahend {
            return -self.month_difference(subtrahend, minuend);
        }
        let (minuend_year, minuend_month, minuend_day) = self.ymd(minuend);
        let (subtrahend_year, subtrahend_month, subtrahend_day) = self.ymd(subtrahend);
        let mut difference = (i64::from(minuend_year) - i64::from(subtrahend_year)) * 12
            + i64::from(minuend_month - subtrahend_month);

        let mut subtrahend = subtrahend;
        if minuend_day == self.days_in_year_month(minuend_year, minuend_month)
            && subtrahend_day > minuend_day
        {
            subtrahend -= i64::from(subtrahend_day - minuend_day) * MILLIS_PER_DAY;
        }

        let minuend_rem = minuend - self.year_month_start(minuend_year, minuend_month);
        let subtrahend_rem = subtrahend - self.year_month_start(subtrahend_year, subtrahend_month);
        if minuend_rem < subtrahend_rem {
            difference -= 1;
        }
        difference
    }

    /// Midnight on the Monday that starts week 1 of the week-year.
    pub fn first_week_start(&self, year: i32) -> i64 {
        let jan1 = self.year_start(year);
        let jan1_day_of_week = i64::from(self.day_of_week(jan1));
        if jan1_day_of_week > i64::from(8 - self.min_days_in_first_week) {
            // January 1 belongs to the last week of the previous week-year.
            jan1.saturating_add((8 - jan1_day_of_week) * MILLIS_PER_DAY)
        } else {
            jan1.saturating_sub((jan1_day_of_week - 1) * MILLIS_PER_DAY)
        }
    }

    pub fn weeks_in_year(&self, year: i32) -> i32 {
        ((self.first_week_start(year + 1) - self.first_week_start(year)) / MILLIS_PER_WEEK) as i32
    }

    pub fn week_of_weekyear(&self, instant: i64) -> i32 {
        let year = self.year(instant);
        let first = self.first_week_start(year);
        if instant < first {
            return self.weeks_in_year(year - 1);
        }
        if instant >= self.first_week_start(year + 1) {
            return 1;
        }
        ((instant - first) / MILLIS_PER_WEEK) as i32 + 1
    }

    pub fn weekyear(&self, instant: i64) -> i32 {
        let year = self.year(instant);
        match self.week_of_weekyear(instant) {
            1 => self.year(instant.saturating_add(MILLIS_PER_WEEK)),
            week if week > 51 => self.year(instant.saturating_sub(2 * MILLIS_PER_WEEK)),
            _ => year,
        }
    }

    /// Midnight on the Monday of the instant's week.
    pub fn week_floor(&self, instant: i64) -> i64 {
        // Weeks since the epoch start on Thursday; shift so they start on Monday.
        let into_week =
            (instant.mod_floor(&MILLIS_PER_WEEK) + 3 * MILLIS_PER_DAY) % MILLIS_PER_WEEK;
        instant.saturating_sub(into_week)
    }

    /// Midnight on the Monday that starts the instant's week-year.
    pub fn weekyear_floor(&self, instant: i64) -> i64 {
        let floor = self.week_floor(instant);
        let week = self.week_of_weekyear(floor);
        floor.saturating_sub(i64::from(week - 1) * MILLIS_PER_WEEK)
    }

    /// Move to another week-year, keeping the week number (clamped to the target week-year's
    /// length), the day of week and the time of day.
    pub fn set_weekyear(&self, instant: i64, weekyear: i32) -> Result<i64> {
        self.verify_year("weekyear", i64::from(weekyear))?;
        let this_weekyear = self.weekyear(instant);
        if this_weekyear == weekyear {
            return Ok(instant);
        }
        let day_of_week = self.day_of_week(instant);
        let max_weeks = self
            .weeks_in_year(this_weekyear)
            .min(self.weeks_in_year(weekyear));
        let week = self.week_of_weekyear(instant).min(max_weeks);

        let mut work = self.set_year(instant, weekyear)?;
        let work_weekyear = self.weekyear(work);
        if work_weekyear < weekyear {
            work += MILLIS_PER_WEEK;
        } else if work_weekyear > weekyear {
            work -= MILLIS_PER_WEEK;
        }
        work += i64::from(week - self.week_of_weekyear(work)) * MILLIS_PER_WEEK;
        work += i64::from(day_of_week - self.day_of_week(work)) * MILLIS_PER_DAY;
        Ok(work)
    }

    pub fn add_weekyears(&self, instant: i64, weekyears: i64) -> Result<i64> {
        if weekyears == 0 {
            return Ok(instant);
        }
        let target = i64::from(self.weekyear(instant)).saturating_add(weekyears);
        let weekyear = self.verify_year("weekyear", target)?;
        self.set_weekyear(instant, weekyear)
    }

    /// Whole week-years from `subtrahend` to `minuend`. A 53rd week in only the subtrahend's
    /// week-year does not count against the remainder.
    pub fn weekyear_difference(&self, minuend: i64, subtrahend: i64) -> i64 {
        if minuend < subtrahend {
            return -self.weekyear_difference(subtrahend, minuend);
        }
        let minuend_weekyear = self.weekyear(minuend);
        let subtrahend_weekyear = self.weekyear(subtrahend);
        let minuend_rem = minuend - self.weekyear_floor(minuend);
        let mut subtrahend_rem = subtrahend - self.weekyear_floor(subtrahend);
        if subtrahend_rem >= MILLIS_IN_52_WEEKS && self.weeks_in_year(minuend_weekyear) <= 52 {
            subtrahend_rem -= MILLIS_PER_WEEK;
        }
        let mut difference = i64::from(minuend_weekyear) - i64::from(subtrahend_weekyear);
        if minuend_rem < subtrahend_rem {
            difference -= 1;
        }
        difference
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gregorian() -> Calendar {
        Calendar::new(CalendarSystem::Gregorian, 4).unwrap()
    }

    fn julian() -> Calendar {
        Calendar::new(CalendarSystem::Julian, 4).unwrap()
    }

    #[test]
    fn min_days_is_validated() {
        assert!(Calendar::new(CalendarSystem::Gregorian, 0).is_err());
        assert!(Calendar::new(CalendarSystem::Julian, 8).is_err());
        assert_eq!(julian().min_days_in_first_week(), 4);
    }

    #[test]
    fn leap_years() {
        let g = CalendarSystem::Gregorian;
        let j = CalendarSystem::Julian;
        assert!(g.is_leap_year(2000));
        assert!(!g.is_leap_year(1700));
        assert!(g.is_leap_year(-4));
        assert!(j.is_leap_year(1700));
        assert!(j.is_leap_year(0));
        assert!(!j.is_leap_year(1582));
        assert!(j.is_leap_year(-4));
    }

    #[test]
    fn dates() {
        let g = gregorian();
        assert_eq!(g.ymd(0), (1970, 1, 1));
        assert_eq!(g.ymd(-1), (1969, 12, 31));
        assert_eq!(g.date_millis(1582, 10, 15), Ok(-12_219_292_800_000));
        assert_eq!(g.day_of_week(0), 4);
        assert_eq!(g.day_of_year(g.date_millis(2000, 12, 31).unwrap()), 366);
        assert!(g.date_millis(1700, 2, 29).is_err());

        let j = julian();
        // The day before the Gregorian calendar was adopted.
        assert_eq!(
            j.date_millis(1582, 10, 4),
            Ok(-12_219_292_800_000 - MILLIS_PER_DAY)
        );
        assert!(j.date_millis(1700, 2, 29).is_ok());
        assert!(j.date_millis(1582, 2, 29).is_err());
    }

    #[test]
    fn set_year_keeps_march_first() {
        let g = gregorian();
        let t = g.date_millis(2000, 3, 1).unwrap() + 1234;
        let moved = g.set_year(t, 2001).unwrap();
        assert_eq!(g.ymd(moved), (2001, 3, 1));
        assert_eq!(g.millis_of_day(moved), 1234);

        let leap_day = g.date_millis(2000, 2, 29).unwrap();
        assert_eq!(g.ymd(g.set_year(leap_day, 2001).unwrap()), (2001, 2, 28));
        assert!(g.set_year(0, 300_000_000).is_err());
    }

    #[test]
    fn months_clamp_the_day() {
        let g = gregorian();
        let jan31 = g.date_millis(2001, 1, 31).unwrap();
        assert_eq!(g.ymd(g.add_months(jan31, 1).unwrap()), (2001, 2, 28));
        assert_eq!(g.ymd(g.add_months(jan31, -2).unwrap()), (2000, 11, 30));
        assert_eq!(g.ymd(g.add_months(jan31, 13).unwrap()), (2002, 2, 28));
        assert_eq!(g.ymd(g.set_month(jan31, 4).unwrap()), (2001, 4, 30));
    }

    #[test]
    fn differences() {
        let g = gregorian();
        let a = g.date_millis(2000, 2, 29).unwrap();
        let b = g.date_millis(2001, 2, 28).unwrap();
        assert_eq!(g.year_difference(b, a), 1);
        assert_eq!(g.year_difference(a, b), -1);
        let c = g.date_millis(2001, 2, 27).unwrap();
        assert_eq!(g.year_difference(c, a), 0);

        let jan31 = g.date_millis(2001, 1, 31).unwrap();
        let feb28 = g.date_millis(2001, 2, 28).unwrap();
        assert_eq!(g.month_difference(feb28, jan31), 1);
        assert_eq!(g.month_difference(feb28 - 1, jan31), 0);
        assert_eq!(g.month_difference(jan31, feb28), -1);
    }

    #[test]
    fn week_years() {
        let g = gregorian();
        // 2008-12-29 is Monday of week 1 of 2009.
        let t = g.date_millis(2008, 12, 29).unwrap();
        assert_eq!(g.week_of_weekyear(t), 1);
        assert_eq!(g.weekyear(t), 2009);
        assert_eq!(g.first_week_start(2009), t);
        assert_eq!(g.week_floor(t + 5 * MILLIS_PER_DAY), t);
        assert_eq!(g.weekyear_floor(t + 20 * MILLIS_PER_DAY), t);
        // 2010-01-03 is a Sunday in week 53 of 2009.
        let t = g.date_millis(2010, 1, 3).unwrap();
        assert_eq!(g.week_of_weekyear(t), 53);
        assert_eq!(g.weekyear(t), 2009);
        assert_eq!(g.weeks_in_year(2009), 53);
        assert_eq!(g.weeks_in_year(2010), 52);

        // Week 53 does not exist in 2010, so the week number is clamped.
        let moved = g.set_weekyear(t, 2010).unwrap();
        assert_eq!(g.weekyear(moved), 2010);
        assert_eq!(g.week_of_weekyear(moved), 52);
        assert_eq!(g.day_of_week(moved), 7);

        let a = g.date_millis(2009, 6, 1).unwrap();
        let b = g.add_weekyears(a, 3).unwrap();
        assert_eq!(g.weekyear(b), 2012);
        assert_eq!(g.weekyear_difference(b, a), 3);
        assert_eq!(g.weekyear_difference(b - 1, a), 2);
    }

    #[test]
    fn weeks_at_the_ends_of_time() {
        for c in [gregorian(), julian()] {
            for t in [i64::MIN, i64::MIN + 1, i64::MAX - 1, i64::MAX] {
                let week = c.week_of_weekyear(t);
                assert!((1..=53).contains(&week));
                assert!(c.week_floor(t) <= t);
                assert!(c.weekyear_floor(t) <= t);
                c.weekyear(t);
            }
            assert_eq!(c.week_floor(i64::MIN), i64::MIN);
            assert!(c.weekyear_difference(i64::MAX, i64::MIN) > 0);
        }
        let t = gregorian().date_millis(2010, 1, 3).unwrap();
        assert_eq!(gregorian().week_floor(t), t - 6 * MILLIS_PER_DAY);
    }

    #[test]
    fn julian_weeks_near_cutover() {
        let j = julian();
        let t = j.date_millis(1582, 10, 4).unwrap();
        assert_eq!(j.day_of_week(t), 4);
        assert_eq!(j.weekyear(t), 1582);
        assert_eq!(j.week_of_weekyear(t), 40);
    }
}
