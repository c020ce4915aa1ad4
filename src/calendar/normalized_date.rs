// Both calendars work in cycles. The Gregorian cycle is 400 years long and starts with a leap
// year; from then every 4th year is a leap year, except for every 100th year. So the year 1600 is a
// leap year but 1700, 1800 and 1900 are not. Each cycle has 100-3=97 leap years and 303 normal
// years, giving 97*366 + 303*365 = 146097 days. The Julian cycle is simply 4 years, or 1461 days,
// the last of which is a leap year.
//
// Having the leap year at the beginning of a cycle or quadrennium makes calculations more
// complicated, since we have to take into account the extra day in the initial period. By shifting
// values so that the leap day comes out at the end of each period we can just let the leap days
// come naturally as an "overflow", without any branches in control flow (other than the implicit
// branch in a call to min() inside clamped_div_rem). So we pick 2000-03-01 as zero point, right
// after the last leap day of the preceding cycle. We then have a quadrennium consisting of the
// "years"
// - 2000-03-01 to 2001-02-28
// - 2001-03-01 to 2002-02-28
// - 2002-03-01 to 2003-02-28
// - 2003-03-01 to 2004-02-29
//
// The year 2000 is a leap year in both calendars, so the same zero point works for both. The
// instants differ though: Julian 2000-03-01 is 13 days after Gregorian 2000-03-01.
//
// The Julian calendar has no centuries worth mentioning. It is modelled as a cycle of one
// "century" holding one quadrennium, which reduces the Gregorian arithmetic to the Julian one.

use num_integer::Integer;

use crate::div_rem::ClampedDivRem;

/// Period lengths of a calendar, in days and years.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct CycleRules {
    pub(crate) cycle_days: i64,
    pub(crate) cycle_years: i64,
    pub(crate) century_days: i64,
    pub(crate) century_years: i64,
    pub(crate) last_century: i64,
    pub(crate) quadrennium_days: i64,
    pub(crate) last_quadrennium: i64,
    /// Days from 1970-01-01 (Gregorian) to 2000-03-01 in this calendar.
    pub(crate) offset_days: i64,
}

pub(crate) const GREGORIAN_RULES: CycleRules = CycleRules {
    cycle_days: 97 * 366 + 303 * 365,
    cycle_years: 400,
    century_days: 24 * 366 + 76 * 365,
    century_years: 100,
    last_century: 3,
    quadrennium_days: 3 * 365 + 366,
    last_quadrennium: 24,
    offset_days: 11017,
};

pub(crate) const JULIAN_RULES: CycleRules = CycleRules {
    cycle_days: 3 * 365 + 366,
    cycle_years: 4,
    century_days: 3 * 365 + 366,
    century_years: 4,
    last_century: 0,
    quadrennium_days: 3 * 365 + 366,
    last_quadrennium: 0,
    offset_days: 11030,
};

const YEAR_DAYS: i64 = 365;
const QUADRENNIUM_YEARS: i64 = 4;

// Index 0 = March
const MONTH_STARTS: [i64; 13] = [0, 31, 61, 92, 122, 153, 184, 214, 245, 275, 306, 337, 65535];

fn month_from_day_offset(day: i64) -> usize {
    let mut month = (day / 30) as usize;
    if day < MONTH_STARTS[month] {
        // We have overshot the month. Move back.
        month -= 1;
    }
    month
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NormalizedDate {
    // Number of cycles since 2000-03-01.
    cycle: i64,
    // Number of centuries since the start of the cycle.
    century: i64,
    // Number of quadrennia (4-year periods) since the start of the century.
    quadrennium: i64,
    // Number of years since the start of the quadrennium (0-3).
    year: i64,
    // Number of days since the start of the year (0-365, where the year starts March 1).
    day: i64,
}

impl NormalizedDate {
    /// `day` counts days since 1970-01-01.
    pub(crate) fn from_day(rules: &CycleRules, day: i64) -> Self {
        let day = day - rules.offset_days;
        let (cycle, days_into_cycle) = day.div_mod_floor(&rules.cycle_days);

        // The first centuries of each cycle are normal centuries. The last one is a leap century
        // with one extra leap day at the end.
        let (century, days_into_century) =
            days_into_cycle.clamped_div_rem(rules.century_days, rules.last_century);

        // Each quadrennium has one extra leap day at the end. The last quadrennium of a normal
        // century lacks it, so it is one day short. This means we can do a normal division
        // (without clamped quotient).
        let (quadrennium, days_into_quadrennium) =
            days_into_century.div_rem(&rules.quadrennium_days);

        let (year, day) = days_into_quadrennium.clamped_div_rem(YEAR_DAYS, 3);

        NormalizedDate {
            cycle,
            century,
            quadrennium,
            year,
            day,
        }
    }

    pub(crate) fn to_day(self, rules: &CycleRules) -> i64 {
        self.cycle * rules.cycle_days
            + self.century * rules.century_days
            + self.quadrennium * rules.quadrennium_days
            + self.year * YEAR_DAYS
            + self.day
            + rules.offset_days
    }

    /// The month and day must already be valid for the year.
    pub(crate) fn from_date(rules: &CycleRules, year: i64, month: u8, day: u8) -> Self {
        assert!((1..=12).contains(&month));
        assert!((1..=31).contains(&day));

        let mut year = year;
        let mut month = month as i64 - 1;
        let day = day as i64 - 1;
        if month < 2 {
            month += 12;
            year -= 1;
        }
        month -= 2;
        year -= 2000;
        let (cycle, years_into_cycle) = year.div_mod_floor(&rules.cycle_years);
        let (century, years_into_century) =
            years_into_cycle.clamped_div_rem(rules.century_years, rules.last_century);
        let (quadrennium, year) =
            years_into_century.clamped_div_rem(QUADRENNIUM_YEARS, rules.last_quadrennium);

        NormalizedDate {
            cycle,
            century,
            quadrennium,
            year,
            day: MONTH_STARTS[month as usize] + day,
        }
    }

    /// Year, month (1-12) and day of month (1-31).
    pub(crate) fn to_date(self, rules: &CycleRules) -> (i64, u8, u8) {
        let mut year = 2000
            + rules.cycle_years * self.cycle
            + rules.century_years * self.century
            + QUADRENNIUM_YEARS * self.quadrennium
            + self.year;

        // NB: shifted so march is first. This way we don't need to care about how leap days
        // affect the month start since the leap day comes at the end of the year.
        let mut month = month_from_day_offset(self.day);
        let days_into_month = (self.day - MONTH_STARTS[month]) as u8;

        // Now adjust so march is represented as month 3 instead of month 1, since we want to be
        // based off of the new year on January 1.
        month += 2;
        if month >= 12 {
            month -= 12;
            year += 1;
        }
        (year, month as u8 + 1, days_into_month + 1)
    }
}
