//! The Julian calendar up to a cutover instant and the Gregorian calendar from it on.
//!
//! Dates before the cutover are read with Julian rules, dates on or after it with Gregorian
//! rules. The days in between (ten of them for the default cutover on 1582-10-15) do not exist.
//! Year, month and weekyear arithmetic that crosses the cutover keeps the calendar date and
//! moves it to the other calendar.

mod assembly;
mod field;

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace};

use crate::calendar::{BasicChronology, Calendar, CalendarSystem};
use crate::chronology::Chronology;
use crate::error::{Error, Result};
use crate::field::FieldTable;
use crate::instant::Instant;
use crate::partial::Partial;
use crate::zone::{zone_table, TimeZone};

use self::field::CutoverSplit;

/// 1582-10-15T00:00:00Z, the first day of the Gregorian calendar in Catholic Europe.
pub const DEFAULT_CUTOVER_MILLIS: i64 = -12_219_292_800_000;

pub const DEFAULT_MIN_DAYS_IN_FIRST_WEEK: i32 = 4;

/// A chronology that switches from the Julian to the Gregorian calendar at a cutover instant.
///
/// Instances are cached per zone, cutover and minimum days in the first week, so asking for
/// the same combination twice gives the same instance. Cloning is cheap.
#[derive(Clone)]
pub struct CutoverChronology {
    shared: Arc<Shared>,
}

struct Shared {
    zone: TimeZone,
    split: Arc<CutoverSplit>,
    fields: FieldTable,
    /// The UTC instance that a zoned instance reads its fields through.
    utc: Option<CutoverChronology>,
}

type Cache = HashMap<TimeZone, Vec<CutoverChronology>>;

lazy_static! {
    static ref INSTANCES: Mutex<Cache> = Mutex::new(HashMap::new());
}

impl CutoverChronology {
    /// Default cutover in the system time zone.
    pub fn instance_default() -> Result<CutoverChronology> {
        Self::instance_in(&TimeZone::system_default())
    }

    pub fn instance_in(zone: &TimeZone) -> Result<CutoverChronology> {
        Self::instance_with_cutover_millis(
            zone,
            DEFAULT_CUTOVER_MILLIS,
            DEFAULT_MIN_DAYS_IN_FIRST_WEEK,
        )
    }

    pub fn instance_utc() -> Result<CutoverChronology> {
        Self::instance_in(&TimeZone::utc())
    }

    pub fn instance(
        zone: &TimeZone,
        cutover: Instant,
        min_days_in_first_week: i32,
    ) -> Result<CutoverChronology> {
        Self::instance_with_cutover_millis(
            zone,
            cutover.millis_since_epoch(),
            min_days_in_first_week,
        )
    }

    /// The cached instance for the combination, assembled on first use.
    ///
    /// A cutover other than the default must fall on or after 0001-01-01 (Gregorian) in the
    /// zone.
    pub fn instance_with_cutover_millis(
        zone: &TimeZone,
        cutover_millis: i64,
        min_days_in_first_week: i32,
    ) -> Result<CutoverChronology> {
        if cutover_millis != DEFAULT_CUTOVER_MILLIS {
            let gregorian = Calendar::new(CalendarSystem::Gregorian, min_days_in_first_week)?;
            if gregorian.year(zone.utc_to_local(cutover_millis)?) <= 0 {
                return Err(Error::Configuration(
                    "cutover too early, must be on or after 0001-01-01".to_string(),
                ));
            }
        }
        let mut instances = INSTANCES
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        cached(&mut instances, zone, cutover_millis, min_days_in_first_week)
    }

    pub fn with_zone(&self, zone: &TimeZone) -> Result<CutoverChronology> {
        if *zone == self.shared.zone {
            return Ok(self.clone());
        }
        Self::instance_with_cutover_millis(
            zone,
            self.gregorian_cutover_millis(),
            self.minimum_days_in_first_week(),
        )
    }

    pub fn with_utc(&self) -> CutoverChronology {
        match &self.shared.utc {
            Some(utc) => utc.clone(),
            None => self.clone(),
        }
    }

    pub fn gregorian_cutover(&self) -> Instant {
        Instant::from_millis_since_epoch(self.shared.split.cutover)
    }

    pub fn gregorian_cutover_millis(&self) -> i64 {
        self.shared.split.cutover
    }

    /// Length of the run of days that the cutover skips.
    pub fn gap_duration_millis(&self) -> i64 {
        self.shared.split.gap
    }

    pub fn julian(&self) -> &BasicChronology {
        &self.shared.split.julian
    }

    pub fn gregorian(&self) -> &BasicChronology {
        &self.shared.split.gregorian
    }

    /// The Gregorian instant with the same year, month, day and time of day as a Julian one.
    pub fn julian_to_gregorian_by_year(&self, instant: i64) -> Result<i64> {
        self.shared.split.julian_to_gregorian_by_year(instant)
    }

    pub fn gregorian_to_julian_by_year(&self, instant: i64) -> Result<i64> {
        self.shared.split.gregorian_to_julian_by_year(instant)
    }

    /// The Gregorian instant with the same weekyear, week, weekday and time of day as a Julian
    /// one.
    pub fn julian_to_gregorian_by_weekyear(&self, instant: i64) -> Result<i64> {
        self.shared.split.julian_to_gregorian_by_weekyear(instant)
    }

    pub fn gregorian_to_julian_by_weekyear(&self, instant: i64) -> Result<i64> {
        self.shared.split.gregorian_to_julian_by_weekyear(instant)
    }

    /// True if both handles refer to the same cached instance.
    pub fn same_instance(&self, other: &CutoverChronology) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// Add to one field of a contiguous partial, such as year, month of year and day of month,
    /// carrying into the larger fields the way the chronology would.
    pub fn add_to_partial(
        &self,
        partial: &Partial,
        index: usize,
        values: &[i32],
        amount: i32,
    ) -> Result<Vec<i32>> {
        if amount == 0 {
            return Ok(values.to_vec());
        }
        let field_type = partial.field_type(index);
        if !partial.is_contiguous() {
            return Err(Error::UnsupportedField {
                field: field_type.name(),
                operation: "adding to a partial with gaps between its fields",
            });
        }
        let instant = partial
            .field_types()
            .zip(values)
            .try_fold(0, |instant, (t, &value)| self.field(t).set(instant, value))?;
        let instant = self.field(field_type).add(instant, amount)?;
        Ok(self.get_partial(partial, instant))
    }

    // Gregorian first, then Julian if the instant falls before the cutover. A Julian result on
    // or after the cutover is a date in the gap.
    fn resolve(
        &self,
        year: i32,
        month: i32,
        day: i32,
        build: impl Fn(&BasicChronology, i32) -> Result<i64>,
    ) -> Result<i64> {
        let split = &self.shared.split;
        let missing = || Error::NonexistentDateTime { year, month, day };
        let instant = match build(&split.gregorian, day) {
            Ok(instant) => instant,
            // February 29 of a Julian leap year that Gregorian rules skip.
            Err(_) if month == 2 && day == 29 => {
                let fallback = build(&split.gregorian, 28)?;
                if fallback >= split.cutover {
                    return Err(missing());
                }
                fallback
            }
            Err(err) => return Err(err),
        };
        if instant >= split.cutover {
            return Ok(instant);
        }
        let instant = build(&split.julian, day)?;
        if instant >= split.cutover {
            return Err(missing());
        }
        Ok(instant)
    }
}

fn cached(
    instances: &mut Cache,
    zone: &TimeZone,
    cutover: i64,
    min_days_in_first_week: i32,
) -> Result<CutoverChronology> {
    let found = instances.get(zone).and_then(|list| {
        list.iter().find(|chrono| {
            chrono.gregorian_cutover_millis() == cutover
                && chrono.minimum_days_in_first_week() == min_days_in_first_week
        })
    });
    if let Some(chrono) = found {
        trace!(zone = %zone, cutover, "cutover chronology cache hit");
        return Ok(chrono.clone());
    }

    let shared = if zone.is_utc() {
        let split = Arc::new(CutoverSplit::new(
            BasicChronology::julian(min_days_in_first_week)?,
            BasicChronology::gregorian(min_days_in_first_week)?,
            cutover,
        )?);
        Shared {
            zone: zone.clone(),
            fields: assembly::assemble(&split)?,
            split,
            utc: None,
        }
    } else {
        let utc = cached(instances, &TimeZone::utc(), cutover, min_days_in_first_week)?;
        Shared {
            zone: zone.clone(),
            fields: zone_table(utc.fields(), zone),
            split: utc.shared.split.clone(),
            utc: Some(utc),
        }
    };
    let chrono = CutoverChronology {
        shared: Arc::new(shared),
    };
    debug!(
        zone = %zone,
        cutover,
        gap = chrono.gap_duration_millis(),
        min_days_in_first_week,
        "assembled cutover chronology"
    );
    instances
        .entry(zone.clone())
        .or_default()
        .push(chrono.clone());
    Ok(chrono)
}

impl Chronology for CutoverChronology {
    fn zone(&self) -> TimeZone {
        self.shared.zone.clone()
    }

    fn fields(&self) -> &FieldTable {
        &self.shared.fields
    }

    fn minimum_days_in_first_week(&self) -> i32 {
        self.shared.split.gregorian.minimum_days_in_first_week()
    }

    fn date_time_millis(
        &self,
        year: i32,
        month: i32,
        day: i32,
        millis_of_day: i32,
    ) -> Result<i64> {
        if let Some(utc) = &self.shared.utc {
            let local = utc.date_time_millis(year, month, day, millis_of_day)?;
            return self.shared.zone.local_to_utc(local, true);
        }
        self.resolve(year, month, day, |chrono, day| {
            chrono.date_time_millis(year, month, day, millis_of_day)
        })
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
        if let Some(utc) = &self.shared.utc {
            let local = utc.date_time_millis_hms(year, month, day, hour, minute, second, millis)?;
            return self.shared.zone.local_to_utc(local, true);
        }
        self.resolve(year, month, day, |chrono, day| {
            chrono.date_time_millis_hms(year, month, day, hour, minute, second, millis)
        })
    }
}

impl PartialEq for CutoverChronology {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other)
            || (self.gregorian_cutover_millis() == other.gregorian_cutover_millis()
                && self.minimum_days_in_first_week() == other.minimum_days_in_first_week()
                && self.shared.zone == other.shared.zone)
    }
}

impl Eq for CutoverChronology {}

impl Hash for CutoverChronology {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shared.zone.hash(state);
        self.gregorian_cutover_millis().hash(state);
        self.minimum_days_in_first_week().hash(state);
    }
}

impl fmt::Debug for CutoverChronology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CutoverChronology")
            .field("zone", &self.shared.zone)
            .field("cutover", &self.gregorian_cutover_millis())
            .field("min_days_in_first_week", &self.minimum_days_in_first_week())
            .finish()
    }
}

impl fmt::Display for CutoverChronology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GJChronology[{}", self.shared.zone)?;
        let cutover = self.gregorian_cutover_millis();
        if cutover != DEFAULT_CUTOVER_MILLIS {
            let utc = self.with_utc();
            write!(
                f,
                ",cutover={:04}-{:02}-{:02}",
                utc.year().get(cutover),
                utc.month_of_year().get(cutover),
                utc.day_of_month().get(cutover)
            )?;
            if !matches!(utc.day_of_year().remainder(cutover), Ok(0)) {
                write!(
                    f,
                    "T{:02}:{:02}:{:02}.{:03}Z",
                    utc.hour_of_day().get(cutover),
                    utc.minute_of_hour().get(cutover),
                    utc.second_of_minute().get(cutover),
                    utc.millis_of_second().get(cutover)
                )?;
            }
        }
        let min_days = self.minimum_days_in_first_week();
        if min_days != DEFAULT_MIN_DAYS_IN_FIRST_WEEK {
            write!(f, ",mdfw={}", min_days)?;
        }
        f.write_str("]")
    }
}

/// What identifies an instance. Deserializing looks it up in the cache.
#[derive(Serialize, Deserialize)]
struct InstanceKey {
    zone: String,
    cutover: i64,
    min_days_in_first_week: i32,
}

impl Serialize for CutoverChronology {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        InstanceKey {
            zone: self.shared.zone.id().to_string(),
            cutover: self.gregorian_cutover_millis(),
            min_days_in_first_week: self.minimum_days_in_first_week(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CutoverChronology {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key = InstanceKey::deserialize(deserializer)?;
        let zone = TimeZone::for_id(&key.zone).map_err(serde::de::Error::custom)?;
        CutoverChronology::instance_with_cutover_millis(
            &zone,
            key.cutover,
            key.min_days_in_first_week,
        )
        .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;
    use crate::field::{DateTimeFieldType, MILLIS_PER_DAY, MILLIS_PER_HOUR};
    use crate::locale::Locale;

    fn utc() -> CutoverChronology {
        CutoverChronology::instance_utc().unwrap()
    }

    fn hash_of(chrono: &CutoverChronology) -> u64 {
        let mut hasher = DefaultHasher::new();
        chrono.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn the_day_after_october_4_1582_is_october_15() {
        let chrono = utc();
        let oct4 = chrono.date_time_millis(1582, 10, 4, 0).unwrap();
        assert_eq!(oct4, DEFAULT_CUTOVER_MILLIS - MILLIS_PER_DAY);
        assert_eq!(chrono.year().get(oct4), 1582);
        assert_eq!(chrono.day_of_month().get(oct4), 4);

        let next = chrono.days().add(oct4, 1).unwrap();
        assert_eq!(next, DEFAULT_CUTOVER_MILLIS);
        assert_eq!(chrono.year().get(next), 1582);
        assert_eq!(chrono.month_of_year().get(next), 10);
        assert_eq!(chrono.day_of_month().get(next), 15);
        assert_eq!(chrono.day_of_week().as_text(next, &Locale::ENGLISH), "Friday");
        assert_eq!(chrono.gap_duration_millis(), 10 * MILLIS_PER_DAY);
    }

    #[test]
    fn skipped_days_do_not_exist() {
        let chrono = utc();
        for day in 5..=14 {
            assert_eq!(
                chrono.date_time_millis(1582, 10, day, 0),
                Err(Error::NonexistentDateTime {
                    year: 1582,
                    month: 10,
                    day
                })
            );
        }
        assert_eq!(
            chrono.date_time_millis_hms(1582, 10, 10, 12, 30, 0, 0),
            Err(Error::NonexistentDateTime {
                year: 1582,
                month: 10,
                day: 10
            })
        );
        assert_eq!(
            chrono.date_time_millis_hms(1582, 10, 15, 12, 30, 0, 0),
            Ok(DEFAULT_CUTOVER_MILLIS + 12 * MILLIS_PER_HOUR + 30 * 60_000)
        );
    }

    #[test]
    fn february_29_follows_the_calendar_in_force() {
        let chrono = utc();
        let leap = chrono.date_time_millis(1500, 2, 29, 0).unwrap();
        assert_eq!(chrono.month_of_year().get(leap), 2);
        assert_eq!(chrono.day_of_month().get(leap), 29);
        assert_eq!(leap, chrono.julian().date_time_millis(1500, 2, 29, 0).unwrap());

        assert_eq!(
            chrono.date_time_millis(1700, 2, 29, 0),
            Err(Error::NonexistentDateTime {
                year: 1700,
                month: 2,
                day: 29
            })
        );
        assert!(chrono.date_time_millis(1600, 2, 29, 0).is_ok());
        // 1582 is not a leap year on either calendar.
        assert!(chrono.date_time_millis(1582, 2, 29, 0).is_err());
        assert!(chrono.date_time_millis(1500, 2, 30, 0).is_err());
    }

    #[test]
    fn year_zero_is_rejected() {
        let chrono = utc();
        assert!(chrono.date_time_millis(0, 6, 1, 0).is_err());
        let bc1 = chrono.date_time_millis(-1, 12, 31, 0).unwrap();
        let ad1 = chrono.date_time_millis(1, 1, 1, 0).unwrap();
        assert_eq!(ad1 - bc1, MILLIS_PER_DAY);
    }

    #[test]
    fn adding_a_year_across_the_cutover_keeps_the_date() {
        let chrono = utc();
        let oct4 = chrono.date_time_millis(1582, 10, 4, 0).unwrap();
        let later = chrono.year().add(oct4, 1).unwrap();
        assert_eq!(later, chrono.date_time_millis(1583, 10, 4, 0).unwrap());
        assert_eq!(later, chrono.gregorian().date_time_millis(1583, 10, 4, 0).unwrap());
        assert_eq!(chrono.year().get(later), 1583);
        assert_eq!(chrono.month_of_year().get(later), 10);
        assert_eq!(chrono.day_of_month().get(later), 4);
        assert_eq!(chrono.years().difference(later, oct4), Ok(1));
        assert_eq!(chrono.year().add(later, -1), Ok(oct4));

        let months = chrono.months().add(oct4, 1).unwrap();
        assert_eq!(months, chrono.date_time_millis(1582, 11, 4, 0).unwrap());
        assert_eq!(chrono.months().difference(months, oct4), Ok(1));
    }

    #[test]
    fn adding_years_back_past_year_one_skips_year_zero() {
        let chrono = utc();
        let cutover = DEFAULT_CUTOVER_MILLIS;
        let ad1 = chrono.year().add(cutover, -1581).unwrap();
        assert_eq!(chrono.year().get(ad1), 1);
        assert_eq!(chrono.month_of_year().get(ad1), 10);
        assert_eq!(chrono.day_of_month().get(ad1), 15);

        let bc1 = chrono.year().add(cutover, -1582).unwrap();
        assert_eq!(chrono.year().get(bc1), -1);
        assert_eq!(chrono.era().get(bc1), 0);
        assert_eq!(chrono.year_of_era().get(bc1), 1);
        assert_eq!(bc1, chrono.date_time_millis(-1, 10, 15, 0).unwrap());

        // And forward again from 1 BC, on the Julian side.
        assert_eq!(chrono.year().add(bc1, 1), chrono.date_time_millis(1, 10, 15, 0));
    }

    #[test]
    fn adding_weekyears_back_past_year_one_skips_year_zero() {
        let chrono = utc();
        let start = chrono.date_time_millis(1600, 6, 1, 0).unwrap();
        let week = chrono.week_of_weekyear().get(start);
        let day = chrono.day_of_week().get(start);

        let wy1 = chrono.weekyear().add(start, -1599).unwrap();
        assert_eq!(chrono.weekyear().get(wy1), 1);
        assert_eq!(chrono.week_of_weekyear().get(wy1), week);
        assert_eq!(chrono.day_of_week().get(wy1), day);

        let bc1 = chrono.weekyear().add(start, -1600).unwrap();
        assert_eq!(chrono.weekyear().get(bc1), -1);
        assert_eq!(chrono.week_of_weekyear().get(bc1), week);
        assert_eq!(chrono.day_of_week().get(bc1), day);
        assert_eq!(chrono.weekyears().difference(start, bc1), Ok(1600));
    }

    #[test]
    fn text_set_across_the_cutover() {
        let chrono = utc();
        let cutover = DEFAULT_CUTOVER_MILLIS;
        let sept = chrono
            .month_of_year()
            .set_text(cutover, "September", &Locale::ENGLISH)
            .unwrap();
        assert_eq!(sept, chrono.date_time_millis(1582, 9, 15, 0).unwrap());

        let oct4 = chrono.date_time_millis(1582, 10, 4, 0).unwrap();
        let nov4 = chrono
            .month_of_year()
            .set_text(oct4, "nov.", &Locale::FRENCH)
            .unwrap();
        assert_eq!(nov4, chrono.date_time_millis(1582, 11, 4, 0).unwrap());

        // Landing in the gap is left where it is, unchecked.
        let gap = chrono.day_of_month().set_text(cutover, "10", &Locale::ENGLISH).unwrap();
        assert_eq!(gap, cutover - 5 * MILLIS_PER_DAY);
        assert_eq!(chrono.day_of_month().get(gap), 30);
    }

    #[test]
    fn week_of_weekyear_uses_the_calendar_of_its_weekyear() {
        let chrono = utc();
        let julian_oct4 = chrono.date_time_millis(1582, 10, 4, 0).unwrap();
        assert_eq!(
            chrono.week_of_weekyear().get(julian_oct4),
            chrono.julian().week_of_weekyear().get(julian_oct4)
        );
        assert_eq!(chrono.week_of_weekyear().get(julian_oct4), 40);
        assert_eq!(chrono.weekyear().get(julian_oct4), 1582);

        // Weeks are counted on the Julian calendar until the first Gregorian weekyear starts.
        let cutover = DEFAULT_CUTOVER_MILLIS;
        assert_eq!(
            chrono.week_of_weekyear().get(cutover),
            chrono.julian().week_of_weekyear().get(cutover)
        );
        let later = chrono.date_time_millis(1583, 6, 1, 0).unwrap();
        assert_eq!(
            chrono.week_of_weekyear().get(later),
            chrono.gregorian().week_of_weekyear().get(later)
        );
        assert_eq!(
            chrono.weekyear().get(cutover),
            chrono.gregorian().weekyear().get(cutover)
        );
    }

    #[test]
    fn the_year_1582_is_short() {
        let chrono = utc();
        let cutover = DEFAULT_CUTOVER_MILLIS;
        // Julian October 5 is day 278, and counting continues on the Julian calendar.
        assert_eq!(chrono.day_of_year().get(cutover), 278);
        assert_eq!(chrono.day_of_year().maximum_value_at(cutover), 355);

        let oct4 = cutover - MILLIS_PER_DAY;
        assert_eq!(chrono.day_of_month().maximum_value_at(oct4), 4);
        assert_eq!(chrono.day_of_month().minimum_value_at(cutover), 15);
        assert_eq!(chrono.day_of_month().maximum_value_at(cutover), 31);

        let oct = Partial::new()
            .with(DateTimeFieldType::Year, 1582)
            .with(DateTimeFieldType::MonthOfYear, 10);
        assert_eq!(chrono.day_of_month().maximum_value_for_partial(&oct), 4);
        assert_eq!(
            chrono
                .day_of_month()
                .maximum_value_for_partial_values(&oct, &[1583, 10]),
            31
        );
    }

    #[test]
    fn setting_into_the_gap_fails() {
        let chrono = utc();
        let cutover = DEFAULT_CUTOVER_MILLIS;
        assert_eq!(
            chrono.day_of_month().set(cutover, 10),
            Err(Error::IllegalFieldValue {
                field: "dayOfMonth",
                value: 10
            })
        );
        assert_eq!(
            chrono.day_of_month().set(cutover, 20),
            chrono.date_time_millis(1582, 10, 20, 0)
        );
        // Far enough back to be read on the Julian calendar again.
        assert_eq!(
            chrono.day_of_month().set(cutover, 1),
            chrono.date_time_millis(1582, 10, 1, 0)
        );
        let sept = chrono.month_of_year().set(cutover, 9).unwrap();
        assert_eq!(sept, chrono.date_time_millis(1582, 9, 15, 0).unwrap());
    }

    #[test]
    fn rounding_across_the_cutover() {
        let chrono = utc();
        let cutover = DEFAULT_CUTOVER_MILLIS;
        let jan1 = chrono.date_time_millis(1582, 1, 1, 0).unwrap();
        assert_eq!(chrono.year().round_floor(cutover), Ok(jan1));
        let oct1 = chrono.date_time_millis(1582, 10, 1, 0).unwrap();
        assert_eq!(chrono.month_of_year().round_floor(cutover), Ok(oct1));
        let oct4_noon = cutover - 12 * MILLIS_PER_HOUR;
        let nov1 = chrono.date_time_millis(1582, 11, 1, 0).unwrap();
        assert_eq!(chrono.month_of_year().round_ceiling(oct4_noon), Ok(nov1));
        assert_eq!(chrono.day_of_month().round_ceiling(oct4_noon), Ok(cutover));
    }

    #[test]
    fn instances_are_cached() {
        let a = utc();
        let b = CutoverChronology::instance_in(&TimeZone::utc()).unwrap();
        assert!(a.same_instance(&b));
        assert_eq!(a, b);

        let c = CutoverChronology::instance(
            &TimeZone::utc(),
            Instant::from(DEFAULT_CUTOVER_MILLIS),
            4,
        )
        .unwrap();
        assert!(a.same_instance(&c));

        let d = CutoverChronology::instance_with_cutover_millis(
            &TimeZone::utc(),
            DEFAULT_CUTOVER_MILLIS,
            1,
        )
        .unwrap();
        assert!(!a.same_instance(&d));
        assert_ne!(a, d);
        assert_eq!(d.minimum_days_in_first_week(), 1);
        assert!(d.same_instance(&d.with_utc()));
    }

    #[test]
    fn equality_and_hash_follow_the_key() {
        let a = utc();
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        let zoned = a.with_zone(&TimeZone::fixed(MILLIS_PER_HOUR)).unwrap();
        assert_ne!(a, zoned);
        assert_eq!(
            zoned,
            CutoverChronology::instance_in(&TimeZone::for_id("+01:00").unwrap()).unwrap()
        );
        assert_eq!(
            hash_of(&zoned),
            hash_of(&CutoverChronology::instance_in(&TimeZone::fixed(MILLIS_PER_HOUR)).unwrap())
        );
    }

    #[test]
    fn cutover_must_be_in_year_one_or_later() {
        let gregorian = BasicChronology::gregorian(4).unwrap();
        let too_early = gregorian.date_time_millis(0, 12, 31, 0).unwrap();
        assert!(matches!(
            CutoverChronology::instance_with_cutover_millis(&TimeZone::utc(), too_early, 4),
            Err(Error::Configuration(_))
        ));
        let year_one = gregorian.date_time_millis(1, 1, 1, 0).unwrap();
        assert!(
            CutoverChronology::instance_with_cutover_millis(&TimeZone::utc(), year_one, 4).is_ok()
        );
        assert!(matches!(
            CutoverChronology::instance_with_cutover_millis(
                &TimeZone::utc(),
                DEFAULT_CUTOVER_MILLIS,
                8
            ),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn british_cutover() {
        let gregorian = BasicChronology::gregorian(4).unwrap();
        let cutover = gregorian.date_time_millis(1752, 9, 14, 0).unwrap();
        let chrono =
            CutoverChronology::instance_with_cutover_millis(&TimeZone::utc(), cutover, 4).unwrap();
        assert_eq!(chrono.gap_duration_millis(), 11 * MILLIS_PER_DAY);
        let sept2 = chrono.date_time_millis(1752, 9, 2, 0).unwrap();
        assert_eq!(chrono.days().add(sept2, 1), Ok(cutover));
        assert!(chrono.date_time_millis(1752, 9, 3, 0).is_err());
        // 1700 was a leap year in Britain.
        assert!(chrono.date_time_millis(1700, 2, 29, 0).is_ok());
    }

    #[test]
    fn zoned_instances_read_local_dates() {
        let utc = utc();
        let zone = TimeZone::fixed(MILLIS_PER_HOUR);
        let zoned = utc.with_zone(&zone).unwrap();
        assert_eq!(zoned.zone(), zone);
        assert!(zoned.with_utc().same_instance(&utc));
        assert!(zoned.with_zone(&zone).unwrap().same_instance(&zoned));
        assert_eq!(zoned.gregorian_cutover_millis(), DEFAULT_CUTOVER_MILLIS);

        let oct4 = zoned.date_time_millis(1582, 10, 4, 0).unwrap();
        assert_eq!(oct4, utc.date_time_millis(1582, 10, 4, 0).unwrap() - MILLIS_PER_HOUR);
        assert_eq!(zoned.day_of_month().get(oct4), 4);
        assert_eq!(zoned.hour_of_day().get(oct4), 0);
        assert_eq!(utc.day_of_month().get(oct4), 3);
        let next = zoned.days().add(oct4, 1).unwrap();
        assert_eq!(zoned.day_of_month().get(next), 15);
        assert_eq!(
            zoned.date_time_millis(1582, 10, 10, 0),
            Err(Error::NonexistentDateTime {
                year: 1582,
                month: 10,
                day: 10
            })
        );
    }

    #[test]
    fn named_zones_use_their_early_offset() {
        let zone = TimeZone::for_id("Europe/Stockholm").unwrap();
        let chrono = CutoverChronology::instance_in(&zone).unwrap();
        let oct4 = chrono.date_time_millis(1582, 10, 4, 0).unwrap();
        assert_eq!(oct4, utc().date_time_millis(1582, 10, 4, 0).unwrap() - MILLIS_PER_HOUR);
        assert_eq!(chrono.day_of_month().get(oct4), 4);
        let next = chrono.days().add(oct4, 1).unwrap();
        assert_eq!(chrono.day_of_month().get(next), 15);
    }

    #[test]
    fn fields_hold_at_the_ends_of_time() {
        let chrono = utc();
        for field_type in DateTimeFieldType::ALL {
            let field = chrono.field(field_type);
            for t in [i64::MIN, i64::MIN + 1, i64::MAX - 1, i64::MAX] {
                field.get(t);
                if let Ok(floor) = field.round_floor(t) {
                    assert!(floor <= t, "{field_type:?} floor at {t}");
                }
                if let Ok(ceiling) = field.round_ceiling(t) {
                    assert!(ceiling >= t, "{field_type:?} ceiling at {t}");
                }
            }
        }
        let weekyears = chrono.gregorian().weekyears().clone();
        assert!(weekyears.difference(i64::MAX, i64::MIN).unwrap() > 0);
        // The Julian calendar ends a few thousand years earlier, so this may fail but must
        // not panic.
        let _ = chrono.weekyears().difference(i64::MAX, i64::MIN);
    }

    #[test]
    fn display() {
        assert_eq!(utc().to_string(), "GJChronology[UTC]");
        let zoned = CutoverChronology::instance_in(&TimeZone::fixed(MILLIS_PER_HOUR)).unwrap();
        assert_eq!(zoned.to_string(), "GJChronology[+01:00]");

        let gregorian = BasicChronology::gregorian(4).unwrap();
        let british = gregorian.date_time_millis(1752, 9, 14, 0).unwrap();
        let chrono =
            CutoverChronology::instance_with_cutover_millis(&TimeZone::utc(), british, 4).unwrap();
        assert_eq!(chrono.to_string(), "GJChronology[UTC,cutover=1752-09-14]");

        let midday = DEFAULT_CUTOVER_MILLIS + 12 * MILLIS_PER_HOUR + 1;
        let chrono =
            CutoverChronology::instance_with_cutover_millis(&TimeZone::utc(), midday, 2).unwrap();
        assert_eq!(
            chrono.to_string(),
            "GJChronology[UTC,cutover=1582-10-15T12:00:00.001Z,mdfw=2]"
        );
    }

    #[test]
    fn serde_resolves_through_the_cache() {
        let chrono = CutoverChronology::instance_in(&TimeZone::fixed(-3 * MILLIS_PER_HOUR)).unwrap();
        let json = serde_json::to_string(&chrono).unwrap();
        assert_eq!(
            json,
            r#"{"zone":"-03:00","cutover":-12219292800000,"min_days_in_first_week":4}"#
        );
        let back: CutoverChronology = serde_json::from_str(&json).unwrap();
        assert!(back.same_instance(&chrono));

        let bad = r#"{"zone":"UTC","cutover":0,"min_days_in_first_week":0}"#;
        assert!(serde_json::from_str::<CutoverChronology>(bad).is_err());
    }

    #[test]
    fn partial_addition_carries_across_the_cutover() {
        let chrono = utc();
        let ymd = Partial::new()
            .with(DateTimeFieldType::Year, 1582)
            .with(DateTimeFieldType::MonthOfYear, 10)
            .with(DateTimeFieldType::DayOfMonth, 4);
        assert_eq!(
            chrono.add_to_partial(&ymd, 2, &ymd.values(), 1),
            Ok(vec![1582, 10, 15])
        );
        assert_eq!(
            chrono.add_to_partial(&ymd, 0, &ymd.values(), 1),
            Ok(vec![1583, 10, 4])
        );
        assert_eq!(chrono.add_to_partial(&ymd, 1, &ymd.values(), 0), Ok(ymd.values()));

        let year_and_day = Partial::new()
            .with(DateTimeFieldType::Year, 1582)
            .with(DateTimeFieldType::DayOfMonth, 4);
        assert!(matches!(
            chrono.add_to_partial(&year_and_day, 1, &[1582, 4], 1),
            Err(Error::UnsupportedField { .. })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;
    use crate::field::MILLIS_PER_DAY;

    // Roughly 1000 years either side of the default cutover.
    const SPAN: i64 = 1000 * 365 * MILLIS_PER_DAY;

    fn chrono() -> CutoverChronology {
        CutoverChronology::instance_utc().unwrap()
    }

    proptest! {
        #[test]
        fn fields_read_the_calendar_in_force(offset in -SPAN..SPAN) {
            let chrono = chrono();
            let t = DEFAULT_CUTOVER_MILLIS + offset;
            let side = if t < DEFAULT_CUTOVER_MILLIS { chrono.julian() } else { chrono.gregorian() };
            prop_assert_eq!(chrono.year().get(t), side.year().get(t));
            prop_assert_eq!(chrono.month_of_year().get(t), side.month_of_year().get(t));
            prop_assert_eq!(chrono.day_of_month().get(t), side.day_of_month().get(t));
            prop_assert_eq!(chrono.millis_of_day().get(t), side.millis_of_day().get(t));
            prop_assert_eq!(chrono.day_of_week().get(t), side.day_of_week().get(t));
        }
    }

    proptest! {
        #[test]
        fn precise_add_wraps_within_the_range(offset in -SPAN..SPAN, k in -100_000i32..100_000) {
            let chrono = chrono();
            let t = DEFAULT_CUTOVER_MILLIS + offset;
            let moved = chrono.minutes().add(t, k).unwrap();
            let expected = (chrono.minute_of_hour().get(t) + k).rem_euclid(60);
            prop_assert_eq!(chrono.minute_of_hour().get(moved), expected);
        }
    }

    proptest! {
        #[test]
        fn set_round_trips_away_from_the_gap(offset in 0..SPAN, day in 1i32..=28) {
            let chrono = chrono();
            // Well after the cutover year, and well before it.
            let after = DEFAULT_CUTOVER_MILLIS + 400 * MILLIS_PER_DAY + offset;
            let before = DEFAULT_CUTOVER_MILLIS - 400 * MILLIS_PER_DAY - offset;
            for t in [after, before] {
                let set = chrono.day_of_month().set(t, day).unwrap();
                prop_assert_eq!(chrono.day_of_month().get(set), day);
                prop_assert_eq!(chrono.month_of_year().get(set), chrono.month_of_year().get(t));
            }
        }
    }

    proptest! {
        #[test]
        fn the_gap_has_no_dates(day in 5i32..=14, millis_of_day in 0i32..86_400_000) {
            let result = chrono().date_time_millis(1582, 10, day, millis_of_day);
            prop_assert_eq!(result, Err(Error::NonexistentDateTime { year: 1582, month: 10, day }));
        }
    }

    proptest! {
        #[test]
        fn years_added_across_the_cutover_keep_the_date(
            year in 1400i32..1500,
            k in 0i32..300,
            month in 1i32..=12,
            day in 1i32..=28,
        ) {
            prop_assume!(!(year + k == 1582 && month == 10));
            let chrono = chrono();
            let t = chrono.date_time_millis(year, month, day, 0).unwrap();
            let moved = chrono.years().add(t, k).unwrap();
            prop_assert_eq!(chrono.year().get(moved), year + k);
            prop_assert_eq!(chrono.month_of_year().get(moved), month);
            prop_assert_eq!(chrono.day_of_month().get(moved), day);
            prop_assert_eq!(chrono.years().difference(moved, t).unwrap(), k);
        }
    }

    proptest! {
        #[test]
        fn instances_are_shared(days in 0i64..100_000, min_days in 1i32..=7) {
            let zone = TimeZone::utc();
            let cutover = DEFAULT_CUTOVER_MILLIS + days * MILLIS_PER_DAY;
            let a = CutoverChronology::instance_with_cutover_millis(&zone, cutover, min_days).unwrap();
            let b = CutoverChronology::instance_with_cutover_millis(&zone, cutover, min_days).unwrap();
            prop_assert!(a.same_instance(&b));
            let json = serde_json::to_string(&a).unwrap();
            let back: CutoverChronology = serde_json::from_str(&json).unwrap();
            prop_assert!(back.same_instance(&a));
        }
    }
}
