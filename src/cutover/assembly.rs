use std::sync::Arc;

use crate::chronology::Chronology;
use crate::cutover::field::{CutoverField, CutoverSplit};
use crate::error::Result;
use crate::field::{DateTimeFieldType, DurationRef, FieldRef, FieldTable};

// Wrapped only when the cutover falls on midnight. Otherwise the Gregorian fields serve both
// sides, which is exact for everything shorter than a day.
const TIME_OF_DAY: [DateTimeFieldType; 11] = [
    DateTimeFieldType::MillisOfSecond,
    DateTimeFieldType::MillisOfDay,
    DateTimeFieldType::SecondOfMinute,
    DateTimeFieldType::SecondOfDay,
    DateTimeFieldType::MinuteOfHour,
    DateTimeFieldType::MinuteOfDay,
    DateTimeFieldType::HourOfDay,
    DateTimeFieldType::HourOfHalfday,
    DateTimeFieldType::ClockhourOfDay,
    DateTimeFieldType::ClockhourOfHalfday,
    DateTimeFieldType::HalfdayOfDay,
];

/// Build the UTC field table of a cutover chronology from its two back-ends.
///
/// Starts from the Gregorian table, so day of week and the precise durations are shared with
/// it, and replaces every field whose value depends on the calendar.
pub(crate) fn assemble(split: &Arc<CutoverSplit>) -> Result<FieldTable> {
    let julian = split.julian.fields();
    let gregorian = split.gregorian.fields();
    let mut table = gregorian.clone();

    let sides = |t: DateTimeFieldType| (julian.field(t).clone(), gregorian.field(t).clone());
    let cutover = |t: DateTimeFieldType| {
        let (julian, gregorian) = sides(t);
        CutoverField::new(split, julian, gregorian)
    };
    let imprecise = |t: DateTimeFieldType, unit: Option<&DurationRef>, by_weekyear: bool| {
        let (julian, gregorian) = sides(t);
        CutoverField::imprecise(split, julian, gregorian, unit, by_weekyear)
    };

    if split.gregorian.millis_of_day().get(split.cutover) == 0 {
        for t in TIME_OF_DAY {
            table.set_field(Arc::new(cutover(t)));
        }
    }
    table.set_field(Arc::new(cutover(DateTimeFieldType::Era)));

    let year: FieldRef = Arc::new(imprecise(DateTimeFieldType::Year, None, false));
    let years = year.duration_field();
    let century_of_era: FieldRef =
        Arc::new(imprecise(DateTimeFieldType::CenturyOfEra, None, false));
    let centuries = century_of_era.duration_field();
    let month_of_year: FieldRef = Arc::new(
        imprecise(DateTimeFieldType::MonthOfYear, None, false).with_range(&years),
    );
    let months = month_of_year.duration_field();
    let weekyear: FieldRef = Arc::new(imprecise(DateTimeFieldType::Weekyear, None, true));
    let weekyears = weekyear.duration_field();

    table.set_field(year);
    table.set_field(Arc::new(imprecise(
        DateTimeFieldType::YearOfEra,
        Some(&years),
        false,
    )));
    table.set_field(century_of_era);
    table.set_field(Arc::new(
        imprecise(DateTimeFieldType::YearOfCentury, Some(&years), false).with_range(&centuries),
    ));
    table.set_field(month_of_year);
    table.set_field(weekyear);
    table.set_field(Arc::new(
        imprecise(DateTimeFieldType::WeekyearOfCentury, Some(&weekyears), false)
            .with_range(&centuries),
    ));

    // Day of year and week of weekyear hand over at the start of the first whole Gregorian
    // (week)year, so that the year of the cutover is counted on the Julian side throughout.
    let year_start = split.gregorian.year().round_ceiling(split.cutover)?;
    table.set_field(Arc::new(
        cutover(DateTimeFieldType::DayOfYear)
            .with_range(&years)
            .with_cutover(year_start),
    ));
    let weekyear_start = split.gregorian.weekyear().round_ceiling(split.cutover)?;
    table.set_field(Arc::new(
        cutover(DateTimeFieldType::WeekOfWeekyear)
            .with_range(&weekyears)
            .with_cutover(weekyear_start)
            .by_weekyear(),
    ));
    table.set_field(Arc::new(
        cutover(DateTimeFieldType::DayOfMonth).with_range(&months),
    ));

    table.set_duration(years);
    table.set_duration(centuries);
    table.set_duration(months);
    table.set_duration(weekyears);
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::BasicChronology;
    use crate::cutover::DEFAULT_CUTOVER_MILLIS;
    use crate::field::{DurationFieldType, MILLIS_PER_HOUR};

    fn table(cutover: i64) -> (Arc<CutoverSplit>, FieldTable) {
        let split = Arc::new(
            CutoverSplit::new(
                BasicChronology::julian(4).unwrap(),
                BasicChronology::gregorian(4).unwrap(),
                cutover,
            )
            .unwrap(),
        );
        let table = assemble(&split).unwrap();
        (split, table)
    }

    #[test]
    fn durations_are_shared_with_their_fields() {
        let (_, table) = table(DEFAULT_CUTOVER_MILLIS);
        let pairs = [
            (DateTimeFieldType::Year, DurationFieldType::Years),
            (DateTimeFieldType::YearOfEra, DurationFieldType::Years),
            (DateTimeFieldType::CenturyOfEra, DurationFieldType::Centuries),
            (DateTimeFieldType::MonthOfYear, DurationFieldType::Months),
            (DateTimeFieldType::Weekyear, DurationFieldType::Weekyears),
            (DateTimeFieldType::WeekyearOfCentury, DurationFieldType::Weekyears),
        ];
        for (field, duration) in pairs {
            assert!(Arc::ptr_eq(
                &table.field(field).duration_field(),
                table.duration(duration)
            ));
        }
        let day_of_month = table.field(DateTimeFieldType::DayOfMonth);
        assert!(Arc::ptr_eq(
            &day_of_month.range_duration_field().unwrap(),
            table.duration(DurationFieldType::Months)
        ));
    }

    #[test]
    fn time_fields_are_gregorian_for_a_midday_cutover() {
        let (split, midnight) = table(DEFAULT_CUTOVER_MILLIS);
        assert!(!Arc::ptr_eq(
            midnight.field(DateTimeFieldType::HourOfDay),
            split.gregorian.hour_of_day()
        ));

        let (split, midday) = table(DEFAULT_CUTOVER_MILLIS + 12 * MILLIS_PER_HOUR);
        for t in TIME_OF_DAY {
            assert!(Arc::ptr_eq(midday.field(t), split.gregorian.field(t)));
        }
        assert!(Arc::ptr_eq(
            midday.field(DateTimeFieldType::DayOfWeek),
            split.gregorian.day_of_week()
        ));
    }
}
