use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DurationFieldType {
    Eras,
    Centuries,
    Weekyears,
    Years,
    Months,
    Weeks,
    Days,
    Halfdays,
    Hours,
    Minutes,
    Seconds,
    Millis,
}

impl DurationFieldType {
    pub const COUNT: usize = 12;

    pub const ALL: [DurationFieldType; DurationFieldType::COUNT] = [
        DurationFieldType::Eras,
        DurationFieldType::Centuries,
        DurationFieldType::Weekyears,
        DurationFieldType::Years,
        DurationFieldType::Months,
        DurationFieldType::Weeks,
        DurationFieldType::Days,
        DurationFieldType::Halfdays,
        DurationFieldType::Hours,
        DurationFieldType::Minutes,
        DurationFieldType::Seconds,
        DurationFieldType::Millis,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            DurationFieldType::Eras => "eras",
            DurationFieldType::Centuries => "centuries",
            DurationFieldType::Weekyears => "weekyears",
            DurationFieldType::Years => "years",
            DurationFieldType::Months => "months",
            DurationFieldType::Weeks => "weeks",
            DurationFieldType::Days => "days",
            DurationFieldType::Halfdays => "halfdays",
            DurationFieldType::Hours => "hours",
            DurationFieldType::Minutes => "minutes",
            DurationFieldType::Seconds => "seconds",
            DurationFieldType::Millis => "millis",
        }
    }
}

impl fmt::Display for DurationFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DateTimeFieldType {
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
    DayOfWeek,
    HalfdayOfDay,
    HourOfHalfday,
    ClockhourOfHalfday,
    ClockhourOfDay,
    HourOfDay,
    MinuteOfDay,
    MinuteOfHour,
    SecondOfDay,
    SecondOfMinute,
    MillisOfDay,
    MillisOfSecond,
}

impl DateTimeFieldType {
    pub const COUNT: usize = 23;

    /// Largest unit first.
    pub const ALL: [DateTimeFieldType; DateTimeFieldType::COUNT] = [
        DateTimeFieldType::Era,
        DateTimeFieldType::YearOfEra,
        DateTimeFieldType::CenturyOfEra,
        DateTimeFieldType::YearOfCentury,
        DateTimeFieldType::Year,
        DateTimeFieldType::DayOfYear,
        DateTimeFieldType::MonthOfYear,
        DateTimeFieldType::DayOfMonth,
        DateTimeFieldType::WeekyearOfCentury,
        DateTimeFieldType::Weekyear,
        DateTimeFieldType::WeekOfWeekyear,
        DateTimeFieldType::DayOfWeek,
        DateTimeFieldType::HalfdayOfDay,
        DateTimeFieldType::HourOfHalfday,
        DateTimeFieldType::ClockhourOfHalfday,
        DateTimeFieldType::ClockhourOfDay,
        DateTimeFieldType::HourOfDay,
        DateTimeFieldType::MinuteOfDay,
        DateTimeFieldType::MinuteOfHour,
        DateTimeFieldType::SecondOfDay,
        DateTimeFieldType::SecondOfMinute,
        DateTimeFieldType::MillisOfDay,
        DateTimeFieldType::MillisOfSecond,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            DateTimeFieldType::Era => "era",
            DateTimeFieldType::YearOfEra => "yearOfEra",
            DateTimeFieldType::CenturyOfEra => "centuryOfEra",
            DateTimeFieldType::YearOfCentury => "yearOfCentury",
            DateTimeFieldType::Year => "year",
            DateTimeFieldType::DayOfYear => "dayOfYear",
            DateTimeFieldType::MonthOfYear => "monthOfYear",
            DateTimeFieldType::DayOfMonth => "dayOfMonth",
            DateTimeFieldType::WeekyearOfCentury => "weekyearOfCentury",
            DateTimeFieldType::Weekyear => "weekyear",
            DateTimeFieldType::WeekOfWeekyear => "weekOfWeekyear",
            DateTimeFieldType::DayOfWeek => "dayOfWeek",
            DateTimeFieldType::HalfdayOfDay => "halfdayOfDay",
            DateTimeFieldType::HourOfHalfday => "hourOfHalfday",
            DateTimeFieldType::ClockhourOfHalfday => "clockhourOfHalfday",
            DateTimeFieldType::ClockhourOfDay => "clockhourOfDay",
            DateTimeFieldType::HourOfDay => "hourOfDay",
            DateTimeFieldType::MinuteOfDay => "minuteOfDay",
            DateTimeFieldType::MinuteOfHour => "minuteOfHour",
            DateTimeFieldType::SecondOfDay => "secondOfDay",
            DateTimeFieldType::SecondOfMinute => "secondOfMinute",
            DateTimeFieldType::MillisOfDay => "millisOfDay",
            DateTimeFieldType::MillisOfSecond => "millisOfSecond",
        }
    }

    /// The unit one increment of the field corresponds to.
    pub fn duration_type(self) -> DurationFieldType {
        use DateTimeFieldType::*;
        match self {
            Era => DurationFieldType::Eras,
            YearOfEra | YearOfCentury | Year => DurationFieldType::Years,
            CenturyOfEra => DurationFieldType::Centuries,
            DayOfYear | DayOfMonth | DayOfWeek => DurationFieldType::Days,
            MonthOfYear => DurationFieldType::Months,
            WeekyearOfCentury | Weekyear => DurationFieldType::Weekyears,
            WeekOfWeekyear => DurationFieldType::Weeks,
            HalfdayOfDay => DurationFieldType::Halfdays,
            HourOfHalfday | ClockhourOfHalfday | ClockhourOfDay | HourOfDay => {
                DurationFieldType::Hours
            }
            MinuteOfDay | MinuteOfHour => DurationFieldType::Minutes,
            SecondOfDay | SecondOfMinute => DurationFieldType::Seconds,
            MillisOfDay | MillisOfSecond => DurationFieldType::Millis,
        }
    }

    /// The unit the field cycles within, if any.
    pub fn range_duration_type(self) -> Option<DurationFieldType> {
        use DateTimeFieldType::*;
        match self {
            Era | Year | Weekyear => None,
            YearOfEra | CenturyOfEra => Some(DurationFieldType::Eras),
            YearOfCentury | WeekyearOfCentury => Some(DurationFieldType::Centuries),
            DayOfYear | MonthOfYear => Some(DurationFieldType::Years),
            DayOfMonth => Some(DurationFieldType::Months),
            WeekOfWeekyear => Some(DurationFieldType::Weekyears),
            DayOfWeek => Some(DurationFieldType::Weeks),
            HalfdayOfDay | ClockhourOfDay | HourOfDay | MinuteOfDay | SecondOfDay
            | MillisOfDay => Some(DurationFieldType::Days),
            HourOfHalfday | ClockhourOfHalfday => Some(DurationFieldType::Halfdays),
            MinuteOfHour => Some(DurationFieldType::Hours),
            SecondOfMinute => Some(DurationFieldType::Minutes),
            MillisOfSecond => Some(DurationFieldType::Seconds),
        }
    }
}

impl fmt::Display for DateTimeFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
