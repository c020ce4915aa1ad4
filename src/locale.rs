/// Names used when fields are rendered as, or parsed from, text.
///
/// Only the fields that have names (month of year, day of week, era and halfday of day) look at
/// the locale. Everything else is rendered as a decimal number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    pub tag: &'static str,
    pub months: [&'static str; 12],
    pub short_months: [&'static str; 12],
    /// Monday first, matching the day of week numbering (Monday = 1).
    pub weekdays: [&'static str; 7],
    pub short_weekdays: [&'static str; 7],
    /// BC, AD.
    pub eras: [&'static str; 2],
    /// AM, PM.
    pub halfdays: [&'static str; 2],
}

impl Locale {
    pub const ENGLISH: Locale = Locale {
        tag: "en",
        months: [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ],
        short_months: [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ],
        weekdays: [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ],
        short_weekdays: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        eras: ["BC", "AD"],
        halfdays: ["AM", "PM"],
    };

    pub const FRENCH: Locale = Locale {
        tag: "fr",
        months: [
            "janvier",
            "février",
            "mars",
            "avril",
            "mai",
            "juin",
            "juillet",
            "août",
            "septembre",
            "octobre",
            "novembre",
            "décembre",
        ],
        short_months: [
            "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
            "nov.", "déc.",
        ],
        weekdays: [
            "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
        ],
        short_weekdays: ["lun.", "mar.", "mer.", "jeu.", "ven.", "sam.", "dim."],
        eras: ["av. J.-C.", "ap. J.-C."],
        halfdays: ["AM", "PM"],
    };

    pub const GERMAN: Locale = Locale {
        tag: "de",
        months: [
            "Januar",
            "Februar",
            "März",
            "April",
            "Mai",
            "Juni",
            "Juli",
            "August",
            "September",
            "Oktober",
            "November",
            "Dezember",
        ],
        short_months: [
            "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
        ],
        weekdays: [
            "Montag",
            "Dienstag",
            "Mittwoch",
            "Donnerstag",
            "Freitag",
            "Samstag",
            "Sonntag",
        ],
        short_weekdays: ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"],
        eras: ["v. Chr.", "n. Chr."],
        halfdays: ["AM", "PM"],
    };

    /// Look up a locale by its language tag. Region subtags are ignored, so "en-GB" gives
    /// English. Unknown languages fall back to English.
    pub fn for_tag(tag: &str) -> Locale {
        let language = tag.split(&['-', '_'][..]).next().unwrap_or("");
        match language.to_ascii_lowercase().as_str() {
            "fr" => Locale::FRENCH,
            "de" => Locale::GERMAN,
            _ => Locale::ENGLISH,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::ENGLISH
    }
}

/// The families of names a field can be rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Names {
    Month,
    Weekday,
    Era,
    Halfday,
}

impl Names {
    fn tables(self, locale: &Locale) -> (&[&'static str], &[&'static str]) {
        match self {
            Names::Month => (&locale.months, &locale.short_months),
            Names::Weekday => (&locale.weekdays, &locale.short_weekdays),
            Names::Era => (&locale.eras, &locale.eras),
            Names::Halfday => (&locale.halfdays, &locale.halfdays),
        }
    }

    // Field value of the first name in the table.
    fn first_value(self) -> i32 {
        match self {
            Names::Month | Names::Weekday => 1,
            Names::Era | Names::Halfday => 0,
        }
    }

    pub(crate) fn text(self, value: i32, locale: &Locale) -> String {
        let (full, _) = self.tables(locale);
        name_at(full, value - self.first_value()).unwrap_or_else(|| value.to_string())
    }

    pub(crate) fn short_text(self, value: i32, locale: &Locale) -> String {
        let (_, short) = self.tables(locale);
        name_at(short, value - self.first_value()).unwrap_or_else(|| value.to_string())
    }

    /// Parse a name, falling back to a decimal value.
    pub(crate) fn value(self, text: &str, locale: &Locale) -> Option<i32> {
        let (full, short) = self.tables(locale);
        match find_name(full, short, text) {
            Some(index) => Some(index as i32 + self.first_value()),
            None => text.trim().parse().ok(),
        }
    }

    pub(crate) fn max_text_length(self, locale: &Locale) -> usize {
        longest(self.tables(locale).0)
    }

    pub(crate) fn max_short_text_length(self, locale: &Locale) -> usize {
        longest(self.tables(locale).1)
    }
}

fn name_at(names: &[&str], index: i32) -> Option<String> {
    usize::try_from(index)
        .ok()
        .and_then(|i| names.get(i))
        .map(|n| n.to_string())
}

/// Character count of the longest name in the list.
pub(crate) fn longest(names: &[&str]) -> usize {
    names.iter().map(|n| n.chars().count()).max().unwrap_or(0)
}

/// Find `text` among full and short names, case-insensitively. Returns the index.
pub(crate) fn find_name(full: &[&str], short: &[&str], text: &str) -> Option<usize> {
    let text = text.trim().to_lowercase();
    full.iter()
        .position(|n| n.to_lowercase() == text)
        .or_else(|| short.iter().position(|n| n.to_lowercase() == text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags() {
        assert_eq!(Locale::for_tag("en-US"), Locale::ENGLISH);
        assert_eq!(Locale::for_tag("fr_CA"), Locale::FRENCH);
        assert_eq!(Locale::for_tag("DE"), Locale::GERMAN);
        assert_eq!(Locale::for_tag("sv"), Locale::ENGLISH);
    }

    #[test]
    fn name_lookup() {
        let l = Locale::ENGLISH;
        assert_eq!(find_name(&l.months, &l.short_months, "october"), Some(9));
        assert_eq!(find_name(&l.months, &l.short_months, " OCT "), Some(9));
        assert_eq!(find_name(&l.months, &l.short_months, "Octember"), None);
        let l = Locale::GERMAN;
        assert_eq!(find_name(&l.months, &l.short_months, "märz"), Some(2));
    }

    #[test]
    fn names_render_and_parse() {
        let l = Locale::ENGLISH;
        assert_eq!(Names::Month.text(10, &l), "October");
        assert_eq!(Names::Month.short_text(10, &l), "Oct");
        assert_eq!(Names::Weekday.text(1, &l), "Monday");
        assert_eq!(Names::Era.text(0, &l), "BC");
        assert_eq!(Names::Halfday.text(1, &l), "PM");
        assert_eq!(Names::Month.text(13, &l), "13");
        assert_eq!(Names::Month.value("Feb", &l), Some(2));
        assert_eq!(Names::Month.value("7", &l), Some(7));
        assert_eq!(Names::Era.value("ad", &l), Some(1));
        assert_eq!(Names::Weekday.value("Fooday", &l), None);
        assert_eq!(Names::Weekday.value("Sonntag", &Locale::GERMAN), Some(7));
    }

    #[test]
    fn longest_counts_characters() {
        assert_eq!(longest(&Locale::ENGLISH.months), 9);
        // "décembre" has eight characters but nine bytes.
        assert_eq!(longest(&["décembre"]), 8);
    }
}
