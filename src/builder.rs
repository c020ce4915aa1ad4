use crate::cutover::{CutoverChronology, DEFAULT_CUTOVER_MILLIS, DEFAULT_MIN_DAYS_IN_FIRST_WEEK};
use crate::error::Result;
use crate::instant::Instant;
use crate::zone::TimeZone;

#[derive(Debug, Clone)]
enum ZoneChoice {
    Zone(TimeZone),
    Id(String),
}

/// Collects the settings of a cutover chronology. Anything left unset takes its default: the
/// system time zone, the 1582-10-15 cutover and four days in the first week.
#[derive(Debug, Default, Clone)]
pub struct CutoverChronologyBuilder {
    zone: Option<ZoneChoice>,
    cutover_millis: Option<i64>,
    min_days_in_first_week: Option<i32>,
}

impl CutoverChronologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zone(&mut self, zone: &TimeZone) -> &mut Self {
        self.zone = Some(ZoneChoice::Zone(zone.clone()));
        self
    }

    /// A zone by id, resolved when building.
    pub fn zone_id(&mut self, id: &str) -> &mut Self {
        self.zone = Some(ZoneChoice::Id(id.to_string()));
        self
    }

    pub fn cutover(&mut self, cutover: Instant) -> &mut Self {
        self.cutover_millis = Some(cutover.millis_since_epoch());
        self
    }

    pub fn cutover_millis(&mut self, cutover_millis: i64) -> &mut Self {
        self.cutover_millis = Some(cutover_millis);
        self
    }

    pub fn minimum_days_in_first_week(&mut self, days: i32) -> &mut Self {
        self.min_days_in_first_week = Some(days);
        self
    }

    pub fn build(&self) -> Result<CutoverChronology> {
        let zone = match &self.zone {
            Some(ZoneChoice::Zone(zone)) => zone.clone(),
            Some(ZoneChoice::Id(id)) => TimeZone::for_id(id)?,
            None => TimeZone::system_default(),
        };
        CutoverChronology::instance_with_cutover_millis(
            &zone,
            self.cutover_millis.unwrap_or(DEFAULT_CUTOVER_MILLIS),
            self.min_days_in_first_week.unwrap_or(DEFAULT_MIN_DAYS_IN_FIRST_WEEK),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chronology::Chronology;
    use crate::error::Error;

    #[test]
    fn builds_cached_instances() {
        let chrono = CutoverChronologyBuilder::new()
            .zone(&TimeZone::utc())
            .build()
            .unwrap();
        assert!(chrono.same_instance(&CutoverChronology::instance_utc().unwrap()));

        let chrono = CutoverChronologyBuilder::new()
            .zone_id("+05:30")
            .cutover_millis(0)
            .minimum_days_in_first_week(1)
            .build()
            .unwrap();
        assert_eq!(chrono.zone().id(), "+05:30");
        assert_eq!(chrono.gregorian_cutover_millis(), 0);
        assert_eq!(chrono.minimum_days_in_first_week(), 1);

        let again = CutoverChronologyBuilder::new()
            .zone_id("+05:30")
            .cutover(Instant::epoch())
            .minimum_days_in_first_week(1)
            .build()
            .unwrap();
        assert!(again.same_instance(&chrono));
    }

    #[test]
    fn reports_bad_settings() {
        let mut builder = CutoverChronologyBuilder::new();
        builder.zone_id("+99");
        assert_eq!(
            builder.build().unwrap_err(),
            Error::UnknownZone("+99".to_string())
        );
        builder.zone(&TimeZone::utc()).minimum_days_in_first_week(0);
        assert!(matches!(builder.build(), Err(Error::Configuration(_))));
    }
}
