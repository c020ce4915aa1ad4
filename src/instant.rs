use std::time::SystemTime;

use thiserror::Error;

/// A point on the time line, counted in milliseconds since 1970-01-01T00:00:00Z.
///
/// Instants carry no calendar. Years, months and days only appear once an instant is
/// interpreted through the fields of a chronology.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Instant {
    millis: i64,
}

#[derive(Error, Debug)]
#[error("instant is out of range")]
pub struct InstantOutOfRange;

impl Instant {
    pub const fn min_value() -> Self {
        Instant { millis: i64::MIN }
    }

    pub const fn max_value() -> Self {
        Instant { millis: i64::MAX }
    }

    pub const fn from_millis_since_epoch(millis: i64) -> Self {
        Instant { millis }
    }

    pub const fn epoch() -> Self {
        Instant::from_millis_since_epoch(0)
    }

    pub fn now() -> Self {
        // Before the epoch is still representable; only wildly misconfigured clocks overflow.
        Instant::try_from(SystemTime::now()).unwrap_or_else(|_| Instant::epoch())
    }

    pub const fn millis_since_epoch(&self) -> i64 {
        self.millis
    }

    pub fn checked_add_millis(&self, millis: i64) -> Option<Self> {
        self.millis
            .checked_add(millis)
            .map(Instant::from_millis_since_epoch)
    }
}

impl From<i64> for Instant {
    fn from(millis: i64) -> Self {
        Instant::from_millis_since_epoch(millis)
    }
}

impl From<Instant> for i64 {
    fn from(instant: Instant) -> Self {
        instant.millis
    }
}

impl TryFrom<SystemTime> for Instant {
    type Error = InstantOutOfRange;

    fn try_from(value: SystemTime) -> Result<Self, Self::Error> {
        // SystemTime does not count leap seconds and neither do we, so this is plain
        // arithmetic on the distance to the Unix epoch.
        let millis = match value.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_millis()).map_err(|_| InstantOutOfRange)?,
            Err(before) => {
                let before = before.duration();
                let whole = i64::try_from(before.as_millis()).map_err(|_| InstantOutOfRange)?;
                // Round towards negative infinity so sub-millisecond parts don't move us forward.
                if before.subsec_nanos() % 1_000_000 != 0 {
                    -whole - 1
                } else {
                    -whole
                }
            }
        };
        Ok(Instant::from_millis_since_epoch(millis))
    }
}
