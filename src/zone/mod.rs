//! Time zones, as offsets from UTC that change at known instants.

pub(crate) use zoned::zone_table;

mod zoned;
mod zoneinfo;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use lazy_static::lazy_static;
use tracing::warn;

use crate::error::{Error, Result};
use crate::field::{MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND};
use zoneinfo::{zone_rules, ZoneRules};

const UTC_ID: &str = "UTC";

#[derive(Debug)]
enum Rules {
    Fixed(i64),
    Named(Arc<ZoneRules>),
}

#[derive(Debug)]
struct Shared {
    id: String,
    rules: Rules,
}

/// A time zone. Cloning is cheap; two zones are equal when their ids are.
#[derive(Clone)]
pub struct TimeZone {
    shared: Arc<Shared>,
}

lazy_static! {
    static ref UTC: TimeZone = TimeZone {
        shared: Arc::new(Shared {
            id: UTC_ID.to_string(),
            rules: Rules::Fixed(0),
        }),
    };
}

impl TimeZone {
    pub fn utc() -> TimeZone {
        UTC.clone()
    }

    /// A zone with a constant offset. A zero offset gives UTC.
    pub fn fixed(offset_millis: i64) -> TimeZone {
        if offset_millis == 0 {
            return TimeZone::utc();
        }
        TimeZone {
            shared: Arc::new(Shared {
                id: format_offset(offset_millis),
                rules: Rules::Fixed(offset_millis),
            }),
        }
    }

    /// Resolve "UTC", an offset such as "+05:30" or "-03", or a tz database name such as
    /// "Europe/Stockholm".
    pub fn for_id(id: &str) -> Result<TimeZone> {
        if id == UTC_ID || id == "Z" {
            return Ok(TimeZone::utc());
        }
        if id.starts_with('+') || id.starts_with('-') {
            return parse_offset(id)
                .map(TimeZone::fixed)
                .ok_or_else(|| Error::UnknownZone(id.to_string()));
        }
        let rules = zone_rules(id)?;
        Ok(TimeZone {
            shared: Arc::new(Shared {
                id: id.to_string(),
                rules: Rules::Named(rules),
            }),
        })
    }

    /// The zone named by `$TZ`, or UTC when it is unset or cannot be loaded.
    pub fn system_default() -> TimeZone {
        let id = match std::env::var("TZ") {
            Ok(id) => id,
            Err(_) => return TimeZone::utc(),
        };
        // POSIX allows a leading colon before a file name.
        let id = id.strip_prefix(':').unwrap_or(&id);
        match TimeZone::for_id(id) {
            Ok(zone) => zone,
            Err(err) => {
                warn!(tz = id, error = %err, "falling back to UTC");
                TimeZone::utc()
            }
        }
    }

    pub fn id(&self) -> &str {
        &self.shared.id
    }

    pub fn is_utc(&self) -> bool {
        self.id() == UTC_ID
    }

    pub fn is_fixed(&self) -> bool {
        match &self.shared.rules {
            Rules::Fixed(_) => true,
            Rules::Named(rules) => rules.transitions.is_empty(),
        }
    }

    /// Milliseconds to add to a UTC instant to get local time.
    pub fn offset(&self, utc_millis: i64) -> i64 {
        match &self.shared.rules {
            Rules::Fixed(offset) => *offset,
            Rules::Named(rules) => {
                let index = rules
                    .transitions
                    .partition_point(|t| t.utc_millis <= utc_millis);
                match index {
                    0 => rules.initial_offset_millis,
                    i => rules.transitions[i - 1].offset_millis,
                }
            }
        }
    }

    fn next_transition(&self, utc_millis: i64) -> Option<i64> {
        match &self.shared.rules {
            Rules::Fixed(_) => None,
            Rules::Named(rules) => {
                let index = rules
                    .transitions
                    .partition_point(|t| t.utc_millis <= utc_millis);
                rules.transitions.get(index).map(|t| t.utc_millis)
            }
        }
    }

    /// The offset to subtract from a local time to get UTC. Local times that occur twice
    /// resolve to the earlier instant; local times skipped by a transition take the offset in
    /// effect before it.
    pub fn offset_from_local(&self, local_millis: i64) -> i64 {
        let offset_local = self.offset(local_millis);
        let offset_adjusted = self.offset(local_millis - offset_local);
        if offset_local != offset_adjusted {
            if offset_local < offset_adjusted {
                // Near a gap or overlap. If the two guesses see different transitions ahead,
                // the local time is in a gap.
                let next_local = self.next_transition(local_millis - offset_local);
                let next_adjusted = self.next_transition(local_millis - offset_adjusted);
                if next_local != next_adjusted {
                    return offset_local;
                }
            }
        } else if offset_local >= 0 {
            // An overlap just behind: prefer the earlier offset.
            let adjusted = local_millis - offset_local;
            if let Some((prev, offset_prev)) = self.previous_transition(adjusted) {
                if prev < adjusted && adjusted - prev <= offset_prev - offset_local {
                    return offset_prev;
                }
            }
        }
        offset_adjusted
    }

    // Last transition at or before the instant, and the offset in effect before it.
    fn previous_transition(&self, utc_millis: i64) -> Option<(i64, i64)> {
        match &self.shared.rules {
            Rules::Fixed(_) => None,
            Rules::Named(rules) => {
                let index = rules
                    .transitions
                    .partition_point(|t| t.utc_millis <= utc_millis);
                if index == 0 {
                    return None;
                }
                let at = rules.transitions[index - 1].utc_millis;
                Some((at, self.offset(at - 1)))
            }
        }
    }

    pub fn utc_to_local(&self, utc_millis: i64) -> Result<i64> {
        utc_millis
            .checked_add(self.offset(utc_millis))
            .ok_or(Error::Overflow("converting to local time"))
    }

    /// Convert a local time to UTC. A strict conversion fails for local times that a
    /// transition skips; a lenient one shifts them forward.
    pub fn local_to_utc(&self, local_millis: i64, strict: bool) -> Result<i64> {
        let offset = self.offset_from_local(local_millis);
        let utc = local_millis
            .checked_sub(offset)
            .ok_or(Error::Overflow("converting to UTC"))?;
        if strict && self.offset(utc) != offset {
            return Err(Error::NonexistentLocalTime {
                local_millis,
                zone: self.id().to_string(),
            });
        }
        Ok(utc)
    }
}

impl PartialEq for TimeZone {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for TimeZone {}

impl Hash for TimeZone {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl Default for TimeZone {
    fn default() -> Self {
        TimeZone::utc()
    }
}

impl fmt::Debug for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeZone({})", self.id())
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

fn format_offset(offset_millis: i64) -> String {
    let sign = if offset_millis < 0 { '-' } else { '+' };
    let abs = offset_millis.unsigned_abs() as i64;
    let hours = abs / MILLIS_PER_HOUR;
    let minutes = abs % MILLIS_PER_HOUR / MILLIS_PER_MINUTE;
    let seconds = abs % MILLIS_PER_MINUTE / MILLIS_PER_SECOND;
    let millis = abs % MILLIS_PER_SECOND;
    let mut id = format!("{}{:02}:{:02}", sign, hours, minutes);
    if seconds != 0 || millis != 0 {
        id.push_str(&format!(":{:02}", seconds));
        if millis != 0 {
            id.push_str(&format!(".{:03}", millis));
        }
    }
    id
}

// "+hh", "+hh:mm" or "+hhmm".
fn parse_offset(id: &str) -> Option<i64> {
    let (sign, rest) = match id.as_bytes().first()? {
        b'+' => (1, &id[1..]),
        b'-' => (-1, &id[1..]),
        _ => return None,
    };
    let (hours, minutes) = match rest.len() {
        2 => (rest, "00"),
        4 => (&rest[..2], &rest[2..]),
        5 if rest.as_bytes()[2] == b':' => (&rest[..2], &rest[3..]),
        _ => return None,
    };
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i64 = hours.parse().ok()?;
    let minutes: i64 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(sign * (hours * MILLIS_PER_HOUR + minutes * MILLIS_PER_MINUTE))
}
