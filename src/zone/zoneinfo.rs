use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;
use tracing::debug;
use zoneinfo_compiled::parse;

use crate::error::{Error, Result};

// About names of zones
// https://docs.python.org/3/library/zoneinfo.html#zoneinfo.ZoneInfo.key
// "Although it is a somewhat common practice to expose these to end users,
// these values are designed to be primary keys for representing the relevant
// zones and not necessarily user-facing elements."

/// One offset change, in UTC milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Transition {
    pub(crate) utc_millis: i64,
    pub(crate) offset_millis: i64,
}

/// The offset history of a named zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ZoneRules {
    /// Offset in effect before the first transition.
    pub(crate) initial_offset_millis: i64,
    /// Sorted by instant.
    pub(crate) transitions: Vec<Transition>,
}

fn tzdir() -> PathBuf {
    // Get the TZDIR environment variable. If it's not set, we default to /usr/share/zoneinfo,
    // which is what the C library does.
    std::env::var("TZDIR")
        .unwrap_or_else(|_| "/usr/share/zoneinfo".to_string())
        .into()
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('/')
        && name
            .split('/')
            .all(|part| !part.is_empty() && part != "." && part != "..")
}

fn load_rules(name: &str) -> Result<ZoneRules> {
    if !is_valid_name(name) {
        return Err(Error::UnknownZone(name.to_string()));
    }
    let path = tzdir().join(name);
    let data = std::fs::read(&path).map_err(|_| Error::UnknownZone(name.to_string()))?;
    let tz = parse(data).map_err(|_| Error::UnknownZone(name.to_string()))?;

    let spans = &tz.time_zone.fixed_timespans;
    let mut transitions: Vec<Transition> = spans
        .rest
        .iter()
        .map(|(at, span)| Transition {
            utc_millis: at.saturating_mul(1000),
            offset_millis: span.offset * 1000,
        })
        .collect();
    // Most likely already sorted but the format does not promise it.
    transitions.sort_by_key(|t| t.utc_millis);
    let initial_offset_millis = spans.first.offset * 1000;
    debug!(
        zone = name,
        path = %path.display(),
        transitions = transitions.len(),
        "loaded time zone"
    );
    Ok(ZoneRules {
        initial_offset_millis,
        transitions,
    })
}

lazy_static! {
    static ref ZONE_RULES: Mutex<HashMap<String, Arc<ZoneRules>>> =
        Mutex::new(HashMap::new());
}

/// Rules of a named zone, read once per process.
pub(crate) fn zone_rules(name: &str) -> Result<Arc<ZoneRules>> {
    let mut cache = ZONE_RULES
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(rules) = cache.get(name) {
        return Ok(rules.clone());
    }
    let rules = Arc::new(load_rules(name)?);
    cache.insert(name.to_string(), rules.clone());
    Ok(rules)
}
