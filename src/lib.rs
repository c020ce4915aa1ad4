//! Dates on the historical European calendar: Julian up to a cutover, Gregorian after it.
//!
//! ```
//! use gjchron::{Chronology, CutoverChronology, Error};
//!
//! let chrono = CutoverChronology::instance_utc()?;
//! let oct4 = chrono.date_time_millis(1582, 10, 4, 0)?;
//! let next = chrono.days().add(oct4, 1)?;
//! assert_eq!(chrono.day_of_month().get(next), 15);
//! assert!(matches!(
//!     chrono.date_time_millis(1582, 10, 10, 0),
//!     Err(Error::NonexistentDateTime { .. })
//! ));
//! # Ok::<(), gjchron::Error>(())
//! ```

pub use builder::CutoverChronologyBuilder;
pub use calendar::{BasicChronology, Calendar, CalendarSystem};
pub use chronology::Chronology;
pub use cutover::{CutoverChronology, DEFAULT_CUTOVER_MILLIS, DEFAULT_MIN_DAYS_IN_FIRST_WEEK};
pub use error::{Error, Result};
pub use field::{
    DateTimeField, DateTimeFieldType, DurationField, DurationFieldType, DurationRef, FieldRef,
    FieldTable,
};
pub use instant::{Instant, InstantOutOfRange};
pub use locale::Locale;
pub use partial::Partial;
pub use zone::TimeZone;

mod builder;
mod calendar;
mod chronology;
mod cutover;
mod div_rem;
mod error;
pub mod field;
mod instant;
mod locale;
mod partial;
mod zone;
