//! Supports: a grab bag of general-purpose utilities.
//!
//! The centrepiece is [`carbon`], a date/time value type in the spirit of the
//! PHP/Go "Carbon" libraries:
//! * [`carbon::Carbon`]: an instant in a concrete [`carbon::Zone`] with
//!   formatting, exact shifts (minutes to weeks), calendar shifts (months, years)
//!   and start/end-of-period truncation.
//! * [`carbon::Calendar`]: the factory holding [`carbon::Settings`] (default
//!   layouts, week-start day, timezone) and the parse [`carbon::Registry`].
//! * [`carbon::sql`]: the persistence adapter boundary (rusqlite `ToSql`/`FromSql`).
//!
//! Around it sit small stateless helpers:
//! * [`dbutil`]: database scalar adapters: [`dbutil::Datetime`], [`dbutil::Date`],
//!   comma-joined lists and JSON objects.
//! * [`bytes`] and [`strings`]: searching, duplication, random text, numeric conversion.
//! * [`collection`]: map/filter/reduce/sort/group-by over slices.
//! * [`file`]: path existence checks.
//! * [`number`]: a thread-safe monotonic ID generator.
//! * [`reflection`]: type-name introspection.
//!
//! ## Quick Start
//! ```
//! use chrono::Weekday;
//! use supports::carbon::{Calendar, Settings, Zone};
//! let calendar = Calendar::new(
//!     Settings::default()
//!         .with_timezone(Zone::Utc)
//!         .with_week_start(Weekday::Mon),
//! );
//! let wednesday = calendar.parse("2024-05-15 13:45:10", None, None).unwrap();
//! assert_eq!(wednesday.start_of_week().to_date_time_string(), "2024-05-13 00:00:00");
//! assert_eq!(wednesday.end_of_week().to_date_time_string(), "2024-05-19 23:59:59");
//! ```
//!
//! ## Configuration
//! [`carbon::Settings::load`] reads an optional file plus `SUPPORTS__*` environment
//! variables through the `config` crate. Install the result with
//! [`carbon::Calendar::install`] to make it the default used by the database and
//! serde adapters.

pub mod bytes;
pub mod carbon;
pub mod collection;
pub mod dbutil;
pub mod error;
pub mod file;
pub mod number;
pub mod reflection;
pub mod strings;

pub use carbon::{Calendar, Carbon, Settings, Zone};
pub use error::{Result, SupportsError};
