//! Carbon: a date/time value with calendar arithmetic and multi-layout parsing.
//!
//! A [`Carbon`] wraps an instant expressed in a concrete [`Zone`]. Values are
//! never mutated in place: every shift or truncation returns a new value, so
//! they can be shared freely between threads.
//!
//! Values are built through a [`Calendar`], which holds the [`Settings`]
//! (default layouts, week-start day, timezone) and the parse [`Registry`].
//! The associated functions on [`Carbon`] such as [`Carbon::now`] and
//! [`Carbon::parse`] go through the process default calendar.
//!
//! ```
//! use supports::carbon::{Calendar, Settings, Zone};
//! let calendar = Calendar::new(Settings::default().with_timezone(Zone::Utc));
//! let c = calendar.parse("2019-01-31 10:30:00", None, None).unwrap();
//! assert_eq!(c.add_month().to_date_string(), "2019-02-28");
//! assert_eq!(c.start_of_month().to_date_time_string(), "2019-01-01 00:00:00");
//! ```

pub mod calendar;
pub mod clock;
pub mod registry;
pub mod sql;
pub mod zone;

pub use calendar::{Calendar, Settings};
pub use registry::{DATE_LAYOUT, DATETIME_LAYOUT, RFC3339, Registry};
pub use sql::{DriverValue, ZERO_SENTINELS};
pub use zone::Zone;

use std::cmp::Ordering;
use std::fmt::{self, Write};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use chrono::{
    DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeDelta, TimeZone, Timelike, Utc, Weekday,
};
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, trace, warn};

use crate::error::{Result, SupportsError};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// The structured form of a [`Carbon`] used when serializing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub epoch_millis: i64,
    pub timezone_name: String,
    pub datetime: String,
    pub timestamp: i64,
}

#[derive(Clone)]
pub struct Carbon {
    t: DateTime<FixedOffset>,
    zone: Zone,
    valid: bool,
    settings: Arc<Settings>,
}

impl Carbon {
    pub(crate) fn new(t: DateTime<FixedOffset>, zone: Zone, settings: Arc<Settings>) -> Carbon {
        Carbon {
            t,
            zone,
            valid: true,
            settings,
        }
    }
    /// 0001-01-01 00:00:00 UTC, flagged as not valid.
    pub(crate) fn zero(settings: Arc<Settings>) -> Carbon {
        let t = NaiveDate::from_ymd_opt(1, 1, 1)
            .unwrap_or(NaiveDate::MIN)
            .and_time(NaiveTime::MIN);
        Carbon {
            t: Utc.from_utc_datetime(&t).fixed_offset(),
            zone: Zone::Utc,
            valid: false,
            settings,
        }
    }
    pub(crate) fn parse_in(
        text: &str,
        zone: Zone,
        layouts: &[String],
        settings: Arc<Settings>,
    ) -> Result<Carbon> {
        let value = text.trim();
        for layout in layouts {
            if let Some(t) = parse_layout(value, layout, zone) {
                trace!(%layout, value, "layout matched");
                return Ok(Carbon::new(t, zone, settings));
            }
        }
        debug!(value, layouts = layouts.len(), "no layout matched");
        Err(SupportsError::Parse {
            text: text.to_owned(),
        })
    }

    // ------------- Construction through the default calendar -------------
    pub fn now() -> Carbon {
        Calendar::global().now(None)
    }
    pub fn now_in(zone: Zone) -> Carbon {
        Calendar::global().now(Some(zone))
    }
    pub fn from_instant<Tz: TimeZone>(instant: DateTime<Tz>) -> Carbon {
        Calendar::global().from_instant(instant, None)
    }
    pub fn parse(text: &str) -> Result<Carbon> {
        Calendar::global().parse(text, None, None)
    }
    pub fn today() -> Carbon {
        Calendar::global().today()
    }
    pub fn tomorrow() -> Carbon {
        Calendar::global().tomorrow()
    }

    // ------------- Accessors -------------
    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.t
    }
    pub fn zone(&self) -> Zone {
        self.zone
    }
    pub fn is_valid(&self) -> bool {
        self.valid
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    pub fn timestamp(&self) -> i64 {
        self.t.timestamp()
    }
    pub fn timestamp_millis(&self) -> i64 {
        self.t.timestamp_millis()
    }
    pub fn year(&self) -> i32 {
        self.t.year()
    }
    pub fn month(&self) -> u32 {
        self.t.month()
    }
    pub fn day(&self) -> u32 {
        self.t.day()
    }
    pub fn hour(&self) -> u32 {
        self.t.hour()
    }
    pub fn minute(&self) -> u32 {
        self.t.minute()
    }
    pub fn second(&self) -> u32 {
        self.t.second()
    }
    pub fn nanosecond(&self) -> u32 {
        self.t.nanosecond()
    }
    pub fn weekday(&self) -> Weekday {
        self.t.weekday()
    }
    /// The same instant expressed in another zone.
    pub fn in_zone(&self, zone: Zone) -> Carbon {
        Carbon {
            t: zone.from_utc(self.t.to_utc()),
            zone,
            valid: self.valid,
            settings: Arc::clone(&self.settings),
        }
    }

    // ------------- Formatting -------------
    /// Renders with `layout`, or with the configured datetime layout.
    /// An invalid layout renders as an empty string; see [`Carbon::try_format`].
    pub fn format(&self, layout: Option<&str>) -> String {
        let layout = layout.unwrap_or(self.settings.datetime_layout.as_str());
        self.try_format(layout).unwrap_or_else(|e| {
            warn!(error = %e, "format failed");
            String::new()
        })
    }
    pub fn try_format(&self, layout: &str) -> Result<String> {
        let items: Vec<Item> = StrftimeItems::new(layout).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(SupportsError::Format {
                layout: layout.to_owned(),
            });
        }
        let mut out = String::new();
        write!(out, "{}", self.t.format_with_items(items.iter())).map_err(|_| {
            SupportsError::Format {
                layout: layout.to_owned(),
            }
        })?;
        Ok(out)
    }
    pub fn to_date_time_string(&self) -> String {
        self.format(Some(self.settings.datetime_layout.as_str()))
    }
    pub fn to_date_string(&self) -> String {
        self.format(Some(self.settings.date_layout.as_str()))
    }
    pub fn record(&self) -> Record {
        Record {
            year: self.t.year(),
            month: self.t.month(),
            day: self.t.day(),
            hour: self.t.hour(),
            minute: self.t.minute(),
            second: self.t.second(),
            epoch_millis: self.t.timestamp_millis(),
            timezone_name: self.zone.name(),
            datetime: self.to_date_time_string(),
            timestamp: self.t.timestamp(),
        }
    }

    // ------------- Exact shifts -------------
    pub fn add(&self, delta: TimeDelta) -> Carbon {
        match self.t.to_utc().checked_add_signed(delta) {
            Some(utc) => self.at_utc(utc),
            None => {
                warn!(%delta, "shift out of range, value left unchanged");
                self.clone()
            }
        }
    }
    fn shift(&self, count: i64, unit: i64) -> Carbon {
        match count.checked_mul(unit).and_then(TimeDelta::try_seconds) {
            Some(delta) => self.add(delta),
            None => {
                warn!(count, unit, "shift out of range, value left unchanged");
                self.clone()
            }
        }
    }
    pub fn add_minutes(&self, minutes: i64) -> Carbon {
        self.shift(minutes, MINUTE)
    }
    pub fn add_minute(&self) -> Carbon {
        self.add_minutes(1)
    }
    pub fn add_hours(&self, hours: i64) -> Carbon {
        self.shift(hours, HOUR)
    }
    pub fn add_hour(&self) -> Carbon {
        self.add_hours(1)
    }
    /// Whole 24 hour periods, not calendar days.
    pub fn add_days(&self, days: i64) -> Carbon {
        self.shift(days, DAY)
    }
    pub fn add_day(&self) -> Carbon {
        self.add_days(1)
    }
    pub fn sub_days(&self, days: i64) -> Carbon {
        self.add_days(days.saturating_neg())
    }
    pub fn add_weeks(&self, weeks: i64) -> Carbon {
        self.shift(weeks, WEEK)
    }
    pub fn add_week(&self) -> Carbon {
        self.add_weeks(1)
    }

    // ------------- Calendar shifts -------------
    /// Moves the month field. A day that does not exist in the target month is
    /// clamped to its last day, so Jan 31 + 1 month is Feb 28 (or 29).
    pub fn add_months(&self, months: i64) -> Carbon {
        let local = self.t.naive_local();
        let shifted = u32::try_from(months.unsigned_abs())
            .ok()
            .map(Months::new)
            .and_then(|span| {
                if months >= 0 {
                    local.checked_add_months(span)
                } else {
                    local.checked_sub_months(span)
                }
            });
        self.at_local_or_unchanged(shifted, "add_months")
    }
    pub fn add_month(&self) -> Carbon {
        self.add_months(1)
    }
    /// Feb 29 lands on Feb 28 in non-leap years.
    pub fn add_years(&self, years: i64) -> Carbon {
        match years.checked_mul(12) {
            Some(months) => self.add_months(months),
            None => {
                warn!(years, "add_years out of range, value left unchanged");
                self.clone()
            }
        }
    }
    pub fn add_year(&self) -> Carbon {
        self.add_years(1)
    }

    // ------------- Truncation -------------
    pub fn start_of_minute(&self) -> Carbon {
        let local = self.t.naive_local();
        let time = NaiveTime::from_hms_opt(local.hour(), local.minute(), 0).unwrap_or(NaiveTime::MIN);
        self.at_same_offset(local.date().and_time(time), "start_of_minute")
    }
    pub fn end_of_minute(&self) -> Carbon {
        self.start_of_minute().add_minute().add(-TimeDelta::nanoseconds(1))
    }
    pub fn start_of_hour(&self) -> Carbon {
        let local = self.t.naive_local();
        let time = NaiveTime::from_hms_opt(local.hour(), 0, 0).unwrap_or(NaiveTime::MIN);
        self.at_same_offset(local.date().and_time(time), "start_of_hour")
    }
    pub fn end_of_hour(&self) -> Carbon {
        self.start_of_hour().add_hour().add(-TimeDelta::nanoseconds(1))
    }
    pub fn start_of_day(&self) -> Carbon {
        self.midnight_or_unchanged(Some(self.t.date_naive()), "start_of_day")
    }
    pub fn end_of_day(&self) -> Carbon {
        self.last_instant_before(self.t.date_naive().succ_opt(), "end_of_day")
    }
    /// First day of the week holding this value, per the configured week-start day.
    pub fn start_of_week(&self) -> Carbon {
        self.midnight_or_unchanged(self.week_start_date(), "start_of_week")
    }
    pub fn end_of_week(&self) -> Carbon {
        let next = self
            .week_start_date()
            .and_then(|date| date.checked_add_days(Days::new(7)));
        self.last_instant_before(next, "end_of_week")
    }
    pub fn start_of_month(&self) -> Carbon {
        let first = self.first_of_month();
        self.midnight_or_unchanged(first, "start_of_month")
    }
    pub fn end_of_month(&self) -> Carbon {
        let next = self
            .first_of_month()
            .and_then(|date| date.checked_add_months(Months::new(1)));
        self.last_instant_before(next, "end_of_month")
    }
    pub fn start_of_year(&self) -> Carbon {
        let first = NaiveDate::from_ymd_opt(self.t.year(), 1, 1);
        self.midnight_or_unchanged(first, "start_of_year")
    }
    pub fn end_of_year(&self) -> Carbon {
        let next = self
            .t
            .year()
            .checked_add(1)
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
        self.last_instant_before(next, "end_of_year")
    }

    // ------------- Helpers -------------
    fn derive(&self, t: DateTime<FixedOffset>) -> Carbon {
        Carbon {
            t,
            zone: self.zone,
            valid: self.valid,
            settings: Arc::clone(&self.settings),
        }
    }
    fn at_utc(&self, utc: DateTime<Utc>) -> Carbon {
        self.derive(self.zone.from_utc(utc))
    }
    // wall-clock time read with the receiver's current offset, never ambiguous
    fn at_same_offset(&self, local: NaiveDateTime, op: &str) -> Carbon {
        let offset = i64::from(self.t.offset().local_minus_utc());
        match local.checked_sub_signed(TimeDelta::seconds(offset)) {
            Some(utc) => self.at_utc(Utc.from_utc_datetime(&utc)),
            None => {
                warn!(op, "out of range, value left unchanged");
                self.clone()
            }
        }
    }
    fn resolve_local(&self, local: Option<NaiveDateTime>) -> Option<DateTime<FixedOffset>> {
        local.and_then(|local| self.zone.from_local(local))
    }
    fn at_local_or_unchanged(&self, local: Option<NaiveDateTime>, op: &str) -> Carbon {
        match self.resolve_local(local) {
            Some(t) => self.derive(t),
            None => {
                warn!(op, "out of range, value left unchanged");
                self.clone()
            }
        }
    }
    fn midnight_or_unchanged(&self, date: Option<NaiveDate>, op: &str) -> Carbon {
        self.at_local_or_unchanged(date.map(|d| d.and_time(NaiveTime::MIN)), op)
    }
    fn last_instant_before(&self, next_start: Option<NaiveDate>, op: &str) -> Carbon {
        match self.resolve_local(next_start.map(|d| d.and_time(NaiveTime::MIN))) {
            Some(t) => self.derive(t).add(-TimeDelta::nanoseconds(1)),
            None => {
                warn!(op, "out of range, value left unchanged");
                self.clone()
            }
        }
    }
    fn first_of_month(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.t.year(), self.t.month(), 1)
    }
    fn week_start_date(&self) -> Option<NaiveDate> {
        let date = self.t.date_naive();
        let weekday = date.weekday().num_days_from_sunday();
        let start = self.settings.week_start.num_days_from_sunday();
        let offset = (weekday + 7 - start) % 7;
        date.checked_sub_days(Days::new(u64::from(offset)))
    }
}

// Offsets in the text win over the interpretation zone; the instant is then
// re-expressed in that zone.
fn parse_layout(value: &str, layout: &str, zone: Zone) -> Option<DateTime<FixedOffset>> {
    if layout == RFC3339 {
        if let Ok(t) = DateTime::parse_from_rfc3339(value) {
            return Some(zone.from_utc(t.to_utc()));
        }
    }
    if let Ok(t) = DateTime::parse_from_str(value, layout) {
        return Some(zone.from_utc(t.to_utc()));
    }
    // a wall-clock time outside the representable range fails this layout
    if let Ok(local) = NaiveDateTime::parse_from_str(value, layout) {
        return zone.from_local(local);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, layout) {
        return zone.from_local(date.and_time(NaiveTime::MIN));
    }
    None
}

impl Default for Carbon {
    fn default() -> Self {
        Calendar::global().zero()
    }
}

impl PartialEq for Carbon {
    fn eq(&self, other: &Self) -> bool {
        self.t == other.t && self.valid == other.valid
    }
}
impl Eq for Carbon {}
impl Ord for Carbon {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.t, self.valid).cmp(&(other.t, other.valid))
    }
}
impl PartialOrd for Carbon {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Hash for Carbon {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.t.hash(state);
        self.valid.hash(state);
    }
}

impl fmt::Debug for Carbon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Carbon")
            .field("t", &self.t)
            .field("zone", &self.zone)
            .field("valid", &self.valid)
            .finish()
    }
}

impl fmt::Display for Carbon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.t.format("%Y-%m-%d %H:%M:%S%.9f %:z"), self.zone)
    }
}

impl Serialize for Carbon {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.record().serialize(serializer)
    }
}
