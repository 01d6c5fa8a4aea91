// used for resolving wall-clock times into instants
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
// zones are read from config files as plain strings
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SupportsError};

// A wall-clock time inside a daylight saving gap does not exist, so it is
// pushed forward in these steps until it does.
const GAP_STEP_MINUTES: i64 = 30;
const GAP_PROBES: usize = 4;

/// The zone a [`Carbon`](crate::carbon::Carbon) is expressed in.
///
/// `Local` delegates to the host's zone rules; there is no zone database of our own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Zone {
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl Zone {
    pub fn name(&self) -> String {
        match self {
            Zone::Local => String::from("Local"),
            Zone::Utc => String::from("UTC"),
            Zone::Fixed(offset) => offset.to_string(),
        }
    }
    /// Expresses an absolute instant in this zone.
    pub fn from_utc(&self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Zone::Local => utc.with_timezone(&Local).fixed_offset(),
            Zone::Utc => utc.fixed_offset(),
            Zone::Fixed(offset) => utc.with_timezone(offset),
        }
    }
    /// Resolves a wall-clock time read in this zone. Ambiguous times take the
    /// earlier instant, times inside a gap move forward to the first valid one.
    /// `None` when the instant falls outside the representable range.
    pub fn from_local(&self, local: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            Zone::Local => resolve(&Local, local),
            Zone::Utc => resolve(&Utc, local),
            Zone::Fixed(offset) => resolve(offset, local),
        }
    }
}

fn resolve<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    let mut probe = local;
    for _ in 0..=GAP_PROBES {
        if let Some(t) = tz.from_local_datetime(&probe).earliest() {
            return Some(t.fixed_offset());
        }
        match probe.checked_add_signed(TimeDelta::minutes(GAP_STEP_MINUTES)) {
            Some(next) => probe = next,
            None => break,
        }
    }
    let offset = tz.offset_from_utc_datetime(&local).fix();
    let utc = local.checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))?;
    Some(DateTime::from_naive_utc_and_offset(utc, offset))
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Zone {
    type Err = SupportsError;
    fn from_str(s: &str) -> Result<Zone> {
        let s = s.trim();
        match s {
            "Local" | "local" | "LOCAL" => Ok(Zone::Local),
            "UTC" | "utc" | "Z" | "z" => Ok(Zone::Utc),
            _ => parse_offset(s)
                .map(Zone::Fixed)
                .ok_or_else(|| SupportsError::Config(format!("unknown timezone {s:?}"))),
        }
    }
}

// accepts +hh, +hhmm and +hh:mm
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl Serialize for Zone {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

impl<'de> Deserialize<'de> for Zone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Zone, D::Error> {
        let s = String::deserialize(deserializer)?;
        Zone::from_str(&s).map_err(serde::de::Error::custom)
    }
}
