//! Persistence adapter boundary for [`Carbon`].
//!
//! Values go into a database as their datetime string and come back through
//! [`Carbon::scan`], which accepts bytes, text or a native instant. Text is
//! parsed with the same layout fallback as [`Calendar::parse`]. Empty text and
//! the all-zero sentinels decode to the zero value without an error, and the
//! zero value is written back as empty text.
//!
//! Any other kind of driver value is ignored and leaves the receiver as it was.

// used for persistence
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use chrono::{DateTime, FixedOffset};
use tracing::warn;

use crate::carbon::{Calendar, Carbon};
use crate::error::Result;

/// Text that stands for "no date" rather than a malformed one.
pub const ZERO_SENTINELS: &[&str] = &[
    "",
    "0001-01-01 00:00:00",
    "0001-01-01",
    "0000-00-00 00:00:00",
    "0000-00-00",
];

/// A raw value handed back by a database driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriverValue<'a> {
    Null,
    Integer(i64),
    Real(f64),
    Text(&'a str),
    Bytes(&'a [u8]),
    Instant(DateTime<FixedOffset>),
}

impl<'a> From<ValueRef<'a>> for DriverValue<'a> {
    fn from(value: ValueRef<'a>) -> Self {
        match value {
            ValueRef::Null => DriverValue::Null,
            ValueRef::Integer(i) => DriverValue::Integer(i),
            ValueRef::Real(f) => DriverValue::Real(f),
            ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => DriverValue::Text(text),
                Err(_) => DriverValue::Bytes(bytes),
            },
            ValueRef::Blob(bytes) => DriverValue::Bytes(bytes),
        }
    }
}

pub fn is_zero_sentinel(text: &str) -> bool {
    ZERO_SENTINELS.contains(&text.trim())
}

impl Carbon {
    /// Storable text form, the datetime string. The zero value is stored as
    /// empty text whatever the configured layout.
    pub fn value(&self) -> String {
        if self.is_valid() {
            self.to_date_time_string()
        } else {
            String::new()
        }
    }
    /// Converts a driver value using the process default calendar.
    pub fn scan(&mut self, src: DriverValue<'_>) -> Result<()> {
        self.scan_with(&Calendar::global(), src)
    }
    pub fn scan_with(&mut self, calendar: &Calendar, src: DriverValue<'_>) -> Result<()> {
        match src {
            DriverValue::Bytes(bytes) => self.scan_text(calendar, &String::from_utf8_lossy(bytes)),
            DriverValue::Text(text) => self.scan_text(calendar, text),
            DriverValue::Instant(t) => {
                *self = calendar.from_instant(t, None);
                Ok(())
            }
            other => {
                warn!(value = ?other, "unsupported driver value left unconverted");
                Ok(())
            }
        }
    }
    /// Same as scanning raw bytes.
    pub fn scan_input(&mut self, data: &[u8]) -> Result<()> {
        self.scan(DriverValue::Bytes(data))
    }
    fn scan_text(&mut self, calendar: &Calendar, text: &str) -> Result<()> {
        *self = if is_zero_sentinel(text) {
            calendar.zero()
        } else {
            calendar.parse(text, None, None)?
        };
        Ok(())
    }
}

impl ToSql for Carbon {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.value()))
    }
}

impl FromSql for Carbon {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let calendar = Calendar::global();
        let mut carbon = calendar.zero();
        carbon
            .scan_with(&calendar, DriverValue::from(value))
            .map_err(|e| FromSqlError::Other(Box::new(e)))?;
        Ok(carbon)
    }
}
