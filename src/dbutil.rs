//! Database scalar adapters.
//!
//! * [`Datetime`] and [`Date`] are distinct wrappers over [`Carbon`] sharing the
//!   [`Temporal`] trait, so a date cannot be moved by hours or minutes.
//! * [`SliceString`] and [`SliceInt`] are stored as comma-joined text.
//! * [`JsonObject`] is stored as JSON text.
//!
//! All of them implement rusqlite's `ToSql`/`FromSql` and serde's traits.

// used for persistence
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
// used for the JSON representation of the adapters
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use std::fmt;
use std::ops;

use crate::carbon::sql::is_zero_sentinel;
use crate::carbon::{Calendar, Carbon};
use crate::error::{Result, SupportsError};

/// Calendar operations shared by [`Datetime`] and [`Date`], down to day precision.
pub trait Temporal: Sized {
    fn carbon(&self) -> &Carbon;
    fn from_carbon(carbon: Carbon) -> Self;

    fn is_valid(&self) -> bool {
        self.carbon().is_valid()
    }
    fn timestamp(&self) -> i64 {
        self.carbon().timestamp()
    }
    fn to_date_string(&self) -> String {
        self.carbon().to_date_string()
    }
    fn add_days(&self, days: i64) -> Self {
        Self::from_carbon(self.carbon().add_days(days))
    }
    fn add_weeks(&self, weeks: i64) -> Self {
        Self::from_carbon(self.carbon().add_weeks(weeks))
    }
    fn add_months(&self, months: i64) -> Self {
        Self::from_carbon(self.carbon().add_months(months))
    }
    fn add_years(&self, years: i64) -> Self {
        Self::from_carbon(self.carbon().add_years(years))
    }
    fn start_of_week(&self) -> Self {
        Self::from_carbon(self.carbon().start_of_week())
    }
    fn end_of_week(&self) -> Self {
        Self::from_carbon(self.carbon().end_of_week())
    }
    fn start_of_month(&self) -> Self {
        Self::from_carbon(self.carbon().start_of_month())
    }
    fn end_of_month(&self) -> Self {
        Self::from_carbon(self.carbon().end_of_month())
    }
    fn start_of_year(&self) -> Self {
        Self::from_carbon(self.carbon().start_of_year())
    }
    fn end_of_year(&self) -> Self {
        Self::from_carbon(self.carbon().end_of_year())
    }
}

// ------------- Datetime -------------
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Datetime(Carbon);

impl Datetime {
    pub fn new(carbon: Carbon) -> Self {
        Self(carbon)
    }
    pub fn now() -> Self {
        Self(Carbon::now())
    }
    /// Decodes text, quoted or not. Empty text and the zero sentinels give the zero value.
    pub fn from_input(data: &[u8]) -> Result<Self> {
        let text = String::from_utf8_lossy(data);
        let text = text.trim().trim_matches('"');
        let calendar = Calendar::global();
        if is_zero_sentinel(text) {
            return Ok(Self(calendar.zero()));
        }
        calendar.parse(text, None, None).map(Self)
    }
    pub fn to_date_time_string(&self) -> String {
        self.0.to_date_time_string()
    }
    /// Storable text form; empty for the zero value.
    pub fn value(&self) -> String {
        self.0.value()
    }
    pub fn of_date(&self) -> Date {
        Date::from_carbon(self.0.clone())
    }
    pub fn into_inner(self) -> Carbon {
        self.0
    }
    pub fn add_minutes(&self, minutes: i64) -> Self {
        Self(self.0.add_minutes(minutes))
    }
    pub fn add_hours(&self, hours: i64) -> Self {
        Self(self.0.add_hours(hours))
    }
    pub fn start_of_minute(&self) -> Self {
        Self(self.0.start_of_minute())
    }
    pub fn end_of_minute(&self) -> Self {
        Self(self.0.end_of_minute())
    }
    pub fn start_of_hour(&self) -> Self {
        Self(self.0.start_of_hour())
    }
    pub fn end_of_hour(&self) -> Self {
        Self(self.0.end_of_hour())
    }
    pub fn start_of_day(&self) -> Self {
        Self(self.0.start_of_day())
    }
    pub fn end_of_day(&self) -> Self {
        Self(self.0.end_of_day())
    }
}

impl Temporal for Datetime {
    fn carbon(&self) -> &Carbon {
        &self.0
    }
    fn from_carbon(carbon: Carbon) -> Self {
        Self(carbon)
    }
}

impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_date_time_string())
    }
}
impl Serialize for Datetime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.value())
    }
}
impl<'de> Deserialize<'de> for Datetime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Datetime::from_input(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}
impl ToSql for Datetime {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}
impl FromSql for Datetime {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Carbon::column_result(value).map(Self)
    }
}

// ------------- Date -------------
/// A calendar day. The wrapped value always sits at the start of its day.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(Carbon);

impl Date {
    pub fn today() -> Self {
        Self(Carbon::today())
    }
    /// Storable text form; empty for the zero value.
    pub fn value(&self) -> String {
        if self.is_valid() {
            self.to_date_string()
        } else {
            String::new()
        }
    }
    /// Decodes `YYYY-MM-DD` text, quoted or not. Empty text and the zero sentinels
    /// such as `0000-00-00` give the zero value.
    pub fn from_input(data: &[u8]) -> Result<Self> {
        let text = String::from_utf8_lossy(data);
        let text = text.trim().trim_matches('"');
        let calendar = Calendar::global();
        if is_zero_sentinel(text) {
            return Ok(Self(calendar.zero()));
        }
        let layouts = [calendar.settings().date_layout.clone()];
        calendar
            .parse(text, None, Some(&layouts))
            .map(Self::from_carbon)
    }
    pub fn into_inner(self) -> Carbon {
        self.0
    }
}

impl Temporal for Date {
    fn carbon(&self) -> &Carbon {
        &self.0
    }
    fn from_carbon(carbon: Carbon) -> Self {
        if carbon.is_valid() {
            Self(carbon.start_of_day())
        } else {
            Self(carbon)
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_date_string())
    }
}
impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value())
    }
}
impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Date::from_input(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}
impl ToSql for Date {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.value()))
    }
}
impl FromSql for Date {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Carbon::column_result(value).map(Self::from_carbon)
    }
}

/// Creation and update stamps carried by persisted records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WithTimestamps {
    pub created_at: Datetime,
    pub updated_at: Datetime,
}

impl WithTimestamps {
    pub fn now() -> Self {
        let now = Datetime::now();
        Self {
            created_at: now.clone(),
            updated_at: now,
        }
    }
    pub fn touch(&self) -> Self {
        Self {
            created_at: self.created_at.clone(),
            updated_at: Datetime::now(),
        }
    }
}

// ------------- Comma-joined lists -------------
fn text_of(value: ValueRef<'_>) -> FromSqlResult<String> {
    match value {
        ValueRef::Null => Ok(String::new()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Ok(String::from_utf8_lossy(bytes).into_owned())
        }
        _ => Err(FromSqlError::InvalidType),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SliceString(Vec<String>);

impl SliceString {
    pub fn new(items: Vec<String>) -> Self {
        Self(items)
    }
    /// Empty text is an empty list.
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            Self(Vec::new())
        } else {
            Self(text.split(',').map(String::from).collect())
        }
    }
    pub fn value(&self) -> String {
        self.0.join(",")
    }
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}
impl ops::Deref for SliceString {
    type Target = Vec<String>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl ToSql for SliceString {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.value()))
    }
}
impl FromSql for SliceString {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        text_of(value).map(|text| Self::parse(&text))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SliceInt(Vec<i64>);

impl SliceInt {
    pub fn new(items: Vec<i64>) -> Self {
        Self(items)
    }
    /// Empty fragments are skipped, anything else must be an integer.
    pub fn parse(text: &str) -> Result<Self> {
        text.split(',')
            .filter(|fragment| !fragment.is_empty())
            .map(|fragment| fragment.trim().parse::<i64>().map_err(SupportsError::from))
            .collect::<Result<Vec<i64>>>()
            .map(Self)
    }
    pub fn value(&self) -> String {
        self.0
            .iter()
            .map(i64::to_string)
            .collect::<Vec<String>>()
            .join(",")
    }
    pub fn into_inner(self) -> Vec<i64> {
        self.0
    }
}
impl ops::Deref for SliceInt {
    type Target = Vec<i64>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl ToSql for SliceInt {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.value()))
    }
}
impl FromSql for SliceInt {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = text_of(value)?;
        Self::parse(&text).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

// ------------- JSON objects -------------
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonObject(Map<String, Value>);

impl JsonObject {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }
    pub fn parse(data: &[u8]) -> Result<Self> {
        Ok(Self(serde_json::from_slice(data)?))
    }
    pub fn value(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}
impl ops::Deref for JsonObject {
    type Target = Map<String, Value>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl ops::DerefMut for JsonObject {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
impl ToSql for JsonObject {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let text = self
            .value()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        Ok(ToSqlOutput::from(text))
    }
}
impl FromSql for JsonObject {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Ok(Self::default()),
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                Self::parse(bytes).map_err(|e| FromSqlError::Other(Box::new(e)))
            }
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

