use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Offset, TimeZone, Utc, Weekday};
use config::{Config, Environment, File};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::carbon::registry::{DATE_LAYOUT, DATETIME_LAYOUT, RFC3339, Registry};
use crate::carbon::{Carbon, Zone};
use crate::error::Result;

lazy_static! {
    static ref DEFAULT_CALENDAR: RwLock<Arc<Calendar>> = RwLock::new(Arc::new(Calendar::default()));
}

/// Process-wide defaults used when building and rendering [`Carbon`] values.
///
/// Nothing is validated when a field is set; a broken layout shows up as a
/// parse or format failure later on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub datetime_layout: String,
    pub date_layout: String,
    pub week_start: Weekday,
    pub timezone: Zone,
    /// Extra parse layouts appended after the built-in ones.
    pub layouts: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            datetime_layout: String::from(DATETIME_LAYOUT),
            date_layout: String::from(DATE_LAYOUT),
            week_start: Weekday::Mon,
            timezone: Zone::Local,
            layouts: Vec::new(),
        }
    }
}

impl Settings {
    /// Layers an optional settings file and `SUPPORTS__*` environment variables,
    /// e.g. `SUPPORTS__WEEK_START=Sunday` or `SUPPORTS__TIMEZONE=+08:00`.
    pub fn load(path: Option<&Path>) -> Result<Settings> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            info!("Loading settings from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix("SUPPORTS")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("layouts")
                .try_parsing(true),
        );
        let settings = builder.build()?.try_deserialize::<Settings>()?;
        debug!(?settings, "settings loaded");
        Ok(settings)
    }
    pub fn with_datetime_layout(mut self, layout: impl Into<String>) -> Self {
        self.datetime_layout = layout.into();
        self
    }
    pub fn with_date_layout(mut self, layout: impl Into<String>) -> Self {
        self.date_layout = layout.into();
        self
    }
    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }
    pub fn with_timezone(mut self, timezone: Zone) -> Self {
        self.timezone = timezone;
        self
    }
    pub fn with_layouts<I, S>(mut self, layouts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layouts.extend(layouts.into_iter().map(Into::into));
        self
    }
}

/// Factory for [`Carbon`] values: owns the [`Settings`] and the parse [`Registry`].
#[derive(Debug)]
pub struct Calendar {
    settings: Arc<Settings>,
    registry: Registry,
}

impl Calendar {
    pub fn new(settings: Settings) -> Self {
        let registry = Registry::new(vec![
            settings.datetime_layout.clone(),
            settings.date_layout.clone(),
            String::from(RFC3339),
        ]);
        registry.register_layouts(settings.layouts.iter().cloned());
        Self {
            settings: Arc::new(settings),
            registry,
        }
    }
    /// The calendar used by adapters that are handed no calendar of their own,
    /// such as `FromSql` and `Deserialize` implementations.
    pub fn global() -> Arc<Calendar> {
        let current = DEFAULT_CALENDAR.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current)
    }
    /// Replaces the process default calendar. Meant to be called once at start-up.
    pub fn install(calendar: Calendar) -> Arc<Calendar> {
        let calendar = Arc::new(calendar);
        let mut current = DEFAULT_CALENDAR.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::clone(&calendar);
        info!(timezone = %calendar.settings.timezone, week_start = ?calendar.settings.week_start, "default calendar installed");
        calendar
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
    pub fn register_layouts<I, S>(&self, layouts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registry.register_layouts(layouts);
    }
    pub fn current_layouts(&self) -> Vec<String> {
        self.registry.current_layouts()
    }

    pub fn zero(&self) -> Carbon {
        Carbon::zero(Arc::clone(&self.settings))
    }
    pub fn now(&self, zone: Option<Zone>) -> Carbon {
        let zone = zone.unwrap_or(self.settings.timezone);
        Carbon::new(zone.from_utc(Utc::now()), zone, Arc::clone(&self.settings))
    }
    /// Wraps an instant. Without a zone the instant keeps its own offset.
    pub fn from_instant<Tz: TimeZone>(&self, instant: DateTime<Tz>, zone: Option<Zone>) -> Carbon {
        let zone = zone.unwrap_or_else(|| Zone::Fixed(instant.offset().fix()));
        Carbon::new(
            zone.from_utc(instant.with_timezone(&Utc)),
            zone,
            Arc::clone(&self.settings),
        )
    }
    /// Tries each layout in order against the trimmed text and returns the first match.
    ///
    /// `layouts` defaults to a snapshot of the registry, `zone` to the configured
    /// timezone. Text carrying its own offset keeps its instant and is expressed
    /// in `zone`.
    pub fn parse(&self, text: &str, zone: Option<Zone>, layouts: Option<&[String]>) -> Result<Carbon> {
        let zone = zone.unwrap_or(self.settings.timezone);
        match layouts {
            Some(layouts) => Carbon::parse_in(text, zone, layouts, Arc::clone(&self.settings)),
            None => {
                let layouts = self.registry.current_layouts();
                Carbon::parse_in(text, zone, &layouts, Arc::clone(&self.settings))
            }
        }
    }
    pub fn today(&self) -> Carbon {
        self.now(None).start_of_day()
    }
    pub fn tomorrow(&self) -> Carbon {
        self.now(None).add_day().start_of_day()
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
