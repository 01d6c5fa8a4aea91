use std::sync::{Mutex, PoisonError};

use tracing::debug;

/// `YYYY-MM-DD HH:MM:SS`
pub const DATETIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";
/// `YYYY-MM-DD`
pub const DATE_LAYOUT: &str = "%Y-%m-%d";
/// RFC 3339, e.g. `2019-01-01T00:02:00Z` or `2019-01-01T08:02:00+08:00`.
pub const RFC3339: &str = "%+";

/// Ordered list of layouts tried when parsing text into a [`Carbon`](crate::carbon::Carbon).
///
/// The list only ever grows. Parsing works on a snapshot taken from
/// [`Registry::current_layouts`], so registrations racing with a parse never
/// change the list that parse is walking.
#[derive(Debug)]
pub struct Registry {
    layouts: Mutex<Vec<String>>,
}

impl Registry {
    /// Starts from the given layouts, or from the built-ins when none are given.
    pub fn new(defaults: Vec<String>) -> Self {
        let layouts = if defaults.is_empty() {
            Self::builtin()
        } else {
            defaults
        };
        Self {
            layouts: Mutex::new(layouts),
        }
    }
    pub fn builtin() -> Vec<String> {
        vec![
            String::from(DATETIME_LAYOUT),
            String::from(DATE_LAYOUT),
            String::from(RFC3339),
        ]
    }
    pub fn register_layouts<I, S>(&self, layouts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let added: Vec<String> = layouts.into_iter().map(Into::into).collect();
        if added.is_empty() {
            return;
        }
        // extend is the only mutation, a poisoned list is still whole
        let mut kept = self.layouts.lock().unwrap_or_else(PoisonError::into_inner);
        debug!(layouts = ?added, "registering parse layouts");
        kept.extend(added);
    }
    pub fn current_layouts(&self) -> Vec<String> {
        self.layouts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
    pub fn len(&self) -> usize {
        self.layouts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
