//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// Base URL of the public holiday service (without a trailing slash).
/// Feel free to override it when initing this library (e.g. to point to a mirror).
pub static HOLIDAY_SERVICE_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("https://date.nager.at/api/v3".to_string())));

/// The country whose holidays are displayed before the user picks another one.
/// Feel free to override it when initing this library.
pub static DEFAULT_COUNTRY_CODE: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("US".to_string())));

/// Title given to freshly created tasks
pub const DEFAULT_TASK_TITLE: &str = "New Task";

/// Once a task carries more labels than this, adding another one collapses its label chips
pub const LABELS_MINIMIZE_THRESHOLD: usize = 2;

/// How long a cell stays highlighted after jumping to it from the search results
pub const CELL_HIGHLIGHT_SECONDS: i64 = 2;

/// Read the current value of one of the overridable settings
pub fn read_setting(setting: &Lazy<Arc<Mutex<String>>>) -> String {
    match setting.lock() {
        Ok(value) => value.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Override one of the settings
pub fn override_setting<S: ToString>(setting: &Lazy<Arc<Mutex<String>>>, new_value: S) {
    match setting.lock() {
        Ok(mut value) => *value = new_value.to_string(),
        Err(poisoned) => *poisoned.into_inner() = new_value.to_string(),
    }
}
