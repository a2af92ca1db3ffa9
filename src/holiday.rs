//! Public holidays, and their overlay on the calendar cells

use std::error::Error;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A public holiday, as returned by the holiday service
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub date: NaiveDate,
    /// English name
    pub name: String,
    /// Name in the country's language
    #[serde(default)]
    pub local_name: Option<String>,
    pub country_code: String,
}

/// A country supported by the holiday service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub country_code: String,
    pub name: String,
}

/// What a cell should display in its holiday area
#[derive(Clone, Debug, PartialEq)]
pub enum CellHolidays<'a> {
    /// A fetch is in flight
    Loading,
    /// The holidays of this day (possibly none)
    Holidays(Vec<&'a Holiday>),
}

impl<'a> CellHolidays<'a> {
    pub fn is_loading(&self) -> bool {
        match self {
            CellHolidays::Loading => true,
            _ => false,
        }
    }

    /// The holidays of this cell, or an empty list while loading
    pub fn holidays(&self) -> &[&'a Holiday] {
        match self {
            CellHolidays::Loading => &[],
            CellHolidays::Holidays(h) => h.as_slice(),
        }
    }
}

/// A ticket for a holiday fetch, handed out by [`HolidayOverlay::request`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HolidayFetch {
    generation: u64,
    year: i32,
    country_code: String,
}

impl HolidayFetch {
    pub fn generation(&self) -> u64    { self.generation    }
    pub fn year(&self) -> i32          { self.year          }
    pub fn country_code(&self) -> &str { &self.country_code }
}

/// The holidays of the displayed (year, country).
///
/// Every new (year, country) request bumps a generation counter. Only the response to the latest request is applied,
/// so that a slow response to an outdated request can never overwrite a more recent one.
#[derive(Clone, Debug, Default)]
pub struct HolidayOverlay {
    generation: u64,
    requested: Option<(i32, String)>,
    loading: bool,
    failed: bool,
    holidays: Vec<Holiday>,
}

impl HolidayOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for the holidays of a (year, country).
    ///
    /// Returns a ticket in case a fetch must be issued, or `None` if this pair is already the current one.
    /// A pair whose last fetch failed is fetched again.
    pub fn request(&mut self, year: i32, country_code: &str) -> Option<HolidayFetch> {
        if let Some((req_year, req_country)) = &self.requested {
            if *req_year == year && req_country == country_code && self.failed == false {
                return None;
            }
        }

        self.generation += 1;
        self.requested = Some((year, country_code.to_string()));
        self.loading = true;
        self.failed = false;
        log::debug!("Requesting holidays for {} {} (generation {})", country_code, year, self.generation);

        Some(HolidayFetch {
            generation: self.generation,
            year,
            country_code: country_code.to_string(),
        })
    }

    /// Apply the outcome of a fetch.
    ///
    /// Failures are logged and result in an empty holiday list. Returns whether the outcome has been applied
    /// (it is discarded when a more recent request has been made since).
    pub fn apply(&mut self, fetch: &HolidayFetch, result: Result<Vec<Holiday>, Box<dyn Error>>) -> bool {
        if fetch.generation != self.generation {
            log::debug!("Discarding stale holidays for {} {} (generation {}, current is {})",
                fetch.country_code, fetch.year, fetch.generation, self.generation);
            return false;
        }

        self.loading = false;
        match result {
            Ok(holidays) => {
                log::info!("Fetched {} holidays for {} {}", holidays.len(), fetch.country_code, fetch.year);
                self.holidays = holidays;
                self.failed = false;
            },
            Err(err) => {
                log::warn!("Failed to fetch holidays for {} {}: {}", fetch.country_code, fetch.year, err);
                self.holidays.clear();
                self.failed = true;
            },
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the (year, country) that has last been requested
    pub fn requested(&self) -> Option<(i32, &str)> {
        self.requested.as_ref().map(|(year, country)| (*year, country.as_str()))
    }

    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Returns what the cell of `date` should display
    pub fn holidays_on(&self, date: NaiveDate) -> CellHolidays<'_> {
        if self.loading {
            return CellHolidays::Loading;
        }
        CellHolidays::Holidays(
            self.holidays.iter()
                .filter(|h| h.date == date)
                .collect()
        )
    }
}

/// Returns the text describing where a holiday is observed (e.g. "Holiday in France").
///
/// Falls back to the country code when `countries` does not know it.
pub fn holiday_origin(holiday: &Holiday, countries: &[Country]) -> String {
    let country_name = countries.iter()
        .find(|c| c.country_code == holiday.country_code)
        .map(|c| c.name.as_str())
        .unwrap_or(holiday.country_code.as_str());
    format!("Holiday in {}", country_name)
}
