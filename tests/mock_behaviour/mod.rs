//! A mocked holiday source, that can be told to return errors on some tests
#![allow(dead_code)]

use std::error::Error;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};

use month_planner::holiday::{Country, Holiday};
use month_planner::traits::HolidaySource;

/// This stores some behaviour tweaks, that describe how a mocked instance will behave during a given test
///
/// So that a functions fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every action will be allowed
    pub is_suspended: bool,

    pub public_holidays_behaviour: (u32, u32),
    pub available_countries_behaviour: (u32, u32),
    pub next_public_holidays_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            public_holidays_behaviour: (0, n_fails),
            available_countries_behaviour: (0, n_fails),
            next_public_holidays_behaviour: (0, n_fails),
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_get_public_holidays(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.public_holidays_behaviour, "public_holidays")
    }
    pub fn can_get_available_countries(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.available_countries_behaviour, "available_countries")
    }
    pub fn can_get_next_public_holidays(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.next_public_holidays_behaviour, "next_public_holidays")
    }
}


/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), Box<dyn Error>> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 = value.0 - 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else {
        if remaining_failures > 0 {
            value.1 = value.1 - 1;
            log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
            Err(format!("Mocked behaviour requires this {} to fail this time. ({:?})", descr, value).into())
        } else {
            log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
            Ok(())
        }
    }
}


/// A [`HolidaySource`] that serves canned data
pub struct MockHolidaySource {
    holidays: Vec<Holiday>,
    countries: Vec<Country>,
    behaviour: Mutex<MockBehaviour>,
    requests: Mutex<Vec<(i32, String)>>,
}

impl MockHolidaySource {
    pub fn new(behaviour: MockBehaviour) -> Self {
        Self {
            holidays: sample_holidays(),
            countries: sample_countries(),
            behaviour: Mutex::new(behaviour),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// The (year, country) pairs that have been requested so far
    pub fn requests(&self) -> Vec<(i32, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HolidaySource for MockHolidaySource {
    async fn public_holidays(&self, year: i32, country_code: &str) -> Result<Vec<Holiday>, Box<dyn Error>> {
        self.requests.lock().unwrap().push((year, country_code.to_string()));
        self.behaviour.lock().unwrap().can_get_public_holidays()?;
        Ok(self.holidays.iter()
            .filter(|h| h.country_code == country_code && h.date.year() == year)
            .cloned()
            .collect())
    }

    async fn available_countries(&self) -> Result<Vec<Country>, Box<dyn Error>> {
        self.behaviour.lock().unwrap().can_get_available_countries()?;
        Ok(self.countries.clone())
    }

    async fn next_public_holidays(&self, country_code: &str) -> Result<Vec<Holiday>, Box<dyn Error>> {
        self.behaviour.lock().unwrap().can_get_next_public_holidays()?;
        Ok(self.holidays.iter()
            .filter(|h| h.country_code == country_code)
            .cloned()
            .collect())
    }
}

fn holiday(y: i32, m: u32, d: u32, name: &str, country_code: &str) -> Holiday {
    Holiday {
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        name: name.to_string(),
        local_name: None,
        country_code: country_code.to_string(),
    }
}

pub fn sample_holidays() -> Vec<Holiday> {
    vec![
        holiday(2024, 6, 19, "Juneteenth National Independence Day", "US"),
        holiday(2024, 7, 4, "Independence Day", "US"),
        holiday(2025, 7, 4, "Independence Day", "US"),
        holiday(2024, 7, 14, "Bastille Day", "FR"),
        holiday(2024, 5, 20, "Whit Monday", "FR"),
        holiday(2024, 5, 20, "Whit Monday", "DE"),
    ]
}

pub fn sample_countries() -> Vec<Country> {
    [("DE", "Germany"), ("FR", "France"), ("US", "United States")]
        .iter()
        .map(|(code, name)| Country { country_code: code.to_string(), name: name.to_string() })
        .collect()
}


#[test]
fn test_mock_behaviour() {
    let mut ok = MockBehaviour::new();
    assert!(ok.can_get_public_holidays().is_ok());
    assert!(ok.can_get_public_holidays().is_ok());
    assert!(ok.can_get_available_countries().is_ok());

    let mut now = MockBehaviour::fail_now(2);
    assert!(now.can_get_public_holidays().is_err());
    assert!(now.can_get_available_countries().is_err());
    assert!(now.can_get_available_countries().is_err());
    assert!(now.can_get_public_holidays().is_err());
    assert!(now.can_get_public_holidays().is_ok());
    assert!(now.can_get_available_countries().is_ok());

    let mut custom = MockBehaviour {
        public_holidays_behaviour: (1, 2),
        ..MockBehaviour::default()
    };
    assert!(custom.can_get_public_holidays().is_ok());
    assert!(custom.can_get_public_holidays().is_err());
    custom.suspend();
    assert!(custom.can_get_public_holidays().is_ok());
    custom.resume();
    assert!(custom.can_get_public_holidays().is_err());
    assert!(custom.can_get_public_holidays().is_ok());
}
