use std::error::Error;

use async_trait::async_trait;

use crate::holiday::{Country, Holiday};

/// A read-only source of public holidays
#[async_trait]
pub trait HolidaySource {
    /// Returns the public holidays of a country for a whole year
    async fn public_holidays(&self, year: i32, country_code: &str) -> Result<Vec<Holiday>, Box<dyn Error>>;

    /// Returns the countries this source knows about
    async fn available_countries(&self) -> Result<Vec<Country>, Box<dyn Error>>;

    /// Returns the upcoming public holidays of a country (for the next 365 days)
    async fn next_public_holidays(&self, country_code: &str) -> Result<Vec<Holiday>, Box<dyn Error>>;
}
