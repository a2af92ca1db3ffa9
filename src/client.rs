//! This module provides a client to the public holiday service

use std::error::Error;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{read_setting, HOLIDAY_SERVICE_URL};
use crate::holiday::{Country, Holiday};
use crate::traits::HolidaySource;


/// A [`HolidaySource`] that fetches its data from the holiday web service
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    /// Create a client for the service at `base_url` (e.g. `https://date.nager.at/api/v3`). This does not start a connection
    pub fn new<S: AsRef<str>>(base_url: S) -> Result<Self, Box<dyn Error>> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        if base_url.cannot_be_a_base() {
            return Err(format!("{} cannot be used as a base URL", base_url).into());
        }
        // Make sure joined paths are appended rather than replacing the last segment
        if base_url.path().ends_with('/') == false {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Create a client for the service configured in [`HOLIDAY_SERVICE_URL`]
    pub fn from_settings() -> Result<Self, Box<dyn Error>> {
        Self::new(read_setting(&HOLIDAY_SERVICE_URL))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn public_holidays_url(&self, year: i32, country_code: &str) -> Result<Url, Box<dyn Error>> {
        Ok(self.base_url.join(&format!("PublicHolidays/{}/{}", year, country_code))?)
    }

    pub(crate) fn available_countries_url(&self) -> Result<Url, Box<dyn Error>> {
        Ok(self.base_url.join("AvailableCountries")?)
    }

    pub(crate) fn next_public_holidays_url(&self, country_code: &str) -> Result<Url, Box<dyn Error>> {
        Ok(self.base_url.join(&format!("NextPublicHolidays/{}", country_code))?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Box<dyn Error>> {
        log::debug!("GET {}", url);
        let response = self.http
            .get(url.clone())
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?} for {}", response.status(), url).into());
        }

        let parsed = response.json::<T>().await?;
        Ok(parsed)
    }
}

#[async_trait]
impl HolidaySource for Client {
    async fn public_holidays(&self, year: i32, country_code: &str) -> Result<Vec<Holiday>, Box<dyn Error>> {
        let url = self.public_holidays_url(year, country_code)?;
        self.get_json(url).await
    }

    async fn available_countries(&self) -> Result<Vec<Country>, Box<dyn Error>> {
        let url = self.available_countries_url()?;
        self.get_json(url).await
    }

    async fn next_public_holidays(&self, country_code: &str) -> Result<Vec<Holiday>, Box<dyn Error>> {
        let url = self.next_public_holidays_url(country_code)?;
        self.get_json(url).await
    }
}
