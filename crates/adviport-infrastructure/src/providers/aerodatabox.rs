//! AeroDataBox (RapidAPI) provider.
//!
//! Blocking HTTP client; each call sends the user's decrypted key in the
//! `x-rapidapi-key` header.

use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveDateTime};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use adviport_core::aviation::{
    Airport, AirportProvider, Flight, FlightProvider, Runway, RunwayProvider, Schedule,
    ScheduleProvider,
};
use adviport_core::error::{AdviPortError, Result};
use adviport_core::secret::ApiKey;

pub const DEFAULT_BASE_URL: &str = "https://aerodatabox.p.rapidapi.com";
const RAPIDAPI_HOST: &str = "aerodatabox.p.rapidapi.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// How far back and ahead of "now" the schedule board reaches.
const SCHEDULE_LOOKBACK_MINUTES: i64 = 15;
const SCHEDULE_LOOKAHEAD_HOURS: i64 = 4;
const SCHEDULE_QUERY: &str = "withLeg=false&direction=Both&withCancelled=true&withCodeshared=true";

pub struct AeroDataBoxProvider {
    client: Client,
    base_url: String,
}

impl AeroDataBoxProvider {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AdviPortError::provider(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn airport_url(&self, icao: &str) -> String {
        format!("{}/airports/icao/{}", self.base_url, icao.trim().to_lowercase())
    }

    pub fn runways_url(&self, icao: &str) -> String {
        format!("{}/runways", self.airport_url(icao))
    }

    pub fn flight_url(&self, number: &str, date: NaiveDate) -> String {
        let number: String = number.split_whitespace().collect();
        format!(
            "{}/flights/number/{}/{}",
            self.base_url,
            number.to_uppercase(),
            date.format("%Y-%m-%d")
        )
    }

    pub fn schedule_url(&self, icao: &str, now: NaiveDateTime) -> String {
        let from = now - chrono::Duration::minutes(SCHEDULE_LOOKBACK_MINUTES);
        let to = now + chrono::Duration::hours(SCHEDULE_LOOKAHEAD_HOURS);
        format!(
            "{}/flights/airports/icao/{}/{}/{}?{}",
            self.base_url,
            icao.trim().to_uppercase(),
            from.format("%Y-%m-%dT%H:%M"),
            to.format("%Y-%m-%dT%H:%M"),
            SCHEDULE_QUERY,
        )
    }

    /// GETs `url` and decodes the JSON body. An empty 204 response yields `T::default()`.
    fn get_json<T>(&self, url: &str, api_key: &ApiKey) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header("x-rapidapi-key", api_key.expose())
            .header("x-rapidapi-host", RAPIDAPI_HOST)
            .send()
            .map_err(|e| AdviPortError::provider(format!("request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(T::default());
        }
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("unknown status");
            return Err(AdviPortError::provider(format!(
                "{reason} ({})",
                status.as_u16()
            )));
        }

        response
            .json::<T>()
            .map_err(|e| AdviPortError::provider(format!("failed to parse response: {e}")))
    }
}

impl AirportProvider for AeroDataBoxProvider {
    fn airport_by_icao(&self, api_key: &ApiKey, icao: &str) -> Result<Airport> {
        let airport: Airport = self.get_json(&self.airport_url(icao), api_key)?;
        if airport.icao.is_empty() {
            return Err(AdviPortError::not_found("airport", icao.trim().to_uppercase()));
        }
        Ok(airport)
    }
}

impl RunwayProvider for AeroDataBoxProvider {
    fn runways(&self, api_key: &ApiKey, icao: &str) -> Result<Vec<Runway>> {
        self.get_json(&self.runways_url(icao), api_key)
    }
}

impl ScheduleProvider for AeroDataBoxProvider {
    fn schedule(&self, api_key: &ApiKey, icao: &str) -> Result<Schedule> {
        let url = self.schedule_url(icao, Local::now().naive_local());
        self.get_json(&url, api_key)
    }
}

impl FlightProvider for AeroDataBoxProvider {
    fn flights_by_number(
        &self,
        api_key: &ApiKey,
        number: &str,
        date: NaiveDate,
    ) -> Result<Vec<Flight>> {
        self.get_json(&self.flight_url(number, date), api_key)
    }
}
