//! Data provider seams.
//!
//! Providers return typed descriptors or fail with a
//! [`AdviPortError::Provider`](crate::error::AdviPortError::Provider) /
//! `NotFound` error. They never touch the session.

use chrono::NaiveDate;

use super::model::{Airport, Flight, Runway, Schedule};
use crate::error::Result;
use crate::secret::ApiKey;

/// Looks up a single airport by ICAO code.
pub trait AirportProvider {
    fn airport_by_icao(&self, api_key: &ApiKey, icao: &str) -> Result<Airport>;
}

/// Fetches the arrivals/departures board of an airport.
pub trait ScheduleProvider {
    fn schedule(&self, api_key: &ApiKey, icao: &str) -> Result<Schedule>;
}

/// Fetches the runways of an airport.
pub trait RunwayProvider {
    fn runways(&self, api_key: &ApiKey, icao: &str) -> Result<Vec<Runway>>;
}

/// Looks up a flight (and its codeshares) by number and date.
pub trait FlightProvider {
    fn flights_by_number(
        &self,
        api_key: &ApiKey,
        number: &str,
        date: NaiveDate,
    ) -> Result<Vec<Flight>>;
}

/// Everything the built-in plugins need from a data source.
pub trait InfoProvider: AirportProvider + ScheduleProvider + RunwayProvider + FlightProvider {}

impl<T> InfoProvider for T where
    T: AirportProvider + ScheduleProvider + RunwayProvider + FlightProvider
{
}
