//! Aviation domain module.
//!
//! # Module Structure
//!
//! - `model`: Airport, runway, flight and schedule descriptors
//! - `provider`: Traits implemented by airport/flight data sources

mod model;
mod provider;

pub use model::{
    Aircraft, Airline, Airport, Dimension, Flight, GeoEntity, Location, Movement, Runway,
    Schedule, Urls,
};
pub use provider::{AirportProvider, FlightProvider, InfoProvider, RunwayProvider, ScheduleProvider};
