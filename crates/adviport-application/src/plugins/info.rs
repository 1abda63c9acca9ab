//! Plugins that query the data provider.

use std::sync::Arc;

use adviport_core::error::{AdviPortError, Result};
use adviport_core::plugin::{Plugin, PluginContext, PluginDescriptor};
use adviport_core::session::Session;
use adviport_core::user::favourite_key;
use chrono::{Local, NaiveDate};
use tracing::debug;

use super::render::{airport_table, flight_report, schedule_board};
use super::{
    PluginServices, api_key, catalog_descriptor, current_user, ensure_logged_in, update_current,
};

/// Date format accepted by the flight search.
pub const FLIGHT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses a `DD/MM/YYYY` date, falling back to `today` for blank or malformed input.
pub fn parse_flight_date(input: &str, today: NaiveDate) -> NaiveDate {
    NaiveDate::parse_from_str(input.trim(), FLIGHT_DATE_FORMAT).unwrap_or(today)
}

pub struct PrintSchedulePlugin {
    services: Arc<PluginServices>,
}

impl PrintSchedulePlugin {
    pub fn new(services: Arc<PluginServices>) -> Self {
        Self { services }
    }
}

impl Plugin for PrintSchedulePlugin {
    fn token(&self) -> &str {
        "print_schedule"
    }

    fn descriptor(&self, _session: &Session) -> PluginDescriptor {
        catalog_descriptor(self.token())
    }

    fn invoke(&self, ctx: &mut PluginContext<'_>) -> Result<()> {
        ensure_logged_in(&self.services, ctx)?;

        let icao = ctx
            .ui
            .read_line("Please enter the ICAO code of the airport to get the schedule from: ")
            .unwrap_or_default();
        if icao.is_empty() {
            return Ok(());
        }

        let key = api_key(&self.services, ctx.session)?;
        let schedule = self.services.provider.schedule(&key, &icao)?;
        debug!(
            "Schedule of {}: {} arrivals, {} departures",
            icao,
            schedule.arrivals.len(),
            schedule.departures.len()
        );
        ctx.ui.info(&schedule_board(&schedule, Local::now().naive_local()));
        ctx.ui.read_line("Press Enter to continue");
        Ok(())
    }
}

/// Looks a flight up by number and remembers the search in the profile.
pub struct SearchFlightPlugin {
    services: Arc<PluginServices>,
}

impl SearchFlightPlugin {
    pub fn new(services: Arc<PluginServices>) -> Self {
        Self { services }
    }
}

impl Plugin for SearchFlightPlugin {
    fn token(&self) -> &str {
        "search_by_flight"
    }

    fn descriptor(&self, session: &Session) -> PluginDescriptor {
        let mut descriptor = catalog_descriptor(self.token());
        if let Some(last) = session
            .current_user()
            .and_then(|user| user.last_searched_flight.as_deref())
        {
            descriptor.name = format!("{} (e.g. {last})", descriptor.name);
        }
        descriptor
    }

    fn invoke(&self, ctx: &mut PluginContext<'_>) -> Result<()> {
        ensure_logged_in(&self.services, ctx)?;
        let username = current_user(ctx.session)?.username.clone();
        let today = Local::now().date_naive();

        let number = ctx
            .ui
            .read_line(&format!(
                "{username}, please enter the flight number of flight you want to get info for: "
            ))
            .unwrap_or_default();
        let date = ctx
            .ui
            .read_line(&format!(
                "{username}, specify the date (DD/MM/YYYY) to search for info \
                 or press enter to use default date ({}): ",
                today.format(FLIGHT_DATE_FORMAT)
            ))
            .unwrap_or_default();
        if number.is_empty() {
            return Ok(());
        }

        let date = parse_flight_date(&date, today);
        let key = api_key(&self.services, ctx.session)?;
        let flights = self.services.provider.flights_by_number(&key, &number, date)?;

        let Some(report) = flight_report(&flights) else {
            ctx.ui.error(&format!(
                "No flight with given flight number ({number}) was found."
            ));
            ctx.ui.error("Please check for potential errors in the given flight number.");
            return Err(AdviPortError::not_found("flight", number));
        };
        ctx.ui.info(&report);

        update_current(&self.services, ctx.session, |profile| profile.record_flight_search(&number))
    }
}

pub struct AirportInfoPlugin {
    services: Arc<PluginServices>,
}

impl AirportInfoPlugin {
    pub fn new(services: Arc<PluginServices>) -> Self {
        Self { services }
    }
}

impl Plugin for AirportInfoPlugin {
    fn token(&self) -> &str {
        "airport_info"
    }

    fn descriptor(&self, _session: &Session) -> PluginDescriptor {
        catalog_descriptor(self.token())
    }

    fn invoke(&self, ctx: &mut PluginContext<'_>) -> Result<()> {
        ensure_logged_in(&self.services, ctx)?;
        let username = current_user(ctx.session)?.username.clone();

        let icao = ctx
            .ui
            .read_line(&format!(
                "{username}, please enter the ICAO code of the airport to get information: "
            ))
            .unwrap_or_default();
        let include_runways = ctx
            .ui
            .read_line(&format!(
                "{username}, should runways information be included in the output? (y/N): "
            ))
            .is_some_and(|answer| answer.to_lowercase().starts_with('y'));
        if icao.is_empty() {
            return Ok(());
        }

        let key = api_key(&self.services, ctx.session)?;
        // Favourites already hold the airport descriptor.
        let cached = current_user(ctx.session)?
            .favourite_airports
            .get(&favourite_key(&icao))
            .cloned();
        let airport = match cached {
            Some(airport) => airport,
            None => self.services.provider.airport_by_icao(&key, &icao)?,
        };
        let runways = if include_runways {
            Some(self.services.provider.runways(&key, &icao)?)
        } else {
            None
        };

        ctx.ui.info(&airport_table(&airport, runways.as_deref()));
        Ok(())
    }
}
