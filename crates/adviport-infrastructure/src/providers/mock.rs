//! Offline provider with a small canned data set.
//!
//! Covers Prague (LKPR), Frankfurt (EDDF) and London Heathrow (EGLL) plus a
//! handful of flights between them. Useful without an API key and in tests.

use chrono::NaiveDate;

use adviport_core::aviation::{
    Aircraft, Airline, Airport, AirportProvider, Dimension, Flight, FlightProvider, GeoEntity,
    Location, Movement, Runway, RunwayProvider, Schedule, ScheduleProvider, Urls,
};
use adviport_core::error::{AdviPortError, Result};
use adviport_core::secret::ApiKey;
use tracing::debug;

/// Provider answering from built-in data.
#[derive(Debug, Clone)]
pub struct MockInfoProvider {
    airports: Vec<Airport>,
    flights: Vec<Flight>,
}

impl Default for MockInfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockInfoProvider {
    pub fn new() -> Self {
        let airports = vec![
            airport(
                "LKPR",
                "PRG",
                "Prague Vaclav Havel",
                "Vaclav Havel",
                "Prague",
                ("CZ", "Czechia"),
                (50.1008, 14.26),
                "Europe/Prague",
            ),
            airport(
                "EDDF",
                "FRA",
                "Frankfurt-am-Main",
                "Frankfurt-am-Main",
                "Frankfurt-am-Main",
                ("DE", "Germany"),
                (50.0264, 8.543129),
                "Europe/Berlin",
            ),
            airport(
                "EGLL",
                "LHR",
                "London Heathrow",
                "Heathrow",
                "London",
                ("GB", "United Kingdom"),
                (51.4775, -0.461389),
                "Europe/London",
            ),
        ];

        let flights = vec![
            flight(
                &airports,
                "LH 1393",
                "DLH7P",
                ("LKPR", "EDDF"),
                ("10:20", "11:30"),
                "Arrived",
                408.51,
                ("Lufthansa", "Airbus A320", "D-AIUG"),
            ),
            flight(
                &airports,
                "OK 620",
                "CSA620",
                ("LKPR", "EGLL"),
                ("07:05", "08:10"),
                "Departed",
                1043.2,
                ("Czech Airlines", "Airbus A319", "OK-NEP"),
            ),
            flight(
                &airports,
                "BA 855",
                "BAW855",
                ("EGLL", "LKPR"),
                ("12:55", "15:55"),
                "Expected",
                1043.2,
                ("British Airways", "Airbus A320", "G-EUUA"),
            ),
            flight(
                &airports,
                "LH 1394",
                "DLH2AK",
                ("EDDF", "LKPR"),
                ("12:30", "13:25"),
                "Canceled",
                408.51,
                ("Lufthansa", "Airbus A320", "D-AIUG"),
            ),
        ];

        Self { airports, flights }
    }

    fn find_airport(&self, icao: &str) -> Option<&Airport> {
        let icao = icao.trim();
        self.airports
            .iter()
            .find(|airport| airport.icao.eq_ignore_ascii_case(icao))
    }

    fn require_airport(&self, icao: &str) -> Result<&Airport> {
        self.find_airport(icao)
            .ok_or_else(|| AdviPortError::not_found("airport", icao.trim().to_uppercase()))
    }
}

#[allow(clippy::too_many_arguments)]
fn airport(
    icao: &str,
    iata: &str,
    full_name: &str,
    short_name: &str,
    municipality: &str,
    country: (&str, &str),
    (lat, lon): (f64, f64),
    time_zone: &str,
) -> Airport {
    Airport {
        icao: icao.to_string(),
        iata: iata.to_string(),
        name: Some(full_name.to_string()),
        short_name: short_name.to_string(),
        full_name: full_name.to_string(),
        municipality_name: Some(municipality.to_string()),
        country_code: Some(country.0.to_string()),
        location: Some(Location { lat, lon }),
        country: Some(GeoEntity {
            code: country.0.to_string(),
            name: country.1.to_string(),
        }),
        continent: Some(GeoEntity {
            code: "EU".to_string(),
            name: "Europe".to_string(),
        }),
        time_zone: Some(time_zone.to_string()),
        urls: Some(Urls {
            wikipedia: Some(format!(
                "https://en.wikipedia.org/wiki/{}_Airport",
                full_name.replace(' ', "_")
            )),
            ..Default::default()
        }),
    }
}

#[allow(clippy::too_many_arguments)]
fn flight(
    airports: &[Airport],
    number: &str,
    call_sign: &str,
    (from, to): (&str, &str),
    (departs, arrives): (&str, &str),
    status: &str,
    distance_km: f64,
    (airline, model, reg): (&str, &str, &str),
) -> Flight {
    let end = |icao: &str, time: &str, gate: &str| Movement {
        airport: airports.iter().find(|a| a.icao == icao).cloned(),
        scheduled_time_local: Some(format!("2021-07-01 {time}+02:00")),
        actual_time_local: None,
        terminal: Some("1".to_string()),
        gate: Some(gate.to_string()),
        baggage_belt: None,
        check_in_desk: None,
    };

    Flight {
        number: number.to_string(),
        call_sign: Some(call_sign.to_string()),
        status: status.to_string(),
        is_cargo: false,
        aircraft: Aircraft {
            model: Some(model.to_string()),
            reg: Some(reg.to_string()),
        },
        airline: Airline {
            name: airline.to_string(),
        },
        movement: None,
        departure: Some(end(from, departs, "C9")),
        arrival: Some(end(to, arrives, "A2")),
        great_circle_distance: Some(Dimension {
            meter: distance_km * 1000.0,
            km: distance_km,
            mile: distance_km * 0.621_371,
            nm: distance_km * 0.539_957,
            feet: distance_km * 3280.84,
        }),
    }
}

/// Flight numbers compare without spaces and case ("lh1393" == "LH 1393").
fn normalize_number(number: &str) -> String {
    number
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

fn touches(movement: &Option<Movement>, icao: &str) -> bool {
    movement
        .as_ref()
        .and_then(|m| m.airport.as_ref())
        .is_some_and(|airport| airport.icao.eq_ignore_ascii_case(icao))
}

impl AirportProvider for MockInfoProvider {
    fn airport_by_icao(&self, _api_key: &ApiKey, icao: &str) -> Result<Airport> {
        debug!("Mock airport lookup for {}", icao);
        self.require_airport(icao).cloned()
    }
}

impl RunwayProvider for MockInfoProvider {
    fn runways(&self, _api_key: &ApiKey, icao: &str) -> Result<Vec<Runway>> {
        let airport = self.require_airport(icao)?;
        let runway = |name: &str, hdg: f64, length_m: f64, width_m: f64| Runway {
            name: name.to_string(),
            true_hdg: hdg,
            surface: "Asphalt".to_string(),
            length: meters(length_m),
            width: meters(width_m),
        };

        Ok(match airport.icao.as_str() {
            "LKPR" => vec![
                runway("06", 63.9, 3715.0, 45.0),
                runway("24", 243.9, 3715.0, 45.0),
                runway("12", 126.2, 3250.0, 45.0),
                runway("30", 306.2, 3250.0, 45.0),
            ],
            "EDDF" => vec![
                runway("07C", 69.9, 4000.0, 60.0),
                runway("25C", 249.9, 4000.0, 60.0),
                runway("18", 180.0, 4000.0, 45.0),
            ],
            _ => vec![
                runway("09L", 89.7, 3902.0, 50.0),
                runway("27R", 269.7, 3902.0, 50.0),
            ],
        })
    }
}

fn meters(value: f64) -> Dimension {
    Dimension {
        meter: value,
        km: value / 1000.0,
        mile: value / 1609.344,
        nm: value / 1852.0,
        feet: value * 3.280_84,
    }
}

impl ScheduleProvider for MockInfoProvider {
    fn schedule(&self, _api_key: &ApiKey, icao: &str) -> Result<Schedule> {
        self.require_airport(icao)?;

        // Board entries carry the *other* end of the flight as their movement.
        let board = |leaving: bool| -> Vec<Flight> {
            self.flights
                .iter()
                .filter(|f| {
                    if leaving {
                        touches(&f.departure, icao)
                    } else {
                        touches(&f.arrival, icao)
                    }
                })
                .map(|f| {
                    let mut entry = f.clone();
                    let (own, other) = if leaving {
                        (f.departure.clone(), f.arrival.clone())
                    } else {
                        (f.arrival.clone(), f.departure.clone())
                    };
                    entry.movement = own.map(|mut m| {
                        m.airport = other.and_then(|o| o.airport);
                        m
                    });
                    entry
                })
                .collect()
        };

        Ok(Schedule {
            arrivals: board(false),
            departures: board(true),
        })
    }
}

impl FlightProvider for MockInfoProvider {
    fn flights_by_number(
        &self,
        _api_key: &ApiKey,
        number: &str,
        date: NaiveDate,
    ) -> Result<Vec<Flight>> {
        debug!("Mock flight lookup for {} on {}", number, date);
        let wanted = normalize_number(number);
        Ok(self
            .flights
            .iter()
            .filter(|flight| normalize_number(&flight.number) == wanted)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ApiKey {
        ApiKey::new("unused")
    }

    #[test]
    fn test_airport_lookup_is_case_insensitive() {
        let provider = MockInfoProvider::new();
        let airport = provider.airport_by_icao(&key(), "lkpr").unwrap();
        assert_eq!(airport.icao, "LKPR");
        assert_eq!(airport.iata, "PRG");
    }

    #[test]
    fn test_unknown_airport_not_found() {
        let provider = MockInfoProvider::new();
        assert!(provider.airport_by_icao(&key(), "ZZZZ").unwrap_err().is_not_found());
        assert!(provider.runways(&key(), "ZZZZ").unwrap_err().is_not_found());
        assert!(provider.schedule(&key(), "ZZZZ").unwrap_err().is_not_found());
    }

    #[test]
    fn test_runways() {
        let runways = MockInfoProvider::new().runways(&key(), "EDDF").unwrap();
        assert_eq!(runways.len(), 3);
        assert_eq!(runways[0].name, "07C");
        assert!((runways[0].length.feet - 13123.36).abs() < 0.1);
    }

    #[test]
    fn test_schedule_board() {
        let schedule = MockInfoProvider::new().schedule(&key(), "LKPR").unwrap();
        assert_eq!(schedule.departures.len(), 2);
        assert_eq!(schedule.arrivals.len(), 2);

        let departure = &schedule.departures[0];
        let destination = departure.movement.as_ref().unwrap().airport.as_ref().unwrap();
        assert_eq!(destination.icao, "EDDF");
    }

    #[test]
    fn test_flight_number_normalization() {
        let provider = MockInfoProvider::new();
        let date = NaiveDate::from_ymd_opt(2021, 7, 1).unwrap();
        let flights = provider.flights_by_number(&key(), "lh1393", date).unwrap();
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].number, "LH 1393");
        assert!(provider.flights_by_number(&key(), "XX 1", date).unwrap().is_empty());
    }
}
