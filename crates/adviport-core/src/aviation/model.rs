//! Airport and flight descriptors.
//!
//! Field names follow the AeroDataBox JSON payloads (camelCase). Every field
//! is optional or defaulted because the service omits whatever it doesn't
//! know about a given airport or flight.

use serde::{Deserialize, Serialize};

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

/// A country or continent reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoEntity {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
}

/// Web links published for an airport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Urls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wikipedia: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_radar: Option<String>,
}

impl Urls {
    /// Returns the links that are present, in display order.
    pub fn present(&self) -> Vec<&str> {
        [
            &self.web_site,
            &self.wikipedia,
            &self.google_maps,
            &self.twitter,
        ]
        .into_iter()
        .filter_map(|url| url.as_deref())
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .collect()
    }
}

/// Airport descriptor.
///
/// This is the only descriptor persisted, as the cached value of a
/// favourite airport inside a user profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airport {
    #[serde(default)]
    pub icao: String,
    #[serde(default)]
    pub iata: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<GeoEntity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent: Option<GeoEntity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<Urls>,
}

impl Airport {
    /// Best available human readable name.
    pub fn display_name(&self) -> &str {
        if !self.full_name.is_empty() {
            &self.full_name
        } else if !self.short_name.is_empty() {
            &self.short_name
        } else {
            self.name.as_deref().unwrap_or(&self.icao)
        }
    }
}

/// A length expressed in several units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    #[serde(default)]
    pub meter: f64,
    #[serde(default)]
    pub km: f64,
    #[serde(default)]
    pub mile: f64,
    #[serde(default)]
    pub nm: f64,
    #[serde(default)]
    pub feet: f64,
}

/// Runway descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Runway {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub true_hdg: f64,
    #[serde(default)]
    pub surface: String,
    #[serde(default)]
    pub length: Dimension,
    #[serde(default)]
    pub width: Dimension,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aircraft {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub reg: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airline {
    #[serde(default)]
    pub name: String,
}

/// One end of a flight (departure, arrival, or the schedule "movement").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    #[serde(default)]
    pub airport: Option<Airport>,
    #[serde(default)]
    pub scheduled_time_local: Option<String>,
    #[serde(default)]
    pub actual_time_local: Option<String>,
    #[serde(default)]
    pub terminal: Option<String>,
    #[serde(default)]
    pub gate: Option<String>,
    #[serde(default)]
    pub baggage_belt: Option<String>,
    #[serde(default)]
    pub check_in_desk: Option<String>,
}

/// Flight descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub call_sign: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub is_cargo: bool,
    #[serde(default)]
    pub aircraft: Aircraft,
    #[serde(default)]
    pub airline: Airline,
    #[serde(default)]
    pub movement: Option<Movement>,
    #[serde(default)]
    pub departure: Option<Movement>,
    #[serde(default)]
    pub arrival: Option<Movement>,
    #[serde(default)]
    pub great_circle_distance: Option<Dimension>,
}

impl Flight {
    pub fn is_cancelled(&self) -> bool {
        self.status.contains("Canceled")
    }
}

/// Arrivals and departures of one airport over a time window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub arrivals: Vec<Flight>,
    #[serde(default)]
    pub departures: Vec<Flight>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_airport_from_service_json() {
        let json = r#"{
            "icao": "EDDF",
            "iata": "FRA",
            "shortName": "Frankfurt-am-Main",
            "fullName": "Frankfurt-am-Main",
            "location": { "lat": 50.0264, "lon": 8.543129 },
            "country": { "code": "DE", "name": "Germany" },
            "timeZone": "Europe/Berlin",
            "urls": { "webSite": "http://www.frankfurt-airport.de/" }
        }"#;

        let airport: Airport = serde_json::from_str(json).unwrap();
        assert_eq!(airport.icao, "EDDF");
        assert_eq!(airport.country.as_ref().unwrap().name, "Germany");
        assert_eq!(airport.time_zone.as_deref(), Some("Europe/Berlin"));
        assert_eq!(
            airport.urls.unwrap().present(),
            vec!["http://www.frankfurt-airport.de/"]
        );
    }

    #[test]
    fn test_airport_survives_toml() {
        let airport = Airport {
            icao: "LKPR".to_string(),
            iata: "PRG".to_string(),
            full_name: "Prague Vaclav Havel".to_string(),
            location: Some(Location { lat: 50.1, lon: 14.26 }),
            ..Default::default()
        };

        let text = toml::to_string(&airport).unwrap();
        let back: Airport = toml::from_str(&text).unwrap();
        assert_eq!(back, airport);
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut airport = Airport {
            icao: "XXXX".to_string(),
            ..Default::default()
        };
        assert_eq!(airport.display_name(), "XXXX");
        airport.short_name = "Short".to_string();
        assert_eq!(airport.display_name(), "Short");
        airport.full_name = "Full".to_string();
        assert_eq!(airport.display_name(), "Full");
    }

    #[test]
    fn test_cancelled_status() {
        let flight = Flight {
            status: "CanceledUncertain".to_string(),
            ..Default::default()
        };
        assert!(flight.is_cancelled());
    }
}
