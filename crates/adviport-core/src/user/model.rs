//! UserProfile domain model.
//!
//! A profile is the persisted identity record of one registered user:
//! encrypted credentials plus the preferences and history the plugins keep.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::aviation::Airport;

/// Maximum number of flight numbers kept in [`UserProfile::schedule_history`].
pub const HISTORY_LIMIT: usize = 10;

/// Layout of the main menu page.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum MainPageStyle {
    #[serde(rename = "classic")]
    #[strum(serialize = "classic")]
    Classic,
    #[serde(rename = "decorative")]
    #[strum(serialize = "decorative")]
    Decorative,
    #[serde(rename = "descriptive")]
    #[strum(serialize = "descriptive")]
    Descriptive,
    #[serde(rename = "decorative/descriptive", alias = "descriptive/decorative")]
    #[strum(to_string = "decorative/descriptive", serialize = "descriptive/decorative")]
    DecorativeDescriptive,
}

impl MainPageStyle {
    /// Style that follows `current` in the fixed rotation order.
    ///
    /// An unset style is treated as coming before the first one, so cycling
    /// from `None` yields [`MainPageStyle::Classic`].
    pub fn cycle(current: Option<Self>) -> Self {
        let styles: Vec<Self> = Self::iter().collect();
        match current.and_then(|style| styles.iter().position(|s| *s == style)) {
            Some(idx) => styles[(idx + 1) % styles.len()],
            None => styles[0],
        }
    }

    pub fn is_decorative(self) -> bool {
        matches!(self, Self::Decorative | Self::DecorativeDescriptive)
    }

    pub fn is_descriptive(self) -> bool {
        matches!(self, Self::Descriptive | Self::DecorativeDescriptive)
    }
}

/// Normalizes an ICAO code into a favourites key.
pub fn favourite_key(icao: &str) -> String {
    icao.trim().to_lowercase()
}

/// User profile domain model.
///
/// Invariants kept by the mutating methods:
/// - favourites keys are lower case
/// - `schedule_history` never holds more than [`HISTORY_LIMIT`] entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub encrypted_password: String,
    pub encrypted_api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_page_style: Option<MainPageStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_searched_flight: Option<String>,
    #[serde(default)]
    pub schedule_history: Vec<String>,
    #[serde(default)]
    pub favourite_airports: BTreeMap<String, Airport>,
}

impl UserProfile {
    /// Creates a fresh profile from already encrypted secrets.
    pub fn new(
        username: impl Into<String>,
        encrypted_password: impl Into<String>,
        encrypted_api_key: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            encrypted_password: encrypted_password.into(),
            encrypted_api_key: encrypted_api_key.into(),
            main_page_style: None,
            last_searched_flight: None,
            schedule_history: Vec::new(),
            favourite_airports: BTreeMap::new(),
        }
    }

    pub fn has_favourite(&self, icao: &str) -> bool {
        self.favourite_airports.contains_key(&favourite_key(icao))
    }

    /// Stores `airport` under the lower-cased `icao` key.
    ///
    /// # Returns
    ///
    /// `false` if the airport was already a favourite (nothing changes).
    pub fn add_favourite(&mut self, icao: &str, airport: Airport) -> bool {
        let key = favourite_key(icao);
        if self.favourite_airports.contains_key(&key) {
            return false;
        }
        self.favourite_airports.insert(key, airport);
        true
    }

    /// Removes a favourite airport, returning it if it was present.
    pub fn remove_favourite(&mut self, icao: &str) -> Option<Airport> {
        self.favourite_airports.remove(&favourite_key(icao))
    }

    /// Records a flight-number query.
    ///
    /// The number is upper-cased, appended to the history (oldest entries
    /// evicted past [`HISTORY_LIMIT`]) and remembered as the last search.
    pub fn record_flight_search(&mut self, flight_number: &str) {
        let number = flight_number.trim().to_uppercase();
        self.schedule_history.push(number.clone());
        if self.schedule_history.len() > HISTORY_LIMIT {
            let excess = self.schedule_history.len() - HISTORY_LIMIT;
            self.schedule_history.drain(..excess);
        }
        self.last_searched_flight = Some(number);
    }

    /// Moves the profile to the next main page style and returns it.
    pub fn cycle_main_page_style(&mut self) -> MainPageStyle {
        let next = MainPageStyle::cycle(self.main_page_style);
        self.main_page_style = Some(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn profile() -> UserProfile {
        UserProfile::new("alice", "cipher-pw", "cipher-key")
    }

    #[test]
    fn test_style_parse_and_display() {
        assert_eq!(MainPageStyle::from_str("classic").unwrap(), MainPageStyle::Classic);
        assert_eq!(
            MainPageStyle::from_str("descriptive/decorative").unwrap(),
            MainPageStyle::DecorativeDescriptive
        );
        assert_eq!(
            MainPageStyle::DecorativeDescriptive.to_string(),
            "decorative/descriptive"
        );
        assert!(MainPageStyle::from_str("fancy").is_err());
    }

    #[test]
    fn test_style_cycle_wraps() {
        assert_eq!(MainPageStyle::cycle(None), MainPageStyle::Classic);
        assert_eq!(
            MainPageStyle::cycle(Some(MainPageStyle::Classic)),
            MainPageStyle::Decorative
        );
        assert_eq!(
            MainPageStyle::cycle(Some(MainPageStyle::DecorativeDescriptive)),
            MainPageStyle::Classic
        );
    }

    #[test]
    fn test_favourites_use_lower_case_keys() {
        let mut profile = profile();
        assert!(profile.add_favourite("LKPR", Airport::default()));
        assert!(profile.favourite_airports.contains_key("lkpr"));
        assert!(profile.has_favourite("lkpr"));
        assert!(!profile.add_favourite(" lkPr ", Airport::default()));
        assert_eq!(profile.favourite_airports.len(), 1);

        assert!(profile.remove_favourite("LKPR").is_some());
        assert!(profile.remove_favourite("LKPR").is_none());
    }

    #[test]
    fn test_history_is_bounded_and_ordered() {
        let mut profile = profile();
        for i in 1..=12 {
            profile.record_flight_search(&format!("ok{i}"));
        }

        assert_eq!(profile.schedule_history.len(), HISTORY_LIMIT);
        assert_eq!(profile.schedule_history.first().unwrap(), "OK3");
        assert_eq!(profile.schedule_history.last().unwrap(), "OK12");
        assert_eq!(profile.last_searched_flight.as_deref(), Some("OK12"));
    }

    #[test]
    fn test_cycle_main_page_style_updates_profile() {
        let mut profile = profile();
        assert_eq!(profile.cycle_main_page_style(), MainPageStyle::Classic);
        assert_eq!(profile.cycle_main_page_style(), MainPageStyle::Decorative);
        assert_eq!(profile.main_page_style, Some(MainPageStyle::Decorative));
    }

    #[test]
    fn test_profile_toml_round_trip() {
        let mut profile = profile();
        profile.main_page_style = Some(MainPageStyle::DecorativeDescriptive);
        profile.record_flight_search("ok 123");
        profile.add_favourite("EDDF", Airport {
            icao: "EDDF".to_string(),
            ..Default::default()
        });

        let text = toml::to_string(&profile).unwrap();
        assert!(text.contains("main_page_style = \"decorative/descriptive\""));
        let back: UserProfile = toml::from_str(&text).unwrap();
        assert_eq!(back, profile);
    }
}
