//! Plain-text renderings of provider data.

use std::fmt::Write;

use adviport_core::aviation::{Airport, Flight, Movement, Runway, Schedule};
use chrono::{DateTime, NaiveDateTime};

/// Width of the schedule board.
pub const BOARD_WIDTH: usize = 95;
/// At most this many flights are listed per board section.
pub const BOARD_ROWS: usize = 20;

const UNKNOWN: &str = "------";
const NO_TIME: &str = "--:--";
const COLUMNS: [usize; 8] = [12, 24, 9, 11, 10, 7, 12, 10];

/// `HH:MM` of a provider local timestamp such as `2021-07-01 10:20+02:00`.
pub fn short_time(timestamp: Option<&str>) -> Option<String> {
    let timestamp = timestamp?.trim();
    DateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M%:z")
        .map(|t| t.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M"))
        .ok()
        .map(|t| t.format("%H:%M").to_string())
}

fn centered(text: &str) -> String {
    let pad = BOARD_WIDTH.saturating_sub(text.chars().count()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn row(fields: &[String]) -> String {
    let mut line = String::new();
    for (field, width) in fields.iter().zip(COLUMNS) {
        let _ = write!(line, "{field:<width$}");
    }
    line.trim_end().to_string()
}

fn board_entry(flight: &Flight, arrival: bool) -> String {
    let empty = Movement::default();
    let movement = flight.movement.as_ref().unwrap_or(&empty);
    let place = movement
        .airport
        .as_ref()
        .map(|airport| airport.display_name().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());
    let expected = if flight.is_cancelled() {
        None
    } else {
        short_time(movement.actual_time_local.as_deref())
    };
    let dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "--".to_string());

    row(&[
        if flight.number.is_empty() { UNKNOWN.to_string() } else { flight.number.clone() },
        place,
        short_time(movement.scheduled_time_local.as_deref()).unwrap_or_else(|| NO_TIME.to_string()),
        expected.unwrap_or_else(|| NO_TIME.to_string()),
        dash(&movement.terminal),
        if arrival { dash(&movement.baggage_belt) } else { dash(&movement.gate) },
        if flight.status.is_empty() { UNKNOWN.to_string() } else { flight.status.clone() },
        if arrival { String::new() } else { dash(&movement.check_in_desk) },
    ])
}

const ARRIVALS_HEADER: [&str; 8] = [
    "Flight",
    "Arriving From",
    "Scheduled",
    "ETA",
    "Terminal",
    "Belt",
    "Status",
    "",
];
const DEPARTURES_HEADER: [&str; 8] = [
    "Flight",
    "Departing To",
    "Scheduled",
    "ETD",
    "Terminal",
    "Gate",
    "Status",
    "Check-In",
];

/// Arrivals and departures board as printed by the schedule plugin.
pub fn schedule_board(schedule: &Schedule, now: NaiveDateTime) -> String {
    let rule = "-".repeat(BOARD_WIDTH);
    let mut out = String::new();

    let clock = format!("Time now is: {}", now.format("%d/%m/%Y %H:%M"));
    let _ = writeln!(out, "{}", centered(&clock));
    let _ = writeln!(out, "{}", centered("ARRIVALS"));
    let _ = writeln!(out, "{}", row(&ARRIVALS_HEADER.map(String::from)));
    let _ = writeln!(out, "{rule}");
    for flight in schedule.arrivals.iter().take(BOARD_ROWS) {
        let _ = writeln!(out, "{}", board_entry(flight, true));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", centered("DEPARTURES"));
    let _ = writeln!(out, "{}", row(&DEPARTURES_HEADER.map(String::from)));
    let _ = writeln!(out, "{rule}");
    for flight in schedule.departures.iter().take(BOARD_ROWS) {
        let _ = writeln!(out, "{}", board_entry(flight, false));
    }

    out.trim_end().to_string()
}

fn hemisphere(value: f64, positive: char, negative: char) -> String {
    let side = if value > 0.0 { positive } else { negative };
    format!("{side} {}", value.abs())
}

/// Boxed airport summary, optionally followed by its runways.
pub fn airport_table(airport: &Airport, runways: Option<&[Runway]>) -> String {
    let mut content = vec![
        format!("ICAO / IATA: {} / {}", airport.icao, airport.iata),
        format!("Airport Name: {} / {}", airport.full_name, airport.short_name),
    ];
    if let Some(country) = &airport.country {
        content.push(format!("Country: {} ({})", country.name, country.code));
    }
    if let Some(location) = &airport.location {
        content.push("Location:".to_string());
        content.push(format!("\t{}", hemisphere(location.lat, 'N', 'S')));
        content.push(format!("\t{}", hemisphere(location.lon, 'E', 'W')));
    }
    if let Some(zone) = &airport.time_zone {
        content.push(format!("Time zone: {zone}"));
    }
    let urls = airport.urls.as_ref().map(|urls| urls.present()).unwrap_or_default();
    if !urls.is_empty() {
        content.push("Airport urls:".to_string());
        content.extend(urls.into_iter().map(|url| format!("\t{url}")));
    }

    let widest = content.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    let rule = "_".repeat(widest + 2);
    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    for line in &content {
        let _ = writeln!(out, "| {line}");
    }

    if let Some(runways) = runways {
        let _ = writeln!(out, "| Runways:");
        for runway in runways {
            let _ = writeln!(out, "| \tRunway: {}", runway.name);
            let _ = writeln!(out, "| \t\tTrue Heading: {}", runway.true_hdg);
            let _ = writeln!(out, "| \t\tRunway Surface: {}", runway.surface);
            let _ = writeln!(
                out,
                "| \t\tLength: {:.0} meters ({:.0} feet)",
                runway.length.meter, runway.length.feet
            );
            let _ = writeln!(
                out,
                "| \t\tWidth: {:.0} meters ({:.0} feet)",
                runway.width.meter, runway.width.feet
            );
            let _ = writeln!(out, "| \t_______________");
        }
    }
    let _ = write!(out, "{rule}");
    out
}

fn end_summary(movement: Option<&Movement>) -> (String, String, String) {
    let Some(movement) = movement else {
        return (String::new(), String::new(), String::new());
    };
    let place = movement
        .airport
        .as_ref()
        .map(|airport| {
            format!(
                "{} ({})",
                airport.display_name(),
                airport.country_code.as_deref().unwrap_or_default()
            )
        })
        .unwrap_or_default();
    (
        place,
        movement.terminal.clone().unwrap_or_default(),
        movement.gate.clone().unwrap_or_default(),
    )
}

/// Details of a flight and its codeshares. The first entry is the operator.
///
/// Returns `None` for an empty list.
pub fn flight_report(flights: &[Flight]) -> Option<String> {
    let operator = flights.first()?;
    let rule = "-".repeat(20);
    let mut out = String::new();

    let _ = writeln!(out, "Empty / non filled values are unknown.");
    let _ = writeln!(out, "{rule}{}{rule}", operator.number);

    let call_signs: Vec<&str> = flights
        .iter()
        .filter_map(|flight| flight.call_sign.as_deref())
        .collect();
    let _ = writeln!(out, "Callsigns (flight codes with codeshares): {}", call_signs.join(" / "));

    let (from, from_terminal, from_gate) = end_summary(operator.departure.as_ref());
    let _ = writeln!(out, "Flight from: {from}");
    let _ = writeln!(out, "\tTerminal: {from_terminal}");
    let _ = writeln!(out, "\t    Gate: {from_gate}");
    let (to, to_terminal, to_gate) = end_summary(operator.arrival.as_ref());
    let _ = writeln!(out, "Flight to: {to}");
    let _ = writeln!(out, "\tTerminal: {to_terminal}");
    let _ = writeln!(out, "\t    Gate: {to_gate}");

    if let Some(distance) = &operator.great_circle_distance {
        let iata = |movement: &Option<Movement>| {
            movement
                .as_ref()
                .and_then(|m| m.airport.as_ref())
                .map(|airport| airport.iata.clone())
                .unwrap_or_default()
        };
        let _ = writeln!(
            out,
            "Great Circle Distance ({} -> {}): {:.2} km ({:.2} miles / {:.2} NM)",
            iata(&operator.departure),
            iata(&operator.arrival),
            distance.km,
            distance.mile,
            distance.nm
        );
    }

    let _ = writeln!(out, "Operated by:");
    let _ = writeln!(out, "\t  Airline: {}", operator.airline.name);
    let _ = writeln!(
        out,
        "\t Aircraft: {} ({})",
        operator.aircraft.model.as_deref().unwrap_or_default(),
        operator.aircraft.reg.as_deref().unwrap_or_default()
    );
    let _ = writeln!(out, "Status: {}", operator.status);
    let kind = if operator.is_cargo { "cargo" } else { "passenger" };
    let _ = writeln!(out, "Flight is a {kind} flight.");
    let _ = write!(out, "{rule}{rule}{}", "-".repeat(operator.number.len()));
    Some(out)
}
