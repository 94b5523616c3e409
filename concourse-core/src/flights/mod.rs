//! Departure board rows and their mapping onto gate points.
//!
//! Two upstream row shapes are accepted: the compact board shape served to
//! the UI and the verbose airport feed shape. Both normalize into [`Flight`].

mod gate;

use chrono::{DateTime, NaiveDateTime, NaiveTime};
use log::warn;
use serde::{Deserialize, Serialize};

pub use gate::resolve_gate;

use crate::model::PointRegistry;
use crate::{Error, PointId};

/// Normalized departure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub flight_number: String,
    pub scheduled: NaiveTime,
    pub expected: Option<NaiveTime>,
    pub gate: Option<String>,
    pub terminal: Option<String>,
    pub destination: Option<String>,
    pub destination_code: Option<String>,
}

impl Flight {
    /// Point of the departure gate, if the registry knows it
    pub fn gate_point(&self, registry: &PointRegistry) -> Option<PointId> {
        self.gate
            .as_deref()
            .and_then(|gate| resolve_gate(gate, registry))
    }

    /// Expected time when announced, else the scheduled one
    pub fn departure(&self) -> NaiveTime {
        self.expected.unwrap_or(self.scheduled)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardRow {
    pub flight_number: String,
    /// `HH:MM`
    pub time: String,
    #[serde(default)]
    pub expected_time: Option<String>,
    #[serde(default)]
    pub gate_name: Option<String>,
    #[serde(default)]
    pub terminal: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub destination_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportRow {
    #[serde(rename = "flightnumber")]
    pub flight_number: String,
    pub planned_departure_time: String,
    #[serde(default)]
    pub expected_departure_time: Option<String>,
    #[serde(default)]
    pub gate: Option<String>,
    #[serde(default)]
    pub terminal: Option<String>,
    #[serde(default)]
    pub destination_airport_name: Option<String>,
    #[serde(default, rename = "destinationAirport3LCode")]
    pub destination_code: Option<String>,
}

/// One departure row in either upstream shape
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlightPayload {
    Board(BoardRow),
    Airport(AirportRow),
}

impl FlightPayload {
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for an empty flight number or an
    /// unparsable scheduled time
    pub fn normalize(self) -> Result<Flight, Error> {
        let flight = match self {
            Self::Board(row) => Flight {
                scheduled: parse_clock(&row.time)?,
                expected: optional(row.expected_time.as_deref(), parse_clock),
                flight_number: row.flight_number,
                gate: non_empty(row.gate_name),
                terminal: non_empty(row.terminal),
                destination: non_empty(row.destination),
                destination_code: non_empty(row.destination_code),
            },
            Self::Airport(row) => Flight {
                scheduled: parse_timestamp(&row.planned_departure_time)?,
                expected: optional(row.expected_departure_time.as_deref(), parse_timestamp),
                flight_number: row.flight_number,
                gate: non_empty(row.gate),
                terminal: non_empty(row.terminal),
                destination: non_empty(row.destination_airport_name),
                destination_code: non_empty(row.destination_code),
            },
        };

        if flight.flight_number.trim().is_empty() {
            return Err(Error::InvalidData("Flight row without flight number".into()));
        }
        Ok(flight)
    }
}

/// Normalizes a whole board, dropping rows that cannot be read, ordered by
/// scheduled time
pub fn normalize_board(rows: impl IntoIterator<Item = FlightPayload>) -> Vec<Flight> {
    let mut flights = rows
        .into_iter()
        .filter_map(|row| match row.normalize() {
            Ok(flight) => Some(flight),
            Err(err) => {
                warn!("Skipping departure row: {err}");
                None
            }
        })
        .collect::<Vec<_>>();
    flights.sort_by(|a, b| {
        a.scheduled
            .cmp(&b.scheduled)
            .then_with(|| a.flight_number.cmp(&b.flight_number))
    });
    flights
}

fn parse_clock(value: &str) -> Result<NaiveTime, Error> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|err| Error::InvalidData(format!("Invalid departure time '{value}': {err}")))
}

/// RFC 3339 keeps the local wall clock of its offset
fn parse_timestamp(value: &str) -> Result<NaiveTime, Error> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.naive_local().time());
    }
    value
        .parse::<NaiveDateTime>()
        .map(|timestamp| timestamp.time())
        .map_err(|err| Error::InvalidData(format!("Invalid departure timestamp '{value}': {err}")))
}

fn optional(
    value: Option<&str>,
    parse: fn(&str) -> Result<NaiveTime, Error>,
) -> Option<NaiveTime> {
    value
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| parse(value).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
