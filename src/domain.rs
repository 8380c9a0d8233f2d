use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// one simulated temperature sample
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Reading {
    /// list-rendering key, unique per process
    /// never used for lookup or ordering
    pub id: Uuid,

    /// simulated temperature (65.0 - 85.0 with the default source)
    pub temperature: f64,

    /// wall-clock capture time formatted as HH:MM:SS
    pub timestamp: String,
}

impl Reading {
    pub fn new(temperature: f64, timestamp: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            temperature,
            timestamp: timestamp.into(),
        }
    }

    /// stamp a reading with the current local time
    pub fn now(temperature: f64) -> Self {
        Self::new(temperature, format_timestamp(&Local::now()))
    }
}

/// format a capture time the way the dashboard shows it
pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format("%H:%M:%S").to_string()
}
