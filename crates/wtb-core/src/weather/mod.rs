//! Weather query/display types, provider client and payload shaping.

pub mod client;
pub mod format;

pub use client::{OpenWeatherClient, WeatherProvider};
pub use format::format_current;

use std::{fmt, str::FromStr};

use crate::errors::Error;

/// Measurement system passed through to the provider verbatim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Units {
    Standard,
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Standard => "standard",
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Units::Standard),
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            other => Err(Error::InvalidUnit(other.to_string())),
        }
    }
}

/// One current-weather request.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherQuery {
    pub city: String,
    pub unit: Units,
}

/// Structured display built from one provider response: rendered once by the
/// chat adapter, then discarded.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherDisplay {
    pub title: String,
    pub description: String,
    pub icon_url: String,
    /// Localized observation timestamp.
    pub footer_text: String,
    pub temp_min: f64,
    pub temp_max: f64,
}
