use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::{errors::Error, timezone::ZONE_TIME_FORMAT, Result};

use super::WeatherDisplay;

const ICON_URL_BASE: &str = "https://openweathermap.org/img/wn";

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    name: String,
    dt: i64,
    /// UTC offset of the observed location, in seconds.
    timezone: i32,
    sys: Sys,
    weather: Vec<Condition>,
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct Sys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp_min: f64,
    temp_max: f64,
}

/// Shape a raw current-weather payload into a display object.
///
/// Any missing or mistyped field is a `MalformedPayload`, never a panic; the
/// dispatcher turns that into a generic service-unavailable reply.
pub fn format_current(payload: Value) -> Result<WeatherDisplay> {
    let parsed: CurrentPayload =
        serde_json::from_value(payload).map_err(|e| Error::MalformedPayload(e.to_string()))?;

    let condition = parsed
        .weather
        .first()
        .ok_or_else(|| Error::MalformedPayload("weather conditions list is empty".to_string()))?;

    let footer_text = local_time_string(parsed.dt, parsed.timezone)?;

    Ok(WeatherDisplay {
        title: format!("Weather {} - {}", parsed.name, parsed.sys.country),
        description: condition.description.clone(),
        icon_url: format!("{ICON_URL_BASE}/{}@2x.png", condition.icon),
        footer_text,
        temp_min: parsed.main.temp_min,
        temp_max: parsed.main.temp_max,
    })
}

fn local_time_string(dt: i64, offset_seconds: i32) -> Result<String> {
    let utc = DateTime::<Utc>::from_timestamp(dt, 0)
        .ok_or_else(|| Error::MalformedPayload(format!("timestamp {dt} out of range")))?;
    let offset = FixedOffset::east_opt(offset_seconds)
        .ok_or_else(|| Error::MalformedPayload(format!("utc offset {offset_seconds} out of range")))?;

    Ok(utc.with_timezone(&offset).format(ZONE_TIME_FORMAT).to_string())
}
