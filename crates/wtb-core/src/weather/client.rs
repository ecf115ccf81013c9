use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::{errors::Error, Result};

use super::WeatherQuery;

const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Port over the weather data source so command handling can be tested
/// without the network.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch the raw current-weather payload for one query.
    async fn current(&self, query: &WeatherQuery) -> Result<Value>;
}

/// Blocking-per-invocation client for the OpenWeather current-weather
/// endpoint. The API key is injected once at construction.
#[derive(Clone, Debug)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { api_key, http })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, query: &WeatherQuery) -> Result<Value> {
        let res = self
            .http
            .get(CURRENT_WEATHER_URL)
            .query(&[
                ("q", query.city.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", query.unit.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(Error::ProviderStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::MalformedPayload(e.to_string()))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let head: String = body.chars().take(MAX).collect();
        format!("{head}...")
    } else {
        body.to_string()
    }
}
