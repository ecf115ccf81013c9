//! The built-in command set: weather, current_time, convert_time and the two
//! declared-but-stubbed listing commands.

use std::{str::FromStr, sync::Arc};

use async_trait::async_trait;

use crate::{
    command::{CommandArgs, CommandHandler, Response},
    timezone::{self, ZoneResolver},
    weather::{format_current, Units, WeatherProvider, WeatherQuery},
    Result,
};

/// The default command set, wired with the given provider and resolver. The
/// caller registers these on a `CommandDispatcher` at startup.
pub fn default_handlers(
    provider: Arc<dyn WeatherProvider>,
    resolver: ZoneResolver,
    prefix: char,
) -> Vec<Box<dyn CommandHandler>> {
    vec![
        Box::new(WeatherCommand::new(provider)),
        Box::new(CurrentTimeCommand::new(resolver)),
        Box::new(ConvertTimeCommand::new(resolver, prefix)),
        Box::new(SupportedTimeZonesCommand),
        Box::new(SupportedWeatherLocationsCommand),
    ]
}

/// `weather <city> [units <standard|metric|imperial>]`
pub struct WeatherCommand {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherCommand {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// The `units` flag falls back silently: absent, value-less and
    /// unsupported values all become metric. Unsupported values are logged.
    fn units_from(args: &CommandArgs) -> Units {
        let Some(value) = args.flag("units") else {
            return Units::default();
        };
        match Units::from_str(value) {
            Ok(unit) => unit,
            Err(err) => {
                tracing::warn!(value, error = %err, "ignoring unsupported units value");
                Units::default()
            }
        }
    }
}

#[async_trait]
impl CommandHandler for WeatherCommand {
    fn name(&self) -> &'static str {
        "weather"
    }
    fn usage(&self) -> &'static str {
        "weather <city> [units <standard|metric|imperial>]"
    }
    fn description(&self) -> &'static str {
        "Current weather for a city."
    }

    async fn handle(&self, args: &CommandArgs) -> Result<Response> {
        let Some(city) = args.positional(0) else {
            return Ok(Response::Text(format!("Usage: {}", self.usage())));
        };

        let query = WeatherQuery {
            city: city.to_string(),
            unit: Self::units_from(args),
        };
        let payload = self.provider.current(&query).await?;

        Ok(Response::Weather(format_current(payload)?))
    }
}

/// `current_time <region>`
pub struct CurrentTimeCommand {
    resolver: ZoneResolver,
}

impl CurrentTimeCommand {
    pub fn new(resolver: ZoneResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl CommandHandler for CurrentTimeCommand {
    fn name(&self) -> &'static str {
        "current_time"
    }
    fn usage(&self) -> &'static str {
        "current_time <region>"
    }
    fn description(&self) -> &'static str {
        "Current local time in a region or time zone."
    }

    async fn handle(&self, args: &CommandArgs) -> Result<Response> {
        let Some(region) = args.positional(0) else {
            return Ok(Response::Text(format!("Usage: {}", self.usage())));
        };

        let zone = self.resolver.resolve(region)?;
        Ok(Response::Text(timezone::current_time(zone)))
    }
}

/// `convert_time <region_from> <region_to> "<datetime>"`
pub struct ConvertTimeCommand {
    resolver: ZoneResolver,
    prefix: char,
}

impl ConvertTimeCommand {
    pub fn new(resolver: ZoneResolver, prefix: char) -> Self {
        Self { resolver, prefix }
    }
}

#[async_trait]
impl CommandHandler for ConvertTimeCommand {
    fn name(&self) -> &'static str {
        "convert_time"
    }
    fn usage(&self) -> &'static str {
        "convert_time <region_from> <region_to> \"<datetime>\""
    }
    fn description(&self) -> &'static str {
        "Convert a datetime between two regions. Accepted formats: \
         \"day-month-year hour:minute AM/PM\", \"day-month-year hour:minute\", \
         \"hour:minute AM/PM\", \"hour:minute\". \
         Example: \"Monday 1-Jul-20 23:32\"."
    }

    async fn handle(&self, args: &CommandArgs) -> Result<Response> {
        let (Some(from), Some(to), Some(raw)) = (
            args.positional(0),
            args.positional(1),
            args.positional(2),
        ) else {
            return Ok(Response::Text(format!("Usage: {}", self.usage())));
        };

        let guidance =
            timezone::describe_conversion(&self.resolver, self.prefix, from, to, raw)?;
        Ok(Response::Text(guidance))
    }
}

/// Declared in the command surface but not implemented yet; replies with an
/// explicit notice instead of staying silent.
pub struct SupportedTimeZonesCommand;

#[async_trait]
impl CommandHandler for SupportedTimeZonesCommand {
    fn name(&self) -> &'static str {
        "supported_time_zone"
    }
    fn usage(&self) -> &'static str {
        "supported_time_zone"
    }
    fn description(&self) -> &'static str {
        "List supported time zones (not yet available)."
    }

    async fn handle(&self, _args: &CommandArgs) -> Result<Response> {
        Ok(Response::Text(
            "Listing supported time zones is not yet supported.".to_string(),
        ))
    }
}

/// See `SupportedTimeZonesCommand`.
pub struct SupportedWeatherLocationsCommand;

#[async_trait]
impl CommandHandler for SupportedWeatherLocationsCommand {
    fn name(&self) -> &'static str {
        "supported_weather_locations"
    }
    fn usage(&self) -> &'static str {
        "supported_weather_locations"
    }
    fn description(&self) -> &'static str {
        "List supported weather locations (not yet available)."
    }

    async fn handle(&self, _args: &CommandArgs) -> Result<Response> {
        Ok(Response::Text(
            "Listing supported weather locations is not yet supported.".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandDispatcher;
    use crate::errors::Error;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Records every query and serves a canned payload.
    struct RecordingProvider {
        calls: Mutex<Vec<WeatherQuery>>,
        payload: Value,
    }

    impl RecordingProvider {
        fn new(payload: Value) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                payload,
            }
        }

        fn calls(&self) -> Vec<WeatherQuery> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WeatherProvider for RecordingProvider {
        async fn current(&self, query: &WeatherQuery) -> Result<Value> {
            self.calls.lock().unwrap().push(query.clone());
            Ok(self.payload.clone())
        }
    }

    fn sample_payload() -> Value {
        json!({
            "name": "London",
            "sys": {"country": "GB"},
            "weather": [{"description": "clear sky", "icon": "01d"}],
            "main": {"temp_min": 10, "temp_max": 15},
            "dt": 1_700_000_000,
            "timezone": 3600
        })
    }

    fn dispatcher_with(provider: Arc<RecordingProvider>) -> CommandDispatcher {
        let mut d = CommandDispatcher::new('?');
        for handler in default_handlers(provider, ZoneResolver, '?') {
            d.register(handler);
        }
        d
    }

    #[tokio::test]
    async fn weather_round_trip_invokes_the_provider_once_with_metric() {
        let provider = Arc::new(RecordingProvider::new(sample_payload()));
        let dispatcher = dispatcher_with(provider.clone());

        let reply = dispatcher.dispatch("?weather London units metric").await.unwrap();

        let calls = provider.calls();
        assert_eq!(
            calls,
            vec![WeatherQuery {
                city: "London".to_string(),
                unit: Units::Metric,
            }]
        );

        let Response::Weather(display) = reply else {
            panic!("expected weather display");
        };
        assert_eq!(display.title, "Weather London - GB");
    }

    #[tokio::test]
    async fn weather_units_default_to_metric_when_absent_or_unsupported() {
        let provider = Arc::new(RecordingProvider::new(sample_payload()));
        let dispatcher = dispatcher_with(provider.clone());

        dispatcher.dispatch("?weather London").await.unwrap();
        dispatcher.dispatch("?weather London units kelvin").await.unwrap();
        dispatcher.dispatch("?weather London units").await.unwrap();
        dispatcher.dispatch("?weather London units imperial").await.unwrap();

        let units: Vec<Units> = provider.calls().into_iter().map(|q| q.unit).collect();
        assert_eq!(
            units,
            vec![Units::Metric, Units::Metric, Units::Metric, Units::Imperial]
        );
    }

    #[tokio::test]
    async fn weather_supports_quoted_city_names() {
        let provider = Arc::new(RecordingProvider::new(sample_payload()));
        let dispatcher = dispatcher_with(provider.clone());

        dispatcher.dispatch(r#"?weather "New York""#).await.unwrap();

        assert_eq!(provider.calls()[0].city, "New York");
    }

    #[tokio::test]
    async fn weather_without_a_city_replies_with_usage() {
        let provider = Arc::new(RecordingProvider::new(sample_payload()));
        let dispatcher = dispatcher_with(provider.clone());

        let reply = dispatcher.dispatch("?weather").await.unwrap();

        let Response::Text(text) = reply else {
            panic!("expected text reply");
        };
        assert!(text.starts_with("Usage:"));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn current_time_reports_zone_errors_verbatim() {
        let provider = Arc::new(RecordingProvider::new(sample_payload()));
        let dispatcher = dispatcher_with(provider);

        let reply = dispatcher.dispatch("?current_time Nowhere").await.unwrap();

        let Response::Text(text) = reply else {
            panic!("expected text reply");
        };
        assert_eq!(text, Error::UnknownRegion("Nowhere".to_string()).to_string());
    }

    #[tokio::test]
    async fn current_time_formats_a_resolved_zone() {
        let provider = Arc::new(RecordingProvider::new(sample_payload()));
        let dispatcher = dispatcher_with(provider);

        let reply = dispatcher.dispatch("?current_time utc").await.unwrap();

        let Response::Text(text) = reply else {
            panic!("expected text reply");
        };
        // Shape check only; the clock is live here.
        assert!(text.ends_with("AM") || text.ends_with("PM"));
        assert_eq!(text.matches(", ").count(), 2);
    }

    #[tokio::test]
    async fn convert_time_validates_zones_then_sends_guidance() {
        let provider = Arc::new(RecordingProvider::new(sample_payload()));
        let dispatcher = dispatcher_with(provider);

        let reply = dispatcher
            .dispatch(r#"?convert_time "New York" UTC "11:32 PM""#)
            .await
            .unwrap();
        let Response::Text(text) = reply else {
            panic!("expected text reply");
        };
        assert!(text.contains("day-month-year"));

        let reply = dispatcher
            .dispatch(r#"?convert_time Atlantis UTC "11:32 PM""#)
            .await
            .unwrap();
        let Response::Text(text) = reply else {
            panic!("expected text reply");
        };
        assert!(text.contains("Atlantis"));
    }

    #[tokio::test]
    async fn stub_commands_reply_explicitly() {
        let provider = Arc::new(RecordingProvider::new(sample_payload()));
        let dispatcher = dispatcher_with(provider);

        let reply = dispatcher.dispatch("?supported_time_zone").await.unwrap();
        assert_eq!(
            reply,
            Response::Text("Listing supported time zones is not yet supported.".to_string())
        );

        let reply = dispatcher
            .dispatch("?supported_weather_locations")
            .await
            .unwrap();
        assert_eq!(
            reply,
            Response::Text("Listing supported weather locations is not yet supported.".to_string())
        );
    }
}
