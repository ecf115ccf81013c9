use std::sync::Arc;

use wtb_core::{
    command::{handlers::default_handlers, CommandDispatcher},
    config::Config,
    timezone::ZoneResolver,
    weather::OpenWeatherClient,
};

#[tokio::main]
async fn main() -> Result<(), wtb_core::Error> {
    wtb_core::logging::init("wtb")?;

    let cfg = Arc::new(Config::load()?);

    let provider = Arc::new(OpenWeatherClient::new(
        cfg.open_weather_token.clone(),
        cfg.http_timeout,
    )?);
    let resolver = ZoneResolver;

    let mut commands = CommandDispatcher::new(cfg.command_prefix);
    for handler in default_handlers(provider, resolver, cfg.command_prefix) {
        commands.register(handler);
    }

    wtb_telegram::router::run_polling(cfg, Arc::new(commands))
        .await
        .map_err(|e| wtb_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
