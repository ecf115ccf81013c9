use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_COMMAND_PREFIX: char = '?';

/// Typed configuration, loaded once at startup and passed to components at
/// construction. Nothing reads the environment after `load()` returns.
#[derive(Clone, Debug)]
pub struct Config {
    /// Chat platform session token.
    pub telegram_bot_token: String,
    /// OpenWeather API key.
    pub open_weather_token: String,
    /// Leading character that marks a message as a command.
    pub command_prefix: char,
    /// Bound on the outbound provider call.
    pub http_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN")
            .and_then(non_empty)
            .ok_or_else(|| {
                Error::Config("TELEGRAM_BOT_TOKEN environment variable is required".to_string())
            })?;
        let open_weather_token = env_str("OPEN_WEATHER_TOKEN")
            .and_then(non_empty)
            .ok_or_else(|| {
                Error::Config("OPEN_WEATHER_TOKEN environment variable is required".to_string())
            })?;

        let command_prefix = parse_prefix(env_str("COMMAND_PREFIX"));
        let http_timeout = Duration::from_millis(env_u64("HTTP_TIMEOUT_MS").unwrap_or(10_000));

        Ok(Self {
            telegram_bot_token,
            open_weather_token,
            command_prefix,
            http_timeout,
        })
    }
}

/// First non-whitespace character wins; unset or blank falls back to `?`.
fn parse_prefix(v: Option<String>) -> char {
    v.and_then(|s| s.trim().chars().next())
        .unwrap_or(DEFAULT_COMMAND_PREFIX)
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}
