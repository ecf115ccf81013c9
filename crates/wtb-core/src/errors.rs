/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type so the dispatcher
/// can handle failures consistently (user-facing message vs fatal startup).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    /// The resolver does not know this region. The message is forwarded to
    /// the chat verbatim, so it names the offending input.
    #[error("Unknown region '{0}'. Try an IANA zone name like Europe/London, a city, or an abbreviation like UTC.")]
    UnknownRegion(String),

    #[error("Unit '{0}' must be one of 'standard', 'metric', 'imperial'.")]
    InvalidUnit(String),

    /// Provider response did not have the expected shape. Never shown to the
    /// user as-is; the dispatcher renders a generic message instead.
    #[error("malformed provider payload: {0}")]
    MalformedPayload(String),

    #[error("provider request failed with status {status}: {body}")]
    ProviderStatus { status: u16, body: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
