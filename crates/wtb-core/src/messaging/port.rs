use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    messaging::types::MessagingCapabilities,
    weather::WeatherDisplay,
    Result,
};

/// Cross-messenger port.
///
/// Telegram is the first implementation; the shape is kept narrow so future
/// adapters (Slack/Discord/WhatsApp) can fit behind the same interface with
/// capability flags.
#[async_trait]
pub trait ChatPort: Send + Sync {
    fn capabilities(&self) -> MessagingCapabilities;

    /// Send an HTML-formatted text message. Callers escape user-supplied
    /// content before handing it over.
    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef>;

    /// Send a structured weather display. Adapters with image support render
    /// the condition icon; others fall back to the caption text.
    async fn send_weather(&self, chat_id: ChatId, display: &WeatherDisplay) -> Result<MessageRef>;
}
