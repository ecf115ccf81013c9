//! Formatting utilities (HTML escaping, weather display captions).

use crate::weather::WeatherDisplay;

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render a weather display as an HTML caption.
///
/// Mirrors the embed shape: bold title, condition line, min/max fields,
/// italic footer timestamp.
pub fn weather_caption(display: &WeatherDisplay) -> String {
    format!(
        "<b>{}</b>\n{}\n\nmin: {}\nmax: {}\n\n<i>{}</i>",
        escape_html(&display.title),
        escape_html(&display.description),
        display.temp_min,
        display.temp_max,
        escape_html(&display.footer_text),
    )
}
