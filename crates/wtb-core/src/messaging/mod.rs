//! Cross-messenger abstractions (Telegram today; other platforms later).

pub mod port;
pub mod types;
