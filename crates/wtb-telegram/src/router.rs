use std::{collections::HashMap, sync::Arc};

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{error, info};

use wtb_core::{
    command::{CommandDispatcher, Response},
    config::Config,
    domain::ChatId,
    formatting::escape_html,
    messaging::port::ChatPort,
};

use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub commands: Arc<CommandDispatcher>,
    pub messenger: Arc<dyn ChatPort>,
    pub chat_locks: Arc<ChatLocks>,
}

/// Serializes command handling per chat: one command runs to completion
/// before the next message of the same chat is processed.
#[derive(Default)]
pub struct ChatLocks {
    inner: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl ChatLocks {
    pub async fn lock_chat(&self, chat_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            map.entry(chat_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

pub async fn run_polling(cfg: Arc<Config>, commands: Arc<CommandDispatcher>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    if let Ok(me) = bot.get_me().await {
        info!(username = me.username(), "wtb started");
    }
    info!(prefix = %cfg.command_prefix, "listening for commands");

    let messenger: Arc<dyn ChatPort> = Arc::new(TelegramMessenger::new(bot.clone()));

    let state = Arc::new(AppState {
        cfg,
        commands,
        messenger,
        chat_locks: Arc::new(ChatLocks::default()),
    });

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn handle_message(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    // One command at a time per chat.
    let _guard = state.chat_locks.lock_chat(msg.chat.id.0).await;

    let Some(response) = state.commands.dispatch(text).await else {
        return Ok(()); // not a command
    };

    let chat_id = ChatId(msg.chat.id.0);
    let sent = match &response {
        Response::Text(text) => state.messenger.send_html(chat_id, &escape_html(text)).await,
        Response::Weather(display) => state.messenger.send_weather(chat_id, display).await,
    };

    if let Err(e) = sent {
        error!(chat = chat_id.0, error = %e, "failed to deliver reply");
    }

    Ok(())
}
