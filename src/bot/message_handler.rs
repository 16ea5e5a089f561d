//! Message Handler module for processing incoming Telegram messages
//!
//! The bot is driven almost entirely by inline keyboards; the only text
//! entry point is the /start command.

use anyhow::Result;
use log::info;
use rusqlite::Connection;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::sync::Mutex;

use super::ui_builder::create_start_keyboard;

/// Handle incoming text messages
pub async fn message_handler(bot: Bot, msg: Message, _conn: Arc<Mutex<Connection>>) -> Result<()> {
    if let Some(text) = msg.text() {
        info!("Received text message from user {}: {}", msg.chat.id, text);

        if text == "/start" {
            let full_name = msg
                .from
                .as_ref()
                .map(|user| user.full_name())
                .unwrap_or_else(|| "there".to_string());

            bot.send_message(msg.chat.id, format!("Hi {full_name}, choose an action:"))
                .reply_markup(create_start_keyboard())
                .await?;
        } else {
            bot.send_message(msg.chat.id, "Send /start to open the menu.")
                .await?;
        }
    }

    Ok(())
}
