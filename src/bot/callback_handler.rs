//! Callback Handler module for processing inline keyboard callback queries
//!
//! Dispatches the four screens of the ordering flow: start, category list,
//! dish list and dish detail. Each press is answered so the client-side
//! loading spinner is cleared even when nothing is sent.

use anyhow::Result;
use log::{info, warn};
use rusqlite::Connection;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::sync::Mutex;

use crate::errors::MenuError;
use crate::menu;

use super::ui_builder::{
    create_back_to_categories_keyboard, create_category_keyboard, create_dishes_keyboard,
    create_start_keyboard, CALLBACK_ADMIN, CALLBACK_CATEGORY_PREFIX, CALLBACK_DISH_PREFIX,
    CALLBACK_MENU, CALLBACK_START,
};

/// Handle callback queries from inline keyboards
pub async fn callback_handler(
    bot: Bot,
    q: teloxide::types::CallbackQuery,
    conn: Arc<Mutex<Connection>>,
) -> Result<()> {
    let data = q.data.as_deref().unwrap_or("");
    info!("Received callback '{}' from user {}", data, q.from.id);

    if let Some(msg) = &q.message {
        let chat_id = msg.chat().id;

        if data == CALLBACK_START {
            bot.send_message(chat_id, "Choose an action:")
                .reply_markup(create_start_keyboard())
                .await?;
        } else if data == CALLBACK_MENU {
            let categories = {
                let conn = conn.lock().await;
                menu::list_category_names(&conn)?
            };

            bot.send_message(chat_id, "Current menu")
                .reply_markup(create_category_keyboard(&categories))
                .await?;
        } else if data == CALLBACK_ADMIN {
            // Stub: there is no admin panel yet
            bot.send_message(chat_id, "The admin panel is not available yet.")
                .await?;
        } else if let Some(category) = data.strip_prefix(CALLBACK_CATEGORY_PREFIX) {
            let dishes = {
                let conn = conn.lock().await;
                menu::list_product_names(&conn, category)?
            };

            bot.send_message(chat_id, format!("Dishes in category {category}"))
                .reply_markup(create_dishes_keyboard(category, &dishes))
                .await?;
        } else if let Some(rest) = data.strip_prefix(CALLBACK_DISH_PREFIX) {
            if let Some((category, dish)) = rest.split_once(':') {
                let description = {
                    let conn = conn.lock().await;
                    menu::describe_product(&conn, category, dish)
                };

                match description {
                    Ok(text) => {
                        bot.send_message(chat_id, text)
                            .reply_markup(create_back_to_categories_keyboard())
                            .await?;
                    }
                    Err(e) if e.downcast_ref::<MenuError>().is_some() => {
                        // The menu changed between render and press
                        warn!("Dish lookup failed for user {}: {}", q.from.id, e);
                        bot.send_message(chat_id, "This dish is no longer on the menu.")
                            .reply_markup(create_back_to_categories_keyboard())
                            .await?;
                    }
                    Err(e) => return Err(e),
                }
            } else {
                warn!("Malformed dish callback from user {}: {}", q.from.id, data);
            }
        } else {
            warn!("Unknown callback from user {}: {}", q.from.id, data);
        }
    }

    // Answer the callback query to remove the loading state
    bot.answer_callback_query(q.id).await?;

    Ok(())
}
