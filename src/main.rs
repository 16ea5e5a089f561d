use anyhow::Result;
use log::info;
use rusqlite::Connection;
use std::env;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::sync::Mutex;

use menubot::{bot, db};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    info!("Starting Menubot Telegram Bot");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Get bot token from environment
    let bot_token = env::var("TELEGRAM_BOT_TOKEN").expect("TELEGRAM_BOT_TOKEN must be set");

    // Get database path from environment
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    info!("Initializing document store at: {}", database_url);

    // Create the store connection once; it lives for the process lifetime
    let conn = Connection::open(&database_url)?;

    // Initialize store schema
    db::init_store_schema(&conn)?;

    // Wrap connection in Arc<Mutex> for sharing across async tasks
    let shared_conn = Arc::new(Mutex::new(conn));

    // Initialize the bot
    let bot = Bot::new(bot_token);

    info!("Bot initialized, starting dispatcher");

    // Set up the dispatcher with shared connection
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint({
            let conn = Arc::clone(&shared_conn);
            move |bot: Bot, msg: Message| {
                let conn = Arc::clone(&conn);
                async move { bot::message_handler(bot, msg, conn).await }
            }
        }))
        .branch(Update::filter_callback_query().endpoint({
            let conn = Arc::clone(&shared_conn);
            move |bot: Bot, q: teloxide::types::CallbackQuery| {
                let conn = Arc::clone(&conn);
                async move { bot::callback_handler(bot, q, conn).await }
            }
        }));

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
