//! # Menubot Telegram Bot
//!
//! A Telegram ordering bot that presents a hierarchical menu
//! (categories → dishes → descriptions) backed by an embedded document
//! store, with a validated data-access layer for product records.

pub mod bot;
pub mod db;
pub mod errors;
pub mod menu;
pub mod product;
