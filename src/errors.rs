//! # Menu Error Types Module
//!
//! This module defines the public error vocabulary of the menu data layer.
//! Write operations distinguish malformed payload shapes from wrong field
//! value types; detail lookups report missing entries. Store-level failures
//! (the database itself being unreachable or corrupt) are not part of this
//! vocabulary and propagate unchanged as `rusqlite` errors.

/// Errors surfaced by the document store adapter and the menu facade
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// Payload to add_product is not a single-key mapping, or its inner
    /// field names do not match an accepted product shape
    ArgumentShape(String),
    /// A product field value has the wrong type for its slot
    ArgumentType(String),
    /// A requested category or product is absent where presence is assumed
    Lookup(String),
}

impl std::fmt::Display for MenuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuError::ArgumentShape(msg) => write!(f, "Invalid payload shape: {msg}"),
            MenuError::ArgumentType(msg) => write!(f, "Invalid field type: {msg}"),
            MenuError::Lookup(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for MenuError {}
