//! # Product Data Model and Payload Validation
//!
//! A product is one field inside a category document: a priced, described,
//! activatable menu item. This module defines the typed record and the
//! two-stage validator that guards every product write.
//!
//! ## Payload template
//!
//! An add-product payload is a JSON object with exactly one key, the product
//! name, mapped to its fields:
//!
//! ```json
//! {"Sprite": {"description": "Carbonated drink", "price": 2.82}}
//! ```
//!
//! `price` is required; `description` (default `""`) and `in_active`
//! (default `true`) are optional; any other field is rejected.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names accepted in a product payload
const FIELD_DESCRIPTION: &str = "description";
const FIELD_PRICE: &str = "price";
const FIELD_IN_ACTIVE: &str = "in_active";

/// A fully defaulted product record as stored in a category document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Human-readable description shown on the dish detail screen
    #[serde(default)]
    pub description: String,
    /// Price, integer or floating-point
    pub price: f64,
    /// Whether the product is currently offered
    #[serde(default = "default_in_active")]
    pub in_active: bool,
}

fn default_in_active() -> bool {
    true
}

impl Product {
    /// Deserialize a stored field mapping into a typed record.
    ///
    /// Tolerates extra fields introduced through the low-level field-update
    /// escape hatch; fails if the three core fields are absent or mistyped.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(fields.clone()))
    }
}

/// Validation failures, in the order the stages run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Payload is not a single-key mapping of name → field mapping, or the
    /// field-name set is not one of the accepted shapes
    Shape(String),
    /// A field value has the wrong type for its slot
    FieldType(String),
    /// A required field is absent after defaulting; the shape stage
    /// guarantees presence, so this only fires on an internal invariant break
    MissingField(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Shape(msg) => write!(f, "Shape error: {msg}"),
            ValidationError::FieldType(msg) => write!(f, "Type error: {msg}"),
            ValidationError::MissingField(msg) => write!(f, "Missing field: {msg}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate an add-product payload and return the product name together with
/// its normalized field mapping (defaults applied, all three fields typed).
///
/// Runs the shape stage first, then the type stage, and never partially
/// succeeds: any failure leaves the caller with no mapping to write.
pub fn validate_payload(
    payload: &Value,
) -> Result<(String, Map<String, Value>), ValidationError> {
    let fields = check_shape(payload)?;
    let name = payload
        .as_object()
        .and_then(|outer| outer.keys().next())
        .cloned()
        .ok_or_else(|| ValidationError::Shape("payload has no product name".to_string()))?;
    check_types(&fields)?;
    Ok((name, fields))
}

/// Shape stage: single-key object, accepted field-name set, defaults applied.
///
/// Non-mapping payloads fail here uniformly; there is no path on which a
/// malformed input reaches the type stage.
fn check_shape(payload: &Value) -> Result<Map<String, Value>, ValidationError> {
    let outer = payload
        .as_object()
        .ok_or_else(|| ValidationError::Shape("payload is not a mapping".to_string()))?;

    if outer.len() != 1 {
        return Err(ValidationError::Shape(format!(
            "payload must contain exactly one product name, got {} keys",
            outer.len()
        )));
    }

    let (name, inner) = outer.iter().next().ok_or_else(|| {
        ValidationError::Shape("payload has no product name".to_string())
    })?;

    let mut fields = inner
        .as_object()
        .ok_or_else(|| {
            ValidationError::Shape(format!("fields of '{name}' are not a mapping"))
        })?
        .clone();

    // Accepted shapes are exactly: price required, description and in_active
    // optional, nothing else.
    for key in fields.keys() {
        if key != FIELD_DESCRIPTION && key != FIELD_PRICE && key != FIELD_IN_ACTIVE {
            return Err(ValidationError::Shape(format!(
                "unrecognized field '{key}' in product '{name}'"
            )));
        }
    }
    if !fields.contains_key(FIELD_PRICE) {
        return Err(ValidationError::Shape(format!(
            "product '{name}' is missing the required field 'price'"
        )));
    }

    fields
        .entry(FIELD_DESCRIPTION.to_string())
        .or_insert_with(|| Value::String(String::new()));
    fields
        .entry(FIELD_IN_ACTIVE.to_string())
        .or_insert(Value::Bool(true));

    Ok(fields)
}

/// Type stage: the defaulted mapping must hold a numeric price, a string
/// description and a boolean activity flag.
fn check_types(fields: &Map<String, Value>) -> Result<(), ValidationError> {
    let price = fields
        .get(FIELD_PRICE)
        .ok_or_else(|| ValidationError::MissingField("price".to_string()))?;
    if !price.is_number() {
        return Err(ValidationError::FieldType(
            "'price' must be a number".to_string(),
        ));
    }

    let description = fields
        .get(FIELD_DESCRIPTION)
        .ok_or_else(|| ValidationError::MissingField("description".to_string()))?;
    if !description.is_string() {
        return Err(ValidationError::FieldType(
            "'description' must be a string".to_string(),
        ));
    }

    let in_active = fields
        .get(FIELD_IN_ACTIVE)
        .ok_or_else(|| ValidationError::MissingField("in_active".to_string()))?;
    if !in_active.is_boolean() {
        return Err(ValidationError::FieldType(
            "'in_active' must be a boolean".to_string(),
        ));
    }

    Ok(())
}
