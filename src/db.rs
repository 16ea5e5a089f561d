use anyhow::{Context, Result};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value};

use crate::errors::MenuError;
use crate::product::{self, ValidationError};

/// Initialize the document store schema
///
/// The store is addressed as collection → document → product: a `documents`
/// table records which documents exist (a document may hold zero products),
/// and each product row carries its field mapping as JSON text.
pub fn init_store_schema(conn: &Connection) -> Result<()> {
    info!("Initializing document store schema...");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS documents (
            collection TEXT NOT NULL,
            name TEXT NOT NULL,
            PRIMARY KEY (collection, name)
        )",
        [],
    )
    .context("Failed to create documents table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS products (
            collection TEXT NOT NULL,
            document TEXT NOT NULL,
            name TEXT NOT NULL,
            fields TEXT NOT NULL,
            PRIMARY KEY (collection, document, name)
        )",
        [],
    )
    .context("Failed to create products table")?;

    info!("Document store schema initialized successfully");
    Ok(())
}

/// Create the document `document_name` in `collection_name`.
///
/// Returns whether a new document was created; calling again with the same
/// name is an idempotent no-op. Collections exist implicitly, so there is no
/// prior-existence requirement on the collection side.
pub fn add_document(conn: &Connection, collection_name: &str, document_name: &str) -> Result<bool> {
    info!("Adding document '{document_name}' to collection '{collection_name}'");

    let rows_affected = conn
        .execute(
            "INSERT OR IGNORE INTO documents (collection, name) VALUES (?1, ?2)",
            params![collection_name, document_name],
        )
        .context("Failed to insert document")?;

    Ok(rows_affected > 0)
}

/// List the document identifiers in `collection_name`.
///
/// Each call is a fresh query; the order is the store's insertion order.
/// An unknown collection yields an empty list.
pub fn list_documents(conn: &Connection, collection_name: &str) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT name FROM documents WHERE collection = ?1 ORDER BY rowid")
        .context("Failed to prepare document listing")?;

    let names = stmt
        .query_map(params![collection_name], |row| row.get::<_, String>(0))
        .context("Failed to list documents")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("Failed to read document row")?;

    Ok(names)
}

/// Delete the document `document_name` and all products inside it.
///
/// Returns whether the document existed; deleting a missing document is a
/// no-op.
pub fn delete_document(
    conn: &Connection,
    collection_name: &str,
    document_name: &str,
) -> Result<bool> {
    info!("Deleting document '{document_name}' from collection '{collection_name}'");

    conn.execute(
        "DELETE FROM products WHERE collection = ?1 AND document = ?2",
        params![collection_name, document_name],
    )
    .context("Failed to delete document products")?;

    let rows_affected = conn
        .execute(
            "DELETE FROM documents WHERE collection = ?1 AND name = ?2",
            params![collection_name, document_name],
        )
        .context("Failed to delete document")?;

    Ok(rows_affected > 0)
}

/// Add one product to the document `document_name`, creating the document if
/// it does not exist yet.
///
/// The payload is a mapping with exactly one product-name key:
///
/// ```json
/// {"Sprite": {"description": "Carbonated drink", "price": 2.82}}
/// ```
///
/// `in_active` defaults to `true` and `description` to `""` when omitted.
/// The write is a merge at the document level: an existing product of the
/// same name is overwritten, sibling products are untouched.
///
/// Validation runs before anything is written. Shape failures surface as
/// [`MenuError::ArgumentShape`], wrong field types as
/// [`MenuError::ArgumentType`].
pub fn add_product(
    conn: &Connection,
    collection_name: &str,
    document_name: &str,
    payload: &Value,
) -> Result<()> {
    let (product_name, fields) = product::validate_payload(payload).map_err(|e| match e {
        ValidationError::Shape(msg) => MenuError::ArgumentShape(msg),
        ValidationError::FieldType(msg) => MenuError::ArgumentType(msg),
        ValidationError::MissingField(field) => {
            MenuError::ArgumentType(format!("required field '{field}' is absent"))
        }
    })?;

    info!("Adding product '{product_name}' to document '{document_name}' in '{collection_name}'");

    conn.execute(
        "INSERT OR IGNORE INTO documents (collection, name) VALUES (?1, ?2)",
        params![collection_name, document_name],
    )
    .context("Failed to ensure document exists")?;

    let fields_json =
        serde_json::to_string(&Value::Object(fields)).context("Failed to serialize product")?;

    conn.execute(
        "INSERT OR REPLACE INTO products (collection, document, name, fields)
         VALUES (?1, ?2, ?3, ?4)",
        params![collection_name, document_name, product_name, fields_json],
    )
    .context("Failed to write product")?;

    Ok(())
}

/// Read the full field mapping of a document: product name → product fields.
///
/// Returns `None` when the collection or document does not exist. A missing
/// document on a read path is normal, not an error.
pub fn get_document_fields(
    conn: &Connection,
    collection_name: &str,
    document_name: &str,
) -> Result<Option<Map<String, Value>>> {
    let exists: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM documents WHERE collection = ?1 AND name = ?2",
            params![collection_name, document_name],
            |row| row.get(0),
        )
        .optional()
        .context("Failed to check document existence")?;

    if exists.is_none() {
        info!("Document '{document_name}' not found in collection '{collection_name}'");
        return Ok(None);
    }

    let mut stmt = conn
        .prepare(
            "SELECT name, fields FROM products
             WHERE collection = ?1 AND document = ?2 ORDER BY rowid",
        )
        .context("Failed to prepare product listing")?;

    let rows = stmt
        .query_map(params![collection_name, document_name], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .context("Failed to read document fields")?;

    let mut fields = Map::new();
    for row in rows {
        let (name, fields_json) = row.context("Failed to read product row")?;
        let value: Value = serde_json::from_str(&fields_json)
            .with_context(|| format!("Stored fields of '{name}' are not valid JSON"))?;
        fields.insert(name, value);
    }

    Ok(Some(fields))
}

/// Delete the product `product_name` from a document.
///
/// Removes exactly that field; sibling products and the document itself are
/// left intact. Returns whether the product existed; deleting a missing
/// product or document is a no-op.
pub fn delete_product(
    conn: &Connection,
    collection_name: &str,
    document_name: &str,
    product_name: &str,
) -> Result<bool> {
    info!("Deleting product '{product_name}' from document '{document_name}' in '{collection_name}'");

    let rows_affected = conn
        .execute(
            "DELETE FROM products WHERE collection = ?1 AND document = ?2 AND name = ?3",
            params![collection_name, document_name, product_name],
        )
        .context("Failed to delete product")?;

    Ok(rows_affected > 0)
}

/// Set or create a single nested product field addressed by a
/// `"product.property"` path, bypassing payload validation.
///
/// Low-level escape hatch, not part of the stable write contract: callers
/// accept responsibility for keeping the stored record well-shaped. The
/// document and product are created as needed.
pub fn update_product_field(
    conn: &Connection,
    collection_name: &str,
    document_name: &str,
    field_path: &str,
    value: Value,
) -> Result<()> {
    let (product_name, property) = field_path.split_once('.').ok_or_else(|| {
        anyhow::anyhow!("field path '{field_path}' must have the form 'product.property'")
    })?;

    info!("Updating field '{field_path}' in document '{document_name}' in '{collection_name}'");

    conn.execute(
        "INSERT OR IGNORE INTO documents (collection, name) VALUES (?1, ?2)",
        params![collection_name, document_name],
    )
    .context("Failed to ensure document exists")?;

    let existing: Option<String> = conn
        .query_row(
            "SELECT fields FROM products
             WHERE collection = ?1 AND document = ?2 AND name = ?3",
            params![collection_name, document_name, product_name],
            |row| row.get(0),
        )
        .optional()
        .context("Failed to read product fields")?;

    let mut fields: Map<String, Value> = match existing {
        Some(json) => serde_json::from_str(&json)
            .with_context(|| format!("Stored fields of '{product_name}' are not valid JSON"))?,
        None => Map::new(),
    };
    fields.insert(property.to_string(), value);

    let fields_json =
        serde_json::to_string(&Value::Object(fields)).context("Failed to serialize product")?;

    conn.execute(
        "INSERT OR REPLACE INTO products (collection, document, name, fields)
         VALUES (?1, ?2, ?3, ?4)",
        params![collection_name, document_name, product_name, fields_json],
    )
    .context("Failed to write product field")?;

    Ok(())
}
