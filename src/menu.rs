//! # Menu Query Facade
//!
//! Read-only helpers over the "menu" collection, used by the presentation
//! layer to render category and dish screens. Every call is a fresh round
//! trip to the store; nothing is cached.
//!
//! Missing categories on the list paths produce empty results; a detail
//! lookup of a missing category or dish is a [`MenuError::Lookup`] failure.

use anyhow::Result;
use rusqlite::Connection;

use crate::db;
use crate::errors::MenuError;
use crate::product::Product;

/// The collection holding one document per menu category
pub const MENU_COLLECTION: &str = "menu";

/// List the names of all menu categories, in store order.
pub fn list_category_names(conn: &Connection) -> Result<Vec<String>> {
    db::list_documents(conn, MENU_COLLECTION)
}

/// List the names of all dishes in `category`.
///
/// An unknown category yields an empty list.
pub fn list_product_names(conn: &Connection, category: &str) -> Result<Vec<String>> {
    let fields = db::get_document_fields(conn, MENU_COLLECTION, category)?;

    Ok(fields
        .map(|fields| fields.keys().cloned().collect())
        .unwrap_or_default())
}

/// Format the detail line for one dish: `"description: price"`.
pub fn describe_product(conn: &Connection, category: &str, product_name: &str) -> Result<String> {
    let fields = db::get_document_fields(conn, MENU_COLLECTION, category)?
        .ok_or_else(|| MenuError::Lookup(format!("category '{category}' does not exist")))?;

    let product_fields = fields
        .get(product_name)
        .and_then(|value| value.as_object())
        .ok_or_else(|| {
            MenuError::Lookup(format!("'{product_name}' is not in category '{category}'"))
        })?;

    let product = Product::from_fields(product_fields)
        .map_err(|_| MenuError::Lookup(format!("'{product_name}' has no readable record")))?;

    Ok(format!("{}: {}", product.description, product.price))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;
    use tempfile::NamedTempFile;

    fn setup_test_db() -> Result<(Connection, NamedTempFile)> {
        let temp_file = NamedTempFile::new()?;
        let conn = Connection::open(temp_file.path())?;
        db::init_store_schema(&conn)?;
        Ok((conn, temp_file))
    }

    #[test]
    fn test_list_category_names() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        db::add_document(&conn, MENU_COLLECTION, "drinks")?;
        db::add_document(&conn, MENU_COLLECTION, "desserts")?;
        // Documents outside the menu collection are invisible here
        db::add_document(&conn, "archive", "obsolete")?;

        assert_eq!(
            list_category_names(&conn)?,
            vec!["drinks".to_string(), "desserts".to_string()]
        );

        Ok(())
    }

    #[test]
    fn test_list_product_names() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        db::add_product(&conn, MENU_COLLECTION, "drinks", &json!({"Sprite": {"price": 2.82}}))?;
        db::add_product(&conn, MENU_COLLECTION, "drinks", &json!({"Cola": {"price": 3}}))?;

        let names = list_product_names(&conn, "drinks")?;
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Sprite".to_string()));
        assert!(names.contains(&"Cola".to_string()));

        Ok(())
    }

    #[test]
    fn test_list_product_names_unknown_category() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        assert!(list_product_names(&conn, "nonexistent")?.is_empty());

        Ok(())
    }

    #[test]
    fn test_describe_product() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        db::add_product(
            &conn,
            MENU_COLLECTION,
            "drinks",
            &json!({"Sprite": {"description": "Carbonated drink", "price": 2.82}}),
        )?;

        assert_eq!(
            describe_product(&conn, "drinks", "Sprite")?,
            "Carbonated drink: 2.82"
        );

        Ok(())
    }

    #[test]
    fn test_describe_product_missing_dish() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        db::add_document(&conn, MENU_COLLECTION, "drinks")?;

        let err = describe_product(&conn, "drinks", "Fanta").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MenuError>(),
            Some(MenuError::Lookup(_))
        ));

        Ok(())
    }

    #[test]
    fn test_describe_product_missing_category() -> Result<()> {
        let (conn, _temp_file) = setup_test_db()?;

        let err = describe_product(&conn, "ghost", "Sprite").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MenuError>(),
            Some(MenuError::Lookup(_))
        ));

        Ok(())
    }
}
