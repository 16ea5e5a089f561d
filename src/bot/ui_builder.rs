//! UI Builder module for creating inline keyboards and formatting messages
//!
//! Keyboard builders are pure functions over pre-fetched name lists, so the
//! handlers own all store access. Callback data carries the category
//! explicitly (`dish:{category}:{dish}`) instead of re-deriving it from the
//! rendered message text.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Callback data for the start screen
pub const CALLBACK_START: &str = "start";
/// Callback data for the category list screen
pub const CALLBACK_MENU: &str = "menu";
/// Callback data for the admin panel stub
pub const CALLBACK_ADMIN: &str = "admin";
/// Prefix for category selection callbacks
pub const CALLBACK_CATEGORY_PREFIX: &str = "category:";
/// Prefix for dish selection callbacks
pub const CALLBACK_DISH_PREFIX: &str = "dish:";

/// Create the start screen keyboard: Menu and Admin panel buttons
pub fn create_start_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("Menu", CALLBACK_MENU)],
        vec![InlineKeyboardButton::callback("Admin panel", CALLBACK_ADMIN)],
    ])
}

/// Create one button per menu category, with a back-to-start button on top
pub fn create_category_keyboard(categories: &[String]) -> InlineKeyboardMarkup {
    let mut buttons = vec![vec![InlineKeyboardButton::callback(
        "Back to start",
        CALLBACK_START,
    )]];

    for category in categories {
        buttons.push(vec![InlineKeyboardButton::callback(
            category.clone(),
            format!("{CALLBACK_CATEGORY_PREFIX}{category}"),
        )]);
    }

    InlineKeyboardMarkup::new(buttons)
}

/// Create one button per dish in a category, with a back-to-categories
/// button on top
pub fn create_dishes_keyboard(category: &str, dishes: &[String]) -> InlineKeyboardMarkup {
    let mut buttons = vec![vec![InlineKeyboardButton::callback(
        "Back to categories",
        CALLBACK_MENU,
    )]];

    for dish in dishes {
        buttons.push(vec![InlineKeyboardButton::callback(
            dish.clone(),
            format!("{CALLBACK_DISH_PREFIX}{category}:{dish}"),
        )]);
    }

    InlineKeyboardMarkup::new(buttons)
}

/// Create the lone back-to-categories button under a dish detail message
pub fn create_back_to_categories_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "Back to categories",
        CALLBACK_MENU,
    )]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(button: &InlineKeyboardButton) -> &str {
        match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => data,
            other => panic!("Expected callback button, got {other:?}"),
        }
    }

    #[test]
    fn test_start_keyboard_layout() {
        let keyboard = create_start_keyboard();

        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(callback_data(&keyboard.inline_keyboard[0][0]), "menu");
        assert_eq!(callback_data(&keyboard.inline_keyboard[1][0]), "admin");
    }

    #[test]
    fn test_category_keyboard_callback_data() {
        let categories = vec!["drinks".to_string(), "desserts".to_string()];

        let keyboard = create_category_keyboard(&categories);

        assert_eq!(keyboard.inline_keyboard.len(), 3);
        assert_eq!(callback_data(&keyboard.inline_keyboard[0][0]), "start");
        assert_eq!(
            callback_data(&keyboard.inline_keyboard[1][0]),
            "category:drinks"
        );
        assert_eq!(
            callback_data(&keyboard.inline_keyboard[2][0]),
            "category:desserts"
        );
    }

    #[test]
    fn test_dishes_keyboard_carries_category() {
        let dishes = vec!["Sprite".to_string()];

        let keyboard = create_dishes_keyboard("drinks", &dishes);

        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(callback_data(&keyboard.inline_keyboard[0][0]), "menu");
        assert_eq!(
            callback_data(&keyboard.inline_keyboard[1][0]),
            "dish:drinks:Sprite"
        );
    }

    #[test]
    fn test_back_keyboard() {
        let keyboard = create_back_to_categories_keyboard();

        assert_eq!(keyboard.inline_keyboard.len(), 1);
        assert_eq!(callback_data(&keyboard.inline_keyboard[0][0]), "menu");
    }

    #[test]
    fn test_empty_lists_leave_only_back_buttons() {
        assert_eq!(create_category_keyboard(&[]).inline_keyboard.len(), 1);
        assert_eq!(create_dishes_keyboard("drinks", &[]).inline_keyboard.len(), 1);
    }
}
