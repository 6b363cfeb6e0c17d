//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity (菜品)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub menu_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub base_price: f64,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub menu_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub base_price: f64,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub base_price: Option<f64>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

/// Toggle availability payload (86'd items stay on the menu, greyed out)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemAvailabilityUpdate {
    pub is_available: bool,
}
