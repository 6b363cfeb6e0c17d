//! Menu Model

use serde::{Deserialize, Serialize};

/// Menu entity (菜单), one restaurant can carry several language editions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Menu {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub language: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create menu payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCreate {
    pub restaurant_id: i64,
    pub name: String,
    pub language: Option<String>,
}

/// Update menu payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuUpdate {
    pub name: Option<String>,
    pub language: Option<String>,
    pub is_active: Option<bool>,
}
