//! Restaurant Model

use serde::{Deserialize, Serialize};

/// Restaurant entity (餐厅)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restaurant {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub location: Option<String>,
    pub contact_info: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create restaurant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub location: Option<String>,
    pub contact_info: Option<String>,
}

/// Update restaurant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub contact_info: Option<String>,
}
