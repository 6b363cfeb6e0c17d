//! Owner Model

use serde::{Deserialize, Serialize};

/// Restaurant owner account (商户账户), password hash never serialized
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Owner {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub created_at: i64,
}

/// Register owner payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerRegister {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerLogin {
    pub email: String,
    pub password: String,
}
