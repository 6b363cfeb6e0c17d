//! Data models
//!
//! Shared between the server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod menu;
pub mod menu_item;
pub mod order;
pub mod owner;
pub mod qr_code;
pub mod restaurant;
pub mod scan;
pub mod table;

// Re-exports
pub use menu::*;
pub use menu_item::*;
pub use order::*;
pub use owner::*;
pub use qr_code::*;
pub use restaurant::*;
pub use scan::*;
pub use table::*;
