//! Menu Repository

use super::{RepoError, RepoResult};
use shared::models::{Menu, MenuCreate, MenuUpdate};
use sqlx::SqlitePool;

const MENU_SELECT: &str =
    "SELECT id, restaurant_id, name, language, is_active, created_at, updated_at FROM menus";

pub async fn create(pool: &SqlitePool, data: MenuCreate) -> RepoResult<Menu> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let language = data.language.unwrap_or_else(|| "en".into());
    sqlx::query(
        "INSERT INTO menus (id, restaurant_id, name, language, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 1, ?5, ?5)",
    )
    .bind(id)
    .bind(data.restaurant_id)
    .bind(&data.name)
    .bind(&language)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Menu>> {
    let sql = format!("{MENU_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Menu>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_owned(pool: &SqlitePool, id: i64, owner_id: i64) -> RepoResult<Option<Menu>> {
    let row = sqlx::query_as::<_, Menu>(
        "SELECT m.id, m.restaurant_id, m.name, m.language, m.is_active, m.created_at, m.updated_at FROM menus m JOIN restaurants r ON m.restaurant_id = r.id WHERE m.id = ? AND r.owner_id = ?",
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn list_by_restaurant(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<Vec<Menu>> {
    let sql = format!("{MENU_SELECT} WHERE restaurant_id = ? ORDER BY created_at ASC");
    let rows = sqlx::query_as::<_, Menu>(&sql)
        .bind(restaurant_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Active menus only, oldest first, for the guest-facing view
pub async fn list_active_by_restaurant(
    pool: &SqlitePool,
    restaurant_id: i64,
) -> RepoResult<Vec<Menu>> {
    let sql = format!("{MENU_SELECT} WHERE restaurant_id = ? AND is_active = 1 ORDER BY created_at ASC");
    let rows = sqlx::query_as::<_, Menu>(&sql)
        .bind(restaurant_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    owner_id: i64,
    data: MenuUpdate,
) -> RepoResult<Menu> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE menus SET name = COALESCE(?1, name), language = COALESCE(?2, language), is_active = COALESCE(?3, is_active), updated_at = ?4 WHERE id = ?5 AND restaurant_id IN (SELECT id FROM restaurants WHERE owner_id = ?6)",
    )
    .bind(&data.name)
    .bind(&data.language)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu {id} not found")))
}

/// Number of items on a menu (delete guard)
pub async fn item_count(pool: &SqlitePool, menu_id: i64) -> RepoResult<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM menu_items WHERE menu_id = ?")
        .bind(menu_id)
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}

pub async fn delete(pool: &SqlitePool, id: i64, owner_id: i64) -> RepoResult<()> {
    let rows = sqlx::query(
        "DELETE FROM menus WHERE id = ? AND restaurant_id IN (SELECT id FROM restaurants WHERE owner_id = ?)",
    )
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu {id} not found")));
    }
    Ok(())
}
