//! Restaurant Repository

use super::{RepoError, RepoResult};
use shared::models::{Menu, Restaurant, RestaurantCreate, RestaurantUpdate};
use sqlx::SqlitePool;

const RESTAURANT_SELECT: &str =
    "SELECT id, owner_id, name, location, contact_info, created_at, updated_at FROM restaurants";

const DEFAULT_MENU_NAME: &str = "Main Menu";
const DEFAULT_MENU_LANGUAGE: &str = "en";

/// Create a restaurant together with its default menu, atomically.
pub async fn create(
    pool: &SqlitePool,
    owner_id: i64,
    data: RestaurantCreate,
) -> RepoResult<(Restaurant, Menu)> {
    let now = shared::util::now_millis();
    let restaurant_id = shared::util::snowflake_id();
    let menu_id = shared::util::snowflake_id();

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO restaurants (id, owner_id, name, location, contact_info, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(restaurant_id)
    .bind(owner_id)
    .bind(&data.name)
    .bind(&data.location)
    .bind(&data.contact_info)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO menus (id, restaurant_id, name, language, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 1, ?5, ?5)",
    )
    .bind(menu_id)
    .bind(restaurant_id)
    .bind(DEFAULT_MENU_NAME)
    .bind(DEFAULT_MENU_LANGUAGE)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let restaurant = find_owned(pool, restaurant_id, owner_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create restaurant".into()))?;
    let menu = super::menu::find_by_id(pool, menu_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create default menu".into()))?;
    Ok((restaurant, menu))
}

/// Unscoped lookup, for the public scan flow only.
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Restaurant>> {
    let sql = format!("{RESTAURANT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Restaurant>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_all_by_owner(pool: &SqlitePool, owner_id: i64) -> RepoResult<Vec<Restaurant>> {
    let sql = format!("{RESTAURANT_SELECT} WHERE owner_id = ? ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Restaurant>(&sql)
        .bind(owner_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_owned(
    pool: &SqlitePool,
    id: i64,
    owner_id: i64,
) -> RepoResult<Option<Restaurant>> {
    let sql = format!("{RESTAURANT_SELECT} WHERE id = ? AND owner_id = ?");
    let row = sqlx::query_as::<_, Restaurant>(&sql)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    owner_id: i64,
    data: RestaurantUpdate,
) -> RepoResult<Restaurant> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE restaurants SET name = COALESCE(?1, name), location = COALESCE(?2, location), contact_info = COALESCE(?3, contact_info), updated_at = ?4 WHERE id = ?5 AND owner_id = ?6",
    )
    .bind(&data.name)
    .bind(&data.location)
    .bind(&data.contact_info)
    .bind(now)
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
    }
    find_owned(pool, id, owner_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
}

/// Number of tables still registered under a restaurant (delete guard)
pub async fn table_count(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<i64> {
    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM dining_tables WHERE restaurant_id = ?")
            .bind(restaurant_id)
            .fetch_one(pool)
            .await?;
    Ok(count.0)
}

/// Delete a restaurant and its menu content, children first in one transaction.
/// Callers must ensure no tables remain; the FK constraints back that up.
pub async fn delete(pool: &SqlitePool, id: i64, owner_id: i64) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "DELETE FROM menu_items WHERE menu_id IN (SELECT id FROM menus WHERE restaurant_id = ?)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM menus WHERE restaurant_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let rows = sqlx::query("DELETE FROM restaurants WHERE id = ? AND owner_id = ?")
        .bind(id)
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
    }

    tx.commit().await?;
    Ok(())
}
