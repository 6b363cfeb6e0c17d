//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use sqlx::SqlitePool;

const MENU_ITEM_SELECT: &str = "SELECT id, menu_id, name, description, base_price, category, image_url, is_available, created_at, updated_at FROM menu_items";

const MENU_ITEM_OWNED_SELECT: &str = "SELECT mi.id, mi.menu_id, mi.name, mi.description, mi.base_price, mi.category, mi.image_url, mi.is_available, mi.created_at, mi.updated_at FROM menu_items mi JOIN menus m ON mi.menu_id = m.id JOIN restaurants r ON m.restaurant_id = r.id";

pub async fn create(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO menu_items (id, menu_id, name, description, base_price, category, image_url, is_available, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1, ?8, ?8)",
    )
    .bind(id)
    .bind(data.menu_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.base_price)
    .bind(&data.category)
    .bind(&data.image_url)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let sql = format!("{MENU_ITEM_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_owned(pool: &SqlitePool, id: i64, owner_id: i64) -> RepoResult<Option<MenuItem>> {
    let sql = format!("{MENU_ITEM_OWNED_SELECT} WHERE mi.id = ? AND r.owner_id = ?");
    let row = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn list_by_menu(pool: &SqlitePool, menu_id: i64) -> RepoResult<Vec<MenuItem>> {
    let sql = format!("{MENU_ITEM_SELECT} WHERE menu_id = ? ORDER BY category, name");
    let rows = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(menu_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Guest-facing listing: available items only
pub async fn list_available_by_menu(pool: &SqlitePool, menu_id: i64) -> RepoResult<Vec<MenuItem>> {
    let sql = format!("{MENU_ITEM_SELECT} WHERE menu_id = ? AND is_available = 1 ORDER BY category, name");
    let rows = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(menu_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    owner_id: i64,
    data: MenuItemUpdate,
) -> RepoResult<MenuItem> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE menu_items SET name = COALESCE(?1, name), description = COALESCE(?2, description), base_price = COALESCE(?3, base_price), category = COALESCE(?4, category), image_url = COALESCE(?5, image_url), is_available = COALESCE(?6, is_available), updated_at = ?7 WHERE id = ?8 AND menu_id IN (SELECT m.id FROM menus m JOIN restaurants r ON m.restaurant_id = r.id WHERE r.owner_id = ?9)",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.base_price)
    .bind(&data.category)
    .bind(&data.image_url)
    .bind(data.is_available)
    .bind(now)
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

/// Flip availability without touching anything else (the 86 switch)
pub async fn set_availability(
    pool: &SqlitePool,
    id: i64,
    owner_id: i64,
    is_available: bool,
) -> RepoResult<MenuItem> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE menu_items SET is_available = ?1, updated_at = ?2 WHERE id = ?3 AND menu_id IN (SELECT m.id FROM menus m JOIN restaurants r ON m.restaurant_id = r.id WHERE r.owner_id = ?4)",
    )
    .bind(is_available)
    .bind(now)
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

/// How many order lines reference this item (delete guard)
pub async fn order_reference_count(pool: &SqlitePool, id: i64) -> RepoResult<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM order_items WHERE menu_item_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}

pub async fn delete(pool: &SqlitePool, id: i64, owner_id: i64) -> RepoResult<()> {
    let rows = sqlx::query(
        "DELETE FROM menu_items WHERE id = ? AND menu_id IN (SELECT m.id FROM menus m JOIN restaurants r ON m.restaurant_id = r.id WHERE r.owner_id = ?)",
    )
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE restaurants (
                id INTEGER PRIMARY KEY,
                owner_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                created_at INTEGER NOT NULL DEFAULT 0,
                updated_at INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE menus (
                id INTEGER PRIMARY KEY,
                restaurant_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                language TEXT NOT NULL DEFAULT 'en',
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at INTEGER NOT NULL DEFAULT 0,
                updated_at INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE menu_items (
                id INTEGER PRIMARY KEY,
                menu_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                base_price REAL NOT NULL,
                category TEXT,
                image_url TEXT,
                is_available INTEGER NOT NULL DEFAULT 1,
                created_at INTEGER NOT NULL DEFAULT 0,
                updated_at INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE order_items (
                id INTEGER PRIMARY KEY,
                order_id INTEGER NOT NULL,
                menu_item_id INTEGER NOT NULL,
                quantity INTEGER NOT NULL,
                unit_price REAL NOT NULL,
                notes TEXT
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query("INSERT INTO restaurants (id, owner_id, name) VALUES (10, 1, 'Casa Lucia')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO menus (id, restaurant_id, name) VALUES (100, 10, 'Main Menu')")
            .execute(&pool)
            .await
            .unwrap();

        pool
    }

    fn payload(name: &str, price: f64) -> MenuItemCreate {
        MenuItemCreate {
            menu_id: 100,
            name: name.into(),
            description: None,
            base_price: price,
            category: Some("Mains".into()),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_available() {
        let pool = test_pool().await;
        let item = create(&pool, payload("Paella", 14.5)).await.unwrap();
        assert!(item.is_available);
        assert_eq!(item.base_price, 14.5);
    }

    #[tokio::test]
    async fn test_set_availability_toggles_only_flag() {
        let pool = test_pool().await;
        let item = create(&pool, payload("Paella", 14.5)).await.unwrap();

        let off = set_availability(&pool, item.id, 1, false).await.unwrap();
        assert!(!off.is_available);
        assert_eq!(off.name, "Paella");
        assert_eq!(off.base_price, 14.5);

        let on = set_availability(&pool, item.id, 1, true).await.unwrap();
        assert!(on.is_available);
    }

    #[tokio::test]
    async fn test_available_listing_skips_86d_items() {
        let pool = test_pool().await;
        let paella = create(&pool, payload("Paella", 14.5)).await.unwrap();
        create(&pool, payload("Gazpacho", 6.0)).await.unwrap();
        set_availability(&pool, paella.id, 1, false).await.unwrap();

        let available = list_available_by_menu(&pool, 100).await.unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].name, "Gazpacho");

        let all = list_by_menu(&pool, 100).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_wrong_owner_cannot_touch_item() {
        let pool = test_pool().await;
        let item = create(&pool, payload("Paella", 14.5)).await.unwrap();

        let err = set_availability(&pool, item.id, 99, false).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));

        let err = delete(&pool, item.id, 99).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_order_reference_count() {
        let pool = test_pool().await;
        let item = create(&pool, payload("Paella", 14.5)).await.unwrap();
        assert_eq!(order_reference_count(&pool, item.id).await.unwrap(), 0);

        sqlx::query(
            "INSERT INTO order_items (id, order_id, menu_item_id, quantity, unit_price) VALUES (1, 1, ?, 2, 14.5)",
        )
        .bind(item.id)
        .execute(&pool)
        .await
        .unwrap();
        assert_eq!(order_reference_count(&pool, item.id).await.unwrap(), 1);
    }
}
