//! Dining Table Repository
//!
//! Holds the status transition and the ordered cascade delete. The cascade
//! runs child rows first inside one transaction; FK constraints carry no
//! ON DELETE CASCADE, so a wrong order would abort instead of half-deleting.

use super::{RepoError, RepoResult};
use shared::models::{Table, TableCreate, TableStatus, TableUpdate};
use sqlx::SqlitePool;

const TABLE_SELECT: &str = "SELECT id, restaurant_id, table_number, zone, capacity, status, last_occupied, created_at, updated_at FROM dining_tables";

const TABLE_OWNED_SELECT: &str = "SELECT t.id, t.restaurant_id, t.table_number, t.zone, t.capacity, t.status, t.last_occupied, t.created_at, t.updated_at FROM dining_tables t JOIN restaurants r ON t.restaurant_id = r.id";

const DEFAULT_ZONE: &str = "Main";
const DEFAULT_CAPACITY: i32 = 4;

/// Row counts removed by a table cascade, for the operation log
#[derive(Debug, Default, Clone, Copy)]
pub struct CascadeSummary {
    pub scans: u64,
    pub qr_codes: u64,
    pub order_items: u64,
    pub orders: u64,
}

pub async fn create(pool: &SqlitePool, data: TableCreate) -> RepoResult<Table> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let zone = data.zone.unwrap_or_else(|| DEFAULT_ZONE.into());
    let capacity = data.capacity.unwrap_or(DEFAULT_CAPACITY);
    sqlx::query(
        "INSERT INTO dining_tables (id, restaurant_id, table_number, zone, capacity, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(id)
    .bind(data.restaurant_id)
    .bind(&data.table_number)
    .bind(&zone)
    .bind(capacity)
    .bind(TableStatus::Available)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create table".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Table>> {
    let sql = format!("{TABLE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Table>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_owned(pool: &SqlitePool, id: i64, owner_id: i64) -> RepoResult<Option<Table>> {
    let sql = format!("{TABLE_OWNED_SELECT} WHERE t.id = ? AND r.owner_id = ?");
    let row = sqlx::query_as::<_, Table>(&sql)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn list_by_restaurant(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<Vec<Table>> {
    let sql = format!("{TABLE_SELECT} WHERE restaurant_id = ? ORDER BY zone, table_number");
    let rows = sqlx::query_as::<_, Table>(&sql)
        .bind(restaurant_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    owner_id: i64,
    data: TableUpdate,
) -> RepoResult<Table> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE dining_tables SET table_number = COALESCE(?1, table_number), zone = COALESCE(?2, zone), capacity = COALESCE(?3, capacity), updated_at = ?4 WHERE id = ?5 AND restaurant_id IN (SELECT id FROM restaurants WHERE owner_id = ?6)",
    )
    .bind(&data.table_number)
    .bind(&data.zone)
    .bind(data.capacity)
    .bind(now)
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
}

/// Set the table status. Any transition between valid states is allowed;
/// entering OCCUPIED stamps `last_occupied`, which later transitions keep.
pub async fn set_status(
    pool: &SqlitePool,
    id: i64,
    owner_id: i64,
    status: TableStatus,
) -> RepoResult<Table> {
    let now = shared::util::now_millis();
    let sql = if status == TableStatus::Occupied {
        "UPDATE dining_tables SET status = ?1, last_occupied = ?2, updated_at = ?2 WHERE id = ?3 AND restaurant_id IN (SELECT id FROM restaurants WHERE owner_id = ?4)"
    } else {
        "UPDATE dining_tables SET status = ?1, updated_at = ?2 WHERE id = ?3 AND restaurant_id IN (SELECT id FROM restaurants WHERE owner_id = ?4)"
    };
    let rows = sqlx::query(sql)
        .bind(status)
        .bind(now)
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
}

/// Delete a table and everything hanging off it in one transaction.
///
/// Order matters: scans, then QR codes, then order items, then orders,
/// then the table row itself. Any failure rolls the whole thing back.
pub async fn delete_cascade(
    pool: &SqlitePool,
    id: i64,
    owner_id: i64,
) -> RepoResult<CascadeSummary> {
    let mut tx = pool.begin().await?;

    // Ownership check inside the transaction so the row cannot move under us
    let owned: Option<(i64,)> = sqlx::query_as(
        "SELECT t.id FROM dining_tables t JOIN restaurants r ON t.restaurant_id = r.id WHERE t.id = ? AND r.owner_id = ?",
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(&mut *tx)
    .await?;
    if owned.is_none() {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }

    let mut summary = CascadeSummary::default();

    summary.scans = sqlx::query(
        "DELETE FROM scans WHERE qr_code_id IN (SELECT id FROM qr_codes WHERE table_id = ?)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    summary.qr_codes = sqlx::query("DELETE FROM qr_codes WHERE table_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    summary.order_items = sqlx::query(
        "DELETE FROM order_items WHERE order_id IN (SELECT id FROM orders WHERE table_id = ?)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    summary.orders = sqlx::query("DELETE FROM orders WHERE table_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM dining_tables WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// In-memory pool with the full chain of tables and FK enforcement on,
    /// so cascade ordering mistakes fail loudly.
    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await.unwrap();

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
            "CREATE TABLE dining_tables (
                id INTEGER PRIMARY KEY,
                restaurant_id INTEGER NOT NULL REFERENCES restaurants(id),
                table_number TEXT NOT NULL,
                zone TEXT NOT NULL DEFAULT 'Main',
                capacity INTEGER NOT NULL DEFAULT 4,
                status TEXT NOT NULL DEFAULT 'AVAILABLE',
                last_occupied INTEGER,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                UNIQUE (restaurant_id, table_number)
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE qr_codes (
                id INTEGER PRIMARY KEY,
                restaurant_id INTEGER NOT NULL REFERENCES restaurants(id),
                table_id INTEGER NOT NULL UNIQUE REFERENCES dining_tables(id),
                unique_code TEXT NOT NULL UNIQUE,
                target_url TEXT NOT NULL,
                image_data TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE orders (
                id INTEGER PRIMARY KEY,
                restaurant_id INTEGER NOT NULL REFERENCES restaurants(id),
                table_id INTEGER NOT NULL REFERENCES dining_tables(id),
                status TEXT NOT NULL DEFAULT 'PENDING',
                total REAL NOT NULL DEFAULT 0,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE order_items (
                id INTEGER PRIMARY KEY,
                order_id INTEGER NOT NULL REFERENCES orders(id),
                menu_item_id INTEGER NOT NULL,
                quantity INTEGER NOT NULL,
                unit_price REAL NOT NULL,
                notes TEXT
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE scans (
                id INTEGER PRIMARY KEY,
                qr_code_id INTEGER NOT NULL REFERENCES qr_codes(id),
                session_id TEXT NOT NULL,
                scanned_at INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query("INSERT INTO restaurants (id, owner_id, name) VALUES (10, 1, 'Casa Lucia')")
            .execute(&pool)
            .await
            .unwrap();

        pool
    }

    fn payload(table_number: &str) -> TableCreate {
        TableCreate {
            restaurant_id: 10,
            table_number: table_number.into(),
            zone: None,
            capacity: None,
        }
    }

    /// Seed QR code, scans, an order with items under the given table.
    async fn seed_table_children(pool: &SqlitePool, table_id: i64) {
        sqlx::query(
            "INSERT INTO qr_codes (id, restaurant_id, table_id, unique_code, target_url, image_data, created_at) VALUES (?1, 10, ?2, ?3, 'http://x/table/1', 'data:image/png;base64,x', 0)",
        )
        .bind(table_id + 1)
        .bind(table_id)
        .bind(format!("code-{table_id}"))
        .execute(pool)
        .await
        .unwrap();

        for i in 0..2 {
            sqlx::query("INSERT INTO scans (id, qr_code_id, session_id, scanned_at) VALUES (?1, ?2, 'sess', 0)")
                .bind(table_id * 100 + i)
                .bind(table_id + 1)
                .execute(pool)
                .await
                .unwrap();
        }

        sqlx::query(
            "INSERT INTO orders (id, restaurant_id, table_id, status, total, created_at, updated_at) VALUES (?1, 10, ?2, 'PENDING', 20.0, 0, 0)",
        )
        .bind(table_id + 2)
        .bind(table_id)
        .execute(pool)
        .await
        .unwrap();

        sqlx::query(
            "INSERT INTO order_items (id, order_id, menu_item_id, quantity, unit_price) VALUES (?1, ?2, 1, 2, 10.0)",
        )
        .bind(table_id + 3)
        .bind(table_id + 2)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let row: (i64,) = sqlx::query_as(&sql).fetch_one(pool).await.unwrap();
        row.0
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let pool = test_pool().await;
        let table = create(&pool, payload("T1")).await.unwrap();
        assert_eq!(table.zone, "Main");
        assert_eq!(table.capacity, 4);
        assert_eq!(table.status, TableStatus::Available);
        assert!(table.last_occupied.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_number_same_restaurant_rejected() {
        let pool = test_pool().await;
        create(&pool, payload("T1")).await.unwrap();
        let err = create(&pool, payload("T1")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_same_number_other_restaurant_allowed() {
        let pool = test_pool().await;
        sqlx::query("INSERT INTO restaurants (id, owner_id, name) VALUES (20, 2, 'Other')")
            .execute(&pool)
            .await
            .unwrap();
        create(&pool, payload("T1")).await.unwrap();
        let other = create(
            &pool,
            TableCreate {
                restaurant_id: 20,
                table_number: "T1".into(),
                zone: None,
                capacity: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(other.table_number, "T1");
    }

    #[tokio::test]
    async fn test_occupied_stamps_last_occupied() {
        let pool = test_pool().await;
        let table = create(&pool, payload("T1")).await.unwrap();
        assert!(table.last_occupied.is_none());

        let occupied = set_status(&pool, table.id, 1, TableStatus::Occupied).await.unwrap();
        assert_eq!(occupied.status, TableStatus::Occupied);
        let stamp = occupied.last_occupied.unwrap();
        assert!(stamp > 0);

        // Freeing the table keeps the stamp
        let freed = set_status(&pool, table.id, 1, TableStatus::Available).await.unwrap();
        assert_eq!(freed.status, TableStatus::Available);
        assert_eq!(freed.last_occupied, Some(stamp));
    }

    #[tokio::test]
    async fn test_any_transition_allowed() {
        let pool = test_pool().await;
        let table = create(&pool, payload("T1")).await.unwrap();

        for status in [
            TableStatus::Reserved,
            TableStatus::Occupied,
            TableStatus::Maintenance,
            TableStatus::Occupied,
            TableStatus::Available,
        ] {
            let updated = set_status(&pool, table.id, 1, status).await.unwrap();
            assert_eq!(updated.status, status);
        }
    }

    #[tokio::test]
    async fn test_set_status_wrong_owner_leaves_row_unchanged() {
        let pool = test_pool().await;
        let table = create(&pool, payload("T1")).await.unwrap();

        let err = set_status(&pool, table.id, 99, TableStatus::Occupied).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));

        let unchanged = find_by_id(&pool, table.id).await.unwrap().unwrap();
        assert_eq!(unchanged.status, TableStatus::Available);
        assert!(unchanged.last_occupied.is_none());
    }

    #[tokio::test]
    async fn test_cascade_removes_all_children() {
        let pool = test_pool().await;
        let table = create(&pool, payload("T1")).await.unwrap();
        seed_table_children(&pool, table.id).await;

        let summary = delete_cascade(&pool, table.id, 1).await.unwrap();
        assert_eq!(summary.scans, 2);
        assert_eq!(summary.qr_codes, 1);
        assert_eq!(summary.order_items, 1);
        assert_eq!(summary.orders, 1);

        assert_eq!(count(&pool, "scans").await, 0);
        assert_eq!(count(&pool, "qr_codes").await, 0);
        assert_eq!(count(&pool, "order_items").await, 0);
        assert_eq!(count(&pool, "orders").await, 0);
        assert_eq!(count(&pool, "dining_tables").await, 0);
    }

    #[tokio::test]
    async fn test_cascade_spares_other_tables() {
        let pool = test_pool().await;
        let doomed = create(&pool, payload("T1")).await.unwrap();
        let kept = create(&pool, payload("T2")).await.unwrap();
        seed_table_children(&pool, doomed.id).await;
        seed_table_children(&pool, kept.id).await;

        delete_cascade(&pool, doomed.id, 1).await.unwrap();

        assert!(find_by_id(&pool, doomed.id).await.unwrap().is_none());
        assert!(find_by_id(&pool, kept.id).await.unwrap().is_some());
        assert_eq!(count(&pool, "qr_codes").await, 1);
        assert_eq!(count(&pool, "scans").await, 2);
        assert_eq!(count(&pool, "orders").await, 1);
        assert_eq!(count(&pool, "order_items").await, 1);
    }

    #[tokio::test]
    async fn test_cascade_wrong_owner_deletes_nothing() {
        let pool = test_pool().await;
        let table = create(&pool, payload("T1")).await.unwrap();
        seed_table_children(&pool, table.id).await;

        let err = delete_cascade(&pool, table.id, 99).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));

        assert_eq!(count(&pool, "dining_tables").await, 1);
        assert_eq!(count(&pool, "qr_codes").await, 1);
        assert_eq!(count(&pool, "scans").await, 2);
    }

    #[tokio::test]
    async fn test_cascade_bare_table() {
        let pool = test_pool().await;
        let table = create(&pool, payload("T1")).await.unwrap();

        let summary = delete_cascade(&pool, table.id, 1).await.unwrap();
        assert_eq!(summary.scans, 0);
        assert_eq!(summary.qr_codes, 0);
        assert_eq!(summary.orders, 0);
        assert!(find_by_id(&pool, table.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_partial() {
        let pool = test_pool().await;
        let table = create(&pool, payload("T1")).await.unwrap();

        let updated = update(
            &pool,
            table.id,
            1,
            TableUpdate {
                table_number: None,
                zone: Some("Terrace".into()),
                capacity: Some(6),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.table_number, "T1");
        assert_eq!(updated.zone, "Terrace");
        assert_eq!(updated.capacity, 6);
    }
}
