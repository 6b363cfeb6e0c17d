//! Order Repository
//!
//! Orders come in from the public scan flow. Line prices are frozen from
//! the menu at creation time, so later menu edits never reprice history.

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderCreate, OrderItem, OrderStatus, OrderWithItems};
use sqlx::SqlitePool;

const ORDER_SELECT: &str =
    "SELECT id, restaurant_id, table_id, status, total, created_at, updated_at FROM orders";

const ORDER_OWNED_SELECT: &str = "SELECT o.id, o.restaurant_id, o.table_id, o.status, o.total, o.created_at, o.updated_at FROM orders o JOIN restaurants r ON o.restaurant_id = r.id";

const ITEM_SELECT: &str =
    "SELECT id, order_id, menu_item_id, quantity, unit_price, notes FROM order_items";

/// Create an order with its line items in one transaction.
///
/// Every line is priced from the restaurant's own menu; an unknown or
/// unavailable item aborts the whole order.
pub async fn create_with_items(
    pool: &SqlitePool,
    restaurant_id: i64,
    table_id: i64,
    data: OrderCreate,
) -> RepoResult<OrderWithItems> {
    let mut tx = pool.begin().await?;
    let order_id = shared::util::snowflake_id();
    let now = shared::util::now_millis();

    // Price pass first: resolve every line before any row is written
    let mut total = 0.0_f64;
    let mut priced: Vec<(i64, f64)> = Vec::with_capacity(data.items.len());
    for line in &data.items {
        let price: Option<(f64,)> = sqlx::query_as(
            "SELECT mi.base_price FROM menu_items mi JOIN menus m ON mi.menu_id = m.id WHERE mi.id = ? AND m.restaurant_id = ? AND mi.is_available = 1",
        )
        .bind(line.menu_item_id)
        .bind(restaurant_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((unit_price,)) = price else {
            return Err(RepoError::NotFound(format!(
                "Menu item {} not found",
                line.menu_item_id
            )));
        };
        total += unit_price * f64::from(line.quantity);
        priced.push((line.menu_item_id, unit_price));
    }

    sqlx::query(
        "INSERT INTO orders (id, restaurant_id, table_id, status, total, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(order_id)
    .bind(restaurant_id)
    .bind(table_id)
    .bind(OrderStatus::Pending)
    .bind(total)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for (line, (menu_item_id, unit_price)) in data.items.iter().zip(&priced) {
        sqlx::query(
            "INSERT INTO order_items (id, order_id, menu_item_id, quantity, unit_price, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(shared::util::snowflake_id())
        .bind(order_id)
        .bind(menu_item_id)
        .bind(line.quantity)
        .bind(unit_price)
        .bind(&line.notes)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    let order = find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))?;
    let items = items_for(pool, order_id).await?;
    Ok(OrderWithItems { order, items })
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn items_for(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let sql = format!("{ITEM_SELECT} WHERE order_id = ? ORDER BY id");
    let rows = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(order_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_owned_with_items(
    pool: &SqlitePool,
    id: i64,
    owner_id: i64,
) -> RepoResult<Option<OrderWithItems>> {
    let sql = format!("{ORDER_OWNED_SELECT} WHERE o.id = ? AND r.owner_id = ?");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;
    match order {
        Some(order) => {
            let items = items_for(pool, order.id).await?;
            Ok(Some(OrderWithItems { order, items }))
        }
        None => Ok(None),
    }
}

/// List a restaurant's orders, newest first, optionally narrowed to one
/// table and/or one status.
pub async fn list_by_restaurant(
    pool: &SqlitePool,
    restaurant_id: i64,
    table_id: Option<i64>,
    status: Option<OrderStatus>,
) -> RepoResult<Vec<Order>> {
    let mut sql = format!("{ORDER_SELECT} WHERE restaurant_id = ?");
    if table_id.is_some() {
        sql.push_str(" AND table_id = ?");
    }
    if status.is_some() {
        sql.push_str(" AND status = ?");
    }
    sql.push_str(" ORDER BY created_at DESC");

    let mut query = sqlx::query_as::<_, Order>(&sql).bind(restaurant_id);
    if let Some(table_id) = table_id {
        query = query.bind(table_id);
    }
    if let Some(status) = status {
        query = query.bind(status);
    }
    let rows = query.fetch_all(pool).await?;
    Ok(rows)
}

/// Pending orders for one table with their line items, oldest first.
/// Feeds the scan landing page so returning diners see what is already in.
pub async fn pending_by_table(
    pool: &SqlitePool,
    table_id: i64,
) -> RepoResult<Vec<OrderWithItems>> {
    let sql = format!("{ORDER_SELECT} WHERE table_id = ? AND status = ? ORDER BY created_at");
    let orders = sqlx::query_as::<_, Order>(&sql)
        .bind(table_id)
        .bind(OrderStatus::Pending)
        .fetch_all(pool)
        .await?;

    let mut out = Vec::with_capacity(orders.len());
    for order in orders {
        let items = items_for(pool, order.id).await?;
        out.push(OrderWithItems { order, items });
    }
    Ok(out)
}

pub async fn set_status(
    pool: &SqlitePool,
    id: i64,
    owner_id: i64,
    status: OrderStatus,
) -> RepoResult<Order> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3 AND restaurant_id IN (SELECT id FROM restaurants WHERE owner_id = ?4)",
    )
    .bind(status)
    .bind(now)
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::OrderItemCreate;
    use sqlx::sqlite::SqlitePoolOptions;

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
                name TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE menus (
                id INTEGER PRIMARY KEY,
                restaurant_id INTEGER NOT NULL REFERENCES restaurants(id),
                name TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE menu_items (
                id INTEGER PRIMARY KEY,
                menu_id INTEGER NOT NULL REFERENCES menus(id),
                name TEXT NOT NULL,
                base_price REAL NOT NULL,
                is_available INTEGER NOT NULL DEFAULT 1
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE orders (
                id INTEGER PRIMARY KEY,
                restaurant_id INTEGER NOT NULL REFERENCES restaurants(id),
                table_id INTEGER NOT NULL,
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
                menu_item_id INTEGER NOT NULL REFERENCES menu_items(id),
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
        sqlx::query("INSERT INTO menus (id, restaurant_id, name) VALUES (20, 10, 'Main Menu')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO menu_items (id, menu_id, name, base_price, is_available) VALUES
                (31, 20, 'Dumplings', 8.5, 1),
                (32, 20, 'Fried Rice', 12.0, 1),
                (33, 20, 'Off Menu', 6.0, 0)",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    fn line(menu_item_id: i64, quantity: i32) -> OrderItemCreate {
        OrderItemCreate {
            menu_item_id,
            quantity,
            notes: None,
        }
    }

    async fn order_count(pool: &SqlitePool) -> i64 {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
            .fetch_one(pool)
            .await
            .unwrap();
        row.0
    }

    #[tokio::test]
    async fn test_create_totals_from_menu_prices() {
        let pool = test_pool().await;
        let placed = create_with_items(
            &pool,
            10,
            5,
            OrderCreate {
                items: vec![line(31, 2), line(32, 1)],
            },
        )
        .await
        .unwrap();

        assert_eq!(placed.order.status, OrderStatus::Pending);
        assert!((placed.order.total - 29.0).abs() < f64::EPSILON);
        assert_eq!(placed.items.len(), 2);
        assert!((placed.items[0].unit_price - 8.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_unknown_item_aborts_whole_order() {
        let pool = test_pool().await;
        let err = create_with_items(
            &pool,
            10,
            5,
            OrderCreate {
                items: vec![line(31, 1), line(999, 1)],
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
        assert_eq!(order_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_unavailable_item_rejected() {
        let pool = test_pool().await;
        let err = create_with_items(
            &pool,
            10,
            5,
            OrderCreate {
                items: vec![line(33, 1)],
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_foreign_menu_item_rejected() {
        let pool = test_pool().await;
        sqlx::query("INSERT INTO restaurants (id, owner_id, name) VALUES (11, 2, 'Rival')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO menus (id, restaurant_id, name) VALUES (21, 11, 'Theirs')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO menu_items (id, menu_id, name, base_price, is_available) VALUES (41, 21, 'Not Yours', 1.0, 1)",
        )
        .execute(&pool)
        .await
        .unwrap();

        let err = create_with_items(
            &pool,
            10,
            5,
            OrderCreate {
                items: vec![line(41, 1)],
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_price_frozen_against_menu_edits() {
        let pool = test_pool().await;
        let placed = create_with_items(
            &pool,
            10,
            5,
            OrderCreate {
                items: vec![line(31, 1)],
            },
        )
        .await
        .unwrap();

        sqlx::query("UPDATE menu_items SET base_price = 99.0 WHERE id = 31")
            .execute(&pool)
            .await
            .unwrap();

        let reread = find_owned_with_items(&pool, placed.order.id, 1)
            .await
            .unwrap()
            .unwrap();
        assert!((reread.order.total - 8.5).abs() < f64::EPSILON);
        assert!((reread.items[0].unit_price - 8.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_status_update_owner_scoped() {
        let pool = test_pool().await;
        let placed = create_with_items(
            &pool,
            10,
            5,
            OrderCreate {
                items: vec![line(31, 1)],
            },
        )
        .await
        .unwrap();

        let err = set_status(&pool, placed.order.id, 99, OrderStatus::Preparing)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));

        let updated = set_status(&pool, placed.order.id, 1, OrderStatus::Preparing)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Preparing);
    }

    #[tokio::test]
    async fn test_owner_scope_on_read() {
        let pool = test_pool().await;
        let placed = create_with_items(
            &pool,
            10,
            5,
            OrderCreate {
                items: vec![line(31, 1)],
            },
        )
        .await
        .unwrap();

        assert!(find_owned_with_items(&pool, placed.order.id, 99)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_table_and_status() {
        let pool = test_pool().await;
        let first = create_with_items(
            &pool,
            10,
            5,
            OrderCreate {
                items: vec![line(31, 1)],
            },
        )
        .await
        .unwrap();
        create_with_items(
            &pool,
            10,
            6,
            OrderCreate {
                items: vec![line(32, 1)],
            },
        )
        .await
        .unwrap();
        set_status(&pool, first.order.id, 1, OrderStatus::Preparing)
            .await
            .unwrap();

        let all = list_by_restaurant(&pool, 10, None, None).await.unwrap();
        assert_eq!(all.len(), 2);

        let table_five = list_by_restaurant(&pool, 10, Some(5), None).await.unwrap();
        assert_eq!(table_five.len(), 1);
        assert_eq!(table_five[0].id, first.order.id);

        let pending = list_by_restaurant(&pool, 10, None, Some(OrderStatus::Pending))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].table_id, 6);

        let none = list_by_restaurant(&pool, 10, Some(5), Some(OrderStatus::Pending))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_pending_by_table_carries_items() {
        let pool = test_pool().await;
        create_with_items(
            &pool,
            10,
            5,
            OrderCreate {
                items: vec![line(31, 2)],
            },
        )
        .await
        .unwrap();
        let paid = create_with_items(
            &pool,
            10,
            5,
            OrderCreate {
                items: vec![line(32, 1)],
            },
        )
        .await
        .unwrap();
        set_status(&pool, paid.order.id, 1, OrderStatus::Paid)
            .await
            .unwrap();
        create_with_items(
            &pool,
            10,
            7,
            OrderCreate {
                items: vec![line(32, 1)],
            },
        )
        .await
        .unwrap();

        let pending = pending_by_table(&pool, 5).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].order.status, OrderStatus::Pending);
        assert_eq!(pending[0].items.len(), 1);
        assert_eq!(pending[0].items[0].quantity, 2);
    }
}
