//! Owner Repository

use super::{RepoError, RepoResult};
use shared::models::Owner;
use sqlx::SqlitePool;

const OWNER_SELECT: &str = "SELECT id, email, name, created_at FROM owners";

/// Owner row including the password hash, for credential checks only
#[derive(Debug, sqlx::FromRow)]
pub struct OwnerAuthRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: i64,
}

impl From<OwnerAuthRow> for Owner {
    fn from(row: OwnerAuthRow) -> Self {
        Owner {
            id: row.id,
            email: row.email,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

pub async fn create(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
    name: &str,
) -> RepoResult<Owner> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query("INSERT INTO owners (id, email, password_hash, name, created_at) VALUES (?1, ?2, ?3, ?4, ?5)")
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(now)
        .execute(pool)
        .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create owner".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Owner>> {
    let sql = format!("{OWNER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Owner>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Fetch the full credential row for login verification
pub async fn find_auth_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<OwnerAuthRow>> {
    let row = sqlx::query_as::<_, OwnerAuthRow>(
        "SELECT id, email, password_hash, name, created_at FROM owners WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
