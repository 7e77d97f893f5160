use sqlx::SqliteConnection;

use crate::models::{User, UserInfo};
use crate::utils::errors::{map_unique_violation, AppResult};

pub async fn insert(
    conn: &mut SqliteConnection,
    username: &str,
    password_hash: &str,
    role: &str,
) -> AppResult<()> {
    sqlx::query("INSERT INTO users (username, password, role) VALUES (?, ?, ?)")
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .execute(conn)
        .await
        .map_err(|e| map_unique_violation(e, "username already exists"))?;

    Ok(())
}

pub async fn find_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(conn)
        .await?;

    Ok(user)
}

/// Listado sin hashes
pub async fn list(conn: &mut SqliteConnection) -> AppResult<Vec<UserInfo>> {
    let users =
        sqlx::query_as::<_, UserInfo>("SELECT username, role FROM users ORDER BY username")
            .fetch_all(conn)
            .await?;

    Ok(users)
}
