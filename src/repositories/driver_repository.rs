use sqlx::SqliteConnection;

use crate::models::{Driver, NewDriver};
use crate::utils::errors::{map_unique_violation, AppResult};

/// Insertar un conductor y devolver su id autoincremental
pub async fn insert(conn: &mut SqliteConnection, driver: &NewDriver) -> AppResult<i64> {
    let result = sqlx::query(
        "INSERT INTO driver (name, id_number, phone, reporting_to) VALUES (?, ?, ?, ?)",
    )
    .bind(&driver.name)
    .bind(&driver.id_number)
    .bind(&driver.phone)
    .bind(&driver.reporting_to)
    .execute(conn)
    .await
    .map_err(|e| map_unique_violation(e, "id number already exists"))?;

    Ok(result.last_insert_rowid())
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Driver>> {
    let driver = sqlx::query_as::<_, Driver>("SELECT * FROM driver WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(driver)
}

pub async fn exists(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
    let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM driver WHERE id = ?)")
        .bind(id)
        .fetch_one(conn)
        .await?;

    Ok(result.0)
}

pub async fn list(conn: &mut SqliteConnection) -> AppResult<Vec<Driver>> {
    let drivers = sqlx::query_as::<_, Driver>("SELECT * FROM driver ORDER BY id")
        .fetch_all(conn)
        .await?;

    Ok(drivers)
}

pub async fn count(conn: &mut SqliteConnection) -> AppResult<i64> {
    let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM driver")
        .fetch_one(conn)
        .await?;

    Ok(result.0)
}

/// Conteo de conductores agrupado por unidad a la que reportan
pub async fn count_by_reporting_to(
    conn: &mut SqliteConnection,
) -> AppResult<Vec<(Option<String>, i64)>> {
    let rows = sqlx::query_as::<_, (Option<String>, i64)>(
        "SELECT reporting_to, COUNT(*) FROM driver GROUP BY reporting_to ORDER BY reporting_to",
    )
    .fetch_all(conn)
    .await?;

    Ok(rows)
}
