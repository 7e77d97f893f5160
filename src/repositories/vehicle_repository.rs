use sqlx::SqliteConnection;

use crate::models::{NewVehicle, Vehicle};
use crate::repositories::assignment_repository::ACTIVE_PREDICATE;
use crate::utils::errors::{map_unique_violation, AppResult};

pub async fn insert(conn: &mut SqliteConnection, vehicle: &NewVehicle) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO vehicle (
            plate_number, chasis, vehicle_type, make, model, year,
            fuel_type, fuel_capacity, fuel_consumption,
            loading_capacity, assigned_for
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&vehicle.plate_number)
    .bind(&vehicle.chasis)
    .bind(&vehicle.vehicle_type)
    .bind(&vehicle.make)
    .bind(&vehicle.model)
    .bind(&vehicle.year)
    .bind(&vehicle.fuel_type)
    .bind(vehicle.fuel_capacity)
    .bind(vehicle.fuel_consumption)
    .bind(&vehicle.loading_capacity)
    .bind(&vehicle.assigned_for)
    .execute(conn)
    .await
    .map_err(|e| map_unique_violation(e, "plate number or chasis already exists"))?;

    Ok(())
}

pub async fn find_by_plate(
    conn: &mut SqliteConnection,
    plate_number: &str,
) -> AppResult<Option<Vehicle>> {
    let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicle WHERE plate_number = ?")
        .bind(plate_number)
        .fetch_optional(conn)
        .await?;

    Ok(vehicle)
}

pub async fn exists(conn: &mut SqliteConnection, plate_number: &str) -> AppResult<bool> {
    let result: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicle WHERE plate_number = ?)")
            .bind(plate_number)
            .fetch_one(conn)
            .await?;

    Ok(result.0)
}

pub async fn list(conn: &mut SqliteConnection) -> AppResult<Vec<Vehicle>> {
    let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicle ORDER BY plate_number")
        .fetch_all(conn)
        .await?;

    Ok(vehicles)
}

pub async fn count(conn: &mut SqliteConnection) -> AppResult<i64> {
    let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicle")
        .fetch_one(conn)
        .await?;

    Ok(result.0)
}

/// Conteo de vehículos agrupado por unidad organizativa
pub async fn count_by_assigned_for(
    conn: &mut SqliteConnection,
) -> AppResult<Vec<(Option<String>, i64)>> {
    let rows = sqlx::query_as::<_, (Option<String>, i64)>(
        "SELECT assigned_for, COUNT(*) FROM vehicle GROUP BY assigned_for ORDER BY assigned_for",
    )
    .fetch_all(conn)
    .await?;

    Ok(rows)
}

/// Diferencia de conjuntos: vehículos cuya placa no aparece en ninguna
/// asignación activa a la fecha de referencia.
pub async fn unassigned(
    conn: &mut SqliteConnection,
    today: chrono::NaiveDate,
) -> AppResult<Vec<Vehicle>> {
    let sql = format!(
        r#"
        SELECT v.*
        FROM vehicle v
        WHERE v.plate_number NOT IN (
            SELECT a.plate_number
            FROM assignment a
            WHERE {ACTIVE_PREDICATE}
        )
        ORDER BY v.plate_number
        "#,
    );

    let vehicles = sqlx::query_as::<_, Vehicle>(&sql)
        .bind(today)
        .fetch_all(conn)
        .await?;

    Ok(vehicles)
}

/// Vehículos sin registro de cumplimiento: "nunca evaluados"
pub async fn without_compliance(conn: &mut SqliteConnection) -> AppResult<Vec<Vehicle>> {
    let vehicles = sqlx::query_as::<_, Vehicle>(
        r#"
        SELECT v.*
        FROM vehicle v
        LEFT JOIN compliance c ON c.plate_number = v.plate_number
        WHERE c.plate_number IS NULL
        ORDER BY v.plate_number
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(vehicles)
}
