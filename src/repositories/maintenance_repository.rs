use chrono::NaiveDate;
use sqlx::SqliteConnection;

use crate::models::{MaintenanceDue, MaintenanceRecord, NewMaintenance};
use crate::utils::errors::AppResult;

/// Insertar un registro de mantenimiento y devolver su id
pub async fn insert(
    conn: &mut SqliteConnection,
    plate_number: &str,
    record: &NewMaintenance,
) -> AppResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO maintenance (
            plate_number, last_service_km, last_service_date,
            next_service_km, next_service_date, maintenance_center
        ) VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(plate_number)
    .bind(record.last_service_km)
    .bind(record.last_service_date)
    .bind(record.next_service_km)
    .bind(record.next_service_date)
    .bind(&record.maintenance_center)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Historial de un vehículo, servicio más reciente primero
pub async fn history_for_vehicle(
    conn: &mut SqliteConnection,
    plate_number: &str,
) -> AppResult<Vec<MaintenanceRecord>> {
    let records = sqlx::query_as::<_, MaintenanceRecord>(
        "SELECT * FROM maintenance WHERE plate_number = ? ORDER BY last_service_date DESC",
    )
    .bind(plate_number)
    .fetch_all(conn)
    .await?;

    Ok(records)
}

/// Filas con próximo servicio dentro de `[from, to]`, ascendente por fecha
///
/// `limit = None` devuelve todas (reporte completo); el dashboard pasa un
/// tope fijo.
pub async fn due_between(
    conn: &mut SqliteConnection,
    from: NaiveDate,
    to: NaiveDate,
    limit: Option<i64>,
) -> AppResult<Vec<MaintenanceDue>> {
    let rows = sqlx::query_as::<_, MaintenanceDue>(
        r#"
        SELECT v.plate_number, v.make, v.model, m.next_service_date, m.maintenance_center
        FROM maintenance m
        JOIN vehicle v ON m.plate_number = v.plate_number
        WHERE m.next_service_date >= ? AND m.next_service_date <= ?
        ORDER BY m.next_service_date
        LIMIT ?
        "#,
    )
    .bind(from)
    .bind(to)
    .bind(limit.unwrap_or(-1))
    .fetch_all(conn)
    .await?;

    Ok(rows)
}

/// Filas cuyo próximo servicio ya venció, más antigua primero
pub async fn overdue(conn: &mut SqliteConnection, today: NaiveDate) -> AppResult<Vec<MaintenanceDue>> {
    let rows = sqlx::query_as::<_, MaintenanceDue>(
        r#"
        SELECT v.plate_number, v.make, v.model, m.next_service_date, m.maintenance_center
        FROM maintenance m
        JOIN vehicle v ON m.plate_number = v.plate_number
        WHERE m.next_service_date < ?
        ORDER BY m.next_service_date
        "#,
    )
    .bind(today)
    .fetch_all(conn)
    .await?;

    Ok(rows)
}
