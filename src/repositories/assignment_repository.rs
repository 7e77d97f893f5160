use chrono::NaiveDate;
use sqlx::SqliteConnection;

use crate::models::{
    Assignment, AssignmentDetail, DriverAssignmentReportRow, DriverAssignmentRow, NewAssignment,
    TrackedAssignment, VehicleAssignmentRow,
};
use crate::utils::errors::AppResult;

/// Predicado único de actividad, compartido por todas las consultas que
/// deciden pertenencia "actual". El `?` se liga a la fecha de referencia
/// del llamador. Nunca reimplementar esta comparación inline.
pub const ACTIVE_PREDICATE: &str = "(a.end_date IS NULL OR a.end_date >= ?)";

/// Insertar una asignación y devolver su id
///
/// `last_update` se estampa en el momento del insert, formato heredado.
pub async fn insert(
    conn: &mut SqliteConnection,
    assignment: &NewAssignment,
    last_update: &str,
) -> AppResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO assignment (
            plate_number, driver_id, work_place, start_date,
            end_date, gps_position, geofence_violations, last_update
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&assignment.plate_number)
    .bind(assignment.driver_id)
    .bind(&assignment.work_place)
    .bind(assignment.start_date)
    .bind(assignment.end_date)
    .bind(&assignment.gps_position)
    .bind(assignment.geofence_violations)
    .bind(last_update)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Assignment>> {
    let assignment = sqlx::query_as::<_, Assignment>("SELECT * FROM assignment WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(assignment)
}

/// Todas las asignaciones activas a la fecha de referencia
pub async fn current(conn: &mut SqliteConnection, today: NaiveDate) -> AppResult<Vec<Assignment>> {
    let sql = format!("SELECT a.* FROM assignment a WHERE {ACTIVE_PREDICATE} ORDER BY a.id");

    let assignments = sqlx::query_as::<_, Assignment>(&sql)
        .bind(today)
        .fetch_all(conn)
        .await?;

    Ok(assignments)
}

/// Asignaciones activas de un vehículo
///
/// En el caso bien formado devuelve a lo sumo una fila, pero si los datos
/// se solapan se devuelven todas las coincidencias.
pub async fn current_for_vehicle(
    conn: &mut SqliteConnection,
    plate_number: &str,
    today: NaiveDate,
) -> AppResult<Vec<Assignment>> {
    let sql = format!(
        "SELECT a.* FROM assignment a WHERE a.plate_number = ? AND {ACTIVE_PREDICATE} ORDER BY a.id"
    );

    let assignments = sqlx::query_as::<_, Assignment>(&sql)
        .bind(plate_number)
        .bind(today)
        .fetch_all(conn)
        .await?;

    Ok(assignments)
}

/// Asignaciones activas de un conductor (mismas tolerancias que por vehículo)
pub async fn current_for_driver(
    conn: &mut SqliteConnection,
    driver_id: i64,
    today: NaiveDate,
) -> AppResult<Vec<Assignment>> {
    let sql = format!(
        "SELECT a.* FROM assignment a WHERE a.driver_id = ? AND {ACTIVE_PREDICATE} ORDER BY a.id"
    );

    let assignments = sqlx::query_as::<_, Assignment>(&sql)
        .bind(driver_id)
        .bind(today)
        .fetch_all(conn)
        .await?;

    Ok(assignments)
}

/// Asignaciones activas de un conductor con el vehículo resuelto
pub async fn current_for_driver_detailed(
    conn: &mut SqliteConnection,
    driver_id: i64,
    today: NaiveDate,
) -> AppResult<Vec<DriverAssignmentRow>> {
    let sql = format!(
        r#"
        SELECT a.start_date, a.end_date, v.plate_number,
               v.vehicle_type, v.make, v.model, a.work_place
        FROM assignment a
        JOIN vehicle v ON a.plate_number = v.plate_number
        WHERE a.driver_id = ? AND {ACTIVE_PREDICATE}
        ORDER BY a.id
        "#,
    );

    let rows = sqlx::query_as::<_, DriverAssignmentRow>(&sql)
        .bind(driver_id)
        .bind(today)
        .fetch_all(conn)
        .await?;

    Ok(rows)
}

pub async fn count_active(conn: &mut SqliteConnection, today: NaiveDate) -> AppResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM assignment a WHERE {ACTIVE_PREDICATE}");

    let result: (i64,) = sqlx::query_as(&sql).bind(today).fetch_one(conn).await?;

    Ok(result.0)
}

/// Conteo de asignaciones activas agrupado por lugar de trabajo
pub async fn count_active_by_work_place(
    conn: &mut SqliteConnection,
    today: NaiveDate,
) -> AppResult<Vec<(Option<String>, i64)>> {
    let sql = format!(
        r#"
        SELECT a.work_place, COUNT(*)
        FROM assignment a
        WHERE {ACTIVE_PREDICATE}
        GROUP BY a.work_place
        ORDER BY a.work_place
        "#,
    );

    let rows = sqlx::query_as::<_, (Option<String>, i64)>(&sql)
        .bind(today)
        .fetch_all(conn)
        .await?;

    Ok(rows)
}

/// Asignaciones activas con vehículo y conductor resueltos
pub async fn active_detailed(
    conn: &mut SqliteConnection,
    today: NaiveDate,
) -> AppResult<Vec<AssignmentDetail>> {
    let sql = format!(
        r#"
        SELECT a.id, v.plate_number, v.vehicle_type, d.name AS driver_name,
               a.work_place, a.start_date, a.end_date, a.geofence_violations,
               a.gps_position, a.last_update
        FROM assignment a
        JOIN vehicle v ON a.plate_number = v.plate_number
        JOIN driver d ON a.driver_id = d.id
        WHERE {ACTIVE_PREDICATE}
        ORDER BY a.id
        "#,
    );

    let rows = sqlx::query_as::<_, AssignmentDetail>(&sql)
        .bind(today)
        .fetch_all(conn)
        .await?;

    Ok(rows)
}

/// Vista de seguimiento GPS: asignaciones activas que tienen posición
///
/// El filtro es `(activa) AND gps_position IS NOT NULL`; una asignación
/// cerrada con posición registrada no aparece aquí.
pub async fn tracked(
    conn: &mut SqliteConnection,
    today: NaiveDate,
) -> AppResult<Vec<TrackedAssignment>> {
    let sql = format!(
        r#"
        SELECT a.id, v.plate_number, v.vehicle_type, d.name AS driver_name,
               a.work_place, a.gps_position, a.last_update
        FROM assignment a
        JOIN vehicle v ON a.plate_number = v.plate_number
        JOIN driver d ON a.driver_id = d.id
        WHERE {ACTIVE_PREDICATE} AND a.gps_position IS NOT NULL
        ORDER BY a.id
        "#,
    );

    let rows = sqlx::query_as::<_, TrackedAssignment>(&sql)
        .bind(today)
        .fetch_all(conn)
        .await?;

    Ok(rows)
}

/// Reporte "asignaciones por conductor": asignaciones activas con el
/// contacto del conductor y el vehículo resueltos
pub async fn driver_assignments_report(
    conn: &mut SqliteConnection,
    today: NaiveDate,
) -> AppResult<Vec<DriverAssignmentReportRow>> {
    let sql = format!(
        r#"
        SELECT d.name, d.id_number, d.phone, d.reporting_to,
               v.plate_number, v.vehicle_type, a.work_place,
               a.start_date, a.end_date
        FROM driver d
        JOIN assignment a ON d.id = a.driver_id
        JOIN vehicle v ON a.plate_number = v.plate_number
        WHERE {ACTIVE_PREDICATE}
        ORDER BY d.name, a.id
        "#,
    );

    let rows = sqlx::query_as::<_, DriverAssignmentReportRow>(&sql)
        .bind(today)
        .fetch_all(conn)
        .await?;

    Ok(rows)
}

/// Historial completo de un vehículo, más reciente primero
pub async fn history_for_vehicle(
    conn: &mut SqliteConnection,
    plate_number: &str,
) -> AppResult<Vec<VehicleAssignmentRow>> {
    let rows = sqlx::query_as::<_, VehicleAssignmentRow>(
        r#"
        SELECT a.start_date, a.end_date, d.name AS driver_name,
               d.id_number, d.phone, a.work_place
        FROM assignment a
        JOIN driver d ON a.driver_id = d.id
        WHERE a.plate_number = ?
        ORDER BY a.start_date DESC
        "#,
    )
    .bind(plate_number)
    .fetch_all(conn)
    .await?;

    Ok(rows)
}

/// Historial completo de un conductor, más reciente primero
pub async fn history_for_driver(
    conn: &mut SqliteConnection,
    driver_id: i64,
) -> AppResult<Vec<DriverAssignmentRow>> {
    let rows = sqlx::query_as::<_, DriverAssignmentRow>(
        r#"
        SELECT a.start_date, a.end_date, v.plate_number,
               v.vehicle_type, v.make, v.model, a.work_place
        FROM assignment a
        JOIN vehicle v ON a.plate_number = v.plate_number
        WHERE a.driver_id = ?
        ORDER BY a.start_date DESC
        "#,
    )
    .bind(driver_id)
    .fetch_all(conn)
    .await?;

    Ok(rows)
}
