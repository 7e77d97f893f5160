use sqlx::SqliteConnection;

use crate::models::{ComplianceForm, ComplianceRecord};
use crate::utils::errors::AppResult;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub async fn find_by_plate(
    conn: &mut SqliteConnection,
    plate_number: &str,
) -> AppResult<Option<ComplianceRecord>> {
    let record =
        sqlx::query_as::<_, ComplianceRecord>("SELECT * FROM compliance WHERE plate_number = ?")
            .bind(plate_number)
            .fetch_optional(conn)
            .await?;

    Ok(record)
}

pub async fn list(conn: &mut SqliteConnection) -> AppResult<Vec<ComplianceRecord>> {
    let records =
        sqlx::query_as::<_, ComplianceRecord>("SELECT * FROM compliance ORDER BY plate_number")
            .fetch_all(conn)
            .await?;

    Ok(records)
}

pub async fn insert(
    conn: &mut SqliteConnection,
    plate_number: &str,
    form: &ComplianceForm,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO compliance (
            plate_number, insurance_type, insurance_date, yearly_inspection,
            inspection_date, safety_audit, utilization_history, accident_history
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(plate_number)
    .bind(&form.insurance_type)
    .bind(form.insurance_date.format(DATE_FORMAT).to_string())
    .bind(&form.yearly_inspection)
    .bind(form.inspection_date.format(DATE_FORMAT).to_string())
    .bind(&form.safety_audit)
    .bind(&form.utilization_history)
    .bind(&form.accident_history)
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn update(
    conn: &mut SqliteConnection,
    plate_number: &str,
    form: &ComplianceForm,
) -> AppResult<()> {
    sqlx::query(
        r#"
        UPDATE compliance SET
            insurance_type = ?,
            insurance_date = ?,
            yearly_inspection = ?,
            inspection_date = ?,
            safety_audit = ?,
            utilization_history = ?,
            accident_history = ?
        WHERE plate_number = ?
        "#,
    )
    .bind(&form.insurance_type)
    .bind(form.insurance_date.format(DATE_FORMAT).to_string())
    .bind(&form.yearly_inspection)
    .bind(form.inspection_date.format(DATE_FORMAT).to_string())
    .bind(&form.safety_audit)
    .bind(&form.utilization_history)
    .bind(&form.accident_history)
    .bind(plate_number)
    .execute(conn)
    .await?;

    Ok(())
}
