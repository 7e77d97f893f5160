use chrono::Local;
use sqlx::SqliteConnection;

use crate::models::ChangeLogEntry;
use crate::utils::errors::AppResult;

/// Formato heredado del timestamp de auditoría
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp de auditoría en hora local, formato heredado
///
/// Los almacenes existentes traen `change_time` en hora local; sellar
/// aquí en UTC mezclaría zonas y rompería el orden aparente del registro.
pub fn audit_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Añadir una entrada de auditoría
///
/// Se ejecuta sobre la misma transacción que la escritura de dominio: si
/// este insert falla, el comando completo se revierte. Jamás falla en
/// silencio.
pub async fn append(
    conn: &mut SqliteConnection,
    username: &str,
    change_type: &str,
    table_name: &str,
    record_id: &str,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO change_log (username, change_type, table_name, record_id, change_time)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(username)
    .bind(change_type)
    .bind(table_name)
    .bind(record_id)
    .bind(audit_timestamp())
    .execute(conn)
    .await?;

    Ok(())
}

/// Registro completo, más reciente primero
pub async fn list(conn: &mut SqliteConnection) -> AppResult<Vec<ChangeLogEntry>> {
    let entries = sqlx::query_as::<_, ChangeLogEntry>(
        "SELECT * FROM change_log ORDER BY change_time DESC, id DESC",
    )
    .fetch_all(conn)
    .await?;

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_audit_timestamp_is_local_time_in_legacy_format() {
        let before = Local::now().naive_local();
        let stamp = audit_timestamp();
        let after = Local::now().naive_local();

        let parsed = NaiveDateTime::parse_from_str(&stamp, TIMESTAMP_FORMAT)
            .expect("legacy timestamp format");

        // El sello vive entre los dos relojes locales tomados alrededor;
        // un sello UTC quedaría fuera en cualquier zona con offset.
        assert!(parsed >= before - chrono::Duration::seconds(1));
        assert!(parsed <= after + chrono::Duration::seconds(1));
    }
}
