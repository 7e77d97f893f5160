//! Modelo de ChangeLogEntry
//! 
//! Registro de auditoría: una entrada inmutable por comando mutante,
//! atribuida a la identidad actuante. Los ids crecen estrictamente con el
//! orden de inserción y las filas jamás se modifican ni se borran.

use serde::Serialize;
use sqlx::FromRow;

/// ChangeLogEntry - mapea exactamente a la tabla `change_log`
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ChangeLogEntry {
    pub id: i64,
    pub username: String,
    /// Etiqueta abierta: "INSERT", "UPDATE", ... sin enumeración cerrada
    pub change_type: String,
    pub table_name: String,
    pub record_id: String,
    /// Formato heredado `YYYY-MM-DD HH:MM:SS`
    pub change_time: String,
}
