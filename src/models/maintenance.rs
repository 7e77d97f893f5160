//! Modelo de MaintenanceRecord
//! 
//! Historial de servicio por vehículo: filas solo-inserción, nunca
//! actualizadas, ordenadas por fecha de servicio.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// MaintenanceRecord - mapea exactamente a la tabla `maintenance`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceRecord {
    pub id: i64,
    pub plate_number: String,
    pub last_service_km: Option<i64>,
    pub last_service_date: Option<NaiveDate>,
    pub next_service_km: Option<i64>,
    pub next_service_date: Option<NaiveDate>,
    pub maintenance_center: Option<String>,
}

/// Request para añadir un registro de mantenimiento
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewMaintenance {
    #[validate(range(min = 0))]
    pub last_service_km: i64,

    pub last_service_date: NaiveDate,

    #[validate(range(min = 0))]
    pub next_service_km: i64,

    pub next_service_date: NaiveDate,

    pub maintenance_center: Option<String>,
}

/// Fila de "mantenimiento próximo" con el vehículo resuelto
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MaintenanceDue {
    pub plate_number: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub next_service_date: NaiveDate,
    pub maintenance_center: Option<String>,
}
