//! Modelo de Assignment
//! 
//! Historial de asignaciones vehículo-conductor. La pertenencia "actual"
//! se calcula con el predicado de actividad, nunca se guarda como flag.
//! Ninguna regla impide solapamientos; las consultas toleran y devuelven
//! todas las filas coincidentes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Assignment principal - mapea exactamente a la tabla `assignment`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assignment {
    pub id: i64,
    pub plate_number: String,
    pub driver_id: i64,
    pub work_place: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub gps_position: Option<String>,
    pub geofence_violations: i64,
    pub last_update: Option<String>,
}

impl Assignment {
    /// Predicado único de actividad: sin fecha de fin, o fin no anterior a
    /// la fecha de referencia (la igualdad cuenta como activa).
    pub fn is_active(&self, today: NaiveDate) -> bool {
        match self.end_date {
            None => true,
            Some(end) => end >= today,
        }
    }
}

/// Request para crear una asignación
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewAssignment {
    #[validate(length(min = 1, max = 20))]
    pub plate_number: String,

    pub driver_id: i64,

    pub work_place: Option<String>,

    pub start_date: NaiveDate,

    /// `None` = asignación abierta
    pub end_date: Option<NaiveDate>,

    /// "lat,lon" en texto libre; se valida formato y rango si está presente
    pub gps_position: Option<String>,

    #[validate(range(min = 0))]
    pub geofence_violations: i64,
}

/// Asignación activa con vehículo y conductor resueltos
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AssignmentDetail {
    pub id: i64,
    pub plate_number: String,
    pub vehicle_type: Option<String>,
    pub driver_name: String,
    pub work_place: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub geofence_violations: i64,
    pub gps_position: Option<String>,
    pub last_update: Option<String>,
}

/// Fila de la vista de seguimiento GPS (solo asignaciones con posición)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TrackedAssignment {
    pub id: i64,
    pub plate_number: String,
    pub vehicle_type: Option<String>,
    pub driver_name: String,
    pub work_place: Option<String>,
    pub gps_position: String,
    pub last_update: Option<String>,
}

/// Historial de asignación visto desde un vehículo (conductor resuelto)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VehicleAssignmentRow {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub driver_name: String,
    pub id_number: Option<String>,
    pub phone: Option<String>,
    pub work_place: Option<String>,
}

/// Fila del reporte "asignaciones por conductor": conductor con contacto
/// más su asignación activa
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DriverAssignmentReportRow {
    pub name: String,
    pub id_number: Option<String>,
    pub phone: Option<String>,
    pub reporting_to: Option<String>,
    pub plate_number: String,
    pub vehicle_type: Option<String>,
    pub work_place: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Historial de asignación visto desde un conductor (vehículo resuelto)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DriverAssignmentRow {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub plate_number: String,
    pub vehicle_type: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub work_place: Option<String>,
}
