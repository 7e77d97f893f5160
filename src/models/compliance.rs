//! Modelo de ComplianceRecord
//! 
//! A lo sumo un registro por vehículo (upsert por `plate_number`); la
//! ausencia de registro significa "nunca evaluado", no "en regla".
//! Las fechas se guardan como TEXT heredado y se interpretan de forma
//! defensiva en el evaluador.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// ComplianceRecord - mapea exactamente a la tabla `compliance`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ComplianceRecord {
    pub plate_number: String,
    pub insurance_type: Option<String>,
    pub insurance_date: Option<String>,
    pub yearly_inspection: Option<String>,
    pub inspection_date: Option<String>,
    pub safety_audit: Option<String>,
    pub utilization_history: Option<String>,
    pub accident_history: Option<String>,
}

/// Datos del formulario de cumplimiento (insert o update según exista)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ComplianceForm {
    #[validate(length(min = 1, max = 30))]
    pub insurance_type: String,

    pub insurance_date: NaiveDate,

    /// "Yes" / "No"
    #[validate(length(min = 1, max = 3))]
    pub yearly_inspection: String,

    pub inspection_date: NaiveDate,

    pub safety_audit: Option<String>,
    pub utilization_history: Option<String>,
    pub accident_history: Option<String>,
}
