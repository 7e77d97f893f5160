//! Evaluador de cumplimiento normativo
//!
//! Clasifica el registro de cumplimiento de un vehículo en una categoría
//! de problema o "en regla", con precedencia fija de reglas (la primera
//! que aplica gana). Un vehículo sin registro no está "en regla": se
//! reporta aparte como "nunca evaluado".

use std::collections::HashMap;

use chrono::{Months, NaiveDate};
use serde::Serialize;
use sqlx::Connection;
use tracing::info;
use validator::Validate;

use crate::database::Store;
use crate::models::{ComplianceForm, ComplianceRecord, Identity, Vehicle};
use crate::repositories::{
    change_log_repository, compliance_repository, vehicle_repository,
};
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::validate_date;

/// Tope de filas con problemas en el dashboard
pub const DASHBOARD_ISSUE_LIMIT: usize = 5;

/// Categoría de problema de cumplimiento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueKind {
    InspectionMissing,
    InspectionExpired,
    InsuranceExpired,
    Compliant,
    /// Registro indeterminado: alguna fecha requerida falta o no se puede
    /// interpretar. Fallback defensivo, nunca se confunde con `Compliant`.
    Unknown,
}

impl IssueKind {
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::InspectionMissing => "Inspection Missing",
            IssueKind::InspectionExpired => "Inspection Expired",
            IssueKind::InsuranceExpired => "Insurance Expired",
            IssueKind::Compliant => "Compliant",
            IssueKind::Unknown => "Unknown Issue",
        }
    }
}

/// Vehículo con problema de cumplimiento, para dashboard y reportes
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceIssue {
    pub plate_number: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub issue: IssueKind,
}

/// Evaluar un registro de cumplimiento contra una fecha de referencia
///
/// Orden de evaluación, la primera coincidencia gana:
/// 1. inspección anual marcada "No" (las fechas no importan)
/// 2. fecha de inspección anterior a un año atrás
/// 3. fecha de seguro anterior a un año atrás
/// 4. registro indeterminado (campo requerido ausente o ilegible)
/// 5. en regla
pub fn evaluate(record: &ComplianceRecord, today: NaiveDate) -> IssueKind {
    let one_year_ago = today - Months::new(12);

    if record.yearly_inspection.as_deref() == Some("No") {
        return IssueKind::InspectionMissing;
    }

    // Las fechas vienen como TEXT heredado; se interpretan de forma
    // defensiva en lugar de confiar en que el almacén sea limpio.
    let inspection_date = parse_stored_date(record.inspection_date.as_deref());
    let insurance_date = parse_stored_date(record.insurance_date.as_deref());

    if let Some(Some(date)) = inspection_date {
        if date < one_year_ago {
            return IssueKind::InspectionExpired;
        }
    }

    if let Some(Some(date)) = insurance_date {
        if date < one_year_ago {
            return IssueKind::InsuranceExpired;
        }
    }

    let indeterminate = record.yearly_inspection.is_none()
        || matches!(inspection_date, None | Some(None))
        || matches!(insurance_date, None | Some(None));

    if indeterminate {
        return IssueKind::Unknown;
    }

    IssueKind::Compliant
}

/// `None` = columna NULL; `Some(None)` = texto presente pero ilegible
fn parse_stored_date(value: Option<&str>) -> Option<Option<NaiveDate>> {
    value.map(|s| validate_date(s).ok())
}

pub struct ComplianceService {
    store: Store,
}

impl ComplianceService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Guardar el registro de cumplimiento de un vehículo
    ///
    /// Upsert por placa: INSERT la primera vez, UPDATE después; el tipo de
    /// cambio auditado refleja cuál de los dos ocurrió.
    pub async fn save_compliance(
        &self,
        actor: &Identity,
        plate_number: &str,
        form: ComplianceForm,
    ) -> AppResult<ComplianceRecord> {
        form.validate()?;

        let mut conn = self.store.conn().await?;

        if !vehicle_repository::exists(&mut conn, plate_number).await? {
            return Err(validation_error("plate_number", "vehicle does not exist"));
        }

        let mut tx = conn.begin().await?;

        let change_type =
            if compliance_repository::find_by_plate(&mut tx, plate_number).await?.is_some() {
                compliance_repository::update(&mut tx, plate_number, &form).await?;
                "UPDATE"
            } else {
                compliance_repository::insert(&mut tx, plate_number, &form).await?;
                "INSERT"
            };

        change_log_repository::append(&mut tx, &actor.username, change_type, "compliance", plate_number)
            .await?;

        let saved = compliance_repository::find_by_plate(&mut tx, plate_number)
            .await?
            .ok_or_else(|| {
                crate::utils::errors::AppError::Internal(
                    "compliance row missing after write".to_string(),
                )
            })?;

        tx.commit().await?;

        info!(plate = plate_number, change_type, "compliance saved");
        Ok(saved)
    }

    pub async fn get_compliance(&self, plate_number: &str) -> AppResult<Option<ComplianceRecord>> {
        let mut conn = self.store.conn().await?;
        compliance_repository::find_by_plate(&mut conn, plate_number).await
    }

    /// Vehículos con problemas de cumplimiento a la fecha de referencia
    ///
    /// `limit = None` devuelve el reporte completo; el dashboard pasa
    /// [`DASHBOARD_ISSUE_LIMIT`].
    pub async fn compliance_issues(
        &self,
        today: NaiveDate,
        limit: Option<usize>,
    ) -> AppResult<Vec<ComplianceIssue>> {
        let mut conn = self.store.conn().await?;
        issues_on(&mut conn, today, limit).await
    }

    /// Vehículos sin registro de cumplimiento ("nunca evaluados")
    pub async fn unevaluated_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let mut conn = self.store.conn().await?;
        vehicle_repository::without_compliance(&mut conn).await
    }
}

/// Evaluación sobre una conexión ya abierta, compartida con los reportes
pub(crate) async fn issues_on(
    conn: &mut sqlx::SqliteConnection,
    today: NaiveDate,
    limit: Option<usize>,
) -> AppResult<Vec<ComplianceIssue>> {
    let records = compliance_repository::list(conn).await?;
    let vehicles: HashMap<String, Vehicle> = vehicle_repository::list(conn)
        .await?
        .into_iter()
        .map(|v| (v.plate_number.clone(), v))
        .collect();

    let mut issues = Vec::new();
    for record in &records {
        let issue = evaluate(record, today);
        if issue == IssueKind::Compliant {
            continue;
        }

        let vehicle = vehicles.get(&record.plate_number);
        issues.push(ComplianceIssue {
            plate_number: record.plate_number.clone(),
            make: vehicle.and_then(|v| v.make.clone()),
            model: vehicle.and_then(|v| v.model.clone()),
            issue,
        });

        if let Some(limit) = limit {
            if issues.len() == limit {
                break;
            }
        }
    }

    Ok(issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        yearly_inspection: Option<&str>,
        inspection_date: Option<&str>,
        insurance_date: Option<&str>,
    ) -> ComplianceRecord {
        ComplianceRecord {
            plate_number: "AA-10001".to_string(),
            insurance_type: Some("Fully Insured".to_string()),
            insurance_date: insurance_date.map(str::to_string),
            yearly_inspection: yearly_inspection.map(str::to_string),
            inspection_date: inspection_date.map(str::to_string),
            safety_audit: Some("Safe".to_string()),
            utilization_history: None,
            accident_history: None,
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_missing_inspection_wins_regardless_of_dates() {
        let r = record(Some("No"), Some("2010-01-01"), Some("2010-01-01"));
        assert_eq!(evaluate(&r, day("2025-01-10")), IssueKind::InspectionMissing);

        // También gana con fechas recientes
        let r = record(Some("No"), Some("2025-01-01"), Some("2025-01-01"));
        assert_eq!(evaluate(&r, day("2025-01-10")), IssueKind::InspectionMissing);
    }

    #[test]
    fn test_expired_inspection() {
        let r = record(Some("Yes"), Some("2023-01-01"), Some("2025-01-01"));
        assert_eq!(evaluate(&r, day("2025-01-10")), IssueKind::InspectionExpired);
    }

    #[test]
    fn test_expired_insurance_only_after_inspection_rule() {
        let r = record(Some("Yes"), Some("2025-01-01"), Some("2023-06-01"));
        assert_eq!(evaluate(&r, day("2025-01-10")), IssueKind::InsuranceExpired);

        // Si ambas vencieron, la inspección tiene precedencia
        let r = record(Some("Yes"), Some("2023-01-01"), Some("2023-06-01"));
        assert_eq!(evaluate(&r, day("2025-01-10")), IssueKind::InspectionExpired);
    }

    #[test]
    fn test_compliant_record() {
        let r = record(Some("Yes"), Some("2024-06-01"), Some("2024-06-01"));
        assert_eq!(evaluate(&r, day("2025-01-10")), IssueKind::Compliant);
    }

    #[test]
    fn test_one_year_boundary() {
        // Exactamente un año atrás no está vencida; un día más sí
        let r = record(Some("Yes"), Some("2024-01-10"), Some("2024-06-01"));
        assert_eq!(evaluate(&r, day("2025-01-10")), IssueKind::Compliant);

        let r = record(Some("Yes"), Some("2024-01-09"), Some("2024-06-01"));
        assert_eq!(evaluate(&r, day("2025-01-10")), IssueKind::InspectionExpired);
    }

    #[test]
    fn test_indeterminate_record_is_unknown_not_compliant() {
        let r = record(Some("Yes"), None, Some("2024-06-01"));
        assert_eq!(evaluate(&r, day("2025-01-10")), IssueKind::Unknown);

        let r = record(Some("Yes"), Some("not-a-date"), Some("2024-06-01"));
        assert_eq!(evaluate(&r, day("2025-01-10")), IssueKind::Unknown);

        let r = record(None, Some("2024-06-01"), Some("2024-06-01"));
        assert_eq!(evaluate(&r, day("2025-01-10")), IssueKind::Unknown);
    }
}
