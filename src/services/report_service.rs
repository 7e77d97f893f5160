//! Motor de agregación y reportes
//!
//! Derivaciones sin estado sobre la salida de los demás componentes:
//! conteos, agrupaciones, diferencia de conjuntos y los resúmenes 360° de
//! vehículo y conductor. Todas las lecturas comparten el predicado de
//! actividad del resolvedor; ninguna reimplementa la comparación de
//! fechas.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::database::Store;
use crate::models::{
    ComplianceRecord, Driver, DriverAssignmentReportRow, DriverAssignmentRow, MaintenanceDue,
    MaintenanceRecord, Vehicle, VehicleAssignmentRow,
};
use crate::repositories::{
    assignment_repository, compliance_repository, driver_repository, maintenance_repository,
    vehicle_repository,
};
use crate::services::compliance_service::{self, ComplianceIssue, DASHBOARD_ISSUE_LIMIT};
use crate::services::maintenance_service::{DASHBOARD_DUE_LIMIT, DEFAULT_WINDOW_DAYS};
use crate::utils::errors::{AppError, AppResult};

/// Vista general del dashboard
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub vehicle_count: i64,
    pub driver_count: i64,
    pub active_assignment_count: i64,
    /// Próximos servicios en la ventana por defecto, tope de 5 filas
    pub maintenance_due: Vec<MaintenanceDue>,
    /// Problemas de cumplimiento, tope de 5 filas
    pub compliance_issues: Vec<ComplianceIssue>,
}

/// Reporte "resumen de asignaciones"
#[derive(Debug, Serialize)]
pub struct AssignmentSummary {
    pub ongoing_assignments: i64,
    pub unassigned_vehicles: i64,
    pub vehicles_by_assigned_for: Vec<(Option<String>, i64)>,
    pub drivers_by_reporting_to: Vec<(Option<String>, i64)>,
}

/// Resumen 360° de un vehículo
#[derive(Debug, Serialize)]
pub struct VehicleSummary {
    pub vehicle: Vehicle,
    /// `None` = nunca evaluado (distinto de "en regla")
    pub compliance: Option<ComplianceRecord>,
    /// Historial de mantenimiento, más reciente primero
    pub maintenance: Vec<MaintenanceRecord>,
    /// Historial de asignaciones, más reciente primero
    pub assignments: Vec<VehicleAssignmentRow>,
}

/// Resumen 360° de un conductor
#[derive(Debug, Serialize)]
pub struct DriverSummary {
    pub driver: Driver,
    /// Asignación actual según el resolvedor; varias filas solo si los
    /// datos se solapan
    pub current_assignments: Vec<DriverAssignmentRow>,
    /// Historial completo, más reciente primero
    pub assignment_history: Vec<DriverAssignmentRow>,
}

pub struct ReportService {
    store: Store,
}

impl ReportService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Conteos y topes del dashboard
    pub async fn dashboard(&self, today: NaiveDate) -> AppResult<Dashboard> {
        let mut conn = self.store.conn().await?;

        let vehicle_count = vehicle_repository::count(&mut conn).await?;
        let driver_count = driver_repository::count(&mut conn).await?;
        let active_assignment_count = assignment_repository::count_active(&mut conn, today).await?;

        let window_end = today
            .checked_add_days(Days::new(DEFAULT_WINDOW_DAYS))
            .ok_or_else(|| AppError::Internal("lookahead window out of range".to_string()))?;
        let maintenance_due = maintenance_repository::due_between(
            &mut conn,
            today,
            window_end,
            Some(DASHBOARD_DUE_LIMIT),
        )
        .await?;

        let compliance_issues =
            compliance_service::issues_on(&mut conn, today, Some(DASHBOARD_ISSUE_LIMIT)).await?;

        Ok(Dashboard {
            vehicle_count,
            driver_count,
            active_assignment_count,
            maintenance_due,
            compliance_issues,
        })
    }

    /// Conteo de vehículos por unidad organizativa
    pub async fn vehicles_by_assigned_for(&self) -> AppResult<Vec<(Option<String>, i64)>> {
        let mut conn = self.store.conn().await?;
        vehicle_repository::count_by_assigned_for(&mut conn).await
    }

    /// Conteo de conductores por unidad a la que reportan
    pub async fn drivers_by_reporting_to(&self) -> AppResult<Vec<(Option<String>, i64)>> {
        let mut conn = self.store.conn().await?;
        driver_repository::count_by_reporting_to(&mut conn).await
    }

    /// Conteo de asignaciones activas por lugar de trabajo
    pub async fn assignments_by_work_place(
        &self,
        today: NaiveDate,
    ) -> AppResult<Vec<(Option<String>, i64)>> {
        let mut conn = self.store.conn().await?;
        assignment_repository::count_active_by_work_place(&mut conn, today).await
    }

    /// Vehículos sin asignación activa: diferencia de conjuntos verdadera
    /// (todas las placas menos las que aparecen en asignaciones activas)
    pub async fn unassigned_vehicles(&self, today: NaiveDate) -> AppResult<Vec<Vehicle>> {
        let mut conn = self.store.conn().await?;
        vehicle_repository::unassigned(&mut conn, today).await
    }

    /// Reporte "resumen de asignaciones"
    pub async fn assignment_summary(&self, today: NaiveDate) -> AppResult<AssignmentSummary> {
        let mut conn = self.store.conn().await?;

        let ongoing_assignments = assignment_repository::count_active(&mut conn, today).await?;
        let unassigned_vehicles =
            vehicle_repository::unassigned(&mut conn, today).await?.len() as i64;
        let vehicles_by_assigned_for =
            vehicle_repository::count_by_assigned_for(&mut conn).await?;
        let drivers_by_reporting_to =
            driver_repository::count_by_reporting_to(&mut conn).await?;

        Ok(AssignmentSummary {
            ongoing_assignments,
            unassigned_vehicles,
            vehicles_by_assigned_for,
            drivers_by_reporting_to,
        })
    }

    /// Reporte "asignaciones por conductor": activas con contacto y vehículo
    pub async fn driver_assignments(
        &self,
        today: NaiveDate,
    ) -> AppResult<Vec<DriverAssignmentReportRow>> {
        let mut conn = self.store.conn().await?;
        assignment_repository::driver_assignments_report(&mut conn, today).await
    }

    /// Resumen 360° de un vehículo; `None` si la placa no existe
    pub async fn vehicle_summary(&self, plate_number: &str) -> AppResult<Option<VehicleSummary>> {
        let mut conn = self.store.conn().await?;

        let vehicle = match vehicle_repository::find_by_plate(&mut conn, plate_number).await? {
            Some(vehicle) => vehicle,
            None => return Ok(None),
        };

        let compliance = compliance_repository::find_by_plate(&mut conn, plate_number).await?;
        let maintenance =
            maintenance_repository::history_for_vehicle(&mut conn, plate_number).await?;
        let assignments =
            assignment_repository::history_for_vehicle(&mut conn, plate_number).await?;

        Ok(Some(VehicleSummary {
            vehicle,
            compliance,
            maintenance,
            assignments,
        }))
    }

    /// Resumen 360° de un conductor; `None` si el id no existe
    pub async fn driver_summary(
        &self,
        driver_id: i64,
        today: NaiveDate,
    ) -> AppResult<Option<DriverSummary>> {
        let mut conn = self.store.conn().await?;

        let driver = match driver_repository::find_by_id(&mut conn, driver_id).await? {
            Some(driver) => driver,
            None => return Ok(None),
        };

        let current_assignments =
            assignment_repository::current_for_driver_detailed(&mut conn, driver_id, today).await?;
        let assignment_history =
            assignment_repository::history_for_driver(&mut conn, driver_id).await?;

        Ok(Some(DriverSummary {
            driver,
            current_assignments,
            assignment_history,
        }))
    }
}
