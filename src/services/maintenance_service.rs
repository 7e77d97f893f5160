//! Programador de mantenimiento
//!
//! Determina qué vehículos tienen próximo servicio dentro de la ventana de
//! anticipación. La ventana es `[hoy, hoy + window_days]` inclusive; las
//! filas ya vencidas no entran en ella y se consultan aparte con
//! [`MaintenanceService::overdue`].

use chrono::{Days, NaiveDate};
use sqlx::Connection;
use tracing::info;
use validator::Validate;

use crate::database::Store;
use crate::models::{Identity, MaintenanceDue, MaintenanceRecord, NewMaintenance};
use crate::repositories::{change_log_repository, maintenance_repository, vehicle_repository};
use crate::utils::errors::{validation_error, AppError, AppResult};

/// Ventana de anticipación por defecto
pub const DEFAULT_WINDOW_DAYS: u64 = 7;

/// Tope de filas de mantenimiento en el dashboard
pub const DASHBOARD_DUE_LIMIT: i64 = 5;

pub struct MaintenanceService {
    store: Store,
}

impl MaintenanceService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Añadir un registro de mantenimiento al historial de un vehículo
    ///
    /// Historial solo-inserción: las filas jamás se actualizan.
    pub async fn add_maintenance(
        &self,
        actor: &Identity,
        plate_number: &str,
        record: NewMaintenance,
    ) -> AppResult<MaintenanceRecord> {
        record.validate()?;

        let mut conn = self.store.conn().await?;

        if !vehicle_repository::exists(&mut conn, plate_number).await? {
            return Err(validation_error("plate_number", "vehicle does not exist"));
        }

        let mut tx = conn.begin().await?;

        let id = maintenance_repository::insert(&mut tx, plate_number, &record).await?;

        change_log_repository::append(
            &mut tx,
            &actor.username,
            "INSERT",
            "maintenance",
            &id.to_string(),
        )
        .await?;

        tx.commit().await?;

        info!(maintenance_id = id, plate = plate_number, "maintenance record added");

        Ok(MaintenanceRecord {
            id,
            plate_number: plate_number.to_string(),
            last_service_km: Some(record.last_service_km),
            last_service_date: Some(record.last_service_date),
            next_service_km: Some(record.next_service_km),
            next_service_date: Some(record.next_service_date),
            maintenance_center: record.maintenance_center,
        })
    }

    /// Historial de servicio de un vehículo, más reciente primero
    pub async fn history(&self, plate_number: &str) -> AppResult<Vec<MaintenanceRecord>> {
        let mut conn = self.store.conn().await?;
        maintenance_repository::history_for_vehicle(&mut conn, plate_number).await
    }

    /// Vehículos con próximo servicio dentro de `[today, today + window_days]`
    ///
    /// Ascendente por fecha de servicio. `limit = None` para el reporte
    /// completo; el dashboard usa [`DASHBOARD_DUE_LIMIT`].
    pub async fn due_soon(
        &self,
        today: NaiveDate,
        window_days: u64,
        limit: Option<i64>,
    ) -> AppResult<Vec<MaintenanceDue>> {
        let to = today
            .checked_add_days(Days::new(window_days))
            .ok_or_else(|| AppError::Internal("lookahead window out of range".to_string()))?;

        let mut conn = self.store.conn().await?;
        maintenance_repository::due_between(&mut conn, today, to, limit).await
    }

    /// Vehículos con servicio ya vencido, más antiguo primero
    pub async fn overdue(&self, today: NaiveDate) -> AppResult<Vec<MaintenanceDue>> {
        let mut conn = self.store.conn().await?;
        maintenance_repository::overdue(&mut conn, today).await
    }
}
