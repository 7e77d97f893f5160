//! Resolvedor de asignaciones activas
//!
//! Decide qué filas del historial representan la asignación *actual* de un
//! vehículo o conductor a una fecha de referencia dada. El predicado vive
//! en un solo lugar ([`crate::models::Assignment::is_active`] y
//! [`crate::repositories::assignment_repository::ACTIVE_PREDICATE`]) y
//! todos los reportes lo comparten.

use chrono::{Local, NaiveDate};
use sqlx::Connection;
use tracing::info;
use validator::Validate;

use crate::database::Store;
use crate::models::{
    Assignment, AssignmentDetail, Identity, NewAssignment, TrackedAssignment,
};
use crate::repositories::{
    assignment_repository, change_log_repository, driver_repository, vehicle_repository,
};
use crate::utils::errors::{validation_error, AppError, AppResult};
use crate::utils::validation::validate_gps_position;

/// Formato heredado del campo `last_update`; en hora local, como los
/// almacenes existentes
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct AssignmentService {
    store: Store,
}

impl AssignmentService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Crear una asignación vehículo-conductor
    ///
    /// El vehículo y el conductor referenciados deben existir (el sistema
    /// heredado confiaba en los dropdowns del formulario; aquí se rechaza
    /// explícitamente). No se impide el solapamiento con asignaciones
    /// activas existentes: ese no es un invariante del dominio.
    pub async fn create_assignment(
        &self,
        actor: &Identity,
        mut assignment: NewAssignment,
    ) -> AppResult<Assignment> {
        assignment.validate()?;

        // Posición vacía se normaliza a NULL; presente, debe ser "lat,lon"
        // dentro de rango.
        assignment.gps_position = assignment
            .gps_position
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        if let Some(gps) = &assignment.gps_position {
            validate_gps_position(gps).map_err(|e| {
                let mut errors = validator::ValidationErrors::new();
                errors.add("gps_position", e);
                AppError::Validation(errors)
            })?;
        }

        let mut conn = self.store.conn().await?;

        if !vehicle_repository::exists(&mut conn, &assignment.plate_number).await? {
            return Err(validation_error("plate_number", "vehicle does not exist"));
        }
        if !driver_repository::exists(&mut conn, assignment.driver_id).await? {
            return Err(validation_error("driver_id", "driver does not exist"));
        }

        let last_update = Local::now().format(TIMESTAMP_FORMAT).to_string();

        let mut tx = conn.begin().await?;

        let id = assignment_repository::insert(&mut tx, &assignment, &last_update).await?;

        change_log_repository::append(
            &mut tx,
            &actor.username,
            "INSERT",
            "assignment",
            &id.to_string(),
        )
        .await?;

        let saved = assignment_repository::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::Internal("assignment row missing after write".to_string()))?;

        tx.commit().await?;

        info!(
            assignment_id = id,
            plate = %saved.plate_number,
            driver_id = saved.driver_id,
            "assignment created"
        );
        Ok(saved)
    }

    /// Todas las asignaciones activas a la fecha de referencia
    pub async fn current_assignments(&self, today: NaiveDate) -> AppResult<Vec<Assignment>> {
        let mut conn = self.store.conn().await?;
        assignment_repository::current(&mut conn, today).await
    }

    /// Asignación actual de un vehículo: a lo sumo una en el caso bien
    /// formado, todas las coincidencias si los datos se solapan
    pub async fn current_for_vehicle(
        &self,
        plate_number: &str,
        today: NaiveDate,
    ) -> AppResult<Vec<Assignment>> {
        let mut conn = self.store.conn().await?;
        assignment_repository::current_for_vehicle(&mut conn, plate_number, today).await
    }

    /// Asignación actual de un conductor, mismas tolerancias
    pub async fn current_for_driver(
        &self,
        driver_id: i64,
        today: NaiveDate,
    ) -> AppResult<Vec<Assignment>> {
        let mut conn = self.store.conn().await?;
        assignment_repository::current_for_driver(&mut conn, driver_id, today).await
    }

    /// Asignaciones activas con vehículo y conductor resueltos
    pub async fn active_assignments(&self, today: NaiveDate) -> AppResult<Vec<AssignmentDetail>> {
        let mut conn = self.store.conn().await?;
        assignment_repository::active_detailed(&mut conn, today).await
    }

    /// Vista de seguimiento: asignaciones activas con posición GPS
    pub async fn tracked_assignments(
        &self,
        today: NaiveDate,
    ) -> AppResult<Vec<TrackedAssignment>> {
        let mut conn = self.store.conn().await?;
        assignment_repository::tracked(&mut conn, today).await
    }
}
