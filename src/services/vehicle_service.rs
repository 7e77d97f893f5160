//! Servicio de vehículos
//!
//! Alta y listado de vehículos. El alta es un comando mutante: valida,
//! escribe y audita en una sola transacción, atribuida a la identidad
//! actuante.

use sqlx::Connection;
use tracing::info;
use validator::Validate;

use crate::database::Store;
use crate::models::{Identity, NewVehicle, Vehicle};
use crate::repositories::{change_log_repository, vehicle_repository};
use crate::utils::errors::{AppError, AppResult};

pub struct VehicleService {
    store: Store,
}

impl VehicleService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Registrar un vehículo
    ///
    /// Placa o chasis duplicados fallan con `Conflict` y no dejan escritura
    /// parcial: la fila y su entrada de auditoría se confirman juntas o no
    /// se confirman.
    pub async fn add_vehicle(&self, actor: &Identity, vehicle: NewVehicle) -> AppResult<Vehicle> {
        vehicle.validate()?;

        let mut conn = self.store.conn().await?;
        let mut tx = conn.begin().await?;

        vehicle_repository::insert(&mut tx, &vehicle).await?;

        change_log_repository::append(
            &mut tx,
            &actor.username,
            "INSERT",
            "vehicle",
            &vehicle.plate_number,
        )
        .await?;

        let saved = vehicle_repository::find_by_plate(&mut tx, &vehicle.plate_number)
            .await?
            .ok_or_else(|| AppError::Internal("vehicle row missing after write".to_string()))?;

        tx.commit().await?;

        info!(plate = %saved.plate_number, "vehicle registered");
        Ok(saved)
    }

    pub async fn get_vehicle(&self, plate_number: &str) -> AppResult<Option<Vehicle>> {
        let mut conn = self.store.conn().await?;
        vehicle_repository::find_by_plate(&mut conn, plate_number).await
    }

    pub async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let mut conn = self.store.conn().await?;
        vehicle_repository::list(&mut conn).await
    }
}
