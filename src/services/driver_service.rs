//! Servicio de conductores

use sqlx::Connection;
use tracing::info;
use validator::Validate;

use crate::database::Store;
use crate::models::{Driver, Identity, NewDriver};
use crate::repositories::{change_log_repository, driver_repository};
use crate::utils::errors::{AppError, AppResult};

pub struct DriverService {
    store: Store,
}

impl DriverService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Registrar un conductor
    ///
    /// Número de identidad duplicado falla con `Conflict`; la fila y su
    /// entrada de auditoría se confirman juntas.
    pub async fn add_driver(&self, actor: &Identity, driver: NewDriver) -> AppResult<Driver> {
        driver.validate()?;

        let mut conn = self.store.conn().await?;
        let mut tx = conn.begin().await?;

        let id = driver_repository::insert(&mut tx, &driver).await?;

        change_log_repository::append(
            &mut tx,
            &actor.username,
            "INSERT",
            "driver",
            &id.to_string(),
        )
        .await?;

        let saved = driver_repository::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::Internal("driver row missing after write".to_string()))?;

        tx.commit().await?;

        info!(driver_id = id, "driver registered");
        Ok(saved)
    }

    pub async fn get_driver(&self, id: i64) -> AppResult<Option<Driver>> {
        let mut conn = self.store.conn().await?;
        driver_repository::find_by_id(&mut conn, id).await
    }

    pub async fn list_drivers(&self) -> AppResult<Vec<Driver>> {
        let mut conn = self.store.conn().await?;
        driver_repository::list(&mut conn).await
    }
}
