//! Consulta del registro de auditoría
//!
//! El registro se escribe desde los comandos mutantes (misma transacción
//! que la escritura de dominio); este servicio solo lo lee. Las entradas
//! jamás se actualizan ni se borran.

use crate::database::Store;
use crate::models::{ChangeLogEntry, Identity};
use crate::repositories::change_log_repository;
use crate::utils::errors::{forbidden_error, AppResult};

pub struct AuditService {
    store: Store,
}

impl AuditService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Registro completo, más reciente primero (solo administradores)
    pub async fn change_log(&self, actor: &Identity) -> AppResult<Vec<ChangeLogEntry>> {
        if !actor.role.is_admin() {
            return Err(forbidden_error("view change log", "administrator role required"));
        }

        let mut conn = self.store.conn().await?;
        change_log_repository::list(&mut conn).await
    }
}
