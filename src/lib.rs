//! Fleet Core - núcleo de dominio para gestión de flota
//!
//! Esta librería implementa el motor de consultas y reglas del sistema de
//! gestión de flota: asignaciones activas, cumplimiento normativo,
//! mantenimiento programado, reportes agregados y el registro de auditoría.
//! Toda la capa de presentación (UI, gráficos, mapas, exportación) queda
//! fuera de este crate.

pub mod config;
pub mod database;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

pub use config::environment::FleetConfig;
pub use database::connection::Store;
pub use utils::errors::{AppError, AppResult};
