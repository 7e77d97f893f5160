//! Acceso al almacén SQLite
//! 
//! Este módulo maneja la apertura del archivo de base de datos. No hay
//! pool: cada operación abre una conexión de vida corta y la libera al
//! salir, también en el camino de error (drop garantizado).

use std::fs;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use tracing::info;

use crate::config::FleetConfig;
use crate::services::auth_service::hash_password;
use crate::utils::errors::{AppError, AppResult};

/// Usuario administrador sembrado en el primer arranque
///
/// Credencial por defecto de despliegue, conocida públicamente: todo
/// despliegue debe crear un administrador propio y rotar esta contraseña
/// antes de exponer el almacén. No hay expiración automática.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Sentencias de creación del schema heredado
///
/// Los nombres de tabla y columna son superficie de compatibilidad con
/// almacenes existentes y no deben cambiarse.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS vehicle (
        plate_number TEXT PRIMARY KEY,
        chasis TEXT UNIQUE NOT NULL,
        vehicle_type TEXT,
        make TEXT,
        model TEXT,
        year TEXT,
        fuel_type TEXT,
        fuel_capacity REAL,
        fuel_consumption REAL,
        loading_capacity TEXT,
        assigned_for TEXT
    )"#,
    r#"
    CREATE TABLE IF NOT EXISTS driver (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        id_number TEXT UNIQUE,
        phone TEXT,
        reporting_to TEXT
    )"#,
    r#"
    CREATE TABLE IF NOT EXISTS compliance (
        plate_number TEXT PRIMARY KEY,
        insurance_type TEXT,
        insurance_date TEXT,
        yearly_inspection TEXT,
        inspection_date TEXT,
        safety_audit TEXT,
        utilization_history TEXT,
        accident_history TEXT,
        FOREIGN KEY(plate_number) REFERENCES vehicle(plate_number)
    )"#,
    r#"
    CREATE TABLE IF NOT EXISTS maintenance (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        plate_number TEXT,
        last_service_km INTEGER,
        last_service_date TEXT,
        next_service_km INTEGER,
        next_service_date TEXT,
        maintenance_center TEXT,
        FOREIGN KEY(plate_number) REFERENCES vehicle(plate_number)
    )"#,
    r#"
    CREATE TABLE IF NOT EXISTS assignment (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        plate_number TEXT,
        driver_id INTEGER,
        work_place TEXT,
        start_date TEXT,
        end_date TEXT,
        gps_position TEXT,
        geofence_violations INTEGER,
        last_update TEXT,
        FOREIGN KEY(plate_number) REFERENCES vehicle(plate_number),
        FOREIGN KEY(driver_id) REFERENCES driver(id)
    )"#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        username TEXT PRIMARY KEY,
        password TEXT NOT NULL,
        role TEXT DEFAULT 'user'
    )"#,
    r#"
    CREATE TABLE IF NOT EXISTS change_log (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL,
        change_type TEXT NOT NULL,
        table_name TEXT NOT NULL,
        record_id TEXT NOT NULL,
        change_time TEXT NOT NULL
    )"#,
];

/// Handle del almacén: solo guarda las opciones de conexión
#[derive(Debug, Clone)]
pub struct Store {
    options: SqliteConnectOptions,
}

impl Store {
    /// Abrir (y crear si hace falta) el almacén en el directorio configurado
    ///
    /// Crea el directorio de datos, aplica el schema y siembra la identidad
    /// administradora por defecto si todavía no existe.
    pub async fn open(config: &FleetConfig) -> AppResult<Self> {
        fs::create_dir_all(config.data_dir()).map_err(|e| {
            AppError::Internal(format!(
                "cannot create data directory {}: {}",
                config.data_dir().display(),
                e
            ))
        })?;

        let options = SqliteConnectOptions::new()
            .filename(config.db_path())
            .create_if_missing(true);

        let store = Self { options };
        store.initialize().await?;

        info!(path = %config.db_path().display(), "fleet store ready");
        Ok(store)
    }

    /// Abrir una conexión de vida corta para una sola operación
    pub async fn conn(&self) -> AppResult<SqliteConnection> {
        let conn = SqliteConnection::connect_with(&self.options).await?;
        Ok(conn)
    }

    /// Crear tablas y sembrar el admin por defecto
    async fn initialize(&self) -> AppResult<()> {
        let mut conn = self.conn().await?;

        for statement in SCHEMA {
            sqlx::query(statement).execute(&mut conn).await?;
        }

        // Siembra idempotente: el INSERT OR IGNORE no pisa un admin rotado
        sqlx::query("INSERT OR IGNORE INTO users (username, password, role) VALUES (?, ?, ?)")
            .bind(DEFAULT_ADMIN_USERNAME)
            .bind(hash_password(DEFAULT_ADMIN_PASSWORD))
            .bind("admin")
            .execute(&mut conn)
            .await?;

        Ok(())
    }
}
