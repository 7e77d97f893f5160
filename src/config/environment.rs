//! Configuración de variables de entorno
//! 
//! Este módulo maneja la configuración del entorno. El directorio de datos
//! es el único valor configurable del núcleo; se resuelve una sola vez y se
//! pasa explícitamente a la construcción del `Store`.

use std::env;
use std::path::{Path, PathBuf};

/// Configuración del núcleo de flota
#[derive(Debug, Clone)]
pub struct FleetConfig {
    /// Directorio donde vive el archivo de base de datos
    pub data_dir: PathBuf,
}

impl FleetConfig {
    /// Crear una configuración con un directorio de datos explícito
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Cargar la configuración desde el entorno
    ///
    /// `FLEET_DATA_DIR` apunta al directorio de datos; si no está definida
    /// se usa `./data`, igual que el despliegue por defecto.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let data_dir = env::var("FLEET_DATA_DIR").unwrap_or_else(|_| "./data".to_string());

        Self {
            data_dir: PathBuf::from(data_dir),
        }
    }

    /// Ruta del archivo de base de datos dentro del directorio de datos
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("fleet.db")
    }

    /// Directorio de datos como `Path`
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
