//! Modelo de Driver
//! 
//! Mapea exactamente a la tabla `driver` (id autoincremental,
//! `id_number` único a nivel global).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Driver principal - mapea exactamente a la tabla `driver`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: i64,
    pub name: String,
    pub id_number: Option<String>,
    pub phone: Option<String>,
    pub reporting_to: Option<String>,
}

/// Request para registrar un nuevo conductor
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewDriver {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 30))]
    pub id_number: String,

    pub phone: Option<String>,
    pub reporting_to: Option<String>,
}
