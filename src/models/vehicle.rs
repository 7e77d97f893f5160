//! Modelo de Vehicle
//! 
//! Este módulo contiene el struct Vehicle y su request de alta.
//! Mapea exactamente a la tabla `vehicle` con primary key `plate_number`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Vehicle principal - mapea exactamente a la tabla `vehicle`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub plate_number: String,
    pub chasis: String,
    pub vehicle_type: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub fuel_type: Option<String>,
    pub fuel_capacity: Option<f64>,
    pub fuel_consumption: Option<f64>,
    pub loading_capacity: Option<String>,
    pub assigned_for: Option<String>,
}

/// Request para registrar un nuevo vehículo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewVehicle {
    #[validate(length(min = 1, max = 20))]
    pub plate_number: String,

    #[validate(length(min = 1, max = 50))]
    pub chasis: String,

    pub vehicle_type: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub fuel_type: Option<String>,

    #[validate(range(min = 0.0))]
    pub fuel_capacity: Option<f64>,

    #[validate(range(min = 0.0))]
    pub fuel_consumption: Option<f64>,

    pub loading_capacity: Option<String>,
    pub assigned_for: Option<String>,
}
