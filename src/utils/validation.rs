//! Utilidades de validación
//! 
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::NaiveDate;
use validator::ValidationError;

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar una posición GPS en formato "lat,lon"
///
/// Latitud en [-90, 90], longitud en [-180, 180]; mismos rangos que el
/// formulario de asignaciones.
pub fn validate_gps_position(value: &str) -> Result<(f64, f64), ValidationError> {
    let invalid = |msg: &'static str| {
        let mut error = ValidationError::new("gps_position");
        error.add_param("value".into(), &value.to_string());
        error.add_param("message".into(), &msg.to_string());
        error
    };

    let mut parts = value.splitn(2, ',');
    let lat: f64 = parts
        .next()
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| invalid("expected 'latitude,longitude'"))?;
    let lon: f64 = parts
        .next()
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| invalid("expected 'latitude,longitude'"))?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(invalid("latitude must be between -90 and 90"));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(invalid("longitude must be between -180 and 180"));
    }

    Ok((lat, lon))
}
