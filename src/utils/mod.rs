//! Utilidades del sistema
//! 
//! Este módulo contiene utilidades para manejo de errores y validación
//! de datos comunes a todos los servicios.

pub mod errors;
pub mod validation;
