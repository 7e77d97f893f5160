//! Configuración del proyecto
//! 
//! Este módulo contiene la configuración del sistema: la ubicación del
//! almacén de datos se pasa de forma explícita, nunca por estado global.

pub mod environment;

pub use environment::FleetConfig;
