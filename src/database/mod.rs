//! Módulo de base de datos
//! 
//! Maneja el acceso al archivo SQLite local y el bootstrap del schema.

pub mod connection;

pub use connection::Store;
