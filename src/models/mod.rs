//! Modelos del sistema
//! 
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema SQLite heredado (los nombres de tabla y columna son superficie
//! de compatibilidad con almacenes existentes).

pub mod assignment;
pub mod change_log;
pub mod compliance;
pub mod driver;
pub mod maintenance;
pub mod user;
pub mod vehicle;

pub use assignment::*;
pub use change_log::*;
pub use compliance::*;
pub use driver::*;
pub use maintenance::*;
pub use user::*;
pub use vehicle::*;
