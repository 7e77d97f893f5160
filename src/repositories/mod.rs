//! Repositorios de acceso a datos
//! 
//! Un módulo por tabla. Todas las consultas usan parámetros bind de sqlx;
//! ningún identificador del llamador se interpola en el SQL. Las funciones
//! reciben la conexión como argumento para que un comando pueda ejecutar
//! su escritura de dominio y su entrada de auditoría en una misma
//! transacción.

pub mod assignment_repository;
pub mod change_log_repository;
pub mod compliance_repository;
pub mod driver_repository;
pub mod maintenance_repository;
pub mod user_repository;
pub mod vehicle_repository;
