//! Services module
//! 
//! Este módulo contiene la lógica de negocio del núcleo: resolución de
//! asignaciones activas, evaluación de cumplimiento, programación de
//! mantenimiento, reportes agregados, control de acceso y auditoría.
//! Cada comando mutante ejecuta su escritura de dominio y su entrada de
//! auditoría en una sola transacción.

pub mod assignment_service;
pub mod audit_service;
pub mod auth_service;
pub mod compliance_service;
pub mod driver_service;
pub mod maintenance_service;
pub mod report_service;
pub mod vehicle_service;

pub use assignment_service::AssignmentService;
pub use audit_service::AuditService;
pub use auth_service::AuthService;
pub use compliance_service::{evaluate, ComplianceService, IssueKind};
pub use driver_service::DriverService;
pub use maintenance_service::MaintenanceService;
pub use report_service::ReportService;
pub use vehicle_service::VehicleService;
