//! Utilidades compartidas de los tests de integración

use fleet_core::models::{
    ComplianceForm, Identity, NewAssignment, NewDriver, NewMaintenance, NewVehicle, UserRole,
};
use fleet_core::{FleetConfig, Store};
use chrono::NaiveDate;
use std::sync::Once;
use tempfile::TempDir;

static TRACING: Once = Once::new();

/// Suscriptor de trazas para los tests, inicializado una sola vez
///
/// Los eventos de los servicios salen por el capturador de stdout del
/// arnés; repetir la llamada desde otro test es inocuo.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Abrir un almacén nuevo en un directorio temporal
///
/// El `TempDir` debe mantenerse vivo mientras dure el test.
pub async fn test_store() -> (TempDir, Store) {
    init_tracing();
    let dir = TempDir::new().expect("temp dir");
    let config = FleetConfig::new(dir.path());
    let store = Store::open(&config).await.expect("open store");
    (dir, store)
}

pub fn admin() -> Identity {
    Identity::new("admin", UserRole::Admin)
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub fn new_vehicle(plate: &str, chasis: &str) -> NewVehicle {
    NewVehicle {
        plate_number: plate.to_string(),
        chasis: chasis.to_string(),
        vehicle_type: Some("Pickup".to_string()),
        make: Some("Toyota".to_string()),
        model: Some("Hilux".to_string()),
        year: Some("2020".to_string()),
        fuel_type: Some("Diesel".to_string()),
        fuel_capacity: Some(80.0),
        fuel_consumption: Some(9.5),
        loading_capacity: Some("1 ton".to_string()),
        assigned_for: Some("North Region".to_string()),
    }
}

pub fn new_driver(name: &str, id_number: &str) -> NewDriver {
    NewDriver {
        name: name.to_string(),
        id_number: id_number.to_string(),
        phone: Some("0911-000000".to_string()),
        reporting_to: Some("North Region".to_string()),
    }
}

pub fn new_assignment(plate: &str, driver_id: i64, end_date: Option<&str>) -> NewAssignment {
    NewAssignment {
        plate_number: plate.to_string(),
        driver_id,
        work_place: Some("North Region".to_string()),
        start_date: day("2024-01-01"),
        end_date: end_date.map(day),
        gps_position: None,
        geofence_violations: 0,
    }
}

pub fn compliance_form(yearly_inspection: &str, inspection: &str, insurance: &str) -> ComplianceForm {
    ComplianceForm {
        insurance_type: "Fully Insured".to_string(),
        insurance_date: day(insurance),
        yearly_inspection: yearly_inspection.to_string(),
        inspection_date: day(inspection),
        safety_audit: Some("Safe".to_string()),
        utilization_history: None,
        accident_history: None,
    }
}

pub fn new_maintenance(last: &str, next: &str) -> NewMaintenance {
    NewMaintenance {
        last_service_km: 40_000,
        last_service_date: day(last),
        next_service_km: 50_000,
        next_service_date: day(next),
        maintenance_center: Some("Moenco".to_string()),
    }
}
