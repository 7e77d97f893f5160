//! Tests de integración: resolvedor, programador de mantenimiento,
//! evaluador de cumplimiento y reportes agregados

mod common;

use common::*;
use fleet_core::services::{
    AssignmentService, ComplianceService, IssueKind, MaintenanceService, ReportService,
    VehicleService,
};
use fleet_core::services::DriverService;

/// Tres vehículos, una asignación activa: la diferencia de conjuntos deja
/// exactamente dos sin asignar
#[tokio::test]
async fn test_unassigned_vehicles_is_a_true_set_difference() {
    let (_dir, store) = test_store().await;
    let vehicles = VehicleService::new(store.clone());
    let drivers = DriverService::new(store.clone());
    let assignments = AssignmentService::new(store.clone());
    let reports = ReportService::new(store);

    for (plate, chasis) in [("AA-10001", "CH-001"), ("AA-10002", "CH-002"), ("AA-10003", "CH-003")] {
        vehicles.add_vehicle(&admin(), new_vehicle(plate, chasis)).await.unwrap();
    }
    let driver = drivers
        .add_driver(&admin(), new_driver("Abebe Bikila", "ID-001"))
        .await
        .unwrap();

    // Una activa (abierta) y una terminada hace tiempo
    assignments
        .create_assignment(&admin(), new_assignment("AA-10001", driver.id, None))
        .await
        .unwrap();
    assignments
        .create_assignment(&admin(), new_assignment("AA-10002", driver.id, Some("2024-02-01")))
        .await
        .unwrap();

    let today = day("2025-01-10");
    let unassigned = reports.unassigned_vehicles(today).await.unwrap();
    let plates: Vec<_> = unassigned.iter().map(|v| v.plate_number.as_str()).collect();
    assert_eq!(plates, vec!["AA-10002", "AA-10003"]);

    let summary = reports.assignment_summary(today).await.unwrap();
    assert_eq!(summary.ongoing_assignments, 1);
    assert_eq!(summary.unassigned_vehicles, 2);

    let dashboard = reports.dashboard(today).await.unwrap();
    assert_eq!(dashboard.vehicle_count, 3);
    assert_eq!(dashboard.driver_count, 1);
    assert_eq!(dashboard.active_assignment_count, 1);
}

#[tokio::test]
async fn test_end_date_boundary_equality_counts_as_active() {
    let (_dir, store) = test_store().await;
    let vehicles = VehicleService::new(store.clone());
    let drivers = DriverService::new(store.clone());
    let assignments = AssignmentService::new(store);

    vehicles.add_vehicle(&admin(), new_vehicle("AA-10001", "CH-001")).await.unwrap();
    let driver = drivers
        .add_driver(&admin(), new_driver("Abebe Bikila", "ID-001"))
        .await
        .unwrap();
    assignments
        .create_assignment(&admin(), new_assignment("AA-10001", driver.id, Some("2024-01-01")))
        .await
        .unwrap();

    // La igualdad cuenta como activa; un día después ya no
    assert_eq!(assignments.current_assignments(day("2023-12-31")).await.unwrap().len(), 1);
    assert_eq!(assignments.current_assignments(day("2024-01-01")).await.unwrap().len(), 1);
    assert_eq!(assignments.current_assignments(day("2024-01-02")).await.unwrap().len(), 0);

    let current = assignments
        .current_for_vehicle("AA-10001", day("2024-01-01"))
        .await
        .unwrap();
    assert_eq!(current.len(), 1);
    assert!(assignments
        .current_for_driver(driver.id, day("2024-01-02"))
        .await
        .unwrap()
        .is_empty());
}

/// Los solapamientos se toleran: se devuelven todas las coincidencias
#[tokio::test]
async fn test_overlapping_assignments_all_returned() {
    let (_dir, store) = test_store().await;
    let vehicles = VehicleService::new(store.clone());
    let drivers = DriverService::new(store.clone());
    let assignments = AssignmentService::new(store);

    vehicles.add_vehicle(&admin(), new_vehicle("AA-10001", "CH-001")).await.unwrap();
    let driver = drivers
        .add_driver(&admin(), new_driver("Abebe Bikila", "ID-001"))
        .await
        .unwrap();

    assignments
        .create_assignment(&admin(), new_assignment("AA-10001", driver.id, None))
        .await
        .unwrap();
    assignments
        .create_assignment(&admin(), new_assignment("AA-10001", driver.id, Some("2030-01-01")))
        .await
        .unwrap();

    let current = assignments
        .current_for_vehicle("AA-10001", day("2025-01-10"))
        .await
        .unwrap();
    assert_eq!(current.len(), 2);
}

#[tokio::test]
async fn test_due_soon_window_bounds_and_ordering() {
    let (_dir, store) = test_store().await;
    let vehicles = VehicleService::new(store.clone());
    let maintenance = MaintenanceService::new(store);

    vehicles.add_vehicle(&admin(), new_vehicle("AA-10001", "CH-001")).await.unwrap();

    let today = day("2025-03-10");
    // Dentro de la ventana: hoy, hoy+3, hoy+7. Fuera: hoy+8 y una vencida.
    for next in ["2025-03-17", "2025-03-10", "2025-03-13", "2025-03-18", "2025-03-09"] {
        maintenance
            .add_maintenance(&admin(), "AA-10001", new_maintenance("2024-12-01", next))
            .await
            .unwrap();
    }

    let due = maintenance.due_soon(today, 7, None).await.unwrap();
    let dates: Vec<String> = due.iter().map(|d| d.next_service_date.to_string()).collect();
    assert_eq!(dates, vec!["2025-03-10", "2025-03-13", "2025-03-17"]);

    // La vencida no entra en la ventana pero sí en el reporte de vencidos
    let overdue = maintenance.overdue(today).await.unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].next_service_date.to_string(), "2025-03-09");
}

#[tokio::test]
async fn test_dashboard_caps_maintenance_rows() {
    let (_dir, store) = test_store().await;
    let vehicles = VehicleService::new(store.clone());
    let maintenance = MaintenanceService::new(store.clone());
    let reports = ReportService::new(store);

    vehicles.add_vehicle(&admin(), new_vehicle("AA-10001", "CH-001")).await.unwrap();

    let today = day("2025-03-10");
    for i in 1..=6 {
        let next = format!("2025-03-1{}", i);
        maintenance
            .add_maintenance(&admin(), "AA-10001", new_maintenance("2024-12-01", &next))
            .await
            .unwrap();
    }

    let dashboard = reports.dashboard(today).await.unwrap();
    assert_eq!(dashboard.maintenance_due.len(), 5);

    // El reporte completo no se capa
    let all = maintenance.due_soon(today, 7, None).await.unwrap();
    assert_eq!(all.len(), 6);
}

#[tokio::test]
async fn test_compliance_issues_and_unevaluated_vehicles() {
    let (_dir, store) = test_store().await;
    let vehicles = VehicleService::new(store.clone());
    let compliance = ComplianceService::new(store);

    vehicles.add_vehicle(&admin(), new_vehicle("AA-10001", "CH-001")).await.unwrap();
    vehicles.add_vehicle(&admin(), new_vehicle("AA-10002", "CH-002")).await.unwrap();
    vehicles.add_vehicle(&admin(), new_vehicle("AA-10003", "CH-003")).await.unwrap();

    let today = day("2025-01-10");

    // Inspección marcada "No": el problema gana a cualquier fecha
    compliance
        .save_compliance(&admin(), "AA-10001", compliance_form("No", "2025-01-01", "2025-01-01"))
        .await
        .unwrap();
    // Inspección de hace dos años con "Yes": vencida
    compliance
        .save_compliance(&admin(), "AA-10002", compliance_form("Yes", "2023-01-01", "2024-06-01"))
        .await
        .unwrap();

    let issues = compliance.compliance_issues(today, None).await.unwrap();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].plate_number, "AA-10001");
    assert_eq!(issues[0].issue, IssueKind::InspectionMissing);
    assert_eq!(issues[1].plate_number, "AA-10002");
    assert_eq!(issues[1].issue, IssueKind::InspectionExpired);

    // Sin registro: "nunca evaluado", aparte de los problemas
    let unevaluated = compliance.unevaluated_vehicles().await.unwrap();
    assert_eq!(unevaluated.len(), 1);
    assert_eq!(unevaluated[0].plate_number, "AA-10003");
}

#[tokio::test]
async fn test_tracking_view_requires_gps_position() {
    let (_dir, store) = test_store().await;
    let vehicles = VehicleService::new(store.clone());
    let drivers = DriverService::new(store.clone());
    let assignments = AssignmentService::new(store);

    vehicles.add_vehicle(&admin(), new_vehicle("AA-10001", "CH-001")).await.unwrap();
    vehicles.add_vehicle(&admin(), new_vehicle("AA-10002", "CH-002")).await.unwrap();
    let driver = drivers
        .add_driver(&admin(), new_driver("Abebe Bikila", "ID-001"))
        .await
        .unwrap();

    let mut with_gps = new_assignment("AA-10001", driver.id, None);
    with_gps.gps_position = Some("9.145,40.4897".to_string());
    assignments.create_assignment(&admin(), with_gps).await.unwrap();
    assignments
        .create_assignment(&admin(), new_assignment("AA-10002", driver.id, None))
        .await
        .unwrap();

    let today = day("2025-01-10");
    let tracked = assignments.tracked_assignments(today).await.unwrap();
    assert_eq!(tracked.len(), 1);
    assert_eq!(tracked[0].plate_number, "AA-10001");
    assert_eq!(tracked[0].gps_position, "9.145,40.4897");
    assert_eq!(tracked[0].driver_name, "Abebe Bikila");

    // Ambas siguen activas para el resto de los reportes
    assert_eq!(assignments.active_assignments(today).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_groupings_count_by_org_unit() {
    let (_dir, store) = test_store().await;
    let vehicles = VehicleService::new(store.clone());
    let drivers = DriverService::new(store.clone());
    let assignments = AssignmentService::new(store.clone());
    let reports = ReportService::new(store);

    let mut north = new_vehicle("AA-10001", "CH-001");
    north.assigned_for = Some("North Region".to_string());
    let mut west1 = new_vehicle("AA-10002", "CH-002");
    west1.assigned_for = Some("West Region".to_string());
    let mut west2 = new_vehicle("AA-10003", "CH-003");
    west2.assigned_for = Some("West Region".to_string());
    for v in [north, west1, west2] {
        vehicles.add_vehicle(&admin(), v).await.unwrap();
    }

    let grouped = reports.vehicles_by_assigned_for().await.unwrap();
    assert_eq!(
        grouped,
        vec![
            (Some("North Region".to_string()), 1),
            (Some("West Region".to_string()), 2),
        ]
    );

    let driver = drivers
        .add_driver(&admin(), new_driver("Abebe Bikila", "ID-001"))
        .await
        .unwrap();
    let grouped = reports.drivers_by_reporting_to().await.unwrap();
    assert_eq!(grouped, vec![(Some("North Region".to_string()), 1)]);

    let mut a = new_assignment("AA-10001", driver.id, None);
    a.work_place = Some("Load Dispatch Center".to_string());
    assignments.create_assignment(&admin(), a).await.unwrap();

    let today = day("2025-01-10");
    let grouped = reports.assignments_by_work_place(today).await.unwrap();
    assert_eq!(grouped, vec![(Some("Load Dispatch Center".to_string()), 1)]);

    let report = reports.driver_assignments(today).await.unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].name, "Abebe Bikila");
    assert_eq!(report[0].plate_number, "AA-10001");
}

#[tokio::test]
async fn test_vehicle_and_driver_summaries() {
    let (_dir, store) = test_store().await;
    let vehicles = VehicleService::new(store.clone());
    let drivers = DriverService::new(store.clone());
    let assignments = AssignmentService::new(store.clone());
    let compliance = ComplianceService::new(store.clone());
    let maintenance = MaintenanceService::new(store.clone());
    let reports = ReportService::new(store);

    vehicles.add_vehicle(&admin(), new_vehicle("AA-10001", "CH-001")).await.unwrap();
    let driver = drivers
        .add_driver(&admin(), new_driver("Abebe Bikila", "ID-001"))
        .await
        .unwrap();

    compliance
        .save_compliance(&admin(), "AA-10001", compliance_form("Yes", "2024-06-01", "2024-06-01"))
        .await
        .unwrap();
    maintenance
        .add_maintenance(&admin(), "AA-10001", new_maintenance("2024-03-01", "2024-06-01"))
        .await
        .unwrap();
    maintenance
        .add_maintenance(&admin(), "AA-10001", new_maintenance("2024-06-01", "2024-09-01"))
        .await
        .unwrap();

    let mut old = new_assignment("AA-10001", driver.id, Some("2024-06-30"));
    old.start_date = day("2024-01-01");
    assignments.create_assignment(&admin(), old).await.unwrap();
    let mut current = new_assignment("AA-10001", driver.id, None);
    current.start_date = day("2024-07-01");
    assignments.create_assignment(&admin(), current).await.unwrap();

    let summary = reports.vehicle_summary("AA-10001").await.unwrap().unwrap();
    assert!(summary.compliance.is_some());
    // Historiales más recientes primero
    assert_eq!(summary.maintenance.len(), 2);
    assert_eq!(summary.maintenance[0].last_service_date, Some(day("2024-06-01")));
    assert_eq!(summary.assignments.len(), 2);
    assert_eq!(summary.assignments[0].start_date, day("2024-07-01"));

    assert!(reports.vehicle_summary("ZZ-99999").await.unwrap().is_none());

    let today = day("2025-01-10");
    let summary = reports.driver_summary(driver.id, today).await.unwrap().unwrap();
    assert_eq!(summary.driver.name, "Abebe Bikila");
    assert_eq!(summary.current_assignments.len(), 1);
    assert_eq!(summary.current_assignments[0].start_date, day("2024-07-01"));
    assert_eq!(summary.assignment_history.len(), 2);
    assert_eq!(summary.assignment_history[0].start_date, day("2024-07-01"));

    assert!(reports.driver_summary(999, today).await.unwrap().is_none());
}

/// El tablero se serializa con nombres de campo estables
///
/// Los consumidores de exportación (JSON) dependen de estos nombres; un
/// rename en el struct los rompería en silencio.
#[tokio::test]
async fn test_dashboard_serializes_with_stable_field_names() -> anyhow::Result<()> {
    let (_dir, store) = test_store().await;
    let vehicles = VehicleService::new(store.clone());
    let reports = ReportService::new(store);

    vehicles.add_vehicle(&admin(), new_vehicle("AA-10001", "CH-001")).await?;

    let dashboard = reports.dashboard(day("2025-01-10")).await?;
    let json = serde_json::to_value(&dashboard)?;

    assert_eq!(json["vehicle_count"], 1);
    assert_eq!(json["driver_count"], 0);
    assert_eq!(json["active_assignment_count"], 0);
    assert!(json["maintenance_due"].as_array().is_some_and(|v| v.is_empty()));
    assert!(json["compliance_issues"].as_array().is_some_and(|v| v.is_empty()));
    Ok(())
}
