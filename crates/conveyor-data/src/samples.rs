//! Sample plant data set

use alerting::{Alert, AlertCategory, AlertStatus, Severity};
use chrono::{DateTime, TimeZone, Utc};

use crate::conveyor::{Conveyor, ConveyorStatus, ParticleSizeBin};

/// Snapshot time on 2025-05-30
fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 30, hour, minute, second)
        .single()
        .expect("sample timestamps are valid UTC times")
}

#[allow(clippy::too_many_arguments)]
fn conveyor(
    id: &str,
    name: &str,
    status: ConveyorStatus,
    efficiency_pct: u8,
    alert_count: u32,
    last_updated: DateTime<Utc>,
    avg_particle_size_mm: f64,
    throughput_tph: u32,
    location: &str,
) -> Conveyor {
    Conveyor {
        id: id.to_string(),
        name: name.to_string(),
        status,
        efficiency_pct,
        alert_count,
        last_updated,
        avg_particle_size_mm,
        throughput_tph,
        location: location.to_string(),
    }
}

#[rustfmt::skip]
pub fn sample_conveyors() -> Vec<Conveyor> {
    use ConveyorStatus::*;
    vec![
        conveyor("c001", "Main Transfer Conveyor", Operational, 92, 0, at(7, 45, 22), 24.5, 420, "North Section"),
        conveyor("c002", "Secondary Crusher Feed", Warning, 78, 2, at(7, 42, 18), 38.7, 315, "Processing Plant"),
        conveyor("c003", "Stockpile Reclaimer", Critical, 61, 3, at(7, 30, 45), 42.2, 270, "Stockyard Area"),
        conveyor("c004", "East Wing Conveyor", Operational, 89, 0, at(7, 44, 10), 26.8, 380, "East Section"),
        conveyor("c005", "Final Product Line", Operational, 94, 1, at(7, 40, 33), 22.1, 460, "Loading Facility"),
    ]
}

/// Seed alerts as delivered by the ingestion source
pub fn sample_alerts() -> Vec<Alert> {
    vec![
        Alert::new(
            "a001",
            "c002",
            "Secondary Crusher Feed",
            AlertCategory::LargeParticle,
            Severity::Warning,
            at(7, 35, 12),
            "Large particle (65mm+) detected",
        ),
        Alert::new(
            "a002",
            "c002",
            "Secondary Crusher Feed",
            AlertCategory::System,
            Severity::Info,
            at(7, 30, 45),
            "Belt speed fluctuation detected",
        )
        .with_assigned("Michael T.")
        .with_status(AlertStatus::Acknowledged),
        Alert::new(
            "a003",
            "c003",
            "Stockpile Reclaimer",
            AlertCategory::ForeignObject,
            Severity::Critical,
            at(7, 28, 3),
            "Metal object detected on belt",
        ),
        Alert::new(
            "a004",
            "c003",
            "Stockpile Reclaimer",
            AlertCategory::LargeParticle,
            Severity::Warning,
            at(7, 25, 19),
            "Multiple large particles detected",
        ),
        Alert::new(
            "a005",
            "c003",
            "Stockpile Reclaimer",
            AlertCategory::System,
            Severity::Critical,
            at(7, 15, 34),
            "Belt alignment critical deviation",
        )
        .with_assigned("Sarah L.")
        .with_status(AlertStatus::Acknowledged),
        Alert::new(
            "a006",
            "c005",
            "Final Product Line",
            AlertCategory::System,
            Severity::Warning,
            at(7, 10, 22),
            "Sensor 3 calibration required",
        ),
    ]
}

const SIZE_RANGES: [&str; 7] = [
    "0-10mm", "10-20mm", "20-30mm", "30-40mm", "40-50mm", "50-60mm", ">60mm",
];

fn bins(rows: [(f64, u32); 7]) -> Vec<ParticleSizeBin> {
    SIZE_RANGES
        .iter()
        .zip(rows)
        .map(|(range, (percentage, count))| ParticleSizeBin::new(*range, percentage, count))
        .collect()
}

/// Plant-wide particle size distribution
pub fn plant_size_distribution() -> Vec<ParticleSizeBin> {
    bins([
        (15.0, 1250),
        (28.0, 2340),
        (32.0, 2680),
        (18.0, 1510),
        (5.0, 420),
        (1.5, 125),
        (0.5, 42),
    ])
}

/// Per-conveyor particle size distributions keyed by conveyor id
#[rustfmt::skip]
pub fn conveyor_size_distributions() -> Vec<(String, Vec<ParticleSizeBin>)> {
    vec![
        (
            "c001".to_string(),
            bins([(18.0, 580), (32.0, 1040), (28.0, 910), (16.0, 520), (4.0, 130), (1.2, 38), (0.8, 26)]),
        ),
        (
            "c002".to_string(),
            bins([(10.0, 320), (22.0, 710), (28.0, 910), (24.0, 780), (10.0, 330), (4.0, 130), (2.0, 65)]),
        ),
        (
            "c003".to_string(),
            bins([(8.0, 180), (18.0, 410), (25.0, 570), (26.0, 590), (15.0, 340), (5.0, 110), (3.0, 68)]),
        ),
        (
            "c004".to_string(),
            bins([(16.0, 510), (30.0, 960), (32.0, 1030), (15.0, 480), (5.0, 160), (1.5, 48), (0.5, 16)]),
        ),
        (
            "c005".to_string(),
            bins([(20.0, 730), (38.0, 1390), (30.0, 1100), (9.0, 320), (2.0, 73), (0.8, 29), (0.2, 7)]),
        ),
    ]
}
