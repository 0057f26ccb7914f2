//! Conveyor records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating condition of a conveyor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConveyorStatus {
    Operational,
    Warning,
    Critical,
}

impl fmt::Display for ConveyorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConveyorStatus::Operational => "operational",
            ConveyorStatus::Warning => "warning",
            ConveyorStatus::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// A monitored conveyor belt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conveyor {
    pub id: String,
    pub name: String,
    pub status: ConveyorStatus,
    /// Efficiency (percent)
    pub efficiency_pct: u8,
    pub alert_count: u32,
    pub last_updated: DateTime<Utc>,
    /// Average particle size (mm)
    pub avg_particle_size_mm: f64,
    /// Throughput (tonnes per hour)
    pub throughput_tph: u32,
    pub location: String,
}

/// One bucket of a particle size histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSizeBin {
    /// Range label, e.g. "10-20mm"
    pub size_range: String,
    pub percentage: f64,
    pub count: u32,
}

impl ParticleSizeBin {
    pub fn new(size_range: impl Into<String>, percentage: f64, count: u32) -> Self {
        Self {
            size_range: size_range.into(),
            percentage,
            count,
        }
    }
}
