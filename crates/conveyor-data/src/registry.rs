//! Plant Registry Implementation

use alerting::Alert;
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

use crate::conveyor::{Conveyor, ConveyorStatus, ParticleSizeBin};
use crate::samples;

/// Plant-wide figures for the overview cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantStats {
    pub total_conveyors: usize,
    pub operational: usize,
    pub warning: usize,
    pub critical: usize,
    pub total_throughput_tph: u64,
    pub avg_efficiency_pct: f64,
    /// Alerts not yet resolved
    pub active_alerts: usize,
}

/// Read-only conveyor registry (in-memory, static data)
pub struct PlantRegistry {
    /// Conveyors in display order
    conveyors: Vec<Conveyor>,
    /// Per-conveyor size distributions
    distributions: HashMap<String, Vec<ParticleSizeBin>>,
    /// Plant-wide size distribution
    plant_distribution: Vec<ParticleSizeBin>,
}

impl PlantRegistry {
    /// Registry over the bundled sample plant
    pub fn sample() -> Self {
        Self::new(
            samples::sample_conveyors(),
            samples::conveyor_size_distributions(),
            samples::plant_size_distribution(),
        )
    }

    pub fn new(
        conveyors: Vec<Conveyor>,
        distributions: impl IntoIterator<Item = (String, Vec<ParticleSizeBin>)>,
        plant_distribution: Vec<ParticleSizeBin>,
    ) -> Self {
        let distributions: HashMap<_, _> = distributions.into_iter().collect();
        info!(
            "Creating plant registry with {} conveyors ({} distributions)",
            conveyors.len(),
            distributions.len()
        );
        Self {
            conveyors,
            distributions,
            plant_distribution,
        }
    }

    pub fn conveyor(&self, id: &str) -> Option<&Conveyor> {
        self.conveyors.iter().find(|c| c.id == id)
    }

    pub fn conveyors(&self) -> &[Conveyor] {
        &self.conveyors
    }

    /// Size distribution for one conveyor, if recorded
    pub fn size_distribution(&self, conveyor_id: &str) -> Option<&[ParticleSizeBin]> {
        self.distributions.get(conveyor_id).map(Vec::as_slice)
    }

    pub fn plant_distribution(&self) -> &[ParticleSizeBin] {
        &self.plant_distribution
    }

    /// Overview figures combining conveyors with the current alerts
    pub fn stats<'a, I>(&self, alerts: I) -> PlantStats
    where
        I: IntoIterator<Item = &'a Alert>,
    {
        let count = |status: ConveyorStatus| {
            self.conveyors
                .iter()
                .filter(|c| c.status == status)
                .count()
        };

        let avg_efficiency_pct = if self.conveyors.is_empty() {
            0.0
        } else {
            let sum: f64 = self.conveyors.iter().map(|c| f64::from(c.efficiency_pct)).sum();
            sum / self.conveyors.len() as f64
        };

        PlantStats {
            total_conveyors: self.conveyors.len(),
            operational: count(ConveyorStatus::Operational),
            warning: count(ConveyorStatus::Warning),
            critical: count(ConveyorStatus::Critical),
            total_throughput_tph: self.conveyors.iter().map(|c| u64::from(c.throughput_tph)).sum(),
            avg_efficiency_pct,
            active_alerts: alerts.into_iter().filter(|a| a.is_active()).count(),
        }
    }
}

impl Default for PlantRegistry {
    fn default() -> Self {
        Self::sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let registry = PlantRegistry::sample();
        assert_eq!(registry.conveyor("c003").unwrap().name, "Stockpile Reclaimer");
        assert!(registry.conveyor("c999").is_none());
        assert_eq!(registry.size_distribution("c002").unwrap().len(), 7);
        assert!(registry.size_distribution("c999").is_none());
        assert_eq!(registry.plant_distribution()[6].size_range, ">60mm");
    }

    #[test]
    fn test_sample_stats() {
        let registry = PlantRegistry::sample();
        let alerts = samples::sample_alerts();
        let stats = registry.stats(&alerts);

        assert_eq!(stats.total_conveyors, 5);
        assert_eq!(stats.operational, 3);
        assert_eq!(stats.warning, 1);
        assert_eq!(stats.critical, 1);
        assert_eq!(stats.total_throughput_tph, 1845);
        assert!((stats.avg_efficiency_pct - 82.8).abs() < 1e-9);
        assert_eq!(stats.active_alerts, 6);
    }

    #[test]
    fn test_empty_registry_stats() {
        let registry = PlantRegistry::new(Vec::new(), Vec::new(), Vec::new());
        let stats = registry.stats(std::iter::empty());
        assert_eq!(stats.total_conveyors, 0);
        assert_eq!(stats.avg_efficiency_pct, 0.0);
    }
}
