//! Corridor classification and intervention selection.
//!
//! Classification is a pure function of a corridor's mean metrics: the same
//! means always produce the same type, tier and interventions.

pub mod exposure_type;
pub mod interventions;
pub mod selector;
pub mod severity;

pub use exposure_type::{ExposureProfile, ExposureShares, ExposureType};
pub use interventions::{select_interventions, ContextualAddon, InterventionPlan, SelectionMetrics};
pub use selector::DeterministicSelector;
pub use severity::SeverityTier;

use crate::config::ClassificationConfig;
use crate::corridor::Corridor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub primary: ExposureType,
    pub secondary: ExposureType,
    pub severity: SeverityTier,
    pub shares: ExposureShares,
}

#[derive(Debug, Clone, Default)]
pub struct CorridorClassifier {
    config: ClassificationConfig,
}

impl CorridorClassifier {
    pub fn new(config: ClassificationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassificationConfig {
        &self.config
    }

    pub fn classify(
        &self,
        mean_heat: Option<f64>,
        mean_aqi: Option<f64>,
        mean_green_deficit: Option<f64>,
        priority: Option<f64>,
    ) -> Classification {
        let profile =
            ExposureProfile::resolve(mean_heat, mean_aqi, mean_green_deficit, &self.config);
        let severity = SeverityTier::from_priority(priority, &self.config);

        match profile.shares() {
            Some(shares) => {
                let primary = exposure_type::primary_type(&shares, &self.config);
                Classification {
                    primary,
                    secondary: exposure_type::secondary_type(&shares, primary),
                    severity,
                    shares,
                }
            }
            None => {
                log::debug!("Exposure total below threshold, using mixed fallback");
                Classification {
                    primary: ExposureType::Mixed,
                    secondary: ExposureType::GreenDeficit,
                    severity,
                    shares: ExposureShares::equal(),
                }
            }
        }
    }

    /// Classify a corridor from its means and attach the intervention plan.
    pub fn annotate(&self, corridor: &mut Corridor) {
        let m = corridor.metrics;
        let classification =
            self.classify(m.mean_heat, m.mean_aqi, m.mean_green_deficit, m.mean_priority);
        let selection = SelectionMetrics {
            heat: m.mean_heat,
            aqi: m.mean_aqi,
            green_deficit: m
                .mean_green_deficit
                .unwrap_or(self.config.missing_green_deficit),
            priority: m.mean_priority,
        };
        let plan = select_interventions(
            classification.primary,
            classification.secondary,
            classification.severity,
            &selection,
        );
        corridor.classification = Some(classification);
        corridor.interventions = Some(plan);
    }
}
