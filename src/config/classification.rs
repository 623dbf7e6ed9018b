//! Corridor classification thresholds
//!
//! Share thresholds decide the primary exposure type; priority cut-offs
//! decide the severity tier.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Minimum heat share for a heat-dominated corridor
    #[serde(default = "default_heat_share")]
    pub heat_share: f64,

    /// Minimum pollution share for a pollution-dominated corridor
    #[serde(default = "default_pollution_share")]
    pub pollution_share: f64,

    /// Minimum green share for a green-deficit corridor
    #[serde(default = "default_green_share")]
    pub green_share: f64,

    /// Priority at or above which a corridor is critical
    #[serde(default = "default_critical_priority")]
    pub critical_priority: f64,

    /// Priority at or above which a corridor is high
    #[serde(default = "default_high_priority")]
    pub high_priority: f64,

    /// Green deficit assumed when no member carries vegetation data
    #[serde(default = "default_missing_green_deficit")]
    pub missing_green_deficit: f64,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            heat_share: default_heat_share(),
            pollution_share: default_pollution_share(),
            green_share: default_green_share(),
            critical_priority: default_critical_priority(),
            high_priority: default_high_priority(),
            missing_green_deficit: default_missing_green_deficit(),
        }
    }
}

impl ClassificationConfig {
    pub fn validate(&self) -> Result<(), String> {
        let fractions = [
            ("heat_share", self.heat_share),
            ("pollution_share", self.pollution_share),
            ("green_share", self.green_share),
            ("critical_priority", self.critical_priority),
            ("high_priority", self.high_priority),
            ("missing_green_deficit", self.missing_green_deficit),
        ];
        if let Some((name, _)) = fractions.iter().find(|(_, v)| !(0.0..=1.0).contains(v)) {
            return Err(format!("{} must be between 0.0 and 1.0", name));
        }
        if self.high_priority > self.critical_priority {
            return Err(format!(
                "high_priority ({}) must not exceed critical_priority ({})",
                self.high_priority, self.critical_priority
            ));
        }
        Ok(())
    }
}

pub fn default_heat_share() -> f64 {
    0.45
}
pub fn default_pollution_share() -> f64 {
    0.40
}
pub fn default_green_share() -> f64 {
    0.35
}
pub fn default_critical_priority() -> f64 {
    0.70
}
pub fn default_high_priority() -> f64 {
    0.50
}
pub fn default_missing_green_deficit() -> f64 {
    0.5
}
