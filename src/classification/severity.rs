use crate::config::ClassificationConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How urgently a corridor needs intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    /// Priority at or above the critical cut-off
    Critical,
    /// Priority at or above the high cut-off, or unknown
    High,
    Moderate,
}

impl SeverityTier {
    /// Tier for a corridor's mean priority.
    ///
    /// A corridor without any priority data is treated as high.
    pub fn from_priority(priority: Option<f64>, config: &ClassificationConfig) -> Self {
        match priority {
            None => SeverityTier::High,
            Some(p) if p >= config.critical_priority => SeverityTier::Critical,
            Some(p) if p >= config.high_priority => SeverityTier::High,
            Some(_) => SeverityTier::Moderate,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeverityTier::Critical => "Critical",
            SeverityTier::High => "High",
            SeverityTier::Moderate => "Moderate",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityTier::Critical => "critical",
            SeverityTier::High => "high",
            SeverityTier::Moderate => "moderate",
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
