//! Dominant exposure type of a corridor.

use crate::config::ClassificationConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Totals below this are treated as "no exposure data".
pub const ZERO_TOTAL_EPSILON: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureType {
    HeatDominated,
    PollutionDominated,
    GreenDeficit,
    #[serde(rename = "mixed_exposure")]
    Mixed,
}

impl ExposureType {
    pub fn label(&self) -> &'static str {
        match self {
            ExposureType::HeatDominated => "extreme surface heat",
            ExposureType::PollutionDominated => "high air pollution",
            ExposureType::GreenDeficit => "severe vegetation deficit",
            ExposureType::Mixed => "multiple environmental stressors",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExposureType::HeatDominated => "heat_dominated",
            ExposureType::PollutionDominated => "pollution_dominated",
            ExposureType::GreenDeficit => "green_deficit",
            ExposureType::Mixed => "mixed_exposure",
        }
    }
}

impl fmt::Display for ExposureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fraction of total exposure contributed by each component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureShares {
    pub heat: f64,
    pub pollution: f64,
    pub green: f64,
}

impl ExposureShares {
    pub fn equal() -> Self {
        let third = 1.0 / 3.0;
        Self {
            heat: third,
            pollution: third,
            green: third,
        }
    }

    /// Types ordered by share, largest first; ties keep heat, pollution,
    /// green deficit order.
    pub fn ranked(&self) -> [ExposureType; 3] {
        let mut ranked = [
            (ExposureType::HeatDominated, self.heat),
            (ExposureType::PollutionDominated, self.pollution),
            (ExposureType::GreenDeficit, self.green),
        ];
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.map(|(t, _)| t)
    }
}

/// Exposure inputs to classification with absence already resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureProfile {
    pub heat: f64,
    pub aqi: f64,
    pub green_deficit: f64,
}

impl ExposureProfile {
    /// Absent heat and AQI count as zero; absent green deficit as the
    /// configured neutral value.
    pub fn resolve(
        mean_heat: Option<f64>,
        mean_aqi: Option<f64>,
        mean_green_deficit: Option<f64>,
        config: &ClassificationConfig,
    ) -> Self {
        Self {
            heat: mean_heat.unwrap_or(0.0),
            aqi: mean_aqi.unwrap_or(0.0),
            green_deficit: mean_green_deficit.unwrap_or(config.missing_green_deficit),
        }
    }

    pub fn total(&self) -> f64 {
        self.heat + self.aqi + self.green_deficit
    }

    /// Shares of the total, or `None` when the total is effectively zero.
    pub fn shares(&self) -> Option<ExposureShares> {
        let total = self.total();
        if !(total >= ZERO_TOTAL_EPSILON) {
            return None;
        }
        Some(ExposureShares {
            heat: self.heat / total,
            pollution: self.aqi / total,
            green: self.green_deficit / total,
        })
    }
}

// Pure function: primary type by threshold, checked in fixed order
pub fn primary_type(shares: &ExposureShares, config: &ClassificationConfig) -> ExposureType {
    if shares.heat >= config.heat_share {
        ExposureType::HeatDominated
    } else if shares.pollution >= config.pollution_share {
        ExposureType::PollutionDominated
    } else if shares.green >= config.green_share {
        ExposureType::GreenDeficit
    } else {
        ExposureType::Mixed
    }
}

/// Second-ranked type, or the top-ranked one when that would repeat the primary.
pub fn secondary_type(shares: &ExposureShares, primary: ExposureType) -> ExposureType {
    let ranked = shares.ranked();
    if ranked[1] == primary {
        ranked[0]
    } else {
        ranked[1]
    }
}
