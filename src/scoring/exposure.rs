use crate::config::ExposureWeights;
use crate::core::{Element, ExposureAttributes};

/// Multi-exposure priority scorer.
///
/// With an AQI reading the priority is the weighted sum of heat, green
/// deficit and AQI. Without one the scorer falls back to the heat and green
/// deficit pair with its own weights, so a missing station never drags a
/// score toward zero.
#[derive(Debug, Clone, Default)]
pub struct ExposureScorer {
    weights: ExposureWeights,
}

impl ExposureScorer {
    pub fn new(weights: ExposureWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ExposureWeights {
        &self.weights
    }

    /// Priority in [0, 1] from already-normalized components.
    pub fn score(&self, heat_norm: f64, green_deficit_norm: f64, aqi_norm: Option<f64>) -> f64 {
        let w = &self.weights;
        let priority = match aqi_norm {
            Some(aqi) => w.heat * heat_norm + w.green_deficit * green_deficit_norm + w.aqi * aqi,
            None => w.fallback_heat * heat_norm + w.fallback_green_deficit * green_deficit_norm,
        };
        priority.clamp(0.0, 1.0)
    }

    /// Score from attributes, if heat and green deficit are both present.
    pub fn score_attributes(&self, attributes: &ExposureAttributes) -> Option<f64> {
        let heat = attributes.heat()?;
        let deficit = attributes.green_deficit()?;
        Some(self.score(heat, deficit, attributes.aqi()))
    }

    /// Fill in a missing priority from the element's components.
    ///
    /// A priority that is already present is never replaced. Returns whether
    /// the element gained a score.
    pub fn score_element(&self, element: &mut Element) -> bool {
        if element.priority().is_some() {
            return false;
        }
        match self.score_attributes(&element.attributes) {
            Some(priority) => {
                element.attributes.priority_score = Some(priority);
                true
            }
            None => false,
        }
    }
}

/// Score every element lacking a priority; returns how many were filled.
///
/// This is a preparation step for element producers. The aggregation
/// pipeline itself treats priorities as fixed inputs.
pub fn fill_missing_priorities(elements: &mut [Element], scorer: &ExposureScorer) -> usize {
    let filled = elements
        .iter_mut()
        .map(|element| scorer.score_element(element))
        .filter(|&gained| gained)
        .count();
    if filled > 0 {
        log::debug!("Computed priority for {} elements from exposure components", filled);
    }
    filled
}
