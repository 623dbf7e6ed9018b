//! Parameters of one aggregation run.
//!
//! Parameters are validated once at the boundary; the engine downstream
//! assumes finite, in-range values.

use crate::config::AggregationConfig;
use crate::core::{Element, Error, Result};
use crate::corridor::SizeFloor;
use crate::spatial::{ConnectivityIndex, ConnectivityMode, PointConnectivity, SegmentConnectivity};
use serde::{Deserialize, Serialize};

/// How the eligibility threshold is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdPolicy {
    /// Elements with `priority_score >= value` are eligible
    Fixed(f64),
    /// Threshold is the given percentile (0-100) of present priority scores
    Percentile(f64),
}

impl ThresholdPolicy {
    /// Concrete threshold for this element collection.
    ///
    /// `None` means nothing can qualify: a percentile over a collection
    /// without any priority score.
    pub fn resolve(&self, elements: &[Element]) -> Option<f64> {
        match *self {
            ThresholdPolicy::Fixed(value) => Some(value),
            ThresholdPolicy::Percentile(p) => {
                let mut scores: Vec<f64> = elements.iter().filter_map(Element::priority).collect();
                scores.sort_by(f64::total_cmp);
                percentile(&scores, p)
            }
        }
    }
}

/// Linear-interpolated percentile of already sorted values.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = (p / 100.0).clamp(0.0, 1.0) * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64))
}

/// Connectivity rule and size floor for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ModeParams {
    Segment {
        connectivity_tolerance_m: f64,
        min_length_m: f64,
    },
    Point {
        d_max_m: f64,
        n_min: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregationParams {
    pub threshold: ThresholdPolicy,
    #[serde(flatten)]
    pub mode_params: ModeParams,
}

impl AggregationParams {
    pub fn segment(priority_threshold: f64, connectivity_tolerance_m: f64, min_length_m: f64) -> Self {
        Self {
            threshold: ThresholdPolicy::Fixed(priority_threshold),
            mode_params: ModeParams::Segment {
                connectivity_tolerance_m,
                min_length_m,
            },
        }
    }

    pub fn point(priority_threshold: f64, d_max_m: f64, n_min: usize) -> Self {
        Self {
            threshold: ThresholdPolicy::Fixed(priority_threshold),
            mode_params: ModeParams::Point { d_max_m, n_min },
        }
    }

    /// Parameters for `mode` taken from the configured defaults.
    pub fn from_config(config: &AggregationConfig, mode: ConnectivityMode) -> Self {
        match mode {
            ConnectivityMode::Segment => Self::segment(
                config.priority_threshold,
                config.connectivity_tolerance_m,
                config.min_length_m,
            ),
            ConnectivityMode::Point => {
                Self::point(config.priority_threshold, config.d_max_m, config.n_min)
            }
        }
    }

    pub fn with_threshold(mut self, threshold: ThresholdPolicy) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn mode(&self) -> ConnectivityMode {
        match self.mode_params {
            ModeParams::Segment { .. } => ConnectivityMode::Segment,
            ModeParams::Point { .. } => ConnectivityMode::Point,
        }
    }

    /// Reject parameters the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        match self.threshold {
            ThresholdPolicy::Fixed(value) => check_range("priority_threshold", value, 0.0, 1.0)?,
            ThresholdPolicy::Percentile(p) => check_range("percentile", p, 0.0, 100.0)?,
        }
        match self.mode_params {
            ModeParams::Segment {
                connectivity_tolerance_m,
                min_length_m,
            } => {
                check_non_negative("connectivity_tolerance_m", connectivity_tolerance_m)?;
                check_non_negative("min_length_m", min_length_m)
            }
            ModeParams::Point { d_max_m, n_min } => {
                check_non_negative("d_max_m", d_max_m)?;
                if n_min == 0 {
                    return Err(Error::invalid_parameter("n_min", "must be at least 1"));
                }
                Ok(())
            }
        }
    }

    /// Connectivity strategy for the configured mode.
    pub fn connectivity(&self) -> Box<dyn ConnectivityIndex> {
        match self.mode_params {
            ModeParams::Segment {
                connectivity_tolerance_m,
                ..
            } => Box::new(SegmentConnectivity::new(connectivity_tolerance_m)),
            ModeParams::Point { d_max_m, .. } => Box::new(PointConnectivity::new(d_max_m)),
        }
    }

    pub fn floor(&self) -> SizeFloor {
        match self.mode_params {
            ModeParams::Segment { min_length_m, .. } => SizeFloor::MinLength(min_length_m),
            ModeParams::Point { n_min, .. } => SizeFloor::MinMembers(n_min),
        }
    }

    /// Hashable identity of these parameters for result caching.
    pub fn key(&self) -> ParamsKey {
        let threshold = match self.threshold {
            ThresholdPolicy::Fixed(v) => (0, v.to_bits()),
            ThresholdPolicy::Percentile(p) => (1, p.to_bits()),
        };
        let (radius, floor) = match self.mode_params {
            ModeParams::Segment {
                connectivity_tolerance_m,
                min_length_m,
            } => (connectivity_tolerance_m.to_bits(), min_length_m.to_bits()),
            ModeParams::Point { d_max_m, n_min } => (d_max_m.to_bits(), n_min as u64),
        };
        ParamsKey {
            mode: self.mode(),
            threshold,
            radius,
            floor,
        }
    }
}

/// Exact bit-level identity of a parameter tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamsKey {
    mode: ConnectivityMode,
    threshold: (u8, u64),
    radius: u64,
    floor: u64,
}

fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::invalid_parameter(
            name,
            format!("must be within [{}, {}], got {}", min, max, value),
        ))
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_parameter(
            name,
            format!("must be a non-negative number of meters, got {}", value),
        ))
    }
}
