pub mod exposure;
pub mod normalization;

pub use exposure::{fill_missing_priorities, ExposureScorer};
pub use normalization::{green_deficit, normalize_aqi, normalize_range, ReadingNormalizer};
