//! The aggregation pipeline.
//!
//! One pipeline serves both modes; [`AggregationParams`] selects the
//! connectivity strategy and size floor. [`AggregationSession`] adds an
//! explicit result cache on top of [`Aggregator`].

pub mod aggregate;
pub mod params;
pub mod result;
pub mod session;

pub use aggregate::{eligible_indices, Aggregator};
pub use params::{AggregationParams, ModeParams, ParamsKey, ThresholdPolicy};
pub use result::{AggregationResult, AggregationSummary, ExcludedElement};
pub use session::AggregationSession;
