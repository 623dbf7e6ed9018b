// Export modules for library usage
pub mod classification;
pub mod cli;
pub mod commands;
pub mod components;
pub mod config;
pub mod core;
pub mod corridor;
pub mod io;
pub mod observability;
pub mod pipeline;
pub mod scoring;
pub mod spatial;

// Re-export commonly used types
pub use crate::core::{
    BoundingBox, Edge, Element, ElementId, ElementIndex, Error, ExposureAttributes, Geometry,
    Result,
};

pub use crate::classification::{
    Classification, CorridorClassifier, DeterministicSelector, ExposureType, InterventionPlan,
    SeverityTier,
};
pub use crate::components::{extract_components, Component};
pub use crate::corridor::{Corridor, CorridorBuilder, CorridorId};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::pipeline::{
    AggregationParams, AggregationResult, AggregationSession, Aggregator, ThresholdPolicy,
};
pub use crate::scoring::ExposureScorer;
pub use crate::spatial::{ConnectivityIndex, ConnectivityMode};
