//! Thread-local context tracking for crash reports.
//!
//! Records which aggregation phase is running and which input is being
//! processed. Context is per thread (rayon workers start empty) and guards
//! restore the previous context on drop.

use std::cell::RefCell;
use std::path::PathBuf;

thread_local! {
    static CURRENT_CONTEXT: RefCell<AggregationContext> = const { RefCell::new(AggregationContext::new()) };
}

/// Snapshot of what corridormap was doing.
#[derive(Debug, Clone, Default)]
pub struct AggregationContext {
    pub phase: Option<AggregationPhase>,
    /// Element file being aggregated
    pub current_input: Option<PathBuf>,
    /// Connectivity mode of the current run
    pub mode: Option<String>,
}

impl AggregationContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            current_input: None,
            mode: None,
        }
    }
}

/// Major stages of an aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationPhase {
    /// Reading and validating element input
    InputLoading,
    /// Threshold filtering and geometry screening
    Eligibility,
    /// Building the spatial index and querying connected pairs
    Indexing,
    /// Union-find over connected pairs
    ComponentExtraction,
    /// Merging components into corridors
    CorridorBuilding,
    /// Classifying corridors and selecting interventions
    Classification,
    /// Rendering results
    OutputGeneration,
}

impl std::fmt::Display for AggregationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputLoading => write!(f, "input_loading"),
            Self::Eligibility => write!(f, "eligibility"),
            Self::Indexing => write!(f, "indexing"),
            Self::ComponentExtraction => write!(f, "component_extraction"),
            Self::CorridorBuilding => write!(f, "corridor_building"),
            Self::Classification => write!(f, "classification"),
            Self::OutputGeneration => write!(f, "output_generation"),
        }
    }
}

/// RAII guard for restoring the previous context on drop.
pub struct ContextGuard {
    previous: AggregationContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

fn update(apply: impl FnOnce(&mut AggregationContext)) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        apply(&mut ctx.borrow_mut());
        ContextGuard { previous }
    })
}

/// Set the current phase; the previous phase returns when the guard drops.
///
/// ```ignore
/// let _phase = set_phase(AggregationPhase::Indexing);
/// // ... query the index ...
/// ```
#[must_use]
pub fn set_phase(phase: AggregationPhase) -> ContextGuard {
    update(|ctx| ctx.phase = Some(phase))
}

#[must_use]
pub fn set_current_input(path: impl Into<PathBuf>) -> ContextGuard {
    let path = path.into();
    update(|ctx| ctx.current_input = Some(path))
}

#[must_use]
pub fn set_mode(mode: impl Into<String>) -> ContextGuard {
    let mode = mode.into();
    update(|ctx| ctx.mode = Some(mode))
}

/// Called by the panic hook to include context in crash reports.
#[must_use]
pub fn get_current_context() -> AggregationContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Reset the current thread's context to empty.
pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = AggregationContext::new();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_guard_restores_previous() {
        reset_context();

        let _outer = set_phase(AggregationPhase::Indexing);
        {
            let _inner = set_phase(AggregationPhase::CorridorBuilding);
            assert_eq!(
                get_current_context().phase,
                Some(AggregationPhase::CorridorBuilding)
            );
        }
        assert_eq!(get_current_context().phase, Some(AggregationPhase::Indexing));
    }

    #[test]
    fn test_nested_context_guards() {
        reset_context();

        let _phase = set_phase(AggregationPhase::InputLoading);
        let _input = set_current_input("/data/segments.json");
        let _mode = set_mode("segment");

        let ctx = get_current_context();
        assert_eq!(ctx.phase, Some(AggregationPhase::InputLoading));
        assert_eq!(ctx.current_input, Some(PathBuf::from("/data/segments.json")));
        assert_eq!(ctx.mode.as_deref(), Some("segment"));
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(
            AggregationPhase::ComponentExtraction.to_string(),
            "component_extraction"
        );
        assert_eq!(AggregationPhase::Eligibility.to_string(), "eligibility");
    }

    #[test]
    fn test_empty_context_by_default() {
        reset_context();
        let ctx = get_current_context();
        assert!(ctx.phase.is_none());
        assert!(ctx.current_input.is_none());
    }
}
