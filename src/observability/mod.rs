//! Observability infrastructure for crash reports and debugging.
//!
//! - **Panic Hook**: structured crash report with context
//! - **Context Tracking**: thread-local aggregation phase, input and mode
//!
//! ```ignore
//! use corridormap::observability::{install_panic_hook, set_phase, AggregationPhase};
//!
//! install_panic_hook();
//! let _phase = set_phase(AggregationPhase::Indexing);
//! ```

pub mod context;
pub mod panic_hook;

pub use context::{
    get_current_context, reset_context, set_current_input, set_mode, set_phase,
    AggregationContext, AggregationPhase, ContextGuard,
};
pub use panic_hook::install_panic_hook;
