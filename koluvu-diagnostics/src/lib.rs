//! Debugging and diagnostic tools for the Koluvu interview setup flow

#![warn(clippy::all)]

pub mod debug_logger;
pub mod flow_analyzer;

pub use debug_logger::DebugLogger;
pub use flow_analyzer::{
    FlowAnalyzer, FlowSummary, PermissionOutcome, PermissionRecord, TransitionRecord,
};
