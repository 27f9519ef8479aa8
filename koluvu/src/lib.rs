//! # Koluvu Interview Setup
//!
//! Headless implementation of the Koluvu job portal's interview session
//! setup flow: a four-step wizard (company/role, resume, permissions,
//! settings), a permission broker owning all camera/microphone handles for
//! the page, a live device preview binding, and the handoff that carries the
//! collected configuration into the interview room.
//!
//! The crate is UI-framework agnostic. The embedding shell renders the
//! controls, supplies a [`DeviceProvider`] for real device access, and
//! drives [`SetupFlow`]; everything else - step gating, permission state,
//! stream ownership, route assembly - lives here and is testable with the
//! bundled [`MockDeviceProvider`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use koluvu::{MockDeviceProvider, SetupFlow};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut flow = SetupFlow::builder()
//!         .session_id("sess-1")
//!         .script_id("script-1")
//!         .provider(Arc::new(MockDeviceProvider::new()))
//!         .build()?;
//!
//!     // Step 1: company and role
//!     flow.set_desired_company("Google");
//!     flow.choose_listed_role("Software Engineer");
//!     flow.next()?;
//!
//!     // Step 2: resume is skippable
//!     flow.skip()?;
//!
//!     // Step 3: voice interviews need the microphone
//!     flow.enable_microphone().await?;
//!     flow.next()?;
//!
//!     // Step 4: submit and get the interview room route
//!     let route = flow.submit()?;
//!     println!("navigate to {} with {:?}", route.path, route.query_pairs());
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export core types for easy access
pub use koluvu_core::{
    Difficulty, InterviewMode, InterviewSetupState, InterviewType, MemoryStore, Navigator,
    PreferenceStore, RecordingNavigator, ResumeAttachment, ResumeLimits, RoleChoice, RoomRoute,
    SessionHandoff, SessionIds, SetupError, SetupPreferences, SetupStep, SetupWizard,
    StepProgress, DEFAULT_ROOM_PATH, MICROPHONE_REQUIRED_MESSAGE, PREFERENCES_KEY,
};

pub use koluvu_media::{
    BrokerEvent, DeviceKind, DeviceProvider, FacingMode, MediaConstraints, MediaError,
    MockDeviceProvider, MockOutcome, PermissionBroker, PreviewSource, PreviewSurface,
    StreamHandle, VideoConstraints,
};

#[cfg(feature = "diagnostics")]
pub use koluvu_diagnostics::{DebugLogger, FlowAnalyzer, FlowSummary, PermissionOutcome};

// Public API modules
pub mod config;
pub mod event;
pub mod flow;

// Re-export main API types
pub use config::SetupConfig;
pub use event::{EventStream, SetupEvent};
pub use flow::{SetupFlow, SetupFlowBuilder};
