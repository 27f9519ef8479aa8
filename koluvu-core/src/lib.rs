//! Core types for the Koluvu interview setup flow
//!
//! This crate holds the framework-independent pieces of the setup flow: the
//! draft state assembled across the wizard steps, the step wizard state
//! machine, the session handoff that produces the interview room route, and
//! the preference storage boundary.

#![warn(clippy::all)]

pub mod error;
pub mod handoff;
pub mod state;
pub mod storage;
pub mod wizard;

pub use error::SetupError;
pub use handoff::{
    Navigator, RecordingNavigator, RoomRoute, SessionHandoff, SessionIds, DEFAULT_ROOM_PATH,
};
pub use state::{
    Difficulty, InterviewMode, InterviewSetupState, InterviewType, ResumeAttachment,
    ResumeLimits, RoleChoice,
};
pub use storage::{MemoryStore, PreferenceStore, SetupPreferences, PREFERENCES_KEY};
pub use wizard::{SetupStep, SetupWizard, StepProgress, MICROPHONE_REQUIRED_MESSAGE};
