//! Session handoff
//!
//! Converts a completed `InterviewSetupState` into the route the interview
//! room expects and hands navigation to the embedding shell. The session and
//! script identifiers are opaque and supplied externally; this flow never
//! generates them.

use crate::error::SetupError;
use crate::state::InterviewSetupState;
use crate::wizard::MICROPHONE_REQUIRED_MESSAGE;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default route path of the interview room view
pub const DEFAULT_ROOM_PATH: &str = "/interview/room";

/// Opaque identifiers for the downstream interview session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIds {
    /// Session identifier supplied by the backend
    pub session_id: String,
    /// Interview script identifier supplied by the backend
    pub script_id: String,
}

impl SessionIds {
    /// Create a new identifier pair
    pub fn new(session_id: impl Into<String>, script_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            script_id: script_id.into(),
        }
    }
}

/// Navigation target carrying the assembled setup fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRoute {
    /// Route path
    pub path: String,
    /// Session identifier
    pub session_id: String,
    /// Script identifier
    pub script_id: String,
    /// Job role the interview targets
    pub job_role: String,
    /// Question difficulty
    pub difficulty: String,
    /// Question kind
    pub interview_type: String,
    /// Answer mode
    pub interview_mode: String,
    /// Target company
    pub desired_company: String,
    /// Desired role text
    pub desired_role: String,
    /// Attached resume file name, absent when the step was skipped
    pub resume: Option<String>,
}

impl RoomRoute {
    /// Ordered key/value pairs for the embedding shell to encode into the
    /// room URL. Keys are stable; the `resume` pair is omitted when no file
    /// was attached.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("sessionId", self.session_id.clone()),
            ("scriptId", self.script_id.clone()),
            ("jobRole", self.job_role.clone()),
            ("difficulty", self.difficulty.clone()),
            ("interviewType", self.interview_type.clone()),
            ("interviewMode", self.interview_mode.clone()),
            ("desiredCompany", self.desired_company.clone()),
            ("desiredRole", self.desired_role.clone()),
        ];
        if let Some(resume) = &self.resume {
            pairs.push(("resume", resume.clone()));
        }
        pairs
    }
}

/// Seam for the embedding shell to perform the actual route change
pub trait Navigator: Send + Sync {
    /// Navigate to the given route
    fn navigate(&self, route: &RoomRoute) -> Result<(), SetupError>;
}

/// Test double that records every route it was asked to navigate to
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: parking_lot::Mutex<Vec<RoomRoute>>,
}

impl RecordingNavigator {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes navigated to so far, in order
    pub fn routes(&self) -> Vec<RoomRoute> {
        self.routes.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &RoomRoute) -> Result<(), SetupError> {
        self.routes.lock().push(route.clone());
        Ok(())
    }
}

/// Builds the interview room route from a completed draft
#[derive(Debug, Clone)]
pub struct SessionHandoff {
    room_path: String,
}

impl Default for SessionHandoff {
    fn default() -> Self {
        Self {
            room_path: DEFAULT_ROOM_PATH.to_string(),
        }
    }
}

impl SessionHandoff {
    /// Handoff targeting the default room path
    pub fn new() -> Self {
        Self::default()
    }

    /// Handoff targeting a custom room path
    pub fn with_room_path(room_path: impl Into<String>) -> Self {
        Self {
            room_path: room_path.into(),
        }
    }

    /// Assemble the room route from the completed draft.
    ///
    /// Re-checks the voice-mode precondition so a caller bypassing the
    /// wizard still cannot hand off without a microphone grant. Stream
    /// release is coordinated by the flow that owns the broker.
    pub fn finalize(
        &self,
        state: &InterviewSetupState,
        ids: &SessionIds,
    ) -> Result<RoomRoute, SetupError> {
        if !state.permissions_satisfied() {
            return Err(SetupError::Precondition {
                reason: MICROPHONE_REQUIRED_MESSAGE.to_string(),
            });
        }

        let route = RoomRoute {
            path: self.room_path.clone(),
            session_id: ids.session_id.clone(),
            script_id: ids.script_id.clone(),
            job_role: state.job_role.clone(),
            difficulty: state.difficulty.as_str().to_string(),
            interview_type: state.interview_type.as_str().to_string(),
            interview_mode: state.interview_mode.as_str().to_string(),
            desired_company: state.desired_company.clone(),
            desired_role: state.desired_role().unwrap_or_default().to_string(),
            resume: state.resume.as_ref().map(|r| r.file_name.clone()),
        };

        info!(
            session_id = %route.session_id,
            mode = %route.interview_mode,
            "Session handoff finalized"
        );
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{InterviewMode, RoleChoice};

    fn voice_ready_state() -> InterviewSetupState {
        let mut state = InterviewSetupState::new();
        state.desired_company = "Google".to_string();
        state.role_choice = Some(RoleChoice::Listed("Software Engineer".to_string()));
        state.interview_mode = InterviewMode::Voice;
        state.audio_permission = true;
        state
    }

    #[test]
    fn test_finalize_blocked_without_microphone() {
        let mut state = voice_ready_state();
        state.audio_permission = false;

        let handoff = SessionHandoff::new();
        let err = handoff
            .finalize(&state, &SessionIds::new("s-1", "scr-1"))
            .unwrap_err();
        assert_eq!(err.error_code(), "PRECONDITION_FAILED");
    }

    #[test]
    fn test_query_pairs_omit_resume_when_skipped() {
        let state = voice_ready_state();
        let handoff = SessionHandoff::new();
        let route = handoff
            .finalize(&state, &SessionIds::new("s-1", "scr-1"))
            .unwrap();

        let pairs = route.query_pairs();
        assert!(pairs.iter().all(|(key, _)| *key != "resume"));
        assert!(pairs.contains(&("sessionId", "s-1".to_string())));
        assert!(pairs.contains(&("desiredCompany", "Google".to_string())));
        assert!(pairs.contains(&("interviewMode", "voice".to_string())));
    }
}
