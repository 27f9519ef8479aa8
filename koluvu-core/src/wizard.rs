//! Step wizard controller
//!
//! Drives the ordered four-step setup sequence and gates advancement on
//! per-step validity. States are the four steps plus a terminal submitted
//! state reached only via `submit()`. All transitions are synchronous and
//! user-triggered; there are no timeouts.

use crate::error::SetupError;
use crate::state::{
    InterviewMode, InterviewSetupState, ResumeAttachment, ResumeLimits, RoleChoice,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inline message shown when voice mode lacks a microphone grant
pub const MICROPHONE_REQUIRED_MESSAGE: &str =
    "Microphone access is required for voice interviews";

/// One of the four setup steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupStep {
    /// Step 1: target company and role
    CompanyRole,
    /// Step 2: resume upload (skippable)
    Resume,
    /// Step 3: device permissions
    Permissions,
    /// Step 4: interview settings and review
    Settings,
}

impl SetupStep {
    /// 1-based step index
    pub fn index(self) -> u8 {
        match self {
            SetupStep::CompanyRole => 1,
            SetupStep::Resume => 2,
            SetupStep::Permissions => 3,
            SetupStep::Settings => 4,
        }
    }

    /// First step of the sequence
    pub fn first() -> Self {
        SetupStep::CompanyRole
    }

    /// Last step of the sequence
    pub fn last() -> Self {
        SetupStep::Settings
    }

    fn succ(self) -> Option<Self> {
        match self {
            SetupStep::CompanyRole => Some(SetupStep::Resume),
            SetupStep::Resume => Some(SetupStep::Permissions),
            SetupStep::Permissions => Some(SetupStep::Settings),
            SetupStep::Settings => None,
        }
    }

    fn pred(self) -> Option<Self> {
        match self {
            SetupStep::CompanyRole => None,
            SetupStep::Resume => Some(SetupStep::CompanyRole),
            SetupStep::Permissions => Some(SetupStep::Resume),
            SetupStep::Settings => Some(SetupStep::Permissions),
        }
    }
}

/// Position within the wizard, including the terminal submitted state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepProgress {
    /// Current step
    pub current: SetupStep,
    /// Whether `submit()` has completed
    pub submitted: bool,
}

impl Default for StepProgress {
    fn default() -> Self {
        Self {
            current: SetupStep::first(),
            submitted: false,
        }
    }
}

/// The step wizard: owns the draft state and the current position
#[derive(Debug, Clone)]
pub struct SetupWizard {
    state: InterviewSetupState,
    progress: StepProgress,
    resume_limits: ResumeLimits,
}

impl Default for SetupWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupWizard {
    /// Create a wizard at step 1 with an empty draft and default limits
    pub fn new() -> Self {
        Self::with_limits(ResumeLimits::default())
    }

    /// Create a wizard with explicit resume limits
    pub fn with_limits(resume_limits: ResumeLimits) -> Self {
        Self {
            state: InterviewSetupState::new(),
            progress: StepProgress::default(),
            resume_limits,
        }
    }

    /// Current step
    pub fn current_step(&self) -> SetupStep {
        self.progress.current
    }

    /// Whether the wizard has reached the terminal submitted state
    pub fn is_submitted(&self) -> bool {
        self.progress.submitted
    }

    /// Read access to the draft
    pub fn state(&self) -> &InterviewSetupState {
        &self.state
    }

    /// Check that the current step's required fields are filled in.
    /// The UI uses this to disable the "next" control proactively.
    pub fn can_advance(&self) -> Result<(), SetupError> {
        match self.progress.current {
            SetupStep::CompanyRole => {
                if self.state.desired_company.trim().is_empty() {
                    return Err(SetupError::IncompleteStep {
                        step: 1,
                        reason: "Desired company is required".to_string(),
                    });
                }
                if self.state.desired_role().is_none() {
                    return Err(SetupError::IncompleteStep {
                        step: 1,
                        reason: "Select a role or enter a custom one".to_string(),
                    });
                }
                Ok(())
            }
            // Resume is always skippable; nothing required.
            SetupStep::Resume => Ok(()),
            SetupStep::Permissions => {
                if !self.state.permissions_satisfied() {
                    return Err(SetupError::IncompleteStep {
                        step: 3,
                        reason: MICROPHONE_REQUIRED_MESSAGE.to_string(),
                    });
                }
                Ok(())
            }
            SetupStep::Settings => Ok(()),
        }
    }

    /// Advance one step if the current step validates. Leaves the position
    /// unchanged on failure and returns the blocking error for inline display.
    pub fn next(&mut self) -> Result<SetupStep, SetupError> {
        self.reject_if_submitted("next")?;
        self.can_advance()?;

        if let Some(step) = self.progress.current.succ() {
            debug!(
                from = self.progress.current.index(),
                to = step.index(),
                "Wizard advanced"
            );
            self.progress.current = step;
        }
        Ok(self.progress.current)
    }

    /// Go back one step. No validation for backward movement; a no-op at
    /// step 1.
    pub fn prev(&mut self) -> Result<SetupStep, SetupError> {
        self.reject_if_submitted("prev")?;

        if let Some(step) = self.progress.current.pred() {
            debug!(
                from = self.progress.current.index(),
                to = step.index(),
                "Wizard went back"
            );
            self.progress.current = step;
        }
        Ok(self.progress.current)
    }

    /// Advance one step without validation. The escape hatch that keeps
    /// users from ever being blocked; a no-op at step 4.
    pub fn skip(&mut self) -> Result<SetupStep, SetupError> {
        self.reject_if_submitted("skip")?;

        if let Some(step) = self.progress.current.succ() {
            debug!(
                from = self.progress.current.index(),
                to = step.index(),
                "Wizard step skipped"
            );
            self.progress.current = step;
        }
        Ok(self.progress.current)
    }

    /// Finish the wizard. Valid only at step 4, and blocked when voice mode
    /// lacks a microphone grant. Returns the assembled draft and moves the
    /// wizard to its terminal state.
    pub fn submit(&mut self) -> Result<InterviewSetupState, SetupError> {
        self.reject_if_submitted("submit")?;

        if self.progress.current != SetupStep::last() {
            return Err(SetupError::InvalidTransition {
                operation: "submit".to_string(),
                step: self.progress.current.index(),
            });
        }
        if !self.state.permissions_satisfied() {
            return Err(SetupError::Precondition {
                reason: MICROPHONE_REQUIRED_MESSAGE.to_string(),
            });
        }

        self.progress.submitted = true;
        debug!("Wizard submitted");
        Ok(self.state.clone())
    }

    fn reject_if_submitted(&self, operation: &str) -> Result<(), SetupError> {
        if self.progress.submitted {
            debug!(operation, "Transition rejected after submit");
            return Err(SetupError::AlreadySubmitted);
        }
        Ok(())
    }

    // Step 1 setters

    /// Set the target company
    pub fn set_desired_company(&mut self, company: impl Into<String>) {
        self.state.desired_company = company.into();
    }

    /// Set the desired role, listed or custom. Replaces any previous choice.
    pub fn set_role_choice(&mut self, choice: RoleChoice) {
        self.state.role_choice = Some(choice);
    }

    /// Clear the role choice
    pub fn clear_role_choice(&mut self) {
        self.state.role_choice = None;
    }

    // Step 2 setters

    /// Attach a resume after validating it against the configured limits
    pub fn attach_resume(&mut self, resume: ResumeAttachment) -> Result<(), SetupError> {
        resume.validate(&self.resume_limits)?;
        self.state.resume = Some(resume);
        Ok(())
    }

    /// Remove the attached resume
    pub fn clear_resume(&mut self) {
        self.state.resume = None;
    }

    // Step 3 setters, fed from the permission broker

    /// Record the last-known microphone grant state
    pub fn set_audio_permission(&mut self, granted: bool) {
        self.state.audio_permission = granted;
    }

    /// Record the last-known camera grant state
    pub fn set_camera_permission(&mut self, granted: bool) {
        self.state.camera_permission = granted;
    }

    /// Set the answer mode
    pub fn set_interview_mode(&mut self, mode: InterviewMode) {
        self.state.interview_mode = mode;
    }

    // Step 4 setters

    /// Set the job role the interview targets
    pub fn set_job_role(&mut self, role: impl Into<String>) {
        self.state.job_role = role.into();
    }

    /// Set the question difficulty
    pub fn set_difficulty(&mut self, difficulty: crate::state::Difficulty) {
        self.state.difficulty = difficulty;
    }

    /// Set the question kind
    pub fn set_interview_type(&mut self, interview_type: crate::state::InterviewType) {
        self.state.interview_type = interview_type;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        assert_eq!(SetupStep::first().index(), 1);
        assert_eq!(SetupStep::last().index(), 4);
        assert_eq!(SetupStep::CompanyRole.succ(), Some(SetupStep::Resume));
        assert_eq!(SetupStep::Settings.succ(), None);
        assert_eq!(SetupStep::CompanyRole.pred(), None);
    }

    #[test]
    fn test_prev_is_noop_at_first_step() {
        let mut wizard = SetupWizard::new();
        assert_eq!(wizard.prev().unwrap(), SetupStep::CompanyRole);
        assert_eq!(wizard.current_step(), SetupStep::CompanyRole);
    }

    #[test]
    fn test_skip_stops_at_last_step() {
        let mut wizard = SetupWizard::new();
        wizard.skip().unwrap();
        wizard.skip().unwrap();
        wizard.skip().unwrap();
        assert_eq!(wizard.current_step(), SetupStep::Settings);
        assert_eq!(wizard.skip().unwrap(), SetupStep::Settings);
    }
}
