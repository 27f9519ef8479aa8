//! Error types for the interview setup flow

use thiserror::Error;

/// Main error type for interview setup operations
#[derive(Error, Debug)]
pub enum SetupError {
    /// Missing configuration error
    #[error("Missing required configuration: {field}")]
    MissingConfiguration {
        /// Missing configuration field
        field: String,
    },

    /// The current step's required fields are not filled in
    #[error("Step {step} is incomplete: {reason}")]
    IncompleteStep {
        /// Step index (1-4) that blocked advancement
        step: u8,
        /// Human-readable reason shown inline by the UI
        reason: String,
    },

    /// A finalize/submit precondition does not hold
    #[error("Precondition failed: {reason}")]
    Precondition {
        /// Reason the precondition failed
        reason: String,
    },

    /// Operation is not valid at the wizard's current position
    #[error("Invalid transition: {operation} at step {step}")]
    InvalidTransition {
        /// Operation that was attempted
        operation: String,
        /// Step index where it was attempted
        step: u8,
    },

    /// Wizard has already been submitted; no further transitions allowed
    #[error("Setup already submitted")]
    AlreadySubmitted,

    /// Attached resume failed validation
    #[error("Invalid resume: {reason}")]
    InvalidResume {
        /// Reason the resume was rejected
        reason: String,
    },

    /// Media capability error surfaced through the setup flow
    #[error("Media error: {reason}")]
    Media {
        /// Reason for the media failure
        reason: String,
    },

    /// Preference storage error
    #[error("Storage error: {reason}")]
    Storage {
        /// Reason for the storage failure
        reason: String,
    },

    /// Navigation to the interview room failed
    #[error("Navigation failed: {reason}")]
    Navigation {
        /// Reason navigation failed
        reason: String,
    },
}

impl SetupError {
    /// Get error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SetupError::MissingConfiguration { .. } => "MISSING_CONFIGURATION",
            SetupError::IncompleteStep { .. } => "INCOMPLETE_STEP",
            SetupError::Precondition { .. } => "PRECONDITION_FAILED",
            SetupError::InvalidTransition { .. } => "INVALID_TRANSITION",
            SetupError::AlreadySubmitted => "ALREADY_SUBMITTED",
            SetupError::InvalidResume { .. } => "INVALID_RESUME",
            SetupError::Media { .. } => "MEDIA_ERROR",
            SetupError::Storage { .. } => "STORAGE_ERROR",
            SetupError::Navigation { .. } => "NAVIGATION_FAILED",
        }
    }

    /// Whether the user can recover by editing the form and retrying
    pub fn is_recoverable(&self) -> bool {
        match self {
            SetupError::IncompleteStep { .. } => true,
            SetupError::Precondition { .. } => true,
            SetupError::InvalidResume { .. } => true,
            SetupError::Media { .. } => true,
            SetupError::MissingConfiguration { .. } => false,
            SetupError::InvalidTransition { .. } => false,
            SetupError::AlreadySubmitted => false,
            SetupError::Storage { .. } => true,
            SetupError::Navigation { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = SetupError::IncompleteStep {
            step: 1,
            reason: "Company is required".to_string(),
        };
        assert_eq!(err.error_code(), "INCOMPLETE_STEP");
        assert!(err.is_recoverable());

        let err = SetupError::AlreadySubmitted;
        assert_eq!(err.error_code(), "ALREADY_SUBMITTED");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = SetupError::Precondition {
            reason: "Microphone access is required for voice interviews".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Precondition failed: Microphone access is required for voice interviews"
        );
    }
}
