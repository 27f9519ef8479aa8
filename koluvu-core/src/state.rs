//! Setup draft state and field types
//!
//! `InterviewSetupState` is the wizard's working data. It is created empty
//! when the flow is constructed, mutated by step setters, and handed off by
//! value at submit. It is never persisted.

use crate::error::SetupError;
use serde::{Deserialize, Serialize};

/// Interview difficulty preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Entry-level questions
    Easy,
    /// Standard interview depth
    Medium,
    /// Senior-level questions
    Hard,
}

impl Difficulty {
    /// String form used in route parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

/// Kind of interview questions asked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewType {
    /// Technical questions only
    Technical,
    /// Behavioral questions only
    Behavioral,
    /// Both technical and behavioral
    Mixed,
}

impl InterviewType {
    /// String form used in route parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewType::Technical => "technical",
            InterviewType::Behavioral => "behavioral",
            InterviewType::Mixed => "mixed",
        }
    }
}

impl Default for InterviewType {
    fn default() -> Self {
        InterviewType::Mixed
    }
}

/// How the candidate answers: spoken or typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewMode {
    /// Spoken answers; requires microphone permission
    Voice,
    /// Typed answers; no device requirements
    Text,
}

impl InterviewMode {
    /// String form used in route parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewMode::Voice => "voice",
            InterviewMode::Text => "text",
        }
    }
}

impl Default for InterviewMode {
    fn default() -> Self {
        InterviewMode::Voice
    }
}

/// Desired role, either picked from the suggestion list or typed freely.
///
/// A tagged variant instead of two parallel string fields plus a toggle, so
/// the two inputs can never be simultaneously stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum RoleChoice {
    /// Role selected from the suggestion list
    Listed(String),
    /// Free-text role typed by the user
    Custom(String),
}

impl RoleChoice {
    /// The role text regardless of how it was entered
    pub fn as_str(&self) -> &str {
        match self {
            RoleChoice::Listed(role) | RoleChoice::Custom(role) => role,
        }
    }

    /// True when the role text is empty or whitespace
    pub fn is_empty(&self) -> bool {
        self.as_str().trim().is_empty()
    }
}

/// Limits applied to an attached resume.
///
/// A file-picker `accept` filter is advisory only, so the limits are
/// enforced here as well.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeLimits {
    /// Maximum file size in bytes
    pub max_size_bytes: u64,
    /// Allowed file extensions (lowercase, no dot)
    pub allowed_extensions: Vec<String>,
}

impl Default for ResumeLimits {
    fn default() -> Self {
        Self {
            max_size_bytes: 5 * 1024 * 1024,
            allowed_extensions: vec![
                "pdf".to_string(),
                "doc".to_string(),
                "docx".to_string(),
            ],
        }
    }
}

/// Opaque reference to a resume file picked by the embedding shell.
///
/// Only the name and size are retained; the file contents stay with the
/// shell's file handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeAttachment {
    /// File name as reported by the picker
    pub file_name: String,
    /// File size in bytes
    pub size_bytes: u64,
    /// MIME type if the picker reported one
    pub mime_type: Option<String>,
}

impl ResumeAttachment {
    /// Lowercase file extension, if any
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }

    /// Validate the attachment against the configured limits
    pub fn validate(&self, limits: &ResumeLimits) -> Result<(), SetupError> {
        if self.size_bytes > limits.max_size_bytes {
            return Err(SetupError::InvalidResume {
                reason: format!(
                    "File is {} bytes, maximum is {} bytes",
                    self.size_bytes, limits.max_size_bytes
                ),
            });
        }

        let ext = self.extension().ok_or_else(|| SetupError::InvalidResume {
            reason: format!("File '{}' has no extension", self.file_name),
        })?;

        if !limits.allowed_extensions.iter().any(|allowed| *allowed == ext) {
            return Err(SetupError::InvalidResume {
                reason: format!(
                    "File type '.{}' is not allowed (expected one of: {})",
                    ext,
                    limits.allowed_extensions.join(", ")
                ),
            });
        }

        Ok(())
    }
}

/// The wizard's working data, assembled across the four steps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterviewSetupState {
    /// Job role the interview targets
    pub job_role: String,
    /// Question difficulty
    pub difficulty: Difficulty,
    /// Question kind
    pub interview_type: InterviewType,
    /// Answer mode
    pub interview_mode: InterviewMode,
    /// Company the candidate is targeting
    pub desired_company: String,
    /// Desired role, listed or custom
    pub role_choice: Option<RoleChoice>,
    /// Attached resume reference, if any
    pub resume: Option<ResumeAttachment>,
    /// Last-known microphone grant state; not persisted across sessions
    pub audio_permission: bool,
    /// Last-known camera grant state; not persisted across sessions
    pub camera_permission: bool,
}

impl InterviewSetupState {
    /// Create an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Role text from whichever variant is set, if non-empty
    pub fn desired_role(&self) -> Option<&str> {
        self.role_choice
            .as_ref()
            .filter(|choice| !choice.is_empty())
            .map(|choice| choice.as_str())
    }

    /// True when the company/role step has everything it needs
    pub fn company_step_complete(&self) -> bool {
        !self.desired_company.trim().is_empty() && self.desired_role().is_some()
    }

    /// True when the selected mode's device requirements are met.
    /// Voice needs a microphone grant; camera is always optional.
    pub fn permissions_satisfied(&self) -> bool {
        match self.interview_mode {
            InterviewMode::Voice => self.audio_permission,
            InterviewMode::Text => true,
        }
    }
}
