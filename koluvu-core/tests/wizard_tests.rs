//! Unit tests for the step wizard state machine
//!
//! Covers step gating, skip/back navigation, and the terminal submitted
//! state.

use koluvu_core::*;

fn filled_company_step(wizard: &mut SetupWizard) {
    wizard.set_desired_company("Google");
    wizard.set_role_choice(RoleChoice::Listed("Software Engineer".to_string()));
}

// ============================================================================
// STEP GATING TESTS
// ============================================================================

#[test]
fn test_next_blocked_without_company() {
    let mut wizard = SetupWizard::new();

    let err = wizard.next().unwrap_err();
    assert_eq!(err.error_code(), "INCOMPLETE_STEP");
    assert_eq!(wizard.current_step(), SetupStep::CompanyRole);
}

#[test]
fn test_next_blocked_with_empty_custom_role() {
    let mut wizard = SetupWizard::new();
    wizard.set_desired_company("Google");
    wizard.set_role_choice(RoleChoice::Custom("  ".to_string()));

    assert!(wizard.next().is_err());
    assert_eq!(wizard.current_step(), SetupStep::CompanyRole);
}

#[test]
fn test_next_advances_with_company_and_role() {
    let mut wizard = SetupWizard::new();
    filled_company_step(&mut wizard);

    assert_eq!(wizard.next().unwrap(), SetupStep::Resume);
    assert_eq!(wizard.current_step(), SetupStep::Resume);
}

#[test]
fn test_custom_role_also_satisfies_step_one() {
    let mut wizard = SetupWizard::new();
    wizard.set_desired_company("Startup XYZ");
    wizard.set_role_choice(RoleChoice::Custom("Platform Engineer".to_string()));

    assert!(wizard.next().is_ok());
}

#[test]
fn test_voice_mode_gates_permissions_step() {
    let mut wizard = SetupWizard::new();
    filled_company_step(&mut wizard);
    wizard.set_interview_mode(InterviewMode::Voice);
    wizard.next().unwrap();
    wizard.skip().unwrap(); // skip resume

    assert_eq!(wizard.current_step(), SetupStep::Permissions);

    // Denied microphone blocks advancement with the inline message
    let err = wizard.next().unwrap_err();
    assert_eq!(wizard.current_step(), SetupStep::Permissions);
    assert!(err.to_string().contains(MICROPHONE_REQUIRED_MESSAGE));

    // Granting the microphone unblocks it
    wizard.set_audio_permission(true);
    assert_eq!(wizard.next().unwrap(), SetupStep::Settings);
}

#[test]
fn test_text_mode_does_not_require_microphone() {
    let mut wizard = SetupWizard::new();
    filled_company_step(&mut wizard);
    wizard.set_interview_mode(InterviewMode::Text);
    wizard.next().unwrap();
    wizard.next().unwrap();

    assert_eq!(wizard.next().unwrap(), SetupStep::Settings);
}

// ============================================================================
// NAVIGATION BOUNDS TESTS
// ============================================================================

#[test]
fn test_steps_stay_within_bounds() {
    let mut wizard = SetupWizard::new();

    // prev at step 1 is a no-op
    assert_eq!(wizard.prev().unwrap(), SetupStep::CompanyRole);

    // skip bypasses validation all the way to step 4 and no further
    for _ in 0..6 {
        wizard.skip().unwrap();
    }
    assert_eq!(wizard.current_step(), SetupStep::Settings);
    assert_eq!(wizard.current_step().index(), 4);
}

#[test]
fn test_skip_resume_leaves_draft_without_resume() {
    let mut wizard = SetupWizard::new();
    filled_company_step(&mut wizard);
    wizard.next().unwrap();

    assert_eq!(wizard.current_step(), SetupStep::Resume);
    wizard.skip().unwrap();
    assert_eq!(wizard.current_step(), SetupStep::Permissions);
    assert!(wizard.state().resume.is_none());
}

#[test]
fn test_back_then_forward_traversal() {
    let mut wizard = SetupWizard::new();
    filled_company_step(&mut wizard);
    wizard.next().unwrap();
    wizard.next().unwrap();

    assert_eq!(wizard.prev().unwrap(), SetupStep::Resume);
    assert_eq!(wizard.prev().unwrap(), SetupStep::CompanyRole);
    assert_eq!(wizard.next().unwrap(), SetupStep::Resume);
}

// ============================================================================
// SUBMIT TESTS
// ============================================================================

#[test]
fn test_submit_rejected_before_last_step() {
    let mut wizard = SetupWizard::new();

    let err = wizard.submit().unwrap_err();
    assert_eq!(err.error_code(), "INVALID_TRANSITION");
    assert!(!wizard.is_submitted());
}

#[test]
fn test_submit_blocked_for_voice_without_microphone() {
    let mut wizard = SetupWizard::new();
    wizard.set_interview_mode(InterviewMode::Voice);
    for _ in 0..3 {
        wizard.skip().unwrap();
    }

    let err = wizard.submit().unwrap_err();
    assert_eq!(err.error_code(), "PRECONDITION_FAILED");
    assert!(!wizard.is_submitted());
}

#[test]
fn test_submit_returns_assembled_state() {
    let mut wizard = SetupWizard::new();
    filled_company_step(&mut wizard);
    wizard.set_job_role("Backend Developer");
    wizard.set_difficulty(Difficulty::Hard);
    wizard.set_interview_type(InterviewType::Technical);
    wizard.set_interview_mode(InterviewMode::Voice);
    wizard.set_audio_permission(true);
    for _ in 0..3 {
        wizard.next().unwrap();
    }

    let state = wizard.submit().unwrap();
    assert!(wizard.is_submitted());
    assert_eq!(state.desired_company, "Google");
    assert_eq!(state.desired_role(), Some("Software Engineer"));
    assert_eq!(state.difficulty, Difficulty::Hard);
    assert_eq!(state.job_role, "Backend Developer");
}

#[test]
fn test_terminal_state_rejects_all_transitions() {
    let mut wizard = SetupWizard::new();
    wizard.set_interview_mode(InterviewMode::Text);
    for _ in 0..3 {
        wizard.skip().unwrap();
    }
    wizard.submit().unwrap();

    assert!(matches!(wizard.next(), Err(SetupError::AlreadySubmitted)));
    assert!(matches!(wizard.prev(), Err(SetupError::AlreadySubmitted)));
    assert!(matches!(wizard.skip(), Err(SetupError::AlreadySubmitted)));
    assert!(matches!(wizard.submit(), Err(SetupError::AlreadySubmitted)));
}

// ============================================================================
// RESUME ATTACHMENT TESTS
// ============================================================================

#[test]
fn test_attach_resume_respects_limits() {
    let mut wizard = SetupWizard::with_limits(ResumeLimits {
        max_size_bytes: 1024,
        allowed_extensions: vec!["pdf".to_string()],
    });

    let too_big = ResumeAttachment {
        file_name: "resume.pdf".to_string(),
        size_bytes: 2048,
        mime_type: None,
    };
    assert!(wizard.attach_resume(too_big).is_err());
    assert!(wizard.state().resume.is_none());

    let ok = ResumeAttachment {
        file_name: "resume.pdf".to_string(),
        size_bytes: 512,
        mime_type: Some("application/pdf".to_string()),
    };
    wizard.attach_resume(ok).unwrap();
    assert!(wizard.state().resume.is_some());

    wizard.clear_resume();
    assert!(wizard.state().resume.is_none());
}
