//! Setup flow coordination
//!
//! `SetupFlow` wires the wizard, the permission broker, the preview surface,
//! and the session handoff into the single object an embedding shell drives.
//! It keeps the draft's permission flags in sync with the broker before every
//! gated transition, pairs each camera release with a preview detach, and
//! releases everything it holds at submit or teardown.

use crate::config::SetupConfig;
use crate::event::{EventStream, SetupEvent};
use koluvu_core::{
    Difficulty, InterviewMode, InterviewSetupState, InterviewType, Navigator, ResumeAttachment,
    RoleChoice, RoomRoute, SessionHandoff, SessionIds, SetupError, SetupPreferences, SetupStep,
    SetupWizard, PreferenceStore,
};
use koluvu_media::{
    DeviceKind, DeviceProvider, MediaConstraints, PermissionBroker, PreviewSurface,
};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Fluent builder for the setup flow
pub struct SetupFlowBuilder {
    session_id: Option<String>,
    script_id: Option<String>,
    provider: Option<Arc<dyn DeviceProvider>>,
    navigator: Option<Arc<dyn Navigator>>,
    store: Option<Arc<dyn PreferenceStore>>,
    config: SetupConfig,
}

impl SetupFlowBuilder {
    pub(crate) fn new() -> Self {
        Self {
            session_id: None,
            script_id: None,
            provider: None,
            navigator: None,
            store: None,
            config: SetupConfig::default(),
        }
    }

    /// Set the session identifier (required)
    pub fn session_id(mut self, id: &str) -> Self {
        self.session_id = Some(id.to_string());
        self
    }

    /// Set the interview script identifier (required)
    pub fn script_id(mut self, id: &str) -> Self {
        self.script_id = Some(id.to_string());
        self
    }

    /// Set the device provider (required)
    pub fn provider(mut self, provider: Arc<dyn DeviceProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the navigator the flow uses at submit
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Set the preference store for persisted UI preferences
    pub fn preference_store(mut self, store: Arc<dyn PreferenceStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the flow configuration
    pub fn config(mut self, config: SetupConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the flow with the current configuration
    pub fn build(self) -> Result<SetupFlow, SetupError> {
        let session_id = self
            .session_id
            .ok_or_else(|| SetupError::MissingConfiguration {
                field: "session_id".to_string(),
            })?;
        let script_id = self
            .script_id
            .ok_or_else(|| SetupError::MissingConfiguration {
                field: "script_id".to_string(),
            })?;
        let provider = self
            .provider
            .ok_or_else(|| SetupError::MissingConfiguration {
                field: "provider".to_string(),
            })?;

        let mut wizard = SetupWizard::with_limits(self.config.resume_limits.clone());
        wizard.set_interview_mode(self.config.default_mode);

        if let Some(store) = &self.store {
            let prefs = SetupPreferences::load(store.as_ref())?;
            if let Some(mode) = prefs.preferred_mode {
                wizard.set_interview_mode(mode);
            }
        }

        let (event_tx, _) = broadcast::channel(64);
        info!(%session_id, "Setup flow created");

        Ok(SetupFlow {
            wizard,
            broker: PermissionBroker::new(provider),
            preview: PreviewSurface::new(),
            handoff: SessionHandoff::with_room_path(self.config.room_path.clone()),
            ids: SessionIds::new(session_id, script_id),
            navigator: self.navigator,
            store: self.store,
            config: self.config,
            event_tx,
            torn_down: false,
        })
    }
}

/// The interview setup flow: a four-step wizard plus device permissions,
/// ending in a handoff to the interview room
pub struct SetupFlow {
    wizard: SetupWizard,
    broker: PermissionBroker,
    preview: PreviewSurface,
    handoff: SessionHandoff,
    ids: SessionIds,
    navigator: Option<Arc<dyn Navigator>>,
    store: Option<Arc<dyn PreferenceStore>>,
    config: SetupConfig,
    event_tx: broadcast::Sender<SetupEvent>,
    torn_down: bool,
}

impl std::fmt::Debug for SetupFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetupFlow")
            .field("ids", &self.ids)
            .field("config", &self.config)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

impl SetupFlow {
    /// Create a flow builder
    pub fn builder() -> SetupFlowBuilder {
        SetupFlowBuilder::new()
    }

    /// Subscribe to flow events
    pub fn events(&self) -> EventStream {
        EventStream::new(self.event_tx.subscribe())
    }

    /// Current wizard step
    pub fn current_step(&self) -> SetupStep {
        self.wizard.current_step()
    }

    /// Whether the flow has been submitted
    pub fn is_submitted(&self) -> bool {
        self.wizard.is_submitted()
    }

    /// Read access to the draft
    pub fn state(&self) -> &InterviewSetupState {
        self.wizard.state()
    }

    /// The permission broker owning all device handles for this flow
    pub fn broker(&self) -> &PermissionBroker {
        &self.broker
    }

    /// The camera preview surface
    pub fn preview(&self) -> &PreviewSurface {
        &self.preview
    }

    /// Companies matching the typed prefix
    pub fn company_suggestions(&self, prefix: &str) -> Vec<&str> {
        self.config.match_companies(prefix)
    }

    /// Roles matching the typed prefix
    pub fn role_suggestions(&self, prefix: &str) -> Vec<&str> {
        self.config.match_roles(prefix)
    }

    fn emit(&self, event: SetupEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Copy the broker's grant flags into the draft before a gated
    /// transition reads them
    fn sync_permissions(&mut self) {
        self.wizard.set_audio_permission(self.broker.audio_granted());
        self.wizard.set_camera_permission(self.broker.camera_granted());
    }

    /// Keep the preview bound to the camera stream while on the permissions
    /// step, detached everywhere else
    fn refresh_preview(&mut self) {
        if self.wizard.current_step() == SetupStep::Permissions && !self.torn_down {
            self.broker.bind_preview(DeviceKind::Camera, &mut self.preview);
        } else {
            self.preview.detach();
        }
    }

    fn after_step_change(&mut self, from: SetupStep, to: SetupStep) {
        self.refresh_preview();
        if from != to {
            self.emit(SetupEvent::StepChanged { from, to });
        }
    }

    /// Advance one step if the current step validates
    pub fn next(&mut self) -> Result<SetupStep, SetupError> {
        self.sync_permissions();
        let from = self.wizard.current_step();
        let to = self.wizard.next()?;
        self.after_step_change(from, to);
        Ok(to)
    }

    /// Go back one step
    pub fn prev(&mut self) -> Result<SetupStep, SetupError> {
        let from = self.wizard.current_step();
        let to = self.wizard.prev()?;
        self.after_step_change(from, to);
        Ok(to)
    }

    /// Advance one step without validation
    pub fn skip(&mut self) -> Result<SetupStep, SetupError> {
        let from = self.wizard.current_step();
        let to = self.wizard.skip()?;
        self.after_step_change(from, to);
        Ok(to)
    }

    /// Whether the "next" control should be enabled right now
    pub fn can_advance(&mut self) -> bool {
        self.sync_permissions();
        self.wizard.can_advance().is_ok()
    }

    // Draft setters

    /// Set the target company
    pub fn set_desired_company(&mut self, company: &str) {
        self.wizard.set_desired_company(company);
    }

    /// Pick a role from the suggestion list
    pub fn choose_listed_role(&mut self, role: &str) {
        self.wizard.set_role_choice(RoleChoice::Listed(role.to_string()));
    }

    /// Enter a custom role, replacing any listed choice
    pub fn choose_custom_role(&mut self, role: &str) {
        self.wizard.set_role_choice(RoleChoice::Custom(role.to_string()));
    }

    /// Clear the role choice
    pub fn clear_role_choice(&mut self) {
        self.wizard.clear_role_choice();
    }

    /// Set the job role the interview targets
    pub fn set_job_role(&mut self, role: &str) {
        self.wizard.set_job_role(role);
    }

    /// Set the question difficulty
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.wizard.set_difficulty(difficulty);
    }

    /// Set the question kind
    pub fn set_interview_type(&mut self, interview_type: InterviewType) {
        self.wizard.set_interview_type(interview_type);
    }

    /// Set the answer mode and remember it as the preferred mode when a
    /// preference store is attached
    pub fn set_interview_mode(&mut self, mode: InterviewMode) {
        self.wizard.set_interview_mode(mode);

        if let Some(store) = &self.store {
            let result = SetupPreferences::load(store.as_ref()).and_then(|mut prefs| {
                prefs.preferred_mode = Some(mode);
                prefs.save(store.as_ref())
            });
            if let Err(err) = result {
                // Preference persistence is best-effort; the draft already
                // carries the mode.
                warn!(error = %err, "Failed to persist preferred mode");
            }
        }
    }

    /// Attach a resume after validating it against the configured limits
    pub fn attach_resume(&mut self, resume: ResumeAttachment) -> Result<(), SetupError> {
        let file_name = resume.file_name.clone();
        self.wizard.attach_resume(resume)?;
        self.emit(SetupEvent::ResumeAttached { file_name });
        Ok(())
    }

    /// Remove the attached resume
    pub fn clear_resume(&mut self) {
        self.wizard.clear_resume();
        self.emit(SetupEvent::ResumeCleared);
    }

    // Device controls

    /// Request microphone access
    pub async fn enable_microphone(&mut self) -> Result<(), SetupError> {
        self.request_device(DeviceKind::Microphone, MediaConstraints::audio_only())
            .await
    }

    /// Request camera access with the configured video parameters
    pub async fn enable_camera(&mut self) -> Result<(), SetupError> {
        self.request_device(
            DeviceKind::Camera,
            MediaConstraints::camera(self.config.video.clone()),
        )
        .await
    }

    async fn request_device(
        &mut self,
        kind: DeviceKind,
        constraints: MediaConstraints,
    ) -> Result<(), SetupError> {
        let result = self.broker.request_with(kind, constraints).await;
        self.sync_permissions();
        self.refresh_preview();

        match result {
            Ok(()) => {
                self.emit(SetupEvent::PermissionGranted { device: kind });
                Ok(())
            }
            Err(err) => {
                self.emit(SetupEvent::PermissionDenied {
                    device: kind,
                    message: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    /// Turn the microphone off
    pub fn disable_microphone(&mut self) {
        self.release_device(DeviceKind::Microphone);
    }

    /// Turn the camera off; the preview reverts to the placeholder
    pub fn disable_camera(&mut self) {
        self.release_device(DeviceKind::Camera);
    }

    fn release_device(&mut self, kind: DeviceKind) {
        let had_stream = self.broker.has_active_stream(kind);
        self.broker.release(kind);
        self.sync_permissions();
        self.refresh_preview();
        if had_stream {
            self.emit(SetupEvent::StreamReleased { device: kind });
        }
    }

    /// Toggle the camera; returns the grant state after the toggle
    pub async fn toggle_camera(&mut self) -> Result<bool, SetupError> {
        if self.broker.camera_granted() {
            self.disable_camera();
            Ok(false)
        } else {
            self.enable_camera().await?;
            Ok(true)
        }
    }

    /// Submit the wizard and hand off to the interview room.
    ///
    /// Releases every device stream this flow holds before navigating;
    /// the interview room acquires its own streams.
    pub fn submit(&mut self) -> Result<RoomRoute, SetupError> {
        self.sync_permissions();
        let state = self.wizard.submit()?;
        let route = self.handoff.finalize(&state, &self.ids)?;

        self.broker.close();
        self.preview.detach();
        debug!("Setup streams released for handoff");

        if let Some(navigator) = &self.navigator {
            navigator.navigate(&route)?;
        }

        self.emit(SetupEvent::Submitted {
            route: route.clone(),
        });
        Ok(route)
    }

    /// Tear the flow down without submitting, e.g. on navigation away.
    /// Releases all device streams and detaches the preview. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.broker.close();
        self.preview.detach();
        info!("Setup flow torn down");
        self.emit(SetupEvent::TornDown);
    }
}

impl Drop for SetupFlow {
    fn drop(&mut self) {
        // Broker close is idempotent; this only matters when the shell
        // forgot to call teardown.
        self.broker.close();
    }
}
