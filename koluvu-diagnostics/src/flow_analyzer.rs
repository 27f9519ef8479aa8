//! Setup flow analysis
//!
//! Records step transitions and permission outcomes while a setup flow runs
//! so support tooling can see where candidates get stuck.

use chrono::{DateTime, Utc};
use koluvu_core::SetupStep;
use koluvu_media::DeviceKind;
use serde::Serialize;

/// One recorded step transition
#[derive(Debug, Clone, Serialize)]
pub struct TransitionRecord {
    /// Step before the transition
    pub from: SetupStep,
    /// Step after the transition
    pub to: SetupStep,
    /// When the transition happened
    pub at: DateTime<Utc>,
}

/// Result of one permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionOutcome {
    /// The device stream was acquired
    Granted,
    /// The request was denied or the hardware was missing
    Denied,
}

/// One recorded permission request
#[derive(Debug, Clone, Serialize)]
pub struct PermissionRecord {
    /// Device that was requested
    pub device: DeviceKind,
    /// How the request ended
    pub outcome: PermissionOutcome,
    /// When the request resolved
    pub at: DateTime<Utc>,
}

/// Aggregate statistics over a recorded flow
#[derive(Debug, Clone, Serialize)]
pub struct FlowSummary {
    /// Total recorded transitions
    pub transitions: usize,
    /// Transitions that moved backwards
    pub backtracks: usize,
    /// Total permission requests
    pub permission_requests: usize,
    /// Requests that ended in denial
    pub denials: usize,
    /// Denials as a fraction of requests; 0.0 when none were made
    pub denial_rate: f32,
}

/// Records what happened during one setup flow run
#[derive(Debug, Clone, Serialize)]
pub struct FlowAnalyzer {
    started_at: DateTime<Utc>,
    transitions: Vec<TransitionRecord>,
    permissions: Vec<PermissionRecord>,
}

impl Default for FlowAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowAnalyzer {
    /// Start recording now
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            transitions: Vec::new(),
            permissions: Vec::new(),
        }
    }

    /// Record a step transition
    pub fn record_transition(&mut self, from: SetupStep, to: SetupStep) {
        self.transitions.push(TransitionRecord {
            from,
            to,
            at: Utc::now(),
        });
    }

    /// Record a resolved permission request
    pub fn record_permission(&mut self, device: DeviceKind, outcome: PermissionOutcome) {
        self.permissions.push(PermissionRecord {
            device,
            outcome,
            at: Utc::now(),
        });
    }

    /// Recorded transitions, in order
    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    /// Recorded permission requests, in order
    pub fn permissions(&self) -> &[PermissionRecord] {
        &self.permissions
    }

    /// Aggregate statistics over everything recorded so far
    pub fn summary(&self) -> FlowSummary {
        let backtracks = self
            .transitions
            .iter()
            .filter(|record| record.to.index() < record.from.index())
            .count();
        let denials = self
            .permissions
            .iter()
            .filter(|record| record.outcome == PermissionOutcome::Denied)
            .count();
        let requests = self.permissions.len();

        FlowSummary {
            transitions: self.transitions.len(),
            backtracks,
            permission_requests: requests,
            denials,
            denial_rate: if requests == 0 {
                0.0
            } else {
                denials as f32 / requests as f32
            },
        }
    }

    /// Export the full record as pretty-printed JSON
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
