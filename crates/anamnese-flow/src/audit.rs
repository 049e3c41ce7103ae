use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// A structured audit event for interview lifecycle actions.
///
/// Logged via `tracing`; never carries the patient's answers, only ids and
/// counters.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: String,
    pub user_id: String,
    pub session_id: Uuid,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: impl Into<String>, user_id: impl Into<String>, session_id: Uuid) -> Self {
        Self {
            action: action.into(),
            user_id: user_id.into(),
            session_id,
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            audit.action = %self.action,
            audit.user_id = %self.user_id,
            audit.session_id = %self.session_id,
            audit.details = %details,
            "audit event"
        );
    }
}
