use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::assessment::AssessmentData;
use super::transcript::TranscriptEntry;
use crate::error::CoreError;

/// Snapshot of a finished interview, handed to persistence and export once
/// the engine reports completion.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentRecord {
    pub session_id: Uuid,
    pub user_id: String,
    pub script_id: String,
    pub data: AssessmentData,
    /// The consensus report text as it was (or would be) shown to the patient.
    pub consensus_report: String,
    pub transcript: Vec<TranscriptEntry>,
    pub started_at: jiff::Timestamp,
    pub completed_at: jiff::Timestamp,
}

impl AssessmentRecord {
    pub fn to_json(&self) -> Result<Vec<u8>, CoreError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, CoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
