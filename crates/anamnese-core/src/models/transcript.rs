use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::phase::AssessmentPhase;

/// A single turn of the interview, kept alongside the assessment so the
/// conversation is traceable after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TranscriptEntry {
    pub role: TranscriptRole,
    pub content: String,
    /// Phase the session was in when this turn was produced.
    pub phase: AssessmentPhase,
    pub timestamp: jiff::Timestamp,
}

/// Who produced a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TranscriptRole {
    Patient,
    Assistant,
}
