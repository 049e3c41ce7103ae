use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::phase::AssessmentPhase;

/// What `process_response` hands back to the chat layer after each answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FlowResponse {
    /// Next prompt to show. Empty only once the interview is completed.
    pub next_prompt: String,
    pub phase: AssessmentPhase,
    /// True on the single call that moved the session into `Completed`.
    pub is_complete: bool,
}
