use serde::{Deserialize, Serialize};
use ts_rs::TS;

use anamnese_core::models::assessment::{ListField, TextField};
use anamnese_core::models::phase::{AssessmentPhase, SubFlow};

/// How a phase consumes the patient's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "field", rename_all = "snake_case")]
#[ts(export)]
pub enum PhaseKind {
    /// One answer, then move on.
    Single,
    /// Keep appending to a list until the patient signals there is nothing more.
    RepeatableList(ListField),
    /// Run a nested question sequence.
    SubFlow(SubFlow),
}

/// Declarative description of one top-level phase.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PhaseSpec {
    pub phase: AssessmentPhase,
    pub kind: PhaseKind,
    /// Prompt shown when the phase is entered. For sub-flow phases this is
    /// an introduction prepended to the first sub-question.
    pub template: String,
}

/// Where a sub-question stores its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "field", rename_all = "snake_case")]
#[ts(export)]
pub enum AnswerTarget {
    Text(TextField),
    List(ListField),
}

impl AnswerTarget {
    pub fn is_list(self) -> bool {
        matches!(self, AnswerTarget::List(_))
    }
}

/// One question inside a sub-flow.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubQuestion {
    pub target: AnswerTarget,
    pub template: String,
}

/// Fixed phrases the engine needs besides the per-phase prompts.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScriptPhrases {
    /// Asked between items of a repeatable list.
    pub follow_up: String,
    /// Lower-case substrings that close a repeatable list.
    pub negations: Vec<String>,
    /// Lower-case substrings that accept the consensus report.
    pub agreements: Vec<String>,
    /// Stand-in for `{queixa}` before a main complaint is known.
    pub complaint_placeholder: String,
    /// Stand-in for absent scalars in the consensus report.
    pub not_reported: String,
    /// Prompt after the patient disagrees with the report; `{resposta}` is
    /// their answer.
    pub revision: String,
    /// Prefix for re-displaying the last prompt after an internal failure.
    pub apology: String,
}
