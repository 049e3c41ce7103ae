//! anamnese-script
//!
//! Declarative interview scripts. Pure data without state or I/O. A script
//! lists the prompt for every phase, which phases repeat until the patient
//! says there is nothing more, and the fixed question sequences of the two
//! sub-flows.

pub mod definition;
pub mod error;
pub mod scripts;
pub mod template;

use anamnese_core::models::assessment::{AssessmentData, ListField};
use anamnese_core::models::phase::{AssessmentPhase, SubFlow};

use definition::{PhaseKind, PhaseSpec, ScriptPhrases, SubQuestion};
use error::ScriptError;

/// Trait implemented by each interview script.
pub trait Script: Send + Sync {
    /// Unique identifier for this script (e.g., "imre").
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// One entry per top-level phase, in interview order.
    fn phases(&self) -> &[PhaseSpec];

    /// Questions characterising the main complaint.
    fn complaint_details(&self) -> &[SubQuestion];

    /// Closing objective questions.
    fn objective_questions(&self) -> &[SubQuestion];

    fn phrases(&self) -> &ScriptPhrases;

    fn phase_spec(&self, phase: AssessmentPhase) -> Option<&PhaseSpec> {
        self.phases().iter().find(|spec| spec.phase == phase)
    }

    /// The list a repeatable phase appends to, or `None` for any other phase.
    fn list_field(&self, phase: AssessmentPhase) -> Option<ListField> {
        match self.phase_spec(phase)?.kind {
            PhaseKind::RepeatableList(field) => Some(field),
            _ => None,
        }
    }

    fn sub_questions(&self, flow: SubFlow) -> &[SubQuestion] {
        match flow {
            SubFlow::ComplaintDetails => self.complaint_details(),
            SubFlow::ObjectiveQuestions => self.objective_questions(),
        }
    }

    /// Prompt for a sub-flow step, or `None` past the end of the sequence.
    fn sub_prompt(&self, flow: SubFlow, step: usize, data: &AssessmentData) -> Option<String> {
        let question = self.sub_questions(flow).get(step)?;
        Some(template::interpolate(&question.template, data, self.phrases()))
    }

    /// Prompt shown when `phase` is entered.
    ///
    /// Sub-flow phases join their introduction with the first sub-question.
    fn entry_prompt(&self, phase: AssessmentPhase, data: &AssessmentData) -> String {
        let Some(spec) = self.phase_spec(phase) else {
            return String::new();
        };
        let intro = template::interpolate(&spec.template, data, self.phrases());

        let PhaseKind::SubFlow(flow) = spec.kind else {
            return intro;
        };
        match self.sub_prompt(flow, 0, data) {
            Some(first) if intro.is_empty() => first,
            Some(first) => format!("{intro} {first}"),
            None => intro,
        }
    }
}

/// Return all registered scripts.
pub fn all_scripts() -> Vec<Box<dyn Script>> {
    vec![Box::new(scripts::imre::Imre)]
}

/// Look up a script by ID.
pub fn get_script(id: &str) -> Option<Box<dyn Script>> {
    all_scripts().into_iter().find(|s| s.id() == id)
}

/// Like [`get_script`], but an unknown ID is an error.
pub fn require_script(id: &str) -> Result<Box<dyn Script>, ScriptError> {
    get_script(id).ok_or_else(|| ScriptError::UnknownScript(id.to_string()))
}
