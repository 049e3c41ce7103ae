use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::phase::{AssessmentPhase, SubFlow};
use super::transcript::TranscriptEntry;

/// Everything captured during one interview.
///
/// Lists keep insertion order and allow duplicates. Scalars stay `None`
/// until the matching question is answered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentData {
    // Identification
    pub patient_presentation: Option<String>,

    // Complaint list and the one the patient chose as main
    pub complaint_list: Vec<String>,
    pub main_complaint: Option<String>,

    // Main complaint details
    pub complaint_location: Option<String>,
    pub complaint_onset: Option<String>,
    pub complaint_description: Option<String>,
    pub complaint_associated_symptoms: Vec<String>,
    pub complaint_improvements: Vec<String>,
    pub complaint_worsening: Vec<String>,

    // Histories
    pub medical_history: Vec<String>,
    pub family_history_mother: Vec<String>,
    pub family_history_father: Vec<String>,
    pub lifestyle_habits: Vec<String>,

    // Objective questions
    pub allergies: Option<String>,
    pub regular_medications: Option<String>,
    pub sporadic_medications: Option<String>,

    // Consensus
    pub consensus_agreed: bool,
    pub consensus_revisions: u32,
}

/// A list-valued field of [`AssessmentData`] that a repeatable question
/// appends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ListField {
    Complaints,
    AssociatedSymptoms,
    Improvements,
    Worsening,
    MedicalHistory,
    FamilyHistoryMother,
    FamilyHistoryFather,
    LifestyleHabits,
}

/// A single-answer field of [`AssessmentData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TextField {
    Presentation,
    MainComplaint,
    Location,
    Onset,
    Description,
    Allergies,
    RegularMedications,
    SporadicMedications,
}

impl AssessmentData {
    pub fn list(&self, field: ListField) -> &[String] {
        match field {
            ListField::Complaints => &self.complaint_list,
            ListField::AssociatedSymptoms => &self.complaint_associated_symptoms,
            ListField::Improvements => &self.complaint_improvements,
            ListField::Worsening => &self.complaint_worsening,
            ListField::MedicalHistory => &self.medical_history,
            ListField::FamilyHistoryMother => &self.family_history_mother,
            ListField::FamilyHistoryFather => &self.family_history_father,
            ListField::LifestyleHabits => &self.lifestyle_habits,
        }
    }

    pub fn push(&mut self, field: ListField, item: impl Into<String>) {
        let list = match field {
            ListField::Complaints => &mut self.complaint_list,
            ListField::AssociatedSymptoms => &mut self.complaint_associated_symptoms,
            ListField::Improvements => &mut self.complaint_improvements,
            ListField::Worsening => &mut self.complaint_worsening,
            ListField::MedicalHistory => &mut self.medical_history,
            ListField::FamilyHistoryMother => &mut self.family_history_mother,
            ListField::FamilyHistoryFather => &mut self.family_history_father,
            ListField::LifestyleHabits => &mut self.lifestyle_habits,
        };
        list.push(item.into());
    }

    pub fn text(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Presentation => self.patient_presentation.as_deref(),
            TextField::MainComplaint => self.main_complaint.as_deref(),
            TextField::Location => self.complaint_location.as_deref(),
            TextField::Onset => self.complaint_onset.as_deref(),
            TextField::Description => self.complaint_description.as_deref(),
            TextField::Allergies => self.allergies.as_deref(),
            TextField::RegularMedications => self.regular_medications.as_deref(),
            TextField::SporadicMedications => self.sporadic_medications.as_deref(),
        }
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        let slot = match field {
            TextField::Presentation => &mut self.patient_presentation,
            TextField::MainComplaint => &mut self.main_complaint,
            TextField::Location => &mut self.complaint_location,
            TextField::Onset => &mut self.complaint_onset,
            TextField::Description => &mut self.complaint_description,
            TextField::Allergies => &mut self.allergies,
            TextField::RegularMedications => &mut self.regular_medications,
            TextField::SporadicMedications => &mut self.sporadic_medications,
        };
        *slot = Some(value.into());
    }
}

/// Live interview state for one user.
///
/// Created by `start_assessment`, mutated only by `process_response`.
/// The two sub-flows keep separate cursors so a misrouted phase can never
/// advance the other sequence.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentState {
    pub session_id: Uuid,
    pub user_id: String,
    pub phase: AssessmentPhase,
    pub data: AssessmentData,
    /// Zero-based cursor into the complaint-detail questions.
    pub detail_step: usize,
    /// Zero-based cursor into the objective questions.
    pub objective_step: usize,
    /// True while a repeatable list is still accepting items.
    pub awaiting_continuation: bool,
    /// The prompt most recently shown to the patient.
    pub last_prompt: String,
    pub transcript: Vec<TranscriptEntry>,
    pub started_at: jiff::Timestamp,
    pub last_update: jiff::Timestamp,
}

impl AssessmentState {
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = jiff::Timestamp::now();
        Self {
            session_id: Uuid::new_v4(),
            user_id: user_id.into(),
            phase: AssessmentPhase::InitialGreeting,
            data: AssessmentData::default(),
            detail_step: 0,
            objective_step: 0,
            awaiting_continuation: false,
            last_prompt: String::new(),
            transcript: Vec::new(),
            started_at: now,
            last_update: now,
        }
    }

    pub fn sub_flow_step(&self, flow: SubFlow) -> usize {
        match flow {
            SubFlow::ComplaintDetails => self.detail_step,
            SubFlow::ObjectiveQuestions => self.objective_step,
        }
    }

    pub fn sub_flow_step_mut(&mut self, flow: SubFlow) -> &mut usize {
        match flow {
            SubFlow::ComplaintDetails => &mut self.detail_step,
            SubFlow::ObjectiveQuestions => &mut self.objective_step,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.phase == AssessmentPhase::Completed
    }
}
