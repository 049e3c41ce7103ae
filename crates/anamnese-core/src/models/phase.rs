use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The stage of the scripted interview. Exactly one is active per session.
///
/// Phases advance one way in [`AssessmentPhase::ORDER`]; the only cycle is
/// `ConsensusReview` ↔ `ConsensusReport` while the patient asks for
/// corrections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AssessmentPhase {
    InitialGreeting,
    Identification,
    ComplaintList,
    MainComplaint,
    ComplaintDetails,
    MedicalHistory,
    FamilyHistoryMother,
    FamilyHistoryFather,
    LifestyleHabits,
    ObjectiveQuestions,
    ConsensusReview,
    ConsensusReport,
    FinalRecommendation,
    Completed,
}

impl AssessmentPhase {
    /// Fixed top-level interview order.
    pub const ORDER: [AssessmentPhase; 14] = [
        AssessmentPhase::InitialGreeting,
        AssessmentPhase::Identification,
        AssessmentPhase::ComplaintList,
        AssessmentPhase::MainComplaint,
        AssessmentPhase::ComplaintDetails,
        AssessmentPhase::MedicalHistory,
        AssessmentPhase::FamilyHistoryMother,
        AssessmentPhase::FamilyHistoryFather,
        AssessmentPhase::LifestyleHabits,
        AssessmentPhase::ObjectiveQuestions,
        AssessmentPhase::ConsensusReview,
        AssessmentPhase::ConsensusReport,
        AssessmentPhase::FinalRecommendation,
        AssessmentPhase::Completed,
    ];

    /// The phase that follows this one in [`Self::ORDER`], or `None` once
    /// the interview is completed.
    pub fn next(self) -> Option<AssessmentPhase> {
        let position = Self::ORDER.iter().position(|p| *p == self)?;
        Self::ORDER.get(position + 1).copied()
    }

    /// The nested question sequence this phase runs, if any.
    pub fn sub_flow(self) -> Option<SubFlow> {
        match self {
            AssessmentPhase::ComplaintDetails => Some(SubFlow::ComplaintDetails),
            AssessmentPhase::ObjectiveQuestions => Some(SubFlow::ObjectiveQuestions),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssessmentPhase::InitialGreeting => "initial_greeting",
            AssessmentPhase::Identification => "identification",
            AssessmentPhase::ComplaintList => "complaint_list",
            AssessmentPhase::MainComplaint => "main_complaint",
            AssessmentPhase::ComplaintDetails => "complaint_details",
            AssessmentPhase::MedicalHistory => "medical_history",
            AssessmentPhase::FamilyHistoryMother => "family_history_mother",
            AssessmentPhase::FamilyHistoryFather => "family_history_father",
            AssessmentPhase::LifestyleHabits => "lifestyle_habits",
            AssessmentPhase::ObjectiveQuestions => "objective_questions",
            AssessmentPhase::ConsensusReview => "consensus_review",
            AssessmentPhase::ConsensusReport => "consensus_report",
            AssessmentPhase::FinalRecommendation => "final_recommendation",
            AssessmentPhase::Completed => "completed",
        }
    }
}

impl fmt::Display for AssessmentPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssessmentPhase {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ORDER
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CoreError::UnknownPhase(s.to_string()))
    }
}

/// A fixed question sequence nested inside one top-level phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SubFlow {
    /// Six questions characterising the main complaint.
    ComplaintDetails,
    /// Allergies, regular medications, sporadic medications.
    ObjectiveQuestions,
}

impl SubFlow {
    /// The top-level phase hosting this sub-flow.
    pub fn phase(self) -> AssessmentPhase {
        match self {
            SubFlow::ComplaintDetails => AssessmentPhase::ComplaintDetails,
            SubFlow::ObjectiveQuestions => AssessmentPhase::ObjectiveQuestions,
        }
    }
}
