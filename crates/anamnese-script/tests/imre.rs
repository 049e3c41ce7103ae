use anamnese_core::models::assessment::{AssessmentData, ListField};
use anamnese_core::models::phase::{AssessmentPhase, SubFlow};
use anamnese_script::definition::{AnswerTarget, PhaseKind};
use anamnese_script::{Script, all_scripts, get_script, require_script};

fn imre() -> Box<dyn Script> {
    get_script("imre").unwrap()
}

#[test]
fn registry_finds_imre() {
    assert!(all_scripts().iter().any(|s| s.id() == "imre"));
    assert!(get_script("missing").is_none());
    let err = require_script("missing").err().unwrap();
    assert_eq!(err.to_string(), "unknown dialogue script: missing");
}

#[test]
fn every_phase_is_declared_in_order() {
    let script = imre();
    let declared: Vec<_> = script.phases().iter().map(|p| p.phase).collect();
    assert_eq!(declared, AssessmentPhase::ORDER.to_vec());
}

#[test]
fn repeatable_phases_map_to_their_lists() {
    let script = imre();
    assert_eq!(
        script.list_field(AssessmentPhase::ComplaintList),
        Some(ListField::Complaints)
    );
    assert_eq!(
        script.list_field(AssessmentPhase::MedicalHistory),
        Some(ListField::MedicalHistory)
    );
    assert_eq!(
        script.list_field(AssessmentPhase::FamilyHistoryMother),
        Some(ListField::FamilyHistoryMother)
    );
    assert_eq!(
        script.list_field(AssessmentPhase::FamilyHistoryFather),
        Some(ListField::FamilyHistoryFather)
    );
    assert_eq!(
        script.list_field(AssessmentPhase::LifestyleHabits),
        Some(ListField::LifestyleHabits)
    );
    assert_eq!(script.list_field(AssessmentPhase::MainComplaint), None);
    assert_eq!(script.list_field(AssessmentPhase::ObjectiveQuestions), None);
}

#[test]
fn sub_flow_phases_declare_their_flow() {
    let script = imre();
    for phase in AssessmentPhase::ORDER {
        let spec = script.phase_spec(phase).unwrap();
        match spec.kind {
            PhaseKind::SubFlow(flow) => assert_eq!(phase.sub_flow(), Some(flow)),
            _ => assert_eq!(phase.sub_flow(), None),
        }
    }
}

#[test]
fn complaint_details_have_three_scalars_then_three_lists() {
    let script = imre();
    let targets: Vec<bool> = script
        .complaint_details()
        .iter()
        .map(|q| q.target.is_list())
        .collect();
    assert_eq!(targets, vec![false, false, false, true, true, true]);
    assert!(
        script
            .objective_questions()
            .iter()
            .all(|q| matches!(q.target, AnswerTarget::Text(_)))
    );
    assert_eq!(script.objective_questions().len(), 3);
}

#[test]
fn detail_prompts_interpolate_the_main_complaint() {
    let script = imre();
    let data = AssessmentData {
        main_complaint: Some("dor de cabeça".to_string()),
        ..Default::default()
    };
    assert_eq!(
        script.sub_prompt(SubFlow::ComplaintDetails, 0, &data).unwrap(),
        "Onde você sente dor de cabeça?"
    );
    assert_eq!(
        script.sub_prompt(SubFlow::ComplaintDetails, 5, &data).unwrap(),
        "O que parece piorar a dor de cabeça?"
    );
    assert!(script.sub_prompt(SubFlow::ComplaintDetails, 6, &data).is_none());
}

#[test]
fn missing_complaint_uses_placeholder_noun() {
    let script = imre();
    let prompt = script
        .sub_prompt(SubFlow::ComplaintDetails, 1, &AssessmentData::default())
        .unwrap();
    assert_eq!(prompt, "Quando essa queixa começou?");
}

#[test]
fn sub_flow_entry_joins_intro_and_first_question() {
    let script = imre();
    let data = AssessmentData {
        main_complaint: Some("insônia".to_string()),
        ..Default::default()
    };
    assert_eq!(
        script.entry_prompt(AssessmentPhase::ComplaintDetails, &data),
        "Vamos explorar suas questões mais detalhadamente. Onde você sente insônia?"
    );
    assert_eq!(
        script.entry_prompt(AssessmentPhase::ObjectiveQuestions, &data),
        "Você tem alguma alergia (mudança de tempo, medicação, poeira...)?"
    );
}

#[test]
fn main_complaint_prompt_lists_complaints() {
    let script = imre();
    let data = AssessmentData {
        complaint_list: vec!["dor de cabeça".to_string(), "cansaço".to_string()],
        ..Default::default()
    };
    assert_eq!(
        script.entry_prompt(AssessmentPhase::MainComplaint, &data),
        "De todas essas questões (dor de cabeça, cansaço), qual mais o(a) incomoda?"
    );
}

#[test]
fn completed_has_no_prompt() {
    let script = imre();
    assert_eq!(
        script.entry_prompt(AssessmentPhase::Completed, &AssessmentData::default()),
        ""
    );
    assert!(script.entry_prompt(AssessmentPhase::MedicalHistory, &AssessmentData::default())
        .starts_with("E agora, sobre o restante sua vida"));
}

#[test]
fn phrase_sets_are_lower_case() {
    let script = imre();
    let phrases = script.phrases();
    assert_eq!(phrases.follow_up, "O que mais?");
    assert_eq!(phrases.negations.len(), 6);
    assert_eq!(phrases.agreements.len(), 4);
    for phrase in phrases.negations.iter().chain(&phrases.agreements) {
        assert_eq!(*phrase, phrase.to_lowercase());
    }
}
