use anamnese_core::models::phase::AssessmentPhase;
use anamnese_core::models::response::FlowResponse;
use anamnese_flow::AssessmentFlowEngine;

const USER: &str = "u";

fn answer(engine: &mut AssessmentFlowEngine, text: &str) -> FlowResponse {
    engine.process_response(USER, text).unwrap()
}

/// Drive a short interview up to the first consensus report.
fn at_consensus_report() -> AssessmentFlowEngine {
    let mut engine = AssessmentFlowEngine::in_memory();
    engine.start_assessment(USER).unwrap();
    let script = [
        "Carla",
        "tosse",
        "não",
        "tosse",
        "no peito",
        "há um mês",
        "seca",
        "não",
        "não",
        "não",
        "não",
        "não",
        "não",
        "não",
        "nenhuma",
        "nenhuma",
        "nenhuma",
    ];
    for text in script {
        answer(&mut engine, text);
    }
    assert_eq!(
        engine.current_phase(USER).unwrap(),
        Some(AssessmentPhase::ConsensusReview)
    );
    let r = answer(&mut engine, "pode seguir");
    assert_eq!(r.phase, AssessmentPhase::ConsensusReport);
    engine
}

#[test]
fn disagreement_cycles_and_counts_revisions() {
    let mut engine = at_consensus_report();

    for round in 1..=3u32 {
        let r = answer(&mut engine, "a tosse é com catarro.");
        assert_eq!(r.phase, AssessmentPhase::ConsensusReview);
        assert_eq!(
            r.next_prompt,
            "Entendi. Vamos revisar. a tosse é com catarro. Por favor, me diga o que precisa ser corrigido ou adicionado para que eu possa apresentar novamente meu entendimento."
        );
        let data = engine.get_assessment_data(USER).unwrap().unwrap();
        assert_eq!(data.consensus_revisions, round);
        assert!(!data.consensus_agreed);

        let r = answer(&mut engine, "é uma tosse com catarro");
        assert_eq!(r.phase, AssessmentPhase::ConsensusReport);
        assert!(r.next_prompt.ends_with("**Você concorda com esse entendimento?**"));
    }
}

#[test]
fn agreement_moves_to_final_recommendation_once() {
    for phrase in ["Sim", "concordo plenamente", "está correto", "correto"] {
        let mut engine = at_consensus_report();
        answer(&mut engine, "falta um detalhe");
        answer(&mut engine, "ok");

        let r = answer(&mut engine, phrase);
        assert_eq!(r.phase, AssessmentPhase::FinalRecommendation, "phrase {phrase:?}");
        let data = engine.get_assessment_data(USER).unwrap().unwrap();
        assert!(data.consensus_agreed);
        assert_eq!(data.consensus_revisions, 1);
    }
}

#[test]
fn agreement_matching_is_substring_based() {
    // "não concordo" still contains "concordo".
    let mut engine = at_consensus_report();
    let r = answer(&mut engine, "não concordo");
    assert_eq!(r.phase, AssessmentPhase::FinalRecommendation);
}

#[test]
fn report_shown_at_consensus_matches_generated_report() {
    let mut engine = at_consensus_report();
    let report = engine.consensus_report(USER).unwrap().unwrap();
    assert!(report.contains("**Queixa Principal:** tosse"));
    assert!(report.contains("- Onde: no peito"));
    assert!(report.contains("**Alergias:** nenhuma"));

    answer(&mut engine, "quero corrigir");
    let r = answer(&mut engine, "ok");
    assert_eq!(r.next_prompt, report);
}
