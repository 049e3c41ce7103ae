use anamnese_core::models::assessment::AssessmentData;
use anamnese_flow::report::generate_consensus_report;
use anamnese_script::scripts::imre::Imre;

fn full_data() -> AssessmentData {
    AssessmentData {
        patient_presentation: Some("Maria, 34 anos".to_string()),
        complaint_list: vec!["dor de cabeça".to_string(), "insônia".to_string()],
        main_complaint: Some("dor de cabeça".to_string()),
        complaint_location: Some("na testa".to_string()),
        complaint_onset: Some("há duas semanas".to_string()),
        complaint_description: Some("latejante".to_string()),
        complaint_associated_symptoms: vec!["náusea".to_string(), "tontura".to_string()],
        complaint_improvements: vec!["descanso".to_string()],
        complaint_worsening: vec!["luz".to_string(), "barulho".to_string()],
        medical_history: vec!["catapora".to_string(), "apendicite".to_string()],
        family_history_mother: vec!["diabetes".to_string()],
        family_history_father: vec!["infarto".to_string(), "asma".to_string()],
        lifestyle_habits: vec!["caminhada".to_string(), "café".to_string()],
        allergies: Some("pólen".to_string()),
        regular_medications: Some("losartana".to_string()),
        sporadic_medications: Some("dipirona".to_string()),
        consensus_agreed: false,
        consensus_revisions: 0,
    }
}

#[test]
fn full_report_layout() {
    let report = generate_consensus_report(&full_data(), &Imre);
    let expected = "\
Vamos revisar a sua história para garantir que não perdemos nenhum detalhe importante.

**MEU ENTENDIMENTO SOBRE SUA AVALIAÇÃO:**

**Apresentação:** Maria, 34 anos

**Queixas Identificadas:** dor de cabeça, insônia

**Queixa Principal:** dor de cabeça
- Onde: na testa
- Quando começou: há duas semanas
- Como é: latejante
- Sintomas associados: náusea, tontura
- O que melhora: descanso
- O que piora: luz, barulho

**História Patológica Pregressa:** catapora; apendicite

**História Familiar:**
- Lado materno: diabetes
- Lado paterno: infarto; asma

**Hábitos de Vida:** caminhada; café

**Alergias:** pólen
**Medicações Regulares:** losartana
**Medicações Esporádicas:** dipirona

**Você concorda com esse entendimento?**";
    assert_eq!(report, expected);
}

#[test]
fn report_is_deterministic() {
    let data = full_data();
    assert_eq!(
        generate_consensus_report(&data, &Imre),
        generate_consensus_report(&data, &Imre)
    );
}

#[test]
fn absent_scalars_render_placeholder_and_empty_lists_vanish() {
    let report = generate_consensus_report(&AssessmentData::default(), &Imre);
    assert!(report.contains("**Apresentação:** Não informado"));
    assert!(report.contains("**Queixa Principal:** Não informado"));
    assert!(report.contains("- Onde: Não informado"));
    assert!(report.contains("**Alergias:** Não informado"));
    assert!(report.contains("**Medicações Esporádicas:** Não informado"));

    assert!(!report.contains("Queixas Identificadas"));
    assert!(!report.contains("Sintomas associados"));
    assert!(!report.contains("História Patológica Pregressa"));
    assert!(!report.contains("História Familiar"));
    assert!(!report.contains("Hábitos de Vida"));
}

#[test]
fn blank_answers_count_as_absent() {
    let data = AssessmentData {
        allergies: Some("   ".to_string()),
        ..Default::default()
    };
    let report = generate_consensus_report(&data, &Imre);
    assert!(report.contains("**Alergias:** Não informado"));
}

#[test]
fn family_section_shows_only_populated_side() {
    let data = AssessmentData {
        family_history_father: vec!["gota".to_string()],
        ..Default::default()
    };
    let report = generate_consensus_report(&data, &Imre);
    assert!(report.contains("**História Familiar:**\n- Lado paterno: gota\n"));
    assert!(!report.contains("Lado materno"));
}
