use anamnese_core::models::assessment::AssessmentData;
use anamnese_core::models::record::AssessmentRecord;
use anamnese_export::docx::{generate_docx, record_to_docx};
use anamnese_export::error::ExportError;
use anamnese_export::render::{render_summary, render_template};
use anamnese_export::styles::DocumentStyles;

fn record(data: AssessmentData) -> AssessmentRecord {
    AssessmentRecord {
        session_id: uuid::Uuid::new_v4(),
        user_id: "paciente-1".to_string(),
        script_id: "imre".to_string(),
        data,
        consensus_report: "**MEU ENTENDIMENTO SOBRE SUA AVALIAÇÃO:**\n\n**Queixa Principal:** dor de cabeça\n- Onde: na testa\n".to_string(),
        transcript: Vec::new(),
        started_at: jiff::Timestamp::UNIX_EPOCH,
        completed_at: jiff::Timestamp::UNIX_EPOCH,
    }
}

fn answered() -> AssessmentData {
    AssessmentData {
        patient_presentation: Some("Maria, 34 anos".to_string()),
        complaint_list: vec!["dor de cabeça".to_string(), "insônia".to_string()],
        main_complaint: Some("dor de cabeça".to_string()),
        allergies: Some("pólen".to_string()),
        consensus_agreed: true,
        ..Default::default()
    }
}

#[test]
fn docx_output_is_a_zip_package() {
    let bytes = generate_docx(
        "# Título\n\n## Seção\n\nTexto com **negrito** no meio.\n- item\n---\nDepois da quebra",
        &DocumentStyles::default(),
    )
    .unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn unmatched_bold_marker_still_renders() {
    let bytes = generate_docx("texto **sem fechamento", &DocumentStyles::default()).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn record_exports_to_docx() {
    let bytes = record_to_docx(&record(answered()), &DocumentStyles::default()).unwrap();
    assert!(bytes.starts_with(b"PK"));
    assert!(bytes.len() > 1000);
}

#[test]
fn summary_lists_answers() {
    let out = render_summary(&record(answered())).unwrap();
    assert!(out.contains("Maria, 34 anos"));
    assert!(out.contains("- dor de cabeça\n- insônia\n"));
    assert!(out.contains("Principal: dor de cabeça"));
    assert!(out.contains("Alergias: pólen"));
    assert!(out.contains("Consenso: confirmado (0 revisões)"));
}

#[test]
fn summary_marks_missing_answers() {
    let out = render_summary(&record(AssessmentData::default())).unwrap();
    assert!(out.contains("## Apresentação\nNão informado"));
    assert!(out.contains("Principal: Não informado"));
    assert!(out.contains("Regulares: Não informado"));
    assert!(out.contains("Consenso: pendente"));
}

#[test]
fn custom_template_sees_record_fields() {
    let out = render_template(
        "custom.txt",
        "{{ user_id }} / {{ script_id }} / {{ data.complaint_list | length }}",
        &record(answered()),
    )
    .unwrap();
    assert_eq!(out, "paciente-1 / imre / 2");
}

#[test]
fn malformed_template_is_a_parse_error() {
    let err = render_template("bad.txt", "{% if %}", &record(answered())).unwrap_err();
    assert!(matches!(err, ExportError::TemplateParse(_)));
}

#[test]
fn undefined_variable_is_a_render_error() {
    let err = render_template("bad.txt", "{{ nope }}", &record(answered())).unwrap_err();
    assert!(matches!(err, ExportError::TemplateRender(_)));
}
