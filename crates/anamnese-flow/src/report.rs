//! Consensus report: the narrative read back to the patient before the
//! interview is finalised.
//!
//! Output is a pure function of the data. Absent scalars render the
//! script's "not reported" marker; empty lists drop their line or section.
//! Enumerations within one category (complaints, symptoms, what helps,
//! what hurts) are joined with `, `; history entries are joined with `; `.

use anamnese_core::models::assessment::AssessmentData;
use anamnese_core::models::phase::AssessmentPhase;
use anamnese_script::Script;

const HEADING: &str = "**MEU ENTENDIMENTO SOBRE SUA AVALIAÇÃO:**";

const ENUMERATION: &str = ", ";
const HISTORY: &str = "; ";

/// Render the consensus report for `data` using `script`'s wording.
pub fn generate_consensus_report(data: &AssessmentData, script: &dyn Script) -> String {
    let blank = AssessmentData::default();
    let intro = script.entry_prompt(AssessmentPhase::ConsensusReview, &blank);
    let closing = script.entry_prompt(AssessmentPhase::ConsensusReport, &blank);
    let missing = script.phrases().not_reported.as_str();
    let scalar = |value: &Option<String>| -> String {
        match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => missing.to_string(),
        }
    };

    let mut report = String::new();
    if !intro.is_empty() {
        report.push_str(&format!("{intro}\n\n"));
    }
    report.push_str(&format!("{HEADING}\n\n"));

    report.push_str(&format!(
        "**Apresentação:** {}\n\n",
        scalar(&data.patient_presentation)
    ));

    if !data.complaint_list.is_empty() {
        report.push_str(&format!(
            "**Queixas Identificadas:** {}\n\n",
            data.complaint_list.join(ENUMERATION)
        ));
    }

    report.push_str(&format!(
        "**Queixa Principal:** {}\n",
        scalar(&data.main_complaint)
    ));
    report.push_str(&format!("- Onde: {}\n", scalar(&data.complaint_location)));
    report.push_str(&format!(
        "- Quando começou: {}\n",
        scalar(&data.complaint_onset)
    ));
    report.push_str(&format!(
        "- Como é: {}\n",
        scalar(&data.complaint_description)
    ));
    push_list_line(
        &mut report,
        "- Sintomas associados",
        &data.complaint_associated_symptoms,
        ENUMERATION,
    );
    push_list_line(
        &mut report,
        "- O que melhora",
        &data.complaint_improvements,
        ENUMERATION,
    );
    push_list_line(
        &mut report,
        "- O que piora",
        &data.complaint_worsening,
        ENUMERATION,
    );
    report.push('\n');

    if !data.medical_history.is_empty() {
        report.push_str(&format!(
            "**História Patológica Pregressa:** {}\n\n",
            data.medical_history.join(HISTORY)
        ));
    }

    if !data.family_history_mother.is_empty() || !data.family_history_father.is_empty() {
        report.push_str("**História Familiar:**\n");
        push_list_line(
            &mut report,
            "- Lado materno",
            &data.family_history_mother,
            HISTORY,
        );
        push_list_line(
            &mut report,
            "- Lado paterno",
            &data.family_history_father,
            HISTORY,
        );
        report.push('\n');
    }

    if !data.lifestyle_habits.is_empty() {
        report.push_str(&format!(
            "**Hábitos de Vida:** {}\n\n",
            data.lifestyle_habits.join(HISTORY)
        ));
    }

    report.push_str(&format!("**Alergias:** {}\n", scalar(&data.allergies)));
    report.push_str(&format!(
        "**Medicações Regulares:** {}\n",
        scalar(&data.regular_medications)
    ));
    report.push_str(&format!(
        "**Medicações Esporádicas:** {}\n",
        scalar(&data.sporadic_medications)
    ));

    if !closing.is_empty() {
        report.push_str(&format!("\n{closing}"));
    }

    report
}

fn push_list_line(report: &mut String, label: &str, items: &[String], separator: &str) {
    if items.is_empty() {
        return;
    }
    report.push_str(&format!("{label}: {}\n", items.join(separator)));
}
