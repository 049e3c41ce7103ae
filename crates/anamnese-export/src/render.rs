use tera::{Context, Tera};

use anamnese_core::models::record::AssessmentRecord;

use crate::error::ExportError;

/// Plain-text summary used when no custom template is configured.
///
/// Context variables are the serialized [`AssessmentRecord`] fields, so
/// `data.*`, `session_id`, `completed_at` and friends are all available.
pub const DEFAULT_SUMMARY_TEMPLATE: &str = r#"# Avaliação Clínica Inicial

Sessão: {{ session_id }}
Concluída em: {{ completed_at }}

## Apresentação
{% if data.patient_presentation %}{{ data.patient_presentation }}{% else %}Não informado{% endif %}

## Queixas
{% if data.complaint_list %}{% for queixa in data.complaint_list %}- {{ queixa }}
{% endfor %}{% else %}Não informado
{% endif %}
Principal: {% if data.main_complaint %}{{ data.main_complaint }}{% else %}Não informado{% endif %}

## Alergias e medicações
Alergias: {% if data.allergies %}{{ data.allergies }}{% else %}Não informado{% endif %}
Regulares: {% if data.regular_medications %}{{ data.regular_medications }}{% else %}Não informado{% endif %}
Esporádicas: {% if data.sporadic_medications %}{{ data.sporadic_medications }}{% else %}Não informado{% endif %}

Consenso: {% if data.consensus_agreed %}confirmado{% else %}pendente{% endif %} ({{ data.consensus_revisions }} revisões)
"#;

/// Render a Tera template against a completed assessment.
///
/// The record is serialized to JSON and its top-level fields become the
/// template context.
pub fn render_template(
    template_name: &str,
    template_content: &str,
    record: &AssessmentRecord,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(record)?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}

/// Render [`DEFAULT_SUMMARY_TEMPLATE`].
pub fn render_summary(record: &AssessmentRecord) -> Result<String, ExportError> {
    render_template("summary.md", DEFAULT_SUMMARY_TEMPLATE, record)
}
