use anamnese_core::models::assessment::AssessmentData;

use crate::definition::ScriptPhrases;

/// Placeholder for the stored main complaint.
pub const COMPLAINT: &str = "{queixa}";

/// Placeholder for the comma-joined complaint list.
pub const COMPLAINT_LIST: &str = "{queixas}";

/// Fill a prompt template from the data captured so far.
///
/// `{queixa}` falls back to the script's placeholder noun when no main
/// complaint has been chosen yet.
pub fn interpolate(template: &str, data: &AssessmentData, phrases: &ScriptPhrases) -> String {
    let mut out = template.to_string();

    if out.contains(COMPLAINT) {
        let complaint = data
            .main_complaint
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(&phrases.complaint_placeholder);
        out = out.replace(COMPLAINT, complaint);
    }

    if out.contains(COMPLAINT_LIST) {
        out = out.replace(COMPLAINT_LIST, &data.complaint_list.join(", "));
    }

    out
}
