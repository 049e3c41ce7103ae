use serde::{Deserialize, Serialize};

/// Document styling for exported assessments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Font for body text.
    pub body_font: String,

    /// Font for headings.
    pub heading_font: String,

    /// Body text size in points.
    pub body_size: usize,

    pub heading1_size: usize,
    pub heading2_size: usize,
    pub heading3_size: usize,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Calibri".to_string(),
            heading_font: "Arial".to_string(),
            body_size: 11,
            heading1_size: 16,
            heading2_size: 14,
            heading3_size: 12,
        }
    }
}
