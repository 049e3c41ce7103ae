use std::io::Cursor;

use docx_rs::{AlignmentType, BreakType, Docx, Paragraph, Run, RunFonts, Style, StyleType};

use anamnese_core::models::record::AssessmentRecord;

use crate::error::ExportError;
use crate::styles::DocumentStyles;

/// Title line of an exported assessment.
pub const DOCUMENT_TITLE: &str = "Avaliação Clínica Inicial";

/// One line of the Markdown-ish input, classified.
enum Block<'a> {
    Blank,
    Heading { level: u8, text: &'a str },
    Bullet(&'a str),
    PageBreak,
    Body(&'a str),
}

fn classify(line: &str) -> Block<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Block::Blank;
    }
    if trimmed == "---" || trimmed == "***" {
        return Block::PageBreak;
    }
    for (prefix, level) in [("### ", 3), ("## ", 2), ("# ", 1)] {
        if let Some(text) = trimmed.strip_prefix(prefix) {
            return Block::Heading { level, text };
        }
    }
    match trimmed.strip_prefix("- ") {
        Some(text) => Block::Bullet(text),
        None => Block::Body(trimmed),
    }
}

/// Export a completed assessment: title, session metadata, then the
/// consensus report exactly as the patient confirmed it.
pub fn record_to_docx(
    record: &AssessmentRecord,
    styles: &DocumentStyles,
) -> Result<Vec<u8>, ExportError> {
    let mut rendered = format!("# {DOCUMENT_TITLE}\n\n");
    rendered.push_str(&format!("**Sessão:** {}\n", record.session_id));
    rendered.push_str(&format!("**Início:** {}\n", record.started_at));
    rendered.push_str(&format!("**Conclusão:** {}\n\n", record.completed_at));
    rendered.push_str(&record.consensus_report);

    tracing::debug!(
        session_id = %record.session_id,
        lines = rendered.lines().count(),
        "rendering assessment DOCX"
    );
    generate_docx(&rendered, styles)
}

/// Generate a DOCX document from Markdown-ish text.
///
/// Supported subset:
/// - `# `, `## `, `### ` → heading levels 1–3
/// - `- item` → bullet paragraph
/// - `**bold**` inline → bold run
/// - `---` or `***` → page break
/// - anything else → body paragraph
pub fn generate_docx(rendered: &str, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .add_style(heading_style("Heading1", "heading 1", styles.heading1_size))
        .add_style(heading_style("Heading2", "heading 2", styles.heading2_size))
        .add_style(heading_style("Heading3", "heading 3", styles.heading3_size));

    for line in rendered.lines() {
        let paragraph = match classify(line) {
            Block::Blank => Paragraph::new(),
            Block::PageBreak => Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
            Block::Heading { level, text } => heading_paragraph(text, level, styles),
            Block::Bullet(text) => {
                let bullet = body_run("\u{2022} ", styles);
                inline_runs(text, styles)
                    .into_iter()
                    .fold(Paragraph::new().add_run(bullet), Paragraph::add_run)
                    .align(AlignmentType::Left)
            }
            Block::Body(text) => inline_runs(text, styles)
                .into_iter()
                .fold(Paragraph::new(), Paragraph::add_run)
                .align(AlignmentType::Left),
        };
        docx = docx.add_paragraph(paragraph);
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

fn heading_style(style_id: &str, name: &str, size_pt: usize) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // OOXML uses half-points
}

fn heading_paragraph(text: &str, level: u8, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new().style(&format!("Heading{level}")).add_run(
        Run::new()
            .add_text(text)
            .fonts(RunFonts::new().ascii(&styles.heading_font)),
    )
}

fn body_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font))
}

/// Split `**bold**` segments into runs. An unmatched `**` is kept literally.
fn inline_runs(text: &str, styles: &DocumentStyles) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("**") else {
            break;
        };
        if start > 0 {
            runs.push(body_run(&rest[..start], styles));
        }
        runs.push(body_run(&after[..end], styles).bold());
        rest = &after[end + 2..];
    }

    if !rest.is_empty() {
        runs.push(body_run(rest, styles));
    }
    runs
}
