//! Terminal chat loop.
//!
//! Reads one patient answer per line and prints the engine's next prompt.
//! Lines starting with `/` are commands:
//!
//! - `/reiniciar` discards the interview and starts over
//! - `/encerrar` finishes now, keeping whatever was answered
//! - `/relatorio` prints the consensus report for the answers so far
//! - `/sair` leaves without completing

use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::{info, warn};

use anamnese_core::keys;
use anamnese_core::models::phase::AssessmentPhase;
use anamnese_core::models::record::AssessmentRecord;
use anamnese_export::docx::record_to_docx;
use anamnese_export::render::render_summary;
use anamnese_export::styles::DocumentStyles;
use anamnese_flow::{AssessmentFlowEngine, FlowError};
use anamnese_storage::state::{save_record, write_atomic};
use anamnese_storage::store::SessionStore;

const RESUMING: &str = "Retomando sua avaliação.";
const GOODBYE: &str = "Até logo.";
const SAVED: &str = "Avaliação concluída e salva.";

/// How a chat session ended.
#[derive(Debug)]
pub enum ChatOutcome {
    /// The interview reached its end (or was ended with `/encerrar`).
    Completed(Box<AssessmentRecord>),
    /// `/sair`. The session stays in the store.
    Quit,
    /// Input closed mid-interview. The session stays in the store.
    Interrupted,
}

/// Where completed records go.
#[derive(Debug, Clone)]
pub struct RecordSink {
    pub data_dir: PathBuf,
    pub export_docx: bool,
    pub styles: DocumentStyles,
}

impl RecordSink {
    pub fn new(data_dir: impl Into<PathBuf>, export_docx: bool) -> Self {
        Self {
            data_dir: data_dir.into(),
            export_docx,
            styles: DocumentStyles::default(),
        }
    }

    /// Write the record JSON, a plain-text summary, and the DOCX if enabled.
    /// Returns the keys written.
    pub fn persist(&self, record: &AssessmentRecord) -> eyre::Result<Vec<String>> {
        let mut written = vec![save_record(&self.data_dir, record)?];

        let key = keys::record_summary(&record.user_id, record.session_id);
        let summary = render_summary(record)?;
        write_atomic(&self.data_dir, &key, summary.as_bytes())?;
        written.push(key);

        if self.export_docx {
            let key = keys::record_docx(&record.user_id, record.session_id);
            let bytes = record_to_docx(record, &self.styles)?;
            write_atomic(&self.data_dir, &key, &bytes)?;
            info!(session_id = %record.session_id, key = %key, "assessment DOCX exported");
            written.push(key);
        }
        Ok(written)
    }
}

/// Conduct one interview for `user_id` over `input`/`output`.
///
/// An unfinished session already in the store is resumed at its last
/// question; otherwise a new one is started.
pub fn run_chat<S, R, W>(
    engine: &mut AssessmentFlowEngine<S>,
    user_id: &str,
    sink: Option<&RecordSink>,
    input: R,
    output: &mut W,
) -> eyre::Result<ChatOutcome>
where
    S: SessionStore,
    R: BufRead,
    W: Write,
{
    match engine.store().get(user_id)? {
        Some(state) if state.phase != AssessmentPhase::Completed => {
            info!(user_id, phase = %state.phase, "resuming assessment");
            writeln!(output, "{RESUMING}")?;
            writeln!(output, "{}", state.last_prompt)?;
        }
        _ => start(engine, user_id, output)?,
    }

    for line in input.lines() {
        let line = line?;
        let text = line.trim();

        match text {
            "/sair" => {
                writeln!(output, "{GOODBYE}")?;
                return Ok(ChatOutcome::Quit);
            }
            "/reiniciar" => {
                engine.reset_assessment(user_id)?;
                start(engine, user_id, output)?;
            }
            "/relatorio" => match engine.consensus_report(user_id)? {
                Some(report) => writeln!(output, "{report}")?,
                None => writeln!(output, "{}", not_found(user_id))?,
            },
            "/encerrar" => {
                if engine.complete_assessment(user_id)?.is_none() {
                    writeln!(output, "{}", not_found(user_id))?;
                    start(engine, user_id, output)?;
                    continue;
                }
                return finish(engine, user_id, sink, output);
            }
            _ => match engine.process_response(user_id, text) {
                Ok(response) => {
                    if !response.next_prompt.is_empty() {
                        writeln!(output, "{}", response.next_prompt)?;
                    }
                    if response.is_complete {
                        return finish(engine, user_id, sink, output);
                    }
                }
                Err(e @ FlowError::NoActiveAssessment { .. }) => {
                    writeln!(output, "{e}")?;
                    start(engine, user_id, output)?;
                }
                Err(FlowError::Store(e)) => {
                    warn!(user_id, error = %e, "turn failed, asking again");
                    let apology = || engine.script().phrases().apology.clone();
                    let retry = match engine.retry_prompt(user_id) {
                        Ok(prompt) => prompt.unwrap_or_else(apology),
                        Err(e) => {
                            warn!(user_id, error = %e, "could not reload last prompt");
                            apology()
                        }
                    };
                    writeln!(output, "{retry}")?;
                }
            },
        }
        output.flush()?;
    }

    Ok(ChatOutcome::Interrupted)
}

fn not_found(user_id: &str) -> FlowError {
    FlowError::NoActiveAssessment {
        user_id: user_id.to_string(),
    }
}

fn start<S: SessionStore, W: Write>(
    engine: &mut AssessmentFlowEngine<S>,
    user_id: &str,
    output: &mut W,
) -> eyre::Result<()> {
    let state = engine.start_assessment(user_id)?;
    writeln!(output, "{}", state.last_prompt)?;
    output.flush()?;
    Ok(())
}

fn finish<S: SessionStore, W: Write>(
    engine: &mut AssessmentFlowEngine<S>,
    user_id: &str,
    sink: Option<&RecordSink>,
    output: &mut W,
) -> eyre::Result<ChatOutcome> {
    let record = engine
        .build_record(user_id)?
        .ok_or_else(|| eyre::eyre!("completed session for '{user_id}' disappeared"))?;

    if let Some(sink) = sink {
        sink.persist(&record)?;
        writeln!(output, "{SAVED}")?;
    }
    engine.reset_assessment(user_id)?;
    output.flush()?;

    Ok(ChatOutcome::Completed(Box::new(record)))
}
