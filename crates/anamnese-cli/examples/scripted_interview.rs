//! Smoke run of a whole interview with canned answers.
//!
//! Drives the chat loop end to end against an in-memory store and prints
//! the conversation, then writes the record (and DOCX) to a temp directory.
//!
//! Usage:
//!   cargo run -p anamnese-cli --example scripted_interview

use std::io::Cursor;

use anamnese_cli::chat::{self, ChatOutcome, RecordSink};
use anamnese_flow::AssessmentFlowEngine;

const ANSWERS: &[&str] = &[
    "Sou a Maria, tenho 34 anos e trabalho como professora.",
    "Dor de cabeça",
    "Insônia",
    "é só isso",
    "Dor de cabeça",
    "Na testa, dos dois lados",
    "Há duas semanas",
    "Latejante, piora no fim do dia",
    "Enjoo",
    "nada mais",
    "Descansar no escuro",
    "não",
    "Luz forte",
    "não",
    "Catapora na infância",
    "não",
    "Diabetes",
    "não",
    "Hipertensão",
    "não",
    "Caminho três vezes por semana",
    "só isso",
    "Pólen",
    "Nenhuma",
    "Dipirona quando a dor aperta",
    "ok",
    "Sim, concordo",
    "Obrigada",
];

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();

    let out_dir = std::env::temp_dir().join("anamnese-smoke");
    let sink = RecordSink::new(&out_dir, true);
    let mut engine = AssessmentFlowEngine::in_memory();

    let input = Cursor::new(ANSWERS.join("\n").into_bytes());
    let mut transcript = Vec::new();
    let outcome = chat::run_chat(&mut engine, "smoke", Some(&sink), input, &mut transcript)?;

    println!("{}", String::from_utf8_lossy(&transcript));
    match outcome {
        ChatOutcome::Completed(record) => {
            println!("Session:    {}", record.session_id);
            println!("Revisions:  {}", record.data.consensus_revisions);
            println!("Output dir: {}", out_dir.display());
        }
        other => eyre::bail!("interview did not complete: {other:?}"),
    }
    Ok(())
}
