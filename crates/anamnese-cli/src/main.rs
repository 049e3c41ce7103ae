use std::path::PathBuf;

use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

use anamnese_cli::chat::{self, ChatOutcome, RecordSink};
use anamnese_cli::config::{self, CliConfig, StoreKind};
use anamnese_flow::AssessmentFlowEngine;
use anamnese_script::require_script;
use anamnese_storage::file::FileStore;
use anamnese_storage::store::{MemoryStore, SessionStore};

#[derive(Parser)]
#[command(name = "anamnese")]
#[command(about = "Guided initial clinical assessment in the terminal")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Patient identifier the session is stored under
    #[arg(long, default_value = "local")]
    user: String,
    /// Write the default config file and exit
    #[arg(long)]
    init: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };

    if cli.init {
        let config = CliConfig::default();
        config::save_config(&config_path, &config)?;
        println!("Configuração criada em {}", config_path.display());
        return Ok(());
    }

    let config = config::load_or_default(&config_path)?;
    init_tracing(&config);
    tracing::info!(
        script = %config.script_id,
        store = ?config.store,
        data_dir = %config.data_dir.display(),
        "starting anamnese"
    );

    let script = require_script(&config.script_id)?;
    let store: Box<dyn SessionStore> = match config.store {
        StoreKind::Memory => Box::new(MemoryStore::new()),
        StoreKind::File => Box::new(FileStore::new(&config.data_dir)),
    };
    let mut engine = AssessmentFlowEngine::new(store, script);
    let sink = RecordSink::new(&config.data_dir, config.export_docx);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let outcome = chat::run_chat(&mut engine, &cli.user, Some(&sink), stdin.lock(), &mut stdout)?;

    match outcome {
        ChatOutcome::Completed(record) => {
            tracing::info!(session_id = %record.session_id, "assessment completed")
        }
        ChatOutcome::Quit | ChatOutcome::Interrupted => {
            tracing::info!(user_id = %cli.user, "chat ended before completion")
        }
    }
    Ok(())
}

fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    // Logs go to stderr so they never interleave with the conversation.
    if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
