use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("unknown dialogue script: {0}")]
    UnknownScript(String),
}
