use thiserror::Error;

use anamnese_storage::error::StorageError;

#[derive(Debug, Error)]
pub enum FlowError {
    /// `process_response` was called before `start_assessment`. The caller
    /// has to restart the interview; the message is shown to the patient.
    #[error("Avaliação não encontrada. Por favor, inicie uma nova avaliação.")]
    NoActiveAssessment { user_id: String },

    #[error("session store error: {0}")]
    Store(#[from] StorageError),
}
