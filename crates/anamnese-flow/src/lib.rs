//! anamnese-flow
//!
//! The interview engine. Holds one session per user in an injected
//! [`SessionStore`](anamnese_storage::store::SessionStore), walks the
//! phases a [`Script`](anamnese_script::Script) declares, and assembles the
//! consensus report shown to the patient for confirmation.
//!
//! The engine does no locking. Callers on a multi-threaded runtime must
//! serialise `process_response` calls for the same user; different users
//! never share mutable state.

pub mod audit;
pub mod detect;
pub mod engine;
pub mod error;
pub mod report;

pub use engine::AssessmentFlowEngine;
pub use error::FlowError;
