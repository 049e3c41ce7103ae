//! anamnese-core
//!
//! Pure domain types for the clinical interview: phases, the accumulating
//! assessment record, per-session state, and storage key conventions.
//! No I/O; this is the shared vocabulary of the anamnese crates.

pub mod error;
pub mod keys;
pub mod models;
