//! anamnese-storage
//!
//! Where interview state lives between turns. The engine only sees the
//! [`store::SessionStore`] trait; the in-memory store is the default and the
//! file store keeps sessions across restarts.

pub mod error;
pub mod file;
pub mod state;
pub mod store;
