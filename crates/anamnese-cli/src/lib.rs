//! anamnese-cli library root.
//!
//! The binary is a thin shell over these modules; integration tests drive
//! the chat loop and config handling directly with in-memory buffers and
//! temp directories.

pub mod chat;
pub mod config;
