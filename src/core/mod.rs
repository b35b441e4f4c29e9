//! Core plumbing for rag-doctor
//!
//! - **config**: rag-doctor.toml parsing and validation
//! - **context**: run context built once in main and shared by commands
//! - **error**: error types with exit codes and contextual help

pub mod config;
pub mod context;
pub mod error;
