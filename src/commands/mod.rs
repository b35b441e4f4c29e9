//! CLI commands for rag-doctor
//!
//! - **doctor**: end-to-end setup checklist (keys, documents, models, services)
//! - **index**: confirm the vector index exists
//! - **init**: write a default rag-doctor.toml
//!
//! Commands that run checks take `&DoctorContext` so configuration is loaded once.

pub mod doctor;
pub mod index;
pub mod init;

pub use doctor::run_doctor;
pub use index::run_index;
pub use init::run_init;
