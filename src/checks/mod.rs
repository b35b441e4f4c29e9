//! Setup verification checklists
//!
//! A checklist is an ordered list of `CheckStep`s run by `CheckRunner`, which
//! stops at the first failure. Values produced by one step and needed by a
//! later one travel through a `Handoff`.
//!
//! # Built-in Checklists
//!
//! - **setup**: clients, API keys, PDF loading, chunking, embedding model,
//!   vector database, language model
//! - **index**: API key, index listing, named index lookup
//!
//! # Example
//!
//! ```rust,ignore
//! let steps = vec![
//!   CheckStep::new("Loading documents", || Ok(Some("3 items".to_string()))),
//!   CheckStep::new("Connecting", || anyhow::bail!("connection refused")),
//! ];
//! let mut runner = CheckRunner::new(steps).with_banner("Ready!");
//! runner.run(&mut std::io::stdout())?; // Err(StepFailed { index: 2, .. })
//! ```

mod index;
mod runner;
mod setup;
mod step;

pub use index::index_checks;
pub use runner::CheckRunner;

pub mod banners {
  pub use super::index::{BANNER as INDEX_BANNER, TITLE as INDEX_TITLE};
  pub use super::setup::{BANNER as SETUP_BANNER, TITLE as SETUP_TITLE};
}

pub use setup::setup_checks;
