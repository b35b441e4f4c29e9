use crate::core::config::DoctorConfig;
use crate::core::error::DoctorResult;
use std::path::Path;

/// Write a config file with every default spelled out to `path`
pub fn run_init(path: &Path, force: bool) -> DoctorResult<()> {
  let path = DoctorConfig::default().save(path, force)?;
  println!("✅ Wrote {}", path.display());
  println!("   Edit it to point at your documents, index and models, then run `rag-doctor doctor`.");
  Ok(())
}
