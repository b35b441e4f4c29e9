//! Tests for the `init` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_init_creates_config() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_rag_doctor(&project.path, &["init"], &[])?;
  assert!(output.status.success());
  assert!(project.file_exists("rag-doctor.toml"));

  let config = project.read_file("rag-doctor.toml")?;
  assert!(config.contains("[documents]"));
  assert!(config.contains("chunk_size = 500"));
  assert!(config.contains("index = \"medicalbot\""));
  assert!(config.contains("[guidance]"));
  Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
  let project = TestProject::new()?;
  std::fs::write(project.path.join("rag-doctor.toml"), "# mine\n")?;

  let output = run_rag_doctor(&project.path, &["init"], &[])?;
  assert_eq!(output.status.code(), Some(2));
  assert_eq!(project.read_file("rag-doctor.toml")?, "# mine\n");

  let output = run_rag_doctor(&project.path, &["init", "--force"], &[])?;
  assert!(output.status.success());
  assert!(project.read_file("rag-doctor.toml")?.contains("[llm]"));
  Ok(())
}

#[test]
fn test_init_ignores_broken_existing_config() -> Result<()> {
  let project = TestProject::new()?;
  std::fs::write(project.path.join("rag-doctor.toml"), "not = [valid toml")?;

  let output = run_rag_doctor(&project.path, &["init", "--force"], &[])?;
  assert!(output.status.success(), "stderr: {}", stderr_of(&output));
  Ok(())
}

#[test]
fn test_init_writes_to_explicit_config_path() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_rag_doctor(&project.path, &["--config", "staging.toml", "init"], &[])?;

  assert!(output.status.success(), "stderr: {}", stderr_of(&output));
  assert!(project.file_exists("staging.toml"));
  assert!(!project.file_exists("rag-doctor.toml"));
  Ok(())
}

#[test]
fn test_init_write_failure_is_system_error() -> Result<()> {
  let project = TestProject::new()?;
  std::fs::create_dir(project.path.join("rag-doctor.toml"))?;

  let output = run_rag_doctor(&project.path, &["init", "--force"], &[])?;

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr_of(&output).contains("Failed to write config to"));
  Ok(())
}
