//! Tests for the `doctor` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_doctor_all_checks_pass() -> Result<()> {
  let project = TestProject::new()?;
  let server = MockServer::healthy(&["medicalbot"])?;
  project.write_config(&server, "medicalbot")?;
  project.add_pdf("guide.pdf", "Aspirin is used to reduce fever and relieve mild pain.")?;

  let output = run_rag_doctor(&project.path, &["doctor"], ALL_KEYS)?;
  let stdout = stdout_of(&output);

  assert!(output.status.success(), "stdout: {}\nstderr: {}", stdout, stderr_of(&output));
  assert_eq!(stdout.matches("✅").count(), 7);
  assert!(stdout.contains("🔍 Testing RAG chatbot setup"));
  assert!(stdout.contains("Loaded 1 PDF page from 1 file"));
  assert!(stdout.contains("ready (BertModel, 384 dimensions)"));
  assert!(stdout.contains("available indexes: [medicalbot]"));
  assert!(stdout.contains("responded: Hello! The test worked."));
  assert!(stdout.contains("🎉 All checks passed! Your chatbot setup is ready."));
  assert!(stdout.contains("📋 Next steps:"));
  assert!(stdout.contains("   3. Open http://localhost:8080"));
  Ok(())
}

#[test]
fn test_doctor_missing_keys_stops_at_step_two() -> Result<()> {
  let project = TestProject::new()?;
  let server = MockServer::healthy(&["medicalbot"])?;
  project.write_config(&server, "medicalbot")?;

  let output = run_rag_doctor(&project.path, &["doctor"], &[])?;
  let stdout = stdout_of(&output);

  assert_eq!(output.status.code(), Some(1));
  assert!(stdout.contains("1. Initializing clients..."));
  assert!(stdout.contains(
    "   ❌ Checking environment variables failed: API keys not found: PINECONE_API_KEY, GOOGLE_API_KEY"
  ));
  assert!(!stdout.contains("3. Loading PDF documents"));
  assert!(!stdout.contains("🎉"));
  // The failure report is not repeated on stderr
  assert!(!stderr_of(&output).contains("API keys not found"));
  Ok(())
}

#[test]
fn test_doctor_reads_keys_from_dotenv() -> Result<()> {
  let project = TestProject::new()?;
  let server = MockServer::healthy(&["medicalbot"])?;
  project.write_config(&server, "medicalbot")?;
  project.write_env("PINECONE_API_KEY=pc-from-file\nGOOGLE_API_KEY=g-from-file\n")?;

  let output = run_rag_doctor(&project.path, &["doctor"], &[])?;
  let stdout = stdout_of(&output);

  assert!(output.status.success(), "stdout: {}", stdout);
  assert!(stdout.contains("API keys loaded (PINECONE_API_KEY, GOOGLE_API_KEY)"));
  Ok(())
}

#[test]
fn test_doctor_missing_data_dir_fails_at_step_three() -> Result<()> {
  let project = TestProject::new()?;
  let server = MockServer::healthy(&["medicalbot"])?;
  project.write_config(&server, "medicalbot")?;

  let output = run_rag_doctor(&project.path, &["doctor", "--data-dir", "NoSuchDir"], ALL_KEYS)?;
  let stdout = stdout_of(&output);

  assert_eq!(output.status.code(), Some(1));
  assert!(stdout.contains("❌ Loading PDF documents failed: document directory not found"));
  assert_eq!(stdout.matches("✅").count(), 2);
  assert!(!stdout.contains("4. Splitting text into chunks"));
  Ok(())
}

#[test]
fn test_doctor_llm_failure_prints_tip() -> Result<()> {
  let project = TestProject::new()?;
  let server = MockServer::start(vec![
    Route::get(CONFIG_JSON, 200, &model_config(384)),
    Route::get(INDEXES, 200, &index_list(&["medicalbot"])),
    Route::post(
      GENERATE,
      403,
      r#"{"error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}}"#,
    ),
  ])?;
  project.write_config(&server, "medicalbot")?;

  let output = run_rag_doctor(&project.path, &["doctor"], ALL_KEYS)?;
  let stdout = stdout_of(&output);

  assert_eq!(output.status.code(), Some(1));
  assert_eq!(stdout.matches("✅").count(), 6);
  assert!(stdout.contains("❌ Calling language model failed:"));
  assert!(stdout.contains("API key not valid"));
  assert!(stdout.contains("💡 Tip: Check that your Google API key is valid"));
  assert!(!stdout.contains("🎉"));
  Ok(())
}

#[test]
fn test_doctor_invalid_config_exits_with_config_code() -> Result<()> {
  let project = TestProject::new()?;
  std::fs::write(
    project.path.join("rag-doctor.toml"),
    "[documents]\nchunk_size = 10\nchunk_overlap = 10\n",
  )?;

  let output = run_rag_doctor(&project.path, &["doctor"], ALL_KEYS)?;

  assert_eq!(output.status.code(), Some(2));
  assert!(stdout_of(&output).is_empty());
  assert!(stderr_of(&output).contains("chunk_overlap"));
  Ok(())
}

#[test]
fn test_doctor_index_dimension_mismatch_fails_at_step_six() -> Result<()> {
  let project = TestProject::new()?;
  let server = MockServer::start(vec![
    Route::get(CONFIG_JSON, 200, &model_config(768)),
    Route::get(INDEXES, 200, &index_list(&["medicalbot"])),
  ])?;
  project.write_config(&server, "medicalbot")?;

  let output = run_rag_doctor(&project.path, &["doctor"], ALL_KEYS)?;
  let stdout = stdout_of(&output);

  assert_eq!(output.status.code(), Some(1));
  assert_eq!(stdout.matches("✅").count(), 5);
  assert!(stdout.contains(
    "❌ Connecting to vector database failed: 'medicalbot' index has dimension 384 but the embedding model produces 768"
  ));
  assert!(!stdout.contains("7. Calling language model"));
  Ok(())
}

#[test]
fn test_doctor_environment_wins_over_dotenv() -> Result<()> {
  let project = TestProject::new()?;
  let server = MockServer::start(vec![
    Route::get(CONFIG_JSON, 200, &model_config(384)),
    Route::get(INDEXES, 200, &index_list(&["medicalbot"])).with_header("Api-Key", "pc-from-env"),
    Route::post(
      GENERATE,
      200,
      r#"{"candidates": [{"content": {"parts": [{"text": "hi"}]}}]}"#,
    )
    .with_header("x-goog-api-key", "g-from-file"),
  ])?;
  project.write_config(&server, "medicalbot")?;
  project.write_env("PINECONE_API_KEY=pc-from-file\nGOOGLE_API_KEY=g-from-file\n")?;

  // Only the Pinecone key is set in the process; Gemini's comes from .env
  let output = run_rag_doctor(&project.path, &["doctor"], &[("PINECONE_API_KEY", "pc-from-env")])?;
  let stdout = stdout_of(&output);

  assert!(output.status.success(), "stdout: {}", stdout);
  assert_eq!(stdout.matches("✅").count(), 7);
  Ok(())
}
