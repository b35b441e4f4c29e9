//! Test helpers for integration tests

use anyhow::{Context, Result};
use mockito::Matcher;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Variables the binary reads; cleared so the host environment cannot leak in
const KEY_VARS: &[&str] = &[
  "PINECONE_API_KEY",
  "GOOGLE_API_KEY",
  "HF_TOKEN",
  "RUST_LOG",
  "HTTP_PROXY",
  "HTTPS_PROXY",
  "ALL_PROXY",
  "http_proxy",
  "https_proxy",
  "all_proxy",
];

/// A throwaway chatbot project directory
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Create a project with an empty `Data/` directory
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    std::fs::create_dir_all(path.join("Data"))?;
    Ok(Self { _root: root, path })
  }

  /// Point every service at `server`
  pub fn write_config(&self, server: &MockServer, index: &str) -> Result<()> {
    self.write_config_to("rag-doctor.toml", server, index)
  }

  pub fn write_config_to(&self, file: &str, server: &MockServer, index: &str) -> Result<()> {
    std::fs::write(
      self.path.join(file),
      format!(
        r#"[documents]
dir = "Data"
chunk_size = 40
chunk_overlap = 5

[embeddings]
hub_url = "{url}"

[vector]
index = "{index}"
api_url = "{url}"

[llm]
api_url = "{url}"

[http]
timeout_secs = 5
"#,
        url = server.url(),
        index = index
      ),
    )?;
    Ok(())
  }

  pub fn write_env(&self, content: &str) -> Result<()> {
    self.write_env_to(".env", content)
  }

  pub fn write_env_to(&self, file: &str, content: &str) -> Result<()> {
    std::fs::write(self.path.join(file), content)?;
    Ok(())
  }

  /// Write a one-page PDF whose page shows `text`
  pub fn add_pdf(&self, name: &str, text: &str) -> Result<PathBuf> {
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
      "Type" => "Font",
      "Subtype" => "Type1",
      "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
      "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
      operations: vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![72.into(), 720.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
      ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    let page_id = doc.add_object(dictionary! {
      "Type" => "Page",
      "Parent" => pages_id,
      "Contents" => content_id,
    });
    doc.objects.insert(
      pages_id,
      Object::Dictionary(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
      }),
    );
    let catalog_id = doc.add_object(dictionary! {
      "Type" => "Catalog",
      "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = self.path.join("Data").join(name);
    doc.save(&path).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
  }

  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Run rag-doctor with a clean key environment; never fails on exit status
pub fn run_rag_doctor(cwd: &Path, args: &[&str], env: &[(&str, &str)]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_rag-doctor");

  let mut cmd = Command::new(bin);
  cmd.current_dir(cwd).args(args);
  for var in KEY_VARS {
    cmd.env_remove(var);
  }
  for (key, value) in env {
    cmd.env(key, value);
  }
  cmd.output().context("Failed to run rag-doctor")
}

pub fn stdout_of(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr_of(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}

/// Both keys set to dummy values
pub const ALL_KEYS: &[(&str, &str)] = &[("PINECONE_API_KEY", "pc-test"), ("GOOGLE_API_KEY", "g-test")];

/// One canned JSON reply, chosen by method and a regex on the request path
#[derive(Debug, Clone)]
pub struct Route {
  method: &'static str,
  path: String,
  status: usize,
  body: String,
  header: Option<(String, String)>,
}

impl Route {
  pub fn get(path: &str, status: usize, body: &str) -> Self {
    Self::new("GET", path, status, body)
  }

  pub fn post(path: &str, status: usize, body: &str) -> Self {
    Self::new("POST", path, status, body)
  }

  fn new(method: &'static str, path: &str, status: usize, body: &str) -> Self {
    Self {
      method,
      path: path.to_string(),
      status,
      body: body.to_string(),
      header: None,
    }
  }

  /// Only answer requests carrying this header value
  pub fn with_header(mut self, name: &str, value: &str) -> Self {
    self.header = Some((name.to_string(), value.to_string()));
    self
  }

  fn mount(self, server: &mut mockito::Server) -> mockito::Mock {
    let mut mock = server
      .mock(self.method, Matcher::Regex(self.path))
      .with_status(self.status)
      .with_header("content-type", "application/json")
      .with_body(self.body);
    if let Some((name, value)) = self.header {
      mock = mock.match_header(name, value.as_str());
    }
    mock.create()
  }
}

/// Local stand-in for the model hub, Pinecone and Gemini; unmatched requests get 501
pub struct MockServer {
  server: mockito::ServerGuard,
  _mocks: Vec<mockito::Mock>,
}

impl MockServer {
  pub fn start(routes: Vec<Route>) -> Result<Self> {
    let mut server = mockito::Server::new();
    let mocks = routes.into_iter().map(|route| route.mount(&mut server)).collect();
    Ok(Self { server, _mocks: mocks })
  }

  pub fn url(&self) -> String {
    self.server.url()
  }

  /// Hub, index listing and model replies for a healthy setup
  pub fn healthy(indexes: &[&str]) -> Result<Self> {
    Self::start(vec![
      Route::get(CONFIG_JSON, 200, &model_config(384)),
      Route::get(INDEXES, 200, &index_list(indexes)),
      Route::post(
        GENERATE,
        200,
        r#"{"candidates": [{"content": {"parts": [{"text": "Hello! The test worked."}]}, "finishReason": "STOP"}]}"#,
      ),
    ])
  }
}

pub const CONFIG_JSON: &str = r"/resolve/main/config\.json$";
pub const INDEXES: &str = r"^/indexes$";
pub const GENERATE: &str = r":generateContent$";

/// Hub `config.json` for a BERT-style model
pub fn model_config(hidden_size: usize) -> String {
  format!(r#"{{"hidden_size": {}, "architectures": ["BertModel"]}}"#, hidden_size)
}

/// Body of `GET /indexes` listing `names`, all with dimension 384
pub fn index_list(names: &[&str]) -> String {
  let entries: Vec<String> = names
    .iter()
    .map(|name| {
      format!(
        r#"{{"name": "{}", "dimension": 384, "metric": "cosine", "status": {{"ready": true, "state": "Ready"}}}}"#,
        name
      )
    })
    .collect();
  format!(r#"{{"indexes": [{}]}}"#, entries.join(", "))
}
