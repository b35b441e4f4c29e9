mod checks;
mod collab;
mod commands;
mod core;
mod ui;
mod utils;

use clap::{Parser, Subcommand};
use crate::core::config::CONFIG_FILE_NAME;
use crate::core::context::DoctorContext;
use crate::core::error::{DoctorError, print_error};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Verify a RAG chatbot setup, one check at a time
#[derive(Parser)]
#[command(name = "rag-doctor")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct RagDoctorCli {
  /// Path to rag-doctor.toml (default: search the working directory; `init` writes here)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Env file to load API keys from (default: search for .env)
  #[arg(long, global = true)]
  env_file: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Run the full setup checklist (keys, documents, models, services)
  Doctor {
    /// Directory of PDF documents (overrides documents.dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,
  },

  /// Check that the vector index exists
  Index {
    /// Index name (overrides vector.index)
    #[arg(long)]
    index: Option<String>,
  },

  /// Write a default rag-doctor.toml
  Init {
    /// Overwrite an existing configuration file
    #[arg(short, long)]
    force: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  use anstyle::{AnsiColor, Color, Style};

  let fg = |color: AnsiColor| Style::new().fg_color(Some(Color::Ansi(color)));

  clap::builder::Styles::styled()
    .header(fg(AnsiColor::Cyan).bold())
    .usage(fg(AnsiColor::Cyan).bold())
    .literal(fg(AnsiColor::BrightGreen).bold())
    .placeholder(fg(AnsiColor::BrightBlack))
    .valid(fg(AnsiColor::Green))
    .invalid(fg(AnsiColor::Yellow).bold())
    .error(fg(AnsiColor::Red).bold())
}

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = RagDoctorCli::parse();
  init_tracing();

  let root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => handle_error(DoctorError::from(e).context("Failed to get current directory")),
  };

  // init runs before any config exists, so it never loads one; --config names the file to write
  if let Commands::Init { force } = cli.command {
    let target = match cli.config {
      Some(path) if path.is_absolute() => path,
      Some(path) => root.join(path),
      None => root.join(CONFIG_FILE_NAME),
    };
    if let Err(err) = commands::run_init(&target, force) {
      handle_error(err);
    }
    return;
  }

  let ctx = match DoctorContext::build(&root, cli.config.as_deref(), cli.env_file) {
    Ok(ctx) => ctx,
    Err(err) => handle_error(err),
  };

  let result = match cli.command {
    Commands::Doctor { data_dir } => commands::run_doctor(&ctx, data_dir),
    Commands::Index { index } => commands::run_index(&ctx, index),
    Commands::Init { .. } => Ok(()),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: DoctorError) -> ! {
  // A failed check has already printed its own report on stdout
  if !err.already_reported() {
    print_error(&err);
  }
  std::process::exit(err.exit_code().as_i32());
}
