use crate::checks::{CheckRunner, banners, setup_checks};
use crate::core::context::DoctorContext;
use crate::core::error::DoctorResult;
use std::path::PathBuf;

/// Run the setup checklist, optionally against another document directory
pub fn run_doctor(ctx: &DoctorContext, data_dir: Option<PathBuf>) -> DoctorResult<()> {
  let overridden;
  let ctx = match data_dir {
    Some(dir) => {
      let mut config = ctx.config.clone();
      config.documents.dir = dir;
      overridden = DoctorContext::new(ctx.root.clone(), config, ctx.env_file.clone());
      &overridden
    }
    None => ctx,
  };

  tracing::debug!(dir = %ctx.resolve(&ctx.config.documents.dir).display(), "document directory");

  let mut runner = CheckRunner::new(setup_checks(ctx))
    .with_title(banners::SETUP_TITLE)
    .with_banner(banners::SETUP_BANNER)
    .with_guidance(ctx.config.guidance.next_steps.clone());

  let mut stdout = std::io::stdout().lock();
  let summary = runner.run(&mut stdout)?;
  tracing::info!(
    checks = summary.completed,
    elapsed_ms = summary.elapsed.as_millis() as u64,
    "setup checklist passed"
  );
  Ok(())
}
