use crate::checks::{CheckRunner, banners, index_checks};
use crate::core::context::DoctorContext;
use crate::core::error::DoctorResult;

/// Check that the configured (or given) vector index exists
pub fn run_index(ctx: &DoctorContext, index: Option<String>) -> DoctorResult<()> {
  let index = index.unwrap_or_else(|| ctx.config.vector.index.clone());

  let mut runner = CheckRunner::new(index_checks(ctx, &index))
    .with_title(banners::INDEX_TITLE)
    .with_banner(banners::INDEX_BANNER);

  let mut stdout = std::io::stdout().lock();
  let summary = runner.run(&mut stdout)?;
  tracing::info!(
    index = %index,
    elapsed_ms = summary.elapsed.as_millis() as u64,
    "index check passed"
  );
  Ok(())
}
