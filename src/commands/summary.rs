//! `corral summary`: software summary table for a herd of repositories

use crate::core::config::HerdConfig;
use crate::core::error::CorralResult;
use crate::github::GithubClient;
use crate::herd::{Herd, HerdOptions};
use crate::summary::{self, OutputFormat, SummaryOptions};
use crate::ui::progress::HerdProgress;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Run the summary command
pub fn run_summary(
  config: PathBuf,
  root_dir: PathBuf,
  output: Option<PathBuf>,
  token: Option<String>,
  dev: bool,
  version: Option<String>,
  format: String,
) -> CorralResult<()> {
  let format: OutputFormat = format.parse()?;
  let config = HerdConfig::load(&config)?;
  let client = GithubClient::new(token)?;

  let mut progress = (!config.cattle.is_empty() && std::io::stderr().is_terminal())
    .then(|| HerdProgress::new(config.cattle.len(), "Fetching herd"));

  let herd = Herd::build(&config, &HerdOptions { dev, version }, &client, &mut |_| {
    if let Some(bar) = progress.as_mut() {
      bar.inc();
    }
  })?;

  let path = summary::write_build_summary(
    &herd,
    &SummaryOptions {
      dev,
      root_dir,
      output,
      format,
      image_base_url: config.summary.image_base_url.clone(),
    },
  )?;

  println!("{}", path.display());
  Ok(())
}
