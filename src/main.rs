mod commands;
mod core;
mod github;
mod herd;
mod snapshot;
mod summary;
mod ui;
mod utils;
mod version;

use clap::{Parser, Subcommand};
use crate::core::error::{CorralError, report_error};
use crate::core::logging::{LoggingConfig, init_logging};
use std::path::PathBuf;

/// Nightly snapshot releases and herd-wide software summaries
#[derive(Parser)]
#[command(name = "corral")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Log level: trace, debug, info, warn, error (default: CORRAL_LOG_LEVEL or info)
  #[arg(long, global = true)]
  log_level: Option<String>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Replace the repository's nightly snapshot release (GitHub Actions)
  ///
  /// Reads GITHUB_WORKSPACE and GITHUB_REPOSITORY.
  Snapshot {
    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Branch whose tip gets tagged
    #[arg(long, default_value = "master")]
    branch: String,
    /// Build descriptor holding the version, relative to GITHUB_WORKSPACE
    #[arg(long, default_value = "pom.xml")]
    descriptor: PathBuf,
    /// Name recorded on the annotated tag
    #[arg(long, default_value = "github-actions[bot]")]
    tagger_name: String,
    /// Email recorded on the annotated tag
    #[arg(long, default_value = "41898282+github-actions[bot]@users.noreply.github.com")]
    tagger_email: String,
  },

  /// Generate the software summary table for a herd of repositories
  Summary {
    /// Herd configuration file, or a directory containing corral.toml
    #[arg(long, default_value = ".")]
    config: PathBuf,
    /// Root directory; the summary goes to <root-dir>/<version>/index.<ext>
    #[arg(long, default_value = ".")]
    root_dir: PathBuf,
    /// Explicit output path (extension added if missing)
    #[arg(long)]
    output: Option<PathBuf>,
    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Development summary: the build version must be a snapshot
    #[arg(long)]
    dev: bool,
    /// Build version override (skips the shepherd descriptor)
    #[arg(long = "build-version", visible_alias = "shepherd-version")]
    build_version: Option<String>,
    /// Output format: md (default), rst
    #[arg(long, default_value = "md")]
    format: String,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  init_logging(LoggingConfig::from_env(cli.log_level.as_deref()));

  let result = match cli.command {
    Commands::Snapshot {
      token,
      branch,
      descriptor,
      tagger_name,
      tagger_email,
    } => commands::run_snapshot(token, branch, descriptor, tagger_name, tagger_email),
    Commands::Summary {
      config,
      root_dir,
      output,
      token,
      dev,
      build_version,
      format,
    } => commands::run_summary(config, root_dir, output, token, dev, build_version, format),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: CorralError) -> ! {
  report_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
