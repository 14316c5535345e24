//! Error types for corral with contextual messages and exit codes
//!
//! Every failure in corral is unrecoverable at the point of detection: nothing is
//! retried or downgraded to a warning. Errors bubble up to `main`, get logged once
//! with an optional help line, and the process exits with the category's code.

use crate::version::VersionKind;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for corral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (remote API, network, I/O)
  System = 2,
  /// Validation failure (dev/release mode mismatch)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for corral
#[derive(Debug)]
pub enum CorralError {
  /// A file, branch, release or version node that must exist does not
  NotFound { what: String },

  /// The hosting service refused an operation (duplicate tag, bad credentials, ...)
  RemoteRejected {
    operation: String,
    status: Option<u16>,
    message: String,
  },

  /// The requested summary mode contradicts the build version's classification
  ModeMismatch {
    requested: VersionKind,
    actual: VersionKind,
    version: String,
  },

  /// Configuration errors
  Config(ConfigError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl CorralError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    CorralError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    CorralError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  pub fn not_found(what: impl Into<String>) -> Self {
    CorralError::NotFound { what: what.into() }
  }

  pub fn rejected(operation: impl Into<String>, status: Option<u16>, message: impl Into<String>) -> Self {
    CorralError::RemoteRejected {
      operation: operation.into(),
      status,
      message: message.into(),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      CorralError::Message { message, context, help } => CorralError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      CorralError::Io(e) => CorralError::Message {
        message: format!("{}: {}", ctx_str, e),
        context: None,
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      CorralError::NotFound { .. } => ExitCode::User,
      CorralError::RemoteRejected { .. } => ExitCode::System,
      CorralError::ModeMismatch { .. } => ExitCode::Validation,
      CorralError::Config(_) => ExitCode::User,
      CorralError::Io(_) => ExitCode::System,
      CorralError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      CorralError::Config(e) => e.help_message(),
      CorralError::RemoteRejected { status, .. } => match status {
        Some(401) | Some(403) => Some("Check that --token (or GITHUB_TOKEN) grants write access to the repository.".to_string()),
        Some(422) => Some("The tag or release probably exists already; delete it or bump the version.".to_string()),
        _ => None,
      },
      CorralError::ModeMismatch { requested, .. } => Some(match requested {
        VersionKind::Development => "Drop --dev to publish a release summary, or point at a snapshot build.".to_string(),
        VersionKind::Release => "Pass --dev to publish a development summary, or point at a release build.".to_string(),
      }),
      CorralError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for CorralError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CorralError::NotFound { what } => write!(f, "Not found: {}", what),
      CorralError::RemoteRejected {
        operation,
        status,
        message,
      } => match status {
        Some(code) => write!(f, "GitHub rejected {} (HTTP {}): {}", operation, code, message),
        None => write!(f, "GitHub rejected {}: {}", operation, message),
      },
      CorralError::ModeMismatch {
        requested,
        actual,
        version,
      } => write!(
        f,
        "Build version '{}' is a {} version, refusing to generate a {} summary",
        version, actual, requested
      ),
      CorralError::Config(e) => write!(f, "{}", e),
      CorralError::Io(e) => write!(f, "I/O error: {}", e),
      CorralError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for CorralError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      CorralError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for CorralError {
  fn from(err: io::Error) -> Self {
    CorralError::Io(err)
  }
}

impl From<String> for CorralError {
  fn from(msg: String) -> Self {
    CorralError::message(msg)
  }
}

impl From<&str> for CorralError {
  fn from(msg: &str) -> Self {
    CorralError::message(msg)
  }
}

impl From<toml_edit::TomlError> for CorralError {
  fn from(err: toml_edit::TomlError) -> Self {
    CorralError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for CorralError {
  fn from(err: toml_edit::de::Error) -> Self {
    CorralError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<roxmltree::Error> for CorralError {
  fn from(err: roxmltree::Error) -> Self {
    CorralError::message(format!("XML parse error: {}", err))
  }
}

impl From<serde_json::Error> for CorralError {
  fn from(err: serde_json::Error) -> Self {
    CorralError::message(format!("JSON error: {}", err))
  }
}

impl From<reqwest::Error> for CorralError {
  fn from(err: reqwest::Error) -> Self {
    CorralError::RemoteRejected {
      operation: err
        .url()
        .map(|u| format!("request to {}", u.path()))
        .unwrap_or_else(|| "request".to_string()),
      status: err.status().map(|s| s.as_u16()),
      message: err.to_string(),
    }
  }
}

impl From<std::env::VarError> for CorralError {
  fn from(err: std::env::VarError) -> Self {
    CorralError::message(format!("Environment variable error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// corral.toml not found
  NotFound { search_root: PathBuf },

  /// Missing required field
  MissingField { field: String },

  /// Repository slug is not `owner/name`
  InvalidRepo { repo: String },

  /// Same repository listed twice
  DuplicateRepo { repo: String },

  /// Required environment variable unset
  MissingEnv { name: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some("Pass --config <file> or create corral.toml with a [[cattle]] list.".to_string()),
      ConfigError::InvalidRepo { .. } => Some("Repositories are written as owner/name, e.g. NASA-PDS/validate.".to_string()),
      ConfigError::MissingEnv { name } => Some(format!(
        "{} is set by GitHub Actions; export it when running outside a workflow.",
        name
      )),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { search_root } => {
        write!(
          f,
          "No corral configuration found.\nSearched: {}/corral.toml, .corral.toml, .config/corral.toml",
          search_root.display()
        )
      }
      ConfigError::MissingField { field } => {
        write!(f, "Missing required field in config: {}", field)
      }
      ConfigError::InvalidRepo { repo } => {
        write!(f, "Invalid repository '{}': expected owner/name", repo)
      }
      ConfigError::DuplicateRepo { repo } => {
        write!(f, "Repository '{}' is listed more than once", repo)
      }
      ConfigError::MissingEnv { name } => {
        write!(f, "Environment variable {} is not set", name)
      }
    }
  }
}

/// Result type alias for corral
pub type CorralResult<T> = Result<T, CorralError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> CorralResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> CorralResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<CorralError>,
{
  fn context(self, ctx: impl Into<String>) -> CorralResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> CorralResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Log an error once at the process boundary, with its help text if any
pub fn report_error(error: &CorralError) {
  tracing::error!(exit_code = error.exit_code().as_i32(), "{}", error);

  if let Some(help) = error.help_message() {
    tracing::info!("help: {}", help);
  }
}
