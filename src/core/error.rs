//! Error types for charm-fleet with contextual messages and exit codes
//!
//! This module provides a unified error type that categorizes errors and provides
//! contextual help messages to users. Usage errors carry their own rendered text
//! and are printed to stdout, everything else goes to stderr.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for charm-fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, unknown charm kind)
  User = 1,
  /// System error (git, subprocess, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for charm-fleet
#[derive(Debug)]
pub enum FleetError {
  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// Wrapped external tool failed (charmcraft, unzip)
  Subprocess { command: String, stderr: String },

  /// I/O errors
  Io(io::Error),

  /// Bad command invocation; the full usage text is printed to stdout
  Usage { usage: String },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl FleetError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    FleetError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    FleetError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Create a usage error with the text to print on stdout
  pub fn usage(usage: impl Into<String>) -> Self {
    FleetError::Usage { usage: usage.into() }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      FleetError::Message { message, context, help } => FleetError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      FleetError::Config(_) => ExitCode::User,
      FleetError::Git(_) => ExitCode::System,
      FleetError::Subprocess { .. } => ExitCode::System,
      FleetError::Io(_) => ExitCode::System,
      FleetError::Usage { .. } => ExitCode::User,
      FleetError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      FleetError::Config(e) => e.help_message(),
      FleetError::Git(e) => e.help_message(),
      FleetError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for FleetError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FleetError::Config(e) => write!(f, "{}", e),
      FleetError::Git(e) => write!(f, "{}", e),
      FleetError::Subprocess { command, stderr } => {
        write!(f, "Command failed: {}", command)?;
        if !stderr.is_empty() {
          write!(f, "\n{}", stderr)?;
        }
        Ok(())
      }
      FleetError::Io(e) => write!(f, "I/O error: {}", e),
      FleetError::Usage { usage } => write!(f, "{}", usage),
      FleetError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for FleetError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      FleetError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for FleetError {
  fn from(err: io::Error) -> Self {
    FleetError::Io(err)
  }
}

impl From<String> for FleetError {
  fn from(msg: String) -> Self {
    FleetError::message(msg)
  }
}

impl From<&str> for FleetError {
  fn from(msg: &str) -> Self {
    FleetError::message(msg)
  }
}

impl From<toml_edit::de::Error> for FleetError {
  fn from(err: toml_edit::de::Error) -> Self {
    FleetError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for FleetError {
  fn from(err: serde_json::Error) -> Self {
    FleetError::message(format!("JSON error: {}", err))
  }
}

impl From<std::path::StripPrefixError> for FleetError {
  fn from(err: std::path::StripPrefixError) -> Self {
    FleetError::message(format!("Path strip prefix error: {}", err))
  }
}

impl From<anyhow::Error> for FleetError {
  fn from(err: anyhow::Error) -> Self {
    FleetError::message(err.to_string())
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Charms directory not found or not a directory
  CharmsDirNotFound { path: PathBuf },

  /// Templates directory not found
  TemplatesDirNotFound { path: PathBuf },

  /// A required template file is missing
  TemplateMissing { path: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::CharmsDirNotFound { .. } => {
        Some("Set `charms_dir` in fleet.toml, or run from the fleet checkout root.".to_string())
      }
      ConfigError::TemplatesDirNotFound { .. } => {
        Some("Set `templates_dir` in fleet.toml to the directory holding per-kind template trees.".to_string())
      }
      ConfigError::TemplateMissing { path } => Some(format!(
        "Add the template file at {} or point `templates_dir` at a checkout that has it.",
        path.display()
      )),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::CharmsDirNotFound { path } => {
        write!(f, "Charms directory not found: {}", path.display())
      }
      ConfigError::TemplatesDirNotFound { path } => {
        write!(f, "Templates directory not found: {}", path.display())
      }
      ConfigError::TemplateMissing { path } => {
        write!(f, "Template file not found: {}", path.display())
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// Branch operation failed
  BranchError { message: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { path } => Some(format!(
        "Run this command from inside a charm checkout, or check the path: {}",
        path.display()
      )),
      GitError::BranchError { .. } => {
        Some("Check that the remote branch exists: git branch -r".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::BranchError { message } => {
        write!(f, "Branch operation failed: {}", message)
      }
    }
  }
}

/// Result type alias for charm-fleet
pub type FleetResult<T> = Result<T, FleetError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> FleetResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> FleetResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<FleetError>,
{
  fn context(self, ctx: impl Into<String>) -> FleetResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> FleetResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error with help text
///
/// Usage errors go to stdout so that `charm-fleet bump` with no arguments
/// behaves like the tool printing its own usage banner.
pub fn print_error(error: &FleetError) {
  if let FleetError::Usage { usage } = error {
    println!("{}", usage);
    return;
  }

  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
