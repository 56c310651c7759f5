//! System git backend - zero dependencies
//!
//! Uses the system `git` binary for all operations. Optimized for:
//! - Safe subprocess execution (isolated environment)
//! - Fail-fast error surfacing (stderr carried into the error)

use crate::core::error::{FleetError, FleetResult, GitError, ResultExt};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git (zero crate dependencies)
#[derive(Debug)]
pub struct SystemGit {
  /// Repository working directory
  repo_path: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to verify the repository exists.
  pub fn open(path: &Path) -> FleetResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(FleetError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(FleetError::message(format!("Failed to open git repository: {}", stderr)));
    }

    Ok(Self {
      repo_path: path.to_path_buf(),
    })
  }

  /// Fetch all remotes
  pub fn fetch_all(&self) -> FleetResult<()> {
    self.run(&["fetch", "--all"])?;
    Ok(())
  }

  /// Create a local branch from a start ref and check it out
  pub fn create_branch(&self, branch: &str, start_ref: &str) -> FleetResult<()> {
    let output = self
      .git_cmd()
      .args(["checkout", "-b", branch, start_ref])
      .output()
      .context("Failed to execute git checkout")?;

    if !output.status.success() {
      return Err(FleetError::Git(GitError::BranchError {
        message: format!(
          "could not create '{}' from '{}': {}",
          branch,
          start_ref,
          String::from_utf8_lossy(&output.stderr).trim()
        ),
      }));
    }
    Ok(())
  }

  /// Get current branch name
  pub fn current_branch(&self) -> FleetResult<String> {
    let output = self
      .git_cmd()
      .args(["rev-parse", "--abbrev-ref", "HEAD"])
      .output()
      .context("Failed to get current branch")?;

    if !output.status.success() {
      return Ok("HEAD".to_string()); // Detached HEAD
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Stage a path
  pub fn stage(&self, path: &Path) -> FleetResult<()> {
    let path_str = path.to_string_lossy().to_string();
    self.run(&["add", "--", &path_str])?;
    Ok(())
  }

  /// Restore a working-tree file from HEAD, discarding local changes
  pub fn restore_from_head(&self, path: &Path) -> FleetResult<()> {
    let path_str = path.to_string_lossy().to_string();
    self.run(&["checkout", "HEAD", "--", &path_str])?;
    Ok(())
  }

  fn run(&self, args: &[&str]) -> FleetResult<Vec<u8>> {
    let output = self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to execute git {}", args.join(" ")))?;

    if !output.status.success() {
      return Err(FleetError::Git(GitError::CommandFailed {
        command: format!("git {}", args.join(" ")),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
      }));
    }
    Ok(output.stdout)
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Adds safe configuration overrides
  fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    // Set working directory
    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    // Force safe behavior (override user config)
    cmd.arg("-c").arg("protocol.version=2");
    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII

    cmd
  }
}
