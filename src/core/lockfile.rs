//! charmcraft build.lock extraction for source charms
//!
//! Builds the charm once with a lock-enabling charmcraft.yaml, pulls
//! `src/build.lock` out of the packed archive, then puts the checkout back
//! the way it was. Classic charms and charms that already carry a lock are
//! informational no-ops.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::charm::CharmKind;
use crate::core::error::{ConfigError, FleetError, FleetResult, ResultExt};
use crate::core::patch;
use crate::core::vcs::SystemGit;

const LOCK_TEMPLATE: &str = "charmcraft-build-lock.yaml";
const LOCK_FILE: &str = "src/build.lock";

/// How a lock run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockOutcome {
  /// Not a source charm; nothing to lock
  NotSource(CharmKind),
  /// src/build.lock already present
  AlreadyLocked,
  /// Lock file written
  Built { lock_path: PathBuf },
}

/// Build the lock file for the source charm at `charm_dir`.
pub fn build_lock(charm_dir: &Path, templates_dir: &Path) -> FleetResult<LockOutcome> {
  let kind = CharmKind::classify(charm_dir);
  if kind != CharmKind::Source {
    return Ok(LockOutcome::NotSource(kind));
  }

  let lock_path = charm_dir.join(LOCK_FILE);
  if lock_path.is_file() {
    return Ok(LockOutcome::AlreadyLocked);
  }

  let template = templates_dir.join("source").join(LOCK_TEMPLATE);
  if !template.is_file() {
    return Err(FleetError::Config(ConfigError::TemplateMissing { path: template }));
  }

  // The descriptor swap is temporary; charmcraft.yaml is restored from HEAD
  // after the pack.
  let charmcraft_yaml = charm_dir.join("charmcraft.yaml");
  patch::copy_over(&template, &charmcraft_yaml)?;

  charmcraft_pack(charm_dir)?;

  let archive = newest_charm_archive(charm_dir)?;
  let lock_bytes = unzip_member(charm_dir, &archive, LOCK_FILE)?;
  if let Some(parent) = lock_path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&lock_path, lock_bytes).with_context(|| format!("Failed to write {}", lock_path.display()))?;

  let repo = SystemGit::open(charm_dir)?;
  repo.restore_from_head(Path::new("charmcraft.yaml"))?;
  fs::remove_file(&archive).with_context(|| format!("Failed to remove {}", archive.display()))?;

  fix_lock_branches(&lock_path)?;

  Ok(LockOutcome::Built { lock_path })
}

/// charmcraft writes branches as `refs/heads/<name>`; the lock consumers
/// expect the bare branch name.
pub fn fix_lock_branches(lock_path: &Path) -> FleetResult<()> {
  patch::replace_all(lock_path, "\"branch\": \"refs/heads/", "\"branch\": \"")?;
  Ok(())
}

/// Run `charmcraft pack`, passing its output through. Fail-fast on a
/// non-zero exit.
fn charmcraft_pack(charm_dir: &Path) -> FleetResult<()> {
  let status = tool_cmd("charmcraft", charm_dir)
    .arg("pack")
    .status()
    .context("Failed to execute charmcraft pack")?;

  if !status.success() {
    return Err(FleetError::Subprocess {
      command: "charmcraft pack".to_string(),
      stderr: format!("exit status {}", status),
    });
  }
  Ok(())
}

/// Extract one archive member to stdout via `unzip -p`.
fn unzip_member(charm_dir: &Path, archive: &Path, member: &str) -> FleetResult<Vec<u8>> {
  let output = tool_cmd("unzip", charm_dir)
    .arg("-p")
    .arg(archive)
    .arg(member)
    .output()
    .context("Failed to execute unzip")?;

  if !output.status.success() {
    return Err(FleetError::Subprocess {
      command: format!("unzip -p {} {}", archive.display(), member),
      stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    });
  }
  Ok(output.stdout)
}

/// Newest `*.charm` archive in the charm root
fn newest_charm_archive(charm_dir: &Path) -> FleetResult<PathBuf> {
  let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;
  for entry in fs::read_dir(charm_dir).with_context(|| format!("Failed to list {}", charm_dir.display()))? {
    let entry = entry?;
    let path = entry.path();
    if path.extension().is_none_or(|e| e != "charm") {
      continue;
    }
    let modified = entry.metadata()?.modified()?;
    if newest.as_ref().is_none_or(|(t, _)| modified > *t) {
      newest = Some((modified, path));
    }
  }

  newest.map(|(_, p)| p).ok_or_else(|| {
    FleetError::with_help(
      format!("No .charm archive found in {}", charm_dir.display()),
      "charmcraft pack should have produced one; check its output above",
    )
  })
}

/// Isolated subprocess in the same style as the git wrapper
fn tool_cmd(program: &str, dir: &Path) -> Command {
  let mut cmd = Command::new(program);
  cmd.current_dir(dir);
  cmd.env_clear();
  if let Ok(path) = std::env::var("PATH") {
    cmd.env("PATH", path);
  }
  if let Ok(home) = std::env::var("HOME") {
    cmd.env("HOME", home);
  }
  cmd
}
