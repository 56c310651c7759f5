//! Idempotent file patching primitives
//!
//! Every mutation here applies a desired state rather than performing an
//! action: running any of these twice with the same arguments leaves the
//! tree byte-identical to running them once. Callers branch on the returned
//! outcome to report "changed" vs "already satisfied".

use std::fs;
use std::path::Path;

use crate::core::error::{FleetResult, ResultExt};

/// Outcome of an apply-desired-state mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
  /// The file or directory was modified
  Changed,
  /// The desired state already held
  Unchanged,
}

impl Applied {
  pub fn changed(self) -> bool {
    self == Applied::Changed
  }
}

/// Outcome of cloning lines from one token to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneOutcome {
  /// New lines were inserted
  Inserted,
  /// The target token already appears; nothing to do
  TargetExists,
  /// No line carries the source token; nothing to clone from
  SourceMissing,
}

/// Ensure `dir` exists and contains an (empty) marker file.
pub fn ensure_dir_with_marker(dir: &Path, marker: &str) -> FleetResult<Applied> {
  let marker_path = dir.join(marker);
  if marker_path.exists() {
    return Ok(Applied::Unchanged);
  }

  fs::create_dir_all(dir).with_context(|| format!("Failed to create directory {}", dir.display()))?;
  fs::write(&marker_path, "").with_context(|| format!("Failed to write {}", marker_path.display()))?;
  Ok(Applied::Changed)
}

/// Copy `src` over `dst` unconditionally, creating parent directories.
/// Last write wins; the source is the authority.
pub fn copy_over(src: &Path, dst: &Path) -> FleetResult<()> {
  if let Some(parent) = dst.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {}", parent.display()))?;
  }
  fs::copy(src, dst)
    .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;
  Ok(())
}

/// Append `line` to `path` unless some existing line already contains `guard`.
pub fn ensure_line(path: &Path, guard: &str, line: &str) -> FleetResult<Applied> {
  let content = read(path)?;
  if content.lines().any(|l| l.contains(guard)) {
    return Ok(Applied::Unchanged);
  }

  let mut updated = content;
  if !updated.is_empty() && !updated.ends_with('\n') {
    updated.push('\n');
  }
  updated.push_str(line);
  updated.push('\n');
  write(path, &updated)?;
  Ok(Applied::Changed)
}

/// Replace the first occurrence of `from` with `to`.
pub fn replace_once(path: &Path, from: &str, to: &str) -> FleetResult<Applied> {
  let content = read(path)?;
  let Some(idx) = content.find(from) else {
    return Ok(Applied::Unchanged);
  };

  let mut updated = String::with_capacity(content.len() + to.len());
  updated.push_str(&content[..idx]);
  updated.push_str(to);
  updated.push_str(&content[idx + from.len()..]);
  write(path, &updated)?;
  Ok(Applied::Changed)
}

/// Replace every occurrence of `from` with `to`.
pub fn replace_all(path: &Path, from: &str, to: &str) -> FleetResult<Applied> {
  let content = read(path)?;
  if !content.contains(from) {
    return Ok(Applied::Unchanged);
  }

  write(path, &content.replace(from, to))?;
  Ok(Applied::Changed)
}

/// For every line containing `from`, insert a duplicate of that line (with
/// `from` rewritten to `to`) immediately after it. All other lines keep
/// their order. Guarded both ways: a file already mentioning `to` is left
/// alone, and a file never mentioning `from` has nothing to clone.
pub fn clone_matching_lines(path: &Path, from: &str, to: &str) -> FleetResult<CloneOutcome> {
  let content = read(path)?;
  if content.contains(to) {
    return Ok(CloneOutcome::TargetExists);
  }
  if !content.contains(from) {
    return Ok(CloneOutcome::SourceMissing);
  }

  let trailing_newline = content.ends_with('\n');
  let mut lines = Vec::new();
  for line in content.lines() {
    lines.push(line.to_string());
    if line.contains(from) {
      lines.push(line.replace(from, to));
    }
  }

  let mut updated = lines.join("\n");
  if trailing_newline {
    updated.push('\n');
  }
  write(path, &updated)?;
  Ok(CloneOutcome::Inserted)
}

fn read(path: &Path) -> FleetResult<String> {
  fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write(path: &Path, content: &str) -> FleetResult<()> {
  fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
