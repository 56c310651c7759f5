//! Stable-branch release bumping for a single charm checkout
//!
//! Fetches, creates the local stable branch, points gerrit at it, and pins
//! the known upstream VCS dependencies to their stable branches inside every
//! dependency-declaration file the layout carries.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{FleetResult, ResultExt};
use crate::core::patch::Applied;
use crate::core::vcs::SystemGit;

/// Upstream repos that get a `@stable/<release>` pin.
/// The zaza marker also covers zaza-openstack-tests.
const PIN_MARKERS: &[&str] = &[
  "github.com/juju/charm-helpers",
  "github.com/openstack/charms.openstack",
  "github.com/openstack-charmers/zaza",
];

/// Dependency-declaration files, relative to the charm root. The `src/`
/// copies only exist in nested source layouts; absent files are no-ops.
const PIN_FILES: &[&str] = &[
  "requirements.txt",
  "test-requirements.txt",
  "src/test-requirements.txt",
  "src/wheelhouse.txt",
];

/// What bump did
#[derive(Debug, Clone)]
pub struct BumpReport {
  pub branch: String,
  pub gitreview_updated: bool,
  /// Files whose pins changed
  pub pinned: Vec<PathBuf>,
}

/// Bump the charm checkout at `charm_dir` onto `stable/<branch>` with
/// dependencies pinned at `stable/<release>`. Fail-fast: the first git or
/// I/O failure aborts the run.
pub fn bump_charm(charm_dir: &Path, release: &str, branch: &str) -> FleetResult<BumpReport> {
  let repo = SystemGit::open(charm_dir)?;
  repo.fetch_all()?;

  let local_branch = format!("stable/{}", branch);
  let start_ref = format!("origin/stable/{}", branch);
  repo.create_branch(&local_branch, &start_ref)?;

  let gitreview = charm_dir.join(".gitreview");
  let gitreview_updated = if gitreview.is_file() {
    let line = format!("defaultbranch={}", local_branch);
    crate::core::patch::ensure_line(&gitreview, "defaultbranch", &line)?.changed()
  } else {
    false
  };

  let mut pinned = Vec::new();
  for rel in PIN_FILES {
    let path = charm_dir.join(rel);
    if !path.is_file() {
      continue;
    }
    if pin_requirements(&path, release)?.changed() {
      pinned.push(PathBuf::from(rel));
    }
  }

  // Report the branch git actually landed on, not the one we asked for
  Ok(BumpReport {
    branch: repo.current_branch()?,
    gitreview_updated,
    pinned,
  })
}

/// Pin every known upstream VCS URL in one requirements-style file.
///
/// A line already carrying `@stable/` is left untouched. The pin lands just
/// before a `#egg=` fragment when one is present, else at end of line.
pub fn pin_requirements(path: &Path, release: &str) -> FleetResult<Applied> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

  let trailing_newline = content.ends_with('\n');
  let mut changed = false;
  let lines: Vec<String> = content
    .lines()
    .map(|line| match pin_line(line, release) {
      Some(pinned) => {
        changed = true;
        pinned
      }
      None => line.to_string(),
    })
    .collect();

  if !changed {
    return Ok(Applied::Unchanged);
  }

  let mut updated = lines.join("\n");
  if trailing_newline {
    updated.push('\n');
  }
  fs::write(path, updated).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(Applied::Changed)
}

fn pin_line(line: &str, release: &str) -> Option<String> {
  if !PIN_MARKERS.iter().any(|m| line.contains(m)) || line.contains("@stable/") {
    return None;
  }

  let pin = format!("@stable/{}", release);
  match line.find("#egg=") {
    Some(idx) => Some(format!("{}{}{}", &line[..idx], pin, &line[idx..])),
    None => Some(format!("{}{}", line.trim_end(), pin)),
  }
}
