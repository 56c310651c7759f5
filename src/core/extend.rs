//! Release-matrix extension for one charm checkout
//!
//! Given the previous and new series/UCA bundle names plus the new Ubuntu
//! version, extends the charm's test bundles, tests.yaml gate lists, CI job
//! wiring and charmcraft build targets. Every step is guarded so a re-run
//! with identical arguments only takes skip branches.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::bundle::BundleName;
use crate::core::charm::{Charm, CharmKind};
use crate::core::error::{FleetResult, ResultExt};
use crate::core::patch::{self, Applied, CloneOutcome};
use crate::core::vcs::SystemGit;

/// Candidate bundle directories, nested layout first
const BUNDLE_DIRS: &[&str] = &["src/tests/bundles", "tests/bundles"];

/// CI files that carry per-release job lists
const CI_FILES: &[&str] = &["osci.yaml", ".zuul.yaml"];

const RUN_ON_ARCHES: &str = "[amd64, s390x, ppc64el, arm64]";

/// Arguments for one matrix extension
#[derive(Debug, Clone)]
pub struct ExtendParams {
  pub prev_series: BundleName,
  pub prev_uca: BundleName,
  pub new_series: BundleName,
  pub new_uca: BundleName,
  pub ubuntu_version: String,
}

impl ExtendParams {
  /// Job-list tokens derive from the series bundle codenames
  fn prev_token(&self, suffix: &str) -> String {
    format!("charm-{}-{}", self.prev_series.codename, suffix)
  }

  fn new_token(&self, suffix: &str) -> String {
    format!("charm-{}-{}", self.new_series.codename, suffix)
  }
}

/// What extend did to one charm
#[derive(Debug, Clone, Default)]
pub struct ExtendReport {
  /// Charm was skipped entirely (unknown kind or no bundles dir)
  pub skipped: bool,
  /// New bundle files written this run
  pub bundles_added: Vec<PathBuf>,
  /// CI files that gained cloned job lines
  pub ci_updated: Vec<PathBuf>,
  pub default_updated: bool,
  pub charmcraft_updated: bool,
}

/// Extend the release matrix of one charm. Unknown charms are tolerated and
/// skipped silently; a charm without a bundles directory is skipped with a
/// warning.
pub fn extend_charm(charm: &Charm, params: &ExtendParams) -> FleetResult<ExtendReport> {
  let mut report = ExtendReport::default();

  if charm.kind() == CharmKind::Unknown {
    report.skipped = true;
    return Ok(report);
  }

  let Some(bundles_dir) = BUNDLE_DIRS.iter().map(|d| charm.path.join(d)).find(|d| d.is_dir()) else {
    println!("⚠️  {}: no bundles directory, skipping", charm.name);
    report.skipped = true;
    return Ok(report);
  };

  let pairs = [
    (&params.prev_series, &params.new_series),
    (&params.prev_uca, &params.new_uca),
  ];
  for (prev, new) in pairs {
    extend_bundle_pair(charm, &bundles_dir, prev, new, &mut report)?;
  }

  extend_ci_jobs(charm, params, &mut report)?;
  update_osci_default(charm, params, &mut report)?;
  extend_charmcraft_targets(charm, &params.ubuntu_version, &mut report)?;

  Ok(report)
}

/// Clone one bundle file and extend the sibling tests.yaml gate list.
fn extend_bundle_pair(
  charm: &Charm,
  bundles_dir: &Path,
  prev: &BundleName,
  new: &BundleName,
  report: &mut ExtendReport,
) -> FleetResult<()> {
  let prev_path = bundles_dir.join(prev.filename());
  let new_path = bundles_dir.join(new.filename());

  if !prev_path.is_file() {
    println!("⚠️  {}: bundle {} not found, skipping pair", charm.name, prev.filename());
  } else if new_path.is_file() {
    println!("   Bundle already exists: {}", new.filename());
  } else {
    patch::copy_over(&prev_path, &new_path)?;
    patch::replace_once(&new_path, &prev.release, &new.release)?;
    patch::replace_once(&new_path, &prev.series, &new.series)?;

    let content = fs::read_to_string(&new_path).with_context(|| format!("Failed to read {}", new_path.display()))?;
    if serde_yaml::from_str::<serde_yaml::Value>(&content).is_err() {
      println!("⚠️  {}: {} no longer parses as YAML", charm.name, new.filename());
    }

    let repo = SystemGit::open(&charm.path)?;
    repo.stage(&new_path)?;
    report.bundles_added.push(new_path.clone());
  }

  // The gate list lives next to the bundles directory
  if let Some(tests_dir) = bundles_dir.parent() {
    let tests_yaml = tests_dir.join("tests.yaml");
    if tests_yaml.is_file()
      && clone_matching_with_notice(charm, &tests_yaml, &prev.release, &new.release)? == CloneOutcome::Inserted
    {
      report.ci_updated.push(tests_yaml);
    }
  }

  Ok(())
}

/// Clone unit/functional job lines for the new codename in every CI file.
fn extend_ci_jobs(charm: &Charm, params: &ExtendParams, report: &mut ExtendReport) -> FleetResult<()> {
  for ci_file in CI_FILES {
    let path = charm.path.join(ci_file);
    if !path.is_file() {
      continue;
    }

    let mut inserted = false;
    for suffix in ["unit-jobs", "functional-jobs"] {
      let prev_token = params.prev_token(suffix);
      let new_token = params.new_token(suffix);
      if clone_matching_with_notice(charm, &path, &prev_token, &new_token)? == CloneOutcome::Inserted {
        inserted = true;
      }
    }
    if inserted {
      report.ci_updated.push(path);
    }
  }
  Ok(())
}

fn clone_matching_with_notice(charm: &Charm, path: &Path, from: &str, to: &str) -> FleetResult<CloneOutcome> {
  let outcome = patch::clone_matching_lines(path, from, to)?;
  let file = path.file_name().map(|f| f.to_string_lossy().to_string()).unwrap_or_default();
  match outcome {
    CloneOutcome::Inserted => {}
    CloneOutcome::TargetExists => {
      println!("   {}: {} already has '{}'", charm.name, file, to);
    }
    CloneOutcome::SourceMissing => {
      println!("   {}: {} has no '{}' to clone from", charm.name, file, from);
    }
  }
  Ok(outcome)
}

/// Move the osci.yaml functional default from the previous codename to the
/// new one (first occurrence only).
fn update_osci_default(charm: &Charm, params: &ExtendParams, report: &mut ExtendReport) -> FleetResult<()> {
  let path = charm.path.join("osci.yaml");
  if !path.is_file() {
    return Ok(());
  }

  let from = format!("default: {}", params.prev_series.codename);
  let to = format!("default: {}", params.new_series.codename);
  match patch::replace_once(&path, &from, &to)? {
    Applied::Changed => report.default_updated = true,
    Applied::Unchanged => {
      println!("   {}: osci.yaml has no '{}'", charm.name, from);
    }
  }
  Ok(())
}

/// Append a run-on block for the new Ubuntu version to charmcraft.yaml.
fn extend_charmcraft_targets(charm: &Charm, version: &str, report: &mut ExtendReport) -> FleetResult<()> {
  let path = charm.path.join("charmcraft.yaml");
  if !path.is_file() {
    return Ok(());
  }

  let content = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
  if content.contains(version) {
    println!("   {}: charmcraft.yaml already mentions {}", charm.name, version);
    return Ok(());
  }

  let mut updated = content;
  if !updated.ends_with('\n') {
    updated.push('\n');
  }
  updated.push_str(&format!(
    "    - name: ubuntu\n      channel: \"{}\"\n      architectures: {}\n",
    version, RUN_ON_ARCHES
  ));
  fs::write(&path, updated).with_context(|| format!("Failed to write {}", path.display()))?;
  report.charmcraft_updated = true;
  Ok(())
}
