//! Charm kind classification and fleet discovery
//!
//! A charm checkout is one of:
//! - **source**: built from layers, carries `src/layer.yaml` or `src/metadata.yaml`
//! - **classic**: hand-written, carries `metadata.yaml` at the root
//! - **unknown**: neither probe matched (or the path does not exist)
//!
//! Classification is a pure function of the directory contents.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{ConfigError, FleetError, FleetResult, ResultExt};

/// Kind of a charm checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharmKind {
  /// Layered source charm (`src/layer.yaml` or `src/metadata.yaml`)
  Source,
  /// Classic charm (`metadata.yaml` at the root)
  Classic,
  /// Not recognizable as a charm
  Unknown,
}

impl CharmKind {
  /// Classify a directory. Probes in order: source markers, then classic marker.
  pub fn classify(path: &Path) -> Self {
    if path.join("src").join("layer.yaml").is_file() || path.join("src").join("metadata.yaml").is_file() {
      return CharmKind::Source;
    }
    if path.join("metadata.yaml").is_file() {
      return CharmKind::Classic;
    }
    CharmKind::Unknown
  }

  /// Stable string form, also used for template subtree names
  pub fn as_str(&self) -> &'static str {
    match self {
      CharmKind::Source => "source",
      CharmKind::Classic => "classic",
      CharmKind::Unknown => "unknown",
    }
  }

  /// Directory that must exist (with a `.gitkeep`) for this kind's tests
  pub fn aux_tests_dir(&self) -> Option<&'static str> {
    match self {
      CharmKind::Source => Some("src/tests"),
      CharmKind::Classic => Some("tests"),
      CharmKind::Unknown => None,
    }
  }
}

impl std::fmt::Display for CharmKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One charm checkout inside the fleet
#[derive(Debug, Clone)]
pub struct Charm {
  pub name: String,
  pub path: PathBuf,
}

impl Charm {
  /// Classify this charm's checkout
  pub fn kind(&self) -> CharmKind {
    CharmKind::classify(&self.path)
  }
}

/// Enumerate charms: immediate subdirectories of the charms dir, sorted by
/// name. Non-directories and dot entries are skipped.
pub fn discover_charms(charms_dir: &Path) -> FleetResult<Vec<Charm>> {
  if !charms_dir.is_dir() {
    return Err(FleetError::Config(ConfigError::CharmsDirNotFound {
      path: charms_dir.to_path_buf(),
    }));
  }

  let mut charms = Vec::new();
  let entries =
    fs::read_dir(charms_dir).with_context(|| format!("Failed to list charms in {}", charms_dir.display()))?;

  for entry in entries {
    let entry = entry?;
    if !entry.file_type()?.is_dir() {
      continue;
    }
    let name = entry.file_name().to_string_lossy().to_string();
    if name.starts_with('.') {
      continue;
    }
    charms.push(Charm {
      name,
      path: entry.path(),
    });
  }

  charms.sort_by(|a, b| a.name.cmp(&b.name));
  Ok(charms)
}
