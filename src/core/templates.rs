//! Per-kind template trees
//!
//! Templates live under `<templates_dir>/<kind>/` and mirror the layout of a
//! charm checkout. Loading a kind's set walks the subtree and records every
//! file as a `(relative path, absolute source)` pair.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::charm::CharmKind;
use crate::core::error::{ConfigError, FleetError, FleetResult};

/// One template file: where it goes inside a charm, and where it comes from
#[derive(Debug, Clone)]
pub struct TemplateFile {
  /// Path relative to the charm root
  pub relative: PathBuf,
  /// Absolute path of the template source
  pub source: PathBuf,
}

/// The template files for one charm kind
#[derive(Debug, Clone)]
pub struct TemplateSet {
  pub kind: CharmKind,
  pub files: Vec<TemplateFile>,
}

impl TemplateSet {
  /// Load the template set for `kind` from `<templates_dir>/<kind>/`.
  ///
  /// A missing kind subtree yields an empty set (nothing to copy for that
  /// kind). A missing templates root is a config error.
  pub fn load(templates_dir: &Path, kind: CharmKind) -> FleetResult<Self> {
    if !templates_dir.is_dir() {
      return Err(FleetError::Config(ConfigError::TemplatesDirNotFound {
        path: templates_dir.to_path_buf(),
      }));
    }

    let root = templates_dir.join(kind.as_str());
    let mut files = Vec::new();

    if root.is_dir() {
      for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry.map_err(|e| FleetError::message(format!("Failed to walk {}: {}", root.display(), e)))?;
        if !entry.file_type().is_file() {
          continue;
        }
        let relative = entry.path().strip_prefix(&root)?.to_path_buf();
        files.push(TemplateFile {
          relative,
          source: entry.path().to_path_buf(),
        });
      }
    }

    Ok(Self { kind, files })
  }
}
