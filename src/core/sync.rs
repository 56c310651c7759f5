//! Per-charm template synchronization engine
//!
//! Templates are the source of truth: syncing a charm re-copies every
//! template file for its kind over the checkout, ensures the kind's test
//! directory exists, and renames the legacy zuul job token. Each charm's
//! block is independent, so a batch that fails partway keeps the updates
//! already applied to earlier charms.

use std::path::Path;

use crate::core::charm::{Charm, CharmKind};
use crate::core::error::{FleetError, FleetResult};
use crate::core::patch::{self, Applied};
use crate::core::templates::TemplateSet;

const ZUUL_FILE: &str = ".zuul.yaml";
const OLD_JOB_TOKEN: &str = "python-charm-jobs";
const NEW_JOB_TOKEN: &str = "python35-charm-jobs";

/// What sync did to one charm
#[derive(Debug, Clone)]
pub struct SyncReport {
  pub kind: CharmKind,
  pub files_copied: usize,
  pub tests_dir_created: bool,
  pub zuul_updated: bool,
}

/// Synchronize one charm from the templates directory.
///
/// An `Unknown` charm is an error; the caller decides whether that aborts
/// the batch.
pub fn sync_charm(charm: &Charm, templates_dir: &Path) -> FleetResult<SyncReport> {
  let kind = charm.kind();
  if kind == CharmKind::Unknown {
    return Err(FleetError::with_help(
      format!("Charm '{}' has unknown kind", charm.name),
      "Expected src/layer.yaml, src/metadata.yaml or metadata.yaml in the charm checkout",
    ));
  }

  let templates = TemplateSet::load(templates_dir, kind)?;

  for file in &templates.files {
    patch::copy_over(&file.source, &charm.path.join(&file.relative))?;
  }

  let tests_dir_created = match kind.aux_tests_dir() {
    Some(rel) => patch::ensure_dir_with_marker(&charm.path.join(rel), ".gitkeep")?.changed(),
    None => false,
  };

  let zuul_path = charm.path.join(ZUUL_FILE);
  let zuul_updated = if zuul_path.is_file() {
    patch::replace_all(&zuul_path, OLD_JOB_TOKEN, NEW_JOB_TOKEN)? == Applied::Changed
  } else {
    false
  };

  Ok(SyncReport {
    kind,
    files_copied: templates.files.len(),
    tests_dir_created,
    zuul_updated,
  })
}
