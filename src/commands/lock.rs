use std::env;
use std::path::PathBuf;

use crate::core::config::FleetConfig;
use crate::core::error::FleetResult;
use crate::core::lockfile::{LockOutcome, build_lock};

/// Run the lock command
///
/// Operates on one charm root (current directory, or `--charm-dir`). The
/// non-source and already-locked cases are informational no-ops with exit 0.
pub fn run_lock(charm_dir: Option<PathBuf>) -> FleetResult<()> {
  let current_dir = env::current_dir()?;
  let charm_dir = charm_dir.unwrap_or_else(|| current_dir.clone());

  let config = FleetConfig::load(&current_dir)?;
  let templates_dir = config.templates_dir_in(&current_dir);

  match build_lock(&charm_dir, &templates_dir)? {
    LockOutcome::NotSource(kind) => {
      println!("ℹ️  Not a source charm (kind: {}), nothing to lock", kind);
    }
    LockOutcome::AlreadyLocked => {
      println!("ℹ️  src/build.lock already exists, skipping");
    }
    LockOutcome::Built { lock_path } => {
      println!("🔒 Wrote {}", lock_path.display());
    }
  }

  Ok(())
}
