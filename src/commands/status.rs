use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::core::charm::{self, CharmKind};
use crate::core::config::FleetConfig;
use crate::core::error::FleetResult;

/// Status information for a single charm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharmStatus {
  /// Charm name
  pub name: String,

  /// Classified kind
  pub kind: CharmKind,

  /// Checkout path
  pub path: PathBuf,
}

/// Run the status command
///
/// Read-only: classifies every charm in the configured charms directory and
/// prints a table (or JSON with `--json`).
pub fn run_status(json: bool) -> FleetResult<()> {
  let current_dir = env::current_dir()?;
  let config = FleetConfig::load(&current_dir)?;
  let charms = charm::discover_charms(&config.charms_dir_in(&current_dir))?;

  let statuses: Vec<CharmStatus> = charms
    .iter()
    .map(|c| CharmStatus {
      name: c.name.clone(),
      kind: c.kind(),
      path: c.path.clone(),
    })
    .collect();

  if json {
    println!("{}", serde_json::to_string_pretty(&statuses)?);
  } else {
    print_status_table(&statuses);
  }

  Ok(())
}

/// Print status as a formatted table
fn print_status_table(statuses: &[CharmStatus]) {
  println!("\n📊 Charm Status\n");

  println!("{:<30} {:<10} PATH", "CHARM", "KIND");
  println!("{:-<80}", "");

  for status in statuses {
    println!("{:<30} {:<10} {}", status.name, status.kind.as_str(), status.path.display());
  }

  println!("\n{} charms", statuses.len());
}
