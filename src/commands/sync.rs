use std::env;

use crate::core::charm;
use crate::core::config::FleetConfig;
use crate::core::error::FleetResult;
use crate::core::sync::sync_charm;
use crate::ui::progress::FileProgress;

/// Run the sync command
///
/// Applies the per-kind templates to every charm in the fleet, strictly in
/// name order. The first unknown-kind charm aborts the batch; charms already
/// processed keep their updates.
pub fn run_sync() -> FleetResult<()> {
  let current_dir = env::current_dir()?;
  let config = FleetConfig::load(&current_dir)?;
  let templates_dir = config.templates_dir_in(&current_dir);
  let charms = charm::discover_charms(&config.charms_dir_in(&current_dir))?;

  println!("📦 Syncing {} charms from {}", charms.len(), templates_dir.display());

  let mut progress = if charms.len() > 1 {
    Some(FileProgress::new(charms.len(), format!("Syncing {} charms", charms.len())))
  } else {
    None
  };

  for charm in &charms {
    let report = sync_charm(charm, &templates_dir)?;
    if progress.is_none() {
      println!(
        "🔄 {} ({}): {} template files",
        charm.name,
        report.kind,
        report.files_copied
      );
    }
    if let Some(ref mut p) = progress {
      p.inc();
    }
  }

  println!("\n🎉 Sync complete!");

  Ok(())
}
