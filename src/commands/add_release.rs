use std::env;

use crate::core::bundle::BundleName;
use crate::core::charm;
use crate::core::config::FleetConfig;
use crate::core::error::{FleetError, FleetResult};
use crate::core::extend::{ExtendParams, extend_charm};
use crate::ui::progress::FileProgress;

const USAGE: &str = "usage: charm-fleet add-release <prev-series> <prev-uca> <new-series> <new-uca> <ubuntu-version>\n\n\
  <prev-series>     previous series bundle filename, e.g. jammy-yoga.yaml\n\
  <prev-uca>        previous UCA bundle filename, e.g. focal-yoga.yaml\n\
  <new-series>      new series bundle filename, e.g. kinetic-zed.yaml\n\
  <new-uca>         new UCA bundle filename, e.g. jammy-zed.yaml\n\
  <ubuntu-version>  new Ubuntu version, e.g. 22.10\n\n\
example: charm-fleet add-release jammy-yoga.yaml focal-yoga.yaml kinetic-zed.yaml jammy-zed.yaml 22.10";

/// Run the add-release command
///
/// All five positionals are required; a missing one prints the usage banner
/// on stdout and exits 1 before any charm is touched.
pub fn run_add_release(
  prev_series: Option<String>,
  prev_uca: Option<String>,
  new_series: Option<String>,
  new_uca: Option<String>,
  ubuntu_version: Option<String>,
) -> FleetResult<()> {
  let (Some(prev_series), Some(prev_uca), Some(new_series), Some(new_uca), Some(ubuntu_version)) =
    (prev_series, prev_uca, new_series, new_uca, ubuntu_version)
  else {
    return Err(FleetError::usage(USAGE));
  };

  let params = ExtendParams {
    prev_series: BundleName::parse(&prev_series)?,
    prev_uca: BundleName::parse(&prev_uca)?,
    new_series: BundleName::parse(&new_series)?,
    new_uca: BundleName::parse(&new_uca)?,
    ubuntu_version,
  };

  let current_dir = env::current_dir()?;
  let config = FleetConfig::load(&current_dir)?;
  let charms = charm::discover_charms(&config.charms_dir_in(&current_dir))?;

  println!(
    "📦 Adding {} / {} across {} charms",
    params.new_series.release,
    params.new_uca.release,
    charms.len()
  );

  let mut progress = if charms.len() > 1 {
    Some(FileProgress::new(charms.len(), format!("Extending {} charms", charms.len())))
  } else {
    None
  };

  let mut extended = 0usize;
  let mut skipped = 0usize;
  for charm in &charms {
    let report = extend_charm(charm, &params)?;
    if report.skipped {
      skipped += 1;
    } else {
      extended += 1;
    }
    if let Some(ref mut p) = progress {
      p.inc();
    }
  }

  println!("\n🎉 Release added: {} charms extended, {} skipped", extended, skipped);

  Ok(())
}
