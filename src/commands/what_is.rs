use std::path::PathBuf;

use crate::core::charm::CharmKind;
use crate::core::error::FleetResult;

/// Run the what-is command
///
/// Prints the kind string for the given path (default: current directory).
/// Never fails: a nonexistent or unrecognized directory is `unknown`.
pub fn run_what_is(path: Option<PathBuf>) -> FleetResult<()> {
  let target = path.unwrap_or_else(|| PathBuf::from("."));
  println!("{}", CharmKind::classify(&target));
  Ok(())
}
