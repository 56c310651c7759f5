use std::env;

use crate::core::bump::bump_charm;
use crate::core::error::{FleetError, FleetResult};

const USAGE: &str = "usage: charm-fleet bump <release> <branch>\n\n\
  <release>  stable release to pin dependencies at, e.g. 22.10\n\
  <branch>   stable branch to create, e.g. 22.10\n\n\
example: charm-fleet bump 22.10 22.10";

/// Run the bump command
///
/// Both positionals are validated by hand so that a missing argument prints
/// the usage banner on stdout and exits 1 without touching the checkout.
pub fn run_bump(release: Option<String>, branch: Option<String>) -> FleetResult<()> {
  let (Some(release), Some(branch)) = (release, branch) else {
    return Err(FleetError::usage(USAGE));
  };

  let current_dir = env::current_dir()?;
  println!("📦 Bumping {} to stable/{}", current_dir.display(), branch);

  let report = bump_charm(&current_dir, &release, &branch)?;

  println!("🔀 On branch {}", report.branch);
  if report.gitreview_updated {
    println!("   .gitreview now defaults to {}", report.branch);
  }
  for file in &report.pinned {
    println!("📌 Pinned upstreams in {}", file.display());
  }
  if report.pinned.is_empty() {
    println!("   No dependency files needed pinning");
  }

  println!("\n🎉 Bump complete!");

  Ok(())
}
