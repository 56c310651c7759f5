//! Tests for the `lock` command
//!
//! The happy path shells out to `charmcraft pack`, which is not available in
//! the test environment; these tests pin down the gating behavior around it.

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_lock_on_classic_charm_is_an_informational_noop() -> Result<()> {
  let fleet = TestFleet::new()?;
  let charm = fleet.add_classic_charm("keystone")?;

  let output = run_charm_fleet(&charm, &["lock"])?;
  assert!(stdout_of(&output).contains("Not a source charm (kind: classic), nothing to lock"));
  assert!(!fleet.file_exists("charms/keystone/src/build.lock"));

  Ok(())
}

#[test]
fn test_lock_with_existing_lock_file_skips() -> Result<()> {
  let fleet = TestFleet::new()?;
  fleet.add_source_charm("ovn-central")?;
  fleet.write_file("charms/ovn-central/src/build.lock", "{\"locks\": []}\n")?;
  let charm = fleet.path.join("charms/ovn-central");

  let output = run_charm_fleet(&charm, &["lock"])?;
  assert!(stdout_of(&output).contains("src/build.lock already exists, skipping"));
  assert_eq!(
    fleet.read_file("charms/ovn-central/src/build.lock")?,
    "{\"locks\": []}\n"
  );

  Ok(())
}

#[test]
fn test_lock_missing_template_is_a_user_error() -> Result<()> {
  let fleet = TestFleet::new()?;
  let charm = fleet.add_source_charm("ovn-central")?;

  // Config resolves relative to the cwd, and the charm checkout carries no
  // global/ tree of its own
  let output = run_charm_fleet_raw(&charm, &["lock"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = stderr_of(&output);
  assert!(stderr.contains("Template file not found"));
  assert!(stderr.contains("charmcraft-build-lock.yaml"));
  assert!(stderr.contains("💡 Help:"));

  Ok(())
}

#[test]
fn test_lock_honors_charm_dir_flag() -> Result<()> {
  let fleet = TestFleet::new()?;
  fleet.add_classic_charm("keystone")?;

  let output = run_charm_fleet(&fleet.path, &["lock", "--charm-dir", "charms/keystone"])?;
  assert!(stdout_of(&output).contains("Not a source charm (kind: classic), nothing to lock"));

  Ok(())
}
