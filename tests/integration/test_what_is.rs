//! Tests for the `what-is` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_what_is_classifies_current_directory() -> Result<()> {
  let fleet = TestFleet::new()?;
  let charm = fleet.add_classic_charm("keystone")?;

  let output = run_charm_fleet(&charm, &["what-is"])?;
  assert_eq!(stdout_of(&output).trim(), "classic");

  Ok(())
}

#[test]
fn test_what_is_classifies_explicit_path() -> Result<()> {
  let fleet = TestFleet::new()?;
  fleet.add_source_charm("ovn-central")?;

  let output = run_charm_fleet(&fleet.path, &["what-is", "charms/ovn-central"])?;
  assert_eq!(stdout_of(&output).trim(), "source");

  Ok(())
}

#[test]
fn test_what_is_unknown_is_not_an_error() -> Result<()> {
  let fleet = TestFleet::new()?;
  let dir = fleet.add_unknown_dir("mystery")?;

  let output = run_charm_fleet(&dir, &["what-is"])?;
  assert_eq!(stdout_of(&output).trim(), "unknown");

  // A path that does not exist classifies the same way
  let output = run_charm_fleet(&fleet.path, &["what-is", "charms/no-such-charm"])?;
  assert_eq!(stdout_of(&output).trim(), "unknown");

  Ok(())
}

#[test]
fn test_what_is_does_not_touch_the_checkout() -> Result<()> {
  let fleet = TestFleet::new()?;
  let charm = fleet.add_classic_charm("keystone")?;

  run_charm_fleet(&charm, &["what-is"])?;

  let entries: Vec<String> = std::fs::read_dir(&charm)?
    .map(|e| e.map(|e| e.file_name().to_string_lossy().to_string()))
    .collect::<std::io::Result<_>>()?;
  assert_eq!(entries, vec!["metadata.yaml".to_string()]);

  Ok(())
}
