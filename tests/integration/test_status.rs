//! Tests for the `status` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_status_table_lists_charms_sorted_with_kinds() -> Result<()> {
  let fleet = TestFleet::new()?;
  fleet.add_classic_charm("keystone")?;
  fleet.add_source_charm("ovn-central")?;
  fleet.add_unknown_dir("zz-mystery")?;

  let output = run_charm_fleet(&fleet.path, &["status"])?;
  let stdout = stdout_of(&output);

  assert!(stdout.contains("📊 Charm Status"));
  assert!(stdout.contains("CHARM"));
  assert!(stdout.contains("KIND"));
  assert!(stdout.contains("classic"));
  assert!(stdout.contains("source"));
  assert!(stdout.contains("unknown"));
  assert!(stdout.contains("3 charms"));

  // Name order, not discovery order
  let keystone = stdout.find("keystone").unwrap();
  let ovn = stdout.find("ovn-central").unwrap();
  let mystery = stdout.find("zz-mystery").unwrap();
  assert!(keystone < ovn && ovn < mystery);

  Ok(())
}

#[test]
fn test_status_json_output_parses() -> Result<()> {
  let fleet = TestFleet::new()?;
  fleet.add_classic_charm("keystone")?;
  fleet.add_source_charm("ovn-central")?;

  let output = run_charm_fleet(&fleet.path, &["status", "--json"])?;
  let statuses: serde_json::Value = serde_json::from_str(stdout_of(&output).trim())?;

  let statuses = statuses.as_array().unwrap();
  assert_eq!(statuses.len(), 2);
  assert_eq!(statuses[0]["name"], "keystone");
  assert_eq!(statuses[0]["kind"], "classic");
  assert_eq!(statuses[1]["name"], "ovn-central");
  assert_eq!(statuses[1]["kind"], "source");
  assert!(statuses[0]["path"].as_str().unwrap().ends_with("charms/keystone"));

  Ok(())
}

#[test]
fn test_status_missing_charms_dir_is_a_user_error() -> Result<()> {
  let dir = tempfile::TempDir::new()?;

  let output = run_charm_fleet_raw(dir.path(), &["status"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = stderr_of(&output);
  assert!(stderr.contains("❌"));
  assert!(stderr.contains("Charms directory not found"));
  assert!(stderr.contains("💡 Help:"));

  Ok(())
}

#[test]
fn test_status_honors_fleet_toml_overrides() -> Result<()> {
  let fleet = TestFleet::new()?;
  fleet.write_file("fleet.toml", "charms_dir = \"repos\"\n")?;
  fleet.write_file("repos/keystone/metadata.yaml", "name: keystone\n")?;

  let output = run_charm_fleet(&fleet.path, &["status"])?;
  let stdout = stdout_of(&output);

  assert!(stdout.contains("keystone"));
  assert!(stdout.contains("1 charms"));

  Ok(())
}
