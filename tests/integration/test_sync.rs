//! Tests for the `sync` command

use crate::helpers::*;
use anyhow::Result;

fn fleet_with_templates() -> Result<TestFleet> {
  let fleet = TestFleet::new()?;
  fleet.add_template("classic", "tox.ini", "[tox]\nenvlist = pep8,py3\n")?;
  fleet.add_template("source", "tox.ini", "[tox]\nenvlist = pep8,func\n")?;
  fleet.add_template("source", "src/wheelhouse.txt", "charms.openstack\n")?;
  Ok(fleet)
}

#[test]
fn test_sync_applies_per_kind_templates() -> Result<()> {
  let fleet = fleet_with_templates()?;
  fleet.add_classic_charm("keystone")?;
  fleet.add_source_charm("ovn-central")?;

  let output = run_charm_fleet(&fleet.path, &["sync"])?;
  assert!(stdout_of(&output).contains("🎉 Sync complete!"));

  // Classic charm gets the classic tree and a root tests/ marker
  assert_eq!(
    fleet.read_file("charms/keystone/tox.ini")?,
    "[tox]\nenvlist = pep8,py3\n"
  );
  assert!(fleet.file_exists("charms/keystone/tests/.gitkeep"));

  // Source charm gets the source tree and the nested tests/ marker
  assert_eq!(
    fleet.read_file("charms/ovn-central/tox.ini")?,
    "[tox]\nenvlist = pep8,func\n"
  );
  assert_eq!(
    fleet.read_file("charms/ovn-central/src/wheelhouse.txt")?,
    "charms.openstack\n"
  );
  assert!(fleet.file_exists("charms/ovn-central/src/tests/.gitkeep"));
  assert!(!fleet.file_exists("charms/ovn-central/tests"));

  Ok(())
}

#[test]
fn test_sync_overwrites_local_drift() -> Result<()> {
  let fleet = fleet_with_templates()?;
  fleet.add_classic_charm("keystone")?;
  fleet.write_file("charms/keystone/tox.ini", "[tox]\nenvlist = hand-edited\n")?;

  let output = run_charm_fleet(&fleet.path, &["sync"])?;
  assert!(stdout_of(&output).contains("🔄 keystone (classic): 1 template files"));
  assert_eq!(
    fleet.read_file("charms/keystone/tox.ini")?,
    "[tox]\nenvlist = pep8,py3\n"
  );

  Ok(())
}

#[test]
fn test_sync_rewrites_legacy_zuul_token() -> Result<()> {
  let fleet = fleet_with_templates()?;
  fleet.add_classic_charm("keystone")?;
  fleet.write_file(
    "charms/keystone/.zuul.yaml",
    "- project:\n    templates:\n      - python-charm-jobs\n      - python-charm-jobs\n",
  )?;

  run_charm_fleet(&fleet.path, &["sync"])?;

  let zuul = fleet.read_file("charms/keystone/.zuul.yaml")?;
  assert_eq!(zuul.matches("python35-charm-jobs").count(), 2);
  assert!(!zuul.contains("- python-charm-jobs"));

  Ok(())
}

#[test]
fn test_sync_unknown_charm_aborts_but_keeps_earlier_updates() -> Result<()> {
  let fleet = fleet_with_templates()?;
  fleet.add_classic_charm("alpha")?;
  fleet.add_unknown_dir("zz-mystery")?;

  let output = run_charm_fleet_raw(&fleet.path, &["sync"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr_of(&output).contains("unknown kind"));

  // alpha sorts first, so its sync already landed before the abort
  assert!(fleet.file_exists("charms/alpha/tox.ini"));
  assert!(fleet.file_exists("charms/alpha/tests/.gitkeep"));

  Ok(())
}

#[test]
fn test_sync_twice_is_byte_identical() -> Result<()> {
  let fleet = fleet_with_templates()?;
  fleet.add_classic_charm("keystone")?;
  fleet.write_file("charms/keystone/.zuul.yaml", "- python-charm-jobs\n")?;

  run_charm_fleet(&fleet.path, &["sync"])?;
  let first = (
    fleet.read_file("charms/keystone/tox.ini")?,
    fleet.read_file("charms/keystone/.zuul.yaml")?,
  );

  run_charm_fleet(&fleet.path, &["sync"])?;
  let second = (
    fleet.read_file("charms/keystone/tox.ini")?,
    fleet.read_file("charms/keystone/.zuul.yaml")?,
  );
  assert_eq!(first, second);

  Ok(())
}
