//! Tests for the `bump` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_bump_missing_args_prints_usage_on_stdout() -> Result<()> {
  let dir = tempfile::TempDir::new()?;

  let output = run_charm_fleet_raw(dir.path(), &["bump", "22.10"])?;
  assert_eq!(output.status.code(), Some(1));

  let stdout = stdout_of(&output);
  assert!(stdout.contains("usage: charm-fleet bump <release> <branch>"));
  assert!(stdout.contains("example: charm-fleet bump 22.10 22.10"));
  assert!(stderr_of(&output).is_empty());

  // The checkout is untouched: no branch created, no files written
  assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);

  Ok(())
}

#[test]
fn test_bump_outside_a_git_checkout_is_a_system_error() -> Result<()> {
  let fleet = TestFleet::new()?;
  let charm = fleet.add_classic_charm("keystone")?;

  let output = run_charm_fleet_raw(&charm, &["bump", "22.10", "22.10"])?;
  assert_eq!(output.status.code(), Some(2));
  assert!(stderr_of(&output).contains("Git repository not found"));

  Ok(())
}

#[test]
fn test_bump_creates_branch_points_gerrit_and_pins_deps() -> Result<()> {
  let fleet = TestFleet::new()?;
  let charm = fleet.add_classic_charm("keystone")?;
  fleet.write_file(
    "charms/keystone/.gitreview",
    "[gerrit]\nhost=review.opendev.org\nport=29418\nproject=openstack/charm-keystone.git\n",
  )?;
  fleet.write_file(
    "charms/keystone/requirements.txt",
    "pbr>=1.8\ngit+https://github.com/juju/charm-helpers#egg=charmhelpers\n",
  )?;
  fleet.write_file(
    "charms/keystone/test-requirements.txt",
    "pyyaml\n\
     git+https://github.com/openstack-charmers/zaza#egg=zaza\n\
     git+https://github.com/openstack-charmers/zaza-openstack-tests#egg=zaza.openstack\n",
  )?;
  git_init(&charm)?;
  add_origin_with_stable(&charm, "22.10")?;

  let output = run_charm_fleet(&charm, &["bump", "22.10", "22.10"])?;
  let stdout = stdout_of(&output);
  assert!(stdout.contains("🔀 On branch stable/22.10"));
  assert!(stdout.contains("📌 Pinned upstreams in requirements.txt"));
  assert!(stdout.contains("📌 Pinned upstreams in test-requirements.txt"));
  assert!(stdout.contains("🎉 Bump complete!"));

  let head = git(&charm, &["rev-parse", "--abbrev-ref", "HEAD"])?;
  assert_eq!(String::from_utf8_lossy(&head.stdout).trim(), "stable/22.10");

  let gitreview = fleet.read_file("charms/keystone/.gitreview")?;
  assert!(gitreview.ends_with("defaultbranch=stable/22.10\n"));

  let reqs = fleet.read_file("charms/keystone/requirements.txt")?;
  assert!(reqs.contains("charm-helpers@stable/22.10#egg=charmhelpers"));
  assert!(reqs.contains("pbr>=1.8\n"));

  let test_reqs = fleet.read_file("charms/keystone/test-requirements.txt")?;
  assert!(test_reqs.contains("zaza@stable/22.10#egg=zaza"));
  assert!(test_reqs.contains("zaza-openstack-tests@stable/22.10#egg=zaza.openstack"));
  assert!(test_reqs.starts_with("pyyaml\n"));

  Ok(())
}

#[test]
fn test_bump_tolerates_missing_optional_files() -> Result<()> {
  // No .gitreview and no dependency files: just the branch is created
  let fleet = TestFleet::new()?;
  let charm = fleet.add_classic_charm("keystone")?;
  git_init(&charm)?;
  add_origin_with_stable(&charm, "23.04")?;

  let output = run_charm_fleet(&charm, &["bump", "23.04", "23.04"])?;
  let stdout = stdout_of(&output);
  assert!(stdout.contains("🔀 On branch stable/23.04"));
  assert!(stdout.contains("No dependency files needed pinning"));
  assert!(!fleet.file_exists("charms/keystone/.gitreview"));

  Ok(())
}

#[test]
fn test_bump_rerun_fails_fast_on_existing_branch() -> Result<()> {
  let fleet = TestFleet::new()?;
  let charm = fleet.add_classic_charm("keystone")?;
  git_init(&charm)?;
  add_origin_with_stable(&charm, "22.10")?;

  run_charm_fleet(&charm, &["bump", "22.10", "22.10"])?;

  let output = run_charm_fleet_raw(&charm, &["bump", "22.10", "22.10"])?;
  assert_eq!(output.status.code(), Some(2));
  assert!(stderr_of(&output).contains("Branch operation failed"));

  Ok(())
}
