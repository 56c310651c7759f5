//! Bundle filename parsing
//!
//! Test bundles are named `<series>-<release...>.yaml`, e.g. `jammy-yoga.yaml`
//! or `focal-ussuri-ha.yaml`. The release name is the whole stem, the Ubuntu
//! series is the first dash-delimited segment, and the OpenStack codename is
//! the last.

use std::fmt;

use crate::core::error::{FleetError, FleetResult};

/// Parsed bundle filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleName {
  /// Full stem, e.g. `jammy-yoga`
  pub release: String,
  /// First segment, e.g. `jammy`
  pub series: String,
  /// Last segment, e.g. `yoga`
  pub codename: String,
}

impl BundleName {
  /// Parse a bundle filename like `jammy-yoga.yaml`
  pub fn parse(filename: &str) -> FleetResult<Self> {
    let stem = filename.strip_suffix(".yaml").ok_or_else(|| {
      FleetError::usage(format!(
        "Bundle name '{}' must be a .yaml filename, e.g. jammy-yoga.yaml",
        filename
      ))
    })?;

    let mut parts = stem.split('-');
    let series = parts.next().unwrap_or_default();
    let codename = stem.rsplit('-').next().unwrap_or_default();
    if series.is_empty() || series == stem {
      return Err(FleetError::usage(format!(
        "Bundle name '{}' must look like <series>-<release>.yaml, e.g. jammy-yoga.yaml",
        filename
      )));
    }

    Ok(Self {
      release: stem.to_string(),
      series: series.to_string(),
      codename: codename.to_string(),
    })
  }

  /// The filename this descriptor came from
  pub fn filename(&self) -> String {
    format!("{}.yaml", self.release)
  }
}

impl fmt::Display for BundleName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.release)
  }
}
