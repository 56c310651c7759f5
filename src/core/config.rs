use crate::core::error::{FleetResult, ResultExt};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for charm-fleet
/// Searched in order: fleet.toml, .fleet.toml, .config/fleet.toml
///
/// Every command falls back to the defaults when no file exists, so a
/// conventional fleet checkout (`charms/` + `global/`) needs no config at all.
#[derive(Debug, Clone, Deserialize)]
pub struct FleetConfig {
  /// Directory holding one subdirectory per charm
  #[serde(default = "default_charms_dir")]
  pub charms_dir: PathBuf,

  /// Directory holding per-kind template trees (`<templates_dir>/<kind>/...`)
  #[serde(default = "default_templates_dir")]
  pub templates_dir: PathBuf,
}

fn default_charms_dir() -> PathBuf {
  PathBuf::from("charms")
}

fn default_templates_dir() -> PathBuf {
  PathBuf::from("global")
}

impl Default for FleetConfig {
  fn default() -> Self {
    Self {
      charms_dir: default_charms_dir(),
      templates_dir: default_templates_dir(),
    }
  }
}

impl FleetConfig {
  /// Find config file in search order: fleet.toml, .fleet.toml, .config/fleet.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("fleet.toml"),
      path.join(".fleet.toml"),
      path.join(".config").join("fleet.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config, falling back to defaults when no file exists
  pub fn load(path: &Path) -> FleetResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: FleetConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    Ok(config)
  }

  /// Charms directory resolved against a fleet root
  pub fn charms_dir_in(&self, root: &Path) -> PathBuf {
    root.join(&self.charms_dir)
  }

  /// Templates directory resolved against a fleet root
  pub fn templates_dir_in(&self, root: &Path) -> PathBuf {
    root.join(&self.templates_dir)
  }
}
