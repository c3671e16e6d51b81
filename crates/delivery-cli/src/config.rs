use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct DeliveryConfig {
    pub ledger: LedgerSection,
    #[serde(default)]
    pub identity: IdentitySection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LedgerSection {
    pub path: String,
}

/// Identity used for writes to the configured ledger.
///
/// The owner-only policy itself lives in the ledger file, not here.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct IdentitySection {
    pub owner: Option<String>,
}

impl DeliveryConfig {
    pub fn new(ledger_path: &Path, owner: Option<String>) -> Self {
        Self {
            ledger: LedgerSection {
                path: ledger_path.to_string_lossy().to_string(),
            },
            identity: IdentitySection { owner },
        }
    }

    /// Whether this config describes the ledger at `path`.
    pub fn points_at(&self, path: &Path) -> bool {
        Path::new(&self.ledger.path) == path
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_ledger_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("deliveries.db"))
}

pub fn read_config(path: &Path) -> anyhow::Result<DeliveryConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &DeliveryConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("delivery"));
        }
    }
    Ok(home_dir()?.join(".config").join("delivery"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("delivery"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("delivery"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = DeliveryConfig::new(Path::new("/tmp/deliveries.db"), Some("me".into()));
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: DeliveryConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.ledger.path, "/tmp/deliveries.db");
        assert_eq!(parsed.identity.owner.as_deref(), Some("me"));
        assert!(parsed.points_at(Path::new("/tmp/deliveries.db")));
        assert!(!parsed.points_at(Path::new("/tmp/other.db")));
    }

    #[test]
    fn test_identity_section_is_optional() {
        let parsed: DeliveryConfig = toml::from_str("[ledger]\npath = \"/x.db\"\n").unwrap();
        assert!(parsed.identity.owner.is_none());
    }
}
