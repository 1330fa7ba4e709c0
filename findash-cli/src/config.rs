use anyhow::{Context, Result};
use findash_core::ChartOptions;
use findash_ingest::StreamSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{default_data_path, ensure_findash_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreSection,
    pub chart: ChartOptions,
    pub log: LogSection,
    /// Table detection tuning
    pub stream: StreamSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Balance CSV; defaults to `<findash home>/balance_data.csv`
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Used when RUST_LOG is unset
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Store path: explicit override, then config, then the default.
    pub fn data_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        match cli_override.or(self.store.path.as_deref()) {
            Some(p) => Ok(p.to_path_buf()),
            None => default_data_path(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_findash_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(p: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.chart.title, "Bank Balance Over Time");
        assert_eq!(cfg.log.level, "warn");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[chart]\ny_label = \"Balance (USD)\"\n\n[store]\npath = \"/tmp/b.csv\"\n").unwrap();

        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.chart.y_label, "Balance (USD)");
        assert_eq!(cfg.chart.title, "Bank Balance Over Time");
        assert_eq!(cfg.store.path, Some(PathBuf::from("/tmp/b.csv")));
        assert_eq!(cfg.stream, StreamSettings::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.log.level = "debug".to_string();
        cfg.stream.min_blank_gap = 5;
        save_config_to(&p, &cfg).unwrap();
        assert_eq!(load_config_from(&p).unwrap(), cfg);
    }

    #[test]
    fn test_data_path_precedence() {
        let mut cfg = Config::default();
        cfg.store.path = Some(PathBuf::from("from-config.csv"));
        assert_eq!(
            cfg.data_path(Some(Path::new("from-cli.csv"))).unwrap(),
            PathBuf::from("from-cli.csv")
        );
        assert_eq!(cfg.data_path(None).unwrap(), PathBuf::from("from-config.csv"));
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[log\nlevel = ").unwrap();
        assert!(load_config_from(&p).is_err());
    }
}
