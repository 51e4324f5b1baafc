use anyhow::{Context, Result};
use kalori_core::{AnalyzerOptions, DEFAULT_CUTOFF, DEFAULT_METHOD, fold_text};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_kalori_home, kalori_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataSection,
    pub model: ModelSection,
    pub matching: MatchingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSection {
    /// Directory holding foods.csv, units.csv, cooking_methods.csv, features.txt
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSection {
    /// Linear model JSON; Atwater factors when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingSection {
    pub cutoff: f64,
    pub default_method: String,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
        }
    }
}

impl Default for MatchingSection {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            default_method: DEFAULT_METHOD.to_string(),
        }
    }
}

impl From<&MatchingSection> for AnalyzerOptions {
    fn from(m: &MatchingSection) -> Self {
        AnalyzerOptions {
            cutoff: m.cutoff,
            default_method: fold_text(m.default_method.trim()),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(kalori_home()?.join("config.toml"))
}

/// Read `~/.kalori/config.toml`, falling back to defaults when it is absent.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    let cfg: Config = toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
    if !(0.0..=1.0).contains(&cfg.matching.cutoff) {
        anyhow::bail!("matching.cutoff must be between 0 and 1, got {}", cfg.matching.cutoff);
    }
    Ok(cfg)
}

pub fn save_config(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = ensure_kalori_home()?.join("config.toml");
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
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
        assert_eq!(cfg.matching.cutoff, 0.6);
        assert_eq!(cfg.matching.default_method, "haslama");
        assert_eq!(cfg.model.path, None);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[matching]\ncutoff = 0.75\n").unwrap();
        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.matching.cutoff, 0.75);
        assert_eq!(cfg.matching.default_method, "haslama");
        assert_eq!(cfg.data.dir, PathBuf::from("data"));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.model.path = Some(PathBuf::from("/srv/kalori/model.json"));
        save_config(&cfg, &p).unwrap();
        assert_eq!(load_config_from(&p).unwrap(), cfg);
    }

    #[test]
    fn test_rejects_out_of_range_cutoff() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[matching]\ncutoff = 1.5\n").unwrap();
        assert!(load_config_from(&p).is_err());
    }

    #[test]
    fn test_options_from_matching() {
        let m = MatchingSection {
            cutoff: 0.8,
            default_method: "Fırın".to_string(),
        };
        let opts = AnalyzerOptions::from(&m);
        assert_eq!(opts.cutoff, 0.8);
        assert_eq!(opts.default_method, "firin");
    }
}
