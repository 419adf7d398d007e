use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::quantum::{DriftPolicy, DEFAULT_TOLERANCE};

pub fn default_config_path() -> Option<PathBuf> {
    // ~/.grover/grover.toml
    dirs_next::home_dir().map(|h| h.join(".grover").join("grover.toml"))
}

/// Run defaults; every key is optional in the TOML file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GroverConfig {
    pub qubits: usize,
    pub target: String,
    pub shots: usize,
    /// `None` means one iteration unless `--optimal` is given.
    pub iterations: Option<usize>,
    pub seed: Option<u64>,
    pub tolerance: f64,
    pub drift_policy: DriftPolicy,
}

impl Default for GroverConfig {
    fn default() -> Self {
        Self {
            qubits: 2,
            target: "11".to_string(),
            shots: 1000,
            iterations: None,
            seed: None,
            tolerance: DEFAULT_TOLERANCE,
            drift_policy: DriftPolicy::default(),
        }
    }
}

impl GroverConfig {
    pub fn from_toml_str(txt: &str) -> Result<Self> {
        toml::from_str(txt).context("parsing grover config")
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let txt = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&txt).with_context(|| format!("parsing {}", path.display()))
    }

    /// Missing file → built-in defaults; a file that exists must parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.exists() => Self::from_toml_file(p),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = GroverConfig::from_toml_str("qubits = 3\ntarget = \"101\"\n").unwrap();
        assert_eq!(cfg.qubits, 3);
        assert_eq!(cfg.target, "101");
        assert_eq!(cfg.shots, 1000);
        assert_eq!(cfg.iterations, None);
    }

    #[test]
    fn drift_policy_parses_lowercase() {
        let cfg = GroverConfig::from_toml_str("drift_policy = \"renormalize\"").unwrap();
        assert_eq!(cfg.drift_policy, DriftPolicy::Renormalize);
    }

    #[test]
    fn unknown_key_is_an_error() {
        assert!(GroverConfig::from_toml_str("qbits = 3").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = GroverConfig::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(cfg, GroverConfig::default());
    }
}
