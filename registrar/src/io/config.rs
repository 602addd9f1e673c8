//! Registrar configuration stored in `registrar.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Registrar configuration (TOML).
///
/// This file is intended to be edited by humans. Missing fields default to
/// sensible values, and a missing file means all defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegistrarConfig {
    /// Path of the JSON records file.
    pub data_file: PathBuf,

    /// First id handed out when the book holds no numeric student ids yet.
    pub first_student_id: u32,
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("student_data.json"),
            first_student_id: 1000,
        }
    }
}

impl RegistrarConfig {
    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(anyhow!("data_file must not be empty"));
        }
        if self.first_student_id == 0 {
            return Err(anyhow!("first_student_id must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `RegistrarConfig::default()`.
pub fn load_config(path: &Path) -> Result<RegistrarConfig> {
    if !path.exists() {
        let cfg = RegistrarConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: RegistrarConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &RegistrarConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, RegistrarConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("registrar.toml");
        let cfg = RegistrarConfig {
            data_file: PathBuf::from("records/book.json"),
            first_student_id: 5000,
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("registrar.toml");
        fs::write(&path, "first_student_id = 42\n").expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.first_student_id, 42);
        assert_eq!(cfg.data_file, PathBuf::from("student_data.json"));
    }

    #[test]
    fn zero_first_student_id_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("registrar.toml");
        fs::write(&path, "first_student_id = 0\n").expect("write");

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("first_student_id"));
    }
}
