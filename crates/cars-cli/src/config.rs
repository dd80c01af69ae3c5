use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use cars_scoring::risk::RiskThresholds;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
///
/// Version 0 is a hand-written file that omits `config_version`. It has the
/// same shape as version 1 and only needs stamping.
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarsConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub thresholds: RiskThresholds,
    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for CarsConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            thresholds: RiskThresholds::default(),
            store: StoreConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreConfig {
    Local {
        path: PathBuf,
    },
    S3 {
        bucket: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        region: Option<String>,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        StoreConfig::Local {
            path: base.join("cars").join("assessments.json"),
        }
    }
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("cars").join("config.json"))
}

fn resolve(path: Option<&Path>) -> eyre::Result<PathBuf> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => default_config_path(),
    }
}

/// Load the config, falling back to defaults when no file exists.
pub fn load_config(path: Option<&Path>) -> eyre::Result<CarsConfig> {
    let path = resolve(path)?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(CarsConfig::default());
    }

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    // A version too large for u32 is certainly newer than this build.
    let on_disk_version = match json.get("config_version").and_then(|v| v.as_u64()) {
        Some(v) => u32::try_from(v).unwrap_or(u32::MAX),
        None => 0,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: CarsConfig = serde_json::from_value(migrated)?;
    config
        .thresholds
        .validate()
        .map_err(|e| eyre::eyre!("invalid config at {}: {e}", path.display()))?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update cars."
        ));
    }

    // v0 → v1: same shape, stamp the version
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("stamped unversioned config as v1");
    }

    // Future migrations go here:
    // if from_version < 2 { ... }

    Ok(json)
}

/// Sibling temp file for an atomic write of `path`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

pub fn save_config(config: &CarsConfig, path: Option<&Path>) -> eyre::Result<PathBuf> {
    let path = resolve(path)?;
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = temp_path(&path);
    std::fs::write(&tmp_path, json.as_bytes())?;

    // Set restrictive permissions on Unix before renaming
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("absent.json"))).unwrap();
        assert_eq!(config.thresholds, RiskThresholds::default());
        assert_eq!(config.config_version, CURRENT_VERSION);
    }

    #[test]
    fn unversioned_config_is_stamped_as_v1() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "thresholds": { "normal_max": 55, "at_risk_max": 65 },
                "store": { "type": "s3", "bucket": "b" }
            }"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.config_version, 1);
        assert_eq!(
            config.thresholds,
            RiskThresholds {
                normal_max: 55,
                at_risk_max: 65
            }
        );
        assert_eq!(
            config.store,
            StoreConfig::S3 {
                bucket: "b".to_string(),
                region: None
            }
        );
    }

    #[test]
    fn newer_version_is_rejected() {
        let err = migrate(serde_json::json!({ "config_version": 9 }), 9).unwrap_err();
        assert!(err.to_string().contains("newer"));
    }

    #[test]
    fn oversized_version_is_rejected_as_newer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "config_version": 4294967297 }"#).unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("newer"));
    }

    #[test]
    fn temp_file_follows_the_target_name() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        assert_eq!(temp_path(&a), dir.path().join("a.json.tmp"));
        assert_ne!(temp_path(&a), temp_path(&b));

        save_config(&CarsConfig::default(), Some(&a)).unwrap();
        save_config(&CarsConfig::default(), Some(&b)).unwrap();
        assert!(a.exists() && b.exists());
        assert!(!temp_path(&a).exists() && !temp_path(&b).exists());
    }

    #[test]
    fn inverted_thresholds_are_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "config_version": 1, "thresholds": { "normal_max": 75, "at_risk_max": 70 } }"#,
        )
        .unwrap();
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = CarsConfig {
            config_version: 0,
            thresholds: RiskThresholds {
                normal_max: 58,
                at_risk_max: 72,
            },
            store: StoreConfig::Local {
                path: dir.path().join("a.json"),
            },
        };
        save_config(&config, Some(&path)).unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.config_version, CURRENT_VERSION);
        assert_eq!(loaded.thresholds, config.thresholds);
        assert_eq!(loaded.store, config.store);
    }
}
