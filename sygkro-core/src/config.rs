//! Config file load/save.
//!
//! All readers distinguish "file missing" ([`ConfigError::NotFound`]) from
//! "file malformed" ([`ConfigError::Parse`] with path + line context).

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{io_err, ConfigError};
use crate::types::{SyncRecord, TemplateConfig};

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    let yaml = serde_yaml::to_string(value)?;
    std::fs::write(path, yaml).map_err(|e| io_err(path, e))?;
    Ok(())
}

/// Read a template manifest from `path`.
pub fn read_template_config(path: &Path) -> Result<TemplateConfig, ConfigError> {
    read_yaml(path)
}

/// Write a template manifest to `path`.
pub fn write_template_config(path: &Path, config: &TemplateConfig) -> Result<(), ConfigError> {
    write_yaml(path, config)
}

/// Read a project's sync record from `path`.
pub fn read_sync_record(path: &Path) -> Result<SyncRecord, ConfigError> {
    read_yaml(path)
}

/// Write a project's sync record to `path`.
pub fn write_sync_record(path: &Path, record: &SyncRecord) -> Result<(), ConfigError> {
    write_yaml(path, record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Inputs, SyncSource, TemplatingConfig, SYNC_RECORD_FILE};
    use tempfile::TempDir;

    #[test]
    fn template_config_write_then_read() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("sygkro.template.yaml");

        let mut inputs = Inputs::new();
        inputs.insert("slug".to_string(), "my-app".to_string());
        let cfg = TemplateConfig {
            name: "basic".to_string(),
            description: "desc".to_string(),
            templating: TemplatingConfig { inputs },
            ..TemplateConfig::default()
        };

        write_template_config(&path, &cfg).expect("write");
        let back = read_template_config(&path).expect("read");
        assert_eq!(cfg, back);
    }

    #[test]
    fn sync_record_write_then_read() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(SYNC_RECORD_FILE);

        let record = SyncRecord {
            source: SyncSource {
                template_path: "foo/path".to_string(),
                template_name: "basic".to_string(),
                template_version: "1.0.0".to_string(),
                template_tracking_ref: "main".to_string(),
            },
            inputs: Inputs::new(),
        };

        write_sync_record(&path, &record).expect("write");
        let back = read_sync_record(&path).expect("read");
        assert_eq!(record, back);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().expect("tempdir");
        let err = read_sync_record(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
        assert!(err.to_string().contains("config not found"));
    }

    #[test]
    fn malformed_yaml_is_parse_error_with_path() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "source: [unterminated").expect("write");
        let err = read_sync_record(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.yaml"));
    }
}
