use std::path::Path;

use serde::{Deserialize, Serialize};
use tripfare_core::PreprocessError;

use super::AppError;

/// identity of this worker within a multi-host processing job
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HostDescriptor {
    pub current_host: String,
    #[serde(default)]
    pub hosts: Vec<String>,
}

impl HostDescriptor {
    pub fn read(path: &Path) -> Result<HostDescriptor, AppError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PreprocessError::MissingInput(format!(
                "host descriptor {} could not be read: {e}",
                path.display()
            ))
        })?;
        let descriptor: HostDescriptor =
            serde_json::from_str(&contents).map_err(|e| AppError::HostDescriptor {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        if descriptor.current_host.trim().is_empty() {
            return Err(AppError::HostDescriptor {
                path: path.to_path_buf(),
                message: String::from("current_host is empty"),
            });
        }
        log::info!(
            "running as host '{}' of {:?}",
            descriptor.current_host,
            descriptor.hosts
        );
        Ok(descriptor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_read_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resourceconfig.json");
        std::fs::write(
            &path,
            r#"{"current_host": "algo-2", "hosts": ["algo-1", "algo-2"], "network_interface_name": "eth0"}"#,
        )
        .unwrap();
        let descriptor = HostDescriptor::read(&path).unwrap();
        assert_eq!(descriptor.current_host, "algo-2");
        assert_eq!(descriptor.hosts.len(), 2);
    }

    #[test]
    fn test_missing_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let result = HostDescriptor::read(&dir.path().join("resourceconfig.json"));
        assert!(matches!(
            result,
            Err(AppError::Preprocess(PreprocessError::MissingInput(_)))
        ));
    }

    #[test]
    fn test_malformed_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resourceconfig.json");
        std::fs::write(&path, r#"{"hosts": []}"#).unwrap();
        assert!(matches!(
            HostDescriptor::read(&path),
            Err(AppError::HostDescriptor { .. })
        ));
    }
}
