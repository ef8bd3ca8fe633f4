//! Deploy log persistence
//!
//! Each `/deploy` call writes one pretty-printed JSON document named after the
//! record's timestamp. Two deploys within the same second share a file name and
//! the later write replaces the earlier one.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::agents::domain::DeploymentRecord;
use crate::agents::error::DeployLogError;

/// Destination for deployment records
#[async_trait]
pub trait DeployLog: Send + Sync {
    /// Write the record once and return where it was stored
    async fn persist(&self, record: &DeploymentRecord) -> Result<String, DeployLogError>;
}

/// Writes `deploy_log_<timestamp>.json` files into a directory
#[derive(Debug, Clone)]
pub struct FileDeployLog {
    directory: PathBuf,
}

impl FileDeployLog {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File path a record will be written to
    pub fn path_for(&self, record: &DeploymentRecord) -> PathBuf {
        self.directory
            .join(format!("deploy_log_{}.json", record.timestamp))
    }

    /// Serialized form of a record
    pub fn render(record: &DeploymentRecord) -> Result<Vec<u8>, DeployLogError> {
        let mut bytes = serde_json::to_vec_pretty(record)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Read a previously written record
    pub async fn load(path: impl AsRef<Path>) -> Result<DeploymentRecord, DeployLogError> {
        let bytes = tokio::fs::read(path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl DeployLog for FileDeployLog {
    async fn persist(&self, record: &DeploymentRecord) -> Result<String, DeployLogError> {
        let bytes = Self::render(record)?;
        tokio::fs::create_dir_all(&self.directory).await?;

        let path = self.path_for(record);
        tokio::fs::write(&path, bytes).await?;
        debug!("Wrote deploy log {}", path.display());

        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::domain::AgentResult;
    use chrono::{Local, TimeZone};

    fn sample_record() -> DeploymentRecord {
        let time = Local.with_ymd_and_hms(2025, 6, 1, 12, 30, 45).unwrap();
        DeploymentRecord::at(
            time,
            vec![
                AgentResult::success("Ingeniero", "Listo para el despliegue ☀️"),
                AgentResult::failure("Finanzas", "Authentication error: 401 - bad key"),
            ],
        )
    }

    #[tokio::test]
    async fn test_persist_names_file_after_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let log = FileDeployLog::new(dir.path());

        let location = log.persist(&sample_record()).await.unwrap();

        assert!(location.ends_with("deploy_log_20250601_123045.json"));
        assert!(dir.path().join("deploy_log_20250601_123045.json").exists());
    }

    #[tokio::test]
    async fn test_round_trip_preserves_order_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let log = FileDeployLog::new(dir.path());
        let record = sample_record();

        let location = log.persist(&record).await.unwrap();
        let loaded = FileDeployLog::load(&location).await.unwrap();

        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_same_record_is_byte_identical() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let record = sample_record();

        let a = FileDeployLog::new(first.path()).persist(&record).await.unwrap();
        let b = FileDeployLog::new(second.path()).persist(&record).await.unwrap();

        let a = std::fs::read(a).unwrap();
        let b = std::fs::read(b).unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_non_ascii_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let location = FileDeployLog::new(dir.path())
            .persist(&sample_record())
            .await
            .unwrap();

        let text = std::fs::read_to_string(location).unwrap();
        assert!(text.contains("☀️"));
        assert!(text.contains("\"responses\""));
        assert!(text.contains("\"agent\": \"Finanzas\""));
    }

    #[tokio::test]
    async fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs/deploys");
        let log = FileDeployLog::new(&nested);
        log.persist(&sample_record()).await.unwrap();
        assert!(nested.join("deploy_log_20250601_123045.json").exists());
    }

    #[tokio::test]
    async fn test_unwritable_destination_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();

        let err = FileDeployLog::new(&blocker)
            .persist(&sample_record())
            .await
            .unwrap_err();
        assert!(matches!(err, DeployLogError::Io(_)));
    }
}
