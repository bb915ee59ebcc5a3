//! Data-file fixture: restores the snapshot the external server reads from.
//!
//! A reset copies the backup file over the live data file and then waits for
//! the server to reload it, either for a fixed delay or by polling until the
//! served collections equal the snapshot. Reset problems are reported through
//! [`ResetOutcome`] and never abort the run.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::time::Instant;

use crate::client::ApiClient;
use crate::config::{HarnessConfig, Settle};
use crate::error::{Error, Result};

/// Result of a single reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The file was restored (and, when polling, the server serves the snapshot).
    Restored,
    /// The file was restored but the server never matched the snapshot in time.
    Unconfirmed(String),
    /// The file could not be restored.
    Failed(String),
}

impl ResetOutcome {
    pub fn is_restored(&self) -> bool {
        matches!(self, Self::Restored)
    }
}

impl fmt::Display for ResetOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Restored => write!(f, "restored"),
            Self::Unconfirmed(reason) => write!(f, "restored, reload unconfirmed: {}", reason),
            Self::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Something that can put the external data back to its canonical state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Reset: Send + Sync {
    async fn reset(&self) -> ResetOutcome;
}

/// Top-level collections of a json-server data file.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    collections: Map<String, Value>,
}

impl Snapshot {
    /// Read and parse a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, [`Error::JsonDecode`]
    /// if it is not JSON, or [`Error::Other`] if the top level is not an object.
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(raw)? {
            Value::Object(collections) => Ok(Self { collections }),
            _ => Err(Error::Other(
                "snapshot must be a JSON object keyed by collection".to_string(),
            )),
        }
    }

    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    pub fn collection(&self, name: &str) -> Option<&Value> {
        self.collections.get(name)
    }
}

/// Restores `backup_file` over `data_file` before each scenario.
pub struct FileFixture {
    data_file: PathBuf,
    backup_file: PathBuf,
    settle: Settle,
    client: ApiClient,
}

impl FileFixture {
    pub fn new(config: &HarnessConfig, client: ApiClient) -> Self {
        Self {
            data_file: config.data_file.clone(),
            backup_file: config.backup_file.clone(),
            settle: config.settle,
            client,
        }
    }

    async fn restore(&self) -> Result<u64> {
        let bytes = tokio::fs::copy(&self.backup_file, &self.data_file).await?;
        tracing::info!(
            "Restored {} ({} bytes) from {}",
            self.data_file.display(),
            bytes,
            self.backup_file.display()
        );
        Ok(bytes)
    }

    async fn wait_for_reload(&self, timeout: Duration, interval: Duration) -> Result<bool> {
        let snapshot = Snapshot::load(&self.backup_file).await?;
        let deadline = Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            // A hung request must not outlive the deadline.
            match tokio::time::timeout(remaining, self.server_matches(&snapshot)).await {
                Ok(true) => return Ok(true),
                Ok(false) => {}
                Err(_) => return Ok(false),
            }
            if Instant::now() + interval > deadline {
                return Ok(false);
            }
            tokio::time::sleep(interval).await;
        }
    }

    /// True when every snapshot collection is served exactly as stored.
    ///
    /// Transport errors count as a mismatch; the server may be mid-reload.
    async fn server_matches(&self, snapshot: &Snapshot) -> bool {
        for name in snapshot.collection_names() {
            let served = match self.client.get_collection(name).await {
                Ok(response) if response.status.is_success() => response.json::<Value>(),
                Ok(response) => {
                    tracing::debug!("Collection {} answered {}", name, response.status);
                    return false;
                }
                Err(e) => {
                    tracing::debug!("Collection {} not reachable: {}", name, e);
                    return false;
                }
            };
            match served {
                Ok(value) if Some(&value) == snapshot.collection(name) => {}
                _ => return false,
            }
        }
        true
    }
}

#[async_trait]
impl Reset for FileFixture {
    async fn reset(&self) -> ResetOutcome {
        if let Err(e) = self.restore().await {
            tracing::warn!(
                "Could not restore {} from {}: {}",
                self.data_file.display(),
                self.backup_file.display(),
                e
            );
            return ResetOutcome::Failed(e.to_string());
        }

        match self.settle {
            Settle::Delay(delay) => {
                tokio::time::sleep(delay).await;
                ResetOutcome::Restored
            }
            Settle::Poll { timeout, interval } => {
                match self.wait_for_reload(timeout, interval).await {
                    Ok(true) => ResetOutcome::Restored,
                    Ok(false) => {
                        let reason =
                            format!("server did not serve the snapshot within {:?}", timeout);
                        tracing::warn!("{}", reason);
                        ResetOutcome::Unconfirmed(reason)
                    }
                    Err(e) => {
                        tracing::warn!("Could not verify reload: {}", e);
                        ResetOutcome::Unconfirmed(e.to_string())
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_in(dir: &Path) -> FileFixture {
        let config = HarnessConfig::builder()
            .data_file(dir.join("db.json"))
            .backup_file(dir.join("db_backup.json"))
            .settle(Settle::Delay(Duration::ZERO))
            .build();
        let client = ApiClient::new(&config).unwrap();
        FileFixture::new(&config, client)
    }

    #[tokio::test]
    async fn test_reset_overwrites_live_file() {
        let tempdir = tempfile::tempdir().expect("tempdir");
        let backup = r#"{"profissionais":[],"alunos":[{"id":1,"nome":"Maria Souza"}]}"#;
        std::fs::write(tempdir.path().join("db_backup.json"), backup).unwrap();
        std::fs::write(tempdir.path().join("db.json"), r#"{"profissionais":[{"id":9}]}"#).unwrap();

        let fixture = fixture_in(tempdir.path());
        assert_eq!(fixture.reset().await, ResetOutcome::Restored);

        let live = std::fs::read_to_string(tempdir.path().join("db.json")).unwrap();
        assert_eq!(live, backup);
    }

    #[tokio::test]
    async fn test_reset_twice_is_idempotent() {
        let tempdir = tempfile::tempdir().expect("tempdir");
        let backup = r#"{"profissionais":[{"id":1,"nome":"A","cargo":"B","email":"c@d"}]}"#;
        std::fs::write(tempdir.path().join("db_backup.json"), backup).unwrap();

        let fixture = fixture_in(tempdir.path());
        assert!(fixture.reset().await.is_restored());
        let first = std::fs::read(tempdir.path().join("db.json")).unwrap();
        assert!(fixture.reset().await.is_restored());
        let second = std::fs::read(tempdir.path().join("db.json")).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_backup_is_reported_not_raised() {
        let tempdir = tempfile::tempdir().expect("tempdir");
        let fixture = fixture_in(tempdir.path());

        match fixture.reset().await {
            ResetOutcome::Failed(reason) => assert!(!reason.is_empty()),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_requires_object() {
        assert!(Snapshot::parse("[1, 2]").is_err());
        let snapshot = Snapshot::parse(r#"{"alunos": [], "profissionais": []}"#).unwrap();
        let mut names: Vec<&str> = snapshot.collection_names().collect();
        names.sort();
        assert_eq!(names, vec!["alunos", "profissionais"]);
        assert_eq!(snapshot.collection("alunos"), Some(&Value::Array(vec![])));
    }
}
