//! Harness configuration and builder.
//!
//! [`HarnessConfig`] carries everything the runner needs to reach the
//! external API and to restore its data file. Defaults match a local
//! json-server started next to `db.json` / `db_backup.json`.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_DATA_FILE: &str = "db.json";
pub const DEFAULT_BACKUP_FILE: &str = "db_backup.json";
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How the fixture waits for the server to pick up a restored data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// Sleep for a fixed duration after the copy.
    Delay(Duration),
    /// Poll the server until its collections equal the snapshot.
    Poll { timeout: Duration, interval: Duration },
}

impl Default for Settle {
    fn default() -> Self {
        Self::Delay(DEFAULT_SETTLE_DELAY)
    }
}

/// What the runner does after a scenario fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the sequence at the first failure.
    #[default]
    Abort,
    /// Record the failure and run the remaining scenarios.
    Continue,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abort => write!(f, "abort"),
            Self::Continue => write!(f, "continue"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub base_url: String,
    pub data_file: PathBuf,
    pub backup_file: PathBuf,
    pub settle: Settle,
    /// Per-request timeout. `None` leaves the HTTP client default in place.
    pub request_timeout: Option<Duration>,
    pub failure_policy: FailurePolicy,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            backup_file: PathBuf::from(DEFAULT_BACKUP_FILE),
            settle: Settle::default(),
            request_timeout: None,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl HarnessConfig {
    pub fn builder() -> HarnessConfigBuilder {
        HarnessConfigBuilder::new()
    }

    /// Build a configuration from `SMOKE_*` environment variables.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a numeric or boolean variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(url) = lookup("SMOKE_BASE_URL") {
            builder = builder.base_url(url);
        }
        if let Some(path) = lookup("SMOKE_DATA_FILE") {
            builder = builder.data_file(path);
        }
        if let Some(path) = lookup("SMOKE_BACKUP_FILE") {
            builder = builder.backup_file(path);
        }
        if let Some(ms) = lookup("SMOKE_SETTLE_MS") {
            builder = builder.settle(Settle::Delay(parse_millis("SMOKE_SETTLE_MS", &ms)?));
        }
        if let Some(ms) = lookup("SMOKE_POLL_TIMEOUT_MS") {
            let timeout = parse_millis("SMOKE_POLL_TIMEOUT_MS", &ms)?;
            let interval = match lookup("SMOKE_POLL_INTERVAL_MS") {
                Some(v) => parse_millis("SMOKE_POLL_INTERVAL_MS", &v)?,
                None => DEFAULT_POLL_INTERVAL,
            };
            builder = builder.settle(Settle::Poll { timeout, interval });
        }
        if let Some(ms) = lookup("SMOKE_REQUEST_TIMEOUT_MS") {
            builder = builder.request_timeout(parse_millis("SMOKE_REQUEST_TIMEOUT_MS", &ms)?);
        }
        if let Some(flag) = lookup("SMOKE_KEEP_GOING") {
            if parse_bool("SMOKE_KEEP_GOING", &flag)? {
                builder = builder.failure_policy(FailurePolicy::Continue);
            }
        }

        Ok(builder.build())
    }
}

fn parse_millis(key: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| Error::Config {
            key: key.to_string(),
            message: format!("expected milliseconds, got {:?} ({})", value, e),
        })
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(Error::Config {
            key: key.to_string(),
            message: format!("expected a boolean, got {:?}", other),
        }),
    }
}

/// Builder for [`HarnessConfig`].
pub struct HarnessConfigBuilder {
    config: HarnessConfig,
}

impl HarnessConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: HarnessConfig::default(),
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.config.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    pub fn backup_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.backup_file = path.into();
        self
    }

    pub fn settle(mut self, settle: Settle) -> Self {
        self.config.settle = settle;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = Some(timeout);
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    pub fn build(self) -> HarnessConfig {
        self.config
    }
}

impl Default for HarnessConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
