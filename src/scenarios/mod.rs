//! Smoke scenarios against the external API.
//!
//! Each scenario is arrange → act → assert. Setup problems end the scenario
//! with [`Outcome::Skipped`]; broken expectations return
//! [`Error::Assertion`], which the runner records as a failure.

pub mod associate_student;
pub mod create_professional;
pub mod delete_professional;
pub mod list_professionals;
pub mod search_students;
pub mod update_professional;

use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::client::{ApiClient, ApiResponse};
use crate::error::{Error, Result};
use crate::types::{NewProfessional, Professional, Student};

/// How a scenario ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    /// A prerequisite could not be established; not a failure.
    Skipped(String),
    Failed(String),
}

impl Outcome {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped(reason.into())
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "PASS"),
            Self::Skipped(reason) => write!(f, "SKIP: {}", reason),
            Self::Failed(reason) => write!(f, "FAIL: {}", reason),
        }
    }
}

/// One smoke scenario.
///
/// `run` returns `Ok(Passed | Skipped)` or an error. Any error, including
/// transport errors, counts as a failure.
#[async_trait]
pub trait Scenario: Send + Sync {
    /// Stable name used for selection on the command line.
    fn name(&self) -> &'static str;

    /// Functional requirement this scenario covers (e.g. `RF001`).
    fn requirement(&self) -> &'static str;

    async fn run(&self, api: &ApiClient) -> Result<Outcome>;
}

/// The fixed scenario sequence, in execution order.
pub fn all() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(create_professional::CreateProfessional),
        Box::new(list_professionals::ListProfessionals),
        Box::new(update_professional::UpdateProfessional),
        Box::new(delete_professional::DeleteProfessional),
        Box::new(associate_student::AssociateStudent),
        Box::new(search_students::SearchStudents),
    ]
}

/// Look up a scenario by name.
pub fn by_name(name: &str) -> Result<Box<dyn Scenario>> {
    all()
        .into_iter()
        .find(|s| s.name() == name)
        .ok_or_else(|| Error::UnknownScenario(name.to_string()))
}

pub(crate) fn expect_status(response: &ApiResponse, expected: StatusCode, what: &str) -> Result<()> {
    if response.status == expected {
        return Ok(());
    }
    Err(Error::Assertion(format!(
        "{}: expected status {}, got {} (body: {})",
        what,
        expected.as_u16(),
        response.status.as_u16(),
        response.body
    )))
}

pub(crate) fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::Assertion(message()))
    }
}

/// Create a professional needed as setup.
///
/// Returns `Ok(None)` when the server does not answer 201, which callers turn
/// into a skip.
pub(crate) async fn create_prerequisite(
    api: &ApiClient,
    payload: &NewProfessional,
) -> Result<Option<Professional>> {
    let response = api.create_professional(payload).await?;
    if response.status != StatusCode::CREATED {
        tracing::debug!(
            "Prerequisite creation answered {}: {}",
            response.status,
            response.body
        );
        return Ok(None);
    }
    Ok(Some(response.json()?))
}

/// First record of `/alunos`, decoded on its own.
///
/// `Err(reason)` means the collection is unusable as setup (non-2xx, not a
/// list, or empty) and the caller should skip.
pub(crate) async fn first_student(
    api: &ApiClient,
) -> Result<std::result::Result<Student, String>> {
    let response = api.list_students().await?;
    if !response.status.is_success() {
        return Ok(Err(format!("students collection answered {}", response.status)));
    }
    let first = match response.json::<Value>() {
        Ok(Value::Array(items)) => items.into_iter().next(),
        _ => return Ok(Err("students collection is not a list".to_string())),
    };
    match first {
        Some(record) => Ok(Ok(serde_json::from_value(record)?)),
        None => Ok(Err("no students".to_string())),
    }
}
