//! Search students by name (RF007).
//!
//! Searches with only the first word of a known name, so an exact-match
//! filter would miss and fail the scenario.

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{Outcome, Scenario, ensure, expect_status, first_student};
use crate::client::ApiClient;
use crate::error::Result;
use crate::types::RecordId;

pub struct SearchStudents;

#[async_trait]
impl Scenario for SearchStudents {
    fn name(&self) -> &'static str {
        "search_students"
    }

    fn requirement(&self) -> &'static str {
        "RF007"
    }

    async fn run(&self, api: &ApiClient) -> Result<Outcome> {
        let target = match first_student(api).await? {
            Ok(student) => student,
            Err(reason) => return Ok(Outcome::skipped(format!("{} to search for", reason))),
        };
        let Some(term) = target.first_name_token() else {
            return Ok(Outcome::skipped(format!(
                "student {} has no name to search for",
                target.id
            )));
        };

        let response = api.search_students(term).await?;
        expect_status(&response, StatusCode::OK, "search students")?;

        let hits = response.list()?;
        let found = hits.iter().any(|hit| {
            hit.get("id")
                .and_then(|id| serde_json::from_value::<RecordId>(id.clone()).ok())
                .is_some_and(|id| id == target.id)
        });
        ensure(found, || {
            format!(
                "search for {:?} did not return student {} ({} hit(s))",
                term,
                target.id,
                hits.len()
            )
        })?;

        println!("  Search for {:?} returned {} student(s)", term, hits.len());
        Ok(Outcome::Passed)
    }
}
