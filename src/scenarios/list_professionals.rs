//! List professionals (RF001).

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{Outcome, Scenario, expect_status};
use crate::client::ApiClient;
use crate::error::Result;

pub struct ListProfessionals;

#[async_trait]
impl Scenario for ListProfessionals {
    fn name(&self) -> &'static str {
        "list_professionals"
    }

    fn requirement(&self) -> &'static str {
        "RF001"
    }

    async fn run(&self, api: &ApiClient) -> Result<Outcome> {
        let response = api.list_professionals().await?;
        expect_status(&response, StatusCode::OK, "list professionals")?;

        let items = response.list()?;
        println!("  {} professional(s) listed", items.len());
        Ok(Outcome::Passed)
    }
}
