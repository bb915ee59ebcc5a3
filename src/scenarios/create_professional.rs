//! Create a professional (RF001).

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use super::{Outcome, Scenario, ensure, expect_status};
use crate::client::ApiClient;
use crate::error::Result;
use crate::types::NewProfessional;

pub struct CreateProfessional;

#[async_trait]
impl Scenario for CreateProfessional {
    fn name(&self) -> &'static str {
        "create_professional"
    }

    fn requirement(&self) -> &'static str {
        "RF001"
    }

    async fn run(&self, api: &ApiClient) -> Result<Outcome> {
        let payload = NewProfessional::new("João Silva", "Psicólogo", "joao.silva@email.com");

        let response = api.create_professional(&payload).await?;
        expect_status(&response, StatusCode::CREATED, "create professional")?;

        let body: Value = response.json()?;
        let has_id = body.get("id").is_some_and(|id| !id.is_null());
        ensure(has_id, || format!("created professional has no id: {}", body))?;

        println!("  Professional created with id {}", body["id"]);
        Ok(Outcome::Passed)
    }
}
