//! Delete a professional (RF001).

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{Outcome, Scenario, create_prerequisite, expect_status};
use crate::client::ApiClient;
use crate::error::Result;
use crate::types::NewProfessional;

pub struct DeleteProfessional;

#[async_trait]
impl Scenario for DeleteProfessional {
    fn name(&self) -> &'static str {
        "delete_professional"
    }

    fn requirement(&self) -> &'static str {
        "RF001"
    }

    async fn run(&self, api: &ApiClient) -> Result<Outcome> {
        let seed = NewProfessional::new(
            "Profissional para Excluir",
            "Cargo Temporário",
            "temporario@example.com",
        );
        let Some(created) = create_prerequisite(api, &seed).await? else {
            return Ok(Outcome::skipped("could not create a professional to delete"));
        };

        let response = api.delete_professional(&created.id).await?;
        expect_status(&response, StatusCode::OK, "delete professional")?;

        let verify = api.get_professional(&created.id).await?;
        expect_status(&verify, StatusCode::NOT_FOUND, "fetch deleted professional")?;

        println!("  Professional {} deleted", created.id);
        Ok(Outcome::Passed)
    }
}
