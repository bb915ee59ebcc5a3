//! Partially update a professional (RF001).
//!
//! Creates its own professional, PATCHes `nome` and `cargo`, then re-reads the
//! record to confirm the new name and the untouched email.

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{Outcome, Scenario, create_prerequisite, ensure, expect_status};
use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{NewProfessional, Professional, ProfessionalPatch};

pub const UPDATED_NAME: &str = "Nome Atualizado";
pub const UPDATED_ROLE: &str = "Cargo Atualizado";

pub struct UpdateProfessional;

#[async_trait]
impl Scenario for UpdateProfessional {
    fn name(&self) -> &'static str {
        "update_professional"
    }

    fn requirement(&self) -> &'static str {
        "RF001"
    }

    async fn run(&self, api: &ApiClient) -> Result<Outcome> {
        let seed = NewProfessional::new("Profissional Teste", "Cargo Teste", "teste@example.com");
        let Some(created) = create_prerequisite(api, &seed).await? else {
            return Ok(Outcome::skipped("could not create a professional to update"));
        };

        let patch = ProfessionalPatch {
            nome: Some(UPDATED_NAME.to_string()),
            cargo: Some(UPDATED_ROLE.to_string()),
            email: None,
        };
        let response = api.update_professional(&created.id, &patch).await?;
        expect_status(&response, StatusCode::OK, "update professional")?;

        let verify = api.get_professional(&created.id).await?;
        expect_status(&verify, StatusCode::OK, "re-read updated professional")?;
        let updated: Professional = verify.json()?;

        ensure(updated.nome == UPDATED_NAME, || {
            format!("nome was not updated: {:?}", updated.nome)
        })?;
        ensure(updated.email == seed.email, || {
            format!(
                "email changed by a partial update: {:?} -> {:?}",
                seed.email, updated.email
            )
        })?;

        println!("  Professional {} updated", created.id);
        Ok(Outcome::Passed)
    }
}
