//! Associate a student with a professional through an engagement (RF002).

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{Outcome, Scenario, create_prerequisite, expect_status, first_student};
use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{NewEngagement, NewProfessional, RecordId};

pub const ENGAGEMENT_DATE: &str = "2024-04-01T10:00:00";
pub const ENGAGEMENT_KIND: &str = "Atendimento Pedagógico";
pub const ASSISTIVE_TECHNOLOGY_ID: u64 = 1;

pub struct AssociateStudent;

#[async_trait]
impl Scenario for AssociateStudent {
    fn name(&self) -> &'static str {
        "associate_student"
    }

    fn requirement(&self) -> &'static str {
        "RF002"
    }

    async fn run(&self, api: &ApiClient) -> Result<Outcome> {
        let seed = NewProfessional::new(
            "Profissional para Associação",
            "Terapeuta",
            "terapeuta@example.com",
        );
        let Some(professional) = create_prerequisite(api, &seed).await? else {
            return Ok(Outcome::skipped("could not create a professional to associate"));
        };

        let student = match first_student(api).await? {
            Ok(student) => student,
            Err(reason) => return Ok(Outcome::skipped(format!("{} to associate", reason))),
        };

        let payload = NewEngagement {
            aluno_id: student.id.clone(),
            profissional_id: professional.id.clone(),
            data_atendimento: ENGAGEMENT_DATE.to_string(),
            tipo_atendimento: ENGAGEMENT_KIND.to_string(),
            tecnologia_assistiva_id: RecordId::Number(ASSISTIVE_TECHNOLOGY_ID),
        };
        let response = api.create_engagement(&payload).await?;
        expect_status(&response, StatusCode::CREATED, "create engagement")?;

        println!(
            "  Student {} associated with professional {}",
            student.id, professional.id
        );
        Ok(Outcome::Passed)
    }
}
