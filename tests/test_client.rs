//! ApiClient tests against a wiremock server.

use atendimento_smoke::{
    ApiClient, HarnessConfig, NewEngagement, NewProfessional, ProfessionalPatch, RecordId,
};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let config = HarnessConfig::builder().base_url(server.uri()).build();
    ApiClient::new(&config).expect("client")
}

#[tokio::test]
async fn test_create_professional_posts_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/profissionais"))
        .and(body_json(json!({
            "nome": "João Silva",
            "cargo": "Psicólogo",
            "email": "joao.silva@email.com"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 4,
            "nome": "João Silva",
            "cargo": "Psicólogo",
            "email": "joao.silva@email.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let payload = NewProfessional::new("João Silva", "Psicólogo", "joao.silva@email.com");
    let response = tokio_test::assert_ok!(api.create_professional(&payload).await);

    assert_eq!(response.status, StatusCode::CREATED);
    let body: serde_json::Value = response.json().unwrap();
    assert_eq!(body["id"], 4);
}

#[tokio::test]
async fn test_non_success_status_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profissionais/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let response = tokio_test::assert_ok!(api.get_professional(&RecordId::Number(99)).await);
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_string_ids_are_used_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/profissionais/a1b2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let response = api.delete_professional(&RecordId::from("a1b2")).await.unwrap();
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_patch_sends_only_present_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/profissionais/3"))
        .and(body_json(json!({"nome": "Nome Atualizado"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3})))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let patch = ProfessionalPatch {
        nome: Some("Nome Atualizado".to_string()),
        ..Default::default()
    };
    let response = api
        .update_professional(&RecordId::Number(3), &patch)
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_search_students_uses_nome_like() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alunos"))
        .and(query_param("nome_like", "Maria"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "nome": "Maria Souza"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let response = api.search_students("Maria").await.unwrap();
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.is_list());
    assert_eq!(response.list().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_engagement_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/atendimentos"))
        .and(body_json(json!({
            "aluno_id": 1,
            "profissional_id": "7",
            "data_atendimento": "2024-04-01T10:00:00",
            "tipo_atendimento": "Atendimento Pedagógico",
            "tecnologia_assistiva_id": 1
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let payload = NewEngagement {
        aluno_id: RecordId::Number(1),
        profissional_id: RecordId::from("7"),
        data_atendimento: "2024-04-01T10:00:00".to_string(),
        tipo_atendimento: "Atendimento Pedagógico".to_string(),
        tecnologia_assistiva_id: RecordId::Number(1),
    };
    let response = api.create_engagement(&payload).await.unwrap();
    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_list_rejects_object_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profissionais"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let response = api.list_professionals().await.unwrap();
    assert!(!response.is_list());
    let err = response.list().unwrap_err();
    assert!(err.to_string().contains("expected a list body, got an object"));
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    // Nothing listens on port 9 on test machines.
    let config = HarnessConfig::builder()
        .base_url("http://127.0.0.1:9")
        .request_timeout(std::time::Duration::from_secs(2))
        .build();
    let api = ApiClient::new(&config).unwrap();
    let err = tokio_test::assert_err!(api.list_students().await);
    assert!(matches!(err, atendimento_smoke::Error::Http(_)));
}
