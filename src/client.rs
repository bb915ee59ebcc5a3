//! `ApiClient` - thin typed wrapper over the external mock API.
//!
//! Every call returns an [`ApiResponse`] carrying the raw status and body.
//! Nothing here judges the status; the scenarios do that.

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::HarnessConfig;
use crate::error::{Error, Result};
use crate::types::{NewEngagement, NewProfessional, ProfessionalPatch, RecordId};

pub const PROFESSIONALS: &str = "profissionais";
pub const STUDENTS: &str = "alunos";
pub const ENGAGEMENTS: &str = "atendimentos";

/// Status and body of a single HTTP exchange.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Decode the body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Decode the body as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Assertion`] when the body is valid JSON but not an array.
    pub fn list(&self) -> Result<Vec<Value>> {
        match self.json::<Value>()? {
            Value::Array(items) => Ok(items),
            other => Err(Error::Assertion(format!(
                "expected a list body, got {}",
                kind_of(&other)
            ))),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self.json::<Value>(), Ok(Value::Array(_)))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Client for the `/profissionais`, `/alunos` and `/atendimentos` endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the underlying HTTP client cannot be built.
    pub fn new(config: &HarnessConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<ApiResponse> {
        let url = self.url(path);
        let mut request = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("{} {} -> {}", method, url, status);

        Ok(ApiResponse { status, body })
    }

    /// GET `/{collection}`. Used for arbitrary snapshot collections.
    pub async fn get_collection(&self, collection: &str) -> Result<ApiResponse> {
        self.send::<()>(Method::GET, collection, &[], None).await
    }

    pub async fn create_professional(&self, payload: &NewProfessional) -> Result<ApiResponse> {
        self.send(Method::POST, PROFESSIONALS, &[], Some(payload)).await
    }

    pub async fn list_professionals(&self) -> Result<ApiResponse> {
        self.get_collection(PROFESSIONALS).await
    }

    pub async fn get_professional(&self, id: &RecordId) -> Result<ApiResponse> {
        let path = format!("{}/{}", PROFESSIONALS, id);
        self.send::<()>(Method::GET, &path, &[], None).await
    }

    pub async fn update_professional(
        &self,
        id: &RecordId,
        patch: &ProfessionalPatch,
    ) -> Result<ApiResponse> {
        let path = format!("{}/{}", PROFESSIONALS, id);
        self.send(Method::PATCH, &path, &[], Some(patch)).await
    }

    pub async fn delete_professional(&self, id: &RecordId) -> Result<ApiResponse> {
        let path = format!("{}/{}", PROFESSIONALS, id);
        self.send::<()>(Method::DELETE, &path, &[], None).await
    }

    pub async fn list_students(&self) -> Result<ApiResponse> {
        self.get_collection(STUDENTS).await
    }

    /// GET `/alunos?nome_like={term}` (substring match on the server).
    pub async fn search_students(&self, term: &str) -> Result<ApiResponse> {
        self.send::<()>(Method::GET, STUDENTS, &[("nome_like", term)], None)
            .await
    }

    pub async fn create_engagement(&self, payload: &NewEngagement) -> Result<ApiResponse> {
        self.send(Method::POST, ENGAGEMENTS, &[], Some(payload)).await
    }
}
