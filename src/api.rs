//! Backend endpoints consumed by the screens.

use crate::error::{ApiFailure, Error};
use crate::storage::SessionToken;
use async_trait::async_trait;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub type ApiResult<T> = Result<T, ApiFailure>;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum AnalysisKind {
    Basic,
    Advanced,
}

impl AnalysisKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            AnalysisKind::Basic => "/api/analyze-basic",
            AnalysisKind::Advanced => "/api/analyze-advanced",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisKind::Basic => write!(f, "basic"),
            AnalysisKind::Advanced => write!(f, "advanced"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis: String,
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub record_id: Option<String>,
}

/// A previously analyzed word with whatever analyses were saved for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub word: String,
    pub timestamp: String,
    #[serde(default)]
    pub basic_analysis: Option<String>,
    #[serde(default)]
    pub advanced_analysis: Option<String>,
}

impl HistoryRecord {
    pub fn basic(&self) -> Option<&str> {
        non_empty(self.basic_analysis.as_deref())
    }

    pub fn advanced(&self) -> Option<&str> {
        non_empty(self.advanced_analysis.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

#[derive(Debug, Deserialize)]
struct HistoryEnvelope {
    history: Vec<HistoryRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub session_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub users_count: Option<u64>,
    #[serde(default)]
    pub active_sessions: Option<u64>,
}

#[derive(Serialize)]
struct AnalyzeBody<'a> {
    word: &'a str,
    session_id: &'a str,
}

/// The analyzer backend. Each call is a single round trip, never retried.
#[async_trait]
pub trait VocabApi: Send + Sync {
    async fn user_info(&self, token: &SessionToken) -> ApiResult<UserInfo>;

    async fn analyze(
        &self,
        kind: AnalysisKind,
        word: &str,
        token: &SessionToken,
    ) -> ApiResult<AnalysisResult>;

    async fn register(&self, request: &RegisterRequest) -> ApiResult<RegisterResponse>;

    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse>;

    /// Best-effort: only a transport failure is reported.
    async fn logout(&self, token: &SessionToken) -> ApiResult<()>;

    async fn history(&self, token: &SessionToken) -> ApiResult<Vec<HistoryRecord>>;

    async fn health(&self) -> ApiResult<HealthStatus>;
}

/// [`VocabApi`] over HTTP with JSON bodies.
#[derive(Clone)]
pub struct HttpVocabApi {
    client: Client,
    base_url: String,
}

impl HttpVocabApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn session_url(&self, path: &str, token: &SessionToken) -> String {
        session_url(&self.base_url, path, token)
    }
}

fn session_url(base_url: &str, path: &str, token: &SessionToken) -> String {
    format!(
        "{base_url}{path}?session_id={}",
        utf8_percent_encode(token.as_str(), NON_ALPHANUMERIC)
    )
}

async fn read_json<T: DeserializeOwned>(
    response: Result<Response, reqwest::Error>,
) -> ApiResult<T> {
    let response = response.map_err(|err| ApiFailure::transport(err.to_string()))?;
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|err| ApiFailure::transport(err.to_string()))?;
    debug!(status = status.as_u16(), len = bytes.len(), "backend response");
    if status.is_success() {
        return serde_json::from_slice(&bytes).map_err(|err| ApiFailure::decode(err.to_string()));
    }
    Err(rejection(status.as_u16(), &bytes))
}

/// Builds the failure for a non-success body. Only a string `detail` is
/// shown to users; structured details fall back to the caller's message.
fn rejection(status: u16, body: &[u8]) -> ApiFailure {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) => {
            let detail = value
                .get("detail")
                .and_then(|detail| detail.as_str())
                .map(str::to_string);
            ApiFailure::rejected(status, detail)
        }
        Err(err) => ApiFailure::decode(err.to_string()),
    }
}

#[async_trait]
impl VocabApi for HttpVocabApi {
    async fn user_info(&self, token: &SessionToken) -> ApiResult<UserInfo> {
        let url = self.session_url("/api/user-info", token);
        read_json(self.client.get(url).send().await).await
    }

    async fn analyze(
        &self,
        kind: AnalysisKind,
        word: &str,
        token: &SessionToken,
    ) -> ApiResult<AnalysisResult> {
        debug!(%kind, word, "posting analysis request");
        let body = AnalyzeBody {
            word,
            session_id: token.as_str(),
        };
        let response = self
            .client
            .post(self.url(kind.endpoint()))
            .json(&body)
            .send()
            .await;
        read_json(response).await
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<RegisterResponse> {
        let response = self
            .client
            .post(self.url("/api/register"))
            .json(request)
            .send()
            .await;
        read_json(response).await
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        let response = self
            .client
            .post(self.url("/api/login"))
            .json(request)
            .send()
            .await;
        read_json(response).await
    }

    async fn logout(&self, token: &SessionToken) -> ApiResult<()> {
        let response = self
            .client
            .post(self.session_url("/api/logout", token))
            .json(token.as_str())
            .send()
            .await
            .map_err(|err| ApiFailure::transport(err.to_string()))?;
        debug!(status = response.status().as_u16(), "logout acknowledged");
        Ok(())
    }

    async fn history(&self, token: &SessionToken) -> ApiResult<Vec<HistoryRecord>> {
        let url = self.session_url("/api/chat-history", token);
        let envelope: HistoryEnvelope = read_json(self.client.get(url).send().await).await?;
        Ok(envelope.history)
    }

    async fn health(&self) -> ApiResult<HealthStatus> {
        read_json(self.client.get(self.url("/health")).send().await).await
    }
}
