//! Cursor Cloud Agents provider
//!
//! An agent runs against a repository that holds the pairing dataset, so
//! its answer is grounded in the same data the resolver checks against.
//! The exchange is create → poll until terminal → fetch conversation, with
//! a fixed polling interval and a fixed total wait budget.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::error::{retry_after, ProviderError, ProviderResult};
use crate::provider::{ResponseFormat, TextProvider};

const PROVIDER: &str = "cursor";

pub const DEFAULT_CURSOR_BASE_URL: &str = "https://api.cursor.com";

/// Cursor agent settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Repository URL the agent reads the dataset from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    #[serde(default = "default_ref")]
    pub git_ref: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_max_wait_secs")]
    pub max_wait_secs: u64,
}

fn default_ref() -> String {
    "main".to_string()
}

fn default_base_url() -> String {
    DEFAULT_CURSOR_BASE_URL.to_string()
}

fn default_poll_interval_ms() -> u64 {
    3000
}

fn default_max_wait_secs() -> u64 {
    120
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            repository: None,
            git_ref: default_ref(),
            base_url: default_base_url(),
            poll_interval_ms: default_poll_interval_ms(),
            max_wait_secs: default_max_wait_secs(),
        }
    }
}

/// Agent lifecycle state as reported by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentStatus {
    Creating,
    Running,
    Finished,
    Stopped,
    Expired,
    Error,
    Unknown(String),
}

impl AgentStatus {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "CREATING" => Self::Creating,
            "RUNNING" => Self::Running,
            "FINISHED" => Self::Finished,
            "STOPPED" => Self::Stopped,
            "EXPIRED" => Self::Expired,
            "ERROR" => Self::Error,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The agent will not change state again
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Finished | Self::Stopped | Self::Expired | Self::Error
        )
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Creating => f.write_str("CREATING"),
            Self::Running => f.write_str("RUNNING"),
            Self::Finished => f.write_str("FINISHED"),
            Self::Stopped => f.write_str("STOPPED"),
            Self::Expired => f.write_str("EXPIRED"),
            Self::Error => f.write_str("ERROR"),
            Self::Unknown(s) => f.write_str(s),
        }
    }
}

#[derive(Serialize)]
struct LaunchRequest<'a> {
    prompt: LaunchPrompt<'a>,
    source: LaunchSource<'a>,
    target: LaunchTarget,
}

#[derive(Serialize)]
struct LaunchPrompt<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct LaunchSource<'a> {
    repository: &'a str,
    #[serde(rename = "ref")]
    git_ref: &'a str,
}

#[derive(Serialize)]
struct LaunchTarget {
    #[serde(rename = "autoCreatePr")]
    auto_create_pr: bool,
}

#[derive(Deserialize)]
struct AgentInfo {
    id: String,
    #[serde(default)]
    status: String,
}

#[derive(Deserialize)]
struct Conversation {
    #[serde(default)]
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct Message {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Agent-style provider; answers with one JSON object
pub struct CursorAgentProvider {
    config: CursorConfig,
    client: reqwest::Client,
}

impl CursorAgentProvider {
    pub fn new(config: CursorConfig) -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn credentials(&self) -> ProviderResult<(&str, &str)> {
        let api_key = non_empty(self.config.api_key.as_deref()).ok_or(
            ProviderError::MissingCredentials {
                provider: PROVIDER,
                what: "API key",
            },
        )?;
        let repository = non_empty(self.config.repository.as_deref()).ok_or(
            ProviderError::MissingCredentials {
                provider: PROVIDER,
                what: "repository URL",
            },
        )?;
        Ok((api_key, repository))
    }

    async fn check(response: reqwest::Response) -> ProviderResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let retry = retry_after(response.headers());
        let text = response.text().await.unwrap_or_default();
        tracing::warn!("Cursor API returned {}", status);
        Err(ProviderError::from_status(
            PROVIDER,
            status.as_u16(),
            retry,
            &text,
        ))
    }

    async fn launch(&self, api_key: &str, repository: &str, prompt: &str) -> ProviderResult<String> {
        let body = LaunchRequest {
            prompt: LaunchPrompt { text: prompt },
            source: LaunchSource {
                repository,
                git_ref: &self.config.git_ref,
            },
            target: LaunchTarget {
                auto_create_pr: false,
            },
        };
        let response = self
            .client
            .post(self.url("/v0/agents"))
            .basic_auth(api_key, None::<&str>)
            .json(&body)
            .send()
            .await?;
        let info: AgentInfo = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        tracing::info!(agent = %info.id, "Launched Cursor agent");
        Ok(info.id)
    }

    async fn wait_for_terminal(&self, api_key: &str, agent_id: &str) -> ProviderResult<AgentStatus> {
        let interval = Duration::from_millis(self.config.poll_interval_ms);
        let budget = Duration::from_secs(self.config.max_wait_secs);
        let started = Instant::now();

        loop {
            let response = self
                .client
                .get(self.url(&format!("/v0/agents/{}", agent_id)))
                .basic_auth(api_key, None::<&str>)
                .send()
                .await?;
            let info: AgentInfo = Self::check(response)
                .await?
                .json()
                .await
                .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

            let status = AgentStatus::parse(&info.status);
            tracing::debug!(agent = %agent_id, %status, "Polled Cursor agent");
            if status.is_terminal() {
                return Ok(status);
            }

            let waited = started.elapsed();
            if waited + interval > budget {
                return Err(ProviderError::Timeout { waited: budget });
            }
            tokio::time::sleep(interval).await;
        }
    }

    async fn last_assistant_message(&self, api_key: &str, agent_id: &str) -> ProviderResult<String> {
        let response = self
            .client
            .get(self.url(&format!("/v0/agents/{}/conversation", agent_id)))
            .basic_auth(api_key, None::<&str>)
            .send()
            .await?;
        let conversation: Conversation = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        conversation
            .messages
            .into_iter()
            .rev()
            .find(|m| m.kind == "assistant_message" && !m.text.trim().is_empty())
            .map(|m| m.text)
            .ok_or_else(|| {
                ProviderError::InvalidResponse("agent conversation has no answer".to_string())
            })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[async_trait]
impl TextProvider for CursorAgentProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn response_format(&self) -> ResponseFormat {
        ResponseFormat::JsonObject
    }

    async fn complete(&self, prompt: &str) -> ProviderResult<String> {
        let (api_key, repository) = self.credentials()?;

        let agent_id = self.launch(api_key, repository, prompt).await?;
        let status = self.wait_for_terminal(api_key, &agent_id).await?;
        if status.is_failure() {
            return Err(ProviderError::AgentFailed {
                agent_id,
                status: status.to_string(),
            });
        }
        self.last_assistant_message(api_key, &agent_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn provider(server: &MockServer) -> CursorAgentProvider {
        CursorAgentProvider::new(CursorConfig {
            api_key: Some("cur-key".to_string()),
            repository: Some("https://github.com/example/pairings".to_string()),
            base_url: server.base_url(),
            poll_interval_ms: 10,
            max_wait_secs: 1,
            ..Default::default()
        })
        .unwrap()
    }

    async fn mock_launch(server: &MockServer) {
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v0/agents")
                    .body_contains("\"repository\":\"https://github.com/example/pairings\"");
                then.status(200)
                    .json_body(serde_json::json!({"id": "bc_1", "status": "CREATING"}));
            })
            .await;
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(AgentStatus::parse("finished"), AgentStatus::Finished);
        assert!(AgentStatus::parse("EXPIRED").is_terminal());
        assert!(!AgentStatus::parse("RUNNING").is_terminal());
        assert!(AgentStatus::parse("ERROR").is_failure());
        assert_eq!(
            AgentStatus::parse("paused"),
            AgentStatus::Unknown("PAUSED".to_string())
        );
    }

    #[tokio::test]
    async fn test_complete_returns_last_assistant_message() {
        let server = MockServer::start_async().await;
        mock_launch(&server).await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v0/agents/bc_1");
                then.status(200)
                    .json_body(serde_json::json!({"id": "bc_1", "status": "FINISHED"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v0/agents/bc_1/conversation");
                then.status(200).json_body(serde_json::json!({
                    "id": "bc_1",
                    "messages": [
                        {"id": "m1", "type": "user_message", "text": "question"},
                        {"id": "m2", "type": "assistant_message", "text": "thinking..."},
                        {"id": "m3", "type": "assistant_message", "text": "{\"id\":\"basil\",\"name\":\"basil\"}"}
                    ]
                }));
            })
            .await;

        let text = provider(&server).complete("question").await.unwrap();
        assert_eq!(text, "{\"id\":\"basil\",\"name\":\"basil\"}");
    }

    #[tokio::test]
    async fn test_agent_error_status() {
        let server = MockServer::start_async().await;
        mock_launch(&server).await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v0/agents/bc_1");
                then.status(200)
                    .json_body(serde_json::json!({"id": "bc_1", "status": "ERROR"}));
            })
            .await;

        let err = provider(&server).complete("question").await.unwrap_err();
        assert!(matches!(err, ProviderError::AgentFailed { ref status, .. } if status == "ERROR"));
    }

    #[tokio::test]
    async fn test_polling_times_out() {
        let server = MockServer::start_async().await;
        mock_launch(&server).await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v0/agents/bc_1");
                then.status(200)
                    .json_body(serde_json::json!({"id": "bc_1", "status": "RUNNING"}));
            })
            .await;

        let mut provider = provider(&server);
        provider.config.poll_interval_ms = 400;

        let err = provider.complete("question").await.unwrap_err();
        assert!(matches!(err, ProviderError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_missing_repository_makes_no_request() {
        let server = MockServer::start_async().await;
        let launch = server
            .mock_async(|when, then| {
                when.method(POST).path("/v0/agents");
                then.status(200);
            })
            .await;

        let mut provider = provider(&server);
        provider.config.repository = None;

        let err = provider.complete("question").await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::MissingCredentials { what: "repository URL", .. }
        ));
        launch.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_launch_rate_limited() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v0/agents");
                then.status(429).body("slow down");
            })
            .await;

        let err = provider(&server).complete("question").await.unwrap_err();
        assert!(err.is_rate_limited());
    }
}
