use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{RuleReply, RuleSession};
use crate::config::ClientConfig;
use crate::error::{ConfigError, SessionError};
use crate::pipeline::{ParameterTable, PreparedRule};

pub const ZONE_HEADER: &str = "X-Rule-Zone";

/// Session against a rule gateway that accepts rule bodies over HTTP.
///
/// Each execution is one `POST <base_url>/rules/execute` carrying the body,
/// the parameter table and the requested output slot, authenticated with
/// basic auth.
pub struct HttpRuleSession {
    client: Client,
    endpoint: Url,
    user: String,
    password: String,
    zone: String,
    closed: AtomicBool,
}

#[derive(Serialize)]
struct ExecuteRequest<'a> {
    body: &'a str,
    params: &'a ParameterTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a str>,
}

#[derive(Deserialize)]
struct ErrorReply {
    error: String,
}

impl HttpRuleSession {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ConfigError::HttpClient(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.execute_url()?,
            user: config.user.clone(),
            password: config.password.clone(),
            zone: config.zone.clone(),
            closed: AtomicBool::new(false),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

#[async_trait]
impl RuleSession for HttpRuleSession {
    async fn execute(&self, rule: &PreparedRule) -> Result<RuleReply, SessionError> {
        if self.is_closed() {
            return Err(SessionError::Closed);
        }

        let request = ExecuteRequest {
            body: &rule.body,
            params: &rule.params,
            output: rule.output.as_deref(),
        };
        let response = self
            .client
            .post(self.endpoint.clone())
            .basic_auth(&self.user, Some(&self.password))
            .header(ZONE_HEADER, &self.zone)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        debug!(rule = %rule.rule_name, status = status.as_u16(), "rule gateway replied");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SessionError::Authentication(error_message(&text)));
        }
        if !status.is_success() {
            return Err(SessionError::Remote {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }
        if text.trim().is_empty() {
            return Ok(RuleReply::empty());
        }
        serde_json::from_str(&text)
            .map_err(|err| SessionError::Transport(format!("unreadable reply envelope: {err}")))
    }

    async fn close(&self) -> Result<(), SessionError> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}

fn transport_error(err: reqwest::Error) -> SessionError {
    if err.is_timeout() {
        SessionError::Timeout(err.to_string())
    } else {
        SessionError::Transport(err.to_string())
    }
}

fn error_message(body: &str) -> String {
    if let Ok(reply) = serde_json::from_str::<ErrorReply>(body) {
        return reply.error;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "empty reply".to_string()
    } else {
        trimmed.to_string()
    }
}
