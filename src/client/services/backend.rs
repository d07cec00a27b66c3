use crate::client::config::ClientConfig;
use crate::common::models::{
    DiagramRequest, DiagramResult, ModelDescriptor, ModelsResponse, RequirementRequest,
    RequirementVerdict,
};
use log::debug;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

const MODELS_PATH: &str = "models";
const MODELS_FALLBACK_ERROR: &str = "Error loading models";

/// Failure of one backend call, already reduced to a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    /// No response was obtained (offline, DNS, timeout).
    #[error("{0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// Success status, but the body is not what the endpoint promises.
    #[error("{0}")]
    Malformed(String),
}

/// One request/response endpoint of the backend.
pub trait Endpoint {
    type Request: Serialize + Send + Sync + 'static;
    type Response: DeserializeOwned + Send + 'static;

    /// Path relative to the backend base address.
    const PATH: &'static str;
    /// Shown when a failure body carries no usable `detail`.
    const FALLBACK_ERROR: &'static str;

    /// A success-status body may still describe a failure.
    fn semantic_error(_response: &Self::Response) -> Option<String> {
        None
    }
}

pub struct GenerateDiagram;

impl Endpoint for GenerateDiagram {
    type Request = DiagramRequest;
    type Response = DiagramResult;

    const PATH: &'static str = "generate-uml";
    const FALLBACK_ERROR: &'static str = "Error generating UML";

    fn semantic_error(response: &DiagramResult) -> Option<String> {
        // A soft error alone is still a (partial) success.
        if response.has_diagram() || response.warning().is_some() {
            None
        } else {
            Some(Self::FALLBACK_ERROR.to_string())
        }
    }
}

pub struct EvaluateRequirement;

impl Endpoint for EvaluateRequirement {
    type Request = RequirementRequest;
    type Response = RequirementVerdict;

    const PATH: &'static str = "evaluate-requirement";
    const FALLBACK_ERROR: &'static str = "Error evaluating requirement";
}

/// HTTP client for the generation backend. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base: Url,
}

impl BackendClient {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        Self::with_base(config.backend_url.clone(), config.request_timeout)
    }

    pub fn with_base(base: Url, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, CallError> {
        self.base
            .join(path)
            .map_err(|e| CallError::Transport(format!("invalid backend address: {}", e)))
    }

    /// `GET /models`.
    pub async fn fetch_models(&self) -> Result<Vec<ModelDescriptor>, CallError> {
        let url = self.endpoint(MODELS_PATH)?;
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| CallError::Transport(transport_message(&e)))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CallError::Transport(transport_message(&e)))?;

        if !status.is_success() {
            return Err(CallError::Rejected {
                status: status.as_u16(),
                message: rejection_message(&body, MODELS_FALLBACK_ERROR),
            });
        }
        let parsed: ModelsResponse = serde_json::from_str(&body)
            .map_err(|e| CallError::Malformed(format!("unexpected models response: {}", e)))?;
        Ok(parsed.models)
    }

    /// `POST` the request to the endpoint and interpret whatever comes back.
    pub async fn call<E: Endpoint>(&self, request: &E::Request) -> Result<E::Response, CallError> {
        let url = self.endpoint(E::PATH)?;
        debug!("POST {}", url);
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| CallError::Transport(transport_message(&e)))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CallError::Transport(transport_message(&e)))?;
        interpret_response::<E>(status, &body)
    }
}

/// Turn a status and raw body into the endpoint's response or a `CallError`.
pub fn interpret_response<E: Endpoint>(status: StatusCode, body: &str) -> Result<E::Response, CallError> {
    if !status.is_success() {
        return Err(CallError::Rejected {
            status: status.as_u16(),
            message: rejection_message(body, E::FALLBACK_ERROR),
        });
    }
    let response: E::Response = serde_json::from_str(body).map_err(|e| {
        CallError::Malformed(format!("{}: unexpected response ({})", E::FALLBACK_ERROR, e))
    })?;
    match E::semantic_error(&response) {
        Some(message) => Err(CallError::Malformed(message)),
        None => Ok(response),
    }
}

/// The `detail` string of a failure body, verbatim, or the fallback.
pub fn rejection_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.as_str())
                .filter(|detail| !detail.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| fallback.to_string())
}

fn transport_message(err: &reqwest::Error) -> String {
    let text = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("could not reach backend: {}", err)
    } else {
        err.to_string()
    };
    if text.trim().is_empty() {
        "network error".to_string()
    } else {
        text
    }
}
