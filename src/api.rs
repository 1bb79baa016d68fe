// API client module: a small blocking HTTP client that talks to the
// research backend. Every call is a single synchronous round trip; there
// are no retries and no timeouts beyond reqwest's defaults.

use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiError, ApiResult};

/// Path of the PDF rendering endpoint.
pub const GENERATE_PDF_PATH: &str = "/generate_pdf";

/// Which research behaviour the backend should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Quick,
    Deep,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Quick, Mode::Deep];

    /// Endpoint path that serves this mode.
    pub fn endpoint(self) -> &'static str {
        match self {
            Mode::Quick => "/research",
            Mode::Deep => "/deep_research",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Quick => "Quick Research",
            Mode::Deep => "Deep Research",
        }
    }
}

/// Body of `/research` and `/deep_research`. `history` is part of the
/// backend contract but this client never threads conversation context
/// through it, so it is always empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResearchRequest {
    pub query: String,
    pub history: Vec<serde_json::Value>,
}

impl ResearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        ResearchRequest {
            query: query.into(),
            history: Vec::new(),
        }
    }
}

/// Successful research response. Every field is required; a missing one
/// fails deserialization instead of producing a half-filled result.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResearchResult {
    pub sources: Vec<String>,
    pub reasoning_summary: String,
    pub fact_consistency: String,
    pub follow_up_questions: Vec<String>,
    pub report_md: String,
}

/// Body of `/generate_pdf`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PdfRequest {
    pub query: String,
    pub report_md: String,
}

/// The two backend operations the submission flow depends on. `ApiClient`
/// is the HTTP implementation; tests plug in in-memory doubles.
pub trait ResearchBackend {
    /// POST the request to the endpoint selected by `mode` and parse the
    /// result.
    fn research(&self, mode: Mode, req: &ResearchRequest) -> ApiResult<ResearchResult>;

    /// POST the report body and return the raw PDF bytes.
    fn generate_pdf(&self, req: &PdfRequest) -> ApiResult<Vec<u8>>;
}

/// Blocking API client holding a reqwest client and the backend base URL.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the base URL in `cfg`.
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: cfg.api_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a JSON body and return the response if the status is exactly
    /// 200. Anything else, other 2xx codes included, becomes
    /// `ApiError::Status` with the body text kept verbatim.
    fn post_json<B: Serialize>(&self, endpoint: &'static str, body: &B) -> ApiResult<Response> {
        let url = self.url(endpoint);
        debug!(%url, "POST");
        let res = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        let status = res.status();
        if status != StatusCode::OK {
            let body = res.text().unwrap_or_default();
            warn!(endpoint, status = status.as_u16(), "backend rejected request");
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }
        Ok(res)
    }
}

/// Read the body fully and decode it, so a shape mismatch surfaces as
/// `Malformed` with serde's field-level message rather than a transport
/// error.
fn decode<T: DeserializeOwned>(endpoint: &'static str, res: Response) -> ApiResult<T> {
    let bytes = res
        .bytes()
        .map_err(|source| ApiError::Transport { endpoint, source })?;
    serde_json::from_slice(&bytes).map_err(|source| ApiError::Malformed { endpoint, source })
}

impl ResearchBackend for ApiClient {
    fn research(&self, mode: Mode, req: &ResearchRequest) -> ApiResult<ResearchResult> {
        let endpoint = mode.endpoint();
        let res = self.post_json(endpoint, req)?;
        decode(endpoint, res)
    }

    fn generate_pdf(&self, req: &PdfRequest) -> ApiResult<Vec<u8>> {
        let res = self.post_json(GENERATE_PDF_PATH, req)?;
        let bytes = res.bytes().map_err(|source| ApiError::Transport {
            endpoint: GENERATE_PDF_PATH,
            source,
        })?;
        Ok(bytes.to_vec())
    }
}
