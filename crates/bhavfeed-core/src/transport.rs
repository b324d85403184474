//! Download collaborator used by the pipeline's fetch step.
//!
//! One trait, two implementations: [`ReqwestTransport`] for real
//! downloads and [`StaticTransport`] serving canned bytes for
//! deterministic offline tests. A fetch is a single attempt; failures
//! surface to the orchestrator, which owns the fatal-versus-warning
//! decision.

use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

/// Request headers the NSE archive servers expect from a browser-like
/// client.
const DEFAULT_HEADERS: [(&str, &str); 5] = [
    (
        "accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    ),
    ("accept-encoding", "gzip, deflate"),
    ("accept-language", "en-US,en;q=0.5"),
    ("connection", "keep-alive"),
    (
        "user-agent",
        "Mozilla/5.0 (X11; Ubuntu; Linux i686; rv:27.0) Gecko/20100101 Firefox/27.0",
    ),
];

/// Single-attempt download request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub timeout_ms: u64,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            timeout_ms: 30_000,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_default_headers(mut self) -> Self {
        for (name, value) in DEFAULT_HEADERS {
            self.headers.insert(name.to_owned(), value.to_owned());
        }
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Transport-level failure (unreachable host, timeout, non-2xx status).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TransportError {}

/// Blocking-semantics download contract: one attempt, no caller-visible
/// cancellation, raw bytes out.
pub trait Transport: Send + Sync {
    fn fetch<'a>(
        &'a self,
        request: FetchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, TransportError>> + Send + 'a>>;
}

/// Production transport backed by reqwest. Gzip-encoded responses are
/// inflated by the client before the bytes reach the pipeline.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .gzip(true)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ReqwestTransport {
    fn fetch<'a>(
        &'a self,
        request: FetchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, TransportError>> + Send + 'a>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .get(&request.url)
                .timeout(std::time::Duration::from_millis(request.timeout_ms));
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let response = builder.send().await.map_err(|error| {
                if error.is_timeout() {
                    TransportError::new(format!("request timeout: {error}"))
                } else if error.is_connect() {
                    TransportError::new(format!("connection failed: {error}"))
                } else {
                    TransportError::new(format!("request failed: {error}"))
                }
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(TransportError::new(format!(
                    "server returned status {}",
                    status.as_u16()
                )));
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|error| TransportError::new(format!("failed to read body: {error}")))?;
            Ok(bytes.to_vec())
        })
    }
}

/// Deterministic in-memory transport for offline tests: serves canned
/// bytes by exact URL, fails every other request.
#[derive(Debug, Default)]
pub struct StaticTransport {
    files: HashMap<String, Vec<u8>>,
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.files.insert(url.into(), bytes.into());
        self
    }
}

impl Transport for StaticTransport {
    fn fetch<'a>(
        &'a self,
        request: FetchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, TransportError>> + Send + 'a>> {
        let result = self
            .files
            .get(&request.url)
            .cloned()
            .ok_or_else(|| TransportError::new(format!("no such file: {}", request.url)));
        Box::pin(async move { result })
    }
}
