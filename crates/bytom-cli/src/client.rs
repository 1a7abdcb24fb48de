use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

pub const DEFAULT_URL: &str = "http://127.0.0.1:9888";

pub const SUCCESS: i32 = 0;
pub const ERR_LOCAL_EXE: i32 = 1;
pub const ERR_CONNECT: i32 = 2;
pub const ERR_LOCAL_PARSE: i32 = 3;
pub const ERR_REMOTE: i32 = 4;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    LocalExe(String),
    #[error("connect {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("parse reply: {0}")]
    LocalParse(String),
    #[error("{0}")]
    Remote(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::LocalExe(_) => ERR_LOCAL_EXE,
            CliError::Connect { .. } => ERR_CONNECT,
            CliError::LocalParse(_) => ERR_LOCAL_PARSE,
            CliError::Remote(_) => ERR_REMOTE,
        }
    }
}

/// Envelope the API server wraps every reply in.
#[derive(Debug, Deserialize)]
struct Reply {
    status: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_detail: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

/// Unwraps a reply body into its `data`, turning `"fail"` replies into
/// [`CliError::Remote`].
pub fn parse_reply(body: &[u8]) -> Result<Value, CliError> {
    let reply: Reply =
        serde_json::from_slice(body).map_err(|e| CliError::LocalParse(e.to_string()))?;
    match reply.status.as_str() {
        "success" => Ok(reply.data.unwrap_or(Value::Null)),
        "fail" => {
            let mut msg = reply.msg.unwrap_or_else(|| "request failed".to_string());
            if let Some(code) = reply.code {
                msg = format!("{code}: {msg}");
            }
            if let Some(detail) = reply.error_detail.filter(|d| !d.is_empty()) {
                msg = format!("{msg}: {detail}");
            }
            Err(CliError::Remote(msg))
        }
        other => Err(CliError::LocalParse(format!("unknown reply status {other:?}"))),
    }
}

pub struct Client {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CliError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CliError::LocalExe(format!("build http client: {e}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POSTs `body` as JSON to `path` and returns the reply's `data`.
    pub fn call<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Value, CliError> {
        let url = self.url(path);
        debug!(%url, "rpc request");

        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .map_err(|source| {
                error!(%url, "rpc connect failed: {source}");
                CliError::Connect {
                    url: url.clone(),
                    source,
                }
            })?;

        let status = resp.status();
        let bytes = resp.bytes().map_err(|source| CliError::Connect {
            url: url.clone(),
            source,
        })?;
        debug!(%url, %status, len = bytes.len(), "rpc reply");

        match parse_reply(&bytes) {
            Err(CliError::LocalParse(_)) if !status.is_success() => {
                Err(CliError::Remote(format!("{url}: http status {status}")))
            }
            r => r,
        }
    }
}
