use crate::error::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendableHttpRequestOptions {
    pub timeout: Option<Duration>,
}

/// Non-JSON request bodies.
#[derive(Debug, Clone, PartialEq)]
pub enum SendableBody {
    /// `content_type` is only applied when no Content-Type header was given.
    Text { text: String, content_type: Option<String> },
    Form(Vec<(String, String)>),
    Multipart(Vec<MultipartPart>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MultipartPart {
    Text { name: String, value: String },
    File { name: String, path: PathBuf, content_type: Option<String> },
}

/// Everything needed for one outgoing call. `json` and `body` are never both set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendableHttpRequest {
    pub url: String,
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub json: Option<Value>,
    pub body: Option<SendableBody>,
    pub options: SendableHttpRequestOptions,
}

impl SendableHttpRequest {
    pub fn new(url: impl Into<String>, method: impl Into<String>) -> Self {
        Self { url: url.into(), method: method.into(), ..Default::default() }
    }
}

/// Response with the body fully read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase, e.g. "OK"
    pub status_reason: Option<String>,
    /// Final URL (after redirects)
    pub url: String,
    /// e.g. "HTTP/1.1"
    pub version: Option<String>,
    /// In arrival order; repeated names (e.g. Set-Cookie) appear once per value.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub elapsed: Duration,
}

impl HttpResponse {
    /// First header value with this name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_values(name).next()
    }

    pub fn header_values<'a, 'b>(&'a self, name: &'b str) -> impl Iterator<Item = &'a str> + use<'a, 'b> {
        self.headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> Result<String> {
        Ok(String::from_utf8(self.body.clone())?)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
