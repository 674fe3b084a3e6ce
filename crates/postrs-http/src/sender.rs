use crate::error::{Error, Result};
use crate::types::{HttpResponse, MultipartPart, SendableBody, SendableHttpRequest};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Version};
use std::time::Instant;

/// The one capability the request builder needs from an HTTP client.
#[async_trait]
pub trait HttpSender: Send + Sync {
    async fn send(&self, request: SendableHttpRequest) -> Result<HttpResponse>;
}

/// Reqwest-based implementation of HttpSender
pub struct ReqwestSender {
    client: Client,
}

impl ReqwestSender {
    pub fn new() -> Result<Self> {
        let client = Client::builder().build().map_err(Error::Client)?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSender for ReqwestSender {
    async fn send(&self, request: SendableHttpRequest) -> Result<HttpResponse> {
        let url = normalize_url(&request.url)?;
        let method = Method::from_bytes(request.method.to_uppercase().as_bytes())
            .map_err(|_| Error::InvalidMethod(request.method.clone()))?;

        let mut req_builder = self.client.request(method, &url);

        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }

        if let Some(d) = request.options.timeout
            && !d.is_zero()
        {
            req_builder = req_builder.timeout(d);
        }

        if let Some(json) = &request.json {
            req_builder = req_builder.json(json);
        } else {
            match request.body {
                None => {}
                Some(SendableBody::Text { text, content_type }) => {
                    let has_content_type =
                        request.headers.keys().any(|k| k.eq_ignore_ascii_case("content-type"));
                    if let Some(content_type) = content_type
                        && !has_content_type
                    {
                        req_builder = req_builder.header("Content-Type", content_type);
                    }
                    req_builder = req_builder.body(text);
                }
                Some(SendableBody::Form(pairs)) => {
                    req_builder = req_builder.form(&pairs);
                }
                Some(SendableBody::Multipart(parts)) => {
                    req_builder = req_builder.multipart(build_multipart_form(parts).await?);
                }
            }
        }

        let sendable_req = req_builder.build()?;
        debug!("> {} {}", sendable_req.method(), sendable_req.url());
        for (name, value) in sendable_req.headers() {
            debug!("> {}: {}", name, value.to_str().unwrap_or_default());
        }

        let start = Instant::now();
        let response = self.client.execute(sendable_req).await.map_err(|e| {
            if e.is_timeout() {
                Error::RequestTimeout(request.options.timeout.unwrap_or_default())
            } else {
                Error::Client(e)
            }
        })?;

        let status = response.status().as_u16();
        let status_reason = response.status().canonical_reason().map(|s| s.to_string());
        let final_url = response.url().to_string();
        let version = Some(version_to_str(&response.version()));
        info!("< {} {} ({:?})", status, final_url, start.elapsed());

        let mut headers = Vec::new();
        for (key, value) in response.headers() {
            let v = String::from_utf8_lossy(value.as_bytes()).to_string();
            debug!("< {}: {}", key, v);
            headers.push((key.to_string(), v));
        }

        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            status_reason,
            url: final_url,
            version,
            headers,
            body,
            elapsed: start.elapsed(),
        })
    }
}

/// Fix URLs typed without a scheme and refuse ones with unresolved variables.
pub fn normalize_url(url: &str) -> Result<String> {
    let url = if url.starts_with("http") { url.to_string() } else { format!("http://{url}") };
    if url.contains("{{") {
        return Err(Error::UnrenderedUrl(url));
    }
    Ok(url)
}

async fn build_multipart_form(parts: Vec<MultipartPart>) -> Result<Form> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            MultipartPart::Text { name, value } => form.text(name, value),
            MultipartPart::File { name, path, content_type } => {
                let contents = tokio::fs::read(&path)
                    .await
                    .map_err(|source| Error::ReadFile { path: path.clone(), source })?;
                let filename = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("file")
                    .to_string();
                let mime_type = content_type.unwrap_or_else(|| {
                    mime_guess::from_path(&path).first_or_octet_stream().to_string()
                });
                let part = Part::bytes(contents).file_name(filename).mime_str(&mime_type)?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

fn version_to_str(version: &Version) -> String {
    match *version {
        Version::HTTP_09 => "HTTP/0.9".to_string(),
        Version::HTTP_10 => "HTTP/1.0".to_string(),
        Version::HTTP_11 => "HTTP/1.1".to_string(),
        Version::HTTP_2 => "HTTP/2".to_string(),
        Version::HTTP_3 => "HTTP/3".to_string(),
        _ => "unknown".to_string(),
    }
}
