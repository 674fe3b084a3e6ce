use async_trait::async_trait;
use postrs_http::error::{Error, Result};
use postrs_http::sender::HttpSender;
use postrs_http::types::{HttpResponse, SendableHttpRequest};
use std::sync::Mutex;

/// Records every request it is given and answers with an empty 200, or with
/// `Error::InvalidMethod(message)` when built with [`RecordingSender::failing`].
#[derive(Default)]
pub struct RecordingSender {
    calls: Mutex<Vec<SendableHttpRequest>>,
    fail_with: Option<String>,
}

impl RecordingSender {
    pub fn failing(message: &str) -> Self {
        Self { fail_with: Some(message.to_string()), ..Default::default() }
    }

    pub fn calls(&self) -> Vec<SendableHttpRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpSender for RecordingSender {
    async fn send(&self, request: SendableHttpRequest) -> Result<HttpResponse> {
        let url = request.url.clone();
        self.calls.lock().unwrap().push(request);
        match &self.fail_with {
            Some(message) => Err(Error::InvalidMethod(message.clone())),
            None => Ok(HttpResponse { status: 200, url, ..Default::default() }),
        }
    }
}
