// ============================================================================
// GLOO TRANSPORT - fetch() through gloo-net (browser only)
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::Request;

use crate::error::{ApiError, Result};
use crate::services::http::{HttpRequest, HttpResponse, HttpTransport, Method};

#[derive(Clone, Default)]
pub struct GlooTransport;

impl GlooTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Patch => Request::patch(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = match &request.body {
            Some(body) => builder
                .json(body)
                .map_err(|e| ApiError::Transport(format!("Request build error: {}", e)))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Error reading response body: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}
