// ============================================================================
// API CLIENT - HTTP only (stateless apart from the token it reads)
// ============================================================================
// Binds the base URL, attaches the bearer token and maps statuses to
// ApiError. No business logic, no retries.
// ============================================================================

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{ApiError, Result};
use crate::services::http::{HttpRequest, HttpTransport, Method};
use crate::utils::TokenStore;

#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    transport: Rc<dyn HttpTransport>,
    tokens: Rc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        transport: Rc<dyn HttpTransport>,
        tokens: Rc<dyn TokenStore>,
    ) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            transport,
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub async fn get<R: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<R> {
        self.send(Method::Get, segments, query, None).await
    }

    pub async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<R> {
        let body = serde_json::to_value(body)?;
        self.send(Method::Post, segments, &[], Some(body)).await
    }

    pub async fn patch<B: Serialize, R: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<R> {
        let body = serde_json::to_value(body)?;
        self.send(Method::Patch, segments, &[], Some(body)).await
    }

    async fn send<R: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<R> {
        let url = self.url(segments, query)?;

        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if let Some(token) = self.tokens.load().filter(|t| !t.is_empty()) {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        log::debug!("➡️ {} {}", method.as_str(), url);

        let response = self
            .transport
            .send(HttpRequest {
                method,
                url: url.clone(),
                headers,
                body,
            })
            .await?;

        if !response.ok() {
            let error = ApiError::from_response(response.status, &response.body);
            log::warn!("⚠️ {} {} failed: {}", method.as_str(), url, error);
            return Err(error);
        }

        serde_json::from_str::<R>(&response.body).map_err(|e| {
            log::error!("❌ Could not decode response of {} {}: {}", method.as_str(), url, e);
            ApiError::Json(e)
        })
    }

    fn url(&self, segments: &[&str], query: &[(&str, String)]) -> Result<String> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
        }
        Ok(url.into())
    }
}
