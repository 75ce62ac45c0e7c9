//! HTTP transport with envelope handling
//!
//! Every response is expected to carry the uniform envelope
//! `{ code, message, data, success }`. HTTP-layer failures map to fixed
//! error categories; envelope failures become [`ClientError::Business`].

use std::sync::{Arc, RwLock};

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use shared::Envelope;

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for the admin REST API
///
/// Cheap to clone; clones share the underlying connection pool and the
/// bearer token. The token cell is written only by the session store.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Get the current token, if any
    pub fn token(&self) -> Option<String> {
        self.token.read().expect("token lock poisoned").clone()
    }

    /// Replace the bearer token. Session store only.
    pub(crate) fn set_token(&self, token: Option<String>) {
        *self.token.write().expect("token lock poisoned") = token;
    }

    fn auth_header(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {t}"))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth_header() {
            Some(auth) => request.header(reqwest::header::AUTHORIZATION, auth),
            None => request,
        }
    }

    // ========== Envelope plumbing ==========

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ClientResult<Envelope<T>> {
        let response = self.apply_auth(request).send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<Envelope<T>> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(map_status(status, text));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        if !envelope.is_success() {
            return Err(ClientError::Business {
                code: envelope.code,
                message: envelope.message,
            });
        }

        Ok(envelope)
    }

    fn require_data<T>(envelope: Envelope<T>, path: &str) -> ClientResult<T> {
        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse(format!("missing data for {path}")))
    }

    // ========== Request methods ==========

    /// GET returning the envelope's data
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let envelope = self.send(self.client.get(self.url(path))).await?;
        Self::require_data(envelope, path)
    }

    /// GET with query parameters
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let envelope = self
            .send(self.client.get(self.url(path)).query(query))
            .await?;
        Self::require_data(envelope, path)
    }

    /// POST with JSON body, returning the envelope's data
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let envelope = self.send(self.client.post(self.url(path)).json(body)).await?;
        Self::require_data(envelope, path)
    }

    /// POST with JSON body where the response carries no data
    pub async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        let _: Envelope<serde_json::Value> =
            self.send(self.client.post(self.url(path)).json(body)).await?;
        Ok(())
    }

    /// POST a multipart form, returning the envelope's data
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ClientResult<T> {
        let envelope = self
            .send(self.client.post(self.url(path)).multipart(form))
            .await?;
        Self::require_data(envelope, path)
    }

    /// POST without body where the response carries no data
    pub async fn post_empty(&self, path: &str) -> ClientResult<()> {
        let _: Envelope<serde_json::Value> = self.send(self.client.post(self.url(path))).await?;
        Ok(())
    }

    /// PUT with JSON body, returning the envelope's data
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let envelope = self.send(self.client.put(self.url(path)).json(body)).await?;
        Self::require_data(envelope, path)
    }

    /// PUT with JSON body where the response carries no data
    pub async fn put_unit<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        let _: Envelope<serde_json::Value> =
            self.send(self.client.put(self.url(path)).json(body)).await?;
        Ok(())
    }

    /// DELETE returning the envelope's data
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let envelope = self.send(self.client.delete(self.url(path))).await?;
        Self::require_data(envelope, path)
    }

    /// DELETE where the response carries no data
    pub async fn delete_unit(&self, path: &str) -> ClientResult<()> {
        let _: Envelope<serde_json::Value> = self.send(self.client.delete(self.url(path))).await?;
        Ok(())
    }

    /// DELETE with query parameters, returning the envelope's data
    pub async fn delete_with_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let envelope = self
            .send(self.client.delete(self.url(path)).query(query))
            .await?;
        Self::require_data(envelope, path)
    }
}

/// Map an HTTP failure status to its fixed error category
fn map_status(status: StatusCode, text: String) -> ClientError {
    match status {
        StatusCode::BAD_REQUEST => ClientError::Validation(text),
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden(text),
        StatusCode::NOT_FOUND => ClientError::NotFound(text),
        StatusCode::INTERNAL_SERVER_ERROR => ClientError::Internal(text),
        other => ClientError::Internal(format!("HTTP {other}: {text}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_covers_fixed_categories() {
        assert!(matches!(
            map_status(StatusCode::BAD_REQUEST, String::new()),
            ClientError::Validation(_)
        ));
        assert!(matches!(
            map_status(StatusCode::UNAUTHORIZED, String::new()),
            ClientError::Unauthorized
        ));
        assert!(matches!(
            map_status(StatusCode::FORBIDDEN, String::new()),
            ClientError::Forbidden(_)
        ));
        assert!(matches!(
            map_status(StatusCode::NOT_FOUND, String::new()),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            map_status(StatusCode::INTERNAL_SERVER_ERROR, String::new()),
            ClientError::Internal(_)
        ));
        // anything else degrades to the generic category
        assert!(matches!(
            map_status(StatusCode::BAD_GATEWAY, String::new()),
            ClientError::Internal(_)
        ));
    }
}
