//! HTTP transport for the batch progress loop

use async_trait::async_trait;
use namecast_core::BatchTransport;
use namecast_domain::{BatchRequest, BatchResponse, BatchResult, NamecastError, Result, UserCount};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::client::{map_http_error, HttpClient};

/// Talks to a running server's batch and user-count endpoints.
pub struct BatchEndpointClient {
    http: HttpClient,
    base_url: String,
    token: Option<String>,
}

impl BatchEndpointClient {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url, token: None }
    }

    /// Bearer token sent with every request.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn call(&self, method: Method, path: &str, body: Option<&BatchRequest>) -> Result<Response> {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.http.send(builder).await
    }
}

#[async_trait]
impl BatchTransport for BatchEndpointClient {
    async fn user_count(&self) -> Result<UserCount> {
        let response = self.call(Method::GET, "/api/users/count", None).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(response).await);
        }
        decode(response).await
    }

    async fn process_page(&self, offset: u32) -> Result<BatchResult> {
        let response = self.call(Method::POST, "/api/batch", Some(&BatchRequest { offset })).await?;
        let status = response.status();

        match decode::<BatchResponse>(response).await {
            Ok(BatchResponse::Success(result)) if status.is_success() => {
                debug!(offset, processed = result.processed_count, "Batch page processed");
                Ok(result)
            }
            Ok(BatchResponse::Failure { error_message }) => {
                Err(error_for_status(status, error_message))
            }
            Ok(BatchResponse::Success(_)) | Err(_) => Err(error_for_status(
                status,
                format!("unexpected response from batch endpoint (HTTP {})", status.as_u16()),
            )),
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    response.json::<T>().await.map_err(map_http_error)
}

async fn error_from_response(response: Response) -> NamecastError {
    let status = response.status();
    let message = match response.json::<BatchResponse>().await {
        Ok(BatchResponse::Failure { error_message }) => error_message,
        _ => format!("HTTP {}", status.as_u16()),
    };
    error_for_status(status, message)
}

/// Map a server's status code back onto the domain error it came from.
fn error_for_status(status: StatusCode, message: String) -> NamecastError {
    match status.as_u16() {
        400 => NamecastError::Configuration(message),
        401 | 403 => NamecastError::Authorization(message),
        404 => NamecastError::NotFound(message),
        422 => NamecastError::Validation(message),
        500 => NamecastError::Store(message),
        _ => NamecastError::Network(message),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> BatchEndpointClient {
        BatchEndpointClient::new(HttpClient::new().expect("http client"), server.uri())
            .with_token(Some("s3cret".into()))
    }

    #[tokio::test]
    async fn posts_offset_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/batch"))
            .and(header("authorization", "Bearer s3cret"))
            .and(body_json(json!({ "offset": 50 })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "processedCount": 50, "hasMore": true })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server).process_page(50).await.unwrap();

        assert_eq!(result, BatchResult { processed_count: 50, has_more: true });
    }

    #[tokio::test]
    async fn error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/batch"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "errorMessage": "no fields selected" })),
            )
            .mount(&server)
            .await;

        let err = client(&server).process_page(0).await.unwrap_err();

        assert_eq!(err, NamecastError::Configuration("no fields selected".into()));
    }

    #[tokio::test]
    async fn unexpected_body_is_a_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let err = client(&server).process_page(0).await.unwrap_err();

        assert!(matches!(err, NamecastError::Network(msg) if msg.contains("502")));
    }

    #[tokio::test]
    async fn reads_user_total_and_page_size() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/count"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "total": 120, "pageSize": 25 })),
            )
            .mount(&server)
            .await;

        assert_eq!(
            client(&server).user_count().await.unwrap(),
            UserCount { total: 120, page_size: 25 }
        );
    }

    #[tokio::test]
    async fn rejected_token_is_an_authorization_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/count"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "errorMessage": "unauthorized" })),
            )
            .mount(&server)
            .await;

        let err = client(&server).user_count().await.unwrap_err();

        assert_eq!(err, NamecastError::Authorization("unauthorized".into()));
    }
}
