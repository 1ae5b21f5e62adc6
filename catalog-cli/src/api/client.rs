//! HTTP client for the catalog admin's delete-by-key endpoint

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, trace};
use reqwest::Client;

use super::operations::{DeleteRequest, DeleteResponse, ResponseBody};
use super::resilience::{ConcurrencyLimiter, ResilienceConfig};
use super::{DeleteByKey, DeleteSlot};
use crate::sheet::Identifier;

/// Path of the delete-by-key route on the admin app
pub const DEFAULT_DELETE_PATH: &str = "/api/products/bulk-delete";

/// Talks to one catalog admin deployment
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    delete_path: String,
    token: Option<String>,
    http_client: Client,
    limiter: ConcurrencyLimiter,
}

impl CatalogClient {
    /// Client with default resilience settings
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, &ResilienceConfig::default())
    }

    pub fn with_config(base_url: &str, resilience: &ResilienceConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = resilience.timeout.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http_client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            delete_path: DEFAULT_DELETE_PATH.to_string(),
            token: None,
            http_client,
            limiter: ConcurrencyLimiter::new(resilience.concurrency.max_concurrent_requests),
        })
    }

    /// Override the delete route, e.g. when the admin app is mounted under a prefix
    pub fn with_delete_path(mut self, path: &str) -> Self {
        let path = path.trim();
        self.delete_path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        self
    }

    /// Send `Authorization: Bearer <token>` with every request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn delete_url(&self) -> String {
        format!("{}{}", self.base_url, self.delete_path)
    }

    /// Delete every product matching `identifier`, waiting for a free request
    /// slot first.
    ///
    /// Any HTTP response is classified into a [`DeleteResponse`]; only
    /// transport failures (connect, reset, unreadable body) are errors.
    pub async fn delete_by_key(&self, identifier: &Identifier) -> Result<DeleteResponse> {
        let _slot = self.limiter.acquire().await?;
        self.send_delete(identifier).await
    }

    async fn send_delete(&self, identifier: &Identifier) -> Result<DeleteResponse> {
        let mut request = self
            .http_client
            .post(self.delete_url())
            .json(&DeleteRequest::new(identifier));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request
            .send()
            .await
            .with_context(|| format!("Delete request failed for {}", identifier))?;

        let status = resp.status().as_u16();
        let text = resp
            .text()
            .await
            .with_context(|| format!("Failed to read delete response for {}", identifier))?;
        trace!("Delete {} -> {} {}", identifier, status, text);

        let response = DeleteResponse::from_status(status, &ResponseBody::parse(&text));
        debug!("Delete {} -> {:?}", identifier, response);

        Ok(response)
    }
}

#[async_trait]
impl DeleteByKey for CatalogClient {
    async fn reserve(&self) -> Result<DeleteSlot> {
        self.limiter.acquire().await.map(Some)
    }

    /// Sends without taking a slot; pair with [`reserve`](DeleteByKey::reserve)
    async fn delete(&self, identifier: &Identifier) -> Result<DeleteResponse> {
        self.send_delete(identifier).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn id(code: &str) -> Identifier {
        Identifier::new(code).unwrap()
    }

    #[test]
    fn test_trailing_slash_removed() {
        let client = CatalogClient::new("http://admin.local:3000/").unwrap();
        assert_eq!(client.base_url(), "http://admin.local:3000");
        assert_eq!(
            client.delete_url(),
            "http://admin.local:3000/api/products/bulk-delete"
        );
    }

    #[test]
    fn test_delete_path_gets_leading_slash() {
        let client = CatalogClient::new("http://admin.local")
            .unwrap()
            .with_delete_path("admin/api/products/bulk-delete");
        assert_eq!(
            client.delete_url(),
            "http://admin.local/admin/api/products/bulk-delete"
        );
    }

    #[tokio::test]
    async fn test_delete_success_reads_count() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/products/bulk-delete"))
            .and(body_json(serde_json::json!({"vendorGoodsCode": "SKU-1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "vendorGoodsCode": "SKU-1",
                "deletedCount": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CatalogClient::new(&server.uri()).unwrap();
        let response = client.delete_by_key(&id("SKU-1")).await.unwrap();

        assert_eq!(response, DeleteResponse::Deleted { deleted_count: 1 });
    }

    #[tokio::test]
    async fn test_not_found_is_not_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/products/bulk-delete"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "success": false,
                "message": "no matching product",
                "vendorGoodsCode": "GONE"
            })))
            .mount(&server)
            .await;

        let client = CatalogClient::new(&server.uri()).unwrap();
        let response = client.delete_by_key(&id("GONE")).await.unwrap();

        assert_eq!(
            response,
            DeleteResponse::NotFound {
                message: Some("no matching product".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_server_fault_is_classified() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/products/bulk-delete"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": "Internal server error",
                "vendorGoodsCode": "SKU-1"
            })))
            .mount(&server)
            .await;

        let client = CatalogClient::new(&server.uri()).unwrap();
        let response = client.delete_by_key(&id("SKU-1")).await.unwrap();

        assert_eq!(response.status_code(), 500);
        assert!(matches!(response, DeleteResponse::Fault { .. }));
    }

    #[tokio::test]
    async fn test_bearer_token_is_sent() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/products/bulk-delete"))
            .and(header("authorization", "Bearer s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "deletedCount": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CatalogClient::new(&server.uri())
            .unwrap()
            .with_token(Some("s3cret".to_string()));
        let response = client.delete_by_key(&id("SKU-1")).await.unwrap();

        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let client = CatalogClient::new(&uri).unwrap();
        let result = client.delete_by_key(&id("SKU-1")).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_reserve_is_capped_per_client() {
        let mut resilience = ResilienceConfig::default();
        resilience.concurrency.max_concurrent_requests = 1;
        let client = CatalogClient::with_config("http://admin.local", &resilience).unwrap();
        let shared = client.clone();

        let held = client.reserve().await.unwrap();
        assert!(held.is_some());

        let waiting =
            tokio::time::timeout(std::time::Duration::from_millis(20), shared.reserve()).await;
        assert!(waiting.is_err());

        drop(held);
        assert!(shared.reserve().await.unwrap().is_some());
    }
}
