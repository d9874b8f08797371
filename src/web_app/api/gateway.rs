// web_app/api/gateway.rs - Remote data gateway for products
//
// The only place that talks to the network. Each call issues exactly one
// HTTP request and yields one result; retries and interpretation of
// failures are left to the caller.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::AppConfig;
use crate::web_app::model::Product;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: Method,
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl GatewayError {
    /// HTTP status of the failed response, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// The six CRUD operations against the products endpoint
#[async_trait]
pub trait ProductGateway: Send + Sync {
    async fn list(&self) -> GatewayResult<Vec<Product>>;

    async fn get_by_id(&self, id: i64) -> GatewayResult<Product>;

    async fn filter_by_name(&self, name: &str) -> GatewayResult<Vec<Product>>;

    /// Create a product; the result carries the server-assigned id
    async fn create(&self, product: &Product) -> GatewayResult<Product>;

    async fn update(&self, id: i64, product: &Product) -> GatewayResult<Product>;

    async fn delete(&self, id: i64) -> GatewayResult<()>;
}

/// `ProductGateway` over HTTP/JSON using reqwest
#[derive(Clone, Debug)]
pub struct HttpProductGateway {
    client: Client,
    base_url: String,
}

impl HttpProductGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Build a gateway honouring the configured base URL and timeout
    pub fn from_config(config: &AppConfig) -> GatewayResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(GatewayError::Client)?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send the request and check the status, returning the raw response
    async fn send(&self, method: Method, url: String, request: RequestBuilder) -> GatewayResult<reqwest::Response> {
        tracing::debug!("{} {}", method, url);

        let response = request.send().await.map_err(|source| {
            tracing::warn!("{} {} failed: {}", method, url, source);
            GatewayError::Transport { url: url.clone(), source }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("{} {} returned {}", method, url, status);
            return Err(GatewayError::Status { method, url, status, body });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, method: Method, url: String, request: RequestBuilder) -> GatewayResult<T> {
        let response = self.send(method, url.clone(), request).await?;
        response.json::<T>().await.map_err(|source| {
            tracing::warn!("Undecodable response from {}: {}", url, source);
            GatewayError::Decode { url, source }
        })
    }
}

#[async_trait]
impl ProductGateway for HttpProductGateway {
    async fn list(&self) -> GatewayResult<Vec<Product>> {
        let url = self.url("list");
        let request = self.client.get(&url);
        self.send_json(Method::GET, url, request).await
    }

    async fn get_by_id(&self, id: i64) -> GatewayResult<Product> {
        let url = self.url(&id.to_string());
        let request = self.client.get(&url);
        self.send_json(Method::GET, url, request).await
    }

    async fn filter_by_name(&self, name: &str) -> GatewayResult<Vec<Product>> {
        let url = self.url("filter");
        let request = self.client.get(&url).query(&[("name", name)]);
        self.send_json(Method::GET, url, request).await
    }

    async fn create(&self, product: &Product) -> GatewayResult<Product> {
        let url = self.url("");
        let request = self.client.post(&url).json(product);
        self.send_json(Method::POST, url, request).await
    }

    async fn update(&self, id: i64, product: &Product) -> GatewayResult<Product> {
        let url = self.url(&id.to_string());
        let request = self.client.put(&url).json(product);
        self.send_json(Method::PUT, url, request).await
    }

    async fn delete(&self, id: i64) -> GatewayResult<()> {
        let url = self.url(&id.to_string());
        let request = self.client.delete(&url);
        self.send(Method::DELETE, url, request).await?;
        Ok(())
    }
}
