use crate::config::Settings;
use crate::domain::forms::{NewOrder, NewUser};
use crate::domain::order::OrderRecord;
use crate::domain::series::{ProductSalesRecord, TimeSeriesPoint};
use crate::domain::stats::StatsSnapshot;
use crate::domain::user::UserRecord;
use crate::gateway::{DashboardGateway, GatewayError, GatewayResult};
use anyhow::Context;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Self::new(&settings.api_base_url, settings.http_timeout)
    }

    /// Without a timeout the transport's own defaults apply.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build dashboard http client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(endpoint))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }

    async fn send(&self, endpoint: &str, req: RequestBuilder) -> GatewayResult<String> {
        let res = req.send().await.map_err(|source| GatewayError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = res.status();
        if !status.is_success() {
            return Err(GatewayError::HttpStatus {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        res.text().await.map_err(|source| GatewayError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        req: RequestBuilder,
    ) -> GatewayResult<T> {
        let res = match self.send(endpoint, req).await {
            Ok(text) => serde_json::from_str::<T>(&text).map_err(|source| GatewayError::Decode {
                endpoint: endpoint.to_string(),
                source,
            }),
            Err(err) => Err(err),
        };
        log_failure(endpoint, res)
    }

    async fn fetch_empty(&self, endpoint: &str, req: RequestBuilder) -> GatewayResult<()> {
        let res = self.send(endpoint, req).await.map(|_body| ());
        log_failure(endpoint, res)
    }
}

fn log_failure<T>(endpoint: &str, res: GatewayResult<T>) -> GatewayResult<T> {
    if let Err(err) = &res {
        tracing::error!(endpoint, error = %err, "API request failed");
    }
    res
}

#[async_trait::async_trait]
impl DashboardGateway for HttpGateway {
    async fn stats(&self) -> GatewayResult<StatsSnapshot> {
        self.fetch_json("/stats", self.request(Method::GET, "/stats"))
            .await
    }

    async fn users(&self) -> GatewayResult<Vec<UserRecord>> {
        self.fetch_json("/users", self.request(Method::GET, "/users"))
            .await
    }

    async fn create_user(&self, user: &NewUser) -> GatewayResult<UserRecord> {
        let req = self.request(Method::POST, "/users").json(user);
        self.fetch_json("/users", req).await
    }

    async fn delete_user(&self, id: i64) -> GatewayResult<()> {
        let endpoint = format!("/users/{id}");
        let req = self.request(Method::DELETE, &endpoint);
        self.fetch_empty(&endpoint, req).await
    }

    async fn orders(&self) -> GatewayResult<Vec<OrderRecord>> {
        self.fetch_json("/orders", self.request(Method::GET, "/orders"))
            .await
    }

    async fn create_order(&self, order: &NewOrder) -> GatewayResult<OrderRecord> {
        let req = self.request(Method::POST, "/orders").json(order);
        self.fetch_json("/orders", req).await
    }

    async fn delete_order(&self, id: i64) -> GatewayResult<()> {
        let endpoint = format!("/orders/{id}");
        let req = self.request(Method::DELETE, &endpoint);
        self.fetch_empty(&endpoint, req).await
    }

    async fn revenue(&self) -> GatewayResult<Vec<TimeSeriesPoint>> {
        self.fetch_json("/revenue", self.request(Method::GET, "/revenue"))
            .await
    }

    async fn sales(&self) -> GatewayResult<Vec<ProductSalesRecord>> {
        self.fetch_json("/sales", self.request(Method::GET, "/sales"))
            .await
    }
}
