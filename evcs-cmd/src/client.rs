//! Native `reqwest` transport for the dashboard backend.

use evcs_model::api::{self, UsersResponse};
use evcs_model::{ApiError, ClassifyRequest, ClusterResult, DashboardApi, Dataset, Station, UserFilter};
use log::info;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client bound to one backend base URL.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        api::join_url(&self.base_url, path)
    }

    /// Send a request and decode a JSON body, mapping every failure to an
    /// [`ApiError`] naming `endpoint`.
    async fn send<T: DeserializeOwned>(&self, endpoint: &str, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }

    fn transport_error(&self, endpoint: &str, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout {
                endpoint: endpoint.to_string(),
                after_ms: self.timeout.as_millis() as u64,
            }
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl DashboardApi for HttpClient {
    async fn get_info(&self, filter: Option<&UserFilter>) -> Result<Dataset, ApiError> {
        let url = self.url(&api::info_path(filter));
        info!("GET {}", url);
        self.send(api::GET_INFO, self.client.get(url)).await
    }

    async fn get_stations(&self, filter: &UserFilter) -> Result<Vec<Station>, ApiError> {
        let url = self.url(&api::stations_path(filter));
        info!("GET {}", url);
        self.send(api::GET_STATIONS, self.client.get(url)).await
    }

    async fn get_users(&self) -> Result<Vec<String>, ApiError> {
        let url = self.url(api::GET_USERS);
        info!("GET {}", url);
        let response: UsersResponse = self.send(api::GET_USERS, self.client.get(url)).await?;
        Ok(response.users)
    }

    async fn classify(&self, request: &ClassifyRequest) -> Result<ClusterResult, ApiError> {
        let url = self.url(api::CLASSIFY);
        info!("POST {} ({} x {})", url, request.feat1, request.feat2);
        self.send(api::CLASSIFY, self.client.post(url).json(request)).await
    }
}
