//! `fetch`-backed [`DashboardApi`] for the WASM dashboard.
//!
//! Requests go to the page's own origin unless a base URL is given. Every
//! request carries an `AbortSignal` timeout; an aborted request surfaces as
//! [`ApiError::Timeout`].

use evcs_model::api::{self, UsersResponse};
use evcs_model::{ApiError, ClassifyRequest, ClusterResult, DashboardApi, Dataset, Station, UserFilter};
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortSignal, Headers, Request, RequestInit, Response};

/// Default request timeout of the dashboard.
pub const DEFAULT_TIMEOUT_MS: u32 = 15_000;

#[derive(Debug, Clone, PartialEq)]
pub struct BrowserApi {
    base_url: String,
    timeout_ms: u32,
}

impl Default for BrowserApi {
    fn default() -> Self {
        Self::new("", DEFAULT_TIMEOUT_MS)
    }
}

/// Readable text of a rejected JS promise or thrown value.
fn js_error_text(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

fn is_timeout(value: &JsValue) -> bool {
    js_sys::Reflect::get(value, &JsValue::from_str("name"))
        .ok()
        .and_then(|n| n.as_string())
        .is_some_and(|name| name == "TimeoutError" || name == "AbortError")
}

impl BrowserApi {
    pub fn new(base_url: &str, timeout_ms: u32) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_ms,
        }
    }

    fn transport_error(&self, endpoint: &str, value: &JsValue) -> ApiError {
        if is_timeout(value) {
            ApiError::Timeout {
                endpoint: endpoint.to_string(),
                after_ms: u64::from(self.timeout_ms),
            }
        } else {
            ApiError::Network(js_error_text(value))
        }
    }

    fn build_request(&self, path: &str, json_body: Option<&str>) -> Result<Request, JsValue> {
        let init = RequestInit::new();
        init.set_signal(Some(&AbortSignal::timeout_with_u32(self.timeout_ms)));
        match json_body {
            Some(body) => {
                let headers = Headers::new()?;
                headers.set("Content-Type", "application/json")?;
                init.set_method("POST");
                init.set_headers(&headers);
                init.set_body(&JsValue::from_str(body));
            }
            None => init.set_method("GET"),
        }
        Request::new_with_str_and_init(&api::join_url(&self.base_url, path), &init)
    }

    /// Fetch `path` and decode its JSON body.
    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        path: &str,
        json_body: Option<&str>,
    ) -> Result<T, ApiError> {
        let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
        let request = self
            .build_request(path, json_body)
            .map_err(|e| ApiError::Network(js_error_text(&e)))?;

        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| self.transport_error(endpoint, &e))?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| ApiError::InvalidResponse(format!("{} did not return a Response", endpoint)))?;

        if !response.ok() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: response.status(),
            });
        }

        let text_promise = response
            .text()
            .map_err(|e| ApiError::Network(js_error_text(&e)))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|e| self.transport_error(endpoint, &e))?
            .as_string()
            .unwrap_or_default();

        serde_json::from_str(&text).map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

impl DashboardApi for BrowserApi {
    async fn get_info(&self, filter: Option<&UserFilter>) -> Result<Dataset, ApiError> {
        self.send(api::GET_INFO, &api::info_path(filter), None).await
    }

    async fn get_stations(&self, filter: &UserFilter) -> Result<Vec<Station>, ApiError> {
        self.send(api::GET_STATIONS, &api::stations_path(filter), None).await
    }

    async fn get_users(&self) -> Result<Vec<String>, ApiError> {
        let response: UsersResponse = self.send(api::GET_USERS, api::GET_USERS, None).await?;
        Ok(response.users)
    }

    async fn classify(&self, request: &ClassifyRequest) -> Result<ClusterResult, ApiError> {
        let body = serde_json::to_string(request).map_err(|e| ApiError::Decode {
            endpoint: api::CLASSIFY.to_string(),
            message: e.to_string(),
        })?;
        self.send(api::CLASSIFY, api::CLASSIFY, Some(&body)).await
    }
}
