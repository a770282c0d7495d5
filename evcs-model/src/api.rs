//! Backend contract shared by the browser and native transports.

use crate::cluster::{ClassifyRequest, ClusterResult};
use crate::dataset::{Dataset, UserFilter};
use crate::station::Station;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const GET_INFO: &str = "/get_info";
pub const GET_STATIONS: &str = "/get_stations";
pub const GET_USERS: &str = "/get_users";
pub const CLASSIFY: &str = "/classify";

/// Errors surfaced by a [`DashboardApi`] call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (DNS, connection, CORS, abort).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// The body was not the JSON shape we expect.
    #[error("failed to decode {endpoint} response: {message}")]
    Decode { endpoint: String, message: String },

    #[error("{endpoint} timed out after {after_ms} ms")]
    Timeout { endpoint: String, after_ms: u64 },

    /// Well-formed JSON that violates a data invariant.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Response of `GET /get_users`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub users: Vec<String>,
}

/// The four endpoints the dashboard consumes.
///
/// Implemented with `web_sys` fetch inside the browser and with `reqwest`
/// natively. Futures are not required to be `Send`: the browser transport
/// runs on the single UI thread.
#[allow(async_fn_in_trait)]
pub trait DashboardApi {
    /// `GET /get_info`, optionally scoped with `?username=`.
    async fn get_info(&self, filter: Option<&UserFilter>) -> Result<Dataset, ApiError>;

    /// `GET /get_stations`, scoped to a user unless the filter is "all users".
    async fn get_stations(&self, filter: &UserFilter) -> Result<Vec<Station>, ApiError>;

    /// `GET /get_users`.
    async fn get_users(&self) -> Result<Vec<String>, ApiError>;

    /// `POST /classify`.
    async fn classify(&self, request: &ClassifyRequest) -> Result<ClusterResult, ApiError>;
}

/// Path and query for a `/get_info` request.
pub fn info_path(filter: Option<&UserFilter>) -> String {
    match filter {
        None => GET_INFO.to_string(),
        Some(f) => format!("{}?username={}", GET_INFO, encode_query_value(f.as_value())),
    }
}

/// Path and query for a `/get_stations` request. "All users" uses the bare path.
pub fn stations_path(filter: &UserFilter) -> String {
    match filter {
        UserFilter::All => GET_STATIONS.to_string(),
        UserFilter::User(id) => format!("{}?username={}", GET_STATIONS, encode_query_value(id)),
    }
}

/// Percent-encode a query value, leaving RFC 3986 unreserved bytes as-is.
pub fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Join a base URL and an endpoint path without doubling the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_path_scopes_by_user() {
        assert_eq!(info_path(None), "/get_info");
        assert_eq!(
            info_path(Some(&UserFilter::All)),
            "/get_info?username=ALL_USERS"
        );
        assert_eq!(
            info_path(Some(&UserFilter::User("User_3".into()))),
            "/get_info?username=User_3"
        );
    }

    #[test]
    fn stations_path_uses_bare_path_for_all_users() {
        assert_eq!(stations_path(&UserFilter::All), "/get_stations");
        assert_eq!(
            stations_path(&UserFilter::User("Jo Ana".into())),
            "/get_stations?username=Jo%20Ana"
        );
    }

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(encode_query_value("a&b=c/d"), "a%26b%3Dc%2Fd");
        assert_eq!(encode_query_value("User_10"), "User_10");
        assert_eq!(encode_query_value("é"), "%C3%A9");
    }

    #[test]
    fn join_url_trims_trailing_slash() {
        assert_eq!(join_url("http://localhost:5000/", GET_USERS), "http://localhost:5000/get_users");
        assert_eq!(join_url("", GET_USERS), "/get_users");
    }

    #[test]
    fn error_messages_name_the_endpoint() {
        let err = ApiError::Status {
            endpoint: GET_INFO.into(),
            status: 502,
        };
        assert_eq!(err.to_string(), "/get_info returned HTTP 502");
        let err = ApiError::Timeout {
            endpoint: GET_STATIONS.into(),
            after_ms: 15000,
        };
        assert_eq!(err.to_string(), "/get_stations timed out after 15000 ms");
    }
}
