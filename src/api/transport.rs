use std::fmt;
use std::time::Duration;

use reqwest::Url;
use serde_json::Value;

use crate::errors::ApiError;

/// Header carrying the raw session token on authenticated calls.
pub const AUTH_HEADER: &str = "x-auth";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// A docs API call, independent of the HTTP library that carries it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path segments below the base URL, unencoded.
    pub segments: Vec<String>,
    pub token: Option<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            token: None,
            body: None,
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// `/`-joined path, for logging and matching.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("Accept", "application/json".to_string()),
            ("Content-Type", "application/json".to_string()),
        ];
        if let Some(token) = &self.token {
            headers.push((AUTH_HEADER, token.clone()));
        }
        headers
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and hands back the raw response.
///
/// Implementations report only failures to obtain a response; status
/// handling belongs to [`crate::api::ApiClient`].
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Transport(format!("invalid base URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Transport(format!("base URL cannot carry paths: {base_url}")));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    fn url_for(&self, segments: &[String]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("base URL cannot carry paths: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url_for(&request.segments)?;
        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_request_has_json_headers_only() {
        let req = ApiRequest::new(Method::Post, &["login"]);
        let headers = req.headers();
        assert!(headers.contains(&("Accept", "application/json".to_string())));
        assert!(headers.contains(&("Content-Type", "application/json".to_string())));
        assert!(headers.iter().all(|(name, _)| *name != AUTH_HEADER));
    }

    #[test]
    fn token_goes_into_auth_header() {
        let req = ApiRequest::new(Method::Get, &["userdocs", "get"]).with_token("abc");
        assert!(req.headers().contains(&(AUTH_HEADER, "abc".to_string())));
        assert_eq!(req.path(), "/userdocs/get");
    }

    #[test]
    fn segments_are_percent_encoded_under_base_path() {
        let transport =
            HttpTransport::new("https://api.example.com/ru/data/docs", Duration::from_secs(5)).unwrap();
        let url = transport
            .url_for(&["userdocs".into(), "set".into(), "a b/c".into()])
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/ru/data/docs/userdocs/set/a%20b%2Fc");
    }

    #[test]
    fn trailing_slash_on_base_is_not_doubled() {
        let transport = HttpTransport::new("http://localhost:9000/", Duration::from_secs(5)).unwrap();
        let url = transport.url_for(&["login".into()]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/login");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            HttpTransport::new("not a url", Duration::from_secs(1)),
            Err(ApiError::Transport(_))
        ));
        assert!(HttpTransport::new("mailto:someone@example.com", Duration::from_secs(1)).is_err());
    }
}
