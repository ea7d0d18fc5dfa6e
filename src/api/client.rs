use serde::de::DeserializeOwned;
use serde_json::Value;

use super::transport::{ApiRequest, ApiResponse, Method, Transport};
use crate::errors::ApiError;
use crate::models::DocumentRow;

const UNKNOWN_LOGIN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
}

/// Acknowledgment returned by the mutating endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub status: String,
}

/// Typed access to the remote docs API.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// POST /login. A non-zero `error_code` fails with [`ApiError::Auth`]
    /// even when the HTTP status is 2xx.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = ApiRequest::new(Method::Post, &["login"]).with_body(serde_json::json!({
            "username": username,
            "password": password,
        }));
        let body = match self.send_json(request).await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("Login request failed: {e}");
                return Err(e);
            }
        };

        if is_truthy(body.get("error_code")) {
            let message = body
                .get("error_text")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or(UNKNOWN_LOGIN_ERROR)
                .to_string();
            log::warn!("Login rejected by server: {message}");
            return Err(ApiError::Auth(message));
        }

        let token = body
            .pointer("/data/token")
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::Decode("login response has no data.token".to_string()))?;
        Ok(LoginResponse { token: token.to_string() })
    }

    /// GET /userdocs/get
    pub async fn list_rows(&self, token: &str) -> Result<Vec<DocumentRow>, ApiError> {
        let request = ApiRequest::new(Method::Get, &["userdocs", "get"]).with_token(token);
        let mut body = self.send_json(request).await?;
        let data = body
            .get_mut("data")
            .map(Value::take)
            .ok_or_else(|| ApiError::Decode("list response has no data".to_string()))?;
        decode(data)
    }

    /// POST /userdocs/create
    pub async fn create_row(&self, token: &str, row: &DocumentRow) -> Result<Ack, ApiError> {
        let request = ApiRequest::new(Method::Post, &["userdocs", "create"])
            .with_token(token)
            .with_body(encode(row)?);
        self.send_ack(request).await
    }

    /// POST /userdocs/set/{id}, with `row` as the full replacement.
    pub async fn update_row(&self, token: &str, id: &str, row: &DocumentRow) -> Result<Ack, ApiError> {
        let request = ApiRequest::new(Method::Post, &["userdocs", "set", id])
            .with_token(token)
            .with_body(encode(row)?);
        self.send_ack(request).await
    }

    /// POST /userdocs/delete/{id}
    pub async fn delete_row(&self, token: &str, id: &str) -> Result<Ack, ApiError> {
        let request = ApiRequest::new(Method::Post, &["userdocs", "delete", id]).with_token(token);
        self.send_ack(request).await
    }

    async fn send_ack(&self, request: ApiRequest) -> Result<Ack, ApiError> {
        let body = self.send_json(request).await?;
        let status = match body.get("status") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        Ok(Ack { status })
    }

    async fn send_json(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let method = request.method;
        let path = request.path();
        log::debug!("{method} {path}");

        let response = self.transport.send(request).await?;
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Decode(format!("{method} {path}: {e}")))
    }
}

fn check_status(response: &ApiResponse) -> Result<(), ApiError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(ApiError::Http { status: response.status })
    }
}

/// Truthiness of an `error_code` value: non-zero numbers, `true` and non-empty strings.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn encode(row: &DocumentRow) -> Result<Value, ApiError> {
    serde_json::to_value(row).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode<D: DeserializeOwned>(value: Value) -> Result<D, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
