use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use std::fmt;

/// Failure of a call to the remote docs API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Non-2xx response.
    Http { status: u16 },
    /// Login rejected by the server through `error_code`.
    Auth(String),
    /// The request never produced a response (connect, timeout, TLS).
    Transport(String),
    /// The response body was not the JSON we expected.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http { status } => write!(f, "Error: {status}"),
            ApiError::Auth(msg) => write!(f, "{msg}"),
            ApiError::Transport(e) => write!(f, "Transport error: {e}"),
            ApiError::Decode(e) => write!(f, "Unexpected response: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Client-side check on a row draft that failed before any request was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    AllFieldsRequired,
    InvalidDate,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::AllFieldsRequired => write!(f, "All fields are required"),
            ValidationError::InvalidDate => write!(f, "Invalid date"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    DuplicateId(String),
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::DuplicateId(id) => write!(f, "Row id already present: {id}"),
        }
    }
}

impl std::error::Error for StateError {}

/// Errors surfaced by the web shell itself.
#[derive(Debug)]
pub enum AppError {
    Template(askama::Error),
    Session(String),
    Csrf,
    Config(String),
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Csrf => write!(f, "Invalid or missing CSRF token"),
            AppError::Config(e) => write!(f, "Configuration error: {e}"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => HttpResponse::NotFound().body("Not Found"),
            AppError::Csrf => HttpResponse::Forbidden().body("Invalid or missing CSRF token"),
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

/// Render an askama template into a 200 HTML response.
pub fn render(tmpl: impl Template) -> Result<HttpResponse, AppError> {
    let html = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}
