pub mod client;
pub mod transport;

pub use client::{Ack, ApiClient, LoginResponse};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};

/// The client the web shell uses in production.
pub type DocsApi = ApiClient<HttpTransport>;
