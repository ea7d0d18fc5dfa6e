//! Shared test infrastructure.
//!
//! - `ScriptedTransport`: in-memory transport that records requests and
//!   replays queued responses, for driving the client and pages directly.
//! - `spawn_fake_api()`: a real HTTP docs API on a random local port, for
//!   end-to-end tests through `HttpTransport` and the web shell.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

use docdesk::api::{ApiClient, ApiRequest, ApiResponse, Transport};
use docdesk::errors::ApiError;
use docdesk::models::DocumentRow;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "secret";
pub const TOKEN: &str = "abc";

// ============================================================================
// FIXTURES
// ============================================================================

/// A complete, valid row.
pub fn sample_row(id: &str) -> DocumentRow {
    DocumentRow {
        id: id.to_string(),
        document_name: format!("Contract {id}"),
        document_type: "Employment".to_string(),
        document_status: "Signed".to_string(),
        company_sig_date: "2024-03-01T00:00:00.000Z".to_string(),
        company_signature_name: "ACME".to_string(),
        employee_number: "1024".to_string(),
        employee_sig_date: "2024-03-02T00:00:00.000Z".to_string(),
        employee_signature_name: "Alice".to_string(),
    }
}

pub fn ids(rows: &[DocumentRow]) -> Vec<&str> {
    rows.iter().map(|r| r.id.as_str()).collect()
}

// ============================================================================
// SCRIPTED TRANSPORT
// ============================================================================

#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    /// Queue a response. Once the queue is empty every call gets `200 {"status":"ok"}`.
    pub fn respond(&self, status: u16, body: Value) {
        self.responses.lock().unwrap().push_back(Ok(ApiResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn respond_raw(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(ApiResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn fail(&self, error: ApiError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_paths(&self) -> Vec<String> {
        self.requests().iter().map(|r| r.path()).collect()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(ApiResponse {
                status: 200,
                body: r#"{"status":"ok"}"#.to_string(),
            })
        })
    }
}

pub fn scripted_api() -> ApiClient<ScriptedTransport> {
    ApiClient::new(ScriptedTransport::default())
}

// ============================================================================
// FAKE DOCS API SERVER
// ============================================================================

/// State behind the fake server; tests inspect and seed it directly.
#[derive(Clone, Default)]
pub struct FakeDocsApi {
    pub rows: Arc<Mutex<Vec<DocumentRow>>>,
    /// When set, every `/userdocs/*` call answers with this status.
    pub fail_status: Arc<Mutex<Option<u16>>>,
    /// When set, every call waits this long before answering.
    pub delay: Arc<Mutex<Option<Duration>>>,
}

impl FakeDocsApi {
    pub fn with_rows(rows: Vec<DocumentRow>) -> Self {
        let api = Self::default();
        *api.rows.lock().unwrap() = rows;
        api
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn rows(&self) -> Vec<DocumentRow> {
        self.rows.lock().unwrap().clone()
    }
}

/// Start the fake API on 127.0.0.1 and return its base URL.
/// Must run inside an actix runtime (`#[actix_web::test]`).
pub fn spawn_fake_api(state: FakeDocsApi) -> String {
    let data = web::Data::new(state);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/login", web::post().to(fake_login))
            .route("/userdocs/get", web::get().to(fake_list))
            .route("/userdocs/create", web::post().to(fake_create))
            .route("/userdocs/set/{id}", web::post().to(fake_set))
            .route("/userdocs/delete/{id}", web::post().to(fake_delete))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind fake API");
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{addr}")
}

async fn pause(state: &FakeDocsApi) {
    let delay = *state.delay.lock().unwrap();
    if let Some(delay) = delay {
        actix_web::rt::time::sleep(delay).await;
    }
}

async fn fake_login(state: web::Data<FakeDocsApi>, body: web::Json<Value>) -> HttpResponse {
    pause(&state).await;
    if body["username"] == USERNAME && body["password"] == PASSWORD {
        HttpResponse::Ok().json(json!({ "error_code": 0, "data": { "token": TOKEN } }))
    } else {
        HttpResponse::Ok().json(json!({ "error_code": 2004, "error_text": "bad creds" }))
    }
}

/// Auth and forced-failure checks shared by the `/userdocs/*` routes.
fn guard(req: &HttpRequest, state: &FakeDocsApi) -> Option<HttpResponse> {
    if let Some(status) = *state.fail_status.lock().unwrap() {
        let code = actix_web::http::StatusCode::from_u16(status).expect("valid status");
        return Some(HttpResponse::build(code).finish());
    }
    let token = req.headers().get("x-auth").and_then(|v| v.to_str().ok());
    if token != Some(TOKEN) {
        return Some(HttpResponse::Unauthorized().finish());
    }
    None
}

async fn fake_list(req: HttpRequest, state: web::Data<FakeDocsApi>) -> HttpResponse {
    pause(&state).await;
    if let Some(resp) = guard(&req, &state) {
        return resp;
    }
    HttpResponse::Ok().json(json!({ "data": state.rows() }))
}

async fn fake_create(
    req: HttpRequest,
    state: web::Data<FakeDocsApi>,
    row: web::Json<DocumentRow>,
) -> HttpResponse {
    pause(&state).await;
    if let Some(resp) = guard(&req, &state) {
        return resp;
    }
    state.rows.lock().unwrap().push(row.into_inner());
    HttpResponse::Ok().json(json!({ "status": "created" }))
}

async fn fake_set(
    req: HttpRequest,
    state: web::Data<FakeDocsApi>,
    path: web::Path<String>,
    row: web::Json<DocumentRow>,
) -> HttpResponse {
    pause(&state).await;
    if let Some(resp) = guard(&req, &state) {
        return resp;
    }
    let id = path.into_inner();
    let mut rows = state.rows.lock().unwrap();
    match rows.iter_mut().find(|r| r.id == id) {
        Some(slot) => {
            *slot = row.into_inner();
            HttpResponse::Ok().json(json!({ "status": "updated" }))
        }
        None => HttpResponse::NotFound().finish(),
    }
}

async fn fake_delete(
    req: HttpRequest,
    state: web::Data<FakeDocsApi>,
    path: web::Path<String>,
) -> HttpResponse {
    pause(&state).await;
    if let Some(resp) = guard(&req, &state) {
        return resp;
    }
    let id = path.into_inner();
    state.rows.lock().unwrap().retain(|r| r.id != id);
    HttpResponse::Ok().json(json!({ "status": "deleted" }))
}
