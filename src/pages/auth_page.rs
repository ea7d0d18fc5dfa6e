use crate::alert::Alert;
use crate::api::{ApiClient, LoginResponse, Transport};
use crate::errors::ApiError;
use crate::sanitize::sanitize_input;
use crate::store::AuthState;

pub const EMPTY_CREDENTIALS: &str = "Login and password must not be empty";
pub const LOGIN_FAILED: &str = "An error occurred while trying to log in";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthIntent {
    LoginRequested { username: String, password: String },
}

/// Sanitized credentials ready to send; produced by [`AuthPage::begin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCall {
    pub username: String,
    pub password: String,
}

impl LoginCall {
    pub async fn run<T: Transport>(self, api: &ApiClient<T>) -> Result<LoginResponse, ApiError> {
        api.login(&self.username, &self.password).await
    }
}

/// Login form state: the last attempt's error banner and which inputs were blank.
#[derive(Debug, Clone, Default)]
pub struct AuthPage {
    loading: bool,
    alert: Alert,
    username: String,
    username_missing: bool,
    password_missing: bool,
}

impl AuthPage {
    /// Returns true when the session is now authenticated.
    pub async fn handle<T: Transport>(
        &mut self,
        intent: AuthIntent,
        api: &ApiClient<T>,
        auth: &mut AuthState,
    ) -> bool {
        match self.begin(intent) {
            Some(call) => {
                let result = call.run(api).await;
                self.finish(result, auth)
            }
            None => false,
        }
    }

    /// Check the credentials and mark the page loading. `None` means no
    /// request should be made: the input was blank or a login is already running.
    pub fn begin(&mut self, intent: AuthIntent) -> Option<LoginCall> {
        let AuthIntent::LoginRequested { username, password } = intent;
        if self.loading {
            log::debug!("Login ignored while another attempt is in flight");
            return None;
        }

        self.username = username.clone();
        self.username_missing = username.trim().is_empty();
        self.password_missing = password.trim().is_empty();
        if self.username_missing || self.password_missing {
            self.alert.raise(EMPTY_CREDENTIALS);
            return None;
        }

        self.loading = true;
        Some(LoginCall {
            username: sanitize_input(&username),
            password: sanitize_input(&password),
        })
    }

    /// Apply the login response. Returns true when the session is now authenticated.
    pub fn finish(&mut self, result: Result<LoginResponse, ApiError>, auth: &mut AuthState) -> bool {
        self.loading = false;
        match result {
            Ok(resp) => {
                log::info!("Login succeeded");
                auth.login_success(resp.token);
                self.alert.dismiss();
                true
            }
            Err(e) => {
                let message = match e {
                    ApiError::Auth(msg) => msg,
                    ApiError::Http { .. } => e.to_string(),
                    ApiError::Transport(_) | ApiError::Decode(_) => LOGIN_FAILED.to_string(),
                };
                self.alert.raise(message);
                false
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn alert(&self) -> &Alert {
        &self.alert
    }

    /// Username of the last attempt, to refill the form.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn username_missing(&self) -> bool {
        self.username_missing
    }

    pub fn password_missing(&self) -> bool {
        self.password_missing
    }
}
