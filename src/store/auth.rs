/// Credential state of one browser session.
///
/// Only [`AuthState::login_success`] and [`AuthState::logout`] change it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    token: Option<String>,
    is_authenticated: bool,
}

impl AuthState {
    pub fn login_success(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
        self.is_authenticated = true;
    }

    pub fn logout(&mut self) {
        self.token = None;
        self.is_authenticated = false;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }
}
