use std::sync::Arc;

use tracing::{debug, warn};

use inkpost_client::{ApiClient, Error, LoginRequest, LoginResponse, RegisterRequest};
use inkpost_core::User;
use inkpost_session::{SessionStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};

use crate::error::StoreError;
use crate::messages;

/// Read-only snapshot of authentication state.
///
/// `is_authenticated` agrees with "a non-empty access token sits in
/// session storage" at every settled point; while `loading` is true an
/// action is in flight and the flag must not be relied upon.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

/// Owns authentication status and the cached user record, keeping both in
/// step with persistent session storage.
pub struct AuthStore {
    api: ApiClient,
    session: Arc<dyn SessionStore>,
    state: AuthState,
}

impl AuthStore {
    pub fn new(api: ApiClient, session: Arc<dyn SessionStore>) -> Self {
        Self {
            api,
            session,
            state: AuthState::default(),
        }
    }

    /// Read-only state snapshot.
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Restore the initial state. Session storage is left untouched.
    pub fn reset(&mut self) {
        self.state = AuthState::default();
    }

    /// Authenticate and persist the session.
    ///
    /// On success the access token, refresh token (when issued), and user
    /// record (or a minimal record built from the submitted username when
    /// the server omits one) land in session storage, and the state turns
    /// authenticated.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, StoreError> {
        self.state.loading = true;
        self.state.error = None;

        let result = self.login_inner(username, password).await;
        self.state.loading = false;
        match result {
            Ok((response, user)) => {
                debug!(username, "login succeeded");
                self.state.user = Some(user);
                self.state.is_authenticated = true;
                Ok(response)
            }
            Err(err) => {
                self.state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    async fn login_inner(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<(LoginResponse, User), StoreError> {
        let response = self
            .api
            .login(&LoginRequest::new(username, password))
            .await
            .map_err(|e| StoreError::action(login_message(&e), e))?;

        // A success response that carries no token cannot authenticate.
        let token = match response.access_token().filter(|t| !t.is_empty()) {
            Some(token) => token.to_owned(),
            None => {
                return Err(StoreError::Action {
                    message: "Login failed".to_owned(),
                    source: None,
                })
            }
        };

        self.session.set(ACCESS_TOKEN_KEY, &token)?;
        if let Some(refresh) = response.refresh.as_deref().filter(|t| !t.is_empty()) {
            self.session.set(REFRESH_TOKEN_KEY, refresh)?;
        }

        let user = response
            .user
            .clone()
            .unwrap_or_else(|| User::minimal(username));
        self.persist_user(&user)?;

        Ok((response, user))
    }

    /// Drop the session: all three storage keys removed, state logged out.
    /// Purely local; the server is not told.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.state.user = None;
        self.state.is_authenticated = false;
        self.session.remove(ACCESS_TOKEN_KEY)?;
        self.session.remove(REFRESH_TOKEN_KEY)?;
        self.session.remove(USER_KEY)?;
        Ok(())
    }

    /// Create an account. Auth state is not mutated on success; the caller
    /// routes the user to login.
    ///
    /// Validates locally first — a mismatched or under-8-character
    /// password never reaches the network.
    pub async fn register(&mut self, request: &RegisterRequest) -> Result<User, StoreError> {
        if request.password != request.password2 {
            let err = StoreError::Validation("Passwords do not match".to_owned());
            self.state.error = Some(err.to_string());
            return Err(err);
        }
        if request.password.chars().count() < 8 {
            let err =
                StoreError::Validation("Password must be at least 8 characters".to_owned());
            self.state.error = Some(err.to_string());
            return Err(err);
        }

        self.state.loading = true;
        self.state.error = None;

        let result = self.api.register(request).await;
        self.state.loading = false;
        match result {
            Ok(user) => Ok(user),
            Err(e) => {
                let err = StoreError::action(register_message(&e), e);
                self.state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Fetch the current profile and refresh the cached user record.
    ///
    /// A response the server actually rejected invalidates the whole
    /// session — a stale token must not leave the client claiming it is
    /// authenticated. A transport failure leaves the session alone: an
    /// unreachable server is not evidence the token is bad.
    pub async fn fetch_user(&mut self) -> Result<User, StoreError> {
        self.state.loading = true;
        self.state.error = None;

        let result = self.api.profile().await;
        self.state.loading = false;
        match result {
            Ok(user) => {
                if let Err(err) = self.persist_user(&user) {
                    self.state.error = Some(err.to_string());
                    return Err(err);
                }
                self.state.user = Some(user.clone());
                self.state.is_authenticated = true;
                Ok(user)
            }
            Err(e) if e.is_connection_error() => {
                let err = StoreError::action("Failed to fetch profile", e);
                self.state.error = Some(err.to_string());
                Err(err)
            }
            Err(e) => {
                warn!(status = ?e.status(), "profile fetch rejected; clearing local session");
                self.invalidate_session()?;
                let message = e
                    .api_body()
                    .and_then(messages::detail)
                    .unwrap_or_else(|| "Session expired".to_owned());
                let err = StoreError::action(message, e);
                self.state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Restore authentication from session storage, without the network.
    ///
    /// Returns whether restoration succeeded. Requires both a non-empty
    /// token and a parseable cached user; a corrupted user record is
    /// removed and restoration fails cleanly.
    pub fn check_auth(&mut self) -> bool {
        let token = self
            .session
            .get(ACCESS_TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|t| !t.is_empty());
        let saved_user = self.session.get(USER_KEY).ok().flatten();

        if let (Some(_token), Some(raw)) = (token, saved_user) {
            match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    self.state.user = Some(user);
                    self.state.is_authenticated = true;
                    return true;
                }
                Err(e) => {
                    warn!(error = %e, "failed to restore cached user; dropping it");
                    let _ = self.session.remove(USER_KEY);
                }
            }
        }

        self.state.user = None;
        self.state.is_authenticated = false;
        false
    }

    fn persist_user(&self, user: &User) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(user).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.session.set(USER_KEY, &json)?;
        Ok(())
    }

    fn invalidate_session(&mut self) -> Result<(), StoreError> {
        self.state.user = None;
        self.state.is_authenticated = false;
        self.session.remove(ACCESS_TOKEN_KEY)?;
        self.session.remove(REFRESH_TOKEN_KEY)?;
        self.session.remove(USER_KEY)?;
        Ok(())
    }
}

/// Message for a failed login: `detail`, then the first
/// `non_field_errors` entry, then a generic fallback.
fn login_message(err: &Error) -> String {
    err.api_body()
        .and_then(|body| {
            messages::detail(body).or_else(|| messages::field_first(body, "non_field_errors"))
        })
        .unwrap_or_else(|| "Login failed".to_owned())
}

/// Message for a failed registration: the first field-specific error in
/// a fixed field order, then `detail`, then the body itself.
fn register_message(err: &Error) -> String {
    let Some(body) = err.api_body() else {
        return "Registration failed".to_owned();
    };
    for (field, label) in [
        ("username", "Username"),
        ("email", "Email"),
        ("password", "Password"),
        ("password2", "Confirm Password"),
    ] {
        if let Some(msg) = messages::field_first(body, field) {
            return format!("{label}: {msg}");
        }
    }
    if let Some(msg) = messages::detail(body) {
        return msg;
    }
    match body {
        serde_json::Value::String(s) if !s.is_empty() => s.clone(),
        serde_json::Value::Object(map) if !map.is_empty() => body.to_string(),
        _ => "Registration failed".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api_error(body: serde_json::Value) -> Error {
        Error::Api { status: 400, body }
    }

    #[test]
    fn login_message_prefers_detail() {
        let err = api_error(json!({
            "detail": "Invalid credentials",
            "non_field_errors": ["Unable to log in."]
        }));
        assert_eq!(login_message(&err), "Invalid credentials");
    }

    #[test]
    fn login_message_falls_back_to_non_field_errors() {
        let err = api_error(json!({"non_field_errors": ["Unable to log in."]}));
        assert_eq!(login_message(&err), "Unable to log in.");
    }

    #[test]
    fn login_message_generic_for_connection_failure() {
        let err = Error::Connection("timed out".to_owned());
        assert_eq!(login_message(&err), "Login failed");
    }

    #[test]
    fn register_message_field_order() {
        let err = api_error(json!({
            "email": ["already registered"],
            "username": ["already taken"]
        }));
        assert_eq!(register_message(&err), "Username: already taken");

        let err = api_error(json!({"password2": ["does not match"]}));
        assert_eq!(register_message(&err), "Confirm Password: does not match");
    }

    #[test]
    fn register_message_detail_then_raw_body() {
        let err = api_error(json!({"detail": "closed for signups"}));
        assert_eq!(register_message(&err), "closed for signups");

        let err = api_error(json!({"throttled": true}));
        assert_eq!(register_message(&err), r#"{"throttled":true}"#);

        let err = api_error(json!("service unavailable"));
        assert_eq!(register_message(&err), "service unavailable");
    }
}
