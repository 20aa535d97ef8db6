//! Auth Flows
//!
//! Login, Google sign-in, register-then-login and the two-step password
//! reset. Every failure comes back as a user-facing `AuthError`.

use serde::Serialize;
use serde_json::Value;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::{ApiError, AuthError};
use crate::models::User;
use crate::session::{LoginResponse, Persistence, StoredUser};
use crate::validation;

pub const NETWORK_ERROR: &str = "Network error. Please check your connection.";
pub const ACCOUNT_CREATED: &str = "Account created successfully! Please log in.";
pub const OTP_SENT: &str = "OTP sent to your email.";
pub const PASSWORD_RESET_DONE: &str = "Password reset successfully! You can now login.";

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct Registration<'a> {
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct GoogleCredential<'a> {
    token: &'a str,
}

#[derive(Debug, Serialize)]
struct ResetRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct ResetConfirm<'a> {
    email: &'a str,
    otp: &'a str,
    new_password: &'a str,
}

/// Page a Google credential came from; only the failure wording differs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoogleFlow {
    Login,
    SignUp,
}

impl GoogleFlow {
    fn action(self) -> &'static str {
        match self {
            GoogleFlow::Login => "login",
            GoogleFlow::SignUp => "sign up",
        }
    }

    pub fn no_token_message(self) -> String {
        format!("Google {} failed. No token received.", self.action())
    }

    pub fn failure_message(self) -> String {
        format!("Google {} failed. Please try again.", self.action())
    }
}

/// Sign-up form
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Result of a successful registration
#[derive(Debug, Clone, PartialEq)]
pub enum RegisterOutcome {
    /// Auto-login worked; the session is stored session-scoped
    LoggedIn(StoredUser),
    /// Account exists but the follow-up login did not; carries the banner text
    LoginRequired(String),
}

/// Result of re-reading `/user/me/`
#[derive(Debug, Clone, PartialEq)]
pub struct UserRefresh {
    /// Fresh user, or the cached one when the request failed
    pub user: Option<StoredUser>,
    pub error: Option<String>,
}

fn login_failure(err: &ApiError) -> AuthError {
    if err.is_unauthorized() {
        AuthError::failed("Invalid email or password.")
    } else if let Some(detail) = err.body_str("detail") {
        AuthError::failed(detail)
    } else if err.is_network() {
        AuthError::failed(NETWORK_ERROR)
    } else {
        AuthError::failed("Login failed. Please check your credentials.")
    }
}

fn register_failure(err: &ApiError) -> AuthError {
    if err.is_network() {
        return AuthError::failed(NETWORK_ERROR);
    }
    if err.status == Some(400) && err.has_field("email") {
        return AuthError::failed("This email is already registered.");
    }
    err.body_str("detail")
        .or_else(|| err.body_str("message"))
        .map(AuthError::failed)
        .unwrap_or_else(|| AuthError::failed("Registration failed. Please try again."))
}

/// Auth flows bound to a client and its session
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn post_login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.client
            .post_public(endpoints::LOGIN, &Credentials { email, password })
            .await
    }

    /// Email/password login
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        persistence: Persistence,
    ) -> Result<StoredUser, AuthError> {
        validation::validate_login(email, password)?;

        let response = self.post_login(email, password).await.map_err(|e| {
            log::warn!("[AUTH] login failed: {}", e);
            login_failure(&e)
        })?;
        let user = self.client.session().persist_login(&response, persistence)?;
        log::info!("[AUTH] logged in as {}", user.email);
        Ok(user)
    }

    /// Exchange a Google credential for a session
    pub async fn login_with_google(
        &self,
        credential: Option<&str>,
        persistence: Persistence,
        flow: GoogleFlow,
    ) -> Result<StoredUser, AuthError> {
        let token = credential
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AuthError::failed(flow.no_token_message()))?;

        let response: LoginResponse = self
            .client
            .post_public(endpoints::GOOGLE_AUTH, &GoogleCredential { token })
            .await
            .map_err(|e| {
                log::warn!("[AUTH] google login failed: {}", e);
                AuthError::failed(flow.failure_message())
            })?;
        self.client.session().persist_login(&response, persistence)
    }

    /// Register, then log in with the same credentials
    pub async fn register(&self, form: &SignUpForm) -> Result<RegisterOutcome, AuthError> {
        validation::validate_signup(&form.first_name, &form.last_name, &form.email, &form.password)?;

        let body = Registration {
            first_name: form.first_name.trim(),
            last_name: form.last_name.trim(),
            email: form.email.trim(),
            password: &form.password,
        };
        let _: Value = self
            .client
            .post_public(endpoints::REGISTER, &body)
            .await
            .map_err(|e| {
                log::warn!("[AUTH] register failed: {}", e);
                register_failure(&e)
            })?;
        log::info!("[AUTH] registered {}", body.email);

        let logged_in = match self.post_login(body.email, &form.password).await {
            Ok(response) => self
                .client
                .session()
                .persist_login(&response, Persistence::SessionScoped)
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        Ok(match logged_in {
            Ok(user) => RegisterOutcome::LoggedIn(user),
            Err(e) => {
                log::warn!("[AUTH] auto-login after register failed: {}", e);
                RegisterOutcome::LoginRequired(ACCOUNT_CREATED.to_string())
            }
        })
    }

    /// Step one of the reset: mail an OTP
    pub async fn request_password_reset(&self, email: &str) -> Result<&'static str, AuthError> {
        validation::validate_reset_request(email)?;
        let _: Value = self
            .client
            .post_public(endpoints::PASSWORD_RESET, &ResetRequest { email: email.trim() })
            .await
            .map_err(|e| AuthError::failed(e.detail_or("Failed to send OTP. Please try again.")))?;
        Ok(OTP_SENT)
    }

    /// Step two: OTP plus the new password
    pub async fn confirm_password_reset(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<&'static str, AuthError> {
        validation::validate_reset_confirm(otp, new_password, confirm_password)?;
        let body = ResetConfirm {
            email: email.trim(),
            otp: otp.trim(),
            new_password,
        };
        let _: Value = self
            .client
            .post_public(endpoints::PASSWORD_RESET_CONFIRM, &body)
            .await
            .map_err(|e| {
                AuthError::failed(e.detail_or("Failed to reset password. Invalid OTP or expired."))
            })?;
        Ok(PASSWORD_RESET_DONE)
    }

    /// Reload the signed-in user. `None` when there is no token to use.
    pub async fn refresh_user(&self) -> Option<UserRefresh> {
        let session = self.client.session();
        session.access_token()?;

        match self.client.get::<User>(endpoints::ME).await {
            Ok(user) => {
                let stored = StoredUser::from(&user);
                if let Err(e) = session.store_user(&stored) {
                    log::warn!("[AUTH] could not cache user: {}", e);
                }
                Some(UserRefresh {
                    user: Some(stored),
                    error: None,
                })
            }
            Err(e) => {
                log::error!("[AUTH] Failed to fetch user: {}", e);
                Some(UserRefresh {
                    user: session.cached_user(),
                    error: Some(e.message),
                })
            }
        }
    }

    /// Forget the cached user in both areas, keep tokens
    pub fn clear_user(&self) {
        self.client.session().clear_user();
    }

    /// Drop every stored credential
    pub fn logout(&self) {
        self.client.session().clear();
        log::info!("[AUTH] logged out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{anonymous_client, MockTransport};
    use crate::transport::RequestBody;
    use serde_json::json;

    fn login_body(access: Option<&str>) -> Value {
        json!({
            "access": access,
            "refresh": "r",
            "user": {
                "id": "0b6f5a2e-7f5e-4c59-8a43-2d7c0f0e9b11",
                "email": "ada@example.com",
                "first_name": "Ada",
                "last_name": "Lovelace"
            }
        })
    }

    fn signup(password: &str) -> SignUpForm {
        SignUpForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_short_signup_password_sends_nothing() {
        let transport = MockTransport::new();
        let auth = AuthService::new(anonymous_client(&transport));

        let err = auth.register(&signup("1234567")).await.unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 8 characters long");
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_login_without_access_writes_nothing() {
        let transport = MockTransport::new();
        transport.respond(200, login_body(None));
        let client = anonymous_client(&transport);
        let auth = AuthService::new(client.clone());

        let err = auth
            .login("ada@example.com", "secret123", Persistence::Persistent)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid response from server");
        assert!(client.session().access_token().is_none());
        assert!(client.session().cached_user().is_none());
    }

    #[tokio::test]
    async fn test_login_persists_and_posts_credentials() {
        let transport = MockTransport::new();
        transport.respond(200, login_body(Some("a-token")));
        let client = anonymous_client(&transport);
        let auth = AuthService::new(client.clone());

        let user = auth
            .login("ada@example.com", "secret123", Persistence::SessionScoped)
            .await
            .unwrap();
        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(client.session().token_area(), Some(Persistence::SessionScoped));

        let sent = &transport.requests()[0];
        assert_eq!(sent.url, "http://test.local/user/login/");
        assert_eq!(
            sent.body,
            Some(RequestBody::Json(json!({"email": "ada@example.com", "password": "secret123"})))
        );
    }

    #[tokio::test]
    async fn test_login_error_messages() {
        let transport = MockTransport::new();
        transport.respond(401, json!({"detail": "No active account"}));
        transport.respond(403, json!({"detail": "Account disabled."}));
        transport.fail("connection refused");
        transport.respond(500, json!(null));
        let auth = AuthService::new(anonymous_client(&transport));

        let mut messages = Vec::new();
        for _ in 0..4 {
            let err = auth.login("a@b.co", "pw", Persistence::Persistent).await.unwrap_err();
            messages.push(err.to_string());
        }
        assert_eq!(
            messages,
            vec![
                "Invalid email or password.",
                "Account disabled.",
                "Network error. Please check your connection.",
                "Login failed. Please check your credentials.",
            ]
        );
    }

    #[tokio::test]
    async fn test_login_validation_before_request() {
        let transport = MockTransport::new();
        let auth = AuthService::new(anonymous_client(&transport));
        let err = auth.login("", "pw", Persistence::Persistent).await.unwrap_err();
        assert_eq!(err.to_string(), "Email is required");
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let transport = MockTransport::new();
        transport.respond(201, json!({"id": "0b6f5a2e-7f5e-4c59-8a43-2d7c0f0e9b11"}));
        transport.respond(200, login_body(Some("fresh")));
        let client = anonymous_client(&transport);
        let auth = AuthService::new(client.clone());

        let outcome = auth.register(&signup("longenough")).await.unwrap();
        assert!(matches!(outcome, RegisterOutcome::LoggedIn(ref u) if u.email == "ada@example.com"));
        assert_eq!(client.session().token_area(), Some(Persistence::SessionScoped));

        let sent = transport.requests();
        assert_eq!(sent[0].url, "http://test.local/user/register/");
        assert_eq!(sent[1].url, "http://test.local/user/login/");
    }

    #[tokio::test]
    async fn test_register_login_failure_asks_for_login() {
        let transport = MockTransport::new();
        transport.respond(201, json!({}));
        transport.respond(500, json!({}));
        let client = anonymous_client(&transport);
        let auth = AuthService::new(client.clone());

        let outcome = auth.register(&signup("longenough")).await.unwrap();
        assert_eq!(outcome, RegisterOutcome::LoginRequired(ACCOUNT_CREATED.to_string()));
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_register_error_messages() {
        let transport = MockTransport::new();
        transport.respond(400, json!({"email": ["user with this email already exists."]}));
        transport.respond(400, json!({"message": "Weak password"}));
        transport.respond(502, json!(null));
        let auth = AuthService::new(anonymous_client(&transport));

        let first = auth.register(&signup("longenough")).await.unwrap_err();
        let second = auth.register(&signup("longenough")).await.unwrap_err();
        let third = auth.register(&signup("longenough")).await.unwrap_err();
        assert_eq!(first.to_string(), "This email is already registered.");
        assert_eq!(second.to_string(), "Weak password");
        assert_eq!(third.to_string(), "Registration failed. Please try again.");
    }

    #[tokio::test]
    async fn test_google_without_credential() {
        let transport = MockTransport::new();
        let auth = AuthService::new(anonymous_client(&transport));
        let err = auth
            .login_with_google(None, Persistence::Persistent, GoogleFlow::Login)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Google login failed. No token received.");
        let err = auth
            .login_with_google(Some(""), Persistence::SessionScoped, GoogleFlow::SignUp)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Google sign up failed. No token received.");
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_google_failure_message() {
        let transport = MockTransport::new();
        transport.respond(400, json!({"detail": "bad token"}));
        let auth = AuthService::new(anonymous_client(&transport));
        let err = auth
            .login_with_google(Some("cred"), Persistence::Persistent, GoogleFlow::Login)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Google login failed. Please try again.");
        assert_eq!(transport.requests()[0].body, Some(RequestBody::Json(json!({"token": "cred"}))));
    }

    #[tokio::test]
    async fn test_google_sign_up_failure_message() {
        let transport = MockTransport::new();
        transport.fail("connection refused");
        let auth = AuthService::new(anonymous_client(&transport));
        let err = auth
            .login_with_google(Some("cred"), Persistence::SessionScoped, GoogleFlow::SignUp)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Google sign up failed. Please try again.");
        assert!(!auth.client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_password_reset_messages() {
        let transport = MockTransport::new();
        transport.respond(200, json!({}));
        transport.respond(400, json!({}));
        transport.respond(400, json!({"detail": "OTP expired"}));
        let auth = AuthService::new(anonymous_client(&transport));

        assert_eq!(auth.request_password_reset("a@b.co").await.unwrap(), OTP_SENT);
        assert_eq!(
            auth.request_password_reset("a@b.co").await.unwrap_err().to_string(),
            "Failed to send OTP. Please try again."
        );
        assert_eq!(
            auth.confirm_password_reset("a@b.co", "123456", "longenough", "longenough")
                .await
                .unwrap_err()
                .to_string(),
            "OTP expired"
        );
        assert_eq!(
            auth.request_password_reset(" ").await.unwrap_err().to_string(),
            "Please enter your email address"
        );
        assert_eq!(transport.request_count(), 3);
    }

    #[tokio::test]
    async fn test_refresh_without_token_sends_nothing() {
        let transport = MockTransport::new();
        let auth = AuthService::new(anonymous_client(&transport));
        assert!(auth.refresh_user().await.is_none());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_updates_cache() {
        let transport = MockTransport::new();
        transport.respond(200, login_body(Some("t")));
        transport.respond(
            200,
            json!({
                "id": "0b6f5a2e-7f5e-4c59-8a43-2d7c0f0e9b11",
                "email": "ada@example.com",
                "first_name": "Augusta",
                "last_name": "King"
            }),
        );
        let client = anonymous_client(&transport);
        let auth = AuthService::new(client.clone());
        auth.login("a@b.co", "pw", Persistence::SessionScoped).await.unwrap();

        let refreshed = auth.refresh_user().await.unwrap();
        assert_eq!(refreshed.error, None);
        assert_eq!(refreshed.user.unwrap().name, "Augusta King");
        assert_eq!(client.session().cached_user().unwrap().first_name, "Augusta");
        assert_eq!(transport.requests()[1].url, "http://test.local/user/me/");
    }

    #[tokio::test]
    async fn test_refresh_failure_falls_back_to_cache() {
        let transport = MockTransport::new();
        transport.respond(200, login_body(Some("t")));
        transport.respond(401, json!({"detail": "Token expired"}));
        let client = anonymous_client(&transport);
        let auth = AuthService::new(client.clone());
        auth.login("a@b.co", "pw", Persistence::Persistent).await.unwrap();

        let refreshed = auth.refresh_user().await.unwrap();
        assert_eq!(refreshed.error.as_deref(), Some("Request failed with status code 401"));
        assert_eq!(refreshed.user.unwrap().name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let transport = MockTransport::new();
        transport.respond(200, login_body(Some("t")));
        let client = anonymous_client(&transport);
        let auth = AuthService::new(client.clone());
        auth.login("a@b.co", "pw", Persistence::Persistent).await.unwrap();
        assert!(client.session().is_authenticated());

        auth.logout();
        assert!(client.session().access_token().is_none());
        assert!(client.session().cached_user().is_none());
    }
}
