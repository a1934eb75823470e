//! Auth sub-client — admin and salon login, logout, password recovery.

use crate::auth::{
    AdminLoginResponse, ForgotPasswordRequest, LoginRequest, PasswordBody, Session, SessionStore,
};
use crate::client::SalonClient;
use crate::domain::salon::wire::SingleSalonResponse;
use crate::domain::salon::Salon;
use crate::error::{AuthError, HttpError, SdkError};
use crate::http::RetryPolicy;

/// Sub-client for authentication operations.
pub struct Auth<'a> {
    pub(crate) client: &'a SalonClient,
}

impl<'a> Auth<'a> {
    /// Log in as the platform admin.
    ///
    /// The returned token is kept internally and sent as a bearer token on
    /// every subsequent request.
    pub async fn admin_login(&self, username: &str, password: &str) -> Result<Session, SdkError> {
        let url = format!("{}/auth/login", self.client.http.base_url());
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp: AdminLoginResponse = self
            .client
            .http
            .post(&url, &request, RetryPolicy::None)
            .await
            .map_err(login_error)?;

        let session = Session::Admin { token: resp.token };
        self.install(session.clone()).await;
        tracing::info!("admin logged in");
        Ok(session)
    }

    /// Log in as a salon owner. Salon sessions carry no token.
    pub async fn salon_login(&self, username: &str, password: &str) -> Result<Session, SdkError> {
        let url = format!("{}/salons/login", self.client.http.base_url());
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp: SingleSalonResponse = self
            .client
            .http
            .post(&url, &request, RetryPolicy::None)
            .await
            .map_err(login_error)?;

        let salon = Salon::from(resp.salon);
        tracing::info!(salon_id = %salon.id, "salon logged in");
        let session = Session::Salon { salon };
        self.install(session.clone()).await;
        Ok(session)
    }

    /// Forget the current session and its token. Purely local; the backend
    /// keeps no server-side session.
    pub async fn logout(&self) {
        self.client.http.clear_auth_token().await;
        *self.client.session.write().await = None;
    }

    pub async fn session(&self) -> Option<Session> {
        self.client.session.read().await.clone()
    }

    pub async fn is_admin(&self) -> bool {
        self.client
            .session
            .read()
            .await
            .as_ref()
            .is_some_and(Session::is_admin)
    }

    /// Gate for admin console writes.
    pub(crate) async fn require_admin(&self) -> Result<(), AuthError> {
        match self.client.session.read().await.as_ref() {
            Some(s) if s.is_admin() => Ok(()),
            Some(_) => Err(AuthError::AdminRequired),
            None => Err(AuthError::NotAuthenticated),
        }
    }

    /// Load a session from `store` and make it current. Returns what was
    /// loaded; an empty store leaves the client logged out.
    pub async fn restore(&self, store: &dyn SessionStore) -> Result<Option<Session>, SdkError> {
        let loaded = store.load()?;
        match &loaded {
            Some(session) => self.install(session.clone()).await,
            None => self.logout().await,
        }
        Ok(loaded)
    }

    /// Save the current session to `store`, or clear the store when logged out.
    pub async fn persist(&self, store: &dyn SessionStore) -> Result<(), SdkError> {
        match self.session().await {
            Some(session) => store.save(&session),
            None => store.clear(),
        }
    }

    /// Ask the backend to email an admin password-reset link.
    pub async fn forgot_password(&self, email: &str) -> Result<(), SdkError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(SdkError::Validation("Email is required".to_string()));
        }
        let url = format!("{}/auth/forgot-password", self.client.http.base_url());
        let _: serde_json::Value = self
            .client
            .http
            .post(
                &url,
                &ForgotPasswordRequest {
                    email: email.to_string(),
                },
                RetryPolicy::None,
            )
            .await?;
        Ok(())
    }

    /// Complete a reset with the token from the emailed link.
    pub async fn reset_password(&self, reset_token: &str, password: &str) -> Result<(), SdkError> {
        if password.is_empty() {
            return Err(SdkError::Validation("Password is required".to_string()));
        }
        let url = format!(
            "{}/auth/reset-password/{}",
            self.client.http.base_url(),
            urlencoding::encode(reset_token)
        );
        let _: serde_json::Value = self
            .client
            .http
            .put(
                &url,
                &PasswordBody {
                    password: password.to_string(),
                },
                RetryPolicy::None,
            )
            .await?;
        Ok(())
    }

    async fn install(&self, session: Session) {
        self.client
            .http
            .set_auth_token(session.token().map(str::to_string))
            .await;
        *self.client.session.write().await = Some(session);
    }
}

fn login_error(e: HttpError) -> SdkError {
    match e {
        HttpError::Unauthorized => AuthError::LoginFailed("Invalid credentials".to_string()).into(),
        HttpError::BadRequest(message) | HttpError::Api { message } => {
            AuthError::LoginFailed(message).into()
        }
        other => other.into(),
    }
}
