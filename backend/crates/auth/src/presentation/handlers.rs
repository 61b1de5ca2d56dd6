//! HTTP Handlers
//!
//! Adapter between JSON requests and the use cases. Field presence is
//! checked here; everything past that is the use case's call.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tokio_util::sync::CancellationToken;

use crate::application::config::AuthConfig;
use crate::application::{
    IsAdminUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::repository::{AppProvider, UserProvider, UserSaver};
use crate::domain::value_object::{AppId, UserId};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    IsAdminRequest, IsAdminResponse, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse,
};

/// A store that provides every capability the handlers need
pub trait SsoStore: UserSaver + UserProvider + AppProvider + Send + Sync + 'static {}

impl<T> SsoStore for T where T: UserSaver + UserProvider + AppProvider + Send + Sync + 'static {}

/// Default per-request deadline
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared state for SSO handlers
pub struct SsoAppState<R: SsoStore> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    /// Deadline for one request, after which its token is cancelled
    pub request_timeout: Duration,
    /// Parent of every request token; cancelled on server shutdown
    pub shutdown: CancellationToken,
}

impl<R: SsoStore> Clone for SsoAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            request_timeout: self.request_timeout,
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<R: SsoStore> SsoAppState<R> {
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Run one request under a child token and the request deadline
    async fn run<T, F, Fut>(&self, op: F) -> AuthResult<T>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = AuthResult<T>>,
    {
        let cancel = self.shutdown.child_token();

        match tokio::time::timeout(self.request_timeout, op(cancel.clone())).await {
            Ok(result) => result,
            Err(_) => {
                cancel.cancel();
                tracing::warn!(timeout = ?self.request_timeout, "Request deadline exceeded");
                Err(AuthError::Cancelled)
            }
        }
    }
}

fn require(present: bool, field: &str) -> AuthResult<()> {
    if present {
        Ok(())
    } else {
        Err(AuthError::InvalidRequest(format!("{} is required", field)))
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R: SsoStore>(
    State(state): State<SsoAppState<R>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<Json<RegisterResponse>> {
    let Json(req) = body?;
    require(!req.email.is_empty(), "email")?;
    require(!req.password.is_empty(), "password")?;

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        email: req.email,
        password: req.password,
    };

    let user_id = state
        .run(|cancel| async move { use_case.execute(&cancel, input).await })
        .await?;

    Ok(Json(RegisterResponse {
        user_id: user_id.get(),
    }))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R: SsoStore>(
    State(state): State<SsoAppState<R>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<LoginResponse>> {
    let Json(req) = body?;
    require(!req.email.is_empty(), "email")?;
    require(!req.password.is_empty(), "password")?;
    require(req.app_id != 0, "app_id")?;

    let use_case = LoginUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = LoginInput {
        email: req.email,
        password: req.password,
        app_id: AppId::from_raw(i64::from(req.app_id)),
    };

    let token = state
        .run(|cancel| async move { use_case.execute(&cancel, input).await })
        .await?;

    Ok(Json(LoginResponse { token }))
}

// ============================================================================
// Is Admin
// ============================================================================

/// POST /is-admin
pub async fn is_admin<R: SsoStore>(
    State(state): State<SsoAppState<R>>,
    body: Result<Json<IsAdminRequest>, JsonRejection>,
) -> AuthResult<Json<IsAdminResponse>> {
    let Json(req) = body?;
    require(req.user_id != 0, "user_id")?;

    let use_case = IsAdminUseCase::new(state.repo.clone());
    let user_id = UserId::from_raw(req.user_id);

    let is_admin = state
        .run(|cancel| async move { use_case.execute(&cancel, user_id).await })
        .await?;

    Ok(Json(IsAdminResponse { is_admin }))
}
