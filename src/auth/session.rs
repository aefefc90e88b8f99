//! # Session Management
//!
//! The single owner of "who is logged in". Holds the session token and the
//! identity derived from it, writes both through to durable storage, and
//! performs login, company registration and logout.
//!
//! ## Invariants
//! - Identity is present iff a token is present and decodes
//! - A stored token that fails to decode is erased on restore
//! - A failed login or registration leaves the session untouched
//! - Concurrent logins are not de-duplicated; the last to resolve wins

use std::sync::{PoisonError, RwLock};

use serde::Serialize;

use super::credentials::{CompanyRegistration, LoginCredentials, LoginPayload, RegisterCompanyPayload};
use super::errors::{AuthError, AuthResult};
use super::guard::{self, Decision, Navigation, Route};
use super::identity::Identity;
use super::jwt;
use super::store::SessionStore;
use crate::client::AuthBackend;
use crate::validation::{validate_login, validate_registration};

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";

/// Session manager configuration
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Designated administrator account; logs in without a company ID
    pub admin_email: Option<String>,
}

impl SessionConfig {
    pub fn with_admin_email(admin_email: impl Into<String>) -> Self {
        Self {
            admin_email: Some(admin_email.into()),
        }
    }
}

/// Outcome of a successful company registration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub identity: Identity,
    /// ID of the newly created company
    pub company_id: Option<String>,
}

impl Registration {
    /// A freshly registered company administrator always lands on the dashboard
    pub fn landing_route(&self) -> Route {
        Route::Dashboard
    }
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    identity: Option<Identity>,
}

/// Session manager handles the token lifecycle
pub struct SessionManager<B: AuthBackend, S: SessionStore> {
    config: SessionConfig,
    backend: B,
    store: S,
    state: RwLock<SessionState>,
}

impl<B: AuthBackend, S: SessionStore> SessionManager<B, S> {
    /// Start a session manager, resuming any session left in `store`.
    ///
    /// The stored token is decoded before this returns, so the first guard
    /// evaluation already sees the right identity. Storage whose contents
    /// cannot be parsed is wiped and the session starts logged out.
    pub fn restore(config: SessionConfig, backend: B, store: S) -> AuthResult<Self> {
        let stored = match store.load_token() {
            Err(AuthError::CorruptSession(reason)) => {
                tracing::warn!(
                    event = "session.decode_failed",
                    reason = %reason,
                    "discarding unreadable session storage"
                );
                store.reset()?;
                None
            }
            other => other?,
        };

        let (token, identity) = match stored {
            None => (None, None),
            Some(token) => match jwt::decode(&token) {
                Ok(identity) => (Some(token), Some(identity)),
                Err(failure) => {
                    tracing::warn!(
                        event = "session.decode_failed",
                        reason = %failure,
                        "discarding stored session token"
                    );
                    store.clear_token()?;
                    (None, None)
                }
            },
        };

        if let Some(company_id) = identity.as_ref().and_then(|i| i.company_id.as_deref()) {
            store.save_company_id(company_id)?;
        }

        tracing::info!(
            event = "session.restore",
            authenticated = identity.is_some(),
            role = identity.as_ref().map(|i| i.role.as_str()).unwrap_or("none")
        );

        Ok(Self {
            config,
            backend,
            store,
            state: RwLock::new(SessionState { token, identity }),
        })
    }

    /// Tear the session manager down, handing back its store.
    ///
    /// Persisted state is left as is; use [`logout`](Self::logout) to end the
    /// session itself.
    pub fn close(self) -> S {
        tracing::debug!(event = "session.close");
        self.store
    }

    pub fn admin_email(&self) -> Option<&str> {
        self.config.admin_email.as_deref()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .identity
            .clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .identity
            .is_some()
    }

    /// Last known company ID, used to prefill the login form
    pub fn cached_company_id(&self) -> AuthResult<Option<String>> {
        self.store.load_company_id()
    }

    /// Run the guard against the current identity
    pub fn authorize(&self, require_admin: bool) -> Decision {
        guard::authorize(self.identity().as_ref(), require_admin)
    }

    /// Resolve a navigation against the current identity
    pub fn navigate(&self, route: Route) -> Navigation {
        guard::navigate(self.identity().as_ref(), route)
    }

    /// Log in and replace the current session.
    ///
    /// Validation failures return before any request is sent. On request
    /// failure the existing session is left as it was.
    pub async fn login(&self, credentials: &LoginCredentials) -> AuthResult<Identity> {
        validate_login(credentials, self.admin_email())?;

        let payload = LoginPayload::from_credentials(credentials, self.admin_email());
        let response = self.backend.login(&payload).await.map_err(|e| {
            tracing::warn!(event = "session.login_failed", error = %e);
            AuthError::from_api(&e, LOGIN_FAILED)
        })?;

        let identity = self.establish(response.token)?;
        tracing::info!(
            event = "session.login",
            role = identity.role.as_str(),
            company_id = identity.company_id.as_deref().unwrap_or("")
        );
        Ok(identity)
    }

    /// Register a new company and log in as its administrator
    pub async fn register_company(&self, details: &CompanyRegistration) -> AuthResult<Registration> {
        validate_registration(details)?;

        let payload = RegisterCompanyPayload::from(details);
        let response = self.backend.register_company(&payload).await.map_err(|e| {
            tracing::warn!(event = "session.register_failed", error = %e);
            AuthError::from_api(&e, REGISTRATION_FAILED)
        })?;

        let identity = self.establish(response.token)?;

        let company_id = response
            .company_id
            .filter(|id| !id.is_empty())
            .or_else(|| identity.company_id.clone());
        if let Some(id) = company_id.as_deref() {
            self.store.save_company_id(id)?;
        }

        tracing::info!(
            event = "session.register",
            company_id = company_id.as_deref().unwrap_or("")
        );
        Ok(Registration {
            identity,
            company_id,
        })
    }

    /// End the session in memory and in storage. Safe to call when logged out.
    pub fn logout(&self) -> AuthResult<()> {
        let was_authenticated = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let was = state.token.is_some();
            *state = SessionState::default();
            was
        };

        self.store.clear_token()?;
        self.store.clear_company_id()?;

        if was_authenticated {
            tracing::info!(event = "session.logout");
        }
        Ok(())
    }

    /// Decode, persist, then swap in a server-issued token
    fn establish(&self, token: String) -> AuthResult<Identity> {
        let identity = jwt::decode(&token).map_err(|failure| {
            tracing::warn!(
                event = "session.decode_failed",
                reason = %failure,
                "server issued an unreadable token"
            );
            AuthError::InvalidSessionToken(failure)
        })?;

        self.store.save_token(&token)?;
        if let Some(company_id) = identity.company_id.as_deref() {
            self.store.save_company_id(company_id)?;
        }

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.token = Some(token);
        state.identity = Some(identity.clone());

        Ok(identity)
    }
}
