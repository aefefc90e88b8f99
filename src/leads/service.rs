//! # Lead Service
//!
//! Lead operations on behalf of the current session. Every call reads the
//! session token at call time; nothing is cached here.

use thiserror::Error;

use super::model::{Lead, LeadStatus, LeadUpdate, NewLead};
use crate::auth::{Decision, SessionManager, SessionStore};
use crate::client::{ApiError, AuthBackend, LeadsBackend};
use crate::validation::{validate_lead, ValidationErrors};

const SAVE_FAILED: &str = "Failed to save lead";
const LOAD_FAILED: &str = "Failed to load leads";
const UPDATE_FAILED: &str = "Failed to update lead";
const DELETE_FAILED: &str = "Failed to delete lead";

/// Result type for lead operations
pub type LeadResult<T> = Result<T, LeadError>;

/// Lead operation errors
#[derive(Debug, Clone, Error)]
pub enum LeadError {
    /// Lead form rejected before submission
    #[error("{0}")]
    Validation(ValidationErrors),

    /// No active session
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Admin-only operation attempted by a company user
    #[error("Administrator access required")]
    AdminRequired,

    /// An update with nothing to change
    #[error("Nothing to update")]
    EmptyUpdate,

    /// Backend rejected the request or could not be reached
    #[error("{message}")]
    Request {
        message: String,
        status: Option<u16>,
    },
}

impl LeadError {
    fn from_api(err: &ApiError, fallback: &str) -> Self {
        LeadError::Request {
            message: err.message_or(fallback),
            status: err.status(),
        }
    }

    /// Stable code string used by the CLI error envelope
    pub fn code(&self) -> &'static str {
        match self {
            LeadError::Validation(_) => "LEADHUB_VALIDATION_ERROR",
            LeadError::AuthenticationRequired => "LEADHUB_AUTH_REQUIRED",
            LeadError::AdminRequired => "LEADHUB_ADMIN_REQUIRED",
            LeadError::EmptyUpdate => "LEADHUB_EMPTY_UPDATE",
            LeadError::Request { .. } => "LEADHUB_REQUEST_FAILED",
        }
    }
}

/// Lead operations bound to a session
pub struct LeadService<'a, L: LeadsBackend, A: AuthBackend, S: SessionStore> {
    backend: L,
    session: &'a SessionManager<A, S>,
}

impl<'a, L: LeadsBackend, A: AuthBackend, S: SessionStore> LeadService<'a, L, A, S> {
    pub fn new(backend: L, session: &'a SessionManager<A, S>) -> Self {
        Self { backend, session }
    }

    fn token(&self) -> LeadResult<String> {
        self.session.token().ok_or(LeadError::AuthenticationRequired)
    }

    fn admin_token(&self) -> LeadResult<String> {
        match self.session.authorize(true) {
            Decision::Allow => self.token(),
            Decision::RedirectToLogin => Err(LeadError::AuthenticationRequired),
            Decision::RedirectToDashboard => Err(LeadError::AdminRequired),
        }
    }

    /// The current company's leads
    pub async fn list(&self) -> LeadResult<Vec<Lead>> {
        let token = self.token()?;
        self.backend
            .list_leads(&token)
            .await
            .map_err(|e| LeadError::from_api(&e, LOAD_FAILED))
    }

    /// Sanitise, validate, then create a lead
    pub async fn create(&self, lead: NewLead) -> LeadResult<Lead> {
        let lead = lead.sanitized();
        validate_lead(&lead).map_err(LeadError::Validation)?;
        let token = self.token()?;

        let created = self.backend.create_lead(&token, &lead).await.map_err(|e| {
            tracing::warn!(event = "leads.create_failed", error = %e);
            LeadError::from_api(&e, SAVE_FAILED)
        })?;

        tracing::info!(event = "leads.create", id = %created.id);
        Ok(created)
    }

    /// Apply a partial update
    pub async fn update(&self, id: &str, update: &LeadUpdate) -> LeadResult<Lead> {
        if update.is_empty() {
            return Err(LeadError::EmptyUpdate);
        }
        let token = self.token()?;

        let updated = self
            .backend
            .update_lead(&token, id, update)
            .await
            .map_err(|e| LeadError::from_api(&e, UPDATE_FAILED))?;

        tracing::info!(event = "leads.update", id = %id);
        Ok(updated)
    }

    pub async fn update_status(&self, id: &str, status: LeadStatus) -> LeadResult<Lead> {
        self.update(id, &LeadUpdate::status(status)).await
    }

    pub async fn delete(&self, id: &str) -> LeadResult<()> {
        let token = self.token()?;
        self.backend
            .delete_lead(&token, id)
            .await
            .map_err(|e| LeadError::from_api(&e, DELETE_FAILED))?;

        tracing::info!(event = "leads.delete", id = %id);
        Ok(())
    }

    /// Every company's leads; administrators only
    pub async fn admin_list(&self) -> LeadResult<Vec<Lead>> {
        let token = self.admin_token()?;
        self.backend
            .list_all_leads(&token)
            .await
            .map_err(|e| LeadError::from_api(&e, LOAD_FAILED))
    }

    /// Delete any company's lead; administrators only
    pub async fn admin_delete(&self, id: &str) -> LeadResult<()> {
        let token = self.admin_token()?;
        self.backend
            .delete_any_lead(&token, id)
            .await
            .map_err(|e| LeadError::from_api(&e, DELETE_FAILED))?;

        tracing::info!(event = "leads.admin_delete", id = %id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{
        InMemorySessionStore, LoginPayload, RegisterCompanyPayload, RegisterCompanyResponse,
        SessionConfig, TokenResponse,
    };
    use crate::client::ApiResult;
    use async_trait::async_trait;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;
    use std::sync::Mutex;

    struct NoAuth;

    #[async_trait]
    impl AuthBackend for NoAuth {
        async fn login(&self, _: &LoginPayload) -> ApiResult<TokenResponse> {
            Err(ApiError::Transport("unused".to_string()))
        }

        async fn register_company(
            &self,
            _: &RegisterCompanyPayload,
        ) -> ApiResult<RegisterCompanyResponse> {
            Err(ApiError::Transport("unused".to_string()))
        }
    }

    /// Leads backend keeping leads in a vector and recording bearer tokens
    #[derive(Default)]
    struct MemoryLeads {
        leads: Mutex<Vec<Lead>>,
        tokens: Mutex<Vec<String>>,
        fail_with: Option<ApiError>,
    }

    impl MemoryLeads {
        fn record(&self, token: &str) -> ApiResult<()> {
            self.tokens.lock().unwrap().push(token.to_string());
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl LeadsBackend for MemoryLeads {
        async fn list_leads(&self, token: &str) -> ApiResult<Vec<Lead>> {
            self.record(token)?;
            Ok(self.leads.lock().unwrap().clone())
        }

        async fn create_lead(&self, token: &str, lead: &NewLead) -> ApiResult<Lead> {
            self.record(token)?;
            let mut leads = self.leads.lock().unwrap();
            let created = Lead {
                id: format!("l{}", leads.len() + 1),
                name: lead.name.clone(),
                phone1: lead.phone1.clone(),
                phone2: lead.phone2.clone(),
                email: lead.email.clone(),
                message: lead.message.clone(),
                source: lead.source.clone(),
                status: lead.status,
                company: None,
                created_at: None,
            };
            leads.push(created.clone());
            Ok(created)
        }

        async fn update_lead(&self, token: &str, id: &str, update: &LeadUpdate) -> ApiResult<Lead> {
            self.record(token)?;
            let mut leads = self.leads.lock().unwrap();
            let lead = leads
                .iter_mut()
                .find(|l| l.id == id)
                .ok_or(ApiError::Status {
                    status: 404,
                    message: Some("Lead not found".to_string()),
                })?;
            if let Some(status) = update.status {
                lead.status = status;
            }
            Ok(lead.clone())
        }

        async fn delete_lead(&self, token: &str, id: &str) -> ApiResult<()> {
            self.record(token)?;
            self.leads.lock().unwrap().retain(|l| l.id != id);
            Ok(())
        }

        async fn list_all_leads(&self, token: &str) -> ApiResult<Vec<Lead>> {
            self.list_leads(token).await
        }

        async fn delete_any_lead(&self, token: &str, id: &str) -> ApiResult<()> {
            self.delete_lead(token, id).await
        }
    }

    fn session_with(claims: Option<serde_json::Value>) -> SessionManager<NoAuth, InMemorySessionStore> {
        let store = match claims {
            Some(claims) => InMemorySessionStore::with_token(
                &encode(&Header::default(), &claims, &EncodingKey::from_secret(b"k")).unwrap(),
            ),
            None => InMemorySessionStore::new(),
        };
        SessionManager::restore(SessionConfig::default(), NoAuth, store).unwrap()
    }

    fn user_session() -> SessionManager<NoAuth, InMemorySessionStore> {
        session_with(Some(json!({"userId": "u1", "role": "user", "companyId": "c1"})))
    }

    fn valid_lead() -> NewLead {
        NewLead {
            name: "John Doe".to_string(),
            phone1: "98765 43210".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_sanitizes_and_sends_token() {
        let session = user_session();
        let service = LeadService::new(MemoryLeads::default(), &session);

        let created = service.create(valid_lead()).await.unwrap();

        assert_eq!(created.phone1, "9876543210");
        assert_eq!(created.status, LeadStatus::New);
        let tokens = service.backend.tokens.lock().unwrap().clone();
        assert_eq!(tokens, vec![session.token().unwrap()]);
    }

    #[tokio::test]
    async fn test_invalid_lead_never_sent() {
        let session = user_session();
        let service = LeadService::new(MemoryLeads::default(), &session);

        let err = service
            .create(NewLead {
                name: " ".to_string(),
                phone1: "123".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, LeadError::Validation(_)));
        assert!(service.backend.tokens.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_requires_session() {
        let session = session_with(None);
        let service = LeadService::new(MemoryLeads::default(), &session);

        assert!(matches!(
            service.list().await,
            Err(LeadError::AuthenticationRequired)
        ));
        assert!(matches!(
            service.admin_list().await,
            Err(LeadError::AuthenticationRequired)
        ));
    }

    #[tokio::test]
    async fn test_admin_operations_need_admin() {
        let session = user_session();
        let service = LeadService::new(MemoryLeads::default(), &session);

        assert!(matches!(
            service.admin_list().await,
            Err(LeadError::AdminRequired)
        ));
        assert!(matches!(
            service.admin_delete("l1").await,
            Err(LeadError::AdminRequired)
        ));

        let admin = session_with(Some(json!({"userId": "a1", "role": "admin"})));
        let service = LeadService::new(MemoryLeads::default(), &admin);
        assert!(service.admin_list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_status_update_and_delete() {
        let session = user_session();
        let service = LeadService::new(MemoryLeads::default(), &session);
        let created = service.create(valid_lead()).await.unwrap();

        let updated = service
            .update_status(&created.id, LeadStatus::Converted)
            .await
            .unwrap();
        assert_eq!(updated.status, LeadStatus::Converted);

        let err = service
            .update_status("missing", LeadStatus::Lost)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Lead not found");

        service.delete(&created.id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_update_rejected() {
        let session = user_session();
        let service = LeadService::new(MemoryLeads::default(), &session);
        assert!(matches!(
            service.update("l1", &LeadUpdate::default()).await,
            Err(LeadError::EmptyUpdate)
        ));
    }

    #[tokio::test]
    async fn test_request_failure_falls_back_to_generic_message() {
        let session = user_session();
        let backend = MemoryLeads {
            fail_with: Some(ApiError::Transport("timeout".to_string())),
            ..Default::default()
        };
        let service = LeadService::new(backend, &session);

        let err = service.create(valid_lead()).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to save lead");
    }
}
