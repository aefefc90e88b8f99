//! Backend seams.
//!
//! The session manager and lead service talk to the backend only through
//! these traits; [`ApiClient`](super::ApiClient) is the HTTP implementation.

use async_trait::async_trait;

use super::errors::ApiResult;
use crate::auth::{LoginPayload, RegisterCompanyPayload, RegisterCompanyResponse, TokenResponse};
use crate::leads::{Lead, LeadUpdate, NewLead};

/// Unauthenticated endpoints that issue session tokens
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, payload: &LoginPayload) -> ApiResult<TokenResponse>;

    /// `POST /auth/register-company`
    async fn register_company(
        &self,
        payload: &RegisterCompanyPayload,
    ) -> ApiResult<RegisterCompanyResponse>;
}

/// Lead endpoints; every call carries the session token as a bearer credential
#[async_trait]
pub trait LeadsBackend: Send + Sync {
    /// `GET /leads`, scoped to the caller's company by the server
    async fn list_leads(&self, token: &str) -> ApiResult<Vec<Lead>>;

    /// `POST /leads`
    async fn create_lead(&self, token: &str, lead: &NewLead) -> ApiResult<Lead>;

    /// `PUT /leads/:id`
    async fn update_lead(&self, token: &str, id: &str, update: &LeadUpdate) -> ApiResult<Lead>;

    /// `DELETE /leads/:id`
    async fn delete_lead(&self, token: &str, id: &str) -> ApiResult<()>;

    /// `GET /admin/leads`, across all companies
    async fn list_all_leads(&self, token: &str) -> ApiResult<Vec<Lead>>;

    /// `DELETE /admin/leads/:id`
    async fn delete_any_lead(&self, token: &str, id: &str) -> ApiResult<()>;
}

#[async_trait]
impl<B: AuthBackend + ?Sized> AuthBackend for std::sync::Arc<B> {
    async fn login(&self, payload: &LoginPayload) -> ApiResult<TokenResponse> {
        (**self).login(payload).await
    }

    async fn register_company(
        &self,
        payload: &RegisterCompanyPayload,
    ) -> ApiResult<RegisterCompanyResponse> {
        (**self).register_company(payload).await
    }
}

#[async_trait]
impl<B: LeadsBackend + ?Sized> LeadsBackend for std::sync::Arc<B> {
    async fn list_leads(&self, token: &str) -> ApiResult<Vec<Lead>> {
        (**self).list_leads(token).await
    }

    async fn create_lead(&self, token: &str, lead: &NewLead) -> ApiResult<Lead> {
        (**self).create_lead(token, lead).await
    }

    async fn update_lead(&self, token: &str, id: &str, update: &LeadUpdate) -> ApiResult<Lead> {
        (**self).update_lead(token, id, update).await
    }

    async fn delete_lead(&self, token: &str, id: &str) -> ApiResult<()> {
        (**self).delete_lead(token, id).await
    }

    async fn list_all_leads(&self, token: &str) -> ApiResult<Vec<Lead>> {
        (**self).list_all_leads(token).await
    }

    async fn delete_any_lead(&self, token: &str, id: &str) -> ApiResult<()> {
        (**self).delete_any_lead(token, id).await
    }
}
