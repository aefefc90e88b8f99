//! # HTTP Client
//!
//! `reqwest`-backed implementation of the backend seams. Attaches the bearer
//! token and turns non-success responses into [`ApiError::Status`] carrying
//! the server's `message`, if it sent one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::backend::{AuthBackend, LeadsBackend};
use super::errors::{ApiError, ApiResult};
use crate::auth::{LoginPayload, RegisterCompanyPayload, RegisterCompanyResponse, TokenResponse};
use crate::leads::{Lead, LeadUpdate, NewLead};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the lead service REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:5000/api`)
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { base, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Append path segments to the base URL; segments are percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&str>,
    ) -> ApiResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        tracing::debug!(event = "api.request", method = %method, path = url.path());

        let builder = self.http.request(method, url);
        Ok(match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn check(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);

        tracing::debug!(event = "api.response", status = status.as_u16(), "request rejected");

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = Self::check(builder.send().await?).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidBody(e.to_string()))
    }

    async fn send_empty(&self, builder: RequestBuilder) -> ApiResult<()> {
        Self::check(builder.send().await?).await?;
        Ok(())
    }

    async fn post<B, T>(&self, segments: &[&str], token: Option<&str>, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, segments, token)?.json(body);
        self.send_json(builder).await
    }
}

#[async_trait]
impl AuthBackend for ApiClient {
    async fn login(&self, payload: &LoginPayload) -> ApiResult<TokenResponse> {
        self.post(&["auth", "login"], None, payload).await
    }

    async fn register_company(
        &self,
        payload: &RegisterCompanyPayload,
    ) -> ApiResult<RegisterCompanyResponse> {
        self.post(&["auth", "register-company"], None, payload).await
    }
}

#[async_trait]
impl LeadsBackend for ApiClient {
    async fn list_leads(&self, token: &str) -> ApiResult<Vec<Lead>> {
        let builder = self.request(Method::GET, &["leads"], Some(token))?;
        let leads: Option<Vec<Lead>> = self.send_json(builder).await?;
        Ok(leads.unwrap_or_default())
    }

    async fn create_lead(&self, token: &str, lead: &NewLead) -> ApiResult<Lead> {
        self.post(&["leads"], Some(token), lead).await
    }

    async fn update_lead(&self, token: &str, id: &str, update: &LeadUpdate) -> ApiResult<Lead> {
        let builder = self
            .request(Method::PUT, &["leads", id], Some(token))?
            .json(update);
        self.send_json(builder).await
    }

    async fn delete_lead(&self, token: &str, id: &str) -> ApiResult<()> {
        let builder = self.request(Method::DELETE, &["leads", id], Some(token))?;
        self.send_empty(builder).await
    }

    async fn list_all_leads(&self, token: &str) -> ApiResult<Vec<Lead>> {
        let builder = self.request(Method::GET, &["admin", "leads"], Some(token))?;
        let leads: Option<Vec<Lead>> = self.send_json(builder).await?;
        Ok(leads.unwrap_or_default())
    }

    async fn delete_any_lead(&self, token: &str, id: &str) -> ApiResult<()> {
        let builder = self.request(Method::DELETE, &["admin", "leads", id], Some(token))?;
        self.send_empty(builder).await
    }
}
