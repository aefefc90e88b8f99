//! CLI command implementations
//!
//! Each command runs against a session restored from the session file, so
//! state carries across invocations. Commands that map to a protected route
//! pass through the guard first.

use serde::Serialize;
use serde_json::{json, Value};

use crate::auth::{
    landing_route, nav_links, CompanyRegistration, FileSessionStore, LoginCredentials, Navigation,
    Route, SessionConfig, SessionManager, SessionStore,
};
use crate::client::{ApiClient, AuthBackend, LeadsBackend};
use crate::config::ClientConfig;
use crate::leads::{Lead, LeadFilter, LeadService, NewLead};

use super::args::{AdminAction, Command, FilterArgs, LeadsAction};
use super::errors::{CliError, CliResult};
use super::io::confirm;

/// A restored session plus the backend it talks to
pub struct Context<B, S>
where
    B: AuthBackend + LeadsBackend + Clone,
    S: SessionStore,
{
    backend: B,
    session: SessionManager<B, S>,
}

impl Context<ApiClient, FileSessionStore> {
    /// Build the HTTP client and restore the persisted session
    pub fn open(config: &ClientConfig) -> CliResult<Self> {
        let api = ApiClient::new(&config.api_base_url, config.request_timeout())?;
        let store = FileSessionStore::new(&config.session_file);
        let session_config = SessionConfig {
            admin_email: config.admin_email.clone(),
        };
        Self::new(api, session_config, store)
    }
}

impl<B, S> Context<B, S>
where
    B: AuthBackend + LeadsBackend + Clone,
    S: SessionStore,
{
    pub fn new(backend: B, config: SessionConfig, store: S) -> CliResult<Self> {
        let session = SessionManager::restore(config, backend.clone(), store)?;
        Ok(Self { backend, session })
    }

    pub fn session(&self) -> &SessionManager<B, S> {
        &self.session
    }

    fn leads(&self) -> LeadService<'_, B, B, S> {
        LeadService::new(self.backend.clone(), &self.session)
    }

    /// Run the guard for `route`; a redirect aborts the command
    fn require(&self, route: Route) -> CliResult<()> {
        match self.session.navigate(route) {
            Navigation::Render(_) => Ok(()),
            Navigation::Redirect(target) => {
                tracing::debug!(event = "guard.redirect", from = %route, to = %target);
                Err(CliError::redirected(target))
            }
        }
    }
}

/// Run a command, returning the `data` payload of the response
pub async fn run_command<B, S>(ctx: &Context<B, S>, command: Command) -> CliResult<Value>
where
    B: AuthBackend + LeadsBackend + Clone,
    S: SessionStore,
{
    match command {
        Command::Login {
            company_id,
            email,
            password,
        } => login(ctx, company_id, email, password).await,
        Command::Register {
            company_name,
            email,
            password,
        } => register(ctx, company_name, email, password).await,
        Command::Logout => {
            ctx.session.logout()?;
            Ok(json!({ "loggedOut": true }))
        }
        Command::Whoami => whoami(ctx),
        Command::Open { path } => {
            let route = Route::from_path(&path).ok_or_else(|| CliError::unknown_route(&path))?;
            Ok(serde_json::to_value(ctx.session.navigate(route))?)
        }
        Command::Leads { action } => leads(ctx, action).await,
        Command::Admin { action } => admin(ctx, action).await,
    }
}

async fn login<B, S>(
    ctx: &Context<B, S>,
    company_id: Option<String>,
    email: String,
    password: String,
) -> CliResult<Value>
where
    B: AuthBackend + LeadsBackend + Clone,
    S: SessionStore,
{
    let company_id = match company_id {
        Some(id) => Some(id),
        None => ctx.session.cached_company_id()?,
    };

    let identity = ctx
        .session
        .login(&LoginCredentials {
            company_id,
            email,
            password,
        })
        .await?;

    Ok(json!({
        "identity": identity,
        "landing": landing_route(&identity).path(),
    }))
}

async fn register<B, S>(
    ctx: &Context<B, S>,
    company_name: String,
    email: String,
    password: String,
) -> CliResult<Value>
where
    B: AuthBackend + LeadsBackend + Clone,
    S: SessionStore,
{
    let registration = ctx
        .session
        .register_company(&CompanyRegistration {
            company_name,
            admin_email: email,
            admin_password: password,
        })
        .await?;

    Ok(json!({
        "identity": registration.identity,
        "companyId": registration.company_id,
        "landing": registration.landing_route().path(),
    }))
}

fn whoami<B, S>(ctx: &Context<B, S>) -> CliResult<Value>
where
    B: AuthBackend + LeadsBackend + Clone,
    S: SessionStore,
{
    let identity = ctx.session.identity();
    let links: Vec<&str> = nav_links(identity.as_ref())
        .iter()
        .map(|route| route.path())
        .collect();

    Ok(json!({
        "authenticated": identity.is_some(),
        "identity": identity,
        "links": links,
        "cachedCompanyId": ctx.session.cached_company_id()?,
    }))
}

fn lead_list(leads: &[Lead], filter: &LeadFilter) -> CliResult<Value> {
    let shown = filter.apply(leads);
    Ok(json!({
        "total": leads.len(),
        "count": shown.len(),
        "leads": serde_json::to_value(shown)?,
    }))
}

fn confirm_delete(id: &str, yes: bool) -> CliResult<()> {
    if yes || confirm(&format!("Delete lead {}?", id))? {
        Ok(())
    } else {
        Err(CliError::cancelled())
    }
}

fn to_value<T: Serialize>(value: T) -> CliResult<Value> {
    Ok(serde_json::to_value(value)?)
}

async fn leads<B, S>(ctx: &Context<B, S>, action: LeadsAction) -> CliResult<Value>
where
    B: AuthBackend + LeadsBackend + Clone,
    S: SessionStore,
{
    ctx.require(Route::Dashboard)?;
    let service = ctx.leads();

    match action {
        LeadsAction::List {
            filter: FilterArgs { search, status },
        } => {
            let leads = service.list().await?;
            lead_list(&leads, &LeadFilter::tenant(search, status))
        }
        LeadsAction::Add {
            name,
            phone1,
            phone2,
            email,
            message,
            source,
            status,
        } => {
            let created = service
                .create(NewLead {
                    name,
                    phone1,
                    phone2,
                    email,
                    message,
                    source,
                    status,
                })
                .await?;
            to_value(created)
        }
        LeadsAction::SetStatus { id, status } => to_value(service.update_status(&id, status).await?),
        LeadsAction::Delete { id, yes } => {
            confirm_delete(&id, yes)?;
            service.delete(&id).await?;
            Ok(json!({ "deleted": id }))
        }
    }
}

async fn admin<B, S>(ctx: &Context<B, S>, action: AdminAction) -> CliResult<Value>
where
    B: AuthBackend + LeadsBackend + Clone,
    S: SessionStore,
{
    ctx.require(Route::Admin)?;
    let service = ctx.leads();

    match action {
        AdminAction::List {
            filter: FilterArgs { search, status },
        } => {
            let leads = service.admin_list().await?;
            lead_list(&leads, &LeadFilter::admin(search, status))
        }
        AdminAction::Delete { id, yes } => {
            confirm_delete(&id, yes)?;
            service.admin_delete(&id).await?;
            Ok(json!({ "deleted": id }))
        }
    }
}
