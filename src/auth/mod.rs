//! # Auth Module
//!
//! Session token lifecycle, identity derivation and the route guard.

pub mod credentials;
pub mod errors;
pub mod guard;
pub mod identity;
pub mod jwt;
pub mod session;
pub mod store;

pub use credentials::{
    CompanyRegistration, LoginCredentials, LoginPayload, RegisterCompanyPayload,
    RegisterCompanyResponse, TokenResponse,
};
pub use errors::{AuthError, AuthResult, DecodeFailure};
pub use guard::{authorize, landing_route, nav_links, navigate, Decision, Navigation, Route};
pub use identity::{Identity, Role, TokenClaims};
pub use jwt::decode;
pub use session::{Registration, SessionConfig, SessionManager};
pub use store::{FileSessionStore, InMemorySessionStore, SessionStore};
