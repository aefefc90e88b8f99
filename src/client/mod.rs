//! Backend client: the HTTP implementation and the traits the rest of the
//! crate depends on instead of it.

mod backend;
mod errors;
mod http;

pub use backend::{AuthBackend, LeadsBackend};
pub use errors::{ApiError, ApiResult};
pub use http::ApiClient;
