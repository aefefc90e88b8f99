//! # Leads Module
//!
//! Lead records, the list filter and the session-bound lead service.

pub mod filter;
pub mod model;
pub mod service;

pub use filter::{FilterScope, LeadFilter};
pub use model::{CompanyRef, Lead, LeadStatus, LeadUpdate, NewLead};
pub use service::{LeadError, LeadResult, LeadService};
