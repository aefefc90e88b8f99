//! # Lead Filtering
//!
//! Client-side search and status filtering over a fetched lead list.

use super::model::{Lead, LeadStatus};

/// Which list the filter is applied to; the two views search different fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterScope {
    /// A company's own leads: name, email, both phones
    #[default]
    Tenant,
    /// All companies' leads: name, email, primary phone, company name
    Admin,
}

/// Search text plus an optional status; `None` status means "all"
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    pub search: String,
    pub status: Option<LeadStatus>,
    pub scope: FilterScope,
}

fn contains_ci(field: &str, needle_lower: &str) -> bool {
    !field.is_empty() && field.to_lowercase().contains(needle_lower)
}

fn contains_raw(field: &str, needle: &str) -> bool {
    !field.is_empty() && field.contains(needle)
}

impl LeadFilter {
    pub fn tenant(search: impl Into<String>, status: Option<LeadStatus>) -> Self {
        Self {
            search: search.into(),
            status,
            scope: FilterScope::Tenant,
        }
    }

    pub fn admin(search: impl Into<String>, status: Option<LeadStatus>) -> Self {
        Self {
            search: search.into(),
            status,
            scope: FilterScope::Admin,
        }
    }

    /// Check if a lead matches both the search text and the status.
    ///
    /// Empty fields never match, so an empty search keeps only leads with at
    /// least one searchable field set.
    pub fn matches(&self, lead: &Lead) -> bool {
        let q = self.search.to_lowercase();

        let matches_search = match self.scope {
            FilterScope::Tenant => {
                contains_ci(&lead.name, &q)
                    || contains_raw(&lead.phone1, &self.search)
                    || contains_raw(&lead.phone2, &self.search)
                    || contains_ci(&lead.email, &q)
            }
            FilterScope::Admin => {
                contains_ci(&lead.name, &q)
                    || contains_ci(&lead.email, &q)
                    || contains_raw(&lead.phone1, &self.search)
                    || lead
                        .company
                        .as_ref()
                        .and_then(|c| c.name())
                        .is_some_and(|name| contains_ci(name, &q))
            }
        };

        let matches_status = self.status.map_or(true, |status| lead.status == status);

        matches_search && matches_status
    }

    /// Keep the matching leads, preserving order
    pub fn apply<'a>(&self, leads: &'a [Lead]) -> Vec<&'a Lead> {
        leads.iter().filter(|lead| self.matches(lead)).collect()
    }
}
