//! Lead records as exchanged with the backend.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::validation::sanitize_phone;

/// Pipeline stage of a lead
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Converted,
    Lost,
    /// A status this client does not know; never sent back
    #[serde(other)]
    Unknown,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 4] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Converted,
        LeadStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Converted => "converted",
            LeadStatus::Lost => "lost",
            LeadStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown status '{}', expected one of: new, contacted, converted, lost",
                    s
                )
            })
    }
}

/// Owning company of a lead.
///
/// Tenant endpoints return the bare ID; the admin endpoint populates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompanyRef {
    Id(String),
    Populated {
        #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl CompanyRef {
    pub fn id(&self) -> Option<&str> {
        match self {
            CompanyRef::Id(id) => Some(id),
            CompanyRef::Populated { id, .. } => id.as_deref(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            CompanyRef::Id(_) => None,
            CompanyRef::Populated { name, .. } => name.as_deref(),
        }
    }
}

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A stored lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub phone1: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub phone2: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,

    /// Free-form notes
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,

    /// Where the lead came from (e.g. "Google", "Referral")
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: LeadStatus,

    #[serde(default, rename = "companyId", skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /leads`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewLead {
    pub name: String,
    pub phone1: String,
    pub phone2: String,
    pub email: String,
    pub message: String,
    pub source: String,
    pub status: LeadStatus,
}

impl NewLead {
    /// Normalise user input the way the form does: phones keep digits only.
    /// Other fields, email included, are sent exactly as typed.
    pub fn sanitized(mut self) -> Self {
        self.phone1 = sanitize_phone(&self.phone1);
        self.phone2 = sanitize_phone(&self.phone2);
        self
    }
}

/// Body of `PUT /leads/:id`; only set fields are sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeadUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
}

impl LeadUpdate {
    pub fn status(status: LeadStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
