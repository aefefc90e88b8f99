//! Login and registration inputs, and the wire payloads built from them.

use serde::{Deserialize, Serialize};

/// Login form input
#[derive(Debug, Clone, Default)]
pub struct LoginCredentials {
    pub company_id: Option<String>,
    pub email: String,
    pub password: String,
}

/// Company registration form input
#[derive(Debug, Clone, Default)]
pub struct CompanyRegistration {
    pub company_name: String,
    pub admin_email: String,
    pub admin_password: String,
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    /// Omitted entirely for the administrator account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    pub email: String,
    pub password: String,
}

impl LoginPayload {
    /// Build the outbound payload.
    ///
    /// The administrator account is not scoped to a company, so its payload
    /// never carries a company ID, even one typed into the form.
    pub fn from_credentials(credentials: &LoginCredentials, admin_email: Option<&str>) -> Self {
        let is_admin = admin_email.is_some_and(|admin| admin == credentials.email);
        let company_id = if is_admin {
            None
        } else {
            credentials
                .company_id
                .as_deref()
                .map(|id| id.trim().to_string())
        };

        Self {
            company_id,
            email: credentials.email.clone(),
            password: credentials.password.clone(),
        }
    }
}

/// Body of `POST /auth/register-company`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCompanyPayload {
    pub company_name: String,
    pub admin_email: String,
    pub admin_password: String,
}

impl From<&CompanyRegistration> for RegisterCompanyPayload {
    fn from(details: &CompanyRegistration) -> Self {
        Self {
            company_name: details.company_name.trim().to_string(),
            admin_email: details.admin_email.clone(),
            admin_password: details.admin_password.clone(),
        }
    }
}

/// Response of `POST /auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Response of `POST /auth/register-company`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCompanyResponse {
    pub token: String,
    #[serde(default)]
    pub company_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_payload_omits_company_id() {
        let credentials = LoginCredentials {
            company_id: Some("c123".to_string()),
            email: "admin@corp.com".to_string(),
            password: "secret1".to_string(),
        };
        let payload = LoginPayload::from_credentials(&credentials, Some("admin@corp.com"));
        assert!(payload.company_id.is_none());

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("companyId").is_none());
        assert_eq!(json["email"], "admin@corp.com");
    }

    #[test]
    fn test_user_payload_includes_trimmed_company_id() {
        let credentials = LoginCredentials {
            company_id: Some("  c123 ".to_string()),
            email: "user@x.com".to_string(),
            password: "secret1".to_string(),
        };
        let payload = LoginPayload::from_credentials(&credentials, Some("admin@corp.com"));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["companyId"], "c123");
        assert_eq!(json["password"], "secret1");
    }

    #[test]
    fn test_register_payload_field_names() {
        let details = CompanyRegistration {
            company_name: "Acme".to_string(),
            admin_email: "boss@acme.com".to_string(),
            admin_password: "abc1!x".to_string(),
        };
        let json = serde_json::to_value(RegisterCompanyPayload::from(&details)).unwrap();
        assert_eq!(json["companyName"], "Acme");
        assert_eq!(json["adminEmail"], "boss@acme.com");
        assert_eq!(json["adminPassword"], "abc1!x");
    }
}
