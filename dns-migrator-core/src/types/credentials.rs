//! Typed credential containers for every integrated vendor.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Vendors the tool holds credentials for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Godaddy,
    Cloudflare,
    Connectwise,
    Itglue,
}

impl ProviderKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Godaddy => "godaddy",
            Self::Cloudflare => "cloudflare",
            Self::Connectwise => "connectwise",
            Self::Itglue => "itglue",
        }
    }

    /// Human-readable vendor name for prompts and reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Godaddy => "GoDaddy",
            Self::Cloudflare => "Cloudflare",
            Self::Connectwise => "ConnectWise Manage",
            Self::Itglue => "IT Glue",
        }
    }

    /// Fields a credential section for this vendor must carry, as
    /// `(key, label)` pairs in prompt order.
    #[must_use]
    pub fn required_fields(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Godaddy => &[("api_key", "API Key"), ("api_secret", "API Secret")],
            Self::Cloudflare => &[("email", "Account Email"), ("api_key", "Global API Key")],
            Self::Connectwise => &[
                ("site", "Site URL"),
                ("company_id", "Company ID"),
                ("public_key", "Public Key"),
                ("private_key", "Private Key"),
                ("client_id", "Client ID"),
            ],
            Self::Itglue => &[("api_key", "API Key")],
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "godaddy" => Ok(Self::Godaddy),
            "cloudflare" => Ok(Self::Cloudflare),
            "connectwise" => Ok(Self::Connectwise),
            "itglue" => Ok(Self::Itglue),
            other => Err(format!(
                "unknown provider '{other}' (expected godaddy, cloudflare, connectwise or itglue)"
            )),
        }
    }
}

/// Validation error for credential fields.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required field is missing entirely.
    MissingField {
        provider: ProviderKind,
        field: String,
        label: String,
    },
    /// A field is present but empty or whitespace-only.
    EmptyField {
        provider: ProviderKind,
        field: String,
        label: String,
    },
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField {
                provider, label, ..
            } => {
                write!(f, "{}: missing required field: {label}", provider.label())
            }
            Self::EmptyField {
                provider, label, ..
            } => {
                write!(f, "{}: field must not be empty: {label}", provider.label())
            }
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Type-safe credential container, one variant per vendor.
///
/// Serialized as a tagged enum:
///
/// ```json
/// { "provider": "godaddy", "credentials": { "api_key": "...", "api_secret": "..." } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials", rename_all = "lowercase")]
pub enum ProviderCredentials {
    Godaddy {
        api_key: String,
        api_secret: String,
    },
    Cloudflare {
        email: String,
        api_key: String,
    },
    Connectwise {
        site: String,
        company_id: String,
        public_key: String,
        private_key: String,
        client_id: String,
    },
    Itglue {
        api_key: String,
    },
}

impl ProviderCredentials {
    /// Which vendor this credential section belongs to.
    #[must_use]
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Godaddy { .. } => ProviderKind::Godaddy,
            Self::Cloudflare { .. } => ProviderKind::Cloudflare,
            Self::Connectwise { .. } => ProviderKind::Connectwise,
            Self::Itglue { .. } => ProviderKind::Itglue,
        }
    }

    /// Construct credentials from a flat field map, validating required fields.
    pub fn from_map(
        kind: ProviderKind,
        map: &HashMap<String, String>,
    ) -> Result<Self, CredentialValidationError> {
        let field = |key: &str, label: &str| Self::get_required_field(kind, map, key, label);
        match kind {
            ProviderKind::Godaddy => Ok(Self::Godaddy {
                api_key: field("api_key", "API Key")?,
                api_secret: field("api_secret", "API Secret")?,
            }),
            ProviderKind::Cloudflare => Ok(Self::Cloudflare {
                email: field("email", "Account Email")?,
                api_key: field("api_key", "Global API Key")?,
            }),
            ProviderKind::Connectwise => Ok(Self::Connectwise {
                site: field("site", "Site URL")?,
                company_id: field("company_id", "Company ID")?,
                public_key: field("public_key", "Public Key")?,
                private_key: field("private_key", "Private Key")?,
                client_id: field("client_id", "Client ID")?,
            }),
            ProviderKind::Itglue => Ok(Self::Itglue {
                api_key: field("api_key", "API Key")?,
            }),
        }
    }

    fn get_required_field(
        kind: ProviderKind,
        map: &HashMap<String, String>,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                provider: kind,
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                provider: kind,
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.clone()),
        }
    }

    /// Convert to a flat field map for storage.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        match self {
            Self::Godaddy {
                api_key,
                api_secret,
            } => [
                ("api_key".to_string(), api_key.clone()),
                ("api_secret".to_string(), api_secret.clone()),
            ]
            .into(),
            Self::Cloudflare { email, api_key } => [
                ("email".to_string(), email.clone()),
                ("api_key".to_string(), api_key.clone()),
            ]
            .into(),
            Self::Connectwise {
                site,
                company_id,
                public_key,
                private_key,
                client_id,
            } => [
                ("site".to_string(), site.clone()),
                ("company_id".to_string(), company_id.clone()),
                ("public_key".to_string(), public_key.clone()),
                ("private_key".to_string(), private_key.clone()),
                ("client_id".to_string(), client_id.clone()),
            ]
            .into(),
            Self::Itglue { api_key } => [("api_key".to_string(), api_key.clone())].into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_map_builds_godaddy_credentials() {
        let map = HashMap::from([
            ("api_key".to_string(), "k".to_string()),
            ("api_secret".to_string(), "s".to_string()),
        ]);
        let creds = ProviderCredentials::from_map(ProviderKind::Godaddy, &map).unwrap();
        assert_eq!(
            creds,
            ProviderCredentials::Godaddy {
                api_key: "k".into(),
                api_secret: "s".into(),
            }
        );
        assert_eq!(creds.kind(), ProviderKind::Godaddy);
    }

    #[test]
    fn from_map_rejects_missing_field() {
        let map = HashMap::from([("api_key".to_string(), "k".to_string())]);
        let err = ProviderCredentials::from_map(ProviderKind::Godaddy, &map).unwrap_err();
        assert!(matches!(
            err,
            CredentialValidationError::MissingField { field, .. } if field == "api_secret"
        ));
    }

    #[test]
    fn from_map_rejects_blank_field() {
        let map = HashMap::from([
            ("email".to_string(), "  ".to_string()),
            ("api_key".to_string(), "k".to_string()),
        ]);
        let err = ProviderCredentials::from_map(ProviderKind::Cloudflare, &map).unwrap_err();
        assert!(matches!(
            err,
            CredentialValidationError::EmptyField { field, .. } if field == "email"
        ));
    }

    #[test]
    fn to_map_round_trips_through_from_map() {
        let creds = ProviderCredentials::Connectwise {
            site: "https://cw.example.com".into(),
            company_id: "msp".into(),
            public_key: "pub".into(),
            private_key: "priv".into(),
            client_id: "client".into(),
        };
        let rebuilt =
            ProviderCredentials::from_map(ProviderKind::Connectwise, &creds.to_map()).unwrap();
        assert_eq!(rebuilt, creds);
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(
            "GoDaddy".parse::<ProviderKind>().unwrap(),
            ProviderKind::Godaddy
        );
        assert!("route53".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn tagged_serialization_shape() {
        let creds = ProviderCredentials::Itglue {
            api_key: "itg".into(),
        };
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(json["provider"], "itglue");
        assert_eq!(json["credentials"]["api_key"], "itg");
    }
}
