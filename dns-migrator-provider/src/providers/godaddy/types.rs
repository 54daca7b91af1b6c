//! GoDaddy API wire types.

use serde::{Deserialize, Serialize};

/// A DNS record as the registrar returns it. The type is a free-form string
/// here because the API also returns types this tool does not migrate.
#[derive(Debug, Deserialize)]
pub(crate) struct GodaddyDnsRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub data: String,
    pub ttl: u32,
    pub priority: Option<u16>,
}

/// One row of `GET /domains`.
#[derive(Debug, Deserialize)]
pub(crate) struct GodaddyDomainSummary {
    pub domain: String,
    pub status: String,
    pub expires: Option<String>,
}

/// Body for the nameserver full-replace PATCH.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SetNameserversBody<'a> {
    pub name_servers: &'a [String],
}

/// Body for the unlock PATCH.
///
/// The API rejects a bare `{"locked": false}`: the current nameservers,
/// auto-renew flag and subaccount must be echoed back even though they are
/// unrelated to the unlock intent.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UnlockBody<'a> {
    pub locked: bool,
    pub name_servers: &'a [String],
    pub renew_auto: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subaccount_id: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_body_omits_absent_subaccount() {
        let ns = vec!["ns1.example.com".to_string()];
        let body = UnlockBody {
            locked: false,
            name_servers: &ns,
            renew_auto: true,
            subaccount_id: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"locked\":false"));
        assert!(json.contains("\"renewAuto\":true"));
        assert!(!json.contains("subaccountId"));
    }

    #[test]
    fn unlock_body_includes_subaccount_when_present() {
        let ns: Vec<String> = vec![];
        let body = UnlockBody {
            locked: false,
            name_servers: &ns,
            renew_auto: false,
            subaccount_id: Some("sub-1"),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"subaccountId\":\"sub-1\""));
    }
}
