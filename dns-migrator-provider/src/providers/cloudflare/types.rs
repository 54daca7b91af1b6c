//! Cloudflare API wire types.

use serde::{Deserialize, Serialize};

use crate::types::{SrvData, TargetRecord};

/// The universal `{success, result, errors[]}` response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<CloudflareApiError>,
    pub result_info: Option<CloudflareResultInfo>,
}

/// One entry of the envelope's `errors` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CloudflareApiError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CloudflareResultInfo {
    #[allow(dead_code)]
    pub page: u32,
    #[allow(dead_code)]
    pub per_page: u32,
    pub total_count: u32,
}

/// Account object as returned by `GET /accounts`.
#[derive(Debug, Deserialize)]
pub(crate) struct CloudflareAccount {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub account_type: Option<String>,
}

/// Zone object as returned by `GET/POST /zones`.
#[derive(Debug, Deserialize)]
pub(crate) struct CloudflareZone {
    pub id: String,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub name_servers: Vec<String>,
    pub account: Option<CloudflareZoneAccount>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CloudflareZoneAccount {
    pub id: String,
}

/// DNS record object as returned by `GET /zones/{id}/dns_records`.
#[derive(Debug, Deserialize)]
pub(crate) struct CloudflareDnsRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(default)]
    pub priority: Option<u16>,
}

// ---- Request bodies ----

#[derive(Debug, Serialize)]
pub(crate) struct CreateAccountBody<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub account_type: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateZoneBody<'a> {
    pub name: &'a str,
    pub account: AccountRef<'a>,
    #[serde(rename = "type")]
    pub zone_type: &'a str,
    pub jump_start: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AccountRef<'a> {
    pub id: &'a str,
}

/// Body for `POST /zones/{id}/dns_records`.
///
/// SRV records submit their payload as the structured `data` object and omit
/// `content`; everything else is flat.
#[derive(Debug, Serialize)]
pub(crate) struct CreateRecordBody<'a> {
    #[serde(rename = "type")]
    pub record_type: &'a str,
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<&'a str>,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<SrvPayload<'a>>,
}

/// The `data` object for SRV creation.
#[derive(Debug, Serialize)]
pub(crate) struct SrvPayload<'a> {
    pub service: &'a str,
    pub proto: &'a str,
    pub name: &'a str,
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: &'a str,
}

impl<'a> SrvPayload<'a> {
    pub fn from_srv(srv: &'a SrvData) -> Self {
        Self {
            service: &srv.service,
            proto: &srv.proto,
            name: &srv.name,
            priority: srv.priority,
            weight: srv.weight,
            port: srv.port,
            target: &srv.target,
        }
    }
}

impl<'a> CreateRecordBody<'a> {
    /// Build the creation body from a transformed record.
    pub fn from_target(record: &'a TargetRecord) -> Self {
        match &record.srv {
            Some(srv) => Self {
                record_type: record.record_type.as_str(),
                name: &record.name,
                content: None,
                ttl: record.ttl,
                priority: None,
                proxied: None,
                data: Some(SrvPayload::from_srv(srv)),
            },
            None => Self {
                record_type: record.record_type.as_str(),
                name: &record.name,
                content: Some(&record.content),
                ttl: record.ttl,
                priority: record.priority,
                proxied: record.proxied,
                data: None,
            },
        }
    }
}
