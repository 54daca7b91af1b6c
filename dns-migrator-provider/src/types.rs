use serde::{Deserialize, Serialize};

// ============ DNS Record Types ============

/// DNS record type identifier.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
/// `SOA` appears in source data only; SOA and NS records are never carried
/// to the target host (it generates its own).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Start of authority record.
    Soa,
    /// Certificate Authority Authorization record.
    Caa,
}

impl DnsRecordType {
    /// Uppercase wire string for this record type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Soa => "SOA",
            Self::Caa => "CAA",
        }
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DnsRecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "TXT" => Ok(Self::Txt),
            "NS" => Ok(Self::Ns),
            "SRV" => Ok(Self::Srv),
            "SOA" => Ok(Self::Soa),
            "CAA" => Ok(Self::Caa),
            other => Err(format!("unsupported record type '{other}'")),
        }
    }
}

/// A source DNS record as returned by the registrar (GoDaddy shape).
///
/// `data` is kept raw; for SRV records it is a whitespace-separated
/// `"weight port target"` triple that the transform decomposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    /// Record name (`"@"` for the apex; SRV names carry `_service._proto` labels).
    pub name: String,
    /// Raw record value.
    pub data: String,
    /// Time to live in seconds.
    pub ttl: u32,
    /// Priority; present on MX and SRV records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

// ============ Registrar (source) Types ============

/// GoDaddy domain statuses after which a domain can never be migrated.
const TERMINAL_STATUSES: &[&str] = &[
    "CANCELLED",
    "CANCELLED_HELD",
    "CANCELLED_REDEEMABLE",
    "CANCELLED_TRANSFER",
    "EXPIRED",
    "TRANSFERRED_OUT",
    "TRANSFER_OUT_COMPLETED",
];

/// One row of the registrar's domain list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainSummary {
    /// Domain name.
    pub domain: String,
    /// Registrar status string (e.g. `"ACTIVE"`, `"CANCELLED"`).
    pub status: String,
    /// Expiration timestamp, if the registrar returned one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
}

impl DomainSummary {
    /// Whether the domain is in a terminal status and should be filtered from
    /// migration candidate lists. The API has no server-side filter for this.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        TERMINAL_STATUSES.contains(&self.status.as_str())
    }
}

/// Registrar-side detail for one domain, as needed by the migration workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainDetails {
    /// Current delegated nameservers.
    #[serde(default)]
    pub name_servers: Vec<String>,
    /// Registrar transfer lock.
    pub locked: bool,
    /// WHOIS privacy enabled.
    #[serde(default)]
    pub privacy: bool,
    /// Transfer auth (EPP) code, when the registrar exposes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_code: Option<String>,
    /// Reseller subaccount the domain belongs to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subaccount_id: Option<String>,
    /// Whether the domain is inside a registration/transfer protection window.
    #[serde(default)]
    pub transfer_protected: bool,
    /// Auto-renew flag; must be echoed back on domain PATCH calls.
    #[serde(default)]
    pub renew_auto: bool,
}

// ============ Target Host (Cloudflare) Types ============

/// A Cloudflare account ("subtenant"), used as a per-customer partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account identifier.
    pub id: String,
    /// Account display name (matched against the MSP's customer name).
    pub name: String,
    /// Account type (`"standard"` for the accounts this tool creates).
    #[serde(default)]
    pub account_type: Option<String>,
}

/// A DNS zone at the target host.
///
/// `name_servers` is the critical hand-off value: it is assigned at zone
/// creation and fed verbatim into the registrar's nameserver update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Zone identifier.
    pub id: String,
    /// Domain name.
    pub name: String,
    /// Owning account identifier.
    pub account_id: String,
    /// Nameservers assigned by the host.
    pub name_servers: Vec<String>,
    /// Zone status (`"pending"` until delegation is observed).
    pub status: String,
}

// ============ Transform / Import Types ============

/// SRV payload decomposed from a source record's `name` and `data` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrvData {
    /// Service label including the leading underscore (e.g. `"_sip"`).
    pub service: String,
    /// Protocol label including the leading underscore (e.g. `"_tcp"`).
    pub proto: String,
    /// Owner name relative to the zone (`"@"` for the apex).
    pub name: String,
    /// Priority (from the source record's `priority` field).
    pub priority: u16,
    /// Load-balancing weight.
    pub weight: u16,
    /// TCP/UDP port.
    pub port: u16,
    /// Target hostname.
    pub target: String,
}

/// One record of the transformed, target-shaped import set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRecord {
    /// Record type (never NS/SOA).
    pub record_type: DnsRecordType,
    /// Record name.
    pub name: String,
    /// Record content (TXT content is quote-wrapped here).
    pub content: String,
    /// TTL in seconds; `1` means "automatic" at the target host.
    pub ttl: u32,
    /// Priority; only set for MX (SRV priority travels inside `srv`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    /// CDN proxy flag; only set (to `false`) for A/AAAA/CNAME.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    /// Structured SRV payload; only set for SRV records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srv: Option<SrvData>,
}

/// A source record excluded from the import set, with the reason shown to the
/// human approving the import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRecord {
    /// Record type of the skipped record.
    pub record_type: DnsRecordType,
    /// Record name.
    pub name: String,
    /// Why it was skipped.
    pub reason: String,
}

/// The transformed import set plus everything that was excluded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPlan {
    /// Records to submit, in source order.
    pub records: Vec<TargetRecord>,
    /// Records excluded by the transform rules.
    pub skipped: Vec<SkippedRecord>,
}

/// One record that failed to import; isolated, never fatal to the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFailure {
    /// Record type of the failed record.
    pub record_type: DnsRecordType,
    /// Record name.
    pub name: String,
    /// Vendor error, verbatim.
    pub reason: String,
}

/// Tally of a best-effort record import.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// Records successfully created at the target.
    pub created: Vec<TargetRecord>,
    /// Per-record failures.
    pub failures: Vec<ImportFailure>,
    /// Records the transform excluded (copied from the plan for the summary).
    pub skipped: Vec<SkippedRecord>,
}

impl ImportReport {
    /// Number of records successfully created.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.created.len()
    }

    /// Number of records that failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }
}
