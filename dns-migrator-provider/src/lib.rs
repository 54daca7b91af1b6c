//! # dns-migrator-provider
//!
//! Vendor REST clients and the shared DNS data model for GoDaddy-to-Cloudflare
//! domain migrations.
//!
//! ## Clients
//!
//! | Vendor | Role | Auth Method |
//! |--------|------|-------------|
//! | [GoDaddy](https://developer.godaddy.com/) | source registrar | `sso-key` header |
//! | [Cloudflare](https://api.cloudflare.com/) | target DNS host | `X-Auth-Email` + `X-Auth-Key` |
//!
//! ## Record transform
//!
//! [`transform::plan_import`] converts a domain's source records into the
//! target host's shape: NS/SOA excluded, SRV decomposed into structured data,
//! TXT content quote-wrapped, sub-minimum TTLs mapped to "automatic", and the
//! CDN proxy disabled so the zone behaves as plain DNS after cut-over. The
//! returned [`ImportPlan`](types::ImportPlan) lists both the records to submit
//! and every exclusion with its reason, so the human approving the import sees
//! the full picture.
//!
//! ## Error handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). Error
//! kinds are decided centrally (HTTP status mapping in `http_client`, envelope
//! code mapping in the Cloudflare client); call sites match on kinds, never on
//! status codes or message text. There is no generic retry: every request is
//! issued once, except the GoDaddy unlock's bounded retry on a 422 conflict.

mod error;
mod http_client;
mod providers;
pub mod transform;
pub mod types;

pub use error::{ProviderError, Result};
pub use providers::{CloudflareClient, GodaddyClient};
