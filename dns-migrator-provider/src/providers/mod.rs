//! Vendor API clients.

pub(crate) mod common;

pub mod cloudflare;
pub mod godaddy;

pub use cloudflare::CloudflareClient;
pub use godaddy::GodaddyClient;
