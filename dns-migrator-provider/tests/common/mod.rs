//! Shared helpers for the live integration tests.

#![allow(dead_code)]

use std::env;

use dns_migrator_provider::{CloudflareClient, GodaddyClient};

/// Skip the test when a required environment variable is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert a `Result` is `Ok` and unwrap it, failing the test otherwise.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(res.is_ok(), "{}: {res:?}", format_args!($($msg)+));
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub fn godaddy_from_env() -> GodaddyClient {
    let key = env::var("GODADDY_API_KEY").unwrap_or_default();
    let secret = env::var("GODADDY_API_SECRET").unwrap_or_default();
    GodaddyClient::new(key, secret)
}

pub fn cloudflare_from_env() -> CloudflareClient {
    let email = env::var("CLOUDFLARE_EMAIL").unwrap_or_default();
    let api_key = env::var("CLOUDFLARE_API_KEY").unwrap_or_default();
    CloudflareClient::new(email, api_key)
}

pub fn test_domain() -> String {
    env::var("TEST_DOMAIN").unwrap_or_default()
}
