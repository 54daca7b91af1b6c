//! Source→target record transformation.
//!
//! Rewrites registrar-shaped records into the shape the target host accepts:
//!
//! - NS and SOA records are never transferred; the target generates its own.
//! - SRV names decompose into `(service, proto, owner)` and SRV data into
//!   `(weight, port, target)`; malformed SRV records are dropped with a
//!   warning, never fatally.
//! - TXT content is wrapped in one pair of double quotes unless the source
//!   already quoted it (the transform is idempotent).
//! - TTLs below the target's 60-second floor become `1` ("automatic").
//! - `priority` is only emitted for MX/SRV and `proxied` only for
//!   A/AAAA/CNAME; the fields are omitted everywhere else.

use crate::types::{DnsRecord, DnsRecordType, ImportPlan, SkippedRecord, SrvData, TargetRecord};

/// Target-host TTL floor; anything below maps to the "automatic" sentinel.
const MIN_TTL: u32 = 60;
/// The target host's "automatic TTL" sentinel value.
const AUTO_TTL: u32 = 1;

/// Build the target-shaped import plan from a set of source records.
///
/// Never fails: records the transform cannot express are collected in
/// [`ImportPlan::skipped`] with a human-readable reason, and each one is
/// logged as a warning.
#[must_use]
pub fn plan_import(records: &[DnsRecord]) -> ImportPlan {
    let mut plan = ImportPlan::default();

    for record in records {
        match transform_record(record) {
            Ok(target) => plan.records.push(target),
            Err(reason) => {
                log::warn!(
                    "Skipping {} record '{}': {reason}",
                    record.record_type,
                    record.name
                );
                plan.skipped.push(SkippedRecord {
                    record_type: record.record_type,
                    name: record.name.clone(),
                    reason,
                });
            }
        }
    }

    plan
}

/// Transform a single record, or explain why it cannot travel.
fn transform_record(record: &DnsRecord) -> Result<TargetRecord, String> {
    match record.record_type {
        DnsRecordType::Ns | DnsRecordType::Soa => Err(format!(
            "{} records are not transferred; the target DNS host generates its own",
            record.record_type
        )),
        DnsRecordType::Srv => {
            let srv = parse_srv(record)?;
            Ok(TargetRecord {
                record_type: DnsRecordType::Srv,
                name: record.name.clone(),
                content: record.data.clone(),
                ttl: clamp_ttl(record.ttl),
                priority: None,
                proxied: None,
                srv: Some(srv),
            })
        }
        DnsRecordType::Txt => Ok(TargetRecord {
            record_type: DnsRecordType::Txt,
            name: record.name.clone(),
            content: quote_txt(&record.data),
            ttl: clamp_ttl(record.ttl),
            priority: None,
            proxied: None,
            srv: None,
        }),
        DnsRecordType::Mx => Ok(TargetRecord {
            record_type: DnsRecordType::Mx,
            name: record.name.clone(),
            content: record.data.clone(),
            ttl: clamp_ttl(record.ttl),
            priority: record.priority,
            proxied: None,
            srv: None,
        }),
        DnsRecordType::A | DnsRecordType::Aaaa | DnsRecordType::Cname => Ok(TargetRecord {
            record_type: record.record_type,
            name: record.name.clone(),
            content: record.data.clone(),
            ttl: clamp_ttl(record.ttl),
            priority: None,
            // The cut-over must be content-neutral; proxying is a later,
            // deliberate choice in the host's dashboard.
            proxied: Some(false),
            srv: None,
        }),
        DnsRecordType::Caa => Ok(TargetRecord {
            record_type: DnsRecordType::Caa,
            name: record.name.clone(),
            content: record.data.clone(),
            ttl: clamp_ttl(record.ttl),
            priority: None,
            proxied: None,
            srv: None,
        }),
    }
}

/// Coerce TTLs below the target's floor to the "automatic" sentinel.
fn clamp_ttl(ttl: u32) -> u32 {
    if ttl < MIN_TTL { AUTO_TTL } else { ttl }
}

/// Wrap TXT content in double quotes unless the source already did.
///
/// Idempotent: quoting twice yields the same string.
fn quote_txt(content: &str) -> String {
    if content.len() >= 2 && content.starts_with('"') && content.ends_with('"') {
        content.to_string()
    } else {
        format!("\"{content}\"")
    }
}

/// Decompose a source SRV record.
///
/// The source name carries `_service._proto[.owner]` labels; the source data
/// is a whitespace-separated `weight port target` triple.
fn parse_srv(record: &DnsRecord) -> Result<SrvData, String> {
    let mut labels = record.name.splitn(3, '.');
    let service = labels.next().unwrap_or_default();
    let proto = labels.next().unwrap_or_default();
    if !service.starts_with('_') || !proto.starts_with('_') {
        return Err(format!(
            "SRV name '{}' is missing _service._proto labels",
            record.name
        ));
    }
    let owner = match labels.next() {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => "@".to_string(),
    };

    let tokens: Vec<&str> = record.data.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(format!(
            "SRV data '{}' has {} token(s); expected 'weight port target'",
            record.data,
            tokens.len()
        ));
    }
    let weight: u16 = tokens[0]
        .parse()
        .map_err(|_| format!("SRV weight '{}' is not a number", tokens[0]))?;
    let port: u16 = tokens[1]
        .parse()
        .map_err(|_| format!("SRV port '{}' is not a number", tokens[1]))?;

    Ok(SrvData {
        service: service.to_string(),
        proto: proto.to_string(),
        name: owner,
        priority: record.priority.unwrap_or(0),
        weight,
        port,
        target: tokens[2].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(record_type: DnsRecordType, name: &str, data: &str, ttl: u32) -> DnsRecord {
        DnsRecord {
            record_type,
            name: name.to_string(),
            data: data.to_string(),
            ttl,
            priority: None,
        }
    }

    fn record_with_priority(
        record_type: DnsRecordType,
        name: &str,
        data: &str,
        ttl: u32,
        priority: u16,
    ) -> DnsRecord {
        DnsRecord {
            priority: Some(priority),
            ..record(record_type, name, data, ttl)
        }
    }

    // ---- NS/SOA exclusion ----

    #[test]
    fn ns_and_soa_never_transferred() {
        let source = vec![
            record(DnsRecordType::Ns, "@", "ns1.example-dns.com", 3600),
            record(DnsRecordType::Soa, "@", "primary hostmaster", 3600),
            record(DnsRecordType::A, "www", "1.2.3.4", 3600),
        ];
        let plan = plan_import(&source);
        assert_eq!(plan.records.len(), 1);
        assert_eq!(plan.records[0].record_type, DnsRecordType::A);
        assert_eq!(plan.skipped.len(), 2);
        assert!(
            plan.skipped
                .iter()
                .all(|s| matches!(s.record_type, DnsRecordType::Ns | DnsRecordType::Soa))
        );
    }

    // ---- SRV handling ----

    #[test]
    fn srv_decomposes_name_and_data() {
        let source = vec![record_with_priority(
            DnsRecordType::Srv,
            "_sip._tcp",
            "20 5060 sip.example.com",
            3600,
            10,
        )];
        let plan = plan_import(&source);
        assert_eq!(plan.records.len(), 1);
        let srv = plan.records[0].srv.as_ref().unwrap();
        assert_eq!(srv.service, "_sip");
        assert_eq!(srv.proto, "_tcp");
        assert_eq!(srv.name, "@");
        assert_eq!(srv.priority, 10);
        assert_eq!(srv.weight, 20);
        assert_eq!(srv.port, 5060);
        assert_eq!(srv.target, "sip.example.com");
    }

    #[test]
    fn srv_with_owner_label() {
        let source = vec![record_with_priority(
            DnsRecordType::Srv,
            "_autodiscover._tcp.mail",
            "0 443 autodiscover.example.com",
            3600,
            0,
        )];
        let plan = plan_import(&source);
        let srv = plan.records[0].srv.as_ref().unwrap();
        assert_eq!(srv.name, "mail");
    }

    #[test]
    fn srv_with_short_data_is_dropped_not_fatal() {
        let source = vec![
            record(DnsRecordType::Srv, "_sip._tcp", "only two", 3600),
            record(DnsRecordType::A, "www", "1.2.3.4", 3600),
        ];
        let plan = plan_import(&source);
        assert_eq!(plan.records.len(), 1);
        assert_eq!(plan.skipped.len(), 1);
        assert_eq!(plan.skipped[0].record_type, DnsRecordType::Srv);
        assert!(plan.skipped[0].reason.contains("2 token(s)"));
    }

    #[test]
    fn srv_without_service_labels_is_dropped() {
        let source = vec![record(
            DnsRecordType::Srv,
            "plainname",
            "0 443 target.example.com",
            3600,
        )];
        let plan = plan_import(&source);
        assert!(plan.records.is_empty());
        assert_eq!(plan.skipped.len(), 1);
    }

    // ---- TXT quoting ----

    #[test]
    fn txt_unquoted_content_gets_wrapped() {
        let source = vec![record(DnsRecordType::Txt, "@", "v=spf1 -all", 3600)];
        let plan = plan_import(&source);
        assert_eq!(plan.records[0].content, "\"v=spf1 -all\"");
    }

    #[test]
    fn txt_quoting_is_idempotent() {
        assert_eq!(quote_txt("v=spf1 -all"), "\"v=spf1 -all\"");
        assert_eq!(quote_txt("\"v=spf1 -all\""), "\"v=spf1 -all\"");
        assert_eq!(quote_txt(&quote_txt("v=spf1 -all")), "\"v=spf1 -all\"");
    }

    #[test]
    fn txt_lone_quote_is_wrapped_not_passed_through() {
        // A single '"' both starts and ends with a quote but is not wrapped.
        assert_eq!(quote_txt("\""), "\"\"\"");
    }

    // ---- TTL coercion ----

    #[test]
    fn ttl_below_floor_becomes_automatic() {
        let source = vec![record(DnsRecordType::A, "www", "1.2.3.4", 30)];
        let plan = plan_import(&source);
        assert_eq!(plan.records[0].ttl, 1);
    }

    #[test]
    fn ttl_at_floor_is_preserved() {
        assert_eq!(clamp_ttl(60), 60);
        assert_eq!(clamp_ttl(59), 1);
        assert_eq!(clamp_ttl(3600), 3600);
    }

    // ---- Field validity ----

    #[test]
    fn priority_only_on_mx() {
        let source = vec![
            record_with_priority(DnsRecordType::Mx, "@", "mail.example.com", 3600, 10),
            record(DnsRecordType::A, "www", "1.2.3.4", 3600),
            record(DnsRecordType::Txt, "@", "hello", 3600),
        ];
        let plan = plan_import(&source);
        assert_eq!(plan.records[0].priority, Some(10));
        assert_eq!(plan.records[1].priority, None);
        assert_eq!(plan.records[2].priority, None);
    }

    #[test]
    fn proxied_only_on_address_and_alias_records() {
        let source = vec![
            record(DnsRecordType::A, "www", "1.2.3.4", 3600),
            record(DnsRecordType::Aaaa, "www", "2001:db8::1", 3600),
            record(DnsRecordType::Cname, "blog", "www.example.com", 3600),
            record_with_priority(DnsRecordType::Mx, "@", "mail.example.com", 3600, 10),
            record(DnsRecordType::Txt, "@", "hello", 3600),
        ];
        let plan = plan_import(&source);
        assert_eq!(plan.records[0].proxied, Some(false));
        assert_eq!(plan.records[1].proxied, Some(false));
        assert_eq!(plan.records[2].proxied, Some(false));
        assert_eq!(plan.records[3].proxied, None);
        assert_eq!(plan.records[4].proxied, None);
    }

    // ---- Full scenario from the migration runbook ----

    #[test]
    fn mixed_zone_transforms_to_expected_set() {
        // 10 source records: 1 NS, 1 SOA and 1 malformed SRV are excluded,
        // leaving exactly 7.
        let source = vec![
            record(DnsRecordType::Ns, "@", "ns1.domaincontrol.com", 3600),
            record(DnsRecordType::Soa, "@", "ns1 hostmaster", 3600),
            record_with_priority(DnsRecordType::Mx, "@", "mail.example.com", 3600, 10),
            record(DnsRecordType::Txt, "@", "v=spf1 -all", 3600),
            record(DnsRecordType::Srv, "_sip._tcp", "only two", 3600),
            record(DnsRecordType::A, "@", "1.2.3.4", 600),
            record(DnsRecordType::A, "www", "1.2.3.4", 600),
            record(DnsRecordType::Cname, "mail", "mail.example.com", 3600),
            record(DnsRecordType::Aaaa, "www", "2001:db8::1", 600),
            record(DnsRecordType::Caa, "@", "0 issue \"letsencrypt.org\"", 3600),
        ];
        let plan = plan_import(&source);
        assert_eq!(plan.records.len(), 7);
        assert_eq!(plan.skipped.len(), 3);

        let mx = plan
            .records
            .iter()
            .find(|r| r.record_type == DnsRecordType::Mx)
            .unwrap();
        assert_eq!(mx.priority, Some(10));

        let txt = plan
            .records
            .iter()
            .find(|r| r.record_type == DnsRecordType::Txt)
            .unwrap();
        assert_eq!(txt.content, "\"v=spf1 -all\"");
    }
}
