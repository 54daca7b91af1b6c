//! dns-migrator command line entry point.
//!
//! Human-formatted output only: tables and text on stdout, logs on stderr.

mod adapters;
mod console;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use dns_migrator_core::psa::{ConnectwiseClient, DocumentationApi, ItGlueClient, TicketingApi};
use dns_migrator_core::render;
use dns_migrator_core::services::{CredentialService, MigrationService};
use dns_migrator_core::types::{MigrationOptions, ProviderCredentials, ProviderKind};
use dns_migrator_provider::types::DnsRecordType;
use dns_migrator_provider::{CloudflareClient, GodaddyClient};

use adapters::KeyringCredentialStore;
use console::{ConsoleApprover, ConsolePrompter};

#[derive(Parser)]
#[command(
    name = "dns-migrator",
    version,
    about = "Migrate a domain's DNS from GoDaddy to Cloudflare"
)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List migratable domains at the registrar.
    Domains,
    /// Show a domain's source DNS records.
    Records {
        #[arg(long)]
        domain: String,
        /// Restrict to one record type (A, CNAME, MX, ...).
        #[arg(long = "type")]
        record_type: Option<DnsRecordType>,
    },
    /// Show the transformed import plan without writing anything.
    Preview {
        #[arg(long)]
        domain: String,
    },
    /// Run the full migration pipeline for one domain.
    Migrate {
        #[arg(long)]
        domain: String,
        /// Customer name, matched against the target host's accounts.
        #[arg(long)]
        customer: String,
        /// Skip the optional unlock/privacy/auth-code step.
        #[arg(long)]
        skip_transfer_prep: bool,
        /// Contact email override for the PSA ticket.
        #[arg(long)]
        ticket_email: Option<String>,
        /// IT Glue flexible-asset type for the documentation record.
        #[arg(long, env = "ITGLUE_FLEXIBLE_ASSET_TYPE_ID")]
        itglue_asset_type: Option<i64>,
    },
    /// Manage stored vendor credentials.
    Credentials {
        #[command(subcommand)]
        command: CredentialsCommand,
    },
}

#[derive(Subcommand)]
enum CredentialsCommand {
    /// Discard a vendor's stored credentials and prompt for new ones.
    Reset {
        #[arg(long)]
        provider: ProviderKind,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> anyhow::Result<()> {
    let credential_service = CredentialService::new(Arc::new(KeyringCredentialStore::new()));

    match command {
        Command::Domains => {
            let godaddy = build_godaddy_client(&credential_service).await?;
            list_domains(&godaddy).await
        }
        Command::Records {
            domain,
            record_type,
        } => {
            let godaddy = build_godaddy_client(&credential_service).await?;
            list_records(&godaddy, &domain, record_type).await
        }
        Command::Preview { domain } => {
            let (godaddy, cloudflare) = build_clients(&credential_service).await?;
            let service = MigrationService::new(
                Arc::new(godaddy),
                Arc::new(cloudflare),
                Arc::new(ConsoleApprover),
                None,
                None,
            );
            let plan = service.preview(&domain).await?;
            print!("{}", render::format_plan(&plan));
            Ok(())
        }
        Command::Migrate {
            domain,
            customer,
            skip_transfer_prep,
            ticket_email,
            itglue_asset_type,
        } => {
            let (godaddy, cloudflare) = build_clients(&credential_service).await?;
            let documentation = build_documentation(&credential_service, itglue_asset_type).await;
            let ticketing = build_ticketing(&credential_service).await;
            let service = MigrationService::new(
                Arc::new(godaddy),
                Arc::new(cloudflare),
                Arc::new(ConsoleApprover),
                documentation,
                ticketing,
            );
            let options = MigrationOptions {
                domain,
                customer_name: customer,
                skip_transfer_prep,
                ticket_email,
            };
            match service.migrate(&options).await {
                Ok(report) => {
                    print!("{}", render::format_report(&report));
                    Ok(())
                }
                Err(e) if e.is_cancellation() => {
                    println!("\n{e}. Completed steps were left in place.");
                    Ok(())
                }
                Err(e) => Err(e.into()),
            }
        }
        Command::Credentials {
            command: CredentialsCommand::Reset { provider },
        } => {
            credential_service.reset(provider, &ConsolePrompter).await?;
            println!("Stored new {} credentials.", provider.label());
            Ok(())
        }
    }
}

/// Load (prompting if needed) only the registrar credentials, for the
/// read-only commands that never touch the DNS host.
async fn build_godaddy_client(
    credential_service: &CredentialService,
) -> anyhow::Result<GodaddyClient> {
    let credentials = credential_service
        .load(&[ProviderKind::Godaddy], &ConsolePrompter)
        .await
        .context("loading credentials")?;

    match credentials.get(&ProviderKind::Godaddy) {
        Some(ProviderCredentials::Godaddy {
            api_key,
            api_secret,
        }) => Ok(GodaddyClient::new(api_key.clone(), api_secret.clone())),
        _ => bail!("stored GoDaddy credentials are malformed; run: credentials reset --provider godaddy"),
    }
}

/// Load (prompting if needed) the registrar and DNS host credentials and
/// build their clients.
async fn build_clients(
    credential_service: &CredentialService,
) -> anyhow::Result<(GodaddyClient, CloudflareClient)> {
    let credentials = credential_service
        .load(
            &[ProviderKind::Godaddy, ProviderKind::Cloudflare],
            &ConsolePrompter,
        )
        .await
        .context("loading credentials")?;

    let godaddy = match credentials.get(&ProviderKind::Godaddy) {
        Some(ProviderCredentials::Godaddy {
            api_key,
            api_secret,
        }) => GodaddyClient::new(api_key.clone(), api_secret.clone()),
        _ => bail!("stored GoDaddy credentials are malformed; run: credentials reset --provider godaddy"),
    };
    let cloudflare = match credentials.get(&ProviderKind::Cloudflare) {
        Some(ProviderCredentials::Cloudflare { email, api_key }) => {
            CloudflareClient::new(email.clone(), api_key.clone())
        }
        _ => bail!("stored Cloudflare credentials are malformed; run: credentials reset --provider cloudflare"),
    };
    Ok((godaddy, cloudflare))
}

/// Documentation integration, only when its credential section exists.
async fn build_documentation(
    credential_service: &CredentialService,
    asset_type: Option<i64>,
) -> Option<Arc<dyn DocumentationApi>> {
    match credential_service.load_optional(ProviderKind::Itglue).await {
        Some(ProviderCredentials::Itglue { api_key }) => {
            Some(Arc::new(ItGlueClient::new(api_key, asset_type)))
        }
        _ => {
            tracing::debug!("No IT Glue credentials stored; documentation step will be skipped");
            None
        }
    }
}

/// Ticketing integration, only when its credential section exists.
async fn build_ticketing(credential_service: &CredentialService) -> Option<Arc<dyn TicketingApi>> {
    match credential_service
        .load_optional(ProviderKind::Connectwise)
        .await
    {
        Some(ProviderCredentials::Connectwise {
            site,
            company_id,
            public_key,
            private_key,
            client_id,
        }) => Some(Arc::new(ConnectwiseClient::new(
            site,
            company_id,
            public_key,
            private_key,
            client_id,
        ))),
        _ => {
            tracing::debug!("No ConnectWise credentials stored; ticket step will be skipped");
            None
        }
    }
}

async fn list_domains(godaddy: &GodaddyClient) -> anyhow::Result<()> {
    let domains = godaddy.list_domains().await?;
    let mut rows: Vec<_> = domains.into_iter().filter(|d| !d.is_terminal()).collect();
    rows.sort_by(|a, b| a.domain.cmp(&b.domain));

    println!("{:40} {:22} EXPIRES", "DOMAIN", "STATUS");
    for d in &rows {
        println!(
            "{:40} {:22} {}",
            d.domain,
            d.status,
            d.expires.as_deref().unwrap_or("-")
        );
    }
    println!("\n{} migratable domain(s)", rows.len());
    Ok(())
}

async fn list_records(
    godaddy: &GodaddyClient,
    domain: &str,
    record_type: Option<DnsRecordType>,
) -> anyhow::Result<()> {
    let records = godaddy.get_dns_records(domain, record_type).await?;

    println!("{:6} {:30} {:50} {:>6} PRIORITY", "TYPE", "NAME", "DATA", "TTL");
    for r in &records {
        println!(
            "{:6} {:30} {:50} {:>6} {}",
            r.record_type.as_str(),
            r.name,
            r.data,
            r.ttl,
            r.priority.map_or_else(|| "-".to_string(), |p| p.to_string())
        );
    }
    println!("\n{} record(s)", records.len());
    Ok(())
}
