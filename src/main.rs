mod config;
mod error;
mod models;
mod server;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use std::{fs, net::SocketAddr, path::PathBuf, sync::Arc};
use tracing::info;
use tracing_subscriber::EnvFilter;

use models::api_request::{JiraCreateIssueRequest, PayloadInput};
use models::batch::{BatchRequest, build_batch};
use models::finding::Finding;
use models::tracker::Tracker;
use server::AppState;

/// ----------------------------------------------------------------------
/// 1  Command line
/// ----------------------------------------------------------------------
#[derive(Parser, Debug)]
#[command(author, version, about = "Build issue tracker payloads from scan findings")]
struct Cli {
    /// YAML file with lookup tables; the built-in tables are used when omitted
    #[arg(long, env = "FINDING_TICKET_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Tracker the description markup is rendered for (jira or octane)
    #[arg(long, env = "FINDING_TICKET_TRACKER", global = true)]
    tracker: Option<Tracker>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the payload for one group of findings
    Payload(PayloadArgs),
    /// Print one payload per category for a findings file
    Batch(BatchArgs),
    /// Serve payload building over HTTP
    Serve {
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
}

#[derive(Args, Debug)]
struct PayloadArgs {
    #[arg(long)]
    application_id: u64,
    #[arg(long)]
    application_name: String,
    /// Severity code, 1 (low) to 4 (critical)
    #[arg(long)]
    severity: u8,
    #[arg(long)]
    category: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Single-line JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// JSON array of findings
    #[arg(long)]
    findings: PathBuf,
    #[arg(long)]
    application_id: u64,
    #[arg(long)]
    application_name: String,
    #[arg(long)]
    release_id: u64,
    /// Base URL of the scan service's issue pages
    #[arg(long, env = "FORTIFY_ISSUE_URL")]
    issue_url: String,
}

/// ----------------------------------------------------------------------
/// 2  Startup
/// ----------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the payloads, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    config::init(cli.config.as_deref(), cli.tracker)?;

    match cli.command {
        Command::Payload(args) => print_payload(args),
        Command::Batch(args) => print_batch(args),
        Command::Serve { port } => serve(port).await,
    }
}

/// ----------------------------------------------------------------------
/// 3  Commands
/// ----------------------------------------------------------------------
fn print_payload(args: PayloadArgs) -> Result<()> {
    let input = PayloadInput {
        application_id: args.application_id,
        application_name: args.application_name,
        severity: args.severity,
        category: args.category,
        description: args.description,
    };
    let request = JiraCreateIssueRequest::from_payload_input(config::get()?, &input)?;
    let json = if args.compact {
        request.to_json()?
    } else {
        request.to_json_pretty()?
    };
    println!("{json}");
    Ok(())
}

fn print_batch(args: BatchArgs) -> Result<()> {
    let findings_str = fs::read_to_string(&args.findings)
        .with_context(|| format!("failed to read findings file {}", args.findings.display()))?;
    let findings: Vec<Finding> = {
        let mut deserializer = serde_json::Deserializer::from_str(&findings_str);
        serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|e| anyhow!("failed to parse findings: {}", e))?
    };
    info!("Loaded {} finding(s) from {}", findings.len(), args.findings.display());

    let request = BatchRequest {
        application_id: args.application_id,
        application_name: args.application_name,
        release_id: args.release_id,
        issue_url: args.issue_url,
        findings,
    };
    let payloads = build_batch(config::get()?, request)?;
    println!("{}", serde_json::to_string_pretty(&payloads)?);
    Ok(())
}

async fn serve(port: u16) -> Result<()> {
    let state = Arc::new(AppState {
        config: config::get()?.clone(),
    });
    let app = server::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on http://{addr}/ticket-payload{{,/batch}}");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
