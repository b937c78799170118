use clap::Parser;
use octofhir_terminology::{
    TerminologyClient, TerminologyClientConfig, ValidationRequest, is_external_system,
};
use serde::Serialize;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "tx-validate")]
#[command(about = "Validate a code against a FHIR terminology server")]
#[command(version)]
struct Cli {
    /// Base URL of the terminology server
    #[arg(short, long, default_value = "https://tx.fhir.org/r4")]
    server: String,
    /// Canonical URL of the ValueSet
    #[arg(short = 'v', long)]
    value_set: String,
    /// Code to validate
    #[arg(short, long)]
    code: String,
    /// Code system URI
    #[arg(long)]
    system: Option<String>,
    /// Display text to check alongside the code
    #[arg(short, long)]
    display: Option<String>,
    /// Request timeout in milliseconds
    #[arg(short, long, default_value_t = 10_000)]
    timeout_ms: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    external_system: bool,
    request: &'a ValidationRequest,
    outcome: octofhir_terminology::ValidationOutcome,
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = TerminologyClientConfig::new(cli.server)
        .with_timeout(Duration::from_millis(cli.timeout_ms))
        .with_cache_size(1);
    let client = TerminologyClient::new(config)?;

    let mut request = ValidationRequest::new(cli.value_set, cli.code);
    if let Some(system) = cli.system {
        request = request.with_system(system);
    }
    if let Some(display) = cli.display {
        request = request.with_display(display);
    }

    let external_system = request.system.as_deref().is_some_and(is_external_system);
    if !external_system {
        tracing::info!("Code system is not an external terminology; querying the server anyway");
    }

    let outcome = client.validate(&request).await;
    let valid = outcome.is_valid();

    let report = Report {
        external_system,
        request: &request,
        outcome,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !valid {
        std::process::exit(1);
    }

    Ok(())
}
