use api_smoke::config::HarnessConfig;
use clap::{Parser, ValueEnum};
use dotenvy::dotenv;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "API smoke-test harness", long_about = None)]
struct Args {
    /// Base URL of the API under test
    #[arg(long)]
    base_url: Option<String>,

    /// Only run checks whose name contains this substring
    #[arg(long)]
    check: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    request_timeout_secs: Option<u64>,

    /// Whole-run timeout in seconds (0 disables)
    #[arg(long)]
    run_timeout_secs: Option<u64>,

    /// Report format on stdout
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let args = Args::parse();

    // Logs on stderr so a JSON report on stdout stays machine-readable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_smoke=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = HarnessConfig::from_env();
    if let Some(base_url) = args.base_url.clone() {
        config.base_url = base_url;
    }
    if let Some(secs) = args.request_timeout_secs {
        config.request_timeout_secs = secs;
    }
    if let Some(secs) = args.run_timeout_secs {
        config.run_timeout_secs = secs;
    }

    info!("🚀 Starting smoke run against {}", config.base_url);

    let report = match api_smoke::run_with_timeout(&config, args.check.as_deref()).await {
        Ok(report) => report,
        // No report was produced: bootstrap, config, or timeout.
        Err(e) => {
            error!("💥 Run aborted: {e:#}");
            return ExitCode::from(2);
        }
    };

    match args.format {
        ReportFormat::Text => report.print_text(),
        ReportFormat::Json => {
            if let Err(e) = report.print_json() {
                error!("💥 Failed to serialize report: {e}");
                return ExitCode::from(2);
            }
        }
    }

    if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
