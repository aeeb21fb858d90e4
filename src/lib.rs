pub mod bootstrap;
pub mod check;
pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod report;
pub mod runner;
pub mod stub;
pub mod suite;

use crate::client::ApiClient;
use crate::config::HarnessConfig;
use crate::identity::Identity;
use crate::report::RunReport;
use anyhow::Context;
use chrono::Utc;
use std::time::{Duration, Instant};
use tracing::info;

/// The whole pipeline: bootstrap a credential, run the (optionally
/// filtered) default suite, aggregate a report. Only bootstrap and
/// configuration problems are errors; check failures land in the
/// report.
pub async fn run_harness(
    config: &HarnessConfig,
    filter: Option<&str>,
) -> anyhow::Result<RunReport> {
    let base_url = config.base_url().context("invalid base URL")?;
    let client = ApiClient::new(
        base_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;

    let identity = Identity::disposable(&config.password);
    let credential = bootstrap::register(&client, &identity)
        .await
        .context("credential bootstrap failed")?;

    let checks = suite::filter_checks(suite::default_suite(&identity.run_tag), filter);
    info!("🧪 Running {} checks against {}", checks.len(), base_url);

    let started_at = Utc::now();
    let started = Instant::now();
    let results = runner::run_checks(&client, &checks, &credential).await;

    Ok(RunReport::from_results(
        base_url.as_str(),
        started_at,
        started.elapsed().as_millis() as u64,
        results,
    ))
}

/// `run_harness` under the configured global timeout. Expiry is fatal,
/// like a bootstrap failure: no report is produced.
/// `run_timeout_secs == 0` disables the limit.
pub async fn run_with_timeout(
    config: &HarnessConfig,
    filter: Option<&str>,
) -> anyhow::Result<RunReport> {
    let run = run_harness(config, filter);

    if config.run_timeout_secs == 0 {
        return run.await;
    }

    tokio::time::timeout(Duration::from_secs(config.run_timeout_secs), run)
        .await
        .map_err(|_| {
            anyhow::anyhow!(
                "run exceeded global timeout of {}s",
                config.run_timeout_secs
            )
        })?
}
