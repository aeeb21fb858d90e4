use crate::bootstrap::Credential;
use crate::check::{Check, CheckResult, Outcome};
use crate::client::ApiClient;
use std::time::Instant;
use tracing::{error, info, warn};

/// Run every check in declaration order, one request awaited at a time.
/// Sequential by design: a smoke run wants causally-ordered logs, not
/// throughput. Per-check failures are recorded, never propagated.
pub async fn run_checks(
    client: &ApiClient,
    checks: &[Check],
    credential: &Credential,
) -> Vec<CheckResult> {
    let mut results = Vec::with_capacity(checks.len());

    for check in checks {
        let started = Instant::now();
        let bearer = check.auth.then_some(credential.token.as_str());

        let (status, outcome) = match client
            .send(
                check.method.clone(),
                &check.path,
                check.body.as_ref(),
                &check.headers,
                bearer,
            )
            .await
        {
            Ok(response) => match check.expect.check(response.status, &response.data) {
                Ok(()) => (Some(response.status), Outcome::Pass),
                Err(mismatch) => (Some(response.status), Outcome::Fail { mismatch }),
            },
            Err(e) => (None, Outcome::Error { reason: e.to_string() }),
        };

        let duration_ms = started.elapsed().as_millis() as u64;

        match &outcome {
            Outcome::Pass => info!("✅ {} ({}ms)", check.name, duration_ms),
            Outcome::Fail { mismatch } => warn!("❌ {}: {}", check.name, mismatch),
            Outcome::Error { reason } => error!("💥 {}: {}", check.name, reason),
        }

        results.push(CheckResult {
            name: check.name.clone(),
            method: check.method.to_string(),
            path: check.path.clone(),
            status,
            outcome,
            duration_ms,
        });
    }

    results
}
