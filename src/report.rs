use crate::check::{CheckResult, Outcome};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Aggregated outcome of one harness run, serializable for CI.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub base_url: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub results: Vec<CheckResult>,
}

impl RunReport {
    pub fn from_results(
        base_url: &str,
        started_at: DateTime<Utc>,
        duration_ms: u64,
        results: Vec<CheckResult>,
    ) -> Self {
        let passed = results.iter().filter(|r| r.outcome.is_pass()).count();
        let failed = results
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Fail { .. }))
            .count();
        let errors = results
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Error { .. }))
            .count();

        Self {
            run_id: Uuid::new_v4(),
            base_url: base_url.to_string(),
            started_at,
            duration_ms,
            passed,
            failed,
            errors,
            results,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0 && !self.results.is_empty()
    }

    /// One line per check plus a summary banner. Pure formatting.
    pub fn print_text(&self) {
        println!("Smoke run {} against {}", self.run_id, self.base_url);
        println!();

        for result in &self.results {
            let (glyph, detail) = match &result.outcome {
                Outcome::Pass => ("✅", String::new()),
                Outcome::Fail { mismatch } => ("❌", format!(": {mismatch}")),
                Outcome::Error { reason } => ("💥", format!(": {reason}")),
            };
            let status = result
                .status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "---".to_string());

            println!(
                "{glyph} {:<20} {:>4} {:<20} [{status}] {}ms{detail}",
                result.name, result.method, result.path, result.duration_ms
            );
        }

        println!();
        println!(
            "{} passed, {} failed, {} errors ({} checks in {}ms)",
            self.passed,
            self.failed,
            self.errors,
            self.results.len(),
            self.duration_ms
        );
    }

    pub fn print_json(&self) -> serde_json::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}
