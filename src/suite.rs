use crate::check::{Check, Expectation};
use serde_json::json;

/// The declared smoke suite. Checks are independent: each mutation
/// creates its own resource, named with the run tag so repeated runs
/// stay collision-free.
pub fn default_suite(run_tag: &str) -> Vec<Check> {
    vec![
        Check::get("health", "/health")
            .expecting(Expectation::status([200]).field_equals("/status", json!("ok"))),
        Check::get("auth me", "/auth/me")
            .authed()
            .expecting(Expectation::status([200]).field_present("/data/user/username")),
        // The API must enforce auth here; a 2xx is a failure.
        Check::get("me without token", "/auth/me")
            .expecting(Expectation::status([401])),
        Check::post(
            "create server",
            "/servers",
            json!({ "name": format!("smoke server {run_tag}") }),
        )
        .authed()
        .expecting(
            Expectation::status([200, 201])
                .field_equals("/data/name", json!(format!("smoke server {run_tag}"))),
        ),
        Check::post(
            "create community",
            "/communities",
            json!({
                "name": format!("smoke community {run_tag}"),
                "description": "created by the smoke harness",
            }),
        )
        .authed()
        .expecting(
            Expectation::status([200, 201])
                .field_equals("/data/name", json!(format!("smoke community {run_tag}"))),
        ),
        Check::get("search", &format!("/search?q={run_tag}"))
            .authed()
            .expecting(Expectation::status([200]).field_equals("/success", json!(true))),
    ]
}

/// Keep only checks whose name contains `filter`, preserving
/// declaration order.
pub fn filter_checks(checks: Vec<Check>, filter: Option<&str>) -> Vec<Check> {
    match filter {
        Some(needle) => checks
            .into_iter()
            .filter(|c| c.name.contains(needle))
            .collect(),
        None => checks,
    }
}
