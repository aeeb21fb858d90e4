use crate::client::ApiClient;
use crate::error::BootstrapError;
use crate::identity::Identity;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde_json::{Value, json};
use tracing::info;

/// Where the register envelope carries the bearer token.
const TOKEN_POINTER: &str = "/data/token";

/// Bearer credential for one run. Obtained once, reused read-only by
/// every authenticated check, never persisted.
#[derive(Debug, Clone)]
pub struct Credential {
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Register the disposable identity and pull the token out of the
/// `{success, data: {...}}` envelope. Any failure here aborts the run.
pub async fn register(
    client: &ApiClient,
    identity: &Identity,
) -> Result<Credential, BootstrapError> {
    let payload = json!({
        "username": identity.username,
        "email": identity.email,
        "password": identity.password,
    });

    let response = client
        .send(Method::POST, "/auth/register", Some(&payload), &[], None)
        .await?;

    if !matches!(response.status, 200 | 201) {
        return Err(BootstrapError::Rejected {
            status: response.status,
            detail: response.data.to_string(),
        });
    }

    let token = response
        .data
        .pointer(TOKEN_POINTER)
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| BootstrapError::MissingToken {
            pointer: TOKEN_POINTER.to_string(),
        })?;

    let expires_at = response
        .data
        .pointer("/data/expires_at")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));

    info!("🔑 Registered disposable identity '{}'", identity.username);

    Ok(Credential {
        token: token.to_string(),
        expires_at,
    })
}
