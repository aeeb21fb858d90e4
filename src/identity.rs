use chrono::Utc;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

// Monotonic within the process; the random tail de-collides
// concurrent harness processes against the same backend.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// A throwaway registration identity, uniquely suffixed so repeated
/// runs never collide.
#[derive(Debug, Clone)]
pub struct Identity {
    pub username: String,
    pub email: String,
    pub password: String,
    /// The unique suffix, shared with resources the checks create.
    pub run_tag: String,
}

impl Identity {
    pub fn disposable(password: &str) -> Self {
        let millis = Utc::now().timestamp_millis();
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let tail: u32 = rand::thread_rng().gen_range(0..10_000);

        let run_tag = format!("{millis}_{seq}{tail:04}");
        let username = format!("smoke_{run_tag}");
        let email = format!("{username}@smoke.invalid");

        Self {
            username,
            email,
            password: password.to_string(),
            run_tag,
        }
    }
}
