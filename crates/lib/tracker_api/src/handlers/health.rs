//! Liveness check.

/// Fixed confirmation text for `GET /`.
pub const HEALTH_TEXT: &str = "🚀 Crypto Tracker Agent with dynamic search is live!";

/// `GET /` — liveness check.
pub async fn health() -> &'static str {
    HEALTH_TEXT
}
