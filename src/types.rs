//! Request and response payloads for the gate API. The verify payload carries
//! the user-supplied access code, so it must never be logged.

use serde::{Deserialize, Serialize};

/// Answer to the status probe; mirrors the server-side session check.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
}

/// Verdict on a submitted access code. The gate reports `"success"` for a
/// valid code and `"error"` plus an optional message otherwise.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}
