//! Client-side session state for a backend access-code gate.
//!
//! The gate protects an application behind a shared-secret access code. This
//! crate tracks whether the current session is already authenticated and
//! whether the code-entry prompt should be shown, and exposes the actions
//! that move those flags.
//!
//! Flow Overview:
//! - Build a [`GateConfig`] (env-driven or explicit) and a [`GateTransport`]
//!   from it.
//! - [`AccessGate::start`] constructs the shared state and runs the status
//!   check once, the moment the gate becomes visible to the app.
//! - Consumers read flag snapshots or subscribe to a watch channel; the
//!   code-entry dialog calls [`AccessGate::verify_access_code`] on submit.
//! - Operations log failures and fold them into state; they never surface
//!   typed errors to UI callers.
//!
//! The UI dialog itself and the backend gate service are external
//! collaborators; only the state and the HTTP exchanges live here.

use serde_json::Value;

pub mod client;
pub mod config;
pub mod error;
mod gate;
pub mod state;
pub mod transport;
pub mod types;

pub use client::VerifyOutcome;
pub use config::GateConfig;
pub use error::Error;
pub use gate::AccessGate;
pub use state::GateStatus;
pub use transport::{GateResponse, GateTransport};

/// Best-effort extraction of a human-readable message from a gate error body.
/// The gate answers rejections with `{"status": "error", "message": ...}` and
/// other failures with `{"detail": ...}`.
pub(crate) fn gate_error_message(body: &Value) -> &str {
    body.get("message")
        .or_else(|| body.get("detail"))
        .and_then(Value::as_str)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::gate_error_message;
    use serde_json::json;

    #[test]
    fn gate_error_message_prefers_message_field() {
        let body = json!({"status": "error", "message": "Invalid access code"});
        assert_eq!(gate_error_message(&body), "Invalid access code");
    }

    #[test]
    fn gate_error_message_falls_back_to_detail() {
        let body = json!({"detail": "Not authenticated"});
        assert_eq!(gate_error_message(&body), "Not authenticated");
    }

    #[test]
    fn gate_error_message_defaults_to_empty() {
        assert_eq!(gate_error_message(&json!({})), "");
        assert_eq!(gate_error_message(&json!({"message": 42})), "");
    }
}
