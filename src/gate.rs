//! The access gate handle: shared reactive state plus the operations that
//! mutate it.
//!
//! Flow Overview:
//! - `AccessGate::start` builds the state and spawns the status check once,
//!   when the gate first becomes visible to the app. There is no polling.
//! - `check_auth_status` folds the probe answer into the flags, failing
//!   closed on any error.
//! - `verify_access_code` grants access on the gate's `"success"` verdict,
//!   surfaces rejections in `last_error`, and leaves state untouched on
//!   transport failures so the user can retry.
//! - Operations log failures and never return errors to callers; consumers
//!   observe the gate only through state.
//!
//! Concurrent operations are not serialized. Each transition is applied
//! atomically, and when a status check and a verification are in flight at
//! the same time the last response to arrive wins.

use crate::{
    client::{self, VerifyOutcome},
    state::GateStatus,
    transport::GateTransport,
};
use tokio::sync::watch;
use tracing::{error, warn};

/// Handle over shared access gate state. Clones share the same state, so an
/// app constructs one gate and hands out copies; separately constructed
/// gates are fully independent.
#[derive(Clone, Debug)]
pub struct AccessGate {
    transport: GateTransport,
    status: watch::Sender<GateStatus>,
}

impl AccessGate {
    /// Builds a gate with closed, prompt-hidden initial state and no
    /// automatic probe. Callers that want the mount-time check use
    /// [`AccessGate::start`].
    #[must_use]
    pub fn new(transport: GateTransport) -> Self {
        let (status, _) = watch::channel(GateStatus::default());
        Self { transport, status }
    }

    /// Builds the gate and runs the status check once in the background.
    /// This is the only automatic invocation; it is never re-run on a
    /// schedule. Must be called within a tokio runtime.
    #[must_use]
    pub fn start(transport: GateTransport) -> Self {
        let gate = Self::new(transport);

        tokio::spawn({
            let gate = gate.clone();
            async move { gate.check_auth_status().await }
        });

        gate
    }

    /// Subscribe to state changes. The receiver always sees the latest
    /// snapshot, not an event history.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GateStatus> {
        self.status.subscribe()
    }

    /// Owned copy of the current state.
    #[must_use]
    pub fn status(&self) -> GateStatus {
        self.status.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.status.borrow().is_authenticated
    }

    #[must_use]
    pub fn is_dialog_visible(&self) -> bool {
        self.status.borrow().is_dialog_visible
    }

    /// Probe the gate for an existing authenticated session.
    ///
    /// On a well-formed answer the authentication flag mirrors the gate's
    /// verdict, and a negative verdict opens the prompt. Any failure is
    /// logged and fails closed: the prompt opens, the authentication flag
    /// stays as it was.
    pub async fn check_auth_status(&self) {
        match client::fetch_auth_status(&self.transport).await {
            Ok(authenticated) => {
                self.status
                    .send_modify(|status| status.apply_auth_status(authenticated));
            }
            Err(err) => {
                error!("error checking auth status: {err}");
                self.status.send_modify(GateStatus::fail_closed);
            }
        }
    }

    /// Submit an access code. The code is sent as-is and never logged.
    ///
    /// A `"success"` verdict opens the gate and dismisses the prompt. A
    /// rejection keeps the flags and surfaces the gate's reason in
    /// `last_error`. A transport failure is logged and leaves the state
    /// untouched so the prompt stays open for a retry.
    pub async fn verify_access_code(&self, code: &str) {
        match client::verify_access_code(&self.transport, code).await {
            Ok(VerifyOutcome::Granted) => {
                self.status.send_modify(GateStatus::grant);
            }
            Ok(VerifyOutcome::Denied { message }) => {
                warn!("access code rejected by the gate");
                self.status.send_modify(|status| status.reject(message));
            }
            Err(err) => {
                error!("error verifying access code: {err}");
            }
        }
    }

    /// Clear the gate session. On success the gate closes and the prompt is
    /// shown again; failures are logged and leave the state untouched.
    pub async fn log_out(&self) {
        match client::log_out(&self.transport).await {
            Ok(()) => {
                self.status.send_modify(GateStatus::clear_session);
            }
            Err(err) => {
                error!("error clearing gate session: {err}");
            }
        }
    }
}
