//! Gate session state. Holds only non-sensitive flags; the access code itself
//! is never stored.

/// Fallback shown when the gate rejects a code without a reason.
pub(crate) const DEFAULT_REJECTION: &str = "invalid access code";

/// Snapshot of the access gate state shared with consumers.
///
/// The dialog flag is only forced on by a failed or negative authentication
/// check (or a cleared session); only a successful verification forces it
/// back off.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GateStatus {
    /// True once the gate has confirmed a valid session or access code.
    pub is_authenticated: bool,
    /// True when the code-entry prompt should be shown to the user.
    pub is_dialog_visible: bool,
    /// Reason the last submitted code was rejected, for UI feedback.
    pub last_error: Option<String>,
}

impl GateStatus {
    /// Folds a status probe answer into the flags. A negative answer opens
    /// the prompt; a positive one never closes it on its own.
    pub(crate) fn apply_auth_status(&mut self, authenticated: bool) {
        self.is_authenticated = authenticated;
        if !authenticated {
            self.is_dialog_visible = true;
        }
    }

    /// Fail closed: assume unauthenticated and show the prompt, without
    /// touching the authentication flag.
    pub(crate) fn fail_closed(&mut self) {
        self.is_dialog_visible = true;
    }

    /// A code was accepted: open the gate and dismiss the prompt.
    pub(crate) fn grant(&mut self) {
        self.is_authenticated = true;
        self.is_dialog_visible = false;
        self.last_error = None;
    }

    /// A code was rejected: keep the prompt open and surface the reason.
    pub(crate) fn reject(&mut self, message: Option<String>) {
        self.last_error = Some(message.unwrap_or_else(|| DEFAULT_REJECTION.to_string()));
    }

    /// The session was cleared: close the gate and show the prompt again.
    pub(crate) fn clear_session(&mut self) {
        self.is_authenticated = false;
        self.is_dialog_visible = true;
    }
}
