//! User-facing messages for identity-provider sign-in failures.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("Sign-in was cancelled.")]
    Cancelled,
    #[error("Pop-up was blocked. Allow pop-ups and try again.")]
    PopupBlocked,
    #[error("Sign-in failed. Please try again.")]
    Failed,
}

impl AuthFailure {
    /// Classify a provider error code such as `auth/popup-blocked`.
    ///
    /// Unrecognized codes are generic failures; the user may simply retry.
    #[must_use]
    pub fn from_provider_code(code: &str) -> Self {
        match code.trim() {
            "auth/popup-closed-by-user" | "auth/cancelled-popup-request" | "auth/user-cancelled" => {
                AuthFailure::Cancelled
            }
            "auth/popup-blocked" => AuthFailure::PopupBlocked,
            _ => AuthFailure::Failed,
        }
    }
}
