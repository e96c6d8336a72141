//! Session state for the current admin.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards, the navigation header, and the auth pages all read the same
//! [`Session`]. Transitions happen only through [`Session::apply`], a pure
//! function, so the state machine is testable without any UI or network.
//!
//! ```text
//! Loading --Restored(Some)--> Authenticated
//! Loading --Restored(None)--> Anonymous
//! Anonymous --SignedIn--> Authenticated
//! Authenticated --LoggedOut | Expired--> Anonymous
//! ```

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::types::AdminProfile;

/// Which of the three mutually exclusive states holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// Startup revalidation has not finished.
    #[default]
    Loading,
    Anonymous,
    Authenticated(AdminProfile),
}

/// Discrete inputs to the state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionAction {
    /// A login or signup request is in flight.
    Begin,
    /// Startup revalidation finished.
    Restored(Option<AdminProfile>),
    /// Login or signup succeeded.
    SignedIn(AdminProfile),
    /// Login or signup failed with a displayable message.
    Failed(String),
    LoggedOut,
    /// The server rejected the token.
    Expired,
    ClearError,
}

/// Current session as seen by the view layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub phase: SessionPhase,
    /// A login/signup request is in flight.
    pub pending: bool,
    pub error: Option<String>,
}

impl Session {
    /// Apply one action, returning the next state.
    #[must_use]
    pub fn apply(&self, action: SessionAction) -> Self {
        match action {
            SessionAction::Begin => Self { phase: self.phase.clone(), pending: true, error: None },
            // Revalidation only settles an unresolved session; a login that
            // finished first wins.
            SessionAction::Restored(_) if self.phase != SessionPhase::Loading => self.clone(),
            SessionAction::Restored(admin) => Self {
                phase: admin.map_or(SessionPhase::Anonymous, SessionPhase::Authenticated),
                pending: self.pending,
                error: self.error.clone(),
            },
            SessionAction::SignedIn(admin) => {
                Self { phase: SessionPhase::Authenticated(admin), pending: false, error: None }
            }
            SessionAction::Failed(message) => Self {
                phase: settled(&self.phase),
                pending: false,
                error: Some(message),
            },
            SessionAction::LoggedOut | SessionAction::Expired => {
                Self { phase: SessionPhase::Anonymous, pending: false, error: None }
            }
            SessionAction::ClearError => Self { error: None, ..self.clone() },
        }
    }

    #[must_use]
    pub fn admin(&self) -> Option<&AdminProfile> {
        match &self.phase {
            SessionPhase::Authenticated(admin) => Some(admin),
            _ => None,
        }
    }

    /// Always equal to "an admin is present".
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.admin().is_some()
    }

    /// Startup is unresolved or a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == SessionPhase::Loading || self.pending
    }

    /// Startup revalidation has finished.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.phase != SessionPhase::Loading
    }
}

/// A failure leaves no admin behind; an unresolved startup settles to
/// anonymous.
fn settled(phase: &SessionPhase) -> SessionPhase {
    match phase {
        SessionPhase::Authenticated(admin) => SessionPhase::Authenticated(admin.clone()),
        SessionPhase::Loading | SessionPhase::Anonymous => SessionPhase::Anonymous,
    }
}
