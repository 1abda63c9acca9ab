//! Login and logout.
//!
//! Login is a small state machine:
//!
//! ```text
//! AwaitingUsername ──unknown user / EOF──────────────▶ Rejected
//!        │
//!        ▼
//! AwaitingPassword{remaining} ──match──▶ Authenticated
//!        │  ▲
//!        └──┘ mismatch or blank (remaining - 1)
//!        │
//!        └──remaining == 0 / EOF──────────────────────▶ Rejected
//! ```
//!
//! Only `Authenticated` touches the session; a rejected login never logs
//! anybody out.

use std::sync::Arc;
use std::time::Duration;

use adviport_core::error::{AdviPortError, Result};
use adviport_core::secret::SecretCipher;
use adviport_core::session::Session;
use adviport_core::ui::UserInterface;
use adviport_core::user::{ProfileRepository, UserProfile};
use tracing::{info, warn};

/// Password attempts per login.
pub const PASSWORD_ATTEMPTS: u32 = 5;
/// The remaining-attempts hint appears once this few are left.
pub const ATTEMPTS_WARNING_THRESHOLD: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(350);

/// Why a login ended without authenticating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    UnknownUser(String),
    AttemptsExhausted,
    InputClosed,
}

impl RejectReason {
    pub fn message(&self) -> String {
        match self {
            Self::UnknownUser(name) => {
                format!("User with login \"{name}\" does not exist. Please register first.")
            }
            Self::AttemptsExhausted => "Too many incorrect attempts. Please try again.".to_string(),
            Self::InputClosed => "Login cancelled.".to_string(),
        }
    }
}

/// States of one login attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    AwaitingUsername,
    AwaitingPassword { profile: UserProfile, remaining: u32 },
    Authenticated(UserProfile),
    Rejected(RejectReason),
}

impl AuthState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Authenticated(_) | Self::Rejected(_))
    }
}

/// Result of a logout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    LoggedOut,
    AlreadyLoggedOut,
}

impl LogoutOutcome {
    pub fn message(self) -> &'static str {
        match self {
            Self::LoggedOut => "Logged out successfully.",
            Self::AlreadyLoggedOut => "Already logged out.",
        }
    }
}

/// Drives the login state machine against a profile repository.
#[derive(Clone)]
pub struct AuthenticationFlow {
    profiles: Arc<dyn ProfileRepository>,
    cipher: Arc<dyn SecretCipher>,
    max_attempts: u32,
    retry_delay: Duration,
}

impl AuthenticationFlow {
    pub fn new(profiles: Arc<dyn ProfileRepository>, cipher: Arc<dyn SecretCipher>) -> Self {
        Self {
            profiles,
            cipher,
            max_attempts: PASSWORD_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Pause after each failed attempt.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Advances the machine by one input. Terminal states are returned unchanged.
    pub fn step(&self, state: AuthState, ui: &mut dyn UserInterface) -> AuthState {
        match state {
            AuthState::AwaitingUsername => self.read_username(ui),
            AuthState::AwaitingPassword { profile, remaining } => {
                self.read_password(profile, remaining, ui)
            }
            terminal => terminal,
        }
    }

    fn read_username(&self, ui: &mut dyn UserInterface) -> AuthState {
        let Some(username) = ui.read_line("Enter your username: ") else {
            return AuthState::Rejected(RejectReason::InputClosed);
        };
        if !self.profiles.user_exists(&username) {
            return AuthState::Rejected(RejectReason::UnknownUser(username));
        }
        match self.profiles.get_profile(&username) {
            Ok(profile) => AuthState::AwaitingPassword {
                profile,
                remaining: self.max_attempts,
            },
            Err(e) => {
                warn!("Failed to load profile of '{}': {}", username, e);
                AuthState::Rejected(RejectReason::UnknownUser(username))
            }
        }
    }

    fn read_password(
        &self,
        profile: UserProfile,
        remaining: u32,
        ui: &mut dyn UserInterface,
    ) -> AuthState {
        let prompt = if remaining <= ATTEMPTS_WARNING_THRESHOLD && remaining < self.max_attempts {
            format!("Enter your password ({remaining} attempts left): ")
        } else {
            "Enter your password: ".to_string()
        };

        let Some(candidate) = ui.read_secret(&prompt) else {
            return AuthState::Rejected(RejectReason::InputClosed);
        };

        let accepted = !candidate.trim().is_empty()
            && self.cipher.matches(&candidate, &profile.encrypted_password);
        if accepted {
            return AuthState::Authenticated(profile);
        }

        ui.error("Incorrect password");
        ui.pause(self.retry_delay);

        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            AuthState::Rejected(RejectReason::AttemptsExhausted)
        } else {
            AuthState::AwaitingPassword { profile, remaining }
        }
    }

    /// Runs a whole login and updates the session on success.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: the session now holds the authenticated profile
    /// - `Err(Authentication)`: login rejected; the session is untouched
    pub fn login(&self, session: &mut Session, ui: &mut dyn UserInterface) -> Result<()> {
        let mut state = AuthState::AwaitingUsername;
        while !state.is_terminal() {
            state = self.step(state, ui);
        }

        match state {
            AuthState::Authenticated(profile) => {
                info!("User '{}' logged in", profile.username);
                session.login(profile);
                ui.info("Login successful.");
                Ok(())
            }
            AuthState::Rejected(reason) => {
                warn!("Login rejected: {:?}", reason);
                let message = reason.message();
                ui.error(&message);
                Err(AdviPortError::authentication(message))
            }
            _ => Err(AdviPortError::internal("login ended in a non-terminal state")),
        }
    }
}

/// Clears the session. Idempotent.
pub fn logout(session: &mut Session) -> LogoutOutcome {
    match session.logout() {
        Some(profile) => {
            info!("User '{}' logged out", profile.username);
            LogoutOutcome::LoggedOut
        }
        None => LogoutOutcome::AlreadyLoggedOut,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adviport_core::ui::ScriptedInterface;
    use adviport_infrastructure::{AesSecretCipher, FileSystemProfileStore};
    use tempfile::TempDir;

    fn flow(dir: &TempDir) -> AuthenticationFlow {
        let cipher: Arc<dyn SecretCipher> = Arc::new(AesSecretCipher::default());
        let store = FileSystemProfileStore::new(dir.path(), cipher.clone());
        store.create_profile("alice", "password1", "key-123").unwrap();
        AuthenticationFlow::new(Arc::new(store), cipher).with_retry_delay(Duration::ZERO)
    }

    #[test]
    fn test_login_success() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::new();
        let mut ui = ScriptedInterface::new(["alice", "password1"]);

        flow(&temp_dir).login(&mut session, &mut ui).unwrap();

        assert_eq!(session.username(), Some("alice"));
        assert_eq!(ui.infos(), &["Login successful."]);
    }

    #[test]
    fn test_login_succeeds_on_third_try() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::new();
        let mut ui = ScriptedInterface::new(["alice", "wrong1", "wrong2", "password1"]);

        flow(&temp_dir).login(&mut session, &mut ui).unwrap();

        assert!(session.is_logged_in());
        assert_eq!(ui.errors().iter().filter(|e| *e == "Incorrect password").count(), 2);
        assert_eq!(ui.pauses(), 2);
        assert_eq!(ui.prompts()[3], "Enter your password (3 attempts left): ");
    }

    #[test]
    fn test_five_failures_reject_without_touching_session() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::new();
        let mut ui = ScriptedInterface::new(["alice", "a", "b", "c", "d", "e", "password1"]);

        let err = flow(&temp_dir).login(&mut session, &mut ui).unwrap_err();

        assert!(err.is_authentication());
        assert!(!session.is_logged_in());
        assert_eq!(ui.remaining_inputs(), 1);
        assert!(ui.errors().last().unwrap().starts_with("Too many incorrect attempts"));
        assert_eq!(
            &ui.prompts()[1..],
            &[
                "Enter your password: ",
                "Enter your password: ",
                "Enter your password (3 attempts left): ",
                "Enter your password (2 attempts left): ",
                "Enter your password (1 attempts left): ",
            ]
        );
    }

    #[test]
    fn test_blank_password_consumes_an_attempt() {
        let temp_dir = TempDir::new().unwrap();
        let flow = flow(&temp_dir);
        let profile = UserProfile::new("alice", "x", "y");
        let mut ui = ScriptedInterface::new(["   "]);

        let next = flow.step(
            AuthState::AwaitingPassword {
                profile: profile.clone(),
                remaining: 5,
            },
            &mut ui,
        );
        assert_eq!(next, AuthState::AwaitingPassword { profile, remaining: 4 });
    }

    #[test]
    fn test_unknown_user_rejected_immediately() {
        let temp_dir = TempDir::new().unwrap();
        let mut ui = ScriptedInterface::new(["mallory", "password1"]);

        let state = flow(&temp_dir).step(AuthState::AwaitingUsername, &mut ui);

        assert_eq!(
            state,
            AuthState::Rejected(RejectReason::UnknownUser("mallory".to_string()))
        );
        assert_eq!(ui.remaining_inputs(), 1);
    }

    #[test]
    fn test_input_closed_rejects() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::new();
        let mut ui = ScriptedInterface::new(["alice"]);

        let err = flow(&temp_dir).login(&mut session, &mut ui).unwrap_err();
        assert!(err.is_authentication());
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_failed_login_keeps_existing_session() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::new();
        session.login(UserProfile::new("bob", "x", "y"));
        let mut ui = ScriptedInterface::new(["ghost"]);

        assert!(flow(&temp_dir).login(&mut session, &mut ui).is_err());
        assert_eq!(session.username(), Some("bob"));
    }

    #[test]
    fn test_terminal_states_do_not_advance() {
        let temp_dir = TempDir::new().unwrap();
        let mut ui = ScriptedInterface::new(["alice"]);
        let state = AuthState::Rejected(RejectReason::AttemptsExhausted);
        assert_eq!(flow(&temp_dir).step(state.clone(), &mut ui), state);
        assert_eq!(ui.remaining_inputs(), 1);
    }

    #[test]
    fn test_logout_is_idempotent() {
        let mut session = Session::new();
        session.login(UserProfile::new("alice", "x", "y"));

        assert_eq!(logout(&mut session), LogoutOutcome::LoggedOut);
        assert_eq!(logout(&mut session), LogoutOutcome::AlreadyLoggedOut);
        assert!(!session.is_logged_in());
        assert_eq!(LogoutOutcome::AlreadyLoggedOut.message(), "Already logged out.");
    }
}
