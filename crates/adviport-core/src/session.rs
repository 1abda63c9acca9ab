//! Session domain model.
//!
//! The session is an explicit value owned by the REPL loop and lent by
//! `&mut` to whichever operation needs the current identity. It caches the
//! logged-in profile; edits are persisted explicitly through a
//! [`ProfileRepository`](crate::user::ProfileRepository).

use chrono::{DateTime, Local};

use crate::user::UserProfile;

/// Holder of at most one authenticated identity.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Option<UserProfile>,
    logged_in_at: Option<DateTime<Local>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `profile` the authenticated identity, replacing any previous one.
    pub fn login(&mut self, profile: UserProfile) {
        self.current = Some(profile);
        self.logged_in_at = Some(Local::now());
    }

    /// Clears the authenticated identity.
    ///
    /// # Returns
    ///
    /// The profile that was logged in, or `None` if the session was empty.
    pub fn logout(&mut self) -> Option<UserProfile> {
        self.logged_in_at = None;
        self.current.take()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.current.as_ref()
    }

    pub fn current_user_mut(&mut self) -> Option<&mut UserProfile> {
        self.current.as_mut()
    }

    pub fn username(&self) -> Option<&str> {
        self.current.as_ref().map(|profile| profile.username.as_str())
    }

    /// When the current user logged in.
    pub fn logged_in_at(&self) -> Option<DateTime<Local>> {
        self.logged_in_at
    }
}
