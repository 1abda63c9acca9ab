//! Profile repository trait.

use super::model::UserProfile;
use crate::error::Result;

/// Durable storage of user profiles.
///
/// Implementations encrypt secrets on creation and write profiles
/// atomically: a failed write leaves the previous record intact.
pub trait ProfileRepository {
    /// Returns true iff exactly one stored record matches `username`.
    fn user_exists(&self, username: &str) -> bool;

    /// Loads the profile of `username`.
    ///
    /// # Returns
    ///
    /// - `Ok(UserProfile)`: the stored record
    /// - `Err(NotFound)`: no record for this user
    /// - `Err(DataAccess)`: more than one record matches
    fn get_profile(&self, username: &str) -> Result<UserProfile>;

    /// Registers a new user with plaintext secrets.
    ///
    /// Fails with a validation error for a blank or unsafe username, a blank
    /// API key, or an already registered username; with a security error if
    /// a secret cannot be encrypted.
    fn create_profile(&self, username: &str, password: &str, api_key: &str) -> Result<UserProfile>;

    /// Persists `profile`, replacing the previous record.
    fn write_profile(&self, profile: &UserProfile) -> Result<()>;
}
