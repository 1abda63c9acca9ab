//! Built-in plugins.
//!
//! Every plugin gets the same [`PluginServices`] bundle. Plugins that need a
//! logged-in user call [`ensure_logged_in`] first, which runs the login flow
//! when nobody is logged in yet.

mod about;
mod account;
mod favourites;
mod info;
pub mod render;
mod style;

pub use about::{AboutPlugin, ExitPlugin};
pub use account::{LoginPlugin, LogoutPlugin, RegisterPlugin};
pub use favourites::{AddFavouritePlugin, RemoveFavouritePlugin};
pub use info::{AirportInfoPlugin, PrintSchedulePlugin, SearchFlightPlugin};
pub use style::ChangeStylePlugin;

use std::path::PathBuf;
use std::sync::Arc;

use adviport_core::aviation::InfoProvider;
use adviport_core::error::{AdviPortError, Result};
use adviport_core::plugin::{PluginContext, PluginDescriptor, PluginRegistry, find_builtin_plugin};
use adviport_core::secret::{ApiKey, SecretCipher};
use adviport_core::session::Session;
use adviport_core::user::{ProfileRepository, UserProfile};

use crate::auth::AuthenticationFlow;

/// Collaborators shared by all built-in plugins.
pub struct PluginServices {
    pub profiles: Arc<dyn ProfileRepository>,
    pub cipher: Arc<dyn SecretCipher>,
    pub provider: Arc<dyn InfoProvider>,
    pub auth: AuthenticationFlow,
    /// Text file shown by the about plugin; built-in text when `None`.
    pub about_file: Option<PathBuf>,
}

/// Registry holding every built-in plugin.
pub fn default_registry(services: Arc<PluginServices>) -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    registry.register(Box::new(AboutPlugin::new(services.clone())));
    registry.register(Box::new(ExitPlugin));
    registry.register(Box::new(RegisterPlugin::new(services.clone())));
    registry.register(Box::new(LoginPlugin::new(services.clone())));
    registry.register(Box::new(LogoutPlugin));
    registry.register(Box::new(AddFavouritePlugin::new(services.clone())));
    registry.register(Box::new(RemoveFavouritePlugin::new(services.clone())));
    registry.register(Box::new(PrintSchedulePlugin::new(services.clone())));
    registry.register(Box::new(SearchFlightPlugin::new(services.clone())));
    registry.register(Box::new(AirportInfoPlugin::new(services.clone())));
    registry.register(Box::new(ChangeStylePlugin::new(services)));
    registry
}

/// Catalog descriptor of a built-in token.
pub(crate) fn catalog_descriptor(token: &str) -> PluginDescriptor {
    find_builtin_plugin(token)
        .map(|plugin| plugin.descriptor())
        .unwrap_or_else(|| PluginDescriptor::new(token, "", &[]))
}

/// Logs the user in first if nobody is logged in.
pub(crate) fn ensure_logged_in(
    services: &PluginServices,
    ctx: &mut PluginContext<'_>,
) -> Result<()> {
    if ctx.session.is_logged_in() {
        return Ok(());
    }
    ctx.ui.info("Please log in to your account first");
    services.auth.login(ctx.session, ctx.ui)
}

pub(crate) fn current_user(session: &Session) -> Result<&UserProfile> {
    session
        .current_user()
        .ok_or_else(|| AdviPortError::authentication("No user is logged in"))
}

pub(crate) fn current_user_mut(session: &mut Session) -> Result<&mut UserProfile> {
    session
        .current_user_mut()
        .ok_or_else(|| AdviPortError::authentication("No user is logged in"))
}

/// Decrypts the logged-in user's provider key.
pub(crate) fn api_key(services: &PluginServices, session: &Session) -> Result<ApiKey> {
    let profile = current_user(session)?;
    services
        .cipher
        .decrypt(&profile.encrypted_api_key)
        .map(ApiKey::new)
        .ok_or_else(|| AdviPortError::security("The stored API key could not be decrypted"))
}

/// Applies `edit` to a copy of the logged-in profile and writes it.
///
/// The session only takes the edited profile once the write succeeded, so
/// its cached profile never gets ahead of the stored record.
pub(crate) fn update_current<R>(
    services: &PluginServices,
    session: &mut Session,
    edit: impl FnOnce(&mut UserProfile) -> R,
) -> Result<R> {
    let mut updated = current_user(session)?.clone();
    let outcome = edit(&mut updated);
    services.profiles.write_profile(&updated)?;
    *current_user_mut(session)? = updated;
    Ok(outcome)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use adviport_core::secret::SecretCipher;
    use adviport_infrastructure::{AesSecretCipher, FileSystemProfileStore, MockInfoProvider};
    use std::time::Duration;
    use tempfile::TempDir;

    pub struct Fixture {
        pub dir: TempDir,
        pub services: Arc<PluginServices>,
        pub store: Arc<FileSystemProfileStore>,
    }

    impl Fixture {
        /// Services over a temporary profiles directory holding user `alice`
        /// (password `password1`).
        pub fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let cipher: Arc<dyn SecretCipher> = Arc::new(AesSecretCipher::default());
            let store = Arc::new(FileSystemProfileStore::new(dir.path(), cipher.clone()));
            store.create_profile("alice", "password1", "rapid-key").unwrap();

            let auth = AuthenticationFlow::new(store.clone(), cipher.clone())
                .with_retry_delay(Duration::ZERO);
            let services = Arc::new(PluginServices {
                profiles: store.clone(),
                cipher,
                provider: Arc::new(MockInfoProvider::new()),
                auth,
                about_file: None,
            });
            Self { dir, services, store }
        }

        /// Same services, but every profile write fails.
        pub fn with_failing_writes() -> Self {
            let mut fixture = Self::new();
            let services = Arc::get_mut(&mut fixture.services).unwrap();
            services.profiles = Arc::new(ReadOnlyStore(fixture.store.clone()));
            fixture
        }

        /// A session already logged in as `alice`.
        pub fn logged_in(&self) -> Session {
            let mut session = Session::new();
            session.login(self.store.get_profile("alice").unwrap());
            session
        }
    }

    /// Reads from the wrapped store and refuses every write.
    struct ReadOnlyStore(Arc<FileSystemProfileStore>);

    impl ProfileRepository for ReadOnlyStore {
        fn user_exists(&self, username: &str) -> bool {
            self.0.user_exists(username)
        }

        fn get_profile(&self, username: &str) -> Result<UserProfile> {
            self.0.get_profile(username)
        }

        fn create_profile(
            &self,
            username: &str,
            password: &str,
            api_key: &str,
        ) -> Result<UserProfile> {
            self.0.create_profile(username, password, api_key)
        }

        fn write_profile(&self, _profile: &UserProfile) -> Result<()> {
            Err(AdviPortError::io("disk full"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::Fixture;
    use super::*;
    use adviport_core::plugin::default_plugin_tokens;

    #[test]
    fn test_default_registry_covers_catalog() {
        let fixture = Fixture::new();
        let registry = default_registry(fixture.services.clone());
        for token in default_plugin_tokens() {
            assert!(registry.get(&token).is_some(), "missing plugin {token}");
        }
    }

    #[test]
    fn test_api_key_decrypts_for_current_user() {
        let fixture = Fixture::new();
        let session = fixture.logged_in();
        assert_eq!(api_key(&fixture.services, &session).unwrap().expose(), "rapid-key");
        assert!(api_key(&fixture.services, &Session::new()).is_err());
    }
}
