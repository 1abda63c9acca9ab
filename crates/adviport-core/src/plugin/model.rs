//! Plugin descriptors and capability tags.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Visibility tag of a plugin relative to the login state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    /// Shown only while a user is logged in.
    RequiresLogin,
    /// Shown only while nobody is logged in.
    LoggedOutOnly,
    /// Always shown.
    Unrestricted,
}

/// How a plugin presents itself in the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Display name. Its first word is what users type to select it.
    pub name: String,
    pub description: String,
    pub capabilities: Vec<Capability>,
}

impl PluginDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        capabilities: &[Capability],
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            capabilities: capabilities.to_vec(),
        }
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Whether the plugin belongs in the menu for the given login state.
    ///
    /// A plugin tagged both `RequiresLogin` and `LoggedOutOnly` is visible in
    /// either state.
    pub fn is_visible(&self, logged_in: bool) -> bool {
        match (self.has(Capability::RequiresLogin), self.has(Capability::LoggedOutOnly)) {
            (true, true) | (false, false) => true,
            (true, false) => logged_in,
            (false, true) => !logged_in,
        }
    }

    /// Lower-cased first word of the name, used for text selection.
    pub fn selection_key(&self) -> String {
        self.name
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Capability::*;

    #[test]
    fn test_visibility_matrix() {
        let login_only = PluginDescriptor::new("Logout", "", &[RequiresLogin]);
        let logged_out = PluginDescriptor::new("Login", "", &[LoggedOutOnly]);
        let both = PluginDescriptor::new("About", "", &[RequiresLogin, LoggedOutOnly]);
        let open = PluginDescriptor::new("Help", "", &[Unrestricted]);

        assert!(login_only.is_visible(true));
        assert!(!login_only.is_visible(false));
        assert!(!logged_out.is_visible(true));
        assert!(logged_out.is_visible(false));
        assert!(both.is_visible(true) && both.is_visible(false));
        assert!(open.is_visible(true) && open.is_visible(false));
    }

    #[test]
    fn test_selection_key_is_first_word() {
        let descriptor = PluginDescriptor::new("Search for a flight", "", &[]);
        assert_eq!(descriptor.selection_key(), "search");
        assert_eq!(PluginDescriptor::new("", "", &[]).selection_key(), "");
    }
}
