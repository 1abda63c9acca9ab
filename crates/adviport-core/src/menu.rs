//! Main menu presentation.
//!
//! A base layout ([`Classic`] or [`Decorative`]) can be wrapped by
//! [`Descriptive`] and [`LoggedIn`]. Wrappers only change rendering; entry
//! numbers always equal the plugin's 1-based position in the candidate list
//! the resolver sees, even when an entry is hidden.

use crate::plugin::{AvailablePlugin, LOGIN_TOKEN};
use crate::session::Session;
use crate::user::MainPageStyle;

const CLASSIC_BANNER: &str = r"
 █████╗ ██████╗ ██╗   ██╗██╗██████╗  ██████╗ ██████╗ ████████╗
██╔══██╗██╔══██╗██║   ██║██║██╔══██╗██╔═══██╗██╔══██╗╚══██╔══╝
███████║██║  ██║██║   ██║██║██████╔╝██║   ██║██████╔╝   ██║
██╔══██║██║  ██║╚██╗ ██╔╝██║██╔═══╝ ██║   ██║██╔══██╗   ██║
██║  ██║██████╔╝ ╚████╔╝ ██║██║     ╚██████╔╝██║  ██║   ██║
╚═╝  ╚═╝╚═════╝   ╚═══╝  ╚═╝╚═╝      ╚═════╝ ╚═╝  ╚═╝   ╚═╝
______________________________________________________________";

const DECORATIVE_BANNER: &str = r"
    _       _       _ ___          _
   /_\   __| |_ __ (_) _ \___  _ _| |_
  / _ \ / _` \ V / | |  _/ _ \| '_|  _|
 /_/ \_\\__,_|\_/  |_|_| \___/|_|  \__|

               «« MAIN MENU »»
~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~";

/// One layer of the main page rendering.
pub trait MenuPresenter {
    /// Lines printed above the entries.
    fn header(&self) -> Vec<String>;

    /// Lines printed for one entry.
    fn entry_lines(&self, number: usize, plugin: &AvailablePlugin) -> Vec<String>;

    /// Lines printed below the entries; `width` is the widest entry line.
    fn footer(&self, width: usize) -> Vec<String>;

    /// Whether `plugin` gets rendered at all.
    fn includes(&self, _plugin: &AvailablePlugin) -> bool {
        true
    }

    /// Prefix of the selection prompt.
    fn prompt_prefix(&self) -> &str {
        ""
    }

    /// Renders the whole page.
    fn render(&self, plugins: &[AvailablePlugin]) -> String {
        let mut lines = self.header();
        let mut width = 0;
        for (idx, plugin) in plugins.iter().enumerate() {
            if !self.includes(plugin) {
                continue;
            }
            for line in self.entry_lines(idx + 1, plugin) {
                width = width.max(line.chars().count());
                lines.push(line);
            }
        }
        lines.extend(self.footer(width));
        lines.join("\n")
    }
}

/// Plain numbered list, `=` footer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classic;

impl MenuPresenter for Classic {
    fn header(&self) -> Vec<String> {
        CLASSIC_BANNER.lines().map(str::to_string).collect()
    }

    fn entry_lines(&self, number: usize, plugin: &AvailablePlugin) -> Vec<String> {
        vec![format!("{number}) {}", plugin.descriptor.name)]
    }

    fn footer(&self, width: usize) -> Vec<String> {
        vec!["=".repeat(width), String::new()]
    }
}

/// Alternate banner with `»» name ««` entries and a `~` footer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decorative;

impl MenuPresenter for Decorative {
    fn header(&self) -> Vec<String> {
        DECORATIVE_BANNER.lines().map(str::to_string).collect()
    }

    fn entry_lines(&self, number: usize, plugin: &AvailablePlugin) -> Vec<String> {
        vec![format!("{number} »» {} ««", plugin.descriptor.name)]
    }

    fn footer(&self, width: usize) -> Vec<String> {
        vec!["~".repeat(width), String::new()]
    }

    fn prompt_prefix(&self) -> &str {
        "»» "
    }
}

/// Adds each plugin's description under its entry.
pub struct Descriptive {
    inner: Box<dyn MenuPresenter>,
}

impl Descriptive {
    pub fn wrap(inner: Box<dyn MenuPresenter>) -> Self {
        Self { inner }
    }
}

impl MenuPresenter for Descriptive {
    fn header(&self) -> Vec<String> {
        self.inner.header()
    }

    fn entry_lines(&self, number: usize, plugin: &AvailablePlugin) -> Vec<String> {
        let mut lines = self.inner.entry_lines(number, plugin);
        lines.push(format!("   → {}", plugin.descriptor.description));
        lines
    }

    fn footer(&self, width: usize) -> Vec<String> {
        self.inner.footer(width)
    }

    fn includes(&self, plugin: &AvailablePlugin) -> bool {
        self.inner.includes(plugin)
    }

    fn prompt_prefix(&self) -> &str {
        self.inner.prompt_prefix()
    }
}

/// Greets the logged-in user and hides the login entry.
pub struct LoggedIn {
    inner: Box<dyn MenuPresenter>,
    username: String,
}

impl LoggedIn {
    pub fn wrap(inner: Box<dyn MenuPresenter>, username: impl Into<String>) -> Self {
        Self {
            inner,
            username: username.into(),
        }
    }
}

impl MenuPresenter for LoggedIn {
    fn header(&self) -> Vec<String> {
        let mut lines = self.inner.header();
        lines.push(format!("Welcome back, {}", self.username));
        lines.push(String::new());
        lines
    }

    fn entry_lines(&self, number: usize, plugin: &AvailablePlugin) -> Vec<String> {
        self.inner.entry_lines(number, plugin)
    }

    fn footer(&self, width: usize) -> Vec<String> {
        self.inner.footer(width)
    }

    fn includes(&self, plugin: &AvailablePlugin) -> bool {
        plugin.token != LOGIN_TOKEN && self.inner.includes(plugin)
    }

    fn prompt_prefix(&self) -> &str {
        self.inner.prompt_prefix()
    }
}

/// Style in effect: the user's choice, then the configured default, then classic.
pub fn effective_style(session: &Session, configured: Option<MainPageStyle>) -> MainPageStyle {
    session
        .current_user()
        .and_then(|profile| profile.main_page_style)
        .or(configured)
        .unwrap_or(MainPageStyle::Classic)
}

/// Builds the presenter chain for the current session.
pub fn presenter_for(
    session: &Session,
    configured: Option<MainPageStyle>,
) -> Box<dyn MenuPresenter> {
    let style = effective_style(session, configured);

    let mut presenter: Box<dyn MenuPresenter> = if style.is_decorative() {
        Box::new(Decorative)
    } else {
        Box::new(Classic)
    };
    if style.is_descriptive() {
        presenter = Box::new(Descriptive::wrap(presenter));
    }
    if let Some(username) = session.username() {
        presenter = Box::new(LoggedIn::wrap(presenter, username));
    }
    presenter
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::PluginDescriptor;
    use crate::user::UserProfile;

    fn plugin(token: &str, name: &str, description: &str) -> AvailablePlugin {
        AvailablePlugin {
            token: token.to_string(),
            descriptor: PluginDescriptor::new(name, description, &[]),
        }
    }

    fn plugins() -> Vec<AvailablePlugin> {
        vec![
            plugin("about", "About Application", "Prints information."),
            plugin("login", "Login to the application", "Logs in as user."),
            plugin("exit", "Exit Application", "Quits."),
        ]
    }

    #[test]
    fn test_classic_entries_and_footer() {
        let page = Classic.render(&plugins());
        assert!(page.contains("1) About Application\n"));
        assert!(page.contains("3) Exit Application\n"));
        let width = "2) Login to the application".chars().count();
        assert!(page.contains(&format!("\n{}\n", "=".repeat(width))));
    }

    #[test]
    fn test_decorative_entries() {
        let page = Decorative.render(&plugins());
        assert!(page.contains("1 »» About Application ««"));
        assert!(page.contains(&"~".repeat("2 »» Login to the application ««".chars().count())));
        assert_eq!(Decorative.prompt_prefix(), "»» ");
    }

    #[test]
    fn test_descriptive_appends_description() {
        let page = Descriptive::wrap(Box::new(Classic)).render(&plugins());
        assert!(page.contains("1) About Application\n   → Prints information."));
    }

    #[test]
    fn test_logged_in_hides_login_keeps_numbers() {
        let page = LoggedIn::wrap(Box::new(Classic), "alice").render(&plugins());
        assert!(page.contains("Welcome back, alice"));
        assert!(!page.contains("Login to the application"));
        assert!(page.contains("1) About Application"));
        assert!(page.contains("3) Exit Application"));
    }

    #[test]
    fn test_wrappers_delegate_prompt_prefix() {
        let chain = LoggedIn::wrap(Box::new(Descriptive::wrap(Box::new(Decorative))), "bob");
        assert_eq!(chain.prompt_prefix(), "»» ");
    }

    #[test]
    fn test_effective_style_precedence() {
        let mut session = Session::new();
        assert_eq!(effective_style(&session, None), MainPageStyle::Classic);
        assert_eq!(
            effective_style(&session, Some(MainPageStyle::Decorative)),
            MainPageStyle::Decorative
        );

        let mut profile = UserProfile::new("alice", "p", "k");
        profile.main_page_style = Some(MainPageStyle::Descriptive);
        session.login(profile);
        assert_eq!(
            effective_style(&session, Some(MainPageStyle::Decorative)),
            MainPageStyle::Descriptive
        );
    }

    #[test]
    fn test_presenter_for_logged_in_decorative_descriptive() {
        let mut session = Session::new();
        let mut profile = UserProfile::new("alice", "p", "k");
        profile.main_page_style = Some(MainPageStyle::DecorativeDescriptive);
        session.login(profile);

        let page = presenter_for(&session, None).render(&plugins());
        assert!(page.contains("Welcome back, alice"));
        assert!(page.contains("1 »» About Application ««\n   → Prints information."));
        assert!(!page.contains("Login to the application"));
    }
}
