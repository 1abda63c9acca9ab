//! AdviPort application layer.
//!
//! Authentication flow and the built-in plugins, written against the
//! traits in `adviport-core` so they run the same against a terminal or a
//! scripted interface.

pub mod auth;
pub mod plugins;
pub mod repl;

pub use auth::{AuthState, AuthenticationFlow, LogoutOutcome, RejectReason, logout};
pub use plugins::{PluginServices, default_registry};
pub use repl::{MainMenu, Turn};
