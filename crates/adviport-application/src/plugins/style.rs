use std::sync::Arc;

use adviport_core::error::Result;
use adviport_core::plugin::{Plugin, PluginContext, PluginDescriptor};
use adviport_core::session::Session;

use super::{PluginServices, catalog_descriptor, ensure_logged_in, update_current};

/// Moves the user's main page to the next style.
pub struct ChangeStylePlugin {
    services: Arc<PluginServices>,
}

impl ChangeStylePlugin {
    pub fn new(services: Arc<PluginServices>) -> Self {
        Self { services }
    }
}

impl Plugin for ChangeStylePlugin {
    fn token(&self) -> &str {
        "change_style"
    }

    fn descriptor(&self, _session: &Session) -> PluginDescriptor {
        catalog_descriptor(self.token())
    }

    fn invoke(&self, ctx: &mut PluginContext<'_>) -> Result<()> {
        ensure_logged_in(&self.services, ctx)?;
        let style = update_current(&self.services, ctx.session, |profile| {
            profile.cycle_main_page_style()
        })?;
        ctx.ui.info(&format!("The main page style is now \"{style}\"."));
        Ok(())
    }
}
