use std::sync::Arc;

use adviport_core::error::{AdviPortError, Result};
use adviport_core::plugin::{Plugin, PluginContext, PluginDescriptor};
use adviport_core::session::Session;
use tracing::{debug, warn};

use super::{
    PluginServices, api_key, catalog_descriptor, current_user, ensure_logged_in, update_current,
};

const ADD_FAILED: &str = "Selected airport could not be added to favourite airports. \
    Try checking you have entered an existing ICAO airport code.";

/// Bookmarks an airport in the logged-in user's profile.
pub struct AddFavouritePlugin {
    services: Arc<PluginServices>,
}

impl AddFavouritePlugin {
    pub fn new(services: Arc<PluginServices>) -> Self {
        Self { services }
    }
}

impl Plugin for AddFavouritePlugin {
    fn token(&self) -> &str {
        "add_favourite"
    }

    fn descriptor(&self, _session: &Session) -> PluginDescriptor {
        catalog_descriptor(self.token())
    }

    fn invoke(&self, ctx: &mut PluginContext<'_>) -> Result<()> {
        ensure_logged_in(&self.services, ctx)?;
        let username = current_user(ctx.session)?.username.clone();

        let Some(icao) = ctx.ui.read_line(&format!(
            "{username}, please enter the ICAO code of your favourite airport: "
        )) else {
            return Ok(());
        };
        if icao.is_empty() {
            return Ok(());
        }

        if current_user(ctx.session)?.has_favourite(&icao) {
            ctx.ui.info("This airport is already marked as favourite.");
            return Ok(());
        }

        let key = api_key(&self.services, ctx.session)?;
        let airport = match self.services.provider.airport_by_icao(&key, &icao) {
            Ok(airport) => airport,
            Err(e) => {
                warn!("Airport lookup for '{}' failed: {}", icao, e);
                ctx.ui.error(ADD_FAILED);
                return Err(e);
            }
        };

        let name = airport.display_name().to_string();
        update_current(&self.services, ctx.session, |profile| {
            profile.add_favourite(&icao, airport)
        })?;
        debug!("Added favourite airport '{}' for '{}'", icao, username);
        ctx.ui.info(&format!("{name} was added to your favourite airports."));
        Ok(())
    }
}

pub struct RemoveFavouritePlugin {
    services: Arc<PluginServices>,
}

impl RemoveFavouritePlugin {
    pub fn new(services: Arc<PluginServices>) -> Self {
        Self { services }
    }
}

impl Plugin for RemoveFavouritePlugin {
    fn token(&self) -> &str {
        "remove_favourite"
    }

    fn descriptor(&self, _session: &Session) -> PluginDescriptor {
        catalog_descriptor(self.token())
    }

    fn invoke(&self, ctx: &mut PluginContext<'_>) -> Result<()> {
        ensure_logged_in(&self.services, ctx)?;
        let username = current_user(ctx.session)?.username.clone();

        let prompt = format!(
            "{username}, please enter the ICAO code of the airport \
             you want to remove from favourites: "
        );
        let icao = ctx.ui.read_line(&prompt).unwrap_or_default();

        if !current_user(ctx.session)?.has_favourite(&icao) {
            ctx.ui.error(&format!(
                "Airport with ICAO code \"{icao}\" could not be removed successfully. \
                 Please make sure you entered a correct ICAO code."
            ));
            return Err(AdviPortError::not_found("favourite airport", icao));
        }

        update_current(&self.services, ctx.session, |profile| profile.remove_favourite(&icao))?;
        debug!("Removed favourite airport '{}' for '{}'", icao, username);
        Ok(())
    }
}
