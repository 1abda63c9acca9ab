//! Airport and flight data providers.

mod aerodatabox;
mod mock;

pub use aerodatabox::{AeroDataBoxProvider, DEFAULT_BASE_URL};
pub use mock::MockInfoProvider;

use adviport_core::aviation::InfoProvider;
use adviport_core::config::ProviderKind;
use adviport_core::error::Result;

/// Instantiates the configured provider.
pub fn build_provider(kind: ProviderKind) -> Result<Box<dyn InfoProvider>> {
    Ok(match kind {
        ProviderKind::Mock => Box::new(MockInfoProvider::new()),
        ProviderKind::AeroDataBox => Box::new(AeroDataBoxProvider::new()?),
    })
}
