use crate::commands_provider::CommandsProvider;
use crate::error::Result;
use palette_registry::{CommandRegistry, ProviderRegistry};
use std::sync::Arc;

/// Register the built-in providers exactly once per provider registry.
///
/// Returns `true` when this call performed the registration and `false` when
/// an earlier call already had. Safe to call on every app start or reload.
pub fn initialize_palette_providers(
    providers: &ProviderRegistry,
    commands: Arc<CommandRegistry>,
) -> Result<bool> {
    if !providers.begin_bootstrap() {
        log::debug!("Palette providers already initialized");
        return Ok(false);
    }

    if let Err(err) = providers.register_provider(Arc::new(CommandsProvider::new(commands))) {
        providers.abort_bootstrap();
        return Err(err.into());
    }

    log::info!("Palette providers initialized ({} registered)", providers.len());
    Ok(true)
}
