use crate::error::{RegistryError, Result};
use crate::lock::{read, write};
use async_trait::async_trait;
use palette_protocol::{CommandContext, PaletteResult, SearchRequest};
use std::cmp::Reverse;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// A pluggable source of palette results.
///
/// Providers are user code: failures are reported through `anyhow` and the
/// search engine isolates them from every other provider.
#[async_trait]
pub trait PaletteProvider: Send + Sync {
    fn id(&self) -> &str;

    fn label(&self) -> &str;

    /// Higher sorts first when scores tie
    fn priority(&self) -> i32 {
        0
    }

    fn is_available(&self, _context: &CommandContext) -> bool {
        true
    }

    async fn search(&self, request: &SearchRequest) -> anyhow::Result<Vec<PaletteResult>>;

    /// Results shown when the palette opens with an empty query.
    /// Providers without a meaningful initial list contribute nothing.
    async fn initial_results(
        &self,
        _context: &CommandContext,
    ) -> anyhow::Result<Vec<PaletteResult>> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
pub struct ProviderRegistry {
    providers: RwLock<Vec<Arc<dyn PaletteProvider>>>,
    bootstrapped: AtomicBool,
}

impl ProviderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_provider(&self, provider: Arc<dyn PaletteProvider>) -> Result<()> {
        let mut providers = write(&self.providers);
        if providers.iter().any(|existing| existing.id() == provider.id()) {
            return Err(RegistryError::DuplicateProvider(provider.id().to_string()));
        }
        log::info!(
            "Registered palette provider '{}' (priority {})",
            provider.id(),
            provider.priority()
        );
        providers.push(provider);
        Ok(())
    }

    /// Snapshot sorted by priority descending; equal priorities keep
    /// registration order.
    #[must_use]
    pub fn list_providers(&self) -> Vec<Arc<dyn PaletteProvider>> {
        let mut providers = read(&self.providers).clone();
        providers.sort_by_key(|provider| Reverse(provider.priority()));
        providers
    }

    #[must_use]
    pub fn available_providers(&self, context: &CommandContext) -> Vec<Arc<dyn PaletteProvider>> {
        self.list_providers()
            .into_iter()
            .filter(|provider| provider.is_available(context))
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<dyn PaletteProvider>> {
        read(&self.providers)
            .iter()
            .find(|provider| provider.id() == id)
            .cloned()
    }

    /// Test-only reset. Also clears the bootstrap flag.
    pub fn clear_providers(&self) {
        write(&self.providers).clear();
        self.bootstrapped.store(false, Ordering::SeqCst);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        read(&self.providers).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        read(&self.providers).is_empty()
    }

    #[must_use]
    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped.load(Ordering::SeqCst)
    }

    /// Claim the one-time bootstrap. Returns `false` if it was already claimed.
    pub fn begin_bootstrap(&self) -> bool {
        self.bootstrapped
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Release a claim whose registration failed so a later call can retry.
    pub fn abort_bootstrap(&self) {
        self.bootstrapped.store(false, Ordering::SeqCst);
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = read(&self.providers)
            .iter()
            .map(|provider| provider.id().to_string())
            .collect();
        f.debug_struct("ProviderRegistry")
            .field("providers", &ids)
            .field("bootstrapped", &self.is_bootstrapped())
            .finish()
    }
}
