use crate::config::PaletteConfig;
use crate::error::{Result, SearchError};
use crate::merge::{merge_batches, ProviderBatch};
use anyhow::anyhow;
use palette_protocol::{effective_limit, CommandContext, PaletteResult, SearchRequest};
use palette_registry::{PaletteProvider, ProviderRegistry};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fetch {
    Search,
    Initial,
}

/// Fans a query out to every available provider and merges the answers.
///
/// Providers run concurrently as tasks on the caller's runtime and the engine
/// waits for all of them. A provider that errors, panics or misses the
/// configured deadline contributes nothing; the query itself still succeeds.
#[derive(Clone)]
pub struct SearchEngine {
    providers: Arc<ProviderRegistry>,
    config: PaletteConfig,
}

impl SearchEngine {
    #[must_use]
    pub fn new(providers: Arc<ProviderRegistry>) -> Self {
        Self::with_config(providers, PaletteConfig::default())
    }

    #[must_use]
    pub const fn with_config(providers: Arc<ProviderRegistry>, config: PaletteConfig) -> Self {
        Self { providers, config }
    }

    /// Search every available provider.
    ///
    /// `limit` caps each provider before merging and the merged list after;
    /// without it providers are capped at `config.provider_cap` and the merged
    /// list is returned whole.
    pub async fn run_palette_query(
        &self,
        query: &str,
        context: &CommandContext,
        limit: Option<usize>,
    ) -> Result<Vec<PaletteResult>> {
        self.fan_out(Fetch::Search, query, context, limit).await
    }

    /// Collect initial results (palette opened, empty query) from every
    /// available provider.
    pub async fn initial_palette_results(
        &self,
        context: &CommandContext,
        limit: Option<usize>,
    ) -> Result<Vec<PaletteResult>> {
        self.fan_out(Fetch::Initial, "", context, limit).await
    }

    async fn fan_out(
        &self,
        fetch: Fetch,
        query: &str,
        context: &CommandContext,
        limit: Option<usize>,
    ) -> Result<Vec<PaletteResult>> {
        let providers = self.providers.available_providers(context);
        if providers.is_empty() {
            log::debug!("No palette providers available for route '{}'", context.route);
            return Ok(Vec::new());
        }

        let limit = effective_limit(limit);
        let per_provider_cap = limit.unwrap_or(self.config.provider_cap);
        let request = Arc::new(SearchRequest {
            query: query.to_string(),
            context: context.clone(),
            limit,
        });

        log::debug!(
            "Palette {:?}: query='{}', providers={}, limit={:?}",
            fetch,
            query,
            providers.len(),
            limit
        );
        let started = Instant::now();

        let mut tasks = JoinSet::new();
        for (slot, provider) in providers.iter().enumerate() {
            let provider = Arc::clone(provider);
            let request = Arc::clone(&request);
            let timeout = self.config.provider_timeout;
            tasks.spawn(async move {
                let outcome = call_provider(provider.as_ref(), &request, fetch, timeout).await;
                (slot, outcome)
            });
        }

        let mut collected: Vec<Vec<PaletteResult>> =
            providers.iter().map(|_| Vec::new()).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((slot, Ok(results))) => collected[slot] = results,
                Ok((slot, Err(err))) => {
                    log::warn!(
                        "Palette provider '{}' failed: {err:#}",
                        providers[slot].id()
                    );
                }
                Err(err) if err.is_panic() => {
                    log::warn!("Palette provider panicked, dropping its results: {err}");
                }
                Err(err) => return Err(SearchError::Join(err.to_string())),
            }
        }

        let batches = providers
            .iter()
            .zip(collected)
            .map(|(provider, results)| {
                ProviderBatch::new(provider.id(), provider.priority(), results)
            })
            .collect();
        let merged = merge_batches(batches, per_provider_cap, limit);

        log::debug!(
            "Palette {:?} completed: {} results in {:?}",
            fetch,
            merged.len(),
            started.elapsed()
        );
        Ok(merged)
    }
}

async fn call_provider(
    provider: &dyn PaletteProvider,
    request: &SearchRequest,
    fetch: Fetch,
    timeout: Option<Duration>,
) -> anyhow::Result<Vec<PaletteResult>> {
    let call = async {
        match fetch {
            Fetch::Search => provider.search(request).await,
            Fetch::Initial => provider.initial_results(&request.context).await,
        }
    };

    match timeout {
        Some(deadline) => tokio::time::timeout(deadline, call)
            .await
            .map_err(|_| anyhow!("timed out after {}ms", deadline.as_millis()))?,
        None => call.await,
    }
}
