use async_trait::async_trait;
use palette_protocol::{CommandContext, PaletteResult};
use palette_search::SearchEngine;

/// Where a palette store gets its results from
#[async_trait]
pub trait PaletteSource: Send + Sync {
    async fn search(
        &self,
        query: &str,
        context: &CommandContext,
        limit: Option<usize>,
    ) -> anyhow::Result<Vec<PaletteResult>>;

    async fn initial_results(
        &self,
        context: &CommandContext,
        limit: Option<usize>,
    ) -> anyhow::Result<Vec<PaletteResult>>;
}

#[async_trait]
impl PaletteSource for SearchEngine {
    async fn search(
        &self,
        query: &str,
        context: &CommandContext,
        limit: Option<usize>,
    ) -> anyhow::Result<Vec<PaletteResult>> {
        Ok(self.run_palette_query(query, context, limit).await?)
    }

    async fn initial_results(
        &self,
        context: &CommandContext,
        limit: Option<usize>,
    ) -> anyhow::Result<Vec<PaletteResult>> {
        Ok(self.initial_palette_results(context, limit).await?)
    }
}
