use palette_protocol::PaletteResult;
use std::cmp::Ordering;

/// Results returned by one provider, tagged with its priority
#[derive(Debug, Clone)]
pub struct ProviderBatch {
    pub provider_id: String,
    pub priority: i32,
    pub results: Vec<PaletteResult>,
}

impl ProviderBatch {
    #[must_use]
    pub fn new(provider_id: impl Into<String>, priority: i32, results: Vec<PaletteResult>) -> Self {
        Self {
            provider_id: provider_id.into(),
            priority,
            results,
        }
    }
}

/// Score desc, then title asc
#[must_use]
pub fn compare_results(a: &PaletteResult, b: &PaletteResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.title.cmp(&b.title))
}

/// Score desc, then provider priority desc, then title asc
fn compare_ranked(a: &(i32, PaletteResult), b: &(i32, PaletteResult)) -> Ordering {
    b.1.score
        .total_cmp(&a.1.score)
        .then_with(|| b.0.cmp(&a.0))
        .then_with(|| a.1.title.cmp(&b.1.title))
}

/// Merge per-provider batches into one globally ordered list.
///
/// Each batch is cut to its best `per_provider_cap` results (by score, stable)
/// before merging; the merged list is cut to `limit` when given.
#[must_use]
pub fn merge_batches(
    batches: Vec<ProviderBatch>,
    per_provider_cap: usize,
    limit: Option<usize>,
) -> Vec<PaletteResult> {
    let mut ranked: Vec<(i32, PaletteResult)> = Vec::new();

    for batch in batches {
        let mut results = batch.results;
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        if results.len() > per_provider_cap {
            log::debug!(
                "Provider '{}' returned {} results, keeping {}",
                batch.provider_id,
                results.len(),
                per_provider_cap
            );
            results.truncate(per_provider_cap);
        }
        ranked.extend(results.into_iter().map(|result| (batch.priority, result)));
    }

    ranked.sort_by(compare_ranked);
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }

    ranked.into_iter().map(|(_, result)| result).collect()
}
