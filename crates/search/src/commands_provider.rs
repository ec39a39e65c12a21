use crate::merge::compare_results;
use crate::scoring::score_candidates;
use async_trait::async_trait;
use palette_protocol::{CommandContext, PaletteResult, SearchRequest};
use palette_registry::{Command, CommandRegistry, PaletteProvider};
use std::sync::Arc;

pub const COMMANDS_PROVIDER_ID: &str = "commands";
pub const COMMANDS_PROVIDER_LABEL: &str = "Commands";
pub const COMMANDS_PROVIDER_PRIORITY: i32 = 100;

/// Exposes the command registry as a palette provider
pub struct CommandsProvider {
    commands: Arc<CommandRegistry>,
}

impl CommandsProvider {
    #[must_use]
    pub fn new(commands: Arc<CommandRegistry>) -> Self {
        Self { commands }
    }

    /// Guard-filter, score, sort and map the registered commands.
    ///
    /// An empty query keeps every visible command with score 0, which the
    /// title tie-break turns into alphabetical order.
    #[must_use]
    pub fn rank(
        &self,
        query: &str,
        context: &CommandContext,
        limit: Option<usize>,
    ) -> Vec<PaletteResult> {
        let mut results: Vec<PaletteResult> = self
            .commands
            .list_commands()
            .iter()
            .filter(|command| command.is_visible(context))
            .filter_map(|command| {
                score_candidates(query, command.candidates())
                    .map(|score| to_result(command, score))
            })
            .collect();

        results.sort_by(compare_results);
        if let Some(limit) = palette_protocol::effective_limit(limit) {
            results.truncate(limit);
        }

        log::debug!(
            "Commands provider: query='{}', {} results",
            query,
            results.len()
        );
        results
    }
}

fn to_result(command: &Command, score: f64) -> PaletteResult {
    let mut result = PaletteResult::new(
        command.id.clone(),
        command.title.clone(),
        COMMANDS_PROVIDER_LABEL,
        score,
    )
    .on_select(command.action().clone());

    if !command.keywords.is_empty() {
        result = result.subtitle(command.keywords.join(", "));
    }
    if let Some(shortcut) = &command.shortcut {
        result = result.shortcut(shortcut.clone());
    }
    result
}

#[async_trait]
impl PaletteProvider for CommandsProvider {
    fn id(&self) -> &str {
        COMMANDS_PROVIDER_ID
    }

    fn label(&self) -> &str {
        COMMANDS_PROVIDER_LABEL
    }

    fn priority(&self) -> i32 {
        COMMANDS_PROVIDER_PRIORITY
    }

    async fn search(&self, request: &SearchRequest) -> anyhow::Result<Vec<PaletteResult>> {
        Ok(self.rank(&request.query, &request.context, request.limit))
    }

    async fn initial_results(
        &self,
        context: &CommandContext,
    ) -> anyhow::Result<Vec<PaletteResult>> {
        Ok(self.rank("", context, None))
    }
}
