//! # Palette Search
//!
//! Ranking and fan-out for the command palette.
//!
//! ```text
//! query ──> SearchEngine ──┬──> CommandsProvider ──> score_candidates
//!                          ├──> other providers
//!                          └──> merge (score ↓, priority ↓, title ↑)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use palette_protocol::{Action, CommandContext, User};
//! use palette_registry::{Command, CommandRegistry, ProviderRegistry};
//! use palette_search::{initialize_palette_providers, SearchEngine};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let commands = Arc::new(CommandRegistry::new());
//!     commands.register_command(Command::new("issue.create", "Create issue", Action::noop()))?;
//!
//!     let providers = Arc::new(ProviderRegistry::new());
//!     initialize_palette_providers(&providers, commands)?;
//!
//!     let engine = SearchEngine::new(providers);
//!     let context = CommandContext::new("/issues", User::new("u1", "member"));
//!     for result in engine.run_palette_query("create", &context, Some(10)).await? {
//!         println!("{} ({:.0})", result.title, result.score);
//!     }
//!     Ok(())
//! }
//! ```

mod bootstrap;
mod commands_provider;
mod config;
mod engine;
mod error;
mod merge;
mod scoring;

pub use bootstrap::initialize_palette_providers;
pub use commands_provider::{
    CommandsProvider, COMMANDS_PROVIDER_ID, COMMANDS_PROVIDER_LABEL, COMMANDS_PROVIDER_PRIORITY,
};
pub use config::{PaletteConfig, DEFAULT_PROVIDER_CAP, PROVIDER_CAP_ENV, PROVIDER_TIMEOUT_ENV};
pub use engine::SearchEngine;
pub use error::{Result, SearchError};
pub use merge::{compare_results, merge_batches, ProviderBatch};
pub use scoring::{
    normalize_query, score_candidate, score_candidates, EXACT_SCORE, PREFIX_BASE, SUBSEQUENCE_BASE,
    SUBSTRING_BASE,
};
