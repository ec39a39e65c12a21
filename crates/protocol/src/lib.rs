//! Shared types exchanged between the palette UI layer and the search core.
//!
//! The UI supplies a [`CommandContext`] with every query and renders the
//! [`PaletteResult`] rows it gets back. Selecting a row invokes its
//! [`Action`]; the core itself never runs actions.

use serde::{Deserialize, Serialize};

mod action;

pub use action::{Action, ActionFuture};

/// Situational data used for guard and availability checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandContext {
    /// Current application route, e.g. `/team/eng/issues`
    pub route: String,

    /// Entity currently selected in the UI, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Selection>,

    /// Signed-in user
    pub user: User,
}

impl CommandContext {
    #[must_use]
    pub fn new(route: impl Into<String>, user: User) -> Self {
        Self {
            route: route.into(),
            selection: None,
            user,
        }
    }

    /// Builder: set selection
    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Entity type (`issue`, `project`, `team`, ...)
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl Selection {
    #[must_use]
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub role: String,
}

impl User {
    #[must_use]
    pub fn new(id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
        }
    }
}

/// Arguments passed to a provider search.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub query: String,
    pub context: CommandContext,
    pub limit: Option<usize>,
}

impl SearchRequest {
    #[must_use]
    pub fn new(query: impl Into<String>, context: CommandContext) -> Self {
        Self {
            query: query.into(),
            context,
            limit: None,
        }
    }

    /// Builder: set result limit
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Limit to apply, if any. Zero means "no limit".
    #[must_use]
    pub fn effective_limit(&self) -> Option<usize> {
        effective_limit(self.limit)
    }
}

/// Normalize a caller-supplied limit: `Some(0)` is treated as absent.
#[must_use]
pub fn effective_limit(limit: Option<usize>) -> Option<usize> {
    limit.filter(|&n| n > 0)
}

/// One row shown in the palette.
#[derive(Debug, Clone)]
pub struct PaletteResult {
    pub id: String,
    pub title: String,

    /// Group label rendered above the row (usually the provider label)
    pub group: String,
    pub subtitle: Option<String>,
    pub icon: Option<String>,
    pub shortcut: Option<String>,

    /// Relevance, higher is better. No fixed bound.
    pub score: f64,

    /// Invoked by the UI when the row is activated
    pub on_select: Action,
}

impl PaletteResult {
    /// Create a result whose selection does nothing
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        group: impl Into<String>,
        score: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            group: group.into(),
            subtitle: None,
            icon: None,
            shortcut: None,
            score,
            on_select: Action::noop(),
        }
    }

    #[must_use]
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    #[must_use]
    pub fn on_select(mut self, action: Action) -> Self {
        self.on_select = action;
        self
    }
}
