use crate::error::{RegistryError, Result};
use crate::lock::{read, write};
use palette_protocol::{Action, CommandContext};
use std::fmt;
use std::sync::{Arc, RwLock};

/// Visibility predicate, re-evaluated on every search
pub type Guard = Arc<dyn Fn(&CommandContext) -> bool + Send + Sync>;

/// A statically registered, user-invokable action
#[derive(Clone)]
pub struct Command {
    /// Unique key
    pub id: String,

    /// Display and match text
    pub title: String,

    /// Extra match text; order is irrelevant
    pub keywords: Vec<String>,

    /// Display-only key hint
    pub shortcut: Option<String>,

    guard: Option<Guard>,
    run: Action,
}

impl Command {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, run: Action) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            keywords: Vec::new(),
            shortcut: None,
            guard: None,
            run,
        }
    }

    /// Builder: set keywords
    #[must_use]
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set shortcut
    #[must_use]
    pub fn shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    /// Builder: set guard
    #[must_use]
    pub fn guard<F>(mut self, guard: F) -> Self
    where
        F: Fn(&CommandContext) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Arc::new(guard));
        self
    }

    /// Commands without a guard are always visible
    #[must_use]
    pub fn is_visible(&self, context: &CommandContext) -> bool {
        self.guard.as_ref().map_or(true, |guard| guard(context))
    }

    #[must_use]
    pub const fn action(&self) -> &Action {
        &self.run
    }

    /// Title followed by keywords
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str()).chain(self.keywords.iter().map(String::as_str))
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("keywords", &self.keywords)
            .field("shortcut", &self.shortcut)
            .field("guarded", &self.guard.is_some())
            .finish_non_exhaustive()
    }
}

/// Insertion-ordered command table keyed by id
#[derive(Default)]
pub struct CommandRegistry {
    commands: RwLock<Vec<Arc<Command>>>,
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. A duplicate id is rejected and leaves the
    /// existing registration untouched.
    pub fn register_command(&self, command: Command) -> Result<()> {
        let mut commands = write(&self.commands);
        if commands.iter().any(|existing| existing.id == command.id) {
            return Err(RegistryError::DuplicateCommand(command.id));
        }
        log::debug!("Registered command '{}'", command.id);
        commands.push(Arc::new(command));
        Ok(())
    }

    /// Snapshot of every command in registration order
    #[must_use]
    pub fn list_commands(&self) -> Vec<Arc<Command>> {
        read(&self.commands).clone()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<Command>> {
        read(&self.commands)
            .iter()
            .find(|command| command.id == id)
            .cloned()
    }

    /// Test-only reset
    pub fn clear_commands(&self) {
        write(&self.commands).clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        read(&self.commands).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        read(&self.commands).is_empty()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("len", &self.len())
            .finish()
    }
}
