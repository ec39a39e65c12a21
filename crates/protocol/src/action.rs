use crate::CommandContext;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type ActionFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'static>>;

type Handler = dyn Fn(CommandContext) -> ActionFuture + Send + Sync;

/// Side-effecting handler run when a command executes or a result is selected.
///
/// Effects belong to whatever the handler captured; the context is passed by
/// value so async handlers can hold it across awaits.
#[derive(Clone)]
pub struct Action {
    handler: Arc<Handler>,
}

impl Action {
    /// Wrap an async handler
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(CommandContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            handler: Arc::new(move |ctx: CommandContext| -> ActionFuture {
                Box::pin(handler(ctx))
            }),
        }
    }

    /// Wrap a synchronous handler
    pub fn from_fn<F>(handler: F) -> Self
    where
        F: Fn(&CommandContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::new(move |ctx| std::future::ready(handler(&ctx)))
    }

    #[must_use]
    pub fn noop() -> Self {
        Self::from_fn(|_| Ok(()))
    }

    pub fn invoke(&self, context: CommandContext) -> ActionFuture {
        (self.handler)(context)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}
