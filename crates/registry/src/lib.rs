//! # Palette Registry
//!
//! Explicit, shareable registries for palette commands and result providers.
//!
//! Both registries are plain objects owned by the application and passed by
//! `Arc` to whatever needs them, so tests can build a fresh instance each time.
//! Registration is append-only and rejects duplicate ids; readers always get a
//! snapshot, never a live view, so registering while a query is in flight is safe.
//!
//! ```
//! use palette_protocol::Action;
//! use palette_registry::{Command, CommandRegistry};
//!
//! let registry = CommandRegistry::new();
//! registry
//!     .register_command(Command::new("issue.create", "Create issue", Action::noop()))
//!     .unwrap();
//! assert!(registry
//!     .register_command(Command::new("issue.create", "Again", Action::noop()))
//!     .is_err());
//! assert_eq!(registry.list_commands().len(), 1);
//! ```

mod command;
mod error;
mod lock;
mod provider;

pub use command::{Command, CommandRegistry, Guard};
pub use error::{RegistryError, Result};
pub use provider::{PaletteProvider, ProviderRegistry};
