//! # Palette Store
//!
//! Observable per-palette state with cancellable async searches.
//!
//! Every search request takes a fresh token. When a request completes it only
//! touches state if its token is still the latest one issued; older responses
//! are dropped without clearing `is_loading` or `error`, so the newest request
//! always owns the visible outcome regardless of resolution order.

mod source;
mod store;

pub use source::PaletteSource;
pub use store::{PaletteState, PaletteStore, StoreOptions};
