//! Events emitted by the game and the presenter that consumes them.
//!
//! ## Key Components
//!
//! - [`GameEvent`]: typed record of one observable transition
//! - [`Presenter`]: callback interface (render, sound, win banner live here)
//! - [`EventLog`]: presenter that records events for polling hosts and tests

mod event;
mod presenter;

pub use event::GameEvent;
pub use presenter::{EventLog, Presenter};
