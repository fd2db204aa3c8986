//! Item kind specification, runtime state machine, and behavior hooks.

mod hooks;
mod spec;
mod state;

pub use hooks::{AttachToolBehavior, ItemEventHandler, UseSource};
pub use spec::{ItemAttachMode, ItemKindSpec};
pub use state::{AttachEffect, ItemLocation, ItemState, TransitionError};
