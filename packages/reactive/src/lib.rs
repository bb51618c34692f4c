//! # Weft Reactive
//!
//! The reactive collaborators templates bind against.
//!
//! - [`Emitter`]: a composable event-emitter capability. Entities that
//!   need events own an emitter and forward to it; nothing inherits.
//! - [`Observable`]: a data source with named JSON attributes,
//!   per-attribute change notifications, and arbitrary named events.
//! - [`ListenerOwner`]: records every subscription attached on behalf
//!   of a view and tears all of them down at once. The templating core
//!   never tears down subscriptions on its own; leaking an owner leaks
//!   its subscriptions.
//!
//! Everything here is single-threaded and synchronous: notifications
//! run to completion, in subscription order, before the triggering call
//! returns.

pub mod emitter;
pub mod observable;
pub mod owner;

pub use emitter::{Emitter, EmitterCallback, SubId};
pub use observable::Observable;
pub use owner::ListenerOwner;
