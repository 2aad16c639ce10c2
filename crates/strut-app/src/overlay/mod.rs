//! # Overlay Stack
//!
//! A process-wide ordered stack of overlay surfaces (full-screen dialogs,
//! bottom sheets). Any call site may push an overlay and await its
//! dismissal result; the render boundary observes the stack and draws the
//! entries in order, last on top.
//!
//! The stack is the single source of truth for "what overlays are open, in
//! what order". All mutation funnels through [`OverlayStack::open`],
//! [`OverlayStack::close_with`] (and its convenience wrappers),
//! [`OverlayStack::reject`], and [`OverlayStack::shutdown`]; every mutation
//! publishes a fresh [`OverlayCard`] list for subscribers.
//!
//! ```ignore
//! let stack: OverlayStack<OverlayContent, OverlayOutcome> = OverlayStack::new();
//!
//! // A call site opens a bottom sheet and awaits its outcome.
//! let pending = stack.open(OverlayContent::introduce_edit("hello"))?;
//! let outcome = pending.await?;
//! ```

mod entry;
mod stack;

pub use entry::{
    OverlayAnimation, OverlayCard, OverlayId, OverlayKind, OverlayRequest, PendingDismissal,
};
pub use stack::OverlayStack;
