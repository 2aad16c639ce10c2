//! Overlay entry types: what a call site requests, what the render
//! boundary draws, and the pending handle the caller awaits.

use crate::errors::OverlayError;
use futures::channel::oneshot;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Identifier of one pushed overlay.
///
/// Allocated by the stack; allocation order equals insertion order, so ids
/// are also a record of push sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverlayId(pub u64);

impl OverlayId {
    /// The raw counter value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay-{}", self.0)
    }
}

/// Kind of overlay surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverlayKind {
    /// Covers the whole viewport.
    FullScreenDialog,
    /// Sheet anchored to the bottom edge.
    BottomSheet,
}

impl OverlayKind {
    /// The entry animation used when a request does not name one.
    pub fn default_animation(&self) -> OverlayAnimation {
        match self {
            Self::FullScreenDialog => OverlayAnimation::SlideInFromRight,
            Self::BottomSheet => OverlayAnimation::SlideInFromBottom,
        }
    }
}

/// Entry/exit transition for an overlay surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverlayAnimation {
    /// Horizontal push from the trailing edge.
    SlideInFromRight,
    /// Vertical rise from the bottom edge.
    SlideInFromBottom,
    /// Opacity-only transition.
    Fade,
}

/// What a call site asks the stack to present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayRequest<V> {
    /// Surface kind.
    pub kind: OverlayKind,
    /// View payload the render boundary mounts.
    pub view: V,
    /// Transition override; absent means the kind's default.
    pub animation: Option<OverlayAnimation>,
}

impl<V> OverlayRequest<V> {
    /// Request a full-screen dialog.
    pub fn full_screen(view: V) -> Self {
        Self {
            kind: OverlayKind::FullScreenDialog,
            view,
            animation: None,
        }
    }

    /// Request a bottom sheet.
    pub fn bottom_sheet(view: V) -> Self {
        Self {
            kind: OverlayKind::BottomSheet,
            view,
            animation: None,
        }
    }

    /// Override the transition.
    pub fn with_animation(mut self, animation: OverlayAnimation) -> Self {
        self.animation = Some(animation);
        self
    }
}

/// Render snapshot of one stacked overlay.
///
/// The stack publishes these oldest-first; the render boundary draws them
/// in order so the last card sits on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayCard<V> {
    /// Stack-assigned identifier.
    pub id: OverlayId,
    /// Surface kind.
    pub kind: OverlayKind,
    /// Resolved transition (request override or kind default).
    pub animation: OverlayAnimation,
    /// View payload to mount.
    pub view: V,
}

/// Deferred-completion handle returned by [`open`].
///
/// Resolves exactly once: with `Ok` when the overlay is dismissed, or with
/// `Err` if the view failed to construct or the stack shut down while the
/// overlay was pending. Normal dismissal is never an error.
///
/// [`open`]: crate::overlay::OverlayStack::open
#[derive(Debug)]
pub struct PendingDismissal<R> {
    id: OverlayId,
    receiver: oneshot::Receiver<Result<R, OverlayError>>,
}

impl<R> PendingDismissal<R> {
    pub(crate) fn new(
        id: OverlayId,
        receiver: oneshot::Receiver<Result<R, OverlayError>>,
    ) -> Self {
        Self { id, receiver }
    }

    /// The id of the overlay this handle waits on, usable for a
    /// programmatic close.
    pub fn id(&self) -> OverlayId {
        self.id
    }
}

impl<R> Future for PendingDismissal<R> {
    type Output = Result<R, OverlayError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(settled)) => Poll::Ready(settled),
            // The sender was dropped without settling: stack teardown.
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(OverlayError::StackClosed)),
            Poll::Pending => Poll::Pending,
        }
    }
}
