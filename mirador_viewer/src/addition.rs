// Copyright 2025 the Mirador Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Completion plumbing for asynchronous item additions.

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures::channel::oneshot;

use crate::error::AddItemError;
use crate::viewer::{ItemAdded, ItemId};

type Outcome = Result<ItemAdded, AddItemError>;

/// Handle a viewer uses to report the outcome of one item addition.
///
/// Dropping the handle without calling [`ItemCompletion::succeed`] or
/// [`ItemCompletion::fail`] resolves the addition with
/// [`AddItemError::Abandoned`].
#[derive(Debug)]
pub struct ItemCompletion {
    sender: oneshot::Sender<Outcome>,
}

impl ItemCompletion {
    /// Reports that the item was added to the viewer's world.
    pub fn succeed(self, item: ItemId) {
        // The coordinator may have discarded the batch; nobody to tell then.
        let _ = self.sender.send(Ok(ItemAdded { item }));
    }

    /// Reports that the viewer could not load the item.
    pub fn fail(self, id: impl Into<String>, reason: impl Into<String>) {
        let _ = self.sender.send(Err(AddItemError::Failed {
            id: id.into(),
            reason: reason.into(),
        }));
    }
}

/// Future resolving when the viewer has added (or failed to add) an item.
///
/// An addition requested while no viewer exists never resolves; callers must
/// not wait on it without another way out.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct ItemAddition {
    state: State,
}

#[derive(Debug)]
enum State {
    Waiting(oneshot::Receiver<Outcome>),
    Ready(Option<Outcome>),
    Detached,
}

impl ItemAddition {
    /// Creates a linked completion handle and future.
    pub(crate) fn channel() -> (ItemCompletion, Self) {
        let (sender, receiver) = oneshot::channel();
        (
            ItemCompletion { sender },
            Self {
                state: State::Waiting(receiver),
            },
        )
    }

    /// Creates an addition that is already settled.
    pub(crate) fn ready(outcome: Outcome) -> Self {
        Self {
            state: State::Ready(Some(outcome)),
        }
    }

    /// Creates an addition that never settles.
    pub(crate) fn detached() -> Self {
        Self {
            state: State::Detached,
        }
    }
}

impl Future for ItemAddition {
    type Output = Outcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.state {
            State::Waiting(receiver) => match Pin::new(receiver).poll(cx) {
                Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
                Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(AddItemError::Abandoned)),
                Poll::Pending => Poll::Pending,
            },
            State::Ready(outcome) => outcome.take().map_or(Poll::Pending, Poll::Ready),
            State::Detached => Poll::Pending,
        }
    }
}
