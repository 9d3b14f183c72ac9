//! State-changed notifications
//!
//! Observers receive an owned [`Frame`] after every tick, never a reference
//! into live simulation state.

use std::sync::mpsc::{Receiver, Sender, channel};

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::color::Rgb;
use super::figure::{Figure, ShapeKind};

/// What a renderer needs to draw one figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureView {
    pub pos: IVec2,
    pub size: i32,
    pub shape: ShapeKind,
    pub color: Rgb,
}

impl From<&Figure> for FigureView {
    fn from(f: &Figure) -> Self {
        Self {
            pos: f.position(),
            size: f.size(),
            shape: f.shape(),
            color: f.color(),
        }
    }
}

/// Snapshot of the simulation after a tick
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    /// Window extents the figures bounce inside
    pub extent: IVec2,
    /// Figures in z-order
    pub figures: Vec<FigureView>,
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

enum Sink {
    Callback(Box<dyn FnMut(&Frame) + Send>),
    Channel(Sender<Frame>),
}

/// Subscription list notified once per tick
#[derive(Default)]
pub struct Observers {
    subs: Vec<(SubscriptionId, Sink)>,
    next_id: u64,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a callback. It runs on the ticking thread and must not call
    /// back into the animator.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Frame) + Send + 'static,
    {
        let id = self.next_id();
        self.subs.push((id, Sink::Callback(Box::new(callback))));
        id
    }

    /// Register a channel; every frame is sent to the returned receiver
    pub fn subscribe_channel(&mut self) -> (SubscriptionId, Receiver<Frame>) {
        let (tx, rx) = channel();
        let id = self.next_id();
        self.subs.push((id, Sink::Channel(tx)));
        (id, rx)
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subs.len();
        self.subs.retain(|(sub, _)| *sub != id);
        self.subs.len() != before
    }

    pub fn len(&self) -> usize {
        self.subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    /// Deliver a frame to every subscriber in registration order.
    ///
    /// Channels whose receiver is gone are dropped from the list.
    pub fn notify(&mut self, frame: &Frame) {
        self.subs.retain_mut(|(id, sink)| match sink {
            Sink::Callback(callback) => {
                callback(frame);
                true
            }
            Sink::Channel(tx) => {
                let alive = tx.send(frame.clone()).is_ok();
                if !alive {
                    log::debug!("Dropping observer {:?}: receiver closed", id);
                }
                alive
            }
        });
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.subs.len())
            .finish()
    }
}
