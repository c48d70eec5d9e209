//! Change notifications for renderers.
//!
//! The controller never calls into presentation code. Observers subscribe
//! and receive `MatchEvent`s over a channel, then read whatever they need
//! through the controller's queries or a snapshot.
//!
//! Each subscriber channel holds at most `EVENT_BUFFER` undelivered events.
//! Events for a full channel are dropped, so a subscriber that falls behind
//! should resynchronize from a snapshot instead of replaying events.

use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Command, Mode, Phase, Scores, Side};

/// Something observable changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A generation was computed.
    GenerationAdvanced {
        generation: u64,
        population: usize,
        scores: Scores,
    },
    /// The lifecycle phase changed.
    PhaseChanged { from: Phase, to: Phase },
    /// The rule set changed; the grid and match state were reset.
    ModeChanged { mode: Mode },
    /// The side to place the next stone changed.
    TurnChanged { turn: Side },
    /// A battle stone was placed.
    StonePlaced { side: Side, x: i32, y: i32 },
    /// Cells were edited directly (random fill, pattern, single cell).
    CellsEdited { command: Command },
    /// The grid was rebuilt or cleared.
    GridReset { width: usize, height: usize },
}

/// Undelivered events a subscriber channel holds before new events are dropped.
pub const EVENT_BUFFER: usize = 1024;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Subscriber registry.
///
/// Subscribers whose receiver was dropped are pruned on the next publish.
#[derive(Debug, Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: FxHashMap<SubscriberId, SyncSender<MatchEvent>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&mut self) -> (SubscriberId, Receiver<MatchEvent>) {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        let (tx, rx) = mpsc::sync_channel(EVENT_BUFFER);
        self.subscribers.insert(id, tx);
        (id, rx)
    }

    /// Remove a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    /// Deliver `event` to every live subscriber without blocking.
    pub fn publish(&mut self, event: MatchEvent) {
        let before = self.subscriber_count();
        let mut dropped = 0usize;
        self.subscribers.retain(|_, tx| match tx.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                dropped += 1;
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });

        if dropped > 0 {
            trace!(dropped, "subscriber buffer full, event dropped");
        }
        let pruned = before - self.subscriber_count();
        if pruned > 0 {
            debug!(pruned, "closed subscribers removed");
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
