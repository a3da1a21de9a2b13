//! Observer bus for game notifications.
//!
//! Subscribers are called synchronously, in subscription order, once per
//! published event.

use std::sync::mpsc::{channel, Receiver};

use crate::game_state::chess_types::{PieceKind, Side, Square};
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    StateChanged {
        from: GameState,
        to: GameState,
    },
    MoveExecuted {
        mv: Move,
        side: Side,
        promotion: Option<PieceKind>,
    },
    BoardUpdated,
    PromotionRequired {
        square: Square,
        side: Side,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Returns `false` once the subscriber can no longer receive events.
type Listener = Box<dyn FnMut(&GameEvent) -> bool + Send>;

#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, mut listener: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + Send + 'static,
    {
        self.add_listener(Box::new(move |event: &GameEvent| {
            listener(event);
            true
        }))
    }

    /// Subscribe a channel; events arrive on the returned receiver.
    ///
    /// Dropping the receiver ends the subscription at the next publish.
    pub fn subscribe_channel(&mut self) -> (SubscriptionId, Receiver<GameEvent>) {
        let (tx, rx) = channel();
        let id = self.add_listener(Box::new(move |event: &GameEvent| tx.send(*event).is_ok()));
        (id, rx)
    }

    fn add_listener(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn publish(&mut self, event: &GameEvent) {
        self.listeners.retain_mut(|(_, listener)| listener(event));
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}
