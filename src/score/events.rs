//! Change notification channels
//!
//! Each channel keeps its subscribers in registration order and calls them
//! synchronously on every emit. Callbacks run while the engine is borrowed,
//! so they must not call back into the engine; forward the value to a queue
//! or a UI model instead.

use crate::core::types::{ComboCount, Points};
use std::fmt;

/// Handle returned by `Channel::subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Box<dyn FnMut(T) + Send>;

/// Multicast channel for one kind of change
pub struct Channel<T> {
    subscribers: Vec<(SubscriptionId, Callback<T>)>,
    next_id: u64,
}

impl<T: Copy> Channel<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn subscribe(&mut self, callback: impl FnMut(T) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber; returns false if the id was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub(crate) fn emit(&mut self, value: T) {
        for (_, callback) in &mut self.subscribers {
            callback(value);
        }
    }
}

impl<T: Copy> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// The three channels a score engine publishes on
#[derive(Debug, Default)]
pub struct ScoreEvents {
    /// New current score after any change
    pub score_changed: Channel<Points>,
    /// New combo count, including drops to zero
    pub combo_changed: Channel<ComboCount>,
    /// New high score whenever a point award beats the record
    pub high_score_achieved: Channel<Points>,
}
