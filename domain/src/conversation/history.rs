//! Rolling conversation history

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of exchanges kept; older ones are evicted first.
pub const HISTORY_CAPACITY: usize = 5;

/// One completed user/assistant exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub user: String,
    pub assistant: String,
}

impl Exchange {
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
        }
    }
}

/// Bounded FIFO of the most recent exchanges, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationHistory {
    exchanges: VecDeque<Exchange>,
    capacity: usize,
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// A capacity of zero is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            exchanges: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an exchange, evicting the oldest one when full.
    pub fn push(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        if self.exchanges.len() == self.capacity {
            self.exchanges.pop_front();
        }
        self.exchanges.push_back(Exchange::new(user, assistant));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exchange> {
        self.exchanges.iter()
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.exchanges.clear();
    }
}
