use std::{collections::VecDeque, hash::Hash};

use anyhow::{Result, bail};
use tokio::sync::mpsc::{UnboundedReceiver, error::TryRecvError};

use crate::message_filter;

/// Receives messages and drops the ones that got superseded while the consumer was busy.
///
/// High frequency input like pointer moves is produced faster than a frame is processed. Only
/// the most recent message of each coalescing key survives until the next `recv`.
#[derive(Debug)]
pub struct CoalescingReceiver<T: CoalescingKey> {
    receiver: UnboundedReceiver<T>,
    pending: VecDeque<T>,
}

pub trait CoalescingKey {
    type Key: Eq + Hash;

    /// `None` marks messages that must never be dropped.
    fn coalescing_key(&self) -> Option<Self::Key>;
}

impl<T: CoalescingKey> From<UnboundedReceiver<T>> for CoalescingReceiver<T> {
    fn from(receiver: UnboundedReceiver<T>) -> Self {
        Self::new(receiver)
    }
}

impl<T: CoalescingKey> CoalescingReceiver<T> {
    pub fn new(receiver: UnboundedReceiver<T>) -> Self {
        Self {
            receiver,
            pending: VecDeque::new(),
        }
    }

    /// Receives a message and returns an error when the sender disconnected and nothing is
    /// pending anymore.
    pub async fn recv(&mut self) -> Result<T> {
        loop {
            let disconnected = self.pull_available();
            self.coalesce();

            if let Some(pending) = self.pending.pop_front() {
                return Ok(pending);
            }

            if disconnected {
                bail!("Sender disconnected");
            }

            // Nothing there yet, now we wait.
            match self.receiver.recv().await {
                Some(message) => self.pending.push_back(message),
                None => bail!("Sender disconnected"),
            }
        }
    }

    /// Pulls in every message that is available without waiting. Returns `true` if the sender
    /// disconnected.
    fn pull_available(&mut self) -> bool {
        loop {
            match self.receiver.try_recv() {
                Ok(message) => self.pending.push_back(message),
                Err(TryRecvError::Disconnected) => return true,
                Err(TryRecvError::Empty) => return false,
            }
        }
    }

    fn coalesce(&mut self) {
        // Performance: Going from VecDeque to Vec and back reallocates.
        let messages: Vec<T> = self.pending.drain(..).collect();
        self.pending = message_filter::keep_last_per_key(messages, |m| m.coalescing_key()).into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[derive(Debug, PartialEq)]
    enum Input {
        Moved(u8, i32),
        Released(u8),
    }

    impl CoalescingKey for Input {
        type Key = u8;

        fn coalescing_key(&self) -> Option<u8> {
            match self {
                Input::Moved(id, _) => Some(*id),
                Input::Released(_) => None,
            }
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn coalesces_pending_moves() {
        let (tx, rx) = unbounded_channel();
        let mut receiver = CoalescingReceiver::from(rx);

        tx.send(Input::Moved(1, 1)).unwrap();
        tx.send(Input::Moved(1, 2)).unwrap();
        tx.send(Input::Moved(1, 3)).unwrap();
        tx.send(Input::Released(1)).unwrap();
        drop(tx);

        assert_eq!(receiver.recv().await.unwrap(), Input::Moved(1, 3));
        assert_eq!(receiver.recv().await.unwrap(), Input::Released(1));
        assert!(receiver.recv().await.is_err());
    }
}
