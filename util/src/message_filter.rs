//! Filters for batches of messages that are processed once per frame.

use std::{collections::HashSet, hash::Hash};

/// Drops every message that is followed by a later message with the same key.
///
/// Messages without a key are never dropped and act as barriers: a keyed message is only
/// superseded by a later one if no unkeyed message lies between them. This way a pointer's last
/// move before its release survives, and the relative order of the remaining messages is kept.
pub fn keep_last_per_key<T, K: Eq + Hash>(
    messages: Vec<T>,
    key: impl Fn(&T) -> Option<K>,
) -> Vec<T> {
    let mut seen: HashSet<K> = HashSet::new();
    let mut kept = Vec::with_capacity(messages.len());

    // Walk backwards, the last message of a run wins.
    for message in messages.into_iter().rev() {
        match key(&message) {
            Some(k) => {
                if seen.insert(k) {
                    kept.push(message);
                }
            }
            None => {
                seen.clear();
                kept.push(message);
            }
        }
    }

    kept.reverse();
    kept
}
