use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Tracks which channels have a response in flight.
///
/// A busy channel only blocks further work in that same channel.
#[derive(Debug, Clone, Default)]
pub struct ChannelGuard {
    busy: Arc<Mutex<HashSet<String>>>,
}

/// Held while a channel's response is being produced; releases on drop
#[derive(Debug)]
pub struct ChannelPermit {
    guard: ChannelGuard,
    channel: String,
}

impl ChannelGuard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        // The set stays consistent even if a holder panicked mid-insert
        self.busy.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Mark `channel` busy, or `None` if it already is
    pub fn try_acquire(&self, channel: &str) -> Option<ChannelPermit> {
        if !self.lock().insert(channel.to_string()) {
            return None;
        }
        Some(ChannelPermit {
            guard: self.clone(),
            channel: channel.to_string(),
        })
    }

    pub fn is_busy(&self, channel: &str) -> bool {
        self.lock().contains(channel)
    }
}

impl ChannelPermit {
    pub fn channel(&self) -> &str {
        &self.channel
    }
}

impl Drop for ChannelPermit {
    fn drop(&mut self) {
        self.guard.lock().remove(&self.channel);
    }
}
