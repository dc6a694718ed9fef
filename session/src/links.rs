//! Peer link and media call bookkeeping.
//!
//! Data channels and media calls are tracked in two independent lists: a
//! channel closing says nothing about a call to the same participant, and a
//! call can outlive every channel. Neither list is keyed by peer, so
//! connecting twice to the same participant yields two live links and that
//! participant receives every broadcast twice.

use crate::transport::{CallId, ChannelId, DataChannel, MediaStream, PeerId};

#[cfg(test)]
#[path = "links_test.rs"]
mod links_test;

/// Open data channels in arrival order.
#[derive(Default)]
pub struct LinkSet {
    links: Vec<Box<dyn DataChannel>>,
}

impl LinkSet {
    /// Adds a channel to the broadcast set. Duplicates are kept as handed in.
    pub fn add(&mut self, channel: Box<dyn DataChannel>) {
        self.links.push(channel);
    }

    /// Drops the link with this channel id. Returns whether anything was
    /// tracked under it.
    pub fn remove(&mut self, id: ChannelId) -> bool {
        let before = self.links.len();
        self.links.retain(|link| link.id() != id);
        self.links.len() != before
    }

    /// Sends `bytes` over every currently open link and returns the number
    /// of send attempts. Closed links are skipped; delivery is best effort.
    pub fn broadcast(&self, bytes: &[u8]) -> usize {
        let mut attempts = 0;
        for link in &self.links {
            if link.is_open() {
                link.send(bytes);
                attempts += 1;
            }
        }
        attempts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Box<dyn DataChannel>> {
        self.links.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// One media call, either direction. The remote stream attaches once the
/// transport delivers it; an unanswered call stays tracked without one.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaCall {
    pub id: CallId,
    pub remote: PeerId,
    pub stream: Option<MediaStream>,
}

/// Media calls in arrival order.
#[derive(Debug, Default)]
pub struct CallSet {
    calls: Vec<MediaCall>,
}

impl CallSet {
    /// Starts tracking a call with no remote stream yet.
    pub fn add(&mut self, id: CallId, remote: PeerId) {
        self.calls.push(MediaCall { id, remote, stream: None });
    }

    /// Attaches the remote stream to a tracked call. Returns false for
    /// unknown call ids.
    pub fn attach_stream(&mut self, id: CallId, stream: MediaStream) -> bool {
        let Some(call) = self.calls.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        call.stream = Some(stream);
        true
    }

    /// Stops tracking a call, returning it if it was known.
    pub fn remove(&mut self, id: CallId) -> Option<MediaCall> {
        let index = self.calls.iter().position(|c| c.id == id)?;
        Some(self.calls.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MediaCall> {
        self.calls.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}
