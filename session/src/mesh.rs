//! In-process mesh transport for tests and local demos.
//!
//! One [`MeshHub`] plays the part of the signaling network: participants
//! join it, register for an identity, and reach each other through
//! per-participant mailboxes. Delivery is immediate and ordered per mailbox;
//! nothing crosses a process or socket boundary. Opening a channel to an
//! identifier nobody registered delivers no events at all, matching the
//! transport contract for unknown peers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::transport::{
    CallId, ChannelId, DataChannel, MediaStream, PeerId, Transport, TransportEvent,
};

#[cfg(test)]
#[path = "mesh_test.rs"]
mod mesh_test;

type Mailbox = UnboundedSender<TransportEvent>;

/// Shared broker connecting every [`MeshTransport`] joined to it.
#[derive(Clone, Default)]
pub struct MeshHub {
    state: Arc<Mutex<HubState>>,
}

#[derive(Default)]
struct HubState {
    next_peer: usize,
    peers: HashMap<PeerId, Mailbox>,
    channels: HashMap<ChannelId, ChannelRecord>,
    calls: HashMap<CallId, CallRecord>,
}

struct ChannelRecord {
    open: Arc<AtomicBool>,
    ends: [Mailbox; 2],
}

struct CallRecord {
    caller: PeerId,
    caller_tx: Mailbox,
    caller_stream: MediaStream,
    callee: PeerId,
    callee_tx: Mailbox,
}

impl MeshHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a participant slot: a transport bound to this hub plus the inbox
    /// its notifications will arrive on.
    #[must_use]
    pub fn join(&self) -> (MeshTransport, UnboundedReceiver<TransportEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let transport = MeshTransport { hub: self.clone(), mailbox: tx, local_id: None };
        (transport, rx)
    }

    fn lock(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One participant's handle onto the mesh.
pub struct MeshTransport {
    hub: MeshHub,
    mailbox: Mailbox,
    local_id: Option<PeerId>,
}

impl Transport for MeshTransport {
    fn register(&mut self) {
        if self.local_id.is_some() {
            debug!("mesh: already registered");
            return;
        }
        let mut hub = self.hub.lock();
        hub.next_peer += 1;
        let id = PeerId::new(format!("peer-{}", hub.next_peer));
        hub.peers.insert(id.clone(), self.mailbox.clone());
        self.local_id = Some(id.clone());
        let _ = self.mailbox.send(TransportEvent::Registered { id });
    }

    fn open_channel(&mut self, remote: &PeerId) {
        let Some(local) = self.local_id.clone() else {
            debug!("mesh: open_channel before registration");
            return;
        };
        let mut hub = self.hub.lock();
        let Some(remote_tx) = hub.peers.get(remote).cloned() else {
            // Unknown identifier: the attempt completes never.
            debug!(%remote, "mesh: no route to peer");
            return;
        };
        let id = ChannelId::mint();
        let open = Arc::new(AtomicBool::new(true));
        hub.channels.insert(
            id,
            ChannelRecord {
                open: Arc::clone(&open),
                ends: [self.mailbox.clone(), remote_tx.clone()],
            },
        );
        let outbound = MeshChannel {
            remote: remote.clone(),
            id,
            open: Arc::clone(&open),
            peer: remote_tx.clone(),
        };
        let inbound = MeshChannel { remote: local, id, open, peer: self.mailbox.clone() };
        let _ = self.mailbox.send(TransportEvent::ChannelOpen { channel: Box::new(outbound) });
        let _ = remote_tx.send(TransportEvent::ChannelOpen { channel: Box::new(inbound) });
    }

    fn start_call(&mut self, remote: &PeerId, stream: MediaStream) -> CallId {
        let call = CallId::mint();
        let Some(local) = self.local_id.clone() else {
            debug!("mesh: start_call before registration");
            return call;
        };
        let mut hub = self.hub.lock();
        let Some(remote_tx) = hub.peers.get(remote).cloned() else {
            debug!(%remote, "mesh: no route for call");
            return call;
        };
        hub.calls.insert(
            call,
            CallRecord {
                caller: local.clone(),
                caller_tx: self.mailbox.clone(),
                caller_stream: stream,
                callee: remote.clone(),
                callee_tx: remote_tx.clone(),
            },
        );
        let _ = remote_tx.send(TransportEvent::IncomingCall { call, from: local });
        call
    }

    fn answer_call(&mut self, call: CallId, stream: MediaStream) {
        let hub = self.hub.lock();
        let Some(record) = hub.calls.get(&call) else {
            debug!(%call, "mesh: answer for unknown call");
            return;
        };
        // Media flows both ways only once the callee answers.
        let _ = record.caller_tx.send(TransportEvent::CallStream {
            call,
            from: record.callee.clone(),
            stream,
        });
        let _ = record.callee_tx.send(TransportEvent::CallStream {
            call,
            from: record.caller.clone(),
            stream: record.caller_stream.clone(),
        });
    }

    fn close_channel(&mut self, channel: ChannelId) {
        let mut hub = self.hub.lock();
        let Some(record) = hub.channels.remove(&channel) else {
            debug!(%channel, "mesh: close for unknown channel");
            return;
        };
        record.open.store(false, Ordering::SeqCst);
        for end in &record.ends {
            let _ = end.send(TransportEvent::ChannelClosed { channel });
        }
    }

    fn end_call(&mut self, call: CallId) {
        let mut hub = self.hub.lock();
        let Some(record) = hub.calls.remove(&call) else {
            debug!(%call, "mesh: end for unknown call");
            return;
        };
        let _ = record.caller_tx.send(TransportEvent::CallClosed { call });
        let _ = record.callee_tx.send(TransportEvent::CallClosed { call });
    }
}

struct MeshChannel {
    remote: PeerId,
    id: ChannelId,
    open: Arc<AtomicBool>,
    peer: Mailbox,
}

impl DataChannel for MeshChannel {
    fn remote(&self) -> &PeerId {
        &self.remote
    }

    fn id(&self) -> ChannelId {
        self.id
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn send(&self, bytes: &[u8]) {
        if !self.is_open() {
            return;
        }
        let _ = self
            .peer
            .send(TransportEvent::ChannelData { channel: self.id, bytes: bytes.to_vec() });
    }
}
