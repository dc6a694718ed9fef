//! Transport contract between a session and its connectivity provider.
//!
//! DESIGN
//! ======
//! The session never blocks on the network. Every method on [`Transport`]
//! initiates work and returns; outcomes arrive later as [`TransportEvent`]
//! values on the session's inbox channel. A connection attempt to an
//! identifier nobody holds simply never completes, with no timeout and
//! no error event.
//!
//! Channels are handed to the session as live [`DataChannel`] trait objects
//! once open. Close notifications and call notifications correlate through
//! [`ChannelId`] / [`CallId`] values minted by the transport.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::fmt;

use uuid::Uuid;

/// Opaque participant identifier assigned by the transport on registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeerId(String);

impl PeerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one logical data channel, shared by both end handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(Uuid);

impl ChannelId {
    /// Mint a fresh channel identifier.
    #[must_use]
    pub fn mint() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of one media call between two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallId(Uuid);

impl CallId {
    /// Mint a fresh call identifier.
    #[must_use]
    pub fn mint() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raised when the local audio/video devices cannot be acquired.
///
/// The session downgrades to a no-video run instead of failing; see
/// [`crate::session::Session::new`].
#[derive(Debug, thiserror::Error)]
#[error("media devices unavailable: {0}")]
pub struct MediaError(pub String);

/// An audio/video stream handle.
///
/// The stream content itself lives outside this crate; the session tracks
/// only identity, a display label, and which tracks are enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaStream {
    id: Uuid,
    /// Label describing the source, e.g. the participant name.
    pub label: String,
    /// Whether the audio track is live.
    pub audio_enabled: bool,
    /// Whether the video track is live.
    pub video_enabled: bool,
}

impl MediaStream {
    /// Create a stream handle with both tracks enabled.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), label: label.into(), audio_enabled: true, video_enabled: true }
    }

    /// Flip the audio track and return its new state.
    pub fn toggle_audio(&mut self) -> bool {
        self.audio_enabled = !self.audio_enabled;
        self.audio_enabled
    }

    /// Flip the video track and return its new state.
    pub fn toggle_video(&mut self) -> bool {
        self.video_enabled = !self.video_enabled;
        self.video_enabled
    }
}

/// One open data channel to a remote participant.
///
/// Handles are created by the transport and delivered through
/// [`TransportEvent::ChannelOpen`]; the session owns them for the rest of
/// their life.
pub trait DataChannel: Send {
    /// The participant on the other end.
    fn remote(&self) -> &PeerId;

    /// Identifier correlating this handle with close notifications.
    fn id(&self) -> ChannelId;

    /// Whether the channel is open end to end right now.
    fn is_open(&self) -> bool;

    /// Queue bytes for delivery. Best effort: bytes sent on a channel that
    /// closes in flight are lost silently.
    fn send(&self, bytes: &[u8]);
}

/// Connectivity provider contract.
///
/// All methods return immediately; outcomes are delivered as
/// [`TransportEvent`]s on the inbox paired with this transport.
pub trait Transport: Send {
    /// Begin registration. The assigned identifier arrives as
    /// [`TransportEvent::Registered`].
    fn register(&mut self);

    /// Begin opening a data channel to `remote`. Both ends receive a
    /// [`TransportEvent::ChannelOpen`] when the channel is up.
    fn open_channel(&mut self, remote: &PeerId);

    /// Begin a media call to `remote`, offering `stream`. Returns the minted
    /// call identifier so the caller can correlate later notifications.
    fn start_call(&mut self, remote: &PeerId, stream: MediaStream) -> CallId;

    /// Answer an incoming call with the local stream.
    fn answer_call(&mut self, call: CallId, stream: MediaStream);

    /// Close a channel. Both ends receive [`TransportEvent::ChannelClosed`].
    fn close_channel(&mut self, channel: ChannelId);

    /// End a call. Both ends receive [`TransportEvent::CallClosed`].
    fn end_call(&mut self, call: CallId);
}

/// Notifications delivered on a session's inbox.
pub enum TransportEvent {
    /// Registration completed; `id` is the local identity.
    Registered { id: PeerId },
    /// Registration failed. Non-fatal: the session keeps running unlinked.
    RegistrationFailed { reason: String },
    /// A data channel opened, whether locally initiated or accepted.
    ChannelOpen { channel: Box<dyn DataChannel> },
    /// Bytes arrived on an open channel.
    ChannelData { channel: ChannelId, bytes: Vec<u8> },
    /// A channel closed; the handle with this id is dead.
    ChannelClosed { channel: ChannelId },
    /// A remote participant is calling.
    IncomingCall { call: CallId, from: PeerId },
    /// The remote stream for a call became available.
    CallStream { call: CallId, from: PeerId, stream: MediaStream },
    /// A call ended; any remote stream attached to it is gone.
    CallClosed { call: CallId },
}
