//! One participant's complete shared-table state and its replication loop.
//!
//! DESIGN
//! ======
//! The session is a synchronous state machine. Transport outcomes arrive on
//! an inbox channel and are folded in by [`Session::poll`]; every local
//! operation runs to completion on the caller's thread, so no state here
//! needs a lock. Replicated state (tokens, chat) changes only through
//! events; the view transform, drag state, compendium and media flags stay
//! local to this participant.
//!
//! Broadcasts are fire-and-forget: an event is encoded once, attempted on
//! every open link, and forgotten. There is no ordering, acknowledgement or
//! redelivery, and a malformed incoming event is dropped with a debug line.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use events::{Event, TokenPosition, decode_event, encode_event};
use tabletop::board::Board;
use tabletop::map::MapImage;
use tabletop::token::{Token, TokenKind};
use tabletop::view::Point;

use crate::chat::ChatLog;
use crate::compendium::{Compendium, Rule};
use crate::dice;
use crate::links::{CallSet, LinkSet};
use crate::transport::{MediaError, MediaStream, PeerId, Transport, TransportEvent};

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

/// Author label stamped on every outgoing chat and roll event.
const WIRE_AUTHOR: &str = "Giocatore";

/// One participant of a shared table.
pub struct Session<T: Transport> {
    transport: T,
    inbox: UnboundedReceiver<TransportEvent>,
    local_id: Option<PeerId>,
    links: LinkSet,
    calls: CallSet,
    stream: Option<MediaStream>,
    board: Board,
    chat: ChatLog,
    compendium: Compendium,
    rng: StdRng,
}

impl<T: Transport> Session<T> {
    // --- lifecycle ---

    /// Builds a session from a transport, its event inbox, and the outcome
    /// of local media acquisition. A failed acquisition downgrades to a
    /// no-video session with a chat notice; it never aborts setup.
    pub fn new(
        transport: T,
        inbox: UnboundedReceiver<TransportEvent>,
        media: Result<MediaStream, MediaError>,
    ) -> Self {
        let mut chat = ChatLog::new();
        let stream = match media {
            Ok(stream) => Some(stream),
            Err(err) => {
                warn!(%err, "session: starting without media");
                // Plain chat line, not a system notice.
                chat.local(
                    "System",
                    "Impossibile accedere alla webcam/microfono. Verifica i permessi.",
                );
                None
            }
        };
        Self {
            transport,
            inbox,
            local_id: None,
            links: LinkSet::default(),
            calls: CallSet::default(),
            stream,
            board: Board::new(),
            chat,
            compendium: Compendium::default(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Requests an identity from the transport. The assigned identifier
    /// arrives later as a [`TransportEvent::Registered`] on the inbox.
    pub fn register(&mut self) {
        self.transport.register();
    }

    /// Links to another participant: opens a data channel and, when local
    /// media is available, places a call offering it. An empty identifier
    /// is ignored.
    pub fn connect_to(&mut self, remote: &PeerId) {
        if remote.is_empty() {
            return;
        }
        info!(%remote, "session: connecting");
        self.transport.open_channel(remote);
        if let Some(stream) = &self.stream {
            let call = self.transport.start_call(remote, stream.clone());
            self.calls.add(call, remote.clone());
        }
        self.chat.system(format!("Connessione verso {remote}"));
    }

    /// Tears down every channel and call. The transport confirms each one
    /// through the inbox, so the link and call sets empty on the next poll.
    pub fn leave(&mut self) {
        let channels: Vec<_> = self.links.iter().map(|link| link.id()).collect();
        for id in channels {
            self.transport.close_channel(id);
        }
        let calls: Vec<_> = self.calls.iter().map(|call| call.id).collect();
        for id in calls {
            self.transport.end_call(id);
        }
        info!("session: left");
    }

    // --- inbox ---

    /// Drains the transport inbox, folding every pending notification into
    /// session state. Returns the number of notifications handled.
    pub fn poll(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.inbox.try_recv() {
            self.handle_transport_event(event);
            handled += 1;
        }
        handled
    }

    fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Registered { id } => {
                info!(%id, "session: registered");
                self.local_id = Some(id);
                self.chat.system("Connesso. Il tuo ID è pronto.");
            }
            TransportEvent::RegistrationFailed { reason } => {
                warn!(%reason, "session: registration failed");
                self.chat.system("Registrazione non riuscita.");
            }
            TransportEvent::ChannelOpen { channel } => {
                info!(remote = %channel.remote(), "session: channel open");
                self.links.add(channel);
            }
            TransportEvent::ChannelData { channel, bytes } => match decode_event(&bytes) {
                Ok(event) => self.apply_remote(event),
                Err(err) => {
                    debug!(%channel, %err, "session: dropping malformed event");
                }
            },
            TransportEvent::ChannelClosed { channel } => {
                debug!(%channel, "session: channel closed");
                self.links.remove(channel);
            }
            TransportEvent::IncomingCall { call, from } => {
                info!(%from, "session: incoming call");
                if let Some(stream) = &self.stream {
                    self.transport.answer_call(call, stream.clone());
                }
                // Tracked even when unanswered; the caller may still send.
                self.calls.add(call, from);
            }
            TransportEvent::CallStream { call, from, stream } => {
                if self.calls.attach_stream(call, stream) {
                    info!(%from, "session: remote stream attached");
                } else {
                    debug!(%call, %from, "session: stream for untracked call dropped");
                }
            }
            TransportEvent::CallClosed { call } => {
                debug!(%call, "session: call closed");
                self.calls.remove(call);
            }
        }
    }

    /// Applies one replicated event to local state.
    fn apply_remote(&mut self, event: Event) {
        match event {
            Event::Chat { author, text } => self.chat.remote(author, text),
            Event::Roll { author, dice, total, details } => {
                let body = if details.is_empty() {
                    format!("{author} ha rollato {dice}: {total}")
                } else {
                    format!("{author} ha rollato {dice}: {total} {details}")
                };
                self.chat.remote("Dice", body);
            }
            Event::TokenAdd { payload } => {
                let id = payload.id.clone();
                if !self.board.apply_add(payload) {
                    debug!(%id, "session: token add for existing id ignored");
                }
            }
            Event::TokenMove { payload } => {
                if !self.board.apply_move(&payload.id, payload.x, payload.y) {
                    debug!(id = %payload.id, "session: move for unknown token ignored");
                }
            }
        }
    }

    /// Encodes an event and attempts it on every open link, returning the
    /// number of attempted sends.
    pub(crate) fn broadcast(&self, event: &Event) -> usize {
        let bytes = encode_event(event);
        let attempts = self.links.broadcast(&bytes);
        debug!(attempts, "session: broadcast");
        attempts
    }

    // --- chat and dice ---

    /// Handles one line of chat input. Blank input is ignored; a line
    /// starting with `/roll` goes to the dice evaluator; anything else is
    /// appended locally under the author `Me` and broadcast.
    pub fn send_chat(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if text.starts_with("/roll") {
            self.handle_roll_command(text);
            return;
        }
        self.chat.local("Me", text);
        self.broadcast(&Event::Chat { author: WIRE_AUTHOR.to_owned(), text: text.to_owned() });
    }

    /// Evaluates a `/roll <count>d<sides>` command. A rejected expression
    /// appends the invalid-command notice and broadcasts nothing.
    fn handle_roll_command(&mut self, command: &str) {
        let expr = command.split(' ').nth(1).unwrap_or_default();
        let spec = match dice::parse_expr(expr) {
            Ok(spec) => spec,
            Err(err) => {
                debug!(%err, "session: rejected roll command");
                self.chat.system("Comando non valido.");
                return;
            }
        };
        let outcome = dice::roll(&spec, &mut self.rng);
        let total = outcome.total;
        let details = outcome.details();
        let expr = &spec.expr;
        self.chat.local("Dice", format!("Hai rollato {expr}: {total} {details}"));
        self.broadcast(&Event::Roll {
            author: WIRE_AUTHOR.to_owned(),
            dice: spec.expr.clone(),
            total,
            details,
        });
    }

    /// Rolls one die of a fixed size, as from the quick-roll buttons. Always
    /// succeeds; the broadcast carries no per-die breakdown.
    pub fn roll_die(&mut self, sides: u32) {
        let result = self.rng.random_range(1..=sides.max(1));
        self.chat.local("Dice", format!("Hai rollato d{sides}: {result}"));
        self.broadcast(&Event::Roll {
            author: WIRE_AUTHOR.to_owned(),
            dice: format!("d{sides}"),
            total: i64::from(result),
            details: String::new(),
        });
    }

    // --- board ---

    /// Mints a token of the given kind at the viewport center and announces
    /// it to every linked participant.
    pub fn add_token(&mut self, kind: TokenKind) {
        let id = self.mint_token_id();
        let spawn = self.board.spawn_point();
        let token = Token { id, kind, x: spawn.x, y: spawn.y };
        info!(id = %token.id, ?kind, "session: token added");
        self.board.apply_add(token.clone());
        self.broadcast(&Event::TokenAdd { payload: token });
    }

    fn mint_token_id(&mut self) -> String {
        let suffix: u32 = self.rng.random_range(0..1000);
        format!("token-{}-{suffix}", now_ms())
    }

    /// Begins a pointer gesture at a screen position.
    pub fn pointer_down(&mut self, screen: Point) {
        self.board.pointer_down(screen);
    }

    /// Continues the active pointer gesture. Token drags update local
    /// positions without broadcasting.
    pub fn pointer_move(&mut self, screen: Point) {
        self.board.pointer_move(screen);
    }

    /// Ends the active pointer gesture. Releasing a dragged token broadcasts
    /// its final position, one `TOKEN_MOVE` per completed drag.
    pub fn pointer_up(&mut self) {
        if let Some(released) = self.board.pointer_up() {
            self.broadcast(&Event::TokenMove {
                payload: TokenPosition { id: released.id, x: released.x, y: released.y },
            });
        }
    }

    /// Records the local viewport size used for spawn placement.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.board.set_viewport(width, height);
    }

    pub fn zoom_in(&mut self) {
        self.board.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.board.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.board.reset_view();
    }

    /// Installs an uploaded map image as the local background. Rejected
    /// files leave the previous map in place and append a chat notice.
    pub fn load_map(&mut self, filename: &str, bytes: &[u8]) {
        match MapImage::from_bytes(filename, bytes) {
            Ok(image) => {
                info!(file = filename, "session: map loaded");
                self.board.set_map(image);
            }
            Err(err) => {
                warn!(%err, file = filename, "session: map rejected");
                self.chat.system("Errore caricamento mappa.");
            }
        }
    }

    // --- compendium ---

    /// Imports a rules file. Failures keep the previous rule set and append
    /// a chat notice.
    pub fn import_rules(&mut self, filename: &str, bytes: &[u8]) {
        match self.compendium.import(filename, bytes) {
            Ok(count) => {
                info!(file = filename, count, "session: rules imported");
                self.chat.system(format!("Importate regole da {filename}"));
            }
            Err(err) => {
                warn!(%err, file = filename, "session: rules import failed");
                self.chat.system("Errore importazione file.");
            }
        }
    }

    #[must_use]
    pub fn search_rules(&self, query: &str) -> Vec<&Rule> {
        self.compendium.search(query)
    }

    // --- media ---

    /// Flips the local audio track, returning its new state. `None` when
    /// the session runs without media.
    pub fn toggle_mic(&mut self) -> Option<bool> {
        let stream = self.stream.as_mut()?;
        Some(stream.toggle_audio())
    }

    /// Flips the local video track, returning its new state. `None` when
    /// the session runs without media.
    pub fn toggle_cam(&mut self) -> Option<bool> {
        let stream = self.stream.as_mut()?;
        Some(stream.toggle_video())
    }

    // --- accessors ---

    #[must_use]
    pub fn local_id(&self) -> Option<&PeerId> {
        self.local_id.as_ref()
    }

    #[must_use]
    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn links(&self) -> &LinkSet {
        &self.links
    }

    #[must_use]
    pub fn calls(&self) -> &CallSet {
        &self.calls
    }

    #[must_use]
    pub fn compendium(&self) -> &Compendium {
        &self.compendium
    }

    #[must_use]
    pub fn has_media(&self) -> bool {
        self.stream.is_some()
    }
}

fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}
