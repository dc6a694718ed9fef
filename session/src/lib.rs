//! Session synchronization core for the peer-to-peer virtual tabletop.
//!
//! A [`session::Session`] owns one participant's replicated state (chat log,
//! token board) and the set of open peer links it synchronizes over. The
//! actual connectivity is behind the [`transport::Transport`] contract:
//! boundary calls initiate work and return immediately, and every outcome
//! (registration, channel open/data/close, media calls) is delivered as a
//! [`transport::TransportEvent`] on the session's inbox. The session itself
//! is a plain synchronous state machine: no locks, no tasks.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | The session state machine: broadcast, dispatch, commands |
//! | [`transport`] | Transport contract, ids, media stream handles, inbox events |
//! | [`links`] | Peer links and the open-link fanout set |
//! | [`chat`] | Chat log and message kinds |
//! | [`dice`] | Dice expression parsing and rolling |
//! | [`compendium`] | Imported rules and search |
//! | [`mesh`] | In-process transport broker for tests and the local demo |

pub mod chat;
pub mod compendium;
pub mod dice;
pub mod links;
pub mod mesh;
pub mod session;
pub mod transport;
