//! Live view client for the battle-beetles simulation daemon.
//!
//! The daemon owns all simulation state and streams one binary snapshot
//! per tick over a WebSocket. This crate keeps a visual mirror of that
//! state: it decodes the frames, reconciles a pool of renderable
//! proxies against each snapshot, rolls chart statistics into fixed
//! windows, and turns pointer gestures back into command frames.
//!
//! The actual rasterization backend is external; it plugs in through
//! [`scene::SceneRenderer`].

pub mod channel;
pub mod command;
pub mod error;
pub mod input;
pub mod proto;
pub mod reconcile;
pub mod scene;
pub mod series;
pub mod session;
pub mod update;

#[cfg(test)]
pub(crate) mod testing;

pub use channel::{ChannelClient, ChannelEvent};
pub use command::Command;
pub use error::{ChannelError, DecodeError};
pub use session::{Session, SessionInput, ViewState};
pub use update::Update;

/// Endpoint the daemon listens on unless configured otherwise.
pub const DEFAULT_ENDPOINT: &str = "127.0.0.1:4020";

/// WebSocket subprotocol both ends must speak.
pub const SUBPROTOCOL: &str = "battle-beetles";
