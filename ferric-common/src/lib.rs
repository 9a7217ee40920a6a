//! # Ferric Common
//!
//! Shared types for the Ferric cassette-deck core.
//!
//! **Purpose:** Read-only mixtape/track inputs, transport vocabulary, and the
//! synchronous callback hub used by both the playback engine and the glitch
//! controller for state-change notification.

pub mod notify;
pub mod types;

pub use notify::{Listeners, Subscription};
pub use types::{Mixtape, Side, Track, TrackSource, TransportAction};
