//! Playback engine
//!
//! Split by responsibility:
//! - `core`: struct definition, construction, mixtape loading, timers,
//!   subscription and cleanup
//! - `transport`: transport commands (play/pause/scrub/flip/seek) and
//!   position queries

mod core;
mod transport;

pub use core::PlaybackEngine;
