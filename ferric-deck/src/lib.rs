//! # Ferric Deck
//!
//! Cassette-deck playback core: transport control over two-sided mixtapes,
//! speed-altered scrubbing behind a thermal interlock, and a companion glitch
//! controller that injects randomized anomaly effects when it observes
//! suspicious interaction patterns.
//!
//! **Architecture:** [`PlaybackEngine`] owns one [`DeckState`] and at most one
//! live audio handle, drives an [`audio::AudioBackend`] collaborator, and
//! notifies subscribers after every mutation. [`GlitchController`] is an
//! independent pattern detector fed with transport actions and heat readings,
//! publishing [`GlitchEvent`]s through its own channel.

pub mod audio;
pub mod config;
pub mod error;
pub mod glitch;
pub mod playback;
pub mod state;

pub use config::{EngineConfig, FlagPolicy, GlitchConfig};
pub use error::{Error, Result};
pub use glitch::{GlitchController, GlitchEvent};
pub use playback::engine::PlaybackEngine;
pub use state::DeckState;
