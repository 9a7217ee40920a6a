//! Mixtape and transport vocabulary shared across the workspace.
//!
//! Mixtapes and tracks are supplied by the mixtape library and are read-only
//! inputs here: the deck clones them on load and never writes them back.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the two ordered track lists composing a mixtape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[default]
    A,
    B,
}

impl Side {
    /// The other side of the tape.
    pub fn opposite(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// User-facing transport buttons, as forwarded to the glitch controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportAction {
    Play,
    Pause,
    FastForward,
    Rewind,
    FlipSide,
    Seek,
}

impl std::fmt::Display for TransportAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TransportAction::Play => "play",
            TransportAction::Pause => "pause",
            TransportAction::FastForward => "fast-forward",
            TransportAction::Rewind => "rewind",
            TransportAction::FlipSide => "flip-side",
            TransportAction::Seek => "seek",
        };
        write!(f, "{}", name)
    }
}

/// Location of a track's audio data, opaque to the deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSource {
    pub uri: String,
}

/// Single track on one side of a mixtape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: Uuid,
    /// Track length in milliseconds, from library metadata.
    pub duration_ms: u64,
    pub source: TrackSource,
}

/// A two-sided ordered collection of tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mixtape {
    pub id: Uuid,
    pub side_a: Vec<Track>,
    pub side_b: Vec<Track>,
}

impl Mixtape {
    /// Tracks on the given side, in play order.
    pub fn side(&self, side: Side) -> &[Track] {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    /// True when neither side holds any tracks.
    pub fn is_empty(&self) -> bool {
        self.side_a.is_empty() && self.side_b.is_empty()
    }
}
