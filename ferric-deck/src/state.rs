//! Deck state record
//!
//! One live [`DeckState`] instance exists per engine; subscribers receive
//! independent clones after every mutation.

use ferric_common::Side;
use uuid::Uuid;

use crate::glitch::GlitchEvent;

/// Current deck status. Plain data, no behavior beyond invariant helpers.
#[derive(Debug, Clone, Default)]
pub struct DeckState {
    /// Identifier of the loaded mixtape, `None` when nothing is loaded.
    pub mixtape_id: Option<Uuid>,
    pub current_side: Side,
    /// Zero-based index into the active side's track list.
    pub current_track_index: usize,
    /// Playhead position in milliseconds, clamped to `duration_ms`.
    pub position_ms: u64,
    pub duration_ms: u64,
    pub is_playing: bool,
    pub is_fast_forwarding: bool,
    pub is_rewinding: bool,
    /// Heat meter, 0..=100.
    pub overheat_level: u8,
    /// True exactly while the overheat interlock is engaged.
    pub is_overheated: bool,
    /// Most recent glitch event mirrored from the glitch controller.
    pub glitch: Option<GlitchEvent>,
}

impl DeckState {
    /// Set the playhead, clamped so `position_ms <= duration_ms` holds.
    pub fn set_position(&mut self, position_ms: u64) {
        self.position_ms = position_ms.min(self.duration_ms);
    }

    /// Engage fast-forward; the scrub flags are mutually exclusive.
    pub fn begin_fast_forward(&mut self) {
        self.is_rewinding = false;
        self.is_fast_forwarding = true;
    }

    /// Engage rewind; the scrub flags are mutually exclusive.
    pub fn begin_rewind(&mut self) {
        self.is_fast_forwarding = false;
        self.is_rewinding = true;
    }

    pub fn stop_scrubbing(&mut self) {
        self.is_fast_forwarding = false;
        self.is_rewinding = false;
    }

    pub fn is_scrubbing(&self) -> bool {
        self.is_fast_forwarding || self.is_rewinding
    }
}
