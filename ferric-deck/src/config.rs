//! Deck configuration
//!
//! Every behavioral constant of the engine and the glitch controller is an
//! explicit tunable here; `Default` carries the shipped deck behavior.

use serde::{Deserialize, Serialize};

/// How transport flags react to audio backend failures.
///
/// The deck historically applied flags optimistically: `is_playing` flips even
/// when the backend's play call fails, keeping the UI responsive at the cost
/// of a possibly silent deck. `Confirmed` only applies a flag once the
/// backend accepted the call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagPolicy {
    #[default]
    Optimistic,
    Confirmed,
}

/// Playback engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Playback rate applied while fast-forwarding or rewinding.
    pub scrub_rate: f64,
    /// Heat added to the meter by each accepted scrub activation.
    pub overheat_increment: u8,
    /// Heat removed by each decay tick while the deck is cool.
    pub overheat_decay: u8,
    /// Interval between decay ticks, in milliseconds.
    pub decay_interval_ms: u64,
    /// Time the overheat interlock stays engaged, in milliseconds.
    pub cooldown_ms: u64,
    /// Flag behavior on backend failure.
    pub flag_policy: FlagPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scrub_rate: 2.0,
            overheat_increment: 15,
            overheat_decay: 2,
            decay_interval_ms: 1_000,
            cooldown_ms: 5_000,
            flag_policy: FlagPolicy::Optimistic,
        }
    }
}

/// Glitch controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlitchConfig {
    /// Sliding window for button-mash detection, in milliseconds.
    pub mash_window_ms: u64,
    /// Presses within the window that count as a mash.
    pub mash_threshold: usize,
    /// Sliding window for FF/REW alternation detection, in milliseconds.
    pub scrub_window_ms: u64,
    /// Scrub events within the window required before alternation is checked.
    pub scrub_threshold: usize,
    /// Heat level at which the extreme-overheat glitch fires.
    pub overheat_trigger_level: u8,
    /// Minimum spacing between any two glitch triggers, in milliseconds.
    pub retrigger_cooldown_ms: u64,
    /// Lifetime of a triggered glitch event, in milliseconds.
    pub glitch_duration_ms: u64,
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            mash_window_ms: 2_000,
            mash_threshold: 5,
            scrub_window_ms: 3_000,
            scrub_threshold: 4,
            overheat_trigger_level: 95,
            retrigger_cooldown_ms: 10_000,
            glitch_duration_ms: 3_000,
        }
    }
}
