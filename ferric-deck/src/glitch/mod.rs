//! Glitch anomaly detector.
//!
//! The [`GlitchController`] watches forwarded interaction patterns (rapid
//! button mashing, repeated FF/REW alternation, an overheated deck) and
//! injects time-boxed, randomly selected glitch effects through its own
//! notification channel.

mod controller;
pub(crate) mod patterns;
pub mod random;

pub use controller::GlitchController;
pub use random::{EntropySource, RandomSource};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::{Duration, Instant};

/// Visual effect kinds a glitch can render as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GlitchEffect {
    StaticBurst,
    TapeWarp,
    ChromaBleed,
    FrameTear,
}

impl GlitchEffect {
    pub const ALL: [GlitchEffect; 4] = [
        GlitchEffect::StaticBurst,
        GlitchEffect::TapeWarp,
        GlitchEffect::ChromaBleed,
        GlitchEffect::FrameTear,
    ];
}

/// Jumpscare sound assets a glitch can fire alongside its visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Jumpscare {
    TapeScreech,
    ReverseWhisper,
    DoorSlam,
}

impl Jumpscare {
    pub const ALL: [Jumpscare; 3] = [
        Jumpscare::TapeScreech,
        Jumpscare::ReverseWhisper,
        Jumpscare::DoorSlam,
    ];

    /// Stable asset identifier for the sound library.
    pub fn asset_id(self) -> &'static str {
        match self {
            Jumpscare::TapeScreech => "jumpscare-tape-screech",
            Jumpscare::ReverseWhisper => "jumpscare-reverse-whisper",
            Jumpscare::DoorSlam => "jumpscare-door-slam",
        }
    }
}

impl std::fmt::Display for Jumpscare {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.asset_id())
    }
}

/// What pattern caused a glitch to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GlitchTrigger {
    ButtonMash,
    FfRewSequence,
    ExtremeOverheat,
}

impl std::fmt::Display for GlitchTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GlitchTrigger::ButtonMash => "button-mash",
            GlitchTrigger::FfRewSequence => "ff-rew-sequence",
            GlitchTrigger::ExtremeOverheat => "extreme-overheat",
        };
        write!(f, "{}", name)
    }
}

/// Direction of a scrub action fed to the alternation detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrubAction {
    FastForward,
    Rewind,
}

/// One triggered glitch. Immutable; consumers discard it once stale.
#[derive(Debug, Clone)]
pub struct GlitchEvent {
    pub effect: GlitchEffect,
    pub jumpscare: Jumpscare,
    pub trigger: GlitchTrigger,
    /// Monotonic creation time, used for the active/stale lifecycle.
    pub started_at: Instant,
    /// Wall-clock creation time, for logs and UI.
    pub triggered_at: DateTime<Utc>,
    pub duration: Duration,
}

impl GlitchEvent {
    /// True while `now - started_at < duration`.
    pub fn is_active(&self) -> bool {
        self.started_at.elapsed() < self.duration
    }

    /// Pass an event through while it is active, drop it once stale.
    pub fn clear_expired(event: Option<GlitchEvent>) -> Option<GlitchEvent> {
        event.filter(GlitchEvent::is_active)
    }
}
