//! Playback engine and its supporting pieces.

pub mod engine;
pub(crate) mod overheat;
pub(crate) mod timer;
