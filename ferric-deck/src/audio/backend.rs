//! Audio backend contract consumed by the playback engine.

use crate::error::Result;

/// Snapshot of a loaded audio resource.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioStatus {
    pub is_loaded: bool,
    pub duration_ms: u64,
    pub position_ms: u64,
    pub is_playing: bool,
}

/// Narrow interface for loading a single audio resource.
///
/// The engine holds at most one live [`AudioBackend::Handle`] at a time and
/// releases the previous handle before acquiring a new one.
#[allow(async_fn_in_trait)]
pub trait AudioBackend: Send + Sync + 'static {
    type Handle: AudioHandle;

    /// Acquire a paused handle for the resource at `uri`.
    async fn acquire(&self, uri: &str) -> Result<Self::Handle>;
}

/// Control surface of one acquired audio resource.
///
/// Calls are awaited sequentially by the engine; no two calls run
/// concurrently against the same handle.
#[allow(async_fn_in_trait)]
pub trait AudioHandle: Send + 'static {
    async fn play(&mut self) -> Result<()>;

    async fn pause(&mut self) -> Result<()>;

    async fn seek_to(&mut self, position_ms: u64) -> Result<()>;

    /// Change the playback rate. `preserves_pitch = false` produces the
    /// audible pitch-shift of physical tape scrubbing.
    async fn set_playback_rate(&mut self, rate: f64, preserves_pitch: bool) -> Result<()>;

    async fn get_status(&self) -> Result<AudioStatus>;

    /// Consume the handle and release the underlying resource.
    async fn release(self);
}
