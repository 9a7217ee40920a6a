//! Test helpers for ferric-deck integration tests
//!
//! Provides a recording `MockBackend` (every backend call is observable),
//! mixtape fixtures, and a deterministic `RandomSource`.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use ferric_common::{Mixtape, Track, TrackSource};
use ferric_deck::audio::{AudioBackend, AudioHandle, AudioStatus};
use ferric_deck::error::{Error, Result};
use ferric_deck::glitch::RandomSource;
use uuid::Uuid;

/// One observed audio backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Acquire(String),
    Play,
    Pause,
    SeekTo(u64),
    SetRate { rate: f64, preserves_pitch: bool },
    Release,
}

/// Recording backend; clones share one call log.
#[derive(Clone, Default)]
pub struct MockBackend {
    calls: Arc<Mutex<Vec<BackendCall>>>,
    fail_transport: Arc<AtomicBool>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn count(&self, pred: impl Fn(&BackendCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    /// All recorded rate changes as `(rate, preserves_pitch)`.
    pub fn rate_changes(&self) -> Vec<(f64, bool)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                BackendCall::SetRate { rate, preserves_pitch } => Some((*rate, *preserves_pitch)),
                _ => None,
            })
            .collect()
    }

    /// Make every subsequent transport call on handles fail.
    pub fn fail_transport(&self, fail: bool) {
        self.fail_transport.store(fail, Ordering::SeqCst);
    }
}

pub struct MockHandle {
    calls: Arc<Mutex<Vec<BackendCall>>>,
    fail: Arc<AtomicBool>,
    duration_ms: u64,
    position_ms: u64,
    playing: bool,
}

impl MockHandle {
    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn transport_result(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            Err(Error::Backend("injected transport failure".to_string()))
        } else {
            Ok(())
        }
    }
}

impl AudioHandle for MockHandle {
    async fn play(&mut self) -> Result<()> {
        self.record(BackendCall::Play);
        self.transport_result().inspect(|_| self.playing = true)
    }

    async fn pause(&mut self) -> Result<()> {
        self.record(BackendCall::Pause);
        self.transport_result().inspect(|_| self.playing = false)
    }

    async fn seek_to(&mut self, position_ms: u64) -> Result<()> {
        self.record(BackendCall::SeekTo(position_ms));
        self.transport_result()
            .inspect(|_| self.position_ms = position_ms.min(self.duration_ms))
    }

    async fn set_playback_rate(&mut self, rate: f64, preserves_pitch: bool) -> Result<()> {
        self.record(BackendCall::SetRate { rate, preserves_pitch });
        self.transport_result()
    }

    async fn get_status(&self) -> Result<AudioStatus> {
        Ok(AudioStatus {
            is_loaded: true,
            duration_ms: self.duration_ms,
            position_ms: self.position_ms,
            is_playing: self.playing,
        })
    }

    async fn release(self) {
        self.record(BackendCall::Release);
    }
}

impl AudioBackend for MockBackend {
    type Handle = MockHandle;

    async fn acquire(&self, uri: &str) -> Result<MockHandle> {
        self.calls
            .lock()
            .unwrap()
            .push(BackendCall::Acquire(uri.to_string()));
        Ok(MockHandle {
            calls: Arc::clone(&self.calls),
            fail: Arc::clone(&self.fail_transport),
            duration_ms: TRACK_DURATION_MS,
            position_ms: 0,
            playing: false,
        })
    }
}

pub const TRACK_DURATION_MS: u64 = 180_000;

pub fn track(uri: &str) -> Track {
    Track {
        id: Uuid::new_v4(),
        duration_ms: TRACK_DURATION_MS,
        source: TrackSource { uri: uri.to_string() },
    }
}

/// Two tracks on side A, one on side B.
pub fn demo_mixtape() -> Mixtape {
    Mixtape {
        id: Uuid::new_v4(),
        side_a: vec![track("tape://demo/a1"), track("tape://demo/a2")],
        side_b: vec![track("tape://demo/b1")],
    }
}

pub fn empty_mixtape() -> Mixtape {
    Mixtape {
        id: Uuid::new_v4(),
        side_a: vec![],
        side_b: vec![],
    }
}

/// Deterministic random source: yields queued indices (mod len), then 0.
pub struct SeqSource {
    indices: VecDeque<usize>,
}

impl SeqSource {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }
}

impl RandomSource for SeqSource {
    fn pick_index(&mut self, len: usize) -> usize {
        self.indices.pop_front().map(|i| i % len).unwrap_or(0)
    }
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("ferric_deck=debug"))
        .with_test_writer()
        .try_init()
        .ok();
}
