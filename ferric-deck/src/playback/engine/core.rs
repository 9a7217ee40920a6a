//! Core playback engine - lifecycle and orchestration
//!
//! **Responsibilities:**
//! - PlaybackEngine struct definition and construction
//! - Mixtape loading and audio handle ownership (at most one live handle)
//! - Overheat decay and cooldown timers
//! - State-change subscription and cleanup

use std::sync::{Arc, Mutex as StdMutex};

use ferric_common::{Listeners, Mixtape, Side, Subscription, Track, TransportAction};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Duration;
use tracing::{debug, info, warn};

use crate::audio::{AudioBackend, AudioHandle};
use crate::config::EngineConfig;
use crate::glitch::{GlitchController, ScrubAction};
use crate::playback::overheat;
use crate::playback::timer::{spawn_after, spawn_repeating, TimerHandle};
use crate::state::DeckState;

/// Cassette-deck playback engine.
///
/// Owns one [`DeckState`], drives an [`AudioBackend`] collaborator, and
/// notifies subscribers synchronously after every mutating operation. All
/// transport operations are infallible: backend failures are logged and
/// swallowed, and commands against an empty deck are no-ops.
pub struct PlaybackEngine<B: AudioBackend> {
    pub(super) backend: B,

    pub(super) config: EngineConfig,

    /// The one live deck state instance.
    pub(super) state: Arc<RwLock<DeckState>>,

    /// Loaded mixtape, cloned on load; read-only afterwards.
    pub(super) tape: Arc<RwLock<Option<Mixtape>>>,

    /// At most one live audio handle; the previous handle is released
    /// before a new one is acquired.
    pub(super) handle: Arc<Mutex<Option<B::Handle>>>,

    pub(super) listeners: Arc<Listeners<DeckState>>,

    /// Companion anomaly detector, fed with transport actions and heat
    /// readings when attached.
    pub(super) glitch: StdMutex<Option<Arc<GlitchController>>>,

    /// Overheat decay tick; recreated on every load, cancelled on cleanup.
    pub(super) decay_timer: StdMutex<Option<TimerHandle>>,

    /// Cooldown expiry; armed when the interlock trips.
    pub(super) cooldown_timer: StdMutex<Option<TimerHandle>>,
}

impl<B: AudioBackend> PlaybackEngine<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, EngineConfig::default())
    }

    pub fn with_config(backend: B, config: EngineConfig) -> Self {
        Self {
            backend,
            config,
            state: Arc::new(RwLock::new(DeckState::default())),
            tape: Arc::new(RwLock::new(None)),
            handle: Arc::new(Mutex::new(None)),
            listeners: Arc::new(Listeners::new()),
            glitch: StdMutex::new(None),
            decay_timer: StdMutex::new(None),
            cooldown_timer: StdMutex::new(None),
        }
    }

    /// Wire up a glitch controller. The engine forwards every accepted
    /// transport action plus heat readings, and mirrors triggered glitches
    /// into [`DeckState::glitch`].
    pub fn attach_glitch_controller(&self, controller: Arc<GlitchController>) {
        *self.glitch.lock().unwrap() = Some(controller);
    }

    /// Load a mixtape: release the previous audio resource, reset the deck
    /// to side A / track 0 / position 0, and acquire the first track of
    /// side A (paused) when the side is non-empty.
    ///
    /// The heat meter intentionally carries across loads; both timers are
    /// recreated so nothing from the previous session can mutate this one.
    pub async fn load(&self, mixtape: &Mixtape) {
        info!(mixtape_id = %mixtape.id, "load command received");

        self.cancel_timers();
        self.release_handle().await;

        {
            let mut state = self.state.write().await;
            let carried_level = state.overheat_level;
            let carried_interlock = state.is_overheated;
            *state = DeckState {
                mixtape_id: Some(mixtape.id),
                overheat_level: carried_level,
                is_overheated: carried_interlock,
                ..DeckState::default()
            };
        }
        *self.tape.write().await = Some(mixtape.clone());

        if let Some(track) = mixtape.side(Side::A).first() {
            self.acquire_track(track).await;
        } else {
            debug!("side A is empty, deck loaded without a track");
        }

        self.start_decay_timer();
        if self.state.read().await.is_overheated {
            // the old cooldown timer died with its session; restart in full
            self.start_cooldown_timer();
        }

        self.notify().await;
    }

    /// Register a state-change callback invoked synchronously with a
    /// snapshot after every mutating operation.
    pub fn on_state_change(
        &self,
        callback: impl Fn(&DeckState) + Send + Sync + 'static,
    ) -> Subscription<DeckState> {
        self.listeners.subscribe(callback)
    }

    /// Independent copy of the current deck state.
    pub async fn snapshot(&self) -> DeckState {
        self.state.read().await.clone()
    }

    /// Release the audio resource, cancel both timers, drop all subscribers
    /// and reset the deck to its empty initial state. Idempotent.
    pub async fn cleanup(&self) {
        debug!("cleaning up playback engine");
        self.cancel_timers();
        self.release_handle().await;
        *self.tape.write().await = None;
        *self.state.write().await = DeckState::default();
        self.listeners.clear();
    }

    // ------------------------------------------------------------------
    // Internal helpers shared with the transport module
    // ------------------------------------------------------------------

    /// True when a mixtape is loaded and its active side holds tracks.
    pub(super) async fn has_loaded_track(&self) -> bool {
        let side = {
            let state = self.state.read().await;
            if state.mixtape_id.is_none() {
                return false;
            }
            state.current_side
        };
        match self.tape.read().await.as_ref() {
            Some(tape) => !tape.side(side).is_empty(),
            None => false,
        }
    }

    /// Acquire a paused handle for `track` and mirror its duration.
    pub(super) async fn acquire_track(&self, track: &Track) {
        match self.backend.acquire(&track.source.uri).await {
            Ok(handle) => {
                let duration_ms = if track.duration_ms > 0 {
                    track.duration_ms
                } else {
                    // fall back to what the backend decoded
                    match handle.get_status().await {
                        Ok(status) => status.duration_ms,
                        Err(e) => {
                            warn!("audio backend status failed: {}", e);
                            0
                        }
                    }
                };
                *self.handle.lock().await = Some(handle);
                self.state.write().await.duration_ms = duration_ms;
            }
            Err(e) => {
                warn!(uri = %track.source.uri, "failed to acquire audio resource: {}", e);
                self.state.write().await.duration_ms = track.duration_ms;
            }
        }
    }

    pub(super) async fn release_handle(&self) {
        if let Some(handle) = self.handle.lock().await.take() {
            handle.release().await;
        }
    }

    pub(super) fn cancel_timers(&self) {
        // dropping a TimerHandle aborts its task
        self.decay_timer.lock().unwrap().take();
        self.cooldown_timer.lock().unwrap().take();
    }

    pub(super) fn start_decay_timer(&self) {
        let state = Arc::clone(&self.state);
        let listeners = Arc::clone(&self.listeners);
        let decay = self.config.overheat_decay;
        let period = Duration::from_millis(self.config.decay_interval_ms);

        let timer = spawn_repeating(period, move || {
            let state = Arc::clone(&state);
            let listeners = Arc::clone(&listeners);
            async move {
                let snapshot = {
                    let mut state = state.write().await;
                    if !overheat::apply_decay(&mut state, decay) {
                        return;
                    }
                    state.clone()
                };
                listeners.emit(&snapshot);
            }
        });
        *self.decay_timer.lock().unwrap() = Some(timer);
    }

    pub(super) fn start_cooldown_timer(&self) {
        let state = Arc::clone(&self.state);
        let listeners = Arc::clone(&self.listeners);
        let cooldown = Duration::from_millis(self.config.cooldown_ms);

        let timer = spawn_after(cooldown, async move {
            let snapshot = {
                let mut state = state.write().await;
                overheat::finish_cooldown(&mut state);
                state.clone()
            };
            info!("overheat cooldown complete, scrubbing re-enabled");
            listeners.emit(&snapshot);
        });
        *self.cooldown_timer.lock().unwrap() = Some(timer);
    }

    /// Notify subscribers with a snapshot of the current state.
    pub(super) async fn notify(&self) {
        let snapshot = self.state.read().await.clone();
        self.listeners.emit(&snapshot);
    }

    pub(super) fn attached_controller(&self) -> Option<Arc<GlitchController>> {
        self.glitch.lock().unwrap().clone()
    }

    /// Forward a transport action to the glitch controller and mirror any
    /// triggered glitch into the deck state. Returns true when a glitch
    /// fired (the state changed).
    pub(super) async fn report_action(&self, action: TransportAction) -> bool {
        let Some(controller) = self.attached_controller() else {
            return false;
        };
        match controller.record_button_press(action) {
            Some(event) => {
                self.state.write().await.glitch = Some(event);
                true
            }
            None => false,
        }
    }

    /// Forward an accepted scrub activation: button press, FF/REW history
    /// entry, and the post-increment heat reading.
    pub(super) async fn report_scrub(
        &self,
        action: TransportAction,
        scrub: ScrubAction,
        heat_level: u8,
    ) -> bool {
        let Some(controller) = self.attached_controller() else {
            return false;
        };
        let fired = controller
            .record_button_press(action)
            .or_else(|| controller.record_ff_rew_action(scrub))
            .or_else(|| controller.check_overheat_level(heat_level));
        match fired {
            Some(event) => {
                self.state.write().await.glitch = Some(event);
                true
            }
            None => false,
        }
    }
}
