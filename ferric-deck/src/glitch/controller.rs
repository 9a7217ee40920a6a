//! Glitch controller
//!
//! Independent pattern detector. It holds no reference to engine state; the
//! engine (or the UI directly) feeds it transport actions, scrub events and
//! heat readings, and it emits [`GlitchEvent`]s through its own hub.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use ferric_common::{Listeners, Subscription, TransportAction};
use tokio::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::GlitchConfig;
use crate::glitch::patterns::ActionWindow;
use crate::glitch::random::{EntropySource, RandomSource};
use crate::glitch::{GlitchEffect, GlitchEvent, GlitchTrigger, Jumpscare, ScrubAction};

struct ControllerInner {
    presses: ActionWindow<TransportAction>,
    scrubs: ActionWindow<ScrubAction>,
    last_trigger: Option<Instant>,
    rng: Box<dyn RandomSource>,
}

/// Anomaly detector over short interaction histories.
///
/// All detection state lives behind one lock; operations run to completion
/// before another can observe the histories, and subscriber notification
/// happens after the lock is released.
pub struct GlitchController {
    config: GlitchConfig,
    inner: Mutex<ControllerInner>,
    listeners: Arc<Listeners<GlitchEvent>>,
}

impl GlitchController {
    pub fn new(config: GlitchConfig) -> Self {
        Self::with_random_source(config, Box::new(EntropySource::new()))
    }

    /// Construct with an injected random source (deterministic in tests).
    pub fn with_random_source(config: GlitchConfig, rng: Box<dyn RandomSource>) -> Self {
        let inner = ControllerInner {
            presses: ActionWindow::new(Duration::from_millis(config.mash_window_ms)),
            scrubs: ActionWindow::new(Duration::from_millis(config.scrub_window_ms)),
            last_trigger: None,
            rng,
        };
        Self {
            config,
            inner: Mutex::new(inner),
            listeners: Arc::new(Listeners::new()),
        }
    }

    /// Record one transport button press; fires a button-mash glitch when
    /// enough presses land inside the sliding window.
    pub fn record_button_press(&self, action: TransportAction) -> Option<GlitchEvent> {
        let now = Instant::now();
        let event = {
            let mut inner = self.inner.lock().unwrap();
            inner.presses.record(action, now);
            if inner.presses.len() >= self.config.mash_threshold {
                self.fire(&mut inner, GlitchTrigger::ButtonMash, now)
            } else {
                None
            }
        };
        self.publish(event)
    }

    /// Record one FF/REW activation; fires when the window holds enough
    /// events and at least half of adjacent pairs alternate direction.
    pub fn record_ff_rew_action(&self, action: ScrubAction) -> Option<GlitchEvent> {
        let now = Instant::now();
        let event = {
            let mut inner = self.inner.lock().unwrap();
            inner.scrubs.record(action, now);
            if inner.scrubs.len() >= self.config.scrub_threshold {
                let (alternating, total) = inner.scrubs.alternations();
                if total > 0 && alternating * 2 >= total {
                    self.fire(&mut inner, GlitchTrigger::FfRewSequence, now)
                } else {
                    None
                }
            } else {
                None
            }
        };
        self.publish(event)
    }

    /// Fires an extreme-overheat glitch once the heat reading is high enough.
    pub fn check_overheat_level(&self, level: u8) -> Option<GlitchEvent> {
        if level < self.config.overheat_trigger_level {
            return None;
        }
        let now = Instant::now();
        let event = {
            let mut inner = self.inner.lock().unwrap();
            self.fire(&mut inner, GlitchTrigger::ExtremeOverheat, now)
        };
        self.publish(event)
    }

    /// Register a callback invoked synchronously for every triggered glitch.
    pub fn on_glitch_trigger(
        &self,
        callback: impl Fn(&GlitchEvent) + Send + Sync + 'static,
    ) -> Subscription<GlitchEvent> {
        self.listeners.subscribe(callback)
    }

    /// Clear both histories and the retrigger clock. Subscribers stay.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.presses.clear();
        inner.scrubs.clear();
        inner.last_trigger = None;
    }

    /// Drop all subscribers and detection state. Idempotent.
    pub fn cleanup(&self) {
        self.listeners.clear();
        self.reset();
    }

    fn fire(
        &self,
        inner: &mut ControllerInner,
        trigger: GlitchTrigger,
        now: Instant,
    ) -> Option<GlitchEvent> {
        if let Some(last) = inner.last_trigger {
            let cooldown = Duration::from_millis(self.config.retrigger_cooldown_ms);
            if now.duration_since(last) < cooldown {
                debug!(%trigger, "glitch suppressed by retrigger cooldown");
                return None;
            }
        }

        let effect = GlitchEffect::ALL[inner.rng.pick_index(GlitchEffect::ALL.len())];
        let jumpscare = Jumpscare::ALL[inner.rng.pick_index(Jumpscare::ALL.len())];
        let event = GlitchEvent {
            effect,
            jumpscare,
            trigger,
            started_at: now,
            triggered_at: Utc::now(),
            duration: Duration::from_millis(self.config.glitch_duration_ms),
        };

        inner.last_trigger = Some(now);
        // residual history must not feed the next trigger
        inner.presses.clear();
        inner.scrubs.clear();

        info!(%trigger, effect = ?event.effect, jumpscare = %event.jumpscare, "glitch triggered");
        Some(event)
    }

    fn publish(&self, event: Option<GlitchEvent>) -> Option<GlitchEvent> {
        if let Some(ref e) = event {
            self.listeners.emit(e);
        }
        event
    }
}
