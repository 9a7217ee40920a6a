//! Transport commands for PlaybackEngine
//!
//! Play/pause, speed-altered scrubbing behind the overheat interlock, side
//! flipping, seeking, track stepping and position queries. Every command is
//! a no-op when no mixtape/track is loaded, and backend failures never
//! propagate to the caller.

use ferric_common::{Side, TransportAction};
use tracing::{debug, info, warn};

use super::PlaybackEngine;
use crate::audio::{AudioBackend, AudioHandle};
use crate::config::FlagPolicy;
use crate::glitch::ScrubAction;
use crate::playback::overheat::{self, HeatChange};

impl<B: AudioBackend> PlaybackEngine<B> {
    pub async fn play(&self) {
        if !self.has_loaded_track().await {
            debug!("play ignored: no track loaded");
            return;
        }
        info!("play command received");

        let backend_ok = {
            let mut guard = self.handle.lock().await;
            match guard.as_mut() {
                Some(handle) => match handle.play().await {
                    Ok(()) => true,
                    Err(e) => {
                        warn!("audio backend play failed: {}", e);
                        false
                    }
                },
                None => false,
            }
        };

        let applied = backend_ok || self.config.flag_policy == FlagPolicy::Optimistic;
        if applied {
            self.state.write().await.is_playing = true;
        }
        let fired = self.report_action(TransportAction::Play).await;
        if applied || fired {
            self.notify().await;
        }
    }

    pub async fn pause(&self) {
        if !self.has_loaded_track().await {
            debug!("pause ignored: no track loaded");
            return;
        }
        info!("pause command received");

        let backend_ok = {
            let mut guard = self.handle.lock().await;
            match guard.as_mut() {
                Some(handle) => match handle.pause().await {
                    Ok(()) => true,
                    Err(e) => {
                        warn!("audio backend pause failed: {}", e);
                        false
                    }
                },
                None => false,
            }
        };

        let applied = backend_ok || self.config.flag_policy == FlagPolicy::Optimistic;
        if applied {
            self.state.write().await.is_playing = false;
        }
        let fired = self.report_action(TransportAction::Pause).await;
        if applied || fired {
            self.notify().await;
        }
    }

    /// Scrub forward at the configured rate, heating the deck.
    pub async fn fast_forward(&self) {
        self.scrub(ScrubAction::FastForward).await;
    }

    /// Scrub backward at the configured rate, heating the deck.
    pub async fn rewind(&self) {
        self.scrub(ScrubAction::Rewind).await;
    }

    async fn scrub(&self, direction: ScrubAction) {
        let action = match direction {
            ScrubAction::FastForward => TransportAction::FastForward,
            ScrubAction::Rewind => TransportAction::Rewind,
        };

        if !self.has_loaded_track().await {
            debug!("{} ignored: no track loaded", action);
            return;
        }
        if self.state.read().await.is_overheated {
            debug!("{} rejected: deck overheated", action);
            return;
        }
        info!("{} command received", action);

        let was_playing = {
            let mut state = self.state.write().await;
            let was_playing = state.is_playing;
            match direction {
                ScrubAction::FastForward => state.begin_fast_forward(),
                ScrubAction::Rewind => state.begin_rewind(),
            }
            state.is_playing = true;
            was_playing
        };

        {
            let mut guard = self.handle.lock().await;
            if let Some(handle) = guard.as_mut() {
                if !was_playing {
                    if let Err(e) = handle.play().await {
                        warn!("audio backend play failed: {}", e);
                    }
                }
                // no pitch correction: the audible pitch-shift is the point
                if let Err(e) = handle.set_playback_rate(self.config.scrub_rate, false).await {
                    warn!("audio backend rate change failed: {}", e);
                }
            }
        }

        let (heat_level, tripped) = {
            let mut state = self.state.write().await;
            let change = overheat::apply_scrub_heat(&mut state, self.config.overheat_increment);
            (state.overheat_level, change == HeatChange::Tripped)
        };

        if tripped {
            warn!(
                "deck overheated, scrubbing disabled for {}ms",
                self.config.cooldown_ms
            );
            let mut guard = self.handle.lock().await;
            if let Some(handle) = guard.as_mut() {
                if let Err(e) = handle.set_playback_rate(1.0, true).await {
                    warn!("audio backend rate change failed: {}", e);
                }
            }
            drop(guard);
            self.start_cooldown_timer();
        }

        self.report_scrub(action, direction, heat_level).await;
        self.notify().await;
    }

    /// Pause, swap the active side and load its first track (paused).
    pub async fn flip_side(&self) {
        let Some(tape) = self.tape.read().await.clone() else {
            debug!("flip-side ignored: no mixtape loaded");
            return;
        };
        info!("flip-side command received");

        {
            let mut guard = self.handle.lock().await;
            if let Some(handle) = guard.as_mut() {
                if let Err(e) = handle.pause().await {
                    warn!("audio backend pause failed: {}", e);
                }
            }
        }

        let new_side = {
            let mut state = self.state.write().await;
            state.is_playing = false;
            state.stop_scrubbing();
            state.current_side = state.current_side.opposite();
            state.current_track_index = 0;
            state.position_ms = 0;
            state.duration_ms = 0;
            state.current_side
        };

        self.release_handle().await;
        if let Some(track) = tape.side(new_side).first() {
            self.acquire_track(track).await;
        } else {
            debug!(side = %new_side, "flipped to an empty side");
        }

        self.report_action(TransportAction::FlipSide).await;
        self.notify().await;
    }

    /// Forward a seek to the backend unchanged; the deck's own position
    /// mirror stays clamped to the track duration.
    pub async fn seek_to(&self, position_ms: u64) {
        if !self.has_loaded_track().await {
            debug!("seek ignored: no track loaded");
            return;
        }
        debug!(position_ms, "seek command received");

        {
            let mut guard = self.handle.lock().await;
            if let Some(handle) = guard.as_mut() {
                if let Err(e) = handle.seek_to(position_ms).await {
                    warn!("audio backend seek failed: {}", e);
                }
            }
        }

        self.state.write().await.set_position(position_ms);
        self.report_action(TransportAction::Seek).await;
        self.notify().await;
    }

    /// Step to the next track on the active side; no-op at the last track.
    pub async fn next_track(&self) {
        let Some(tape) = self.tape.read().await.clone() else {
            debug!("next-track ignored: no mixtape loaded");
            return;
        };

        let (side, index, was_playing) = {
            let state = self.state.read().await;
            (state.current_side, state.current_track_index, state.is_playing)
        };
        let tracks = tape.side(side);
        if index + 1 >= tracks.len() {
            debug!("next-track ignored: already at last track");
            return;
        }
        info!(track = index + 1, "stepping to next track");

        self.release_handle().await;
        {
            let mut state = self.state.write().await;
            state.current_track_index = index + 1;
            state.position_ms = 0;
            state.duration_ms = 0;
            state.stop_scrubbing();
        }
        self.acquire_track(&tracks[index + 1]).await;

        if was_playing {
            let mut guard = self.handle.lock().await;
            if let Some(handle) = guard.as_mut() {
                if let Err(e) = handle.play().await {
                    warn!("audio backend play failed: {}", e);
                }
            }
        }

        self.notify().await;
    }

    /// Step to the previous track, or restart the current one when already
    /// at the first track.
    pub async fn previous_track(&self) {
        let Some(tape) = self.tape.read().await.clone() else {
            debug!("previous-track ignored: no mixtape loaded");
            return;
        };

        let (side, index, was_playing) = {
            let state = self.state.read().await;
            (state.current_side, state.current_track_index, state.is_playing)
        };
        let tracks = tape.side(side);
        if tracks.is_empty() {
            debug!("previous-track ignored: side is empty");
            return;
        }

        if index == 0 {
            self.seek_to(0).await;
            return;
        }
        info!(track = index - 1, "stepping to previous track");

        self.release_handle().await;
        {
            let mut state = self.state.write().await;
            state.current_track_index = index - 1;
            state.position_ms = 0;
            state.duration_ms = 0;
            state.stop_scrubbing();
        }
        self.acquire_track(&tracks[index - 1]).await;

        if was_playing {
            let mut guard = self.handle.lock().await;
            if let Some(handle) = guard.as_mut() {
                if let Err(e) = handle.play().await {
                    warn!("audio backend play failed: {}", e);
                }
            }
        }

        self.notify().await;
    }

    /// Pull the playhead position from the backend into the deck's mirror.
    ///
    /// Intended for UI progress polling; notifies subscribers when the
    /// mirror moved.
    pub async fn refresh_position(&self) {
        if !self.has_loaded_track().await {
            return;
        }

        let status = {
            let guard = self.handle.lock().await;
            match guard.as_ref() {
                Some(handle) => handle.get_status().await,
                None => return,
            }
        };
        let status = match status {
            Ok(status) => status,
            Err(e) => {
                warn!("audio backend status failed: {}", e);
                return;
            }
        };

        let changed = {
            let mut state = self.state.write().await;
            let before = (state.position_ms, state.duration_ms);
            if status.duration_ms > 0 {
                state.duration_ms = status.duration_ms;
            }
            state.set_position(status.position_ms);
            before != (state.position_ms, state.duration_ms)
        };
        if changed {
            self.notify().await;
        }
    }

    /// True when the deck sits at the end of the last track of the active
    /// side.
    pub async fn is_at_end_of_side(&self) -> bool {
        let state = self.state.read().await;
        let tape = self.tape.read().await;
        let Some(tape) = tape.as_ref() else {
            return false;
        };
        let tracks = tape.side(state.current_side);
        !tracks.is_empty()
            && state.current_track_index + 1 == tracks.len()
            && state.position_ms >= state.duration_ms
    }

    /// The side that `flip_side` would switch to.
    pub async fn opposite_side(&self) -> Side {
        self.state.read().await.current_side.opposite()
    }
}
