//! Overheat interlock transitions.
//!
//! Two-state safety mechanic: *cool* (`overheat_level < 100`) and
//! *overheated* (`overheat_level == 100`, interlock engaged). Scrub
//! activations add heat; a periodic tick decays heat while cool; the
//! interlock releases when the cooldown elapses.

use crate::state::DeckState;

/// Outcome of applying scrub heat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeatChange {
    /// Heat added, deck still cool.
    Warmed,
    /// The meter hit 100 and the interlock engaged.
    Tripped,
}

/// Add one scrub activation's heat, clamped at 100.
///
/// Crossing 100 engages the interlock and stops scrubbing; the engine
/// restores the backend playback rate and starts the cooldown timer.
pub(crate) fn apply_scrub_heat(state: &mut DeckState, increment: u8) -> HeatChange {
    state.overheat_level = state.overheat_level.saturating_add(increment).min(100);
    if state.overheat_level >= 100 {
        state.is_overheated = true;
        state.stop_scrubbing();
        HeatChange::Tripped
    } else {
        HeatChange::Warmed
    }
}

/// One decay tick: lower the meter, floored at 0.
///
/// Inert while the interlock is engaged or the meter is already cold.
/// Returns true when the level actually changed.
pub(crate) fn apply_decay(state: &mut DeckState, decay: u8) -> bool {
    if state.is_overheated || state.overheat_level == 0 {
        return false;
    }
    state.overheat_level = state.overheat_level.saturating_sub(decay);
    true
}

/// Release the interlock once the cooldown has elapsed.
pub(crate) fn finish_cooldown(state: &mut DeckState) {
    state.overheat_level = 0;
    state.is_overheated = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_accumulates_in_fixed_increments() {
        let mut state = DeckState::default();
        assert_eq!(apply_scrub_heat(&mut state, 15), HeatChange::Warmed);
        assert_eq!(state.overheat_level, 15);
        for _ in 0..5 {
            apply_scrub_heat(&mut state, 15);
        }
        assert_eq!(state.overheat_level, 90);
        assert!(!state.is_overheated);
    }

    #[test]
    fn crossing_one_hundred_trips_the_interlock() {
        let mut state = DeckState {
            overheat_level: 90,
            ..DeckState::default()
        };
        state.begin_fast_forward();

        assert_eq!(apply_scrub_heat(&mut state, 15), HeatChange::Tripped);
        assert_eq!(state.overheat_level, 100);
        assert!(state.is_overheated);
        // tripping the interlock stops scrubbing
        assert!(!state.is_scrubbing());
    }

    #[test]
    fn decay_lowers_heat_while_cool() {
        let mut state = DeckState {
            overheat_level: 5,
            ..DeckState::default()
        };
        assert!(apply_decay(&mut state, 2));
        assert_eq!(state.overheat_level, 3);
        assert!(apply_decay(&mut state, 2));
        assert!(apply_decay(&mut state, 2));
        // floored at 0
        assert_eq!(state.overheat_level, 0);
        assert!(!apply_decay(&mut state, 2));
    }

    #[test]
    fn decay_is_inert_while_overheated() {
        let mut state = DeckState {
            overheat_level: 100,
            is_overheated: true,
            ..DeckState::default()
        };
        assert!(!apply_decay(&mut state, 2));
        assert_eq!(state.overheat_level, 100);
    }

    #[test]
    fn cooldown_resets_the_meter() {
        let mut state = DeckState {
            overheat_level: 100,
            is_overheated: true,
            ..DeckState::default()
        };
        finish_cooldown(&mut state);
        assert_eq!(state.overheat_level, 0);
        assert!(!state.is_overheated);
    }
}
