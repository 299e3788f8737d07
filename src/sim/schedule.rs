//! Ghost behavior mode schedule
//!
//! Pure functions of round time and per-ghost flags. The controller computes a
//! `ModeContext` for each ghost every tick; nothing here is cached.

use serde::{Deserialize, Serialize};

use super::state::{GhostKind, GhostMode};
use crate::consts::{SCATTER_CHASE_WINDOWS, SCATTER_CHASE_WINDOW_TICKS};

/// Scheduled global phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Scatter,
    Chase,
}

impl From<Phase> for GhostMode {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Scatter => GhostMode::Scatter,
            Phase::Chase => GhostMode::Chase,
        }
    }
}

/// Scatter/chase phase for ticks elapsed since play began.
///
/// Seven 10-second windows alternate scatter and chase (scatter first), then
/// chase forever. The same on every level.
pub fn scatter_chase_phase(elapsed_ticks: u64) -> Phase {
    let window = elapsed_ticks / SCATTER_CHASE_WINDOW_TICKS;
    if window < SCATTER_CHASE_WINDOWS && window % 2 == 0 {
        Phase::Scatter
    } else {
        Phase::Chase
    }
}

/// Whether a penned ghost may leave, given dots eaten this round
pub fn may_leave_house(kind: GhostKind, dots_eaten_this_round: u32) -> bool {
    dots_eaten_this_round >= kind.release_threshold()
}

/// Inputs a ghost needs to pick its mode this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeContext {
    pub phase: Phase,
    /// The ghost's frightened timer is running
    pub frightened: bool,
    pub may_leave_house: bool,
}

/// Next mode for a ghost.
///
/// Eyes outrank frightened, which outranks the schedule. Leaving the pen and
/// returning to it are positional and stay with the ghost's movement logic:
/// `LeaveHouse`, `Eyes` and `EnterHouse` are returned unchanged.
pub fn resolve_mode(current: GhostMode, ctx: &ModeContext) -> GhostMode {
    match current {
        GhostMode::Eyes | GhostMode::EnterHouse | GhostMode::LeaveHouse => current,
        GhostMode::House if ctx.may_leave_house => GhostMode::LeaveHouse,
        GhostMode::House => GhostMode::House,
        GhostMode::Frightened | GhostMode::Scatter | GhostMode::Chase if ctx.frightened => {
            GhostMode::Frightened
        }
        GhostMode::Frightened | GhostMode::Scatter | GhostMode::Chase => ctx.phase.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ctx(phase: Phase, frightened: bool, may_leave_house: bool) -> ModeContext {
        ModeContext {
            phase,
            frightened,
            may_leave_house,
        }
    }

    #[test]
    fn test_phase_windows() {
        let expected = [
            (0, Phase::Scatter),
            (599, Phase::Scatter),
            (600, Phase::Chase),
            (1199, Phase::Chase),
            (1200, Phase::Scatter),
            (1800, Phase::Chase),
            (2400, Phase::Scatter),
            (3000, Phase::Chase),
            (3600, Phase::Scatter),
            (4199, Phase::Scatter),
            (4200, Phase::Chase),
            (100_000, Phase::Chase),
        ];
        for (ticks, phase) in expected {
            assert_eq!(scatter_chase_phase(ticks), phase, "at tick {ticks}");
        }
    }

    #[test]
    fn test_release_thresholds() {
        assert!(may_leave_house(GhostKind::Blinky, 0));
        assert!(!may_leave_house(GhostKind::Pinky, 14));
        assert!(may_leave_house(GhostKind::Pinky, 15));
        assert!(!may_leave_house(GhostKind::Inky, 29));
        assert!(may_leave_house(GhostKind::Inky, 30));
        assert!(!may_leave_house(GhostKind::Clyde, 59));
        assert!(may_leave_house(GhostKind::Clyde, 60));
    }

    #[test]
    fn test_house_release() {
        assert_eq!(
            resolve_mode(GhostMode::House, &ctx(Phase::Chase, false, false)),
            GhostMode::House
        );
        assert_eq!(
            resolve_mode(GhostMode::House, &ctx(Phase::Chase, false, true)),
            GhostMode::LeaveHouse
        );
        // A penned ghost is not frightened
        assert_eq!(
            resolve_mode(GhostMode::House, &ctx(Phase::Chase, true, false)),
            GhostMode::House
        );
    }

    #[test]
    fn test_frightened_overrides_schedule() {
        assert_eq!(
            resolve_mode(GhostMode::Chase, &ctx(Phase::Scatter, true, true)),
            GhostMode::Frightened
        );
        assert_eq!(
            resolve_mode(GhostMode::Frightened, &ctx(Phase::Chase, true, true)),
            GhostMode::Frightened
        );
        assert_eq!(
            resolve_mode(GhostMode::Frightened, &ctx(Phase::Chase, false, true)),
            GhostMode::Chase
        );
    }

    #[test]
    fn test_eyes_outrank_frightened() {
        for mode in [GhostMode::Eyes, GhostMode::EnterHouse, GhostMode::LeaveHouse] {
            assert_eq!(resolve_mode(mode, &ctx(Phase::Scatter, true, true)), mode);
        }
    }

    #[test]
    fn test_schedule_switches_hunting_ghosts() {
        assert_eq!(
            resolve_mode(GhostMode::Scatter, &ctx(Phase::Chase, false, true)),
            GhostMode::Chase
        );
        assert_eq!(
            resolve_mode(GhostMode::Chase, &ctx(Phase::Scatter, false, true)),
            GhostMode::Scatter
        );
    }

    proptest! {
        #[test]
        fn prop_chase_forever_after_seventy_seconds(ticks in 4200u64..10_000_000) {
            prop_assert_eq!(scatter_chase_phase(ticks), Phase::Chase);
        }

        #[test]
        fn prop_phase_constant_within_window(window in 0u64..7, offset in 0u64..600) {
            let start = window * 600;
            prop_assert_eq!(scatter_chase_phase(start), scatter_chase_phase(start + offset));
        }
    }
}
