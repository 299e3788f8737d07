//! Reasons gameplay is currently paused
//!
//! Each reason is an independent flag. Ready, Won, GameOver and ResetGuard
//! replace the whole set; EatGhostPause, Dead and Intermission stack on top
//! of whatever is already there.

use serde::{Deserialize, Serialize};

/// Why gameplay is suspended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuspendReason {
    /// "READY!" countdown before a round
    Ready,
    /// Score sprite after eating a ghost
    EatGhostPause,
    /// Player caught, death animation playing
    Dead,
    /// All dots eaten
    Won,
    /// No lives left
    GameOver,
    /// Blocks the first tick after a reset
    ResetGuard,
    /// Instructions screen
    Intermission,
}

impl SuspendReason {
    pub const ALL: [SuspendReason; 7] = [
        SuspendReason::Ready,
        SuspendReason::EatGhostPause,
        SuspendReason::Dead,
        SuspendReason::Won,
        SuspendReason::GameOver,
        SuspendReason::ResetGuard,
        SuspendReason::Intermission,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Reasons that are only ever set by replacing the whole set
    pub fn is_exclusive(self) -> bool {
        matches!(
            self,
            SuspendReason::Ready
                | SuspendReason::Won
                | SuspendReason::GameOver
                | SuspendReason::ResetGuard
        )
    }
}

/// Set of active suspension reasons. Gameplay ticks only while it is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suspension {
    bits: u8,
}

impl Suspension {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_suspended(&self) -> bool {
        self.bits != 0
    }

    pub fn has(&self, reason: SuspendReason) -> bool {
        self.bits & reason.bit() != 0
    }

    /// Replace every reason with `reason`
    pub fn set_exclusive(&mut self, reason: SuspendReason) {
        debug_assert!(
            reason.is_exclusive(),
            "{reason:?} must be added, not set exclusively"
        );
        self.bits = reason.bit();
    }

    /// Union `reason` into the set
    pub fn add(&mut self, reason: SuspendReason) {
        debug_assert!(
            !reason.is_exclusive(),
            "{reason:?} must be set exclusively, not added"
        );
        self.bits |= reason.bit();
    }

    pub fn remove(&mut self, reason: SuspendReason) {
        self.bits &= !reason.bit();
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Active reasons in declaration order
    pub fn reasons(&self) -> impl Iterator<Item = SuspendReason> + '_ {
        SuspendReason::ALL
            .into_iter()
            .filter(move |&reason| self.has(reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_not_suspended() {
        let s = Suspension::new();
        assert!(!s.is_suspended());
        assert_eq!(s.reasons().count(), 0);
    }

    #[test]
    fn test_set_exclusive_replaces() {
        let mut s = Suspension::new();
        s.add(SuspendReason::Dead);
        s.add(SuspendReason::EatGhostPause);
        s.set_exclusive(SuspendReason::Won);

        assert!(s.has(SuspendReason::Won));
        assert!(!s.has(SuspendReason::Dead));
        assert!(!s.has(SuspendReason::EatGhostPause));
    }

    #[test]
    fn test_transient_reasons_stack() {
        let mut s = Suspension::new();
        s.add(SuspendReason::EatGhostPause);
        s.add(SuspendReason::Dead);
        assert_eq!(
            s.reasons().collect::<Vec<_>>(),
            vec![SuspendReason::EatGhostPause, SuspendReason::Dead]
        );

        s.remove(SuspendReason::EatGhostPause);
        assert!(s.is_suspended());
        assert!(s.has(SuspendReason::Dead));

        s.remove(SuspendReason::Dead);
        assert!(!s.is_suspended());
    }

    #[test]
    fn test_remove_absent_reason_is_noop() {
        let mut s = Suspension::new();
        s.set_exclusive(SuspendReason::Ready);
        s.remove(SuspendReason::Intermission);
        assert!(s.has(SuspendReason::Ready));
    }

    #[test]
    fn test_intermission_stacks_on_reset_guard() {
        let mut s = Suspension::new();
        s.set_exclusive(SuspendReason::ResetGuard);
        s.add(SuspendReason::Intermission);
        assert!(s.has(SuspendReason::ResetGuard));
        assert!(s.has(SuspendReason::Intermission));
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_adding_exclusive_reason_asserts() {
        let mut s = Suspension::new();
        s.add(SuspendReason::GameOver);
    }
}
