//! Audio cue handling
//!
//! The round controller only emits `CueCommand`s. A host drains them every
//! tick and hands them to a `CueSink`, which owns real playback.

use std::collections::HashSet;

use crate::sim::{Cue, CueCommand};

impl Cue {
    /// Background cues loop until stopped; the rest are one-shots
    pub fn is_looping(self) -> bool {
        matches!(self, Cue::Siren | Cue::PowerPellet)
    }
}

/// Playback backend
pub trait CueSink {
    fn play(&mut self, cue: Cue);
    fn stop(&mut self, cue: Cue);

    fn handle(&mut self, command: CueCommand) {
        match command {
            CueCommand::Play(cue) => self.play(cue),
            CueCommand::Stop(cue) => self.stop(cue),
        }
    }

    fn handle_all(&mut self, commands: impl IntoIterator<Item = CueCommand>)
    where
        Self: Sized,
    {
        for command in commands {
            self.handle(command);
        }
    }
}

/// Sink for headless runs: logs cues and tracks which loops are playing
#[derive(Debug, Default)]
pub struct AudioManager {
    muted: bool,
    looping: HashSet<Cue>,
    played: usize,
}

impl AudioManager {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            ..Self::default()
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.looping.clear();
        }
    }

    pub fn is_playing(&self, cue: Cue) -> bool {
        self.looping.contains(&cue)
    }

    /// Cues started since creation
    pub fn played(&self) -> usize {
        self.played
    }
}

impl CueSink for AudioManager {
    fn play(&mut self, cue: Cue) {
        if self.muted {
            return;
        }
        // Restarting a playing loop is a no-op
        if cue.is_looping() && !self.looping.insert(cue) {
            return;
        }
        self.played += 1;
        log::debug!("play {}", cue.name());
    }

    fn stop(&mut self, cue: Cue) {
        if self.looping.remove(&cue) {
            log::debug!("stop {}", cue.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loops_tracked_until_stopped() {
        let mut audio = AudioManager::new(false);
        audio.handle_all([
            CueCommand::Play(Cue::Siren),
            CueCommand::Play(Cue::Munch1),
            CueCommand::Stop(Cue::PowerPellet),
        ]);
        assert!(audio.is_playing(Cue::Siren));
        assert!(!audio.is_playing(Cue::Munch1));
        assert_eq!(audio.played(), 2);

        audio.handle(CueCommand::Stop(Cue::Siren));
        assert!(!audio.is_playing(Cue::Siren));
    }

    #[test]
    fn test_restarting_loop_is_not_counted() {
        let mut audio = AudioManager::new(false);
        audio.handle_all([CueCommand::Play(Cue::Siren), CueCommand::Play(Cue::Siren)]);
        assert!(audio.is_playing(Cue::Siren));
        assert_eq!(audio.played(), 1);

        audio.handle_all([CueCommand::Stop(Cue::Siren), CueCommand::Play(Cue::Siren)]);
        assert_eq!(audio.played(), 2);
    }

    #[test]
    fn test_muted_drops_cues() {
        let mut audio = AudioManager::new(true);
        audio.handle(CueCommand::Play(Cue::PowerPellet));
        assert!(!audio.is_playing(Cue::PowerPellet));
        assert_eq!(audio.played(), 0);

        audio.set_muted(false);
        audio.handle(CueCommand::Play(Cue::PowerPellet));
        assert!(audio.is_playing(Cue::PowerPellet));
    }
}
