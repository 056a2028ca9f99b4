use serde::{Deserialize, Serialize};

use crate::*;

/// Mixer voices, each with an independent level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Voice {
    /// Background track.
    Music = 0,
    /// One-shot sounds.
    Effects = 1,
}

impl Voice {
    pub const ALL: [Voice; 2] = [Voice::Music, Voice::Effects];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Wave assets the audio subsystem loads at startup.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    Opening,
    Playing,
    Halfway,
    NearWin,
    Complete,
    Settings,
    Correct,
}

impl Track {
    pub const ALL: [Track; 7] = [
        Track::Opening,
        Track::Playing,
        Track::Halfway,
        Track::NearWin,
        Track::Complete,
        Track::Settings,
        Track::Correct,
    ];

    /// Background track for a global state.
    pub const fn for_state(state: GameState) -> Self {
        use GameState::*;
        match state {
            Demo => Track::Opening,
            Playing => Track::Playing,
            Halfway => Track::Halfway,
            NearWin => Track::NearWin,
            Win => Track::Complete,
            Settings => Track::Settings,
        }
    }

    pub const fn file_name(self) -> &'static str {
        use Track::*;
        match self {
            Opening => "opening.wav",
            Playing => "playing_1.wav",
            Halfway => "playing_2.wav",
            NearWin => "playing_3.wav",
            Complete => "complete.wav",
            Settings => "settings.wav",
            Correct => "correct.wav",
        }
    }

    pub const fn loops(self) -> bool {
        !matches!(self, Track::Complete | Track::Correct)
    }
}

/// Capabilities the engine needs from the audio subsystem.
pub trait AudioPlayer {
    /// Switches the looping background track to the one for `state`, does nothing if it is
    /// already playing.
    fn handle_audio_for_state(&mut self, state: GameState);

    /// One-shot sound on the effects voice, overlaid on the background track.
    fn play_correct_sound(&mut self);

    /// Sets `voice` to `level` in `[0, 1]`.
    fn set_level(&mut self, voice: Voice, level: f32);
}

impl<T: AudioPlayer + ?Sized> AudioPlayer for &mut T {
    fn handle_audio_for_state(&mut self, state: GameState) {
        (**self).handle_audio_for_state(state)
    }

    fn play_correct_sound(&mut self) {
        (**self).play_correct_sound()
    }

    fn set_level(&mut self, voice: Voice, level: f32) {
        (**self).set_level(voice, level)
    }
}
