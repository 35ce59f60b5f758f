//! Audio cues for workout sessions.

pub mod cues;
pub mod tones;

pub use cues::{cue_player_for, CuePlayer, SilentCuePlayer, ToneCuePlayer};
pub use tones::{Tone, ToneError, ToneGenerator, REST_COMPLETE_TONE};
