//! Audible cue capability used by the workout player.

use crossbeam::channel::{unbounded, Sender};

use super::tones::{Tone, ToneError, ToneGenerator, REST_COMPLETE_TONE};

/// Something that can play the one-shot "rest is over" cue.
pub trait CuePlayer {
    /// Play the cue. Must not block the caller for the duration of the sound.
    fn play_cue(&self);
}

/// Cue player that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCuePlayer;

impl CuePlayer for SilentCuePlayer {
    fn play_cue(&self) {}
}

/// Plays cue tones on a dedicated audio thread.
///
/// Requests are queued over a channel so the caller returns immediately.
/// Device failures are logged and otherwise ignored. Dropping the player
/// closes the channel; the thread finishes any tone in flight and exits
/// on its own, so a drop never waits on the audio device.
pub struct ToneCuePlayer {
    tx: Option<Sender<Tone>>,
}

impl ToneCuePlayer {
    /// Spawn the audio thread.
    pub fn spawn(generator: ToneGenerator) -> Self {
        Self::spawn_with(move |tone| generator.play(tone))
    }

    fn spawn_with<F>(mut play: F) -> Self
    where
        F: FnMut(&Tone) -> Result<(), ToneError> + Send + 'static,
    {
        let (tx, rx) = unbounded::<Tone>();

        let worker = std::thread::Builder::new()
            .name("audio-cues".to_string())
            .spawn(move || {
                for tone in rx.iter() {
                    if let Err(e) = play(&tone) {
                        tracing::warn!("Failed to play cue: {}", e);
                    }
                }
                tracing::debug!("Audio cue thread stopped");
            });

        match worker {
            Ok(_detached) => Self { tx: Some(tx) },
            Err(e) => {
                tracing::warn!("Audio cue thread unavailable: {}", e);
                Self { tx: None }
            }
        }
    }
}

impl CuePlayer for ToneCuePlayer {
    fn play_cue(&self) {
        if let Some(tx) = &self.tx {
            if tx.send(REST_COMPLETE_TONE).is_err() {
                tracing::warn!("Cue dropped: audio thread gone");
            }
        }
    }
}

/// Build the cue player for the given audio settings.
pub fn cue_player_for(enabled: bool, volume: u8) -> Box<dyn CuePlayer> {
    if enabled && volume > 0 {
        Box::new(ToneCuePlayer::spawn(ToneGenerator::from_percent(volume)))
    } else {
        Box::new(SilentCuePlayer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_silent_cue_player() {
        SilentCuePlayer.play_cue();
    }

    #[test]
    fn test_tone_cue_player_shuts_down_on_drop() {
        // Zero volume never touches the audio device.
        let player = ToneCuePlayer::spawn(ToneGenerator::new(0.0));
        player.play_cue();
        player.play_cue();
        drop(player);
    }

    #[test]
    fn test_drop_does_not_wait_for_tone_in_flight() {
        let (started_tx, started_rx) = unbounded();
        let (release_tx, release_rx) = unbounded::<()>();
        let player = ToneCuePlayer::spawn_with(move |_tone| {
            let _ = started_tx.send(());
            let _ = release_rx.recv();
            Ok(())
        });

        player.play_cue();
        started_rx.recv_timeout(Duration::from_secs(2)).unwrap();

        let (done_tx, done_rx) = unbounded();
        std::thread::spawn(move || {
            drop(player);
            let _ = done_tx.send(());
        });

        // The tone is still "playing" here.
        assert!(done_rx.recv_timeout(Duration::from_secs(2)).is_ok());
        release_tx.send(()).unwrap();
    }
}
