//! Tone generation for audio cues.

use rodio::source::SineWave;
use rodio::{OutputStream, Sink, Source};
use std::time::Duration;

/// The rest-over beep: 800 Hz sine for half a second.
pub const REST_COMPLETE_TONE: Tone = Tone {
    frequency_hz: 800.0,
    duration_ms: 500,
    amplitude: 0.3,
};

/// A single tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency in Hz (0 for silence)
    pub frequency_hz: f32,
    /// Duration in milliseconds
    pub duration_ms: u64,
    /// Peak amplitude before the volume setting is applied (0.0 - 1.0)
    pub amplitude: f32,
}

impl Tone {
    /// Create a tone at full amplitude.
    pub fn new(frequency_hz: f32, duration_ms: u64) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            amplitude: 1.0,
        }
    }

    /// Check if this is a silent tone.
    pub fn is_silent(&self) -> bool {
        self.frequency_hz <= 0.0 || self.amplitude <= 0.0
    }

    /// Duration as a `Duration`.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Plays tones on the default output device.
#[derive(Debug, Clone)]
pub struct ToneGenerator {
    /// Volume level (0.0 - 1.0)
    volume: f32,
}

impl Default for ToneGenerator {
    fn default() -> Self {
        Self::new(0.8)
    }
}

impl ToneGenerator {
    /// Create a generator with a volume level (0.0 - 1.0).
    pub fn new(volume: f32) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Create a generator from a 0-100 volume setting.
    pub fn from_percent(volume: u8) -> Self {
        Self::new(volume.min(100) as f32 / 100.0)
    }

    /// Current volume level.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Effective amplitude for a tone at the current volume.
    pub fn effective_amplitude(&self, tone: &Tone) -> f32 {
        (tone.amplitude * self.volume).clamp(0.0, 1.0)
    }

    /// Play a tone, blocking until it finishes.
    ///
    /// The output stream is opened on the calling thread; it cannot be moved
    /// across threads.
    pub fn play(&self, tone: &Tone) -> Result<(), ToneError> {
        if tone.is_silent() || self.volume <= 0.0 {
            return Ok(());
        }

        let (_stream, stream_handle) =
            OutputStream::try_default().map_err(|e| ToneError::DeviceError(e.to_string()))?;

        let sink =
            Sink::try_new(&stream_handle).map_err(|e| ToneError::PlaybackError(e.to_string()))?;

        let source = SineWave::new(tone.frequency_hz)
            .take_duration(tone.duration())
            .amplify(self.effective_amplitude(tone));

        sink.append(source);
        sink.sleep_until_end();

        Ok(())
    }
}

/// Tone playback errors.
#[derive(Debug, thiserror::Error)]
pub enum ToneError {
    #[error("Audio device error: {0}")]
    DeviceError(String),

    #[error("Playback error: {0}")]
    PlaybackError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_complete_tone() {
        assert_eq!(REST_COMPLETE_TONE.frequency_hz, 800.0);
        assert_eq!(REST_COMPLETE_TONE.duration(), Duration::from_millis(500));
        assert!(!REST_COMPLETE_TONE.is_silent());
    }

    #[test]
    fn test_volume_scaling() {
        let generator = ToneGenerator::from_percent(50);
        let amplitude = generator.effective_amplitude(&REST_COMPLETE_TONE);
        assert!((amplitude - 0.15).abs() < 1e-6);

        assert_eq!(ToneGenerator::from_percent(250).volume(), 1.0);
    }

    #[test]
    fn test_silent_tone_plays_without_device() {
        let generator = ToneGenerator::default();
        assert!(generator.play(&Tone::new(0.0, 100)).is_ok());
        assert!(ToneGenerator::new(0.0).play(&REST_COMPLETE_TONE).is_ok());
    }
}
