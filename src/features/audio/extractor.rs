//! Voice indicator extraction
//!
//! Two statistics over the whole recording drive everything:
//! - RMS energy: `sqrt(mean(x²))`, scaled by 10
//! - Zero-crossing rate: sign changes per sample, scaled by 50 (a pitch proxy)
//!
//! Emotions come from a coarse 2×2 table on "high energy" (> 0.6) and "high
//! pitch" (> 0.5). The table is intentionally a lookup, not a continuous
//! function, so results stay reproducible.

use serde::{Deserialize, Serialize};

use crate::preprocessing::normalization::finite_or_zero;

/// Energy above which a recording counts as high-energy
const HIGH_ENERGY_THRESHOLD: f32 = 0.6;

/// Pitch proxy above which a recording counts as high-pitched
const HIGH_PITCH_THRESHOLD: f32 = 0.5;

/// Emotion-like scores derived from voice, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioEmotions {
    /// Calm score
    pub calm: f32,
    /// Stressed score
    pub stressed: f32,
    /// Sad score
    pub sad: f32,
    /// Anxious score
    pub anxious: f32,
}

/// Everything the audio modality contributes to an assessment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioIndicators {
    /// Normalized RMS energy
    pub energy: f32,
    /// Normalized zero-crossing rate
    pub pitch: f32,
    /// Tempo proxy derived from energy
    pub tempo: f32,
    /// Emotion scores
    pub emotions: AudioEmotions,
}

impl AudioIndicators {
    /// Fixed output for a missing or empty recording
    pub const fn neutral() -> Self {
        Self {
            energy: 0.5,
            pitch: 0.5,
            tempo: 0.5,
            emotions: AudioEmotions {
                calm: 0.5,
                stressed: 0.3,
                sad: 0.1,
                anxious: 0.1,
            },
        }
    }
}

/// Raw waveform statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformStats {
    /// Root-mean-square amplitude
    pub rms: f32,
    /// Number of sign changes between consecutive samples
    pub zero_crossings: usize,
    /// Number of samples
    pub len: usize,
}

/// Compute RMS and zero crossings in one pass
///
/// Non-finite samples count as 0.0. A sample of exactly 0.0 is treated as
/// non-negative when looking for sign changes.
pub fn waveform_stats(samples: &[f32]) -> WaveformStats {
    let mut sum_sq = 0.0f64;
    let mut zero_crossings = 0usize;
    let mut prev_non_negative: Option<bool> = None;

    for &raw in samples {
        let x = finite_or_zero(raw);
        sum_sq += (x as f64) * (x as f64);

        let non_negative = x >= 0.0;
        if let Some(prev) = prev_non_negative {
            if prev != non_negative {
                zero_crossings += 1;
            }
        }
        prev_non_negative = Some(non_negative);
    }

    let rms = if samples.is_empty() {
        0.0
    } else {
        (sum_sq / samples.len() as f64).sqrt() as f32
    };

    WaveformStats {
        rms,
        zero_crossings,
        len: samples.len(),
    }
}

/// Extract voice indicators from a recorded buffer
///
/// # Arguments
///
/// * `samples` - Mono samples, nominally in [-1.0, 1.0]; `None` or empty
///   yields [`AudioIndicators::neutral`]
///
/// # Example
///
/// ```
/// use mindguard::features::audio::extract_audio_indicators;
///
/// let silence = vec![0.0f32; 2048];
/// let indicators = extract_audio_indicators(Some(&silence));
/// assert_eq!(indicators.energy, 0.0);
/// assert_eq!(indicators.emotions.sad, 0.6);
/// ```
pub fn extract_audio_indicators(samples: Option<&[f32]>) -> AudioIndicators {
    let samples = match samples {
        Some(s) if !s.is_empty() => s,
        _ => {
            log::debug!("No audio samples, using neutral voice indicators");
            return AudioIndicators::neutral();
        }
    };

    let stats = waveform_stats(samples);

    let energy = (stats.rms * 10.0).min(1.0);
    let crossing_rate = stats.zero_crossings as f32 / stats.len as f32;
    let pitch = (crossing_rate * 50.0).min(1.0);
    let tempo = 0.5 + (energy - 0.5) * 0.5;

    let high_energy = energy > HIGH_ENERGY_THRESHOLD;
    let high_pitch = pitch > HIGH_PITCH_THRESHOLD;

    let emotions = AudioEmotions {
        calm: if high_energy { 0.2 } else { 0.7 },
        stressed: if high_energy && high_pitch { 0.7 } else { 0.2 },
        sad: if !high_energy && !high_pitch { 0.6 } else { 0.1 },
        anxious: if high_pitch { 0.5 } else { 0.2 },
    };

    log::debug!(
        "Audio indicators: {} samples, rms={:.4}, zcr={:.4}, energy={:.3}, pitch={:.3}, high_energy={}, high_pitch={}",
        stats.len,
        stats.rms,
        crossing_rate,
        energy,
        pitch,
        high_energy,
        high_pitch
    );

    AudioIndicators {
        energy,
        pitch,
        tempo,
        emotions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Square wave alternating sign every `period / 2` samples
    fn square_wave(len: usize, amplitude: f32, half_period: usize) -> Vec<f32> {
        (0..len)
            .map(|i| {
                if (i / half_period) % 2 == 0 {
                    amplitude
                } else {
                    -amplitude
                }
            })
            .collect()
    }

    #[test]
    fn test_missing_and_empty_are_neutral() {
        assert_eq!(extract_audio_indicators(None), AudioIndicators::neutral());
        assert_eq!(extract_audio_indicators(Some(&[])), AudioIndicators::neutral());
    }

    #[test]
    fn test_silence() {
        let samples = vec![0.0f32; 4096];
        let indicators = extract_audio_indicators(Some(&samples));

        assert_eq!(indicators.energy, 0.0);
        assert_eq!(indicators.pitch, 0.0);
        assert!((indicators.tempo - 0.25).abs() < 1e-6);
        assert_eq!(
            indicators.emotions,
            AudioEmotions {
                calm: 0.7,
                stressed: 0.2,
                sad: 0.6,
                anxious: 0.2
            }
        );
    }

    #[test]
    fn test_loud_high_pitch_is_stressed() {
        // rms 0.5 -> energy 1.0; crossing every sample -> pitch 1.0
        let samples = square_wave(2048, 0.5, 1);
        let indicators = extract_audio_indicators(Some(&samples));

        assert_eq!(indicators.energy, 1.0);
        assert_eq!(indicators.pitch, 1.0);
        assert!((indicators.tempo - 0.75).abs() < 1e-6);
        assert_eq!(indicators.emotions.calm, 0.2);
        assert_eq!(indicators.emotions.stressed, 0.7);
        assert_eq!(indicators.emotions.sad, 0.1);
        assert_eq!(indicators.emotions.anxious, 0.5);
    }

    #[test]
    fn test_loud_low_pitch() {
        // Crossing every 100 samples -> zcr ~0.01 -> pitch ~0.5 (not > 0.5)
        let samples = square_wave(10_000, 0.2, 100);
        let indicators = extract_audio_indicators(Some(&samples));

        assert!(indicators.energy > 0.6);
        assert!(indicators.pitch <= 0.5);
        assert_eq!(indicators.emotions.calm, 0.2);
        assert_eq!(indicators.emotions.stressed, 0.2);
        assert_eq!(indicators.emotions.sad, 0.1);
        assert_eq!(indicators.emotions.anxious, 0.2);
    }

    #[test]
    fn test_quiet_high_pitch() {
        let samples = square_wave(2048, 0.01, 1);
        let indicators = extract_audio_indicators(Some(&samples));

        assert!((indicators.energy - 0.1).abs() < 1e-5);
        assert_eq!(indicators.emotions.calm, 0.7);
        assert_eq!(indicators.emotions.stressed, 0.2);
        assert_eq!(indicators.emotions.sad, 0.1);
        assert_eq!(indicators.emotions.anxious, 0.5);
    }

    #[test]
    fn test_zero_crossing_count() {
        let stats = waveform_stats(&[0.5, -0.5, -0.2, 0.0, 0.3, -0.1]);
        // + - - + + -  => 3 sign changes
        assert_eq!(stats.zero_crossings, 3);
        assert_eq!(stats.len, 6);
    }

    #[test]
    fn test_non_finite_samples_are_ignored() {
        let samples = vec![f32::NAN, f32::INFINITY, 0.0, 0.0];
        let indicators = extract_audio_indicators(Some(&samples));
        assert!(indicators.energy.is_finite());
        assert_eq!(indicators.energy, 0.0);
    }
}
