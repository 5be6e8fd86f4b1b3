//! Completion chime synthesis.
//!
//! One short sine "ding": a fast linear attack to the peak gain, then an
//! exponential decay toward silence. Synthesis is pure; playback lives
//! with the presentation layer, which opens its audio output lazily and
//! feeds it these samples.

/// Completion chime parameters.
#[derive(Debug, Clone, Copy)]
pub struct Tone {
    pub freq_hz: f32,
    pub attack_secs: f32,
    pub peak_gain: f32,
    pub decay_secs: f32,
    pub floor_gain: f32,
}

impl Default for Tone {
    fn default() -> Self {
        Self {
            freq_hz: 800.0,
            attack_secs: 0.01,
            peak_gain: 0.5,
            decay_secs: 0.5,
            floor_gain: 0.01,
        }
    }
}

impl Tone {
    /// Total tone length in seconds.
    pub fn duration_secs(&self) -> f32 {
        self.decay_secs
    }

    /// Envelope gain at `t` seconds: linear ramp up to the peak, then an
    /// exponential fall that reaches the floor at the end of the tone.
    pub fn gain_at(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t < self.attack_secs {
            return self.peak_gain * (t / self.attack_secs);
        }
        let span = self.decay_secs - self.attack_secs;
        let progress = ((t - self.attack_secs) / span).min(1.0);
        self.peak_gain * (self.floor_gain / self.peak_gain).powf(progress)
    }

    /// Render the tone as mono PCM samples at `sample_rate` Hz.
    pub fn samples(&self, sample_rate: u32) -> Vec<f32> {
        let count = (self.duration_secs() * sample_rate as f32) as usize;
        (0..count)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                let phase = 2.0 * std::f32::consts::PI * self.freq_hz * t;
                phase.sin() * self.gain_at(t)
            })
            .collect()
    }
}
