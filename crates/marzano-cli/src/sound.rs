//! Completion chime playback.
//!
//! The audio output is opened lazily on the first play and reused for the
//! rest of the process. Playback needs the `audio` feature (rodio);
//! without it the chime degrades to the terminal bell.

use marzano_core::Tone;

pub struct Chime {
    #[cfg_attr(not(feature = "audio"), allow(dead_code))]
    tone: Tone,
    /// Gain percentage, 0-100.
    volume: u32,
    #[cfg(feature = "audio")]
    output: Option<(rodio::OutputStream, rodio::OutputStreamHandle)>,
}

impl Chime {
    pub fn new(volume: u32) -> Self {
        Self {
            tone: Tone::default(),
            volume,
            #[cfg(feature = "audio")]
            output: None,
        }
    }

    /// Play one chime. The tone schedules its own stop; nothing to clean
    /// up between plays.
    pub fn play(&mut self) {
        if self.volume == 0 {
            return;
        }
        self.play_impl();
    }

    #[cfg(feature = "audio")]
    fn play_impl(&mut self) {
        use rodio::buffer::SamplesBuffer;
        use rodio::{OutputStream, Sink};

        const SAMPLE_RATE: u32 = 44_100;

        if self.output.is_none() {
            match OutputStream::try_default() {
                Ok(output) => self.output = Some(output),
                Err(e) => {
                    eprintln!("warning: no audio output: {e}");
                    return;
                }
            }
        }
        let Some((_stream, handle)) = self.output.as_ref() else {
            return;
        };

        let gain = self.volume as f32 / 100.0;
        let samples: Vec<f32> = self
            .tone
            .samples(SAMPLE_RATE)
            .into_iter()
            .map(|s| s * gain)
            .collect();
        match Sink::try_new(handle) {
            Ok(sink) => {
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
                sink.detach();
            }
            Err(e) => eprintln!("warning: failed to play chime: {e}"),
        }
    }

    #[cfg(not(feature = "audio"))]
    fn play_impl(&mut self) {
        use std::io::Write;

        print!("\x07");
        let _ = std::io::stdout().flush();
    }
}
